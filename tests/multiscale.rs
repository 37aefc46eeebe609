use serde_json::json;
use zarrs_cosem::Error;
use zarrs_cosem::array::LabeledArray;
use zarrs_cosem::multiscale::{CosemArrayAttrs, CosemGroupMetadataV1, PathPolicy};
use zarrs_cosem::transform::{AxisOrder, STTransform};

fn names(vals: &[&str]) -> Vec<String> {
    vals.iter().map(ToString::to_string).collect()
}

/// A two-level pyramid; s1 covers the same extent at half the resolution.
fn pyramid() -> Vec<(String, LabeledArray)> {
    env_logger::try_init().ok();
    let s0_transform = STTransform::new(
        names(&["z", "y", "x"]),
        names(&["nm", "m", "mm"]),
        vec![0.0, 1.0, 2.0],
        vec![1.0, 2.0, 3.0],
        AxisOrder::RowMajor,
    )
    .expect("valid transform");
    let s1_transform = STTransform::new(
        names(&["z", "y", "x"]),
        names(&["nm", "m", "mm"]),
        vec![0.5, 2.0, 3.5],
        vec![2.0, 4.0, 6.0],
        AxisOrder::RowMajor,
    )
    .expect("valid transform");
    vec![
        (
            "s0".to_string(),
            LabeledArray::from_transform(&s0_transform, &[8, 8, 8], "uint8").expect("valid array"),
        ),
        (
            "s1".to_string(),
            LabeledArray::from_transform(&s1_transform, &[4, 4, 4], "uint8").expect("valid array"),
        ),
    ]
}

#[test]
fn v1_datasets_embed_inferred_transforms() {
    let arrays = pyramid();
    let meta = CosemGroupMetadataV1::from_arrays(&arrays, Some("test".to_string()))
        .expect("buildable");
    assert_eq!(meta.multiscales.len(), 1);
    let multiscale = &meta.multiscales[0];
    assert_eq!(multiscale.name.as_deref(), Some("test"));
    assert_eq!(multiscale.datasets.len(), arrays.len());
    for ((path, array), dataset) in arrays.iter().zip(&multiscale.datasets) {
        assert_eq!(&dataset.path, path);
        assert_eq!(
            dataset.transform,
            STTransform::from_array(array, false).expect("inferable")
        );
    }
}

#[test]
#[allow(deprecated)]
fn v2_datasets_are_bare_paths() {
    use zarrs_cosem::multiscale::CosemGroupMetadataV2;

    let arrays: Vec<LabeledArray> = pyramid().into_iter().map(|(_, a)| a).collect();
    let meta = CosemGroupMetadataV2::from_arrays(&arrays, PathPolicy::Auto, None)
        .expect("buildable");
    assert_eq!(
        serde_json::to_value(&meta).expect("serializable"),
        json!({"multiscales": [{"name": null, "datasets": ["s0", "s1"]}]})
    );
}

#[test]
fn auto_paths_count_up_from_s0() {
    assert_eq!(
        PathPolicy::Auto.resolve(4).expect("resolvable"),
        vec!["s0", "s1", "s2", "s3"]
    );
}

#[test]
fn explicit_paths_keep_input_order() {
    let paths = PathPolicy::Explicit(names(&["fine", "coarse"]));
    assert_eq!(paths.resolve(2).expect("resolvable"), vec!["fine", "coarse"]);
}

#[test]
fn explicit_path_count_must_match() {
    let paths = PathPolicy::Explicit(names(&["only"]));
    assert!(matches!(
        paths.resolve(2),
        Err(Error::PolicyLength {
            expected: 2,
            actual: 1
        })
    ));
}

#[test]
fn array_attrs_document_shape() {
    let arrays = pyramid();
    let attrs = CosemArrayAttrs::from_array(&arrays[0].1).expect("inferable");
    assert_eq!(
        serde_json::to_value(&attrs).expect("serializable"),
        json!({
            "transform": {
                "order": "row-major",
                "axes": ["z", "y", "x"],
                "units": ["nm", "m", "mm"],
                "translate": [0.0, 1.0, 2.0],
                "scale": [1.0, 2.0, 3.0],
            }
        })
    );
}
