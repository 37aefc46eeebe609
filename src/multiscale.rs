use serde::{Deserialize, Serialize};

use crate::array::LabeledArray;
use crate::transform::STTransform;

/// One scale level of a multiscale pyramid: a storage path relative to the
/// owning group, paired with the geometry of the array stored there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleMetaV1 {
    pub path: String,
    pub transform: STTransform,
}

/// A named, ordered collection of scale levels with embedded transforms.
///
/// Convention orders the datasets from full resolution to coarsest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiscaleMetaV1 {
    pub name: Option<String>,
    pub datasets: Vec<ScaleMetaV1>,
}

/// A named, ordered collection of scale-level paths without transforms.
///
/// Transforms for this schema version live on each array's own attributes,
/// so the group-level document carries strictly less information than
/// [MultiscaleMetaV1].
#[deprecated(note = "v2 multiscale metadata is retained for reading existing data only")]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiscaleMetaV2 {
    pub name: Option<String>,
    pub datasets: Vec<String>,
}

/// COSEM-style multiscale group attributes, version 1.
///
/// Serializes to the on-disk document
/// `{"multiscales": [{"name": ..., "datasets": [{"path": ..., "transform": ...}, ...]}]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CosemGroupMetadataV1 {
    pub multiscales: Vec<MultiscaleMetaV1>,
}

impl CosemGroupMetadataV1 {
    /// Generate multiscale metadata from an ordered collection of
    /// path / array pairs, inferring a row-major transform from each array.
    ///
    /// The arrays are assumed to share their dimension names, with varying
    /// coordinates.
    pub fn from_arrays(
        arrays: &[(String, LabeledArray)],
        name: Option<String>,
    ) -> crate::Result<Self> {
        let datasets = arrays
            .iter()
            .map(|(path, array)| {
                Ok(ScaleMetaV1 {
                    path: path.clone(),
                    transform: STTransform::from_array(array, false)?,
                })
            })
            .collect::<crate::Result<Vec<_>>>()?;
        Ok(Self {
            multiscales: vec![MultiscaleMetaV1 { name, datasets }],
        })
    }

    /// All dataset paths referenced by this document, in document order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.multiscales
            .iter()
            .flat_map(|m| m.datasets.iter())
            .map(|d| d.path.as_str())
    }
}

/// COSEM-style multiscale group attributes, version 2.
///
/// Serializes to `{"multiscales": [{"name": ..., "datasets": [<path>, ...]}]}`.
/// Callers of this schema version must attach a transform to each member
/// array's own attributes separately; see [crate::multiscale::CosemArrayAttrs].
#[deprecated(note = "v2 multiscale metadata is retained for reading existing data only")]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CosemGroupMetadataV2 {
    #[allow(deprecated)]
    pub multiscales: Vec<MultiscaleMetaV2>,
}

#[allow(deprecated)]
impl CosemGroupMetadataV2 {
    /// Generate multiscale metadata naming one path per input array.
    pub fn from_arrays(
        arrays: &[LabeledArray],
        paths: PathPolicy,
        name: Option<String>,
    ) -> crate::Result<Self> {
        let datasets = paths.resolve(arrays.len())?;
        Ok(Self {
            multiscales: vec![MultiscaleMetaV2 { name, datasets }],
        })
    }
}

/// Attributes attached to a single multiscale member array: its transform,
/// plus any unstructured extra attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CosemArrayAttrs {
    pub transform: STTransform,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl CosemArrayAttrs {
    pub fn from_array(array: &LabeledArray) -> crate::Result<Self> {
        Ok(Self {
            transform: STTransform::from_array(array, false)?,
            extra: serde_json::Map::new(),
        })
    }
}

/// How member arrays of a multiscale collection are named.
#[derive(Debug, Clone, PartialEq)]
pub enum PathPolicy {
    /// Name arrays `s0`, `s1`, ... in input order; by convention index 0 is
    /// the full-resolution array. The builder does not verify decreasing
    /// resolution.
    Auto,
    /// One path per array, matching the input order.
    Explicit(Vec<String>),
}

impl PathPolicy {
    /// Resolve to a concrete path list for `count` arrays.
    pub fn resolve(&self, count: usize) -> crate::Result<Vec<String>> {
        match self {
            Self::Auto => Ok((0..count).map(|idx| format!("s{idx}")).collect()),
            Self::Explicit(paths) => {
                if paths.len() != count {
                    return Err(crate::Error::PolicyLength {
                        expected: count,
                        actual: paths.len(),
                    });
                }
                Ok(paths.clone())
            }
        }
    }
}
