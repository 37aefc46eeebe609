use std::collections::BTreeMap;
use std::num::NonZeroU64;

use serde::{Deserialize, Serialize};
use zarrs::{
    array::{
        ArrayMetadataV3, FillValueMetadata,
        chunk_grid::{RegularChunkGrid, RegularChunkGridConfiguration},
    },
    group::GroupMetadataV3,
    metadata::v3::MetadataV3,
    plugin::{ExtensionAliasesV3, ExtensionName},
};

use crate::array::LabeledArray;
use crate::multiscale::{CosemArrayAttrs, CosemGroupMetadataV1};

/// How the storage chunk shape is assigned to each array in a group being
/// built.
#[derive(Debug, Clone, PartialEq)]
pub enum ChunkPolicy {
    /// Inherit the chunking of the source data where it is chunked;
    /// otherwise use a single chunk spanning the full array shape.
    Auto,
    /// One chunk shape per array, matching the input order.
    Explicit(Vec<Vec<u64>>),
}

impl ChunkPolicy {
    /// Resolve to a concrete chunk-shape list, one entry per array.
    pub fn resolve(&self, arrays: &[(String, LabeledArray)]) -> crate::Result<Vec<Vec<u64>>> {
        match self {
            Self::Auto => {
                let resolved: Vec<_> = arrays
                    .iter()
                    .map(|(_, array)| {
                        array
                            .chunks()
                            .map(<[u64]>::to_vec)
                            .unwrap_or_else(|| array.shape())
                    })
                    .collect();
                log::debug!("resolved automatic chunking to {resolved:?}");
                Ok(resolved)
            }
            Self::Explicit(chunks) => {
                if chunks.len() != arrays.len() {
                    return Err(crate::Error::PolicyLength {
                        expected: arrays.len(),
                        actual: chunks.len(),
                    });
                }
                Ok(chunks.clone())
            }
        }
    }
}

/// A declarative description of one multiscale member array: shape, dtype
/// and chunk shape, plus the attributes that will be written next to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CosemArraySpec {
    pub shape: Vec<u64>,
    pub dtype: String,
    pub chunks: Vec<u64>,
    pub attributes: CosemArrayAttrs,
}

impl CosemArraySpec {
    /// Describe a labelled array, inferring its transform attributes.
    pub fn from_array(
        array: &LabeledArray,
        chunks: Vec<u64>,
        extra_attrs: serde_json::Map<String, serde_json::Value>,
    ) -> crate::Result<Self> {
        let shape = array.shape();
        if chunks.len() != shape.len() {
            return Err(crate::Error::general(format!(
                "chunk shape has {} dimensions but the array has {}",
                chunks.len(),
                shape.len()
            )));
        }
        let mut attributes = CosemArrayAttrs::from_array(array)?;
        attributes.extra = extra_attrs;
        Ok(Self {
            shape,
            dtype: array.dtype().to_string(),
            chunks,
            attributes,
        })
    }
}

/// A complete specification of a COSEM-style multiscale group: group-level
/// multiscale attributes plus one array specification per scale level.
///
/// The member keys always correspond 1:1 with the dataset paths named in
/// the attributes document; the constructor and deserialization both reject
/// documents where they disagree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GroupRepr")]
pub struct CosemMultiscaleGroup {
    attributes: CosemGroupMetadataV1,
    members: BTreeMap<String, CosemArraySpec>,
}

#[derive(Deserialize)]
struct GroupRepr {
    attributes: CosemGroupMetadataV1,
    members: BTreeMap<String, CosemArraySpec>,
}

impl TryFrom<GroupRepr> for CosemMultiscaleGroup {
    type Error = crate::Error;

    fn try_from(repr: GroupRepr) -> Result<Self, Self::Error> {
        Self::new(repr.attributes, repr.members)
    }
}

impl CosemMultiscaleGroup {
    pub fn new(
        attributes: CosemGroupMetadataV1,
        members: BTreeMap<String, CosemArraySpec>,
    ) -> crate::Result<Self> {
        let mut paths: Vec<&str> = attributes.paths().collect();
        paths.sort_unstable();
        let keys: Vec<&str> = members.keys().map(String::as_str).collect();
        if paths != keys {
            return Err(crate::Error::MemberMismatch {
                members: keys.iter().map(ToString::to_string).collect(),
                paths: paths.iter().map(ToString::to_string).collect(),
            });
        }
        Ok(Self {
            attributes,
            members,
        })
    }

    /// Model a multiscale group from an ordered collection of path / array
    /// pairs.
    pub fn from_arrays(
        arrays: &[(String, LabeledArray)],
        chunks: ChunkPolicy,
        name: Option<String>,
    ) -> crate::Result<Self> {
        Self::from_arrays_with_attrs(arrays, chunks, name, serde_json::Map::new())
    }

    /// As [CosemMultiscaleGroup::from_arrays], attaching `extra_attrs` to
    /// every member array's attributes.
    pub fn from_arrays_with_attrs(
        arrays: &[(String, LabeledArray)],
        chunks: ChunkPolicy,
        name: Option<String>,
        extra_attrs: serde_json::Map<String, serde_json::Value>,
    ) -> crate::Result<Self> {
        log::debug!(
            "modeling multiscale group {name:?} with {} scale level(s)",
            arrays.len()
        );
        let resolved = chunks.resolve(arrays)?;
        let attributes = CosemGroupMetadataV1::from_arrays(arrays, name)?;
        let members = arrays
            .iter()
            .zip(resolved)
            .map(|((key, array), chunks)| {
                Ok((
                    key.clone(),
                    CosemArraySpec::from_array(array, chunks, extra_attrs.clone())?,
                ))
            })
            .collect::<crate::Result<BTreeMap<_, _>>>()?;
        Self::new(attributes, members)
    }

    pub fn attributes(&self) -> &CosemGroupMetadataV1 {
        &self.attributes
    }

    pub fn members(&self) -> &BTreeMap<String, CosemArraySpec> {
        &self.members
    }

    pub fn member(&self, key: &str) -> Option<&CosemArraySpec> {
        self.members.get(key)
    }

    /// Convert to Zarr V3 node metadata: the group document plus one array
    /// document per member, ready to be handed to a store.
    pub fn to_zarr_nodes(
        &self,
    ) -> crate::Result<(GroupMetadataV3, BTreeMap<String, ArrayMetadataV3>)> {
        let group = GroupMetadataV3::try_from(self)?;
        let members = self
            .members
            .iter()
            .map(|(key, spec)| Ok((key.clone(), ArrayMetadataV3::try_from(spec)?)))
            .collect::<crate::Result<BTreeMap<_, _>>>()?;
        Ok((group, members))
    }
}

/// Creates a regular chunk grid from a chunk shape.
fn convert_chunk_grid(chunks: &[u64]) -> crate::Result<MetadataV3> {
    let chunk_shape: Vec<_> = chunks
        .iter()
        .map(|&n| NonZeroU64::new(n).ok_or_else(|| crate::Error::general("zero chunk extent")))
        .collect::<crate::Result<Vec<_>>>()?;
    let out = MetadataV3::new_with_serializable_configuration(
        RegularChunkGrid::aliases_v3().default_name.clone().to_string(),
        &RegularChunkGridConfiguration {
            chunk_shape: chunk_shape.into(),
        },
    )?;
    Ok(out)
}

fn convert_data_type(dtype: &str) -> crate::Result<MetadataV3> {
    // COSEM dtype names coincide with the Zarr V3 names for these types.
    match dtype {
        "uint8" | "int8" | "uint16" | "int16" | "uint32" | "int32" | "uint64" | "int64"
        | "float32" | "float64" => Ok(MetadataV3::new(dtype.to_string())),
        s => Err(crate::Error::general(format!("unsupported data type: {s}"))),
    }
}

fn convert_fill_value() -> FillValueMetadata {
    FillValueMetadata::Number(serde_json::Number::from(0))
}

fn convert_codecs() -> crate::Result<Vec<MetadataV3>> {
    let bytes = MetadataV3::new_with_serializable_configuration(
        "bytes".to_string(),
        &serde_json::json!({ "endian": "little" }),
    )?;
    Ok(vec![bytes])
}

fn attributes_map<T: Serialize>(value: &T) -> crate::Result<serde_json::Map<String, serde_json::Value>> {
    match serde_json::to_value(value)? {
        serde_json::Value::Object(map) => Ok(map),
        other => Err(crate::Error::general(format!(
            "attributes must serialize to a JSON object, got {other}"
        ))),
    }
}

impl TryFrom<&CosemArraySpec> for ArrayMetadataV3 {
    type Error = crate::Error;

    fn try_from(spec: &CosemArraySpec) -> Result<Self, Self::Error> {
        let chunk_grid = convert_chunk_grid(&spec.chunks)?;
        let data_type = convert_data_type(&spec.dtype)?;
        let fill_value = convert_fill_value();
        let codecs = convert_codecs()?;
        let out = Self::new(spec.shape.clone(), chunk_grid, data_type, fill_value, codecs)
            .with_attributes(attributes_map(&spec.attributes)?);
        Ok(out)
    }
}

impl TryFrom<&CosemMultiscaleGroup> for GroupMetadataV3 {
    type Error = crate::Error;

    fn try_from(group: &CosemMultiscaleGroup) -> Result<Self, Self::Error> {
        Ok(Self::default().with_attributes(attributes_map(&group.attributes)?))
    }
}
