use crate::transform::STTransform;

/// A labelled 1D coordinate sequence for a single array dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct Coordinate {
    /// Name of the dimension this coordinate annotates.
    pub dim: String,
    /// Physical unit of the values; inference substitutes meters if absent.
    pub unit: Option<String>,
    /// Coordinate values, one per sample along the dimension.
    pub values: Vec<f64>,
}

impl Coordinate {
    pub fn new(dim: impl Into<String>, unit: Option<String>, values: Vec<f64>) -> Self {
        Self {
            dim: dim.into(),
            unit,
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// An array described by its per-dimension coordinates rather than its data.
///
/// This is the input model for transform inference and the multiscale
/// builders: a dtype, one [Coordinate] per dimension in native (row-major)
/// dimension order, and optionally the chunk shape of the source data.
/// The array shape is derived from the coordinate lengths.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledArray {
    coords: Vec<Coordinate>,
    dtype: String,
    chunks: Option<Vec<u64>>,
}

impl LabeledArray {
    pub fn new(coords: Vec<Coordinate>, dtype: impl Into<String>) -> Self {
        Self {
            coords,
            dtype: dtype.into(),
            chunks: None,
        }
    }

    /// Record the chunk shape of the source data, which the automatic chunk
    /// policy will inherit.
    pub fn with_chunks(mut self, chunks: Vec<u64>) -> crate::Result<Self> {
        if chunks.len() != self.coords.len() {
            return Err(crate::Error::general(format!(
                "chunk shape has {} dimensions but the array has {}",
                chunks.len(),
                self.coords.len()
            )));
        }
        self.chunks = Some(chunks);
        Ok(self)
    }

    /// Build an array whose coordinates are generated by `transform` over a
    /// grid of the given shape.
    pub fn from_transform(
        transform: &STTransform,
        shape: &[u64],
        dtype: impl Into<String>,
    ) -> crate::Result<Self> {
        Ok(Self::new(transform.to_coords(shape)?, dtype))
    }

    pub fn coords(&self) -> &[Coordinate] {
        &self.coords
    }

    pub fn dtype(&self) -> &str {
        &self.dtype
    }

    pub fn chunks(&self) -> Option<&[u64]> {
        self.chunks.as_deref()
    }

    pub fn shape(&self) -> Vec<u64> {
        self.coords.iter().map(|c| c.len() as u64).collect()
    }

    pub fn ndim(&self) -> usize {
        self.coords.len()
    }
}
