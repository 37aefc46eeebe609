use serde::{Deserialize, Serialize};

use crate::array::{Coordinate, LabeledArray};

/// Unit assumed for coordinates that carry no unit annotation.
pub const DEFAULT_UNIT: &str = "m";

/// The array indexing convention assumed by the per-axis fields of a
/// transform.
///
/// Tools in the N5 ecosystem express axes in the reverse of the order native
/// to row-major array libraries. A column-major transform lists its axes (and
/// the matching units, translations and scales) in that reversed order, so
/// the same physical geometry can be written for either ecosystem without
/// touching the underlying array.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AxisOrder {
    #[default]
    RowMajor,
    ColumnMajor,
}

/// An N-dimensional scaling + translation over labelled axes with units.
///
/// Converting an array index into a coordinate applies the scaling before
/// the translation. All per-axis fields have the same length, enforced at
/// construction (including deserialization).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TransformRepr")]
pub struct STTransform {
    order: AxisOrder,
    axes: Vec<String>,
    units: Vec<String>,
    translate: Vec<f64>,
    scale: Vec<f64>,
}

#[derive(Deserialize)]
struct TransformRepr {
    #[serde(default)]
    order: AxisOrder,
    axes: Vec<String>,
    units: Vec<String>,
    translate: Vec<f64>,
    scale: Vec<f64>,
}

impl TryFrom<TransformRepr> for STTransform {
    type Error = crate::Error;

    fn try_from(repr: TransformRepr) -> Result<Self, Self::Error> {
        Self::new(repr.axes, repr.units, repr.translate, repr.scale, repr.order)
    }
}

impl STTransform {
    pub fn new(
        axes: Vec<String>,
        units: Vec<String>,
        translate: Vec<f64>,
        scale: Vec<f64>,
        order: AxisOrder,
    ) -> crate::Result<Self> {
        if axes.len() != units.len()
            || units.len() != translate.len()
            || translate.len() != scale.len()
        {
            return Err(crate::Error::TransformLength {
                axes: axes.len(),
                units: units.len(),
                translate: translate.len(),
                scale: scale.len(),
            });
        }
        Ok(Self {
            order,
            axes,
            units,
            translate,
            scale,
        })
    }

    pub fn order(&self) -> AxisOrder {
        self.order
    }

    pub fn axes(&self) -> &[String] {
        &self.axes
    }

    pub fn units(&self) -> &[String] {
        &self.units
    }

    pub fn translate(&self) -> &[f64] {
        &self.translate
    }

    pub fn scale(&self) -> &[f64] {
        &self.scale
    }

    pub fn ndim(&self) -> usize {
        self.axes.len()
    }

    /// Generate a bounded coordinate grid for an array of the given shape.
    ///
    /// `shape` is in native (row-major) dimension order and the returned
    /// coordinates are too. A row-major transform is read forwards; a
    /// column-major transform is read back-to-front, axis names together
    /// with their units, translations and scales.
    ///
    /// This is the inverse of [STTransform::from_array]: inferring a
    /// transform from the generated coordinates reproduces this transform.
    pub fn to_coords(&self, shape: &[u64]) -> crate::Result<Vec<Coordinate>> {
        let n = self.ndim();
        if shape.len() != n {
            return Err(crate::Error::general(format!(
                "shape has {} dimensions but the transform has {n}",
                shape.len()
            )));
        }
        let mut out = Vec::with_capacity(n);
        for (pos, &len) in shape.iter().enumerate() {
            let i = match self.order {
                AxisOrder::RowMajor => pos,
                AxisOrder::ColumnMajor => n - 1 - pos,
            };
            let values = (0..len)
                .map(|k| self.translate[i] + k as f64 * self.scale[i])
                .collect();
            out.push(Coordinate::new(
                self.axes[i].clone(),
                Some(self.units[i].clone()),
                values,
            ));
        }
        Ok(out)
    }

    /// Infer a transform from a sequence of coordinates, one per dimension,
    /// already listed in the order implied by `order`.
    ///
    /// The translation is the first value of each coordinate and the scale
    /// is the absolute difference of the first two. The remaining values are
    /// assumed, not checked, to be evenly spaced.
    pub fn from_coords<'a, I>(coords: I, order: AxisOrder) -> crate::Result<Self>
    where
        I: IntoIterator<Item = &'a Coordinate>,
    {
        let mut axes = Vec::new();
        let mut units = Vec::new();
        let mut translate = Vec::new();
        let mut scale = Vec::new();

        for coord in coords {
            if coord.len() < 2 {
                return Err(crate::Error::InsufficientSamples {
                    dim: coord.dim.clone(),
                    len: coord.len(),
                });
            }
            let spacing = (coord.values[1] - coord.values[0]).abs();
            if !(spacing > 0.0) {
                return Err(crate::Error::NonPositiveScale {
                    dim: coord.dim.clone(),
                    scale: spacing,
                });
            }
            axes.push(coord.dim.clone());
            units.push(
                coord
                    .unit
                    .clone()
                    .unwrap_or_else(|| DEFAULT_UNIT.to_string()),
            );
            translate.push(coord.values[0]);
            scale.push(spacing);
        }

        Self::new(axes, units, translate, scale, order)
    }

    /// Infer a transform from a labelled array's coordinates.
    ///
    /// With `reverse_axes` the coordinate order is reversed before inference
    /// and the result is tagged column-major, producing geometry metadata in
    /// the axis convention of N5 tools without altering the array itself.
    pub fn from_array(array: &LabeledArray, reverse_axes: bool) -> crate::Result<Self> {
        if reverse_axes {
            Self::from_coords(array.coords().iter().rev(), AxisOrder::ColumnMajor)
        } else {
            Self::from_coords(array.coords(), AxisOrder::RowMajor)
        }
    }
}
