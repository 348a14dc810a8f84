//! Interfaces and implementations specific to integration with `ndarray`.
//!
//! This module introduces the trait [`IntoNdArray`], which maps an MGH volume
//! into a four-dimensional [`Array`] indexed by `[x, y, z, frame]`, and
//! [`volume_from_ndarray`] for the opposite direction.
//!
//! #### Note on memory order
//!
//! The values of each voxel are contiguous in memory, followed by the
//! voxels along the first axis, so the resulting array is in column major
//! order (Fortran order) with the frame axis moved to the end. Arrays
//! given to [`volume_from_ndarray`] may have any memory layout.
//!
//! [`IntoNdArray`]: ./trait.IntoNdArray.html
//! [`volume_from_ndarray`]: ./fn.volume_from_ndarray.html
//! [`Array`]: ../../../ndarray/type.Array.html
//!
use super::element::DataElement;
use super::inmem::InMemMghVolume;
use super::MghVolume;
use crate::error::{MghError, Result};
use crate::header::MghHeader;
use ndarray::{Array, Array4, ArrayBase, Axis, Data, Dimension, Ix4, ShapeBuilder};

/// Trait for volumes which can be converted to an ndarray.
///
/// Please see the [module-level documentation](index.html) for more details.
pub trait IntoNdArray {
    /// Consume the volume into an array of shape `[width, height, depth, nframes]`.
    /// The element type `T` must match the volume's data type.
    fn into_ndarray<T: DataElement>(self) -> Result<Array4<T>>;
}

impl IntoNdArray for InMemMghVolume {
    fn into_ndarray<T: DataElement>(self) -> Result<Array4<T>> {
        let [w, h, d] = *self.dim();
        let nframes = self.nframes() as usize;
        let data = self.into_typed_data::<T>()?;
        let len = data.len();
        let shape = (nframes, w as usize, h as usize, d as usize).f();
        let a = Array::from_shape_vec(shape, data).map_err(|_| {
            MghError::IncompatibleLength(
                len * T::DATA_TYPE.size_of(),
                nframes * w as usize * h as usize * d as usize * T::DATA_TYPE.size_of(),
            )
        })?;
        Ok(a.permuted_axes([1, 2, 3, 0]))
    }
}

impl<'a> IntoNdArray for &'a InMemMghVolume {
    fn into_ndarray<T: DataElement>(self) -> Result<Array4<T>> {
        self.clone().into_ndarray()
    }
}

/// Create a volume from a 3D array (one frame) or a 4D array indexed by
/// `[x, y, z, frame]`. The header's `dim` and `nframes` are replaced by the
/// array shape and its data type by `T`; the geometry is kept.
pub fn volume_from_ndarray<T, S, D>(
    header: &MghHeader,
    data: &ArrayBase<S, D>,
) -> Result<(MghHeader, InMemMghVolume)>
where
    T: DataElement,
    S: Data<Elem = T>,
    D: Dimension,
{
    let mut data = data.view().into_dyn();
    if data.ndim() == 3 {
        data.insert_axis_inplace(Axis(3));
    }
    let rank_shape = data.shape().to_vec();
    let data = data
        .into_dimensionality::<Ix4>()
        .map_err(|_| MghError::InvalidShape(rank_shape))?;
    let shape = data.shape();
    let header = MghHeader {
        dim: [shape[0] as u32, shape[1] as u32, shape[2] as u32],
        nframes: shape[3] as u32,
        datatype: T::DATA_TYPE,
        ..header.clone()
    };
    // logical order [z, y, x, frame] is the voxel-major memory order
    let values: Vec<T> = data.permuted_axes([2, 1, 0, 3]).iter().copied().collect();
    let volume = InMemMghVolume::from_typed_data(&header, &values)?;
    Ok((header, volume))
}
