//! This module defines the voxel volume API, as well as data
//! types for reading volumes from files.
//! An integration with `ndarray` allows for more elegant and
//! efficient approaches, and should be preferred when possible.
//! In order to do so, you must add the `ndarray_volumes` feature
//! to this crate.

pub mod element;
pub mod inmem;
pub mod layout;
#[cfg(feature = "ndarray_volumes")]
pub mod ndarray;

pub use self::element::DataElement;
pub use self::inmem::InMemMghVolume;
use crate::error::Result;
use crate::typedef::ComponentType;

/// Public API for MGH volume data, exposed as a 3D voxel grid with
/// `nframes` values per voxel.
pub trait MghVolume {
    /// Get the dimensions of the volume (width, height, depth).
    fn dim(&self) -> &[u32; 3];

    /// Get the number of frames (values per voxel).
    fn nframes(&self) -> u32;

    /// Get this volume's data type.
    fn data_type(&self) -> ComponentType;

    /// Fetch a single voxel value at the given voxel coordinates and frame
    /// as a double precision floating point value.
    /// Note that using this function continuously to traverse the volume is
    /// inefficient. Prefer typed data or the `ndarray` API for volume traversal.
    ///
    /// # Errors
    ///
    /// - `MghError::OutOfBounds` if the given coordinates or frame surpass this
    /// volume's boundaries.
    fn get_f64(&self, coords: [u32; 3], frame: u32) -> Result<f64>;

    /// Fetch a single voxel value as a single precision floating point value.
    /// See [`get_f64`](#tymethod.get_f64).
    fn get_f32(&self, coords: [u32; 3], frame: u32) -> Result<f32> {
        let v = self.get_f64(coords, frame)?;
        Ok(v as f32)
    }
}
