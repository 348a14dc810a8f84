//! Rust implementation of the FreeSurfer MGH file format.
//!
//! An MGH file holds a 284-byte big-endian header describing the volume
//! geometry and voxel type, the voxel data in frame-major order, and up to
//! five optional scan parameters. Files ending with ".mgz" or ".mgh.gz" are
//! gzip-compressed.
//!
//! # Example
//!
//! ```no_run
//! use mgh::{InMemMghObject, MghVolume, ScanTag};
//! # use mgh::Result;
//!
//! # fn run() -> Result<()> {
//! let obj = InMemMghObject::from_file("brain.mgz")?;
//! let header = obj.header();
//! println!("{:?} voxels, orientation {}", header.dim, header.orientation());
//! if let Some(tr) = obj.scan_parameters().get(ScanTag::Tr) {
//!     println!("TR = {}", tr);
//! }
//! let value = obj.volume().get_f64([128, 128, 128], 0)?;
//! # Ok(())
//! # }
//! ```
//!
//! The in-memory representation keeps voxels in voxel-major order (the
//! frames of each voxel are contiguous) and the geometry in LPS space.
//! With the `ndarray_volumes` feature (enabled by default), volumes can be
//! converted to `ndarray` arrays indexed by `[x, y, z, frame]`.
#![deny(missing_debug_implementations)]
#![warn(missing_docs, unused_extern_crates, trivial_casts, unused_results)]

#[macro_use]
extern crate quick_error;
#[macro_use]
extern crate num_derive;

#[cfg(feature = "nalgebra_affine")]
pub mod affine;
pub mod error;
pub mod header;
pub mod object;
pub mod orientation;
pub mod stream;
pub mod tags;
pub mod typedef;
mod util;
pub mod volume;
pub mod writer;

pub use crate::error::{MghError, Result};
pub use crate::header::MghHeader;
pub use crate::object::{decode, InMemMghObject, ReaderOptions};
pub use crate::tags::{ScanParameters, ScanTag};
pub use crate::typedef::ComponentType;
pub use crate::util::is_compressed_filename;
#[cfg(feature = "ndarray_volumes")]
pub use crate::volume::ndarray::IntoNdArray;
pub use crate::volume::{DataElement, InMemMghVolume, MghVolume};
pub use crate::writer::{encode, WriterOptions};
