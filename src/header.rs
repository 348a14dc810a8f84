//! This module defines the `MghHeader` struct, which is used
//! to provide important information about MGH volumes.
//!
//! An MGH header always occupies the first 284 bytes of the file: 28 bytes of
//! dimension fields, 62 bytes of RAS geometry and 194 bytes of zero padding.
//! Pixel data starts right after it.

use crate::error::{MghError, Result};
use crate::object::ReaderOptions;
use crate::orientation::{self, RasGeometry, IDENTITY};
use crate::stream::{StreamReader, StreamWriter};
use crate::typedef::{ComponentType, TENSOR_FRAMES};
use crate::util::{nb_bytes_for_dims, voxel_count};
use approx::AbsDiffEq;
use log::{debug, warn};
use std::io::{self, ErrorKind, Read, Write};
use std::path::Path;

/// Version code written to every MGH file.
pub const MGH_VERSION: i32 = 1;
/// Size of the dimension fields: version, 3 dimensions, frames, type and dof.
pub const DIMENSION_HEADER_SIZE: usize = 7 * 4;
/// Size of the RAS fields: the `ras_good` flag and 15 floats.
pub const RAS_HEADER_SIZE: usize = 2 + 15 * 4;
/// Size of the zero padding after the RAS fields.
pub const UNUSED_HEADER_SIZE: usize = 256 - RAS_HEADER_SIZE;
/// Full size of the header. Pixel data starts at this offset.
pub const HEADER_SIZE: usize = DIMENSION_HEADER_SIZE + RAS_HEADER_SIZE + UNUSED_HEADER_SIZE;

/// The MGH header data type.
///
/// The geometry is kept in the in-memory representation: `direction` and
/// `origin` are expressed in LPS space, whereas the file stores RAS direction
/// cosines and the RAS position of the volume's center. The conversion takes
/// place when reading and writing.
///
/// # Examples
///
/// ```no_run
/// use mgh::MghHeader;
/// # use mgh::Result;
///
/// # fn run() -> Result<()> {
/// let hdr1 = MghHeader::from_file("orig.mgz")?;
/// let hdr2 = MghHeader::from_file("001.mgh")?;
/// println!("{} {}", hdr1.orientation(), hdr2.orientation());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MghHeader {
    /// Volume dimensions (width, height, depth)
    pub dim: [u32; 3],
    /// Number of frames (values per voxel)
    pub nframes: u32,
    /// Voxel data type
    pub datatype: ComponentType,
    /// Degrees of freedom. Read but not interpreted; always written as 1.
    pub dof: i32,
    /// Voxel sizes
    pub spacing: [f32; 3],
    /// LPS unit vector of each array axis (`direction[i]` for axis `i`)
    pub direction: [[f64; 3]; 3],
    /// LPS position of the first voxel
    pub origin: [f64; 3],
}

impl Default for MghHeader {
    fn default() -> MghHeader {
        MghHeader {
            dim: [1, 1, 1],
            nframes: 1,
            datatype: ComponentType::Float,
            dof: 1,
            spacing: [1.; 3],
            direction: IDENTITY,
            origin: [0.; 3],
        }
    }
}

impl MghHeader {
    /// Retrieve an MGH header from a file in the file system.
    /// Files ending with ".mgz" or ".mgh.gz" are decoded as gzip streams.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<MghHeader> {
        ReaderOptions::new().read_header_file(path)
    }

    /// Read an MGH header from the given byte stream.
    /// It is assumed that the input is currently at the start of the
    /// MGH header. All 284 header bytes are consumed.
    pub fn from_reader<S: Read>(input: S) -> Result<MghHeader> {
        let mut stream = StreamReader::new(input);
        MghHeader::read_from(&mut stream, false)
    }

    /// Read the header from a stream positioned at the start of the file,
    /// leaving it at the start of the pixel data.
    ///
    /// When `fallback_to_float` is set, an unknown type code is read as
    /// `Float` instead of failing with `MghError::InvalidTypeCode`.
    pub(crate) fn read_from<R: Read>(
        stream: &mut StreamReader<R>,
        fallback_to_float: bool,
    ) -> Result<MghHeader> {
        let start = stream.position();
        let mut h = MghHeader::default();

        let _version = field(stream.read_i32(), "version")?;
        for (v, name) in h.dim.iter_mut().zip(["width", "height", "depth"].iter()) {
            *v = field(stream.read_i32(), *name)? as u32;
        }
        h.nframes = field(stream.read_i32(), "nframes")? as u32;
        let code = field(stream.read_i32(), "type")?;
        h.dof = field(stream.read_i32(), "dof")?;

        h.datatype = match ComponentType::from_code(code) {
            Ok(ComponentType::Tensor) => {
                debug!("Tensor volume, reading as {} float frames", TENSOR_FRAMES);
                h.nframes = TENSOR_FRAMES;
                ComponentType::Float
            }
            Ok(t) => t,
            Err(MghError::InvalidTypeCode(code)) if fallback_to_float => {
                warn!("Unknown MGH data type code {}, using float by default", code);
                ComponentType::Float
            }
            Err(e) => return Err(e),
        };

        let ras_good = field(stream.read_i16(), "ras_good")?;
        if ras_good != 0 {
            for v in &mut h.spacing {
                *v = field(stream.read_f32(), "spacing")?;
            }
            // one column of direction cosines per axis: x_r x_a x_s y_r ...
            let mut ras = RasGeometry::default();
            for i in 0..3 {
                for k in 0..3 {
                    ras.matrix[k][i] = f64::from(field(stream.read_f32(), "direction")?);
                }
            }
            for v in &mut ras.center {
                *v = f64::from(field(stream.read_f32(), "center")?);
            }
            debug!(
                "RAS geometry: orientation {}, center {:?}",
                orientation::orientation_label(&ras.matrix),
                ras.center
            );
            let (direction, origin) = orientation::to_memory_frame(&ras, &h.spacing, &h.dim);
            h.direction = direction;
            h.origin = origin;
        }

        field(
            stream.seek_absolute(start + HEADER_SIZE as u64),
            "padding",
        )?;
        debug!(
            "MGH header: {:?} x {} frames of {:?}",
            h.dim, h.nframes, h.datatype
        );
        Ok(h)
    }

    /// Write the full 284-byte header to the given stream.
    ///
    /// The data type is validated before anything is written.
    ///
    /// # Errors
    ///
    /// - `MghError::UnsupportedDataType` if the data type cannot be written.
    /// - `MghError::Io` on write failure.
    pub fn write_to<W: Write>(&self, stream: &mut StreamWriter<W>) -> Result<()> {
        let code = self.datatype.to_code()?;
        let start = stream.position();

        stream.write_i32(MGH_VERSION)?;
        for d in &self.dim {
            stream.write_i32(*d as i32)?;
        }
        stream.write_i32(self.nframes as i32)?;
        stream.write_i32(code)?;
        stream.write_i32(1)?;

        stream.write_i16(1)?;
        for s in &self.spacing {
            stream.write_f32(*s)?;
        }
        let ras = self.ras_geometry();
        for i in 0..3 {
            for k in 0..3 {
                stream.write_f32(ras.matrix[k][i] as f32)?;
            }
        }
        for c in &ras.center {
            stream.write_f32(*c as f32)?;
        }

        stream.seek_absolute(start + HEADER_SIZE as u64)?;
        Ok(())
    }

    /// Obtain the RAS geometry as stored in the file.
    pub fn ras_geometry(&self) -> RasGeometry {
        orientation::to_disk_frame(&self.direction, &self.origin, &self.spacing, &self.dim)
    }

    /// Obtain the orientation label of the volume, such as "LIA" for
    /// FreeSurfer's conformed space.
    pub fn orientation(&self) -> String {
        orientation::orientation_label(&self.ras_geometry().matrix)
    }

    /// Number of voxels in a single frame.
    pub fn voxel_count(&self) -> usize {
        voxel_count(&self.dim)
    }

    /// Size of a single voxel value, in bytes.
    pub fn component_size(&self) -> usize {
        self.datatype.size_of()
    }

    /// Size of the full pixel data, in bytes.
    pub fn data_size(&self) -> usize {
        nb_bytes_for_dims(&self.dim, self.nframes, self.component_size())
    }

    /// Absolute file offset of the trailing scan parameters.
    pub fn tag_offset(&self) -> u64 {
        (HEADER_SIZE as u64).saturating_add(self.data_size() as u64)
    }
}

/// Header comparison which tolerates the precision lost by storing the
/// geometry as 32-bit floats. Integer fields must be equal.
impl AbsDiffEq for MghHeader {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        1e-4
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        let close = |a: f64, b: f64| f64::abs_diff_eq(&a, &b, epsilon);
        self.dim == other.dim
            && self.nframes == other.nframes
            && self.datatype == other.datatype
            && self.dof == other.dof
            && self
                .spacing
                .iter()
                .zip(&other.spacing)
                .all(|(a, b)| close(f64::from(*a), f64::from(*b)))
            && self
                .direction
                .iter()
                .flatten()
                .zip(other.direction.iter().flatten())
                .all(|(a, b)| close(*a, *b))
            && self
                .origin
                .iter()
                .zip(&other.origin)
                .all(|(a, b)| close(*a, *b))
    }
}

/// Map a premature end of input within a mandatory header field
/// to a format error naming the field.
fn field<T>(result: io::Result<T>, name: &'static str) -> Result<T> {
    result.map_err(|e| {
        if e.kind() == ErrorKind::UnexpectedEof {
            MghError::TruncatedHeader(name)
        } else {
            MghError::Io(e)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_sizes() {
        assert_eq!(DIMENSION_HEADER_SIZE, 28);
        assert_eq!(RAS_HEADER_SIZE, 62);
        assert_eq!(UNUSED_HEADER_SIZE, 194);
        assert_eq!(HEADER_SIZE, 284);
    }

    #[test]
    fn default_geometry_is_lps_aligned() {
        let h = MghHeader::default();
        assert_eq!(h.orientation(), "LPS");
        assert_eq!(h.data_size(), 4);
        assert_eq!(h.tag_offset(), 288);
    }

    #[test]
    fn truncated_fields_are_named() {
        let mut w = StreamWriter::new(Vec::new());
        MghHeader::default().write_to(&mut w).unwrap();
        let bytes = w.into_inner();

        match MghHeader::from_reader(&bytes[..18]) {
            Err(MghError::TruncatedHeader(name)) => assert_eq!(name, "nframes"),
            other => panic!("unexpected result {:?}", other),
        }
        match MghHeader::from_reader(&bytes[..50]) {
            Err(MghError::TruncatedHeader(name)) => assert_eq!(name, "direction"),
            other => panic!("unexpected result {:?}", other),
        }
        match MghHeader::from_reader(&bytes[..200]) {
            Err(MghError::TruncatedHeader(name)) => assert_eq!(name, "padding"),
            other => panic!("unexpected result {:?}", other),
        }
        assert!(MghHeader::from_reader(&bytes[..]).is_ok());
    }

    #[test]
    fn tensor_cannot_be_written() {
        let h = MghHeader {
            datatype: ComponentType::Tensor,
            nframes: 9,
            ..MghHeader::default()
        };
        let mut w = StreamWriter::new(Vec::new());
        assert!(matches!(
            h.write_to(&mut w),
            Err(MghError::UnsupportedDataType(ComponentType::Tensor))
        ));
        assert_eq!(w.position(), 0);
        assert!(w.into_inner().is_empty());
    }
}
