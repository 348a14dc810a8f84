//! Types for error handling go here.

use crate::typedef::ComponentType;
use std::io::Error as IOError;

quick_error! {
    /// Error type for all error variants originated by this crate.
    #[derive(Debug)]
    pub enum MghError {
        /// The header holds a data type code which is not defined by the format.
        InvalidTypeCode(code: i32) {
            display("Invalid MGH data type code {}", code)
        }
        /// The byte source ended before the named header field was complete.
        TruncatedHeader(field: &'static str) {
            display("Truncated MGH header: missing field `{}`", field)
        }
        /// The data type cannot be written to an MGH file.
        UnsupportedDataType(t: ComponentType) {
            display("Unsupported data type for writing: {:?}", t)
        }
        /// The pixel buffer does not have the size implied by the header.
        IncompatibleLength(got: usize, expected: usize) {
            display("Pixel buffer has {} bytes, but the header expects {}", got, expected)
        }
        /// The volume's geometry differs from the header's.
        GeometryMismatch(volume: ([u32; 3], u32), header: ([u32; 3], u32)) {
            display("Volume of {:?} x {} frames does not match header of {:?} x {} frames",
                volume.0, volume.1, header.0, header.1)
        }
        /// Typed voxel access was requested with an element type
        /// other than the volume's data type.
        IncompatibleDataType(requested: ComponentType, actual: ComponentType) {
            display("Requested {:?} voxels from a volume of {:?}", requested, actual)
        }
        /// The array does not describe a 3D or 4D volume.
        InvalidShape(shape: Vec<usize>) {
            display("Array of shape {:?} is not a 3D or 4D volume", &shape[..])
        }
        /// Attempted to read a voxel outside the volume's boundaries.
        OutOfBounds(coords: Vec<u32>) {
            display("Out of bounds access to volume: {:?}", &coords[..])
        }
        /// I/O Error
        Io(err: IOError) {
            from()
            source(err)
            display("I/O error: {}", err)
        }
    }
}

/// Alias type for results originated from this crate.
pub type Result<T> = ::std::result::Result<T, MghError>;
