//! This module contains the types defined by the format.
//! Primitive type codes can be converted to these types and vice-versa.

use crate::error::{MghError, Result};
use num_traits::FromPrimitive;

/// Data type for representing an MGH voxel value type.
/// The discriminant of each variant is its on-disk type code.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, FromPrimitive)]
pub enum ComponentType {
    /// unsigned char.
    // MRI_UCHAR    0
    Uchar = 0,
    /// signed int, 32 bits.
    // MRI_INT      1
    Int = 1,
    /// 32 bit float.
    // MRI_FLOAT    3
    Float = 3,
    /// signed short.
    // MRI_SHORT    4
    Short = 4,
    /// 9-component 32 bit float tensor.
    /// This code can be read, but a decoded header always reports it as
    /// `Float` with 9 frames. It cannot be written back.
    // MRI_TENSOR   6
    Tensor = 6,
}

impl ComponentType {
    /// Obtain the data type for the given on-disk code.
    pub fn from_code(code: i32) -> Result<Self> {
        FromPrimitive::from_i32(code).ok_or(MghError::InvalidTypeCode(code))
    }

    /// Obtain the on-disk code for writing this data type.
    ///
    /// # Errors
    ///
    /// - `MghError::UnsupportedDataType` for `Tensor`, which has no encode path.
    pub fn to_code(self) -> Result<i32> {
        match self {
            ComponentType::Tensor => Err(MghError::UnsupportedDataType(self)),
            t => Ok(t as i32),
        }
    }

    /// Retrieve the size of an element of this data type, in bytes.
    pub fn size_of(self) -> usize {
        match self {
            ComponentType::Uchar => 1,
            ComponentType::Short => 2,
            ComponentType::Int | ComponentType::Float | ComponentType::Tensor => 4,
        }
    }
}

/// Number of frames implied by the tensor type code.
pub const TENSOR_FRAMES: u32 = 9;
