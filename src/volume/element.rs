//! This module defines the data element API, which enables MGH volumes
//! to convert their raw voxel bytes into typed values and back.
use crate::error::Result;
use crate::typedef::ComponentType;
use byteordered::ByteOrdered;
use bytemuck::Pod;
use num_traits::AsPrimitive;
use std::io::Read;

/// Trait type for characterizing an MGH data element, implemented for the
/// primitive numeric types which represent voxel values.
///
/// Raw voxel data in memory is kept in native byte order, so conversions
/// are plain reinterpretations of the bytes.
pub trait DataElement: 'static + Sized + Copy + Pod + AsPrimitive<f64> {
    /// The data type mapped to the type T
    const DATA_TYPE: ComponentType;

    /// Read a single native-endian element from the given byte source.
    fn from_raw<R: Read>(src: R) -> Result<Self>;

    /// Transform the given native-endian data vector into a vector of data elements.
    fn from_raw_vec(vec: Vec<u8>) -> Vec<Self> {
        bytemuck::pod_collect_to_vec(&vec)
    }

    /// Transform a slice of data elements into native-endian bytes.
    fn to_raw_vec(data: &[Self]) -> Vec<u8> {
        bytemuck::cast_slice(data).to_vec()
    }
}

impl DataElement for u8 {
    const DATA_TYPE: ComponentType = ComponentType::Uchar;
    fn from_raw<R: Read>(src: R) -> Result<Self> {
        ByteOrdered::native(src).read_u8().map_err(From::from)
    }
    fn from_raw_vec(vec: Vec<u8>) -> Vec<Self> {
        vec
    }
}

impl DataElement for i16 {
    const DATA_TYPE: ComponentType = ComponentType::Short;
    fn from_raw<R: Read>(src: R) -> Result<Self> {
        ByteOrdered::native(src).read_i16().map_err(From::from)
    }
}

impl DataElement for i32 {
    const DATA_TYPE: ComponentType = ComponentType::Int;
    fn from_raw<R: Read>(src: R) -> Result<Self> {
        ByteOrdered::native(src).read_i32().map_err(From::from)
    }
}

impl DataElement for f32 {
    const DATA_TYPE: ComponentType = ComponentType::Float;
    fn from_raw<R: Read>(src: R) -> Result<Self> {
        ByteOrdered::native(src).read_f32().map_err(From::from)
    }
}

#[cfg(test)]
mod tests {
    use super::DataElement;

    #[test]
    fn raw_conversions() {
        let values = [1.5f32, -2., 1e10];
        let raw = f32::to_raw_vec(&values);
        assert_eq!(raw.len(), 12);
        assert_eq!(f32::from_raw_vec(raw.clone()), values.to_vec());
        assert_eq!(f32::from_raw(&raw[4..]).unwrap(), -2.);

        let raw = i16::to_raw_vec(&[-3, 300]);
        assert_eq!(i16::from_raw_vec(raw), vec![-3, 300]);
        assert_eq!(u8::from_raw_vec(vec![7, 8]), vec![7, 8]);
    }
}
