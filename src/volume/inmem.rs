//! Module holding an in-memory implementation of an MGH volume.

use super::element::DataElement;
use super::layout::{disk_to_memory, memory_to_disk, swap_byte_order};
use super::MghVolume;
use crate::error::{MghError, Result};
use crate::header::MghHeader;
use crate::stream::{StreamReader, StreamWriter};
use crate::typedef::ComponentType;
use crate::util::{nb_bytes_for_dims, voxel_count};
use log::debug;
use std::io::{Read, Write};

/// A data type for an MGH volume contained in memory.
///
/// The raw data is voxel-major (the `nframes` values of each voxel are
/// contiguous, voxels in raster order of `dim`) and in native byte order.
#[derive(Debug, PartialEq, Clone)]
pub struct InMemMghVolume {
    dim: [u32; 3],
    nframes: u32,
    datatype: ComponentType,
    raw_data: Vec<u8>,
}

impl InMemMghVolume {
    /// Create a volume from native-endian, voxel-major raw data, with the
    /// geometry and data type described by the given header.
    ///
    /// # Errors
    ///
    /// - `MghError::IncompatibleLength` if the data size does not match the header.
    pub fn from_raw_data(header: &MghHeader, raw_data: Vec<u8>) -> Result<Self> {
        let expected = header.data_size();
        if raw_data.len() != expected {
            return Err(MghError::IncompatibleLength(raw_data.len(), expected));
        }
        Ok(InMemMghVolume {
            dim: header.dim,
            nframes: header.nframes,
            datatype: header.datatype,
            raw_data,
        })
    }

    /// Create a volume from voxel-major typed values. The data type is
    /// defined by `T`, ignoring the header's `datatype`.
    pub fn from_typed_data<T: DataElement>(header: &MghHeader, data: &[T]) -> Result<Self> {
        let expected = nb_bytes_for_dims(&header.dim, header.nframes, 1);
        if data.len() != expected {
            return Err(MghError::IncompatibleLength(
                data.len() * T::DATA_TYPE.size_of(),
                expected * T::DATA_TYPE.size_of(),
            ));
        }
        Ok(InMemMghVolume {
            dim: header.dim,
            nframes: header.nframes,
            datatype: T::DATA_TYPE,
            raw_data: T::to_raw_vec(data),
        })
    }

    /// Read the pixel data described by the header from a stream positioned
    /// at the start of the pixel data (offset 284).
    ///
    /// The whole pixel data is mandatory: a premature end of the stream
    /// is an I/O error.
    pub fn from_reader<R: Read>(stream: &mut StreamReader<R>, header: &MghHeader) -> Result<Self> {
        let nbytes = header.data_size();
        debug!("Reading {} bytes of pixel data", nbytes);
        let disk = stream.read_bytes(nbytes)?;
        let mut raw_data = disk_to_memory(
            &disk,
            header.voxel_count(),
            header.nframes as usize,
            header.component_size(),
        );
        swap_byte_order(&mut raw_data, header.datatype);
        Ok(InMemMghVolume {
            dim: header.dim,
            nframes: header.nframes,
            datatype: header.datatype,
            raw_data,
        })
    }

    /// Write the pixel data in file layout (frame-major, big-endian).
    pub fn write_to<W: Write>(&self, stream: &mut StreamWriter<W>) -> Result<()> {
        let mut disk = memory_to_disk(
            &self.raw_data,
            voxel_count(&self.dim),
            self.nframes as usize,
            self.datatype.size_of(),
        );
        swap_byte_order(&mut disk, self.datatype);
        stream.write_bytes(&disk)?;
        Ok(())
    }

    /// Check that this volume can be stored under the given header: same
    /// dimensions, frame count and data type.
    pub fn check_header(&self, header: &MghHeader) -> Result<()> {
        if self.datatype != header.datatype {
            return Err(MghError::IncompatibleDataType(self.datatype, header.datatype));
        }
        if self.dim != header.dim || self.nframes != header.nframes {
            return Err(MghError::GeometryMismatch(
                (self.dim, self.nframes),
                (header.dim, header.nframes),
            ));
        }
        let expected = header.data_size();
        if self.raw_data.len() != expected {
            return Err(MghError::IncompatibleLength(self.raw_data.len(), expected));
        }
        Ok(())
    }

    /// Retrieve the raw data, consuming the volume.
    pub fn into_raw_data(self) -> Vec<u8> {
        self.raw_data
    }

    /// Retrieve a reference to the raw data.
    pub fn raw_data(&self) -> &[u8] {
        &self.raw_data
    }

    /// Retrieve a mutable reference to the raw data.
    pub fn raw_data_mut(&mut self) -> &mut [u8] {
        &mut self.raw_data
    }

    /// Convert the raw data into typed values, consuming the volume.
    ///
    /// # Errors
    ///
    /// - `MghError::IncompatibleDataType` if `T` does not match the volume's data type.
    pub fn into_typed_data<T: DataElement>(self) -> Result<Vec<T>> {
        if T::DATA_TYPE != self.datatype {
            return Err(MghError::IncompatibleDataType(T::DATA_TYPE, self.datatype));
        }
        Ok(T::from_raw_vec(self.raw_data))
    }

    fn index_of(&self, coords: [u32; 3], frame: u32) -> Result<usize> {
        if coords.iter().zip(&self.dim).any(|(c, d)| c >= d) || frame >= self.nframes {
            let mut all = coords.to_vec();
            all.push(frame);
            return Err(MghError::OutOfBounds(all));
        }
        let [x, y, z] = coords;
        let voxel = (z as usize * self.dim[1] as usize + y as usize) * self.dim[0] as usize
            + x as usize;
        Ok(voxel * self.nframes as usize + frame as usize)
    }
}

impl MghVolume for InMemMghVolume {
    fn dim(&self) -> &[u32; 3] {
        &self.dim
    }

    fn nframes(&self) -> u32 {
        self.nframes
    }

    fn data_type(&self) -> ComponentType {
        self.datatype
    }

    fn get_f64(&self, coords: [u32; 3], frame: u32) -> Result<f64> {
        let index = self.index_of(coords, frame)?;
        let range = &self.raw_data[index * self.datatype.size_of()..];
        match self.datatype {
            ComponentType::Uchar => Ok(f64::from(u8::from_raw(range)?)),
            ComponentType::Short => Ok(f64::from(i16::from_raw(range)?)),
            ComponentType::Int => Ok(f64::from(i32::from_raw(range)?)),
            ComponentType::Float | ComponentType::Tensor => Ok(f64::from(f32::from_raw(range)?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(dim: [u32; 3], nframes: u32, datatype: ComponentType) -> MghHeader {
        MghHeader {
            dim,
            nframes,
            datatype,
            ..MghHeader::default()
        }
    }

    #[test]
    fn u8_volume_access() {
        let data: Vec<u8> = (0..64).map(|x| x * 2).collect();
        let vol = InMemMghVolume::from_raw_data(&header([4, 4, 4], 1, ComponentType::Uchar), data)
            .unwrap();
        assert_eq!(vol.get_f64([3, 1, 0], 0).unwrap(), 14.);
        assert_eq!(vol.get_f64([3, 3, 3], 0).unwrap(), 126.);
        assert_eq!(vol.get_f64([2, 1, 1], 0).unwrap(), 44.);
        assert!(vol.get_f64([4, 0, 0], 0).is_err());
        assert!(vol.get_f64([0, 0, 0], 1).is_err());
    }

    #[test]
    fn multi_frame_access() {
        let h = header([2, 1, 1], 3, ComponentType::Short);
        let vol = InMemMghVolume::from_typed_data(&h, &[1i16, 2, 3, -4, -5, -6]).unwrap();
        assert_eq!(vol.get_f64([0, 0, 0], 2).unwrap(), 3.);
        assert_eq!(vol.get_f64([1, 0, 0], 0).unwrap(), -4.);
        assert_eq!(vol.into_typed_data::<i16>().unwrap(), vec![1, 2, 3, -4, -5, -6]);
    }

    #[test]
    fn wrong_sizes_and_types() {
        let h = header([2, 2, 1], 1, ComponentType::Float);
        assert!(matches!(
            InMemMghVolume::from_raw_data(&h, vec![0; 15]),
            Err(MghError::IncompatibleLength(15, 16))
        ));
        let vol = InMemMghVolume::from_raw_data(&h, vec![0; 16]).unwrap();
        assert!(matches!(
            vol.into_typed_data::<i32>(),
            Err(MghError::IncompatibleDataType(ComponentType::Int, ComponentType::Float))
        ));
    }

    #[test]
    fn header_check() {
        let h = header([2, 2, 1], 1, ComponentType::Short);
        let vol = InMemMghVolume::from_typed_data(&h, &[1i16, 2, 3, 4]).unwrap();
        assert!(vol.check_header(&h).is_ok());
        assert!(matches!(
            vol.check_header(&header([4, 1, 1], 1, ComponentType::Short)),
            Err(MghError::GeometryMismatch(([2, 2, 1], 1), ([4, 1, 1], 1)))
        ));
        assert!(matches!(
            vol.check_header(&header([2, 2, 1], 1, ComponentType::Int)),
            Err(MghError::IncompatibleDataType(ComponentType::Short, ComponentType::Int))
        ));
    }

    #[test]
    fn disk_layout() {
        let h = header([2, 1, 1], 2, ComponentType::Short);
        let vol = InMemMghVolume::from_typed_data(&h, &[1i16, 2, 3, 4]).unwrap();
        let mut w = StreamWriter::new(Vec::new());
        vol.write_to(&mut w).unwrap();
        let bytes = w.into_inner();
        // frame 0: voxels 0 and 1, then frame 1
        assert_eq!(bytes, vec![0, 1, 0, 3, 0, 2, 0, 4]);

        let mut r = StreamReader::new(&bytes[..]);
        let back = InMemMghVolume::from_reader(&mut r, &h).unwrap();
        assert_eq!(back, vol);
    }
}
