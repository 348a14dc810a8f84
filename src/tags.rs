//! This module contains definitions for the trailing scan parameters.
//!
//! Scan parameters are optional 32-bit floats sitting right after the pixel
//! data, in the fixed order TR, FlipAngle, TE, TI, FoV. Readers stop at the
//! first value which cannot be read, so a parameter is only recoverable if
//! all parameters before it were written as well.

use crate::error::Result;
use crate::stream::{StreamReader, StreamWriter};
use log::{debug, trace};
use std::fmt;
use std::io::{Read, Write};

/// A scan parameter tag.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord)]
pub enum ScanTag {
    /// Repetition time
    Tr = 0,
    /// Flip angle
    FlipAngle = 1,
    /// Echo time
    Te = 2,
    /// Inversion time
    Ti = 3,
    /// Field of view
    FoV = 4,
}

impl ScanTag {
    /// All tags, in file order.
    pub const ALL: [ScanTag; 5] = [
        ScanTag::Tr,
        ScanTag::FlipAngle,
        ScanTag::Te,
        ScanTag::Ti,
        ScanTag::FoV,
    ];

    /// The tag's conventional name.
    pub fn name(self) -> &'static str {
        match self {
            ScanTag::Tr => "TR",
            ScanTag::FlipAngle => "FlipAngle",
            ScanTag::Te => "TE",
            ScanTag::Ti => "TI",
            ScanTag::FoV => "FoV",
        }
    }

    /// Look up a tag by its conventional name.
    pub fn from_name(name: &str) -> Option<ScanTag> {
        ScanTag::ALL.iter().copied().find(|t| t.name() == name)
    }
}

impl fmt::Display for ScanTag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The set of scan parameters of a volume. Each tag is either present with a
/// value or absent.
#[derive(Debug, Default, PartialEq, Clone, Copy)]
pub struct ScanParameters {
    values: [Option<f32>; 5],
}

impl ScanParameters {
    /// Create an empty set of scan parameters.
    pub fn new() -> Self {
        ScanParameters::default()
    }

    /// Read scan parameters from a stream positioned right after the pixel data.
    ///
    /// Reading stops at the first value which cannot be read, without
    /// failing: the tags read so far are present and the remaining ones
    /// are absent.
    pub fn from_reader_optional<R: Read>(stream: &mut StreamReader<R>) -> Self {
        let mut params = ScanParameters::new();
        for tag in &ScanTag::ALL {
            match stream.read_f32() {
                Ok(value) => {
                    trace!("Scan parameter {} = {}", tag, value);
                    let _ = params.insert(*tag, value);
                }
                Err(e) => {
                    debug!("Scan parameters end before {}: {}", tag, e);
                    break;
                }
            }
        }
        params
    }

    /// Write the present scan parameters, in file order. Absent tags are
    /// skipped, so a sparse set is not read back under the same tags.
    pub fn write_to<W: Write>(&self, stream: &mut StreamWriter<W>) -> Result<()> {
        for (tag, value) in self.iter() {
            trace!("Writing scan parameter {} = {}", tag, value);
            stream.write_f32(value)?;
        }
        Ok(())
    }

    /// Get the value of a tag, if present.
    pub fn get(&self, tag: ScanTag) -> Option<f32> {
        self.values[tag as usize]
    }

    /// Set the value of a tag, returning the previous value.
    pub fn insert(&mut self, tag: ScanTag, value: f32) -> Option<f32> {
        self.values[tag as usize].replace(value)
    }

    /// Remove a tag, returning its value.
    pub fn remove(&mut self, tag: ScanTag) -> Option<f32> {
        self.values[tag as usize].take()
    }

    /// Whether the given tag is present.
    pub fn contains(&self, tag: ScanTag) -> bool {
        self.get(tag).is_some()
    }

    /// Iterate over the present tags and their values, in file order.
    pub fn iter(&self) -> impl Iterator<Item = (ScanTag, f32)> + '_ {
        ScanTag::ALL
            .iter()
            .filter_map(move |t| self.get(*t).map(|v| (*t, v)))
    }

    /// The number of tags present.
    pub fn len(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    /// Whether no tag is present.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::iter::FromIterator<(ScanTag, f32)> for ScanParameters {
    fn from_iter<I: IntoIterator<Item = (ScanTag, f32)>>(iter: I) -> Self {
        let mut params = ScanParameters::new();
        for (tag, value) in iter {
            let _ = params.insert(tag, value);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names() {
        for tag in &ScanTag::ALL {
            assert_eq!(ScanTag::from_name(tag.name()), Some(*tag));
        }
        assert_eq!(ScanTag::from_name("tr"), None);
        assert_eq!(ScanTag::FlipAngle.to_string(), "FlipAngle");
    }

    #[test]
    fn stops_at_first_short_read() {
        let mut data = Vec::new();
        data.extend_from_slice(&2300f32.to_be_bytes());
        data.extend_from_slice(&0.157f32.to_be_bytes());
        data.extend_from_slice(&[0xDE, 0xAD, 0xBE]);
        let mut stream = StreamReader::new(&data[..]);
        let params = ScanParameters::from_reader_optional(&mut stream);
        assert_eq!(params.len(), 2);
        assert_eq!(params.get(ScanTag::Tr), Some(2300.));
        assert_eq!(params.get(ScanTag::FlipAngle), Some(0.157));
        assert!(!params.contains(ScanTag::Te));
        assert!(!params.contains(ScanTag::Ti));
        assert!(!params.contains(ScanTag::FoV));
    }

    #[test]
    fn empty_trailer() {
        let mut stream = StreamReader::new(&[0u8; 0][..]);
        assert!(ScanParameters::from_reader_optional(&mut stream).is_empty());
    }

    #[test]
    fn sparse_set_shifts_on_read() {
        let params: ScanParameters = vec![(ScanTag::FoV, 256.)].into_iter().collect();
        let mut w = StreamWriter::new(Vec::new());
        params.write_to(&mut w).unwrap();
        let bytes = w.into_inner();
        assert_eq!(bytes, 256f32.to_be_bytes().to_vec());

        let mut stream = StreamReader::new(&bytes[..]);
        let read = ScanParameters::from_reader_optional(&mut stream);
        assert_eq!(read.get(ScanTag::Tr), Some(256.));
        assert!(!read.contains(ScanTag::FoV));
    }

    #[test]
    fn insert_and_remove() {
        let mut params = ScanParameters::new();
        assert_eq!(params.insert(ScanTag::Te, 2.5), None);
        assert_eq!(params.insert(ScanTag::Te, 3.), Some(2.5));
        assert_eq!(params.iter().collect::<Vec<_>>(), vec![(ScanTag::Te, 3.)]);
        assert_eq!(params.remove(ScanTag::Te), Some(3.));
        assert!(params.is_empty());
    }
}
