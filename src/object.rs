//! Module for handling and retrieving complete MGH objects.
//!
//! An object holds the header, the voxel data and the trailing scan
//! parameters of an MGH file. Files are read with [`ReaderOptions`], or
//! through the [`InMemMghObject::from_file`] shortcut.
//!
//! [`ReaderOptions`]: ./struct.ReaderOptions.html
//! [`InMemMghObject::from_file`]: ./struct.InMemMghObject.html#method.from_file

use crate::error::Result;
use crate::header::MghHeader;
use crate::stream::{FileSource, StreamReader};
use crate::tags::ScanParameters;
use crate::util::is_compressed_filename;
use crate::volume::InMemMghVolume;
use log::debug;
use std::io::Read;
use std::path::Path;

/// Options and flags which can be used to configure how an MGH file is read.
///
/// # Example
///
/// ```no_run
/// use mgh::ReaderOptions;
/// # use mgh::Result;
///
/// # fn run() -> Result<()> {
/// let obj = ReaderOptions::new()
///     .compressed(Some(true))
///     .fallback_to_float(true)
///     .read_file("brain.gz")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ReaderOptions {
    /// Whether the file is gzip-compressed. When `None`, the file name suffix decides.
    compressed: Option<bool>,
    /// Read unknown type codes as float instead of failing.
    fallback_to_float: bool,
}

impl ReaderOptions {
    /// Create a new set of options, all at their default values.
    pub fn new() -> ReaderOptions {
        ReaderOptions::default()
    }

    /// Override the transport selection by file name.
    /// `Some(true)` reads the file as a gzip stream, `Some(false)` as raw bytes.
    pub fn compressed(&mut self, compressed: Option<bool>) -> &mut Self {
        self.compressed = compressed;
        self
    }

    /// When set, a header with an unknown type code is read as `Float`
    /// (with a logged warning) instead of failing with `MghError::InvalidTypeCode`.
    pub fn fallback_to_float(&mut self, fallback: bool) -> &mut Self {
        self.fallback_to_float = fallback;
        self
    }

    /// Retrieve the full contents of an MGH file.
    pub fn read_file<P: AsRef<Path>>(&self, path: P) -> Result<InMemMghObject> {
        let mut stream = self.open(path.as_ref())?;
        let object = self.read_stream(&mut stream)?;
        stream.close();
        Ok(object)
    }

    /// Retrieve only the header of an MGH file.
    pub fn read_header_file<P: AsRef<Path>>(&self, path: P) -> Result<MghHeader> {
        let mut stream = self.open(path.as_ref())?;
        let header = MghHeader::read_from(&mut stream, self.fallback_to_float)?;
        stream.close();
        Ok(header)
    }

    /// Retrieve an MGH object from an uncompressed byte source positioned
    /// at the start of the file.
    pub fn read_reader<R: Read>(&self, source: R) -> Result<InMemMghObject> {
        self.read_stream(&mut StreamReader::new(source))
    }

    fn open(&self, path: &Path) -> Result<StreamReader<FileSource>> {
        let compressed = self
            .compressed
            .unwrap_or_else(|| is_compressed_filename(path));
        Ok(StreamReader::open(path, compressed)?)
    }

    fn read_stream<R: Read>(&self, stream: &mut StreamReader<R>) -> Result<InMemMghObject> {
        let header = MghHeader::read_from(stream, self.fallback_to_float)?;
        let volume = InMemMghVolume::from_reader(stream, &header)?;
        debug_assert_eq!(stream.position(), header.tag_offset());
        let scan_parameters = ScanParameters::from_reader_optional(stream);
        debug!("Read {} scan parameters", scan_parameters.len());
        Ok(InMemMghObject {
            header,
            volume,
            scan_parameters,
        })
    }
}

/// Decode a complete MGH file from an uncompressed byte source.
///
/// The header and pixel data are mandatory. Scan parameters are read on a
/// best effort basis: the returned set holds the tags available before the
/// end of the source.
///
/// # Errors
///
/// - `MghError::TruncatedHeader` if the source ends within the header.
/// - `MghError::InvalidTypeCode` if the header holds an unknown data type.
/// - `MghError::Io` if the pixel data is incomplete or on read failure.
pub fn decode<R: Read>(source: R) -> Result<(MghHeader, InMemMghVolume, ScanParameters)> {
    ReaderOptions::new()
        .read_reader(source)
        .map(InMemMghObject::into_parts)
}

/// Data type for an MGH object that is fully contained in memory.
#[derive(Debug, PartialEq, Clone)]
pub struct InMemMghObject {
    header: MghHeader,
    volume: InMemMghVolume,
    scan_parameters: ScanParameters,
}

impl InMemMghObject {
    /// Assemble an object from its parts. The volume must match the header's
    /// geometry and data type.
    pub fn new(
        header: MghHeader,
        volume: InMemMghVolume,
        scan_parameters: ScanParameters,
    ) -> Result<InMemMghObject> {
        volume.check_header(&header)?;
        Ok(InMemMghObject {
            header,
            volume,
            scan_parameters,
        })
    }

    /// Retrieve the full contents of an MGH file.
    /// Files ending with ".mgz" or ".mgh.gz" are decoded as gzip streams.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use mgh::InMemMghObject;
    /// # use mgh::Result;
    ///
    /// # fn run() -> Result<()> {
    /// let obj = InMemMghObject::from_file("brain.mgz")?;
    /// println!("{:?}", obj.header().dim);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<InMemMghObject> {
        ReaderOptions::new().read_file(path)
    }

    /// Retrieve an MGH object from an uncompressed stream of data.
    pub fn from_reader<R: Read>(source: R) -> Result<InMemMghObject> {
        ReaderOptions::new().read_reader(source)
    }

    /// Obtain a reference to the MGH header.
    pub fn header(&self) -> &MghHeader {
        &self.header
    }

    /// Obtain a mutable reference to the MGH header.
    ///
    /// Only the geometry should be changed this way: the volume is not
    /// updated along with `dim`, `nframes` or `datatype`.
    pub fn header_mut(&mut self) -> &mut MghHeader {
        &mut self.header
    }

    /// Obtain a reference to the object's volume.
    pub fn volume(&self) -> &InMemMghVolume {
        &self.volume
    }

    /// Obtain a reference to the object's scan parameters.
    pub fn scan_parameters(&self) -> &ScanParameters {
        &self.scan_parameters
    }

    /// Obtain a mutable reference to the object's scan parameters.
    pub fn scan_parameters_mut(&mut self) -> &mut ScanParameters {
        &mut self.scan_parameters
    }

    /// Move the volume out of the object, discarding the
    /// header and scan parameters.
    pub fn into_volume(self) -> InMemMghVolume {
        self.volume
    }

    /// Split the object into its header, volume and scan parameters.
    pub fn into_parts(self) -> (MghHeader, InMemMghVolume, ScanParameters) {
        (self.header, self.volume, self.scan_parameters)
    }
}
