//! Utility functions to write MGH files.

use crate::error::Result;
use crate::header::MghHeader;
use crate::object::InMemMghObject;
use crate::stream::StreamWriter;
use crate::tags::ScanParameters;
use crate::util::is_compressed_filename;
use crate::volume::InMemMghVolume;
use flate2::Compression;
use log::debug;
use std::io::Write;
use std::path::{Path, PathBuf};

#[cfg(feature = "ndarray_volumes")]
use crate::volume::{ndarray::volume_from_ndarray, DataElement};
#[cfg(feature = "ndarray_volumes")]
use ndarray::{ArrayBase, Data, Dimension};

/// Options and flags which can be used to configure how an MGH file is written.
///
/// # Example
///
/// ```no_run
/// use mgh::{ScanParameters, ScanTag, WriterOptions};
/// # use mgh::Result;
///
/// # fn run() -> Result<()> {
/// let data = ndarray::Array3::<f32>::zeros((64, 64, 32));
/// let params: ScanParameters = vec![(ScanTag::Tr, 2300.), (ScanTag::FlipAngle, 0.157)]
///     .into_iter()
///     .collect();
/// WriterOptions::new("brain.mgz")
///     .scan_parameters(params)
///     .write_mgh(&data)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct WriterOptions {
    /// Where to write the file.
    path: PathBuf,
    /// Whether to gzip the file. When `None`, the file name suffix decides.
    compressed: Option<bool>,
    /// Compression level, if compressed.
    compression: Compression,
    /// Header used for the geometry of arrays written with `write_mgh`.
    reference: Option<MghHeader>,
    /// Trailing scan parameters.
    scan_parameters: ScanParameters,
}

impl WriterOptions {
    /// Create a new writer for the given path, with default options.
    pub fn new<P: AsRef<Path>>(path: P) -> WriterOptions {
        WriterOptions {
            path: path.as_ref().to_owned(),
            compressed: None,
            compression: Compression::default(),
            reference: None,
            scan_parameters: ScanParameters::default(),
        }
    }

    /// Override the transport selection by file name.
    pub fn compressed(mut self, compressed: Option<bool>) -> WriterOptions {
        self.compressed = compressed;
        self
    }

    /// Set the gzip compression level. Ignored for raw files.
    pub fn compression_level(mut self, compression: Compression) -> WriterOptions {
        self.compression = compression;
        self
    }

    /// Set the scan parameters written after the pixel data.
    /// These are ignored by `write_object`, which uses the object's own.
    pub fn scan_parameters(mut self, scan_parameters: ScanParameters) -> WriterOptions {
        self.scan_parameters = scan_parameters;
        self
    }

    /// Set a reference header for `write_mgh`. Its spacing, direction and
    /// origin are written, whereas `dim`, `nframes` and `datatype` depend
    /// only on the array.
    pub fn reference_header(mut self, reference: &MghHeader) -> WriterOptions {
        self.reference = Some(reference.clone());
        self
    }

    /// Write a full MGH object: header, volume and the object's scan parameters.
    pub fn write_object(&self, object: &InMemMghObject) -> Result<()> {
        self.write_parts(object.header(), object.volume(), object.scan_parameters())
    }

    /// Write a volume with the given header and this writer's scan parameters.
    ///
    /// # Errors
    ///
    /// Nothing is created if the header's data type cannot be written or the
    /// volume does not match the header.
    pub fn write_volume(&self, header: &MghHeader, volume: &InMemMghVolume) -> Result<()> {
        self.write_parts(header, volume, &self.scan_parameters)
    }

    /// Write an array of shape `[x, y, z]` or `[x, y, z, frame]`. The data
    /// type is defined by the array's element type.
    #[cfg(feature = "ndarray_volumes")]
    pub fn write_mgh<T, S, D>(&self, data: &ArrayBase<S, D>) -> Result<()>
    where
        T: DataElement,
        S: Data<Elem = T>,
        D: Dimension,
    {
        let reference = self.reference.clone().unwrap_or_default();
        let (header, volume) = volume_from_ndarray(&reference, data)?;
        self.write_volume(&header, &volume)
    }

    fn write_parts(
        &self,
        header: &MghHeader,
        volume: &InMemMghVolume,
        scan_parameters: &ScanParameters,
    ) -> Result<()> {
        validate(header, volume)?;
        let compressed = self
            .compressed
            .unwrap_or_else(|| is_compressed_filename(&self.path));
        let mut stream = StreamWriter::create(&self.path, compressed, self.compression)?;
        write_stream(&mut stream, header, volume, scan_parameters)?;
        stream.close()?;
        Ok(())
    }
}

/// Encode a complete MGH file into an uncompressed byte sink.
///
/// The data type and the volume size are validated before anything is
/// written, so a failed validation leaves the sink untouched.
///
/// # Errors
///
/// - `MghError::UnsupportedDataType` if the header's data type has no on-disk code.
/// - `MghError::IncompatibleDataType`, `MghError::GeometryMismatch` or
///   `MghError::IncompatibleLength` if the volume does not match the header.
/// - `MghError::Io` on write failure, including short writes.
pub fn encode<W: Write>(
    sink: W,
    header: &MghHeader,
    volume: &InMemMghVolume,
    scan_parameters: &ScanParameters,
) -> Result<()> {
    validate(header, volume)?;
    let mut stream = StreamWriter::new(sink);
    write_stream(&mut stream, header, volume, scan_parameters)?;
    stream.flush()?;
    Ok(())
}

fn validate(header: &MghHeader, volume: &InMemMghVolume) -> Result<()> {
    let _ = header.datatype.to_code()?;
    volume.check_header(header)
}

fn write_stream<W: Write>(
    stream: &mut StreamWriter<W>,
    header: &MghHeader,
    volume: &InMemMghVolume,
    scan_parameters: &ScanParameters,
) -> Result<()> {
    debug!(
        "Writing MGH volume {:?} x {} frames of {:?}",
        header.dim, header.nframes, header.datatype
    );
    header.write_to(stream)?;
    volume.write_to(stream)?;
    scan_parameters.write_to(stream)?;
    Ok(())
}
