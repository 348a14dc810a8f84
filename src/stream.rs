//! Big-endian primitive I/O over raw or gzip-compressed byte streams.
//!
//! Every multi-byte scalar in an MGH file is stored in big-endian byte order,
//! independently of the machine that wrote it. [`StreamReader`] and
//! [`StreamWriter`] wrap an arbitrary byte source or sink, keep track of the
//! absolute position in the (uncompressed) stream, and convert primitives
//! from and to the host representation.
//!
//! [`StreamReader`]: ./struct.StreamReader.html
//! [`StreamWriter`]: ./struct.StreamWriter.html

use byteordered::ByteOrdered;
use either::Either;
use flate2::bufread::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use log::debug;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Error as IoError, ErrorKind, Read, Write};
use std::path::Path;

/// The byte source of a file opened for reading, with or without gzip decoding.
pub type FileSource = Either<BufReader<File>, GzDecoder<BufReader<File>>>;

/// The byte sink of a file opened for writing, with or without gzip encoding.
pub type FileSink = Either<BufWriter<File>, GzEncoder<BufWriter<File>>>;

/// A reader of big-endian primitives which tracks its absolute position.
#[derive(Debug)]
pub struct StreamReader<R> {
    inner: R,
    position: u64,
}

impl StreamReader<FileSource> {
    /// Open a file for reading. If `compressed` is true, the file contents
    /// are decoded as a gzip stream.
    pub fn open<P: AsRef<Path>>(path: P, compressed: bool) -> io::Result<Self> {
        debug!(
            "Opening {} for reading ({})",
            path.as_ref().display(),
            if compressed { "gzip" } else { "raw" }
        );
        let file = BufReader::new(File::open(path)?);
        let source = if compressed {
            Either::Right(GzDecoder::new(file))
        } else {
            Either::Left(file)
        };
        Ok(StreamReader::new(source))
    }
}

impl<R> StreamReader<R>
where
    R: Read,
{
    /// Wrap a byte source, assumed to be positioned at the start of the file.
    pub fn new(inner: R) -> Self {
        StreamReader { inner, position: 0 }
    }

    /// The number of bytes consumed so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Read a big-endian 16-bit signed integer.
    pub fn read_i16(&mut self) -> io::Result<i16> {
        let v = ByteOrdered::be(&mut self.inner).read_i16()?;
        self.position += 2;
        Ok(v)
    }

    /// Read a big-endian 32-bit signed integer.
    pub fn read_i32(&mut self) -> io::Result<i32> {
        let v = ByteOrdered::be(&mut self.inner).read_i32()?;
        self.position += 4;
        Ok(v)
    }

    /// Read a big-endian 32-bit float.
    pub fn read_f32(&mut self) -> io::Result<f32> {
        let v = ByteOrdered::be(&mut self.inner).read_f32()?;
        self.position += 4;
        Ok(v)
    }

    /// Read exactly `n` bytes.
    ///
    /// The buffer grows with the data actually available, so a bogus length
    /// on a short source fails with `UnexpectedEof` instead of allocating
    /// the full amount up front.
    pub fn read_bytes(&mut self, n: usize) -> io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        let got = (&mut self.inner).take(n as u64).read_to_end(&mut buf)?;
        self.position += got as u64;
        if got != n {
            return Err(IoError::new(
                ErrorKind::UnexpectedEof,
                format!("expected {} bytes, only {} available", n, got),
            ));
        }
        Ok(buf)
    }

    /// Move to the given absolute offset.
    ///
    /// Compressed streams cannot be rewound, so only forward movement is
    /// supported: the bytes in between are skipped.
    pub fn seek_absolute(&mut self, offset: u64) -> io::Result<()> {
        if offset < self.position {
            return Err(IoError::new(
                ErrorKind::InvalidInput,
                format!(
                    "cannot seek back to offset {} from {}",
                    offset, self.position
                ),
            ));
        }
        let len = offset - self.position;
        let skipped = io::copy(&mut (&mut self.inner).take(len), &mut io::sink())?;
        self.position += skipped;
        if skipped != len {
            return Err(IoError::new(
                ErrorKind::UnexpectedEof,
                format!("stream ended at offset {} before {}", self.position, offset),
            ));
        }
        Ok(())
    }

    /// Discard the reader, retrieving the inner byte source.
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Close the stream.
    pub fn close(self) {}
}

/// A writer of big-endian primitives which tracks its absolute position.
#[derive(Debug)]
pub struct StreamWriter<W> {
    inner: W,
    position: u64,
}

impl StreamWriter<FileSink> {
    /// Create a file for writing, truncating it if it already exists.
    /// If `compressed` is true, the contents are encoded as a gzip stream
    /// with the given compression level.
    pub fn create<P: AsRef<Path>>(path: P, compressed: bool, level: Compression) -> io::Result<Self> {
        debug!(
            "Creating {} for writing ({})",
            path.as_ref().display(),
            if compressed { "gzip" } else { "raw" }
        );
        let file = BufWriter::new(File::create(path)?);
        let sink = if compressed {
            Either::Right(GzEncoder::new(file, level))
        } else {
            Either::Left(file)
        };
        Ok(StreamWriter::new(sink))
    }

    /// Finish writing: the gzip trailer is written if applicable, and all
    /// buffered bytes are flushed to the file.
    pub fn close(self) -> io::Result<()> {
        match self.inner {
            Either::Left(mut w) => w.flush(),
            Either::Right(e) => e.finish()?.flush(),
        }
    }
}

impl<W> StreamWriter<W>
where
    W: Write,
{
    /// Wrap a byte sink. Positions are counted from this point.
    pub fn new(inner: W) -> Self {
        StreamWriter { inner, position: 0 }
    }

    /// The number of bytes written so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Write a big-endian 16-bit signed integer.
    pub fn write_i16(&mut self, v: i16) -> io::Result<()> {
        ByteOrdered::be(&mut self.inner).write_i16(v)?;
        self.position += 2;
        Ok(())
    }

    /// Write a big-endian 32-bit signed integer.
    pub fn write_i32(&mut self, v: i32) -> io::Result<()> {
        ByteOrdered::be(&mut self.inner).write_i32(v)?;
        self.position += 4;
        Ok(())
    }

    /// Write a big-endian 32-bit float.
    pub fn write_f32(&mut self, v: f32) -> io::Result<()> {
        ByteOrdered::be(&mut self.inner).write_f32(v)?;
        self.position += 4;
        Ok(())
    }

    /// Write all bytes in the buffer. A sink accepting fewer bytes than
    /// requested results in an error of kind `WriteZero`.
    pub fn write_bytes(&mut self, buf: &[u8]) -> io::Result<()> {
        self.inner.write_all(buf)?;
        self.position += buf.len() as u64;
        Ok(())
    }

    /// Move to the given absolute offset by writing zero bytes.
    pub fn seek_absolute(&mut self, offset: u64) -> io::Result<()> {
        if offset < self.position {
            return Err(IoError::new(
                ErrorKind::InvalidInput,
                format!(
                    "cannot seek back to offset {} from {}",
                    offset, self.position
                ),
            ));
        }
        let len = offset - self.position;
        let copied = io::copy(&mut io::repeat(0).take(len), &mut self.inner)?;
        self.position += copied;
        Ok(())
    }

    /// Flush the inner sink.
    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }

    /// Discard the writer, retrieving the inner byte sink.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::{StreamReader, StreamWriter};
    use std::io::ErrorKind;

    #[test]
    fn primitives_are_big_endian() {
        let mut w = StreamWriter::new(Vec::new());
        w.write_i32(1).unwrap();
        w.write_i16(-2).unwrap();
        w.write_f32(1.5).unwrap();
        assert_eq!(w.position(), 10);
        let bytes = w.into_inner();
        assert_eq!(
            bytes,
            vec![0, 0, 0, 1, 0xFF, 0xFE, 0x3F, 0xC0, 0x00, 0x00]
        );

        let mut r = StreamReader::new(&bytes[..]);
        assert_eq!(r.read_i32().unwrap(), 1);
        assert_eq!(r.read_i16().unwrap(), -2);
        assert_eq!(r.read_f32().unwrap(), 1.5);
        assert_eq!(r.position(), 10);
        let err = r.read_i16().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedEof);
    }

    #[test]
    fn seek_forward_only() {
        let data = [1u8, 2, 3, 4, 5, 6];
        let mut r = StreamReader::new(&data[..]);
        r.seek_absolute(4).unwrap();
        assert_eq!(r.read_bytes(2).unwrap(), vec![5, 6]);
        assert_eq!(
            r.seek_absolute(1).unwrap_err().kind(),
            ErrorKind::InvalidInput
        );

        let mut r = StreamReader::new(&data[..]);
        assert_eq!(
            r.seek_absolute(10).unwrap_err().kind(),
            ErrorKind::UnexpectedEof
        );
    }

    #[test]
    fn short_read_bytes() {
        let data = [1u8, 2, 3];
        let mut r = StreamReader::new(&data[..]);
        let err = r.read_bytes(1 << 40).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedEof);
    }

    #[test]
    fn writer_pads_with_zeros() {
        let mut w = StreamWriter::new(Vec::new());
        w.write_bytes(&[9, 9]).unwrap();
        w.seek_absolute(5).unwrap();
        assert_eq!(w.position(), 5);
        assert_eq!(w.into_inner(), vec![9, 9, 0, 0, 0]);
    }

    #[test]
    fn short_write_is_an_error() {
        let mut buf = [0u8; 3];
        let mut w = StreamWriter::new(&mut buf[..]);
        let err = w.write_i32(7).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::WriteZero);
    }
}
