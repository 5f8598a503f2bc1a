//! # Module for File IO
//!
//! Writing weighted CNF instances. It is recommended to write through
//! [`crate::instances::WeightedCnf`] rather than using these functions
//! directly.

use std::{fs::File, io, path::Path};

pub mod dimacs;

/// A file writer that is either plain or compressed. Compressed streams
/// need [`FileWriter::finish`] to write their trailer.
pub(crate) enum FileWriter {
    Plain(io::BufWriter<File>),
    #[cfg(feature = "compression")]
    Bzip2(bzip2::write::BzEncoder<File>),
    #[cfg(feature = "compression")]
    Gzip(flate2::write::GzEncoder<File>),
    #[cfg(feature = "compression")]
    Xz(xz2::write::XzEncoder<File>),
}

impl FileWriter {
    /// Flushes the writer and finishes the compressed stream, if any
    pub(crate) fn finish(self) -> Result<(), io::Error> {
        match self {
            FileWriter::Plain(mut writer) => io::Write::flush(&mut writer),
            #[cfg(feature = "compression")]
            FileWriter::Bzip2(writer) => writer.finish().map(drop),
            #[cfg(feature = "compression")]
            FileWriter::Gzip(writer) => writer.finish().map(drop),
            #[cfg(feature = "compression")]
            FileWriter::Xz(writer) => writer.finish().map(drop),
        }
    }
}

impl io::Write for FileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            FileWriter::Plain(writer) => writer.write(buf),
            #[cfg(feature = "compression")]
            FileWriter::Bzip2(writer) => writer.write(buf),
            #[cfg(feature = "compression")]
            FileWriter::Gzip(writer) => writer.write(buf),
            #[cfg(feature = "compression")]
            FileWriter::Xz(writer) => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            FileWriter::Plain(writer) => writer.flush(),
            #[cfg(feature = "compression")]
            FileWriter::Bzip2(writer) => writer.flush(),
            #[cfg(feature = "compression")]
            FileWriter::Gzip(writer) => writer.flush(),
            #[cfg(feature = "compression")]
            FileWriter::Xz(writer) => writer.flush(),
        }
    }
}

/// Opens a writer for the file at Path.
/// With feature `compression` supports bzip2, gzip and xz compression.
pub(crate) fn open_compressed_uncompressed_write<P: AsRef<Path>>(
    path: P,
) -> Result<FileWriter, io::Error> {
    let path = path.as_ref();
    let raw_writer = File::create(path)?;
    #[cfg(feature = "compression")]
    if let Some(ext) = path.extension() {
        if ext.eq_ignore_ascii_case(std::ffi::OsStr::new("bz2")) {
            return Ok(FileWriter::Bzip2(bzip2::write::BzEncoder::new(
                raw_writer,
                bzip2::Compression::fast(),
            )));
        }
        if ext.eq_ignore_ascii_case(std::ffi::OsStr::new("gz")) {
            return Ok(FileWriter::Gzip(flate2::write::GzEncoder::new(
                raw_writer,
                flate2::Compression::fast(),
            )));
        }
        if ext.eq_ignore_ascii_case(std::ffi::OsStr::new("xz")) {
            return Ok(FileWriter::Xz(xz2::write::XzEncoder::new(raw_writer, 1)));
        }
    }
    Ok(FileWriter::Plain(io::BufWriter::new(raw_writer)))
}
