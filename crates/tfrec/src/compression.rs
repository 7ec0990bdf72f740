//! Optional compression filter between the record writer and its sink.
//!
//! The filter is selected once, at construction, from a closed set of
//! configuration strings. When compression is on, every byte the writer
//! produces passes through a flate2 stream encoder before reaching the
//! sink; closing the filter finishes the stream while the sink is still
//! writable, then closes the sink.

use crate::sink::Sink;
use flate2::write::{GzEncoder, ZlibEncoder};
use std::io::{self, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompressionError {
    #[error("unrecognized compression type: {0:?}")]
    Unrecognized(String),
}

/// Compression applied to the byte stream before it reaches the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionType {
    #[default]
    None,
    Gzip,
    Zlib,
}

impl CompressionType {
    /// Parses the configuration string.
    ///
    /// The empty string selects no compression; anything outside the
    /// recognized set is a construction-time error, never silently
    /// treated as uncompressed.
    pub fn parse(s: &str) -> Result<Self, CompressionError> {
        match s {
            "" => Ok(CompressionType::None),
            "GZIP" => Ok(CompressionType::Gzip),
            "ZLIB" => Ok(CompressionType::Zlib),
            other => Err(CompressionError::Unrecognized(other.to_string())),
        }
    }
}

/// Gives flate2 encoders `io::Write` access to a [`Sink`].
struct SinkWriter<S: Sink>(S);

impl<S: Sink> Write for SinkWriter<S> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()
    }
}

/// The sink chain: a raw passthrough or a stream encoder over the sink.
pub(crate) enum Filter<S: Sink> {
    Raw(S),
    Gzip(GzEncoder<SinkWriter<S>>),
    Zlib(ZlibEncoder<SinkWriter<S>>),
}

impl<S: Sink> Filter<S> {
    /// Wraps `sink` in the filter selected by `compression`.
    pub fn new(compression: CompressionType, sink: S) -> Self {
        let level = flate2::Compression::default();
        match compression {
            CompressionType::None => Filter::Raw(sink),
            CompressionType::Gzip => Filter::Gzip(GzEncoder::new(SinkWriter(sink), level)),
            CompressionType::Zlib => Filter::Zlib(ZlibEncoder::new(SinkWriter(sink), level)),
        }
    }

    /// Writes `buf` in full through the filter.
    pub fn write(&mut self, buf: &[u8]) -> io::Result<()> {
        match self {
            Filter::Raw(sink) => sink.write(buf),
            Filter::Gzip(enc) => enc.write_all(buf),
            Filter::Zlib(enc) => enc.write_all(buf),
        }
    }

    /// Flushes the filter and the sink beneath it.
    ///
    /// For the compressed variants this forces a sync flush of the
    /// encoder, so everything written so far is decodable from the sink.
    pub fn flush(&mut self) -> io::Result<()> {
        match self {
            Filter::Raw(sink) => sink.flush(),
            Filter::Gzip(enc) => enc.flush(),
            Filter::Zlib(enc) => enc.flush(),
        }
    }

    /// Finishes the compression stream, then closes the sink.
    ///
    /// The encoder writes its trailing compressed bytes during
    /// `finish`, so it must run while the sink is still open; the sink
    /// close comes strictly after, exactly once.
    pub fn close(self) -> io::Result<()> {
        let mut sink = match self {
            Filter::Raw(sink) => sink,
            Filter::Gzip(enc) => enc.finish()?.0,
            Filter::Zlib(enc) => enc.finish()?.0,
        };
        sink.close()
    }
}
