//! TFRecord-format record writer.
//!
//! Writes opaque byte-string records to an append-only sink using the
//! TFRecord framing: per record a little-endian `u64` length, a masked
//! CRC32C of the length bytes, the payload, and a masked CRC32C of the
//! payload. The stream can optionally pass through a gzip or zlib
//! filter before reaching the sink.
//!
//! - [`frame`]: the on-wire frame codec and CRC masking
//! - [`sink`]: the byte destination abstraction plus a file-backed impl
//! - [`compression`]: filter selection between the writer and its sink
//! - [`writer`]: lifecycle (create/write/flush/close) and ordered shutdown

pub mod compression;
pub mod frame;
pub mod sink;
pub mod writer;

pub use compression::{CompressionError, CompressionType};
pub use sink::{FileSink, Sink};
pub use writer::{RecordWriter, WriterError};
