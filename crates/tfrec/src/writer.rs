//! Record writer lifecycle and orchestration.
//!
//! A [`RecordWriter`] owns exactly one sink, optionally behind a
//! compression filter, and moves through a two-state lifecycle:
//! `Open -> Closed`. Every operation checks the state up front, so a
//! misused writer returns a defined error instead of touching the sink.
//! Shutdown ordering is the safety-critical part: the filter must be
//! finalized while the sink is still writable, both on explicit close
//! and on drop.

use crate::compression::{CompressionError, CompressionType, Filter};
use crate::frame;
use crate::sink::{FileSink, Sink};
use std::io;
use std::path::Path;
use std::sync::Arc;
use tfrec_observe::{Meter, NoopMeter, VizEvent, WriterEvt, WriterKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WriterError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Compression error: {0}")]
    Compression(#[from] CompressionError),
    #[error("writer is not open")]
    Closed,
}

enum State<S: Sink> {
    Open(Filter<S>),
    Closed,
}

/// Writes framed records to a sink.
///
/// # Example
///
/// ```no_run
/// use tfrec::RecordWriter;
///
/// fn main() -> Result<(), tfrec::WriterError> {
///     let mut writer = RecordWriter::create("events.tfrecord", "GZIP")?;
///     writer.write_record(b"first record")?;
///     writer.write_record(b"")?;
///     writer.close()?;
///     Ok(())
/// }
/// ```
pub struct RecordWriter<S: Sink> {
    state: State<S>,
    meter: Arc<dyn Meter>,
}

impl RecordWriter<FileSink> {
    /// Creates a writer backed by a new file at `path`.
    ///
    /// `compression` is the configuration string: `""` for none,
    /// `"GZIP"`, or `"ZLIB"`. The selector is validated before the file
    /// is created, so a bad selector never allocates a sink. Either a
    /// fully-initialized writer comes back or an error does; there is
    /// no partially-constructed state.
    pub fn create(path: impl AsRef<Path>, compression: &str) -> Result<Self, WriterError> {
        let compression = CompressionType::parse(compression)?;
        let sink = FileSink::create(path)?;
        Ok(Self::with_sink(sink, compression))
    }
}

impl<S: Sink> RecordWriter<S> {
    /// Wraps an already-open sink.
    pub fn with_sink(sink: S, compression: CompressionType) -> Self {
        Self::with_sink_and_meter(sink, compression, Arc::new(NoopMeter))
    }

    /// Wraps an already-open sink, emitting events to `meter`.
    pub fn with_sink_and_meter(
        sink: S,
        compression: CompressionType,
        meter: Arc<dyn Meter>,
    ) -> Self {
        Self {
            state: State::Open(Filter::new(compression, sink)),
            meter,
        }
    }

    /// True until [`close`](Self::close) has run.
    pub fn is_open(&self) -> bool {
        matches!(self.state, State::Open(_))
    }

    /// Appends one record.
    ///
    /// A downstream I/O failure is returned to the caller and leaves
    /// the writer open: nothing is retried here, and a later write with
    /// the same or different payload may still succeed.
    pub fn write_record(&mut self, payload: &[u8]) -> Result<(), WriterError> {
        let filter = match &mut self.state {
            State::Open(filter) => filter,
            State::Closed => return Err(WriterError::Closed),
        };

        let encoded = frame::encode(payload);
        filter.write(&encoded)?;

        self.meter.emit(VizEvent::Writer(WriterEvt {
            kind: WriterKind::RecordWritten {
                frame_bytes: encoded.len() as u64,
            },
        }));
        Ok(())
    }

    /// Forwards a flush down the filter/sink chain.
    pub fn flush(&mut self) -> Result<(), WriterError> {
        let filter = match &mut self.state {
            State::Open(filter) => filter,
            State::Closed => return Err(WriterError::Closed),
        };

        filter.flush()?;

        self.meter.emit(VizEvent::Writer(WriterEvt {
            kind: WriterKind::Flush,
        }));
        Ok(())
    }

    /// Finalizes the filter, then the sink.
    ///
    /// Idempotent: closing an already-closed writer is a no-op success.
    /// The state is swapped out before finalization runs, so even when
    /// part of the shutdown fails the handles are gone and a retried
    /// close cannot double-finalize anything.
    pub fn close(&mut self) -> Result<(), WriterError> {
        match std::mem::replace(&mut self.state, State::Closed) {
            State::Open(filter) => {
                filter.close()?;
                self.meter.emit(VizEvent::Writer(WriterEvt {
                    kind: WriterKind::Closed,
                }));
                Ok(())
            }
            State::Closed => Ok(()),
        }
    }
}

impl<S: Sink> std::fmt::Debug for RecordWriter<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordWriter")
            .field(
                "state",
                &match self.state {
                    State::Open(_) => "Open",
                    State::Closed => "Closed",
                },
            )
            .finish()
    }
}

impl<S: Sink> Drop for RecordWriter<S> {
    fn drop(&mut self) {
        // Same ordered finalization as an explicit close. Drop has no
        // error channel, so a failure here is unreportable; callers
        // needing the result must close explicitly.
        let _ = self.close();
    }
}
