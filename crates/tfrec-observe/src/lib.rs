//! Vendor-neutral observability ABI for tfrec.
//!
//! Components emit typed events through a [`Meter`] supplied at
//! construction time. The default [`NoopMeter`] discards everything, so
//! callers that don't care about observability pay nothing beyond a
//! virtual call.

/// Receiver for typed observability events.
pub trait Meter: Send + Sync {
    /// Emits one event. Implementations must not block.
    fn emit(&self, event: VizEvent);
}

/// A meter that discards all events.
pub struct NoopMeter;

impl Meter for NoopMeter {
    fn emit(&self, _event: VizEvent) {}
}

/// Top-level event envelope, one variant per emitting subsystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VizEvent {
    Writer(WriterEvt),
}

/// Event emitted by a record writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriterEvt {
    pub kind: WriterKind,
}

/// What happened in the writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriterKind {
    /// One record was framed and handed to the sink chain.
    RecordWritten { frame_bytes: u64 },
    /// A flush was forwarded down the sink chain.
    Flush,
    /// The writer finalized its filter and sink.
    Closed,
}
