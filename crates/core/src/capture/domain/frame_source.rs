use thiserror::Error;

use crate::shared::frame::Frame;

#[derive(Error, Debug)]
pub enum CaptureError {
    /// The device/source could not be opened at all. Fatal: surfaced
    /// to the caller of `start()`, the stream never enters Running.
    #[error("failed to open capture source: {0}")]
    Open(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A single read failed. Transient: the caller backs off briefly
    /// and retries.
    #[error("frame read failed: {0}")]
    Read(String),

    /// The source was read after `close()`. Reads on a released handle
    /// must fail safely, never crash.
    #[error("capture source is closed")]
    Closed,
}

/// Outcome of a single read attempt on an open source.
#[derive(Debug)]
pub enum ReadOutcome {
    Frame(Frame),
    /// The device yielded no frame this call (busy / not warmed up).
    /// Not an error; retry after a short backoff.
    NotReady,
}

/// The capture capability: owns one device or file handle while open.
///
/// A source is either closed or open with exactly one live handle.
/// Implementations hand each frame off exactly once and do not retain
/// it afterwards.
pub trait FrameSource: Send {
    fn open(&mut self) -> Result<(), CaptureError>;

    /// Blocking read of the next frame. Returns `NotReady` rather than
    /// an error when the device simply has nothing yet.
    fn read(&mut self) -> Result<ReadOutcome, CaptureError>;

    /// Idempotent: safe to call any number of times, releases the
    /// underlying handle exactly once, never blocks on the device.
    fn close(&mut self);
}
