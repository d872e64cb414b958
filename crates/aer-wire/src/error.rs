#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// The payload contains no chunk boundary anywhere.
    ///
    /// A boundary is a `[A-Z0-9]{4}` type code, a decimal id, and a colon
    /// at the start of the buffer or immediately after a line break. A
    /// payload without a single boundary has no discoverable structure,
    /// so the whole decode is abandoned.
    #[error("no chunk boundary found in {scanned} bytes of payload")]
    NoChunkBoundary { scanned: usize },
}
