use aer_wire::WireError;

/// Errors that abort the whole decode.
///
/// Only whole-input failures live here. Per-chunk and per-field
/// conditions (truncation, corruption, wrong-width fields) are not
/// errors: they are recorded as [`aer_types::RecordWarning`]s on the
/// affected record and decoding continues.
///
/// ```text
///   DecodeError
///   ├── ContainerRead     ← stream cannot be opened or read
///   ├── HeaderTruncated   ← input ends before the header line does
///   ├── Decompression     ← remainder is not a valid gzip stream
///   └── Wire(WireError)   ← payload has no chunk boundary at all
/// ```
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The container stream could not be opened or read.
    #[error("cannot read container: {0}")]
    ContainerRead(#[source] std::io::Error),

    /// The container ended before the header line's terminating newline.
    #[error("container ended before the header line terminated")]
    HeaderTruncated,

    /// The bytes after the header line are not a valid gzip stream.
    /// Decompression is all-or-nothing; no partial payload is produced.
    #[error("gzip decompression failed: {0}")]
    Decompression(#[source] std::io::Error),

    /// Structural failure in the decompressed payload.
    #[error(transparent)]
    Wire(#[from] WireError),
}
