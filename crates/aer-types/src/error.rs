use aer_wire::Fourcc;

use crate::kind::FieldKind;

/// Errors from applying a type rule to a field's raw bytes.
///
/// These are per-field conditions: the decoder records them as warnings
/// on the affected record, stores the field as opaque bytes, and keeps
/// decoding the rest of the chunk. A single malformed field must not
/// discard an otherwise-valid record.
#[derive(Debug, thiserror::Error)]
pub enum TypeError {
    /// A fixed-width scalar received a value of the wrong byte length.
    ///
    /// Bool and Int require exactly 4 bytes. Double accepts 4 (compact
    /// legacy integer form) or 8 (IEEE-754); anything else lands here.
    #[error("field {tag}: {} value has {len} bytes", .kind.name())]
    ScalarWidth {
        tag: Fourcc,
        kind: FieldKind,
        len: usize,
    },

    /// An array field's byte length is not a multiple of its element width.
    #[error("field {tag}: {} value of {len} bytes is not a multiple of {elem}", .kind.name())]
    ListLength {
        tag: Fourcc,
        kind: FieldKind,
        len: usize,
        elem: usize,
    },
}
