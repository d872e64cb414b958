use aer_wire::Fourcc;

use crate::kind::FieldKind;

/// A recoverable condition observed while decoding one chunk.
///
/// Warnings ride on the affected [`DecodedRecord`](crate::DecodedRecord)
/// so no condition disappears into a log line: a consumer can always see
/// whether a record is complete, and which fields were dropped.
///
/// ```text
/// ┌────────────┬──────────────────────────────┬──────────────────────┐
/// │ Warning    │ Trigger                      │ Effect               │
/// ├────────────┼──────────────────────────────┼──────────────────────┤
/// │ Truncated  │ < 6 bytes left mid-header    │ stop; keep fields    │
/// │ Corrupted  │ declared length > remaining  │ stop; keep fields    │
/// │ BadField   │ wrong width for a type rule  │ field → Unknown; go  │
/// │            │                              │ on with next field   │
/// └────────────┴──────────────────────────────┴──────────────────────┘
/// ```
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RecordWarning {
    /// The chunk's data ended in the middle of a field header.
    #[error("chunk truncated mid-field-header at offset {offset}")]
    Truncated { offset: usize },

    /// A field declared more value bytes than the chunk has left.
    #[error(
        "chunk corrupted at offset {offset}: field {tag} declares {declared} bytes, {remaining} remain"
    )]
    Corrupted {
        tag: Fourcc,
        declared: usize,
        remaining: usize,
        offset: usize,
    },

    /// A field's value had the wrong byte length for its type rule.
    /// The field was stored as opaque bytes instead.
    #[error("field {tag} dropped: {len} bytes does not fit the {} rule", .kind.name())]
    BadField {
        tag: Fourcc,
        kind: FieldKind,
        len: usize,
    },
}
