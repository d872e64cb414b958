use aer_types::{DecodedRecord, FieldKind, RecordWarning, Value};
use aer_wire::chunk::RawChunk;
use aer_wire::field::FieldStep;
use log::trace;

use crate::chunk_reader::FieldReader;

/// Decode one chunk's TLV stream into a [`DecodedRecord`].
///
/// A pure function of the chunk's bytes and the static tag table, so
/// independent chunks could be decoded in parallel and merged by index
/// order; the sequential pipeline simply doesn't need to.
///
/// Recoverable conditions become warnings on the record:
/// - truncation / overrun stop the walk, keeping fields read so far;
/// - a value with the wrong width for its rule is stored as
///   [`Value::Unknown`] and the walk continues.
#[must_use]
pub fn decode_chunk(chunk: &RawChunk<'_>) -> DecodedRecord {
    let mut record = DecodedRecord::new(chunk.index, chunk.type_code, chunk.numeric_id);
    let mut reader = FieldReader::new(chunk.data);

    loop {
        match reader.next_step() {
            FieldStep::Done => break,
            FieldStep::Truncated { offset } => {
                record.warnings.push(RecordWarning::Truncated { offset });
                break;
            }
            FieldStep::Overrun {
                tag,
                declared,
                remaining,
                offset,
            } => {
                record.warnings.push(RecordWarning::Corrupted {
                    tag,
                    declared,
                    remaining,
                    offset,
                });
                break;
            }
            FieldStep::Field { field, .. } => {
                let value = match FieldKind::for_tag(field.tag) {
                    None => Value::Unknown(field.value.to_vec()),
                    Some(kind) => match Value::decode(kind, field.tag, field.value) {
                        Ok(value) => value,
                        Err(_) => {
                            record.warnings.push(RecordWarning::BadField {
                                tag: field.tag,
                                kind,
                                len: field.value.len(),
                            });
                            Value::Unknown(field.value.to_vec())
                        }
                    },
                };
                record.insert(field.tag, value);
            }
        }
    }

    trace!(
        "chunk {} {}{}: {} fields, {} urls, {} warnings",
        record.index,
        record.type_code,
        record.numeric_id,
        record.fields.len(),
        record.urls.len(),
        record.warnings.len()
    );
    record
}

#[cfg(test)]
mod tests {
    use aer_wire::Fourcc;
    use aer_wire::field::{write_field, write_field_rest};

    use super::*;

    fn chunk(data: &[u8]) -> RawChunk<'_> {
        RawChunk {
            index: 0,
            type_code: Fourcc::new(*b"BOX3"),
            numeric_id: 1,
            data,
        }
    }

    #[test]
    fn decodes_typed_fields() {
        let mut data = Vec::new();
        write_field(&mut data, Fourcc::new(*b"widt"), &2.0f64.to_le_bytes());
        write_field(&mut data, Fourcc::new(*b"urln"), b"a.png\0");

        let record = decode_chunk(&chunk(&data));
        assert!(record.is_clean());
        assert_eq!(record.double(b"widt"), Some(2.0));
        assert_eq!(record.text(b"urln").as_deref(), Some("a.png"));
        assert!(record.urls.contains("a.png"));
    }

    #[test]
    fn unknown_tag_keeps_opaque_bytes() {
        let mut data = Vec::new();
        write_field(&mut data, Fourcc::new(*b"zzzz"), b"\x01\x02");

        let record = decode_chunk(&chunk(&data));
        assert!(record.is_clean());
        assert_eq!(
            record.get(b"zzzz"),
            Some(&Value::Unknown(vec![0x01, 0x02]))
        );
        assert!(record.urls.is_empty());
    }

    #[test]
    fn duplicate_tag_last_write_wins() {
        let mut data = Vec::new();
        write_field(&mut data, Fourcc::new(*b"dpth"), &1i32.to_le_bytes());
        write_field(&mut data, Fourcc::new(*b"dpth"), &2i32.to_le_bytes());

        let record = decode_chunk(&chunk(&data));
        assert_eq!(record.int(b"dpth"), Some(2));
        assert_eq!(record.fields.len(), 1);
    }

    #[test]
    fn truncated_chunk_keeps_prior_fields() {
        let mut data = Vec::new();
        write_field(&mut data, Fourcc::new(*b"dpth"), &1i32.to_le_bytes());
        data.extend_from_slice(b"wid"); // dangling partial header

        let record = decode_chunk(&chunk(&data));
        assert_eq!(record.int(b"dpth"), Some(1));
        assert_eq!(
            record.warnings,
            vec![RecordWarning::Truncated { offset: 10 }]
        );
    }

    #[test]
    fn corrupted_chunk_keeps_prior_fields() {
        let mut data = Vec::new();
        write_field(&mut data, Fourcc::new(*b"dpth"), &1i32.to_le_bytes());
        data.extend_from_slice(b"urln");
        data.extend_from_slice(&200u16.to_le_bytes());
        data.extend_from_slice(b"short");

        let record = decode_chunk(&chunk(&data));
        assert_eq!(record.int(b"dpth"), Some(1));
        assert_eq!(record.get(b"urln"), None);
        assert_eq!(
            record.warnings,
            vec![RecordWarning::Corrupted {
                tag: Fourcc::new(*b"urln"),
                declared: 200,
                remaining: 5,
                offset: 10,
            }]
        );
    }

    #[test]
    fn bad_field_width_does_not_stop_the_walk() {
        let mut data = Vec::new();
        write_field(&mut data, Fourcc::new(*b"widt"), b"\x01\x02\x03"); // 3 bytes: no double fits
        write_field(&mut data, Fourcc::new(*b"dpth"), &9i32.to_le_bytes());

        let record = decode_chunk(&chunk(&data));
        assert_eq!(
            record.get(b"widt"),
            Some(&Value::Unknown(vec![0x01, 0x02, 0x03]))
        );
        assert_eq!(record.int(b"dpth"), Some(9));
        assert_eq!(
            record.warnings,
            vec![RecordWarning::BadField {
                tag: Fourcc::new(*b"widt"),
                kind: FieldKind::Double,
                len: 3,
            }]
        );
    }

    #[test]
    fn sentinel_field_consumes_exact_tail() {
        let mut data = Vec::new();
        write_field(&mut data, Fourcc::new(*b"dpth"), &1i32.to_le_bytes());
        write_field_rest(&mut data, Fourcc::new(*b"obnm"), b"0123456789");

        let record = decode_chunk(&chunk(&data));
        assert!(record.is_clean());
        assert_eq!(record.text(b"obnm").as_deref(), Some("0123456789"));
        assert_eq!(record.fields.len(), 2);
    }

    #[test]
    fn empty_chunk_is_a_valid_record() {
        let record = decode_chunk(&chunk(&[]));
        assert!(record.is_clean());
        assert!(record.fields.is_empty());
    }
}
