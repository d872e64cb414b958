use std::collections::BTreeSet;
use std::path::Path;

use aer_types::DecodedRecord;
use aer_wire::chunk::ChunkScanner;
use log::debug;

use crate::container::Container;
use crate::error::DecodeError;
use crate::record::decode_chunk;

/// The result of decoding a world container.
///
/// ```text
/// ┌──────────────────────────────────────────────────────────┐
/// │ WorldModel                                               │
/// │   header:  String            ← container's first line    │
/// │   records: Vec<DecodedRecord> ← in chunk-index order     │
/// │   urls:    BTreeSet<String>   ← deduplicated, sorted     │
/// └──────────────────────────────────────────────────────────┘
/// ```
///
/// The URL set is seeded with two synthesized entries derived from the
/// container's base name (a viewer icon and the companion control
/// file), so it is never empty, even for worlds with no URL fields.
#[derive(Clone, Debug, PartialEq)]
pub struct WorldModel {
    pub header: String,
    pub records: Vec<DecodedRecord>,
    pub urls: BTreeSet<String>,
}

/// Synchronous pipeline over a container's decompressed payload.
///
/// Decoding proceeds in three steps:
///
///   1. **Scan**: split the payload at chunk boundaries; a payload with
///      no boundary at all aborts with
///      [`WireError::NoChunkBoundary`](aer_wire::WireError).
///   2. **Decode**: walk each chunk's TLV fields against the static tag
///      table. Truncated or corrupted chunks keep the fields read so
///      far and carry warnings; they never abort the pipeline.
///   3. **Aggregate**: records in chunk-index order; every chunk-local
///      URL set unioned into the seeded global set.
///
/// The whole pipeline is deterministic: the same bytes always produce
/// the same [`WorldModel`], including URL ordering.
///
/// # Example
///
/// ```rust,no_run
/// use aer_decoder::WorldDecoder;
///
/// let model = WorldDecoder::decode_path("castle.aer").unwrap();
/// for record in &model.records {
///     println!("{}{}: {} fields", record.type_code, record.numeric_id, record.fields.len());
/// }
/// ```
pub struct WorldDecoder;

impl WorldDecoder {
    /// Open, decompress and decode a container file.
    ///
    /// # Errors
    ///
    /// Any [`DecodeError`]: unreadable container, truncated header
    /// line, invalid gzip stream, or a payload with no chunk boundary.
    pub fn decode_path(path: impl AsRef<Path>) -> Result<WorldModel, DecodeError> {
        let container = Container::open(path)?;
        Self::decode(&container)
    }

    /// Decode an already-read container.
    ///
    /// # Errors
    ///
    /// [`WireError::NoChunkBoundary`](aer_wire::WireError) (wrapped in
    /// [`DecodeError::Wire`]) if the payload has no recognizable chunk
    /// structure. No partial results are produced in that case.
    pub fn decode(container: &Container) -> Result<WorldModel, DecodeError> {
        let scanner = ChunkScanner::new(&container.payload)?;
        let mut urls = Self::default_urls(&container.name);
        let mut records = Vec::new();

        for chunk in scanner {
            let record = decode_chunk(&chunk);
            urls.extend(record.urls.iter().cloned());
            records.push(record);
        }

        debug!(
            "world {}: {} records, {} urls",
            container.name,
            records.len(),
            urls.len()
        );
        Ok(WorldModel {
            header: container.header.clone(),
            records,
            urls,
        })
    }

    /// The two synthesized URL entries every world references: its
    /// viewer icon and its companion control file.
    #[must_use]
    pub fn default_urls(name: &str) -> BTreeSet<String> {
        BTreeSet::from(["./Viewer.png".to_string(), format!("./{name}.ctl")])
    }
}

#[cfg(test)]
mod tests {
    use aer_wire::Fourcc;
    use aer_wire::field::write_field;

    use super::*;

    fn payload(chunks: &[(&str, &[u8])]) -> Vec<u8> {
        let mut buf = Vec::new();
        for (i, (header, data)) in chunks.iter().enumerate() {
            if i > 0 {
                buf.push(b'\n');
            }
            buf.extend_from_slice(header.as_bytes());
            buf.extend_from_slice(data);
        }
        buf
    }

    #[test]
    fn decodes_records_in_chunk_order() {
        let mut box_data = Vec::new();
        write_field(&mut box_data, Fourcc::new(*b"widt"), &2.0f64.to_le_bytes());
        let payload = payload(&[("WRLD0:", &[]), ("BOX31:", box_data.as_slice())]);
        let container = Container::from_parts("world", "hdr", payload);

        let model = WorldDecoder::decode(&container).unwrap();
        assert_eq!(model.header, "hdr");
        assert_eq!(model.records.len(), 2);
        assert_eq!(model.records[0].type_code, Fourcc::new(*b"WRLD"));
        assert_eq!(model.records[0].index, 0);
        assert_eq!(model.records[1].index, 1);
        assert_eq!(model.records[1].double(b"widt"), Some(2.0));
    }

    #[test]
    fn url_set_is_seeded_and_sorted() {
        let container = Container::from_parts("world", "", b"WRLD0:".to_vec());
        let model = WorldDecoder::decode(&container).unwrap();
        assert_eq!(
            model.urls.iter().collect::<Vec<_>>(),
            vec!["./Viewer.png", "./world.ctl"]
        );
    }

    #[test]
    fn chunk_urls_union_into_the_set() {
        let mut a = Vec::new();
        write_field(&mut a, Fourcc::new(*b"urln"), b"tex.png\0");
        let mut b = Vec::new();
        write_field(&mut b, Fourcc::new(*b"wrul"), b"next.aer\0");
        write_field(&mut b, Fourcc::new(*b"urln"), b"tex.png\0"); // duplicate across chunks

        let payload = payload(&[("TXTR1:", a.as_slice()), ("PORT2:", b.as_slice())]);
        let container = Container::from_parts("w", "", payload);
        let model = WorldDecoder::decode(&container).unwrap();

        assert_eq!(
            model.urls.iter().collect::<Vec<_>>(),
            vec!["./Viewer.png", "./w.ctl", "next.aer", "tex.png"]
        );
    }

    #[test]
    fn boundary_free_payload_is_fatal() {
        let container = Container::from_parts("w", "", b"nothing chunk-like".to_vec());
        let result = WorldDecoder::decode(&container);
        assert!(matches!(
            result,
            Err(DecodeError::Wire(
                aer_wire::WireError::NoChunkBoundary { .. }
            ))
        ));
    }

    #[test]
    fn decode_is_deterministic() {
        let mut data = Vec::new();
        write_field(&mut data, Fourcc::new(*b"urln"), b"a.png\0");
        write_field(&mut data, Fourcc::new(*b"widt"), &1.5f64.to_le_bytes());
        let payload = payload(&[("BOX31:", data.as_slice()), ("COL32:", data.as_slice())]);
        let container = Container::from_parts("w", "h", payload);

        let first = WorldDecoder::decode(&container).unwrap();
        let second = WorldDecoder::decode(&container).unwrap();
        assert_eq!(first, second);
    }
}
