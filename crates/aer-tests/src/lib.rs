//! Fixture builders for the integration tests.
//!
//! Worlds are assembled chunk by chunk, then wrapped in the container
//! layout (header line + gzip stream) exactly as the decoder expects
//! to find them on disk.

use std::io::Write as _;

use aer_wire::Fourcc;
use flate2::Compression;
use flate2::write::GzEncoder;

/// A chunk under construction: type code, numeric id, and TLV data.
pub struct ChunkFixture {
    code: &'static str,
    id: u64,
    data: Vec<u8>,
}

impl ChunkFixture {
    #[must_use]
    pub fn new(code: &'static str, id: u64) -> Self {
        assert_eq!(code.len(), 4, "type codes are exactly 4 characters");
        Self {
            code,
            id,
            data: Vec::new(),
        }
    }

    /// Append a field with an explicit length.
    #[must_use]
    pub fn field(mut self, tag: &[u8; 4], value: &[u8]) -> Self {
        aer_wire::field::write_field(&mut self.data, Fourcc::new(*tag), value);
        self
    }

    /// Append a sentinel-length (rest-of-chunk) field. Must come last.
    #[must_use]
    pub fn field_rest(mut self, tag: &[u8; 4], value: &[u8]) -> Self {
        aer_wire::field::write_field_rest(&mut self.data, Fourcc::new(*tag), value);
        self
    }

    /// Append raw bytes without TLV framing, for damage scenarios.
    #[must_use]
    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.data.extend_from_slice(bytes);
        self
    }
}

/// Join chunks into a payload: `CODE<id>:` headers, newline-separated.
#[must_use]
pub fn payload(chunks: &[ChunkFixture]) -> Vec<u8> {
    let mut buf = Vec::new();
    for (i, chunk) in chunks.iter().enumerate() {
        if i > 0 {
            buf.push(b'\n');
        }
        buf.extend_from_slice(chunk.code.as_bytes());
        buf.extend_from_slice(chunk.id.to_string().as_bytes());
        buf.push(b':');
        buf.extend_from_slice(&chunk.data);
    }
    buf
}

/// Wrap a payload in the on-disk container layout: one header line,
/// then the payload as a gzip stream.
#[must_use]
pub fn container_bytes(header: &str, payload: &[u8]) -> Vec<u8> {
    let mut bytes = header.as_bytes().to_vec();
    bytes.push(b'\n');
    let mut enc = GzEncoder::new(&mut bytes, Compression::default());
    enc.write_all(payload).expect("write to Vec");
    enc.finish().expect("finish gzip stream");
    bytes
}
