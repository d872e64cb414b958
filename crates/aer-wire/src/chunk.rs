use crate::error::WireError;
use crate::fourcc::Fourcc;

/// One framed record in the decompressed payload.
///
/// ```text
/// ┌────────────────────────────────────────────────────────────┐
/// │ BOX3  12  :  <binary field data ...>                       │
/// │ └┬─┘ └┬─┘ │                                                │
/// │  │    │   └ colon ends the header                          │
/// │  │    └ numeric id, decimal text, any digit width          │
/// │  └ type code, exactly 4 chars from [A-Z0-9]                │
/// └────────────────────────────────────────────────────────────┘
/// ```
///
/// `index` is the zero-based position among all chunks in the payload,
/// assigned in boundary order; it is independent of `numeric_id`.
/// `data` borrows from the payload, trimmed of surrounding whitespace.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawChunk<'a> {
    pub index: usize,
    pub type_code: Fourcc,
    pub numeric_id: u64,
    pub data: &'a [u8],
}

/// A located chunk header, before its data extent is known.
#[derive(Clone, Copy, Debug)]
struct Boundary {
    /// Offset of the first type-code byte.
    start: usize,
    /// Offset just past the colon.
    data_start: usize,
    type_code: Fourcc,
    numeric_id: u64,
}

/// Lazy forward scanner over the payload's chunk boundaries.
///
/// A boundary is the pattern `[A-Z0-9]{4}[0-9]+:` at the start of the
/// buffer or immediately after a `\n`. Each chunk's data runs from just
/// after its colon up to the next boundary (or end of buffer), with
/// surrounding whitespace trimmed.
///
/// The scanner holds no mutable state across constructions: scanning the
/// same buffer twice yields the same sequence.
///
/// # Errors on construction
///
/// [`WireError::NoChunkBoundary`] if the buffer contains no boundary at
/// all. Once the first boundary is found, every subsequent chunk header
/// is well-formed by construction of the scan, and iteration cannot fail.
pub struct ChunkScanner<'a> {
    buf: &'a [u8],
    pending: Option<Boundary>,
    index: usize,
}

impl<'a> ChunkScanner<'a> {
    pub fn new(buf: &'a [u8]) -> Result<Self, WireError> {
        let first = find_boundary(buf, 0)
            .ok_or(WireError::NoChunkBoundary { scanned: buf.len() })?;
        Ok(Self {
            buf,
            pending: Some(first),
            index: 0,
        })
    }
}

impl<'a> Iterator for ChunkScanner<'a> {
    type Item = RawChunk<'a>;

    fn next(&mut self) -> Option<RawChunk<'a>> {
        let boundary = self.pending.take()?;
        let next = find_boundary(self.buf, boundary.data_start);
        let end = next.as_ref().map_or(self.buf.len(), |n| n.start);
        let data = self.buf[boundary.data_start..end].trim_ascii();

        let chunk = RawChunk {
            index: self.index,
            type_code: boundary.type_code,
            numeric_id: boundary.numeric_id,
            data,
        };
        self.index += 1;
        self.pending = next;
        Some(chunk)
    }
}

/// Find the next boundary at or after `from`.
///
/// Candidate positions are offset 0 and every offset directly following
/// a `\n`. A candidate that starts like a header but lacks the digit run
/// or the colon is not a boundary; the scan continues past it.
fn find_boundary(buf: &[u8], from: usize) -> Option<Boundary> {
    if from == 0 {
        if let Some(b) = boundary_at(buf, 0) {
            return Some(b);
        }
    }

    let mut idx = from.saturating_sub(1);
    while idx < buf.len() {
        let nl = idx + buf[idx..].iter().position(|&b| b == b'\n')?;
        let pos = nl + 1;
        if pos >= from {
            if let Some(b) = boundary_at(buf, pos) {
                return Some(b);
            }
        }
        idx = pos;
    }
    None
}

/// Try to read a full chunk header at `pos`.
fn boundary_at(buf: &[u8], pos: usize) -> Option<Boundary> {
    let code = buf.get(pos..pos + 4)?;
    if !code
        .iter()
        .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
    {
        return None;
    }

    let digits_start = pos + 4;
    let mut cursor = digits_start;
    while buf.get(cursor).is_some_and(u8::is_ascii_digit) {
        cursor += 1;
    }
    if cursor == digits_start || buf.get(cursor) != Some(&b':') {
        return None;
    }

    let mut numeric_id: u64 = 0;
    for &d in &buf[digits_start..cursor] {
        numeric_id = numeric_id
            .checked_mul(10)?
            .checked_add(u64::from(d - b'0'))?;
    }

    Some(Boundary {
        start: pos,
        data_start: cursor + 1,
        type_code: Fourcc::from_slice(code)?,
        numeric_id,
    })
}
