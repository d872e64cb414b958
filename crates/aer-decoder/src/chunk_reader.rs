use aer_wire::field::{FieldStep, read_field};

/// Cursor-based TLV field reader for one chunk's data.
///
/// Wraps the stateless [`read_field`] with a position so callers don't
/// track offsets by hand. Truncation and overrun are terminal for the
/// chunk: after either, the cursor sits at end-of-buffer and further
/// calls return [`FieldStep::Done`].
///
/// # Usage pattern
///
/// ```text
///   let mut reader = FieldReader::new(chunk.data);
///   loop {
///       match reader.next_step() {
///           FieldStep::Field { field, .. } => { /* decode it */ }
///           FieldStep::Truncated { .. }
///           | FieldStep::Overrun { .. } => { /* warn, keep prior fields */ }
///           FieldStep::Done => break,
///       }
///   }
/// ```
pub struct FieldReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> FieldReader<'a> {
    #[must_use]
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Advance past the next field, or to end-of-buffer on a terminal
    /// condition.
    pub fn next_step(&mut self) -> FieldStep<'a> {
        let step = read_field(self.buf, self.pos);
        match step {
            FieldStep::Field { next_offset, .. } => self.pos = next_offset,
            FieldStep::Truncated { .. } | FieldStep::Overrun { .. } => self.pos = self.buf.len(),
            FieldStep::Done => {}
        }
        step
    }

    /// Bytes consumed so far.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }
}
