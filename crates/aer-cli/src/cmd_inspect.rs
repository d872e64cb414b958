/// Implementation of `aer inspect`.
///
/// Reads and decompresses the container, then walks the chunk scanner
/// directly, with no TLV decoding, printing one line per chunk:
///
/// ```text
/// header: Atmosphere 1.0
/// 0000 WRLD 000    61 bytes
/// 0001 BOX3 001    24 bytes
/// 2 chunks
/// ```
///
/// With `--preview`, the first 24 bytes of each chunk's data follow the
/// size, with non-printable bytes escaped as `\xNN`.
use anyhow::{Context, Result};
use aer_decoder::Container;
use aer_wire::chunk::ChunkScanner;

use crate::InspectArgs;

/// Run the `aer inspect` command.
///
/// # Errors
///
/// Returns an error if the container cannot be read or decompressed, or
/// if its payload has no chunk structure at all.
pub fn run(args: &InspectArgs) -> Result<()> {
    let container = Container::open(&args.file)
        .with_context(|| format!("cannot read {}", args.file.display()))?;

    println!("header: {}", container.header);

    let scanner = ChunkScanner::new(&container.payload)
        .with_context(|| format!("no chunk structure in {}", args.file.display()))?;

    let mut count = 0usize;
    for chunk in scanner {
        print!(
            "{:04} {} {:03} {:>7} bytes",
            chunk.index,
            chunk.type_code,
            chunk.numeric_id,
            chunk.data.len()
        );
        if args.preview {
            print!("  {}", preview(chunk.data, 24));
        }
        println!();
        count += 1;
    }
    println!("{count} chunks");
    Ok(())
}

/// Escaped view of the first `limit` bytes.
fn preview(data: &[u8], limit: usize) -> String {
    let mut out = String::new();
    for &b in data.iter().take(limit) {
        if b.is_ascii_graphic() || b == b' ' {
            out.push(b as char);
        } else {
            out.push_str(&format!("\\x{b:02X}"));
        }
    }
    if data.len() > limit {
        out.push('…');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_escapes_and_truncates() {
        assert_eq!(preview(b"abc", 24), "abc");
        assert_eq!(preview(b"a\x00b", 24), "a\\x00b");
        assert_eq!(preview(b"abcdef", 3), "abc…");
    }
}
