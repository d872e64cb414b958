/// Implementation of `aer dump`.
///
/// Runs the full pipeline (decompress, split, decode) and prints the
/// plain-text record listing: one line per record with its fields in
/// tag order, warnings indented underneath, then the sorted URL set.
use anyhow::{Context, Result};
use aer_decoder::WorldDecoder;
use aer_render::dump::render_dump;

use crate::DumpArgs;

/// Run the `aer dump` command.
///
/// # Errors
///
/// Returns an error if the container cannot be read, decompressed, or
/// has no chunk structure. Per-chunk damage is not an error; it shows
/// up as warnings in the listing.
pub fn run(args: &DumpArgs) -> Result<()> {
    let model = WorldDecoder::decode_path(&args.file)
        .with_context(|| format!("failed to decode {}", args.file.display()))?;
    print!("{}", render_dump(&model));
    Ok(())
}
