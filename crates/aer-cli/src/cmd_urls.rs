/// Implementation of `aer urls`.
///
/// Decodes the world and prints the deduplicated URL set, one per line,
/// in sorted order. The set always contains at least the two
/// synthesized entries (viewer icon, companion control file).
use anyhow::{Context, Result};
use aer_decoder::WorldDecoder;

use crate::UrlsArgs;

/// Run the `aer urls` command.
///
/// # Errors
///
/// Returns an error if the container cannot be decoded.
pub fn run(args: &UrlsArgs) -> Result<()> {
    let model = WorldDecoder::decode_path(&args.file)
        .with_context(|| format!("failed to decode {}", args.file.display()))?;
    for url in &model.urls {
        println!("{url}");
    }
    Ok(())
}
