/// Implementation of `aer convert`.
///
/// Decodes the world, builds the X3D scene (optionally wrapped in an
/// HTML page), and writes it next to the input:
///
/// ```text
/// aer convert castle.aer            → castle.x3d
/// aer convert castle.aer --html     → castle.html
/// aer convert castle.aer -o out.x3d → out.x3d
/// ```
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use aer_decoder::WorldDecoder;
use aer_render::{OutputMode, render};

use crate::ConvertArgs;

/// Run the `aer convert` command.
///
/// # Errors
///
/// Returns an error if the container cannot be decoded or the output
/// file cannot be written.
pub fn run(args: &ConvertArgs) -> Result<()> {
    let model = WorldDecoder::decode_path(&args.file)
        .with_context(|| format!("failed to decode {}", args.file.display()))?;

    let mode = if args.html {
        OutputMode::Html
    } else {
        OutputMode::X3d
    };
    let rendered = render(&model, mode);

    let out_path = args
        .output
        .clone()
        .unwrap_or_else(|| default_output(args));
    fs::write(&out_path, rendered)
        .with_context(|| format!("cannot write {}", out_path.display()))?;
    println!("wrote {}", out_path.display());
    Ok(())
}

/// Input path with its extension swapped for the output format's.
fn default_output(args: &ConvertArgs) -> PathBuf {
    let ext = if args.html { "html" } else { "x3d" };
    args.file.with_extension(ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_path_swaps_extension() {
        let args = ConvertArgs {
            file: PathBuf::from("worlds/castle.aer"),
            html: false,
            output: None,
        };
        assert_eq!(default_output(&args), PathBuf::from("worlds/castle.x3d"));

        let args = ConvertArgs {
            file: PathBuf::from("castle.aer"),
            html: true,
            output: None,
        };
        assert_eq!(default_output(&args), PathBuf::from("castle.html"));
    }
}
