use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;
use log::debug;

use crate::error::DecodeError;

/// A world container after the one-shot read-and-decompress step.
///
/// The on-disk layout is a single newline-terminated text header line
/// followed immediately by a gzip stream:
///
/// ```text
/// ┌──────────────────────────────────────────────┐
/// │ header line ... \n                           │
/// │ <gzip stream: the chunked payload>           │
/// └──────────────────────────────────────────────┘
/// ```
///
/// The header line is carried along but not interpreted here. `name`
/// is the input's base name (file stem), used to synthesize the default
/// URL entries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Container {
    pub name: String,
    pub header: String,
    pub payload: Vec<u8>,
}

impl Container {
    /// Open a container file and decompress its payload.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::ContainerRead`] if the file cannot be opened.
    /// - [`DecodeError::HeaderTruncated`] if the stream ends before the
    ///   header line's newline.
    /// - [`DecodeError::Decompression`] if the remainder is not valid
    ///   gzip. No partial payload is produced.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DecodeError> {
        let path = path.as_ref();
        let name = path
            .file_stem()
            .map_or_else(|| "world".to_string(), |s| s.to_string_lossy().into_owned());
        let file = File::open(path).map_err(DecodeError::ContainerRead)?;
        Self::from_reader(name, BufReader::new(file))
    }

    /// Read a container from any buffered stream.
    ///
    /// # Errors
    ///
    /// Same as [`Container::open`], minus the file-open step.
    pub fn from_reader(name: impl Into<String>, mut reader: impl BufRead) -> Result<Self, DecodeError> {
        let mut header_raw = Vec::new();
        reader
            .read_until(b'\n', &mut header_raw)
            .map_err(DecodeError::ContainerRead)?;
        if header_raw.last() != Some(&b'\n') {
            return Err(DecodeError::HeaderTruncated);
        }
        while matches!(header_raw.last(), Some(b'\n' | b'\r')) {
            header_raw.pop();
        }
        let header = String::from_utf8_lossy(&header_raw).into_owned();

        let mut payload = Vec::new();
        GzDecoder::new(reader)
            .read_to_end(&mut payload)
            .map_err(DecodeError::Decompression)?;

        let name = name.into();
        debug!(
            "container {name}: header {} bytes, payload {} bytes",
            header.len(),
            payload.len()
        );
        Ok(Self {
            name,
            header,
            payload,
        })
    }

    /// Assemble a container from already-decompressed parts.
    ///
    /// Used by tests and fuzz targets that want to exercise the payload
    /// pipeline without a gzip stream in front of it.
    #[must_use]
    pub fn from_parts(
        name: impl Into<String>,
        header: impl Into<String>,
        payload: Vec<u8>,
    ) -> Self {
        Self {
            name: name.into(),
            header: header.into(),
            payload,
        }
    }
}
