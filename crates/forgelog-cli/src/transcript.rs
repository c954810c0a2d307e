//! Reading transcript files from disk.

use std::path::Path;

use tracing::warn;

use crate::error::CliError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Read a transcript file into text.
///
/// # Errors
///
/// Returns [`CliError::InputUnavailable`] if the file cannot be read.
pub fn read_transcript(path: &Path) -> Result<String, CliError> {
    let bytes = std::fs::read(path).map_err(|source| CliError::InputUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(decode(&bytes))
}

/// Decode raw transcript bytes, dropping a leading byte-order mark.
///
/// Invalid UTF-8 is replaced rather than rejected so a damaged export still
/// yields a report.
pub fn decode(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    std::str::from_utf8(bytes).map_or_else(
        |e| {
            warn!(
                valid_up_to = e.valid_up_to(),
                "transcript is not valid UTF-8, replacing bad bytes"
            );
            String::from_utf8_lossy(bytes).into_owned()
        },
        str::to_owned,
    )
}
