use std::fs;
use std::path::Path;

use super::CliError;

/// Read a token file, trimming surrounding whitespace.
pub fn read_key_file(path: &Path) -> Result<String, CliError> {
    let raw = fs::read_to_string(path).map_err(|source| CliError::KeyFile {
        path: path.display().to_string(),
        source,
    })?;
    Ok(raw.trim().to_string())
}
