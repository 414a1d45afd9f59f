//! Variables file loading.
//!
//! A variables file is TOML with a `[variables]` table of string values:
//!
//! ```toml
//! [variables]
//! greeting = "你好"
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VarsError {
    #[error("Failed to read variables file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse variables file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Invalid --var {pair:?}: expected NAME=VALUE")]
    InvalidPair { pair: String },
}

#[derive(Debug, Default, Deserialize)]
struct VarsFile {
    #[serde(default)]
    variables: HashMap<String, String>,
}

/// Load the `[variables]` table from a TOML file.
pub fn load(path: &Path) -> Result<HashMap<String, String>, VarsError> {
    let raw = fs::read_to_string(path).map_err(|source| VarsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let file: VarsFile = toml::from_str(&raw).map_err(|source| VarsError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(file.variables)
}

/// Layer `--var NAME=VALUE` pairs over file-loaded variables. Pairs apply
/// last, so a name repeated on the command line overrides the file entry.
pub fn merge(
    mut variables: HashMap<String, String>,
    pairs: &[String],
) -> Result<HashMap<String, String>, VarsError> {
    for pair in pairs {
        let Some((name, value)) = pair.split_once('=') else {
            return Err(VarsError::InvalidPair { pair: pair.clone() });
        };
        variables.insert(name.to_string(), value.to_string());
    }
    Ok(variables)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_variables_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vars.toml");
        fs::write(&path, "[variables]\ngreeting = \"hello\"\nname = \"Ana\"\n").unwrap();

        let vars = load(&path).unwrap();
        assert_eq!(vars.get("greeting").map(String::as_str), Some("hello"));
        assert_eq!(vars.get("name").map(String::as_str), Some("Ana"));
    }

    #[test]
    fn test_file_without_table_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vars.toml");
        fs::write(&path, "").unwrap();

        let vars = load(&path).unwrap();
        assert!(vars.is_empty());
    }

    #[test]
    fn test_missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");

        let err = load(&path).unwrap_err();
        assert!(matches!(err, VarsError::Read { .. }));
    }

    #[test]
    fn test_invalid_toml_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vars.toml");
        fs::write(&path, "not = [valid\n").unwrap();

        let err = load(&path).unwrap_err();
        assert!(matches!(err, VarsError::Parse { .. }));
    }

    #[test]
    fn test_var_pairs_override_file_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vars.toml");
        fs::write(
            &path,
            "[variables]\ngreeting = \"from file\"\nname = \"Ana\"\n",
        )
        .unwrap();

        let vars = merge(load(&path).unwrap(), &["greeting=from flag".to_string()]).unwrap();
        assert_eq!(vars.get("greeting").map(String::as_str), Some("from flag"));
        assert_eq!(vars.get("name").map(String::as_str), Some("Ana"));
    }

    #[test]
    fn test_pair_without_equals_is_an_error() {
        let err = merge(HashMap::new(), &["no-equals".to_string()]).unwrap_err();
        assert!(matches!(err, VarsError::InvalidPair { .. }));
    }
}
