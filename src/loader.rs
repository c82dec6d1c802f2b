//! Loading transition tables from rule files.

use crate::parser::parse;
use crate::types::{MachineError, TransitionTable};
use std::fs;
use std::path::{Path, PathBuf};

/// `RulesLoader` reads transition rule text from files and directories.
/// Rule files carry the `.rules` extension; anything else is skipped when
/// scanning a directory.
pub struct RulesLoader;

impl RulesLoader {
    /// Loads and parses a single rule file.
    ///
    /// # Returns
    ///
    /// * `Ok(TransitionTable)` on a readable, valid file.
    /// * `Err(MachineError::File)` if the file cannot be read.
    /// * `Err(MachineError::Parse)` if the content is not valid rule text.
    pub fn load_table(path: &Path) -> Result<TransitionTable, MachineError> {
        let content = fs::read_to_string(path).map_err(|e| {
            MachineError::File(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        Ok(parse(&content)?)
    }

    /// Parses rule text that is already in memory, e.g. from user input.
    pub fn load_table_from_string(content: &str) -> Result<TransitionTable, MachineError> {
        Ok(parse(content)?)
    }

    /// Loads every `.rules` file in a directory.
    ///
    /// Each element of the returned vector is the outcome for one file:
    /// its path and table on success, or the error that file produced.
    /// Subdirectories and files with other extensions are skipped.
    pub fn load_tables(
        directory: &Path,
    ) -> Vec<Result<(PathBuf, TransitionTable), MachineError>> {
        if !directory.exists() {
            return vec![Err(MachineError::File(format!(
                "Directory {} does not exist",
                directory.display()
            )))];
        }

        let entries = match fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(e) => {
                return vec![Err(MachineError::File(format!(
                    "Failed to read directory {}: {}",
                    directory.display(),
                    e
                )))]
            }
        };

        entries
            .filter_map(|entry| {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        return Some(Err(MachineError::File(format!(
                            "Failed to read directory entry: {}",
                            e
                        ))))
                    }
                };

                let path = entry.path();

                if path.is_dir() || path.extension().is_none_or(|ext| ext != "rules") {
                    return None;
                }

                match Self::load_table(&path) {
                    Ok(table) => Some(Ok((path, table))),
                    Err(e) => Some(Err(MachineError::File(format!(
                        "Failed to load rules from {}: {}",
                        path.display(),
                        e
                    )))),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_load_valid_rule_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("flip.rules");

        let content = "(q0, 1) -> (q0, 0, R)\n(q0, b) -> (halt-accept, b, S)";
        let mut file = File::create(&file_path).unwrap();
        file.write_all(content.as_bytes()).unwrap();

        let table = RulesLoader::load_table(&file_path).unwrap();
        assert_eq!(table.len(), 2);
        assert!(table.contains("q0", '1'));
        assert!(table.contains("q0", 'b'));
    }

    #[test]
    fn test_load_invalid_rule_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("broken.rules");

        let mut file = File::create(&file_path).unwrap();
        file.write_all(b"this is not a rule").unwrap();

        let result = RulesLoader::load_table(&file_path);
        assert!(matches!(result, Err(MachineError::Parse(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let result = RulesLoader::load_table(&dir.path().join("nope.rules"));
        assert!(matches!(result, Err(MachineError::File(_))));
    }

    #[test]
    fn test_load_tables_from_directory() {
        let dir = tempdir().unwrap();

        let valid_path = dir.path().join("valid.rules");
        let mut valid_file = File::create(&valid_path).unwrap();
        valid_file
            .write_all(b"(q0, 1) -> (q1, 0, R)")
            .unwrap();

        let invalid_path = dir.path().join("invalid.rules");
        let mut invalid_file = File::create(&invalid_path).unwrap();
        invalid_file.write_all(b"not a rule").unwrap();

        // Wrong extension, should be skipped entirely.
        let ignored_path = dir.path().join("notes.txt");
        let mut ignored_file = File::create(&ignored_path).unwrap();
        ignored_file.write_all(b"ignore me").unwrap();

        let results = RulesLoader::load_tables(dir.path());
        assert_eq!(results.len(), 2);

        let successes = results.iter().filter(|r| r.is_ok()).count();
        let failures = results.iter().filter(|r| r.is_err()).count();
        assert_eq!(successes, 1);
        assert_eq!(failures, 1);
    }

    #[test]
    fn test_load_tables_from_missing_directory() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("absent");

        let results = RulesLoader::load_tables(&missing);
        assert_eq!(results.len(), 1);
        assert!(results[0].is_err());
    }
}
