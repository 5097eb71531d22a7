//! Directory scanner for discovering exported draft board sheets

use crate::error::Result;
use crate::loader::SheetFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A sheet export found on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetFile {
    pub path: PathBuf,
    pub format: SheetFormat,
}

/// Result of scanning directories
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    /// Root directories that were scanned
    pub roots: Vec<PathBuf>,
    /// Discovered sheets, sorted by path
    pub sheets: Vec<SheetFile>,
}

impl ScanResult {
    /// Number of sheets found
    pub fn total_files(&self) -> usize {
        self.sheets.len()
    }
}

/// Scan one or more directories for CSV and JSON sheet exports
pub fn scan_directory<P: AsRef<Path>>(roots: &[P]) -> Result<ScanResult> {
    let mut sheets = Vec::new();

    for root in roots {
        for entry in WalkDir::new(root.as_ref())
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if is_hidden(path) {
                continue;
            }
            if let Some(format) = SheetFormat::from_path(path) {
                sheets.push(SheetFile {
                    path: path.to_path_buf(),
                    format,
                });
            }
        }
    }

    sheets.sort_by(|a, b| a.path.cmp(&b.path));
    sheets.dedup_by(|a, b| a.path == b.path);

    Ok(ScanResult {
        roots: roots.iter().map(|r| r.as_ref().to_path_buf()).collect(),
        sheets,
    })
}

/// Dotfiles such as editor backups or roster snapshots are not sheets
fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_scan_finds_csv_and_json() {
        let dir = std::env::temp_dir().join(format!("draft-scan-{}", std::process::id()));
        let nested = dir.join("season4");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.join("board.csv"), "a,b\n").unwrap();
        fs::write(nested.join("week1.json"), "[]").unwrap();
        fs::write(dir.join("notes.txt"), "x").unwrap();
        fs::write(dir.join(".roster.json"), "{}").unwrap();

        let result = scan_directory(&[&dir]).unwrap();
        fs::remove_dir_all(&dir).unwrap();

        assert_eq!(result.total_files(), 2);
        assert_eq!(result.sheets[0].format, SheetFormat::Csv);
        assert_eq!(result.sheets[1].format, SheetFormat::Json);
    }

    #[test]
    fn test_hidden_files() {
        assert!(is_hidden(Path::new("dir/.backup.csv")));
        assert!(!is_hidden(Path::new("dir/board.csv")));
    }
}
