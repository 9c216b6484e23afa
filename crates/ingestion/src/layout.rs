//! Directory layout of the trade archive.
//!
//! ```text
//! <root>/<market>/<month>/<file>
//! ```
//!
//! Market and month names are directory names; hidden entries (leading
//! `.`) are ignored at both levels. Every regular file inside a month
//! directory is a candidate trade file.

use moves_core::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// Visible subdirectory names of `dir`, sorted.
fn visible_subdirs(dir: &Path) -> std::io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.path().is_dir() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            warn!(path = %entry.path().display(), "Skipping non UTF-8 directory name");
            continue;
        };
        if !is_hidden(&name) {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}

/// List market names under the archive root.
///
/// An unreadable root is fatal.
pub fn list_markets(root: &Path) -> Result<Vec<String>> {
    Ok(visible_subdirs(root)?)
}

/// Collect every candidate trade file of one market.
///
/// Unreadable market or month directories are logged and contribute no
/// files; the caller sees an empty list rather than an error.
pub fn market_file_paths(root: &Path, market: &str) -> Vec<PathBuf> {
    let market_dir = root.join(market);
    let months = match visible_subdirs(&market_dir) {
        Ok(months) => months,
        Err(e) => {
            warn!(market, path = %market_dir.display(), error = %e, "Market directory could not be read");
            return Vec::new();
        }
    };

    let mut files = Vec::new();
    for month in months {
        let month_dir = market_dir.join(&month);
        let entries = match fs::read_dir(&month_dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(market, month = %month, error = %e, "Month directory could not be read");
                continue;
            }
        };

        let mut month_files: Vec<PathBuf> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_file())
            .collect();
        month_files.sort();
        files.extend(month_files);
    }

    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "date,price,amount\n").unwrap();
    }

    #[test]
    fn test_list_markets_skips_hidden_and_files() {
        let root = TempDir::new().unwrap();
        fs::create_dir(root.path().join("BTC-LTC")).unwrap();
        fs::create_dir(root.path().join("BTC-ETH")).unwrap();
        fs::create_dir(root.path().join(".git")).unwrap();
        fs::write(root.path().join("README"), "x").unwrap();

        let markets = list_markets(root.path()).unwrap();
        assert_eq!(markets, vec!["BTC-ETH".to_string(), "BTC-LTC".to_string()]);
    }

    #[test]
    fn test_list_markets_missing_root_is_error() {
        let root = TempDir::new().unwrap();
        assert!(list_markets(&root.path().join("nope")).is_err());
    }

    #[test]
    fn test_market_file_paths_walks_months() {
        let root = TempDir::new().unwrap();
        let market = root.path().join("BTC-LTC");
        touch(&market.join("2018-01").join("a.csv"));
        touch(&market.join("2018-01").join("b.csv"));
        touch(&market.join("2018-02").join("c.csv"));
        touch(&market.join(".cache").join("hidden.csv"));

        let files = market_file_paths(root.path(), "BTC-LTC");
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a.csv", "b.csv", "c.csv"]);
    }

    #[test]
    fn test_market_file_paths_unreadable_market_is_empty() {
        let root = TempDir::new().unwrap();
        assert!(market_file_paths(root.path(), "MISSING").is_empty());
    }
}
