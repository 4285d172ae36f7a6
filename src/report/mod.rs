//! Report renderers for similarity groups.
//!
//! - [`terminal`]: summary box, one table per group and a per-percentage
//!   summary; respects `--verbose` / `--quiet`.
//! - [`csv`]: review worksheet with one row per attribute and empty
//!   decision columns for the reviewer.

use std::path::{Path, PathBuf};

use crate::models::Threshold;

pub mod csv;
pub mod terminal;

/// `similarity_<input stem>_<threshold>pct.csv` inside `dir`.
pub fn default_report_path(dir: &Path, input: &Path, threshold: Threshold) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("attributes");
    dir.join(format!("similarity_{}_{}pct.csv", stem, threshold.value()))
}

/// `path` if it is free, otherwise the first free `<stem>_1.<ext>`, `<stem>_2.<ext>`, ...
pub fn unique_path(path: &Path) -> PathBuf {
    if !path.exists() {
        return path.to_path_buf();
    }

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("report")
        .to_string();
    let ext = path.extension().and_then(|e| e.to_str());

    (1..)
        .map(|n| {
            let name = match ext {
                Some(ext) => format!("{}_{}.{}", stem, n, ext),
                None => format!("{}_{}", stem, n),
            };
            path.with_file_name(name)
        })
        .find(|candidate| !candidate.exists())
        .unwrap_or_else(|| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_report_path() {
        let t = Threshold::new(85).unwrap();
        let path = default_report_path(Path::new("out"), Path::new("data/attrs.csv"), t);
        assert_eq!(path, PathBuf::from("out/similarity_attrs_85pct.csv"));
    }

    #[test]
    fn test_unique_path_appends_counter() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("report.csv");
        assert_eq!(unique_path(&base), base);

        std::fs::write(&base, "").unwrap();
        assert_eq!(unique_path(&base), dir.path().join("report_1.csv"));

        std::fs::write(dir.path().join("report_1.csv"), "").unwrap();
        assert_eq!(unique_path(&base), dir.path().join("report_2.csv"));
    }

    #[test]
    fn test_unique_path_without_extension() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("report");
        std::fs::write(&base, "").unwrap();
        assert_eq!(unique_path(&base), dir.path().join("report_1"));
    }
}
