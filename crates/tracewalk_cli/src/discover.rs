//! Finding the most recent log when none is given.

use std::io;
use std::path::{Path, PathBuf};

/// Newest `*.log` file in `dir`
///
/// Recorders name logs after their start time, so files are ordered by the
/// numbers embedded in their names and the greatest one wins.
pub fn newest_log(dir: &Path) -> io::Result<Option<PathBuf>> {
    let mut newest: Option<(Vec<u64>, PathBuf)> = None;
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("log") {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let key = numbers_in(name);
        let newer = newest
            .as_ref()
            .is_none_or(|(best, best_path)| (&key, &path) > (best, best_path));
        if newer {
            newest = Some((key, path));
        }
    }
    Ok(newest.map(|(_, path)| path))
}

fn numbers_in(name: &str) -> Vec<u64> {
    name.split(|c: char| !c.is_ascii_digit())
        .filter(|run| !run.is_empty())
        .map(|run| run.parse().unwrap_or(u64::MAX))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_in() {
        assert_eq!(numbers_in("2024-03-01-09:05:10.log"), vec![2024, 3, 1, 9, 5, 10]);
        assert!(numbers_in("trace.log").is_empty());
    }

    #[test]
    fn test_newest_by_embedded_numbers() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["2024-03-01-9:05:10.log", "2024-03-01-10:00:00.log", "notes.txt"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }
        std::fs::create_dir(dir.path().join("2099.log")).unwrap();

        let newest = newest_log(dir.path()).unwrap().unwrap();
        assert_eq!(newest.file_name().unwrap(), "2024-03-01-10:00:00.log");
    }

    #[test]
    fn test_no_logs() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("readme.md"), b"").unwrap();
        assert_eq!(newest_log(dir.path()).unwrap(), None);
    }
}
