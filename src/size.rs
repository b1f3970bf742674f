use std::path::Path;

use tracing::debug;
use walkdir::WalkDir;

/// Total size in bytes of every regular file under `directory`.
///
/// Symlinks are never followed, including `directory` itself: a symlink
/// contributes nothing. Unreadable entries are skipped, and a missing
/// directory sizes to 0.
pub fn directory_size(directory: &Path) -> u64 {
    let mut total = 0u64;
    for entry in WalkDir::new(directory).follow_links(false).follow_root_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                debug!("Skipping {:?} while sizing: {}", err.path(), err);
                continue;
            }
        };

        if entry.file_type().is_file() {
            match entry.metadata() {
                Ok(metadata) => {
                    total = total.saturating_add(metadata.len());
                }
                Err(err) => {
                    debug!("Skipping {}: {}", entry.path().display(), err);
                }
            }
        }
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn sums_nested_regular_files() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("a"), vec![0u8; 100]).unwrap();
        fs::create_dir_all(temp.path().join("x/y")).unwrap();
        fs::write(temp.path().join("x/b"), vec![0u8; 20]).unwrap();
        fs::write(temp.path().join("x/y/c"), vec![0u8; 3]).unwrap();

        assert_eq!(directory_size(temp.path()), 123);
    }

    #[test]
    fn missing_and_empty_directories_are_zero() {
        let temp = tempfile::tempdir().unwrap();
        assert_eq!(directory_size(temp.path()), 0);
        assert_eq!(directory_size(&temp.path().join("absent")), 0);
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_directories_are_not_followed() {
        let temp = tempfile::tempdir().unwrap();
        let outside = temp.path().join("outside");
        fs::create_dir(&outside).unwrap();
        fs::write(outside.join("big"), vec![0u8; 4096]).unwrap();

        let measured = temp.path().join("measured");
        fs::create_dir(&measured).unwrap();
        fs::write(measured.join("small"), vec![0u8; 7]).unwrap();
        std::os::unix::fs::symlink(&outside, measured.join("link")).unwrap();
        std::os::unix::fs::symlink(measured.join("small"), measured.join("small-link")).unwrap();

        assert_eq!(directory_size(&measured), 7);
    }
}
