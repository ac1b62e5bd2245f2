use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Recursive file copy as an injected capability, so the install flow can
/// be tested against an in-memory fake.
pub trait CopyTree {
    /// Copies every file and subdirectory under `source` into `dest`,
    /// creating `dest` if needed. Returns the number of files copied.
    fn copy_tree(&mut self, source: &Path, dest: &Path) -> Result<usize>;
}

/// Real-filesystem implementation backed by walkdir. No rollback: an I/O
/// failure mid-copy leaves the destination partial and is reported with
/// both paths.
pub struct FsCopyTree;

impl CopyTree for FsCopyTree {
    fn copy_tree(&mut self, source: &Path, dest: &Path) -> Result<usize> {
        let mut copied = 0;

        for entry in WalkDir::new(source).follow_links(true) {
            let entry = entry
                .with_context(|| format!("Failed to walk component source {}", source.display()))?;
            let relative = entry.path().strip_prefix(source).with_context(|| {
                format!(
                    "Walked entry {} is outside source {}",
                    entry.path().display(),
                    source.display()
                )
            })?;
            let target = dest.join(relative);

            if entry.file_type().is_dir() {
                fs::create_dir_all(&target)
                    .with_context(|| format!("Failed to create directory {}", target.display()))?;
            } else {
                fs::copy(entry.path(), &target).with_context(|| {
                    format!(
                        "Failed to copy {} to {}",
                        entry.path().display(),
                        target.display()
                    )
                })?;
                copied += 1;
            }
        }

        tracing::debug!(files = copied, "copied component tree to {}", dest.display());
        Ok(copied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{File, create_dir_all, read_to_string};
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_copies_nested_tree() -> Result<()> {
        let temp_dir = tempdir()?;
        let source = temp_dir.path().join("Button");
        create_dir_all(source.join("styles"))?;
        File::create(source.join("index.tsx"))?.write_all(b"export const Button = 1;")?;
        File::create(source.join("styles/base.css"))?.write_all(b".btn {}")?;

        let dest = temp_dir.path().join("out/Button");
        let copied = FsCopyTree.copy_tree(&source, &dest)?;

        assert_eq!(copied, 2);
        assert_eq!(read_to_string(dest.join("index.tsx"))?, "export const Button = 1;");
        assert_eq!(read_to_string(dest.join("styles/base.css"))?, ".btn {}");
        Ok(())
    }

    #[test]
    fn test_overwrites_existing_files() -> Result<()> {
        let temp_dir = tempdir()?;
        let source = temp_dir.path().join("Card");
        create_dir_all(&source)?;
        File::create(source.join("index.tsx"))?.write_all(b"new")?;

        let dest = temp_dir.path().join("dest");
        create_dir_all(&dest)?;
        File::create(dest.join("index.tsx"))?.write_all(b"old")?;

        FsCopyTree.copy_tree(&source, &dest)?;
        assert_eq!(read_to_string(dest.join("index.tsx"))?, "new");
        Ok(())
    }
}
