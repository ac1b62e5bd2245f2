mod copy_tree;

pub use copy_tree::{CopyTree, FsCopyTree};

use crate::prompt::Confirm;
use crate::registry::ComponentEntry;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// A resolved install: where the component's files will land and whether a
/// pre-existing subtree there is being replaced.
#[derive(Debug, Clone)]
pub struct InstallPlan {
    pub entry: ComponentEntry,
    pub dest_dir: PathBuf,
    pub replace_existing: bool,
}

#[derive(Debug, Clone)]
pub struct InstallReceipt {
    pub dest_dir: PathBuf,
    pub files_copied: usize,
    pub import_hint: String,
}

/// Drives the add flow: confirm/create the destination root, resolve the
/// collision policy, copy the files. Both suspension points (the prompts)
/// and the copy itself are injected capabilities.
pub struct Installer<C, T> {
    confirm: C,
    copier: T,
}

impl<C: Confirm, T: CopyTree> Installer<C, T> {
    pub fn new(confirm: C, copier: T) -> Self {
        Self { confirm, copier }
    }

    /// Makes sure the destination root exists. A missing root is only
    /// created after an affirmative answer (default yes); declining aborts
    /// with zero filesystem mutation. Returns whether the flow may proceed.
    pub fn ensure_destination_root(&mut self, root: &Path) -> Result<bool> {
        if root.exists() {
            return Ok(true);
        }

        let create = self.confirm.confirm(
            &format!(
                "Destination directory {} does not exist. Create it?",
                root.display()
            ),
            true,
        )?;
        if !create {
            return Ok(false);
        }

        fs::create_dir_all(root)
            .with_context(|| format!("Failed to create destination directory {}", root.display()))?;
        tracing::info!("created destination directory {}", root.display());
        Ok(true)
    }

    /// Computes the final destination `destination_root/<name>`. An existing
    /// subtree there requires an overwrite confirmation (default no, unlike
    /// directory creation). `None` means the user declined; nothing was
    /// touched.
    pub fn plan_install(
        &mut self,
        entry: ComponentEntry,
        destination_root: &Path,
    ) -> Result<Option<InstallPlan>> {
        let dest_dir = destination_root.join(&entry.name);
        let replace_existing = dest_dir.exists();

        if replace_existing {
            let overwrite = self.confirm.confirm(
                &format!(
                    "Component {} already exists in destination. Overwrite?",
                    entry.name
                ),
                false,
            )?;
            if !overwrite {
                return Ok(None);
            }
        }

        Ok(Some(InstallPlan {
            entry,
            dest_dir,
            replace_existing,
        }))
    }

    /// Materializes the copy. When replacing, the old subtree is removed
    /// first so the result is exactly the registry's files. No rollback on
    /// failure; the error names both paths so the partial state is
    /// diagnosable.
    pub fn execute(&mut self, plan: &InstallPlan) -> Result<InstallReceipt> {
        if plan.replace_existing && plan.dest_dir.exists() {
            fs::remove_dir_all(&plan.dest_dir).with_context(|| {
                format!("Failed to remove existing component at {}", plan.dest_dir.display())
            })?;
        }

        let files_copied = self
            .copier
            .copy_tree(&plan.entry.source_path, &plan.dest_dir)?;

        tracing::info!(
            component = %plan.entry.name,
            files = files_copied,
            "installed to {}",
            plan.dest_dir.display()
        );

        Ok(InstallReceipt {
            import_hint: import_hint(&plan.entry.name, &plan.dest_dir),
            dest_dir: plan.dest_dir.clone(),
            files_copied,
        })
    }
}

/// `import { Button } from './components/Button';` — relative to the
/// working directory when possible, forward slashes always.
fn import_hint(name: &str, dest_dir: &Path) -> String {
    let shown = std::env::current_dir()
        .ok()
        .and_then(|cwd| dest_dir.strip_prefix(&cwd).map(Path::to_path_buf).ok())
        .unwrap_or_else(|| dest_dir.to_path_buf());

    let mut path = shown.to_string_lossy().replace('\\', "/");
    if !path.starts_with('.') && !path.starts_with('/') {
        path = format!("./{path}");
    }
    format!("import {{ {name} }} from '{path}';")
}
