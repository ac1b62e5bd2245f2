use anyhow::{Context, Result};
use dirs::home_dir;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// One installable component: its name is the subdirectory name under the
/// registry root, its files are whatever that subdirectory contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentEntry {
    pub name: String,
    pub source_path: PathBuf,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveOutcome {
    Found(ComponentEntry),
    /// The requested name is not installable; `available` is the full
    /// registry listing so the caller can show valid choices.
    NotFound { available: Vec<String> },
}

/// Optional per-component `metadata.json` record.
#[derive(Debug, Deserialize)]
struct ComponentMetadata {
    #[serde(default)]
    description: String,
}

pub struct ComponentRegistry {
    root: PathBuf,
}

impl ComponentRegistry {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Names of every immediate subdirectory of the registry root, sorted.
    pub fn component_names(&self) -> Result<Vec<String>> {
        let entries = fs::read_dir(&self.root).with_context(|| {
            format!("Failed to read component registry at {}", self.root.display())
        })?;

        let mut names: Vec<String> = entries
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_dir())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        Ok(names)
    }

    /// Case-sensitive lookup of one component. A name that matches no
    /// subdirectory, or a subdirectory with no files in it, is not
    /// installable and resolves to `NotFound`.
    pub fn resolve(&self, name: &str) -> Result<ResolveOutcome> {
        let names = self.component_names()?;
        if !names.iter().any(|n| n == name) {
            return Ok(ResolveOutcome::NotFound { available: names });
        }

        let source_path = self.root.join(name);
        if !contains_any_file(&source_path) {
            tracing::warn!(component = name, "registry entry has no files, treating as missing");
            return Ok(ResolveOutcome::NotFound { available: names });
        }

        Ok(ResolveOutcome::Found(ComponentEntry {
            name: name.to_string(),
            description: read_description(&source_path),
            source_path,
        }))
    }

    /// Every registry entry with its description. An entry whose
    /// `metadata.json` is absent or malformed gets an empty description;
    /// it never fails the listing as a whole.
    pub fn list(&self) -> Result<Vec<ComponentEntry>> {
        let mut entries = Vec::new();
        for name in self.component_names()? {
            let source_path = self.root.join(&name);
            entries.push(ComponentEntry {
                description: read_description(&source_path),
                name,
                source_path,
            });
        }
        Ok(entries)
    }
}

fn read_description(component_dir: &Path) -> String {
    let metadata_path = component_dir.join("metadata.json");
    if !metadata_path.is_file() {
        return String::new();
    }
    match fs::read_to_string(&metadata_path)
        .map_err(anyhow::Error::from)
        .and_then(|raw| serde_json::from_str::<ComponentMetadata>(&raw).map_err(Into::into))
    {
        Ok(metadata) => metadata.description,
        Err(e) => {
            tracing::debug!("Skipping malformed metadata at {}: {e}", metadata_path.display());
            String::new()
        }
    }
}

fn contains_any_file(dir: &Path) -> bool {
    walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .any(|e| e.file_type().is_file())
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

/// The shipped registry lives next to the installed binary. Walking up from
/// the executable also finds the repository copy when run out of target/.
pub fn default_registry_root() -> PathBuf {
    if let Ok(exe) = std::env::current_exe() {
        for dir in exe.ancestors().skip(1) {
            let candidate = dir.join("components");
            if candidate.is_dir() {
                return candidate;
            }
        }
    }
    PathBuf::from("./components")
}
