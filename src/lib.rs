pub mod installer;
pub mod logging;
pub mod prompt;
pub mod registry;

pub use installer::{CopyTree, FsCopyTree, InstallPlan, InstallReceipt, Installer};
pub use prompt::{AssumeYes, Confirm, TerminalConfirm};
pub use registry::{
    ComponentEntry, ComponentRegistry, ResolveOutcome, default_registry_root, expand_tilde,
};
