use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use cshare::{
    AssumeYes, ComponentRegistry, Confirm, FsCopyTree, InstallReceipt, Installer, ResolveOutcome,
    TerminalConfirm, default_registry_root, expand_tilde, logging,
};
use std::io;
use std::path::Path;

#[derive(Parser)]
#[command(
    name = "cshare",
    version,
    about = "CLI to share and manage UI components across your organization",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Component registry root (default: the components directory shipped
    /// next to the binary)
    #[arg(long, global = true)]
    registry: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Enable verbose output
    #[arg(short = 'v', long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a component to your project
    Add {
        /// Name of the component to add
        component_name: String,

        /// Destination directory
        #[arg(short = 'd', long, default_value = "./components")]
        destination: String,

        /// Answer yes to every prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all available components
    List,

    /// Generate shell completion scripts
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init_tracing(cli.verbose);

    if cli.no_color {
        colored::control::set_override(false);
    }

    let registry_root = cli
        .registry
        .as_deref()
        .map(expand_tilde)
        .unwrap_or_else(default_registry_root);
    let registry = ComponentRegistry::new(registry_root);

    match cli.command {
        Commands::Add {
            component_name,
            destination,
            yes,
        } => run_add(&registry, &component_name, &destination, yes),
        Commands::List => run_list(&registry),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "cshare", &mut io::stdout());
            Ok(())
        }
    }
}

fn run_add(registry: &ComponentRegistry, name: &str, destination: &str, yes: bool) -> Result<()> {
    let entry = match registry.resolve(name)? {
        ResolveOutcome::Found(entry) => entry,
        ResolveOutcome::NotFound { available } => {
            eprintln!(
                "{}",
                format!("Component {name} not found in the library.").red()
            );
            eprintln!("\n{}", "Available components:".yellow());
            for comp in &available {
                eprintln!("{}", format!("- {comp}").green());
            }
            std::process::exit(1);
        }
    };

    let destination_root = expand_tilde(destination);
    let receipt = if yes {
        install(registry, entry, &destination_root, AssumeYes)?
    } else {
        install(registry, entry, &destination_root, TerminalConfirm)?
    };

    let Some(receipt) = receipt else {
        println!("{}", "Operation cancelled.".yellow());
        return Ok(());
    };

    println!("{}", success_message(name, &receipt).green());
    println!("\nUsage:");
    println!("{}", receipt.import_hint.cyan());
    println!(
        "{}",
        "\nYou can now modify the component to fit your needs!".green()
    );

    Ok(())
}

fn success_message(name: &str, receipt: &InstallReceipt) -> String {
    let files = if receipt.files_copied == 1 { "file" } else { "files" };
    format!(
        "✅ Component {} added successfully to {} ({} {} copied)",
        name.bold(),
        receipt.dest_dir.display(),
        receipt.files_copied,
        files
    )
}

fn install<C: Confirm>(
    registry: &ComponentRegistry,
    entry: cshare::ComponentEntry,
    destination_root: &Path,
    confirm: C,
) -> Result<Option<InstallReceipt>> {
    tracing::debug!(
        registry = %registry.root().display(),
        component = %entry.name,
        "installing to {}",
        destination_root.display()
    );

    let mut installer = Installer::new(confirm, FsCopyTree);
    if !installer.ensure_destination_root(destination_root)? {
        return Ok(None);
    }
    let Some(plan) = installer.plan_install(entry, destination_root)? else {
        return Ok(None);
    };
    installer.execute(&plan).map(Some)
}

fn run_list(registry: &ComponentRegistry) -> Result<()> {
    let entries = registry.list()?;

    println!("{}", "Available components:".yellow());
    for entry in &entries {
        let line = if entry.description.is_empty() {
            format!("- {}", entry.name)
        } else {
            format!("- {}: {}", entry.name, entry.description)
        };
        println!("{}", line.green());
    }

    Ok(())
}
