//! Command line surface for the installer.
//!
//! ```bash
//! juicer install              # install the latest release as "latest"
//! juicer install 20200101     # store the download as version 20200101
//! juicer uninstall 20200101
//! juicer list --json
//! ```

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

use juicer_core::install::{DownloadProgress, VersionResolver};
use juicer_core::{ClosureCompilerInstaller, Installable, Settings};

/// Google Closure Compiler installer.
#[derive(Parser, Debug)]
#[command(
    name = "juicer",
    version,
    about = "Installs the Google Closure Compiler",
    after_help = "\
ENVIRONMENT VARIABLES:
    JUICER_HOME     Install root (default: ~/.juicer)
    RUST_LOG        Log filter (default: juicer=info)"
)]
pub struct Cli {
    /// Install root, overriding JUICER_HOME.
    #[arg(long, global = true, value_name = "DIR")]
    pub home: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download the Closure Compiler and install it as VERSION.
    ///
    /// The newest release is always downloaded; VERSION only names the
    /// install location and defaults to "latest".
    Install(VersionArgs),

    /// Remove an installed version.
    Uninstall(VersionArgs),

    /// List installed versions.
    List(ListArgs),
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Version token (e.g. "20200101"); defaults to "latest".
    pub version: Option<String>,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Print the installed versions as JSON.
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Environment settings with the `--home` override applied.
    pub fn settings(&self) -> Settings {
        match &self.home {
            Some(home) => Settings::with_install_root(home),
            None => Settings::from_env(),
        }
    }
}

/// Runs the selected subcommand.
pub async fn execute(cli: Cli) -> Result<()> {
    let settings = cli.settings();
    debug!("Install root: {}", settings.install_root.display());
    let installer = ClosureCompilerInstaller::new(&settings);

    match cli.command {
        Commands::Install(args) => install(&installer, args.version.as_deref()).await,
        Commands::Uninstall(args) => uninstall(&installer, args.version.as_deref()).await,
        Commands::List(args) => list(&installer, args.json),
    }
}

fn report_progress(progress: DownloadProgress) {
    if let Some(percent) = progress.percent {
        debug!("Download progress: {:.1}%", percent);
    } else {
        debug!("Downloaded {} bytes", progress.bytes_downloaded);
    }
}

async fn install(installer: &impl Installable, version: Option<&str>) -> Result<()> {
    let version = installer
        .install(version, &report_progress)
        .await
        .with_context(|| format!("Failed to install {}", installer.display_name()))?;

    println!(
        "{} {} installed to {}",
        installer.display_name(),
        version,
        installer.layout().artifact_path(&version).display()
    );
    if let Some(note) = placeholder_note(installer, &version) {
        println!("{}", note);
    }
    Ok(())
}

/// Hint printed when `version` is the placeholder name, not a release number.
fn placeholder_note(installer: &impl Installable, version: &str) -> Option<String> {
    VersionResolver::is_sentinel(version).then(|| {
        format!(
            "Note: \"{}\" is a placeholder name. Pass a release number to keep several versions; see {}",
            version,
            installer.website()
        )
    })
}

async fn uninstall(installer: &impl Installable, version: Option<&str>) -> Result<()> {
    let version = installer
        .uninstall(version)
        .await
        .with_context(|| format!("Failed to uninstall {}", installer.display_name()))?;

    println!("{} {} uninstalled.", installer.display_name(), version);
    Ok(())
}

fn list(installer: &impl Installable, json: bool) -> Result<()> {
    let installed = installer
        .installed_versions()
        .context("Failed to read installed versions")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&installed)?);
        return Ok(());
    }

    if installed.is_empty() {
        println!("No {} versions installed.", installer.display_name());
        println!();
        println!("Run 'juicer install' to install the latest release.");
        println!("Releases: {}", installer.website());
        return Ok(());
    }

    println!(
        "Installed {} versions ({}):",
        installer.display_name(),
        installer.layout().tool_dir().display()
    );
    for entry in &installed {
        println!("  {}", entry.version);
    }
    Ok(())
}
