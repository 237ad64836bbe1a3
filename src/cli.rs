use clap::{Args, Parser, Subcommand};

use crate::printer::Verbosity;

#[derive(Parser, Debug)]
#[command(
    name = "myxa",
    about = "Myxa CLI: compatibility-aware package manager",
    version,
    long_about = None
)]
pub struct Cli {
    #[command(flatten)]
    pub verbosity: VerbosityArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone, Copy)]
pub struct VerbosityArgs {
    /// Print informational diagnostics.
    #[arg(long, global = true, overrides_with = "no_info")]
    pub info: bool,
    /// Suppress informational diagnostics.
    #[arg(long, global = true, overrides_with = "info")]
    pub no_info: bool,
    /// Print debug diagnostics and full error reports.
    #[arg(long, global = true, overrides_with = "no_debug")]
    pub debug: bool,
    /// Suppress debug diagnostics.
    #[arg(long, global = true, overrides_with = "debug")]
    pub no_debug: bool,
}

impl VerbosityArgs {
    pub fn level(&self) -> Verbosity {
        if self.debug {
            Verbosity::Debug
        } else if self.info {
            Verbosity::Info
        } else {
            Verbosity::Quiet
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new package.
    Init(InitArgs),
    /// Print information about the package.
    #[command(visible_alias = "show")]
    Info(InfoArgs),
    /// Add a dependency to the package.
    Add(AddArgs),
    /// Remove a dependency from the package.
    Remove(RemoveArgs),
    /// Lock the package dependencies.
    Lock(LockArgs),
    /// Remove the package lock.
    Unlock(UnlockArgs),
    /// Update all dependencies to the latest compatible versions.
    Update(UpdateArgs),
    /// Check the package for compatibility breaks.
    Check(CheckArgs),
    /// Show all interface changes since a published version.
    Diff(DiffArgs),
    /// Publish the package to the index.
    Publish(PublishArgs),
    /// Yank a published version from the index.
    Yank(YankArgs),
    /// List packages published to the index.
    Index(IndexArgs),
    /// Set the package version.
    Version(VersionArgs),
}

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Package name.
    #[arg(long)]
    pub name: String,
    /// Package description.
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Show a published version instead of the local package.
    #[arg(long, value_name = "VERSION")]
    pub version: Option<String>,
    /// Show the dependency list.
    #[arg(long, overrides_with = "no_deps")]
    pub show_deps: bool,
    /// Hide the dependency list.
    #[arg(long = "no-deps", overrides_with = "show_deps")]
    pub no_deps: bool,
    /// Show the locked dependencies.
    #[arg(long, overrides_with = "no_lock")]
    pub show_lock: bool,
    /// Hide the locked dependencies.
    #[arg(long = "no-lock", overrides_with = "show_lock")]
    pub no_lock: bool,
    /// Show the package interface.
    #[arg(long, alias = "show-interface", overrides_with = "no_members")]
    pub show_members: bool,
    /// Hide the package interface.
    #[arg(long = "no-members", alias = "no-interface", overrides_with = "show_members")]
    pub no_members: bool,
}

impl InfoArgs {
    pub fn show_deps(&self) -> bool {
        !self.no_deps
    }

    pub fn show_lock(&self) -> bool {
        !self.no_lock
    }

    pub fn show_members(&self) -> bool {
        !self.no_members
    }
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Name of the dependency to add.
    #[arg(value_name = "DEP_NAME")]
    pub dep_name: String,
    /// Require a specific version instead of the latest published one.
    #[arg(long, value_name = "VERSION")]
    pub version: Option<String>,
}

#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Name of the dependency to remove.
    #[arg(value_name = "DEP_NAME")]
    pub dep_name: String,
}

#[derive(Args, Debug)]
pub struct LockArgs {}

#[derive(Args, Debug)]
pub struct UnlockArgs {}

#[derive(Args, Debug)]
pub struct UpdateArgs {}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Compare against this published version instead of the latest.
    #[arg(long, value_name = "VERSION")]
    pub version: Option<String>,
}

#[derive(Args, Debug)]
pub struct DiffArgs {
    /// Compare against this published version instead of the latest.
    #[arg(long, value_name = "VERSION")]
    pub version: Option<String>,
}

#[derive(Args, Debug)]
pub struct PublishArgs {
    /// Force a major version bump even without breaking changes.
    #[arg(long)]
    pub major: bool,
    /// Ask for confirmation before publishing.
    #[arg(long, overrides_with = "no_interactive")]
    pub interactive: bool,
    /// Publish without asking for confirmation.
    #[arg(long, overrides_with = "interactive")]
    pub no_interactive: bool,
}

impl PublishArgs {
    pub fn interactive(&self) -> bool {
        !self.no_interactive
    }
}

#[derive(Args, Debug)]
pub struct YankArgs {
    /// Version to yank from the index.
    #[arg(value_name = "VERSION")]
    pub version: String,
}

#[derive(Args, Debug)]
pub struct IndexArgs {
    /// Only list this package's namespace.
    #[arg(long, value_name = "PACKAGE")]
    pub package: Option<String>,
    /// Show published versions under each namespace.
    #[arg(long, overrides_with = "no_versions")]
    pub show_versions: bool,
    /// Hide published versions.
    #[arg(long = "no-versions", overrides_with = "show_versions")]
    pub no_versions: bool,
}

impl IndexArgs {
    pub fn show_versions(&self) -> bool {
        !self.no_versions
    }
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Version to record in the package file.
    #[arg(value_name = "VERSION")]
    pub version: String,
}
