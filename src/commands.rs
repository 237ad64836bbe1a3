use std::path::PathBuf;
use std::process::ExitCode;

use crate::cli::{Cli, Commands};
use crate::errors::{Error, UserError};
use crate::index::Index;
use crate::manager::Manager;
use crate::paths;
use crate::printer::{Printer, Verbosity};
use crate::version::Version;

/// Run one command to completion. User errors become a styled message and
/// a failing exit code; under --debug they propagate as a full report
/// instead. Internal errors stay opaque unless --debug is set.
pub fn execute(cli: Cli) -> color_eyre::Result<ExitCode> {
    let manager = Manager::new(Printer::new(cli.verbosity.level()));
    match run(&manager, cli.command) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(Error::User(err)) => {
            manager.printer().print_error(&err.to_string());
            if manager.printer().verbosity() >= Verbosity::Debug {
                return Err(err.into());
            }
            Ok(ExitCode::FAILURE)
        }
        Err(Error::Internal(err)) => {
            if manager.printer().verbosity() >= Verbosity::Debug {
                return Err(err.into());
            }
            manager
                .printer()
                .print_error("myxa hit an internal error; re-run with --debug for a full report");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn run(manager: &Manager, command: Commands) -> Result<(), Error> {
    match command {
        Commands::Init(args) => {
            manager.init(&paths::package_filepath(), &args.name, args.description)
        }
        Commands::Info(args) => {
            let package = manager.load_package(&paths::package_filepath())?;
            let index = load_index(manager)?;
            let version = parse_version_opt(args.version.as_deref())?;
            manager.info(
                &package,
                &index,
                version,
                args.show_deps(),
                args.show_lock(),
                args.show_members(),
            )
        }
        Commands::Add(args) => {
            let package_filepath = paths::package_filepath();
            let mut package = manager.load_package(&package_filepath)?;
            let index = load_index(manager)?;
            let version = parse_version_opt(args.version.as_deref())?;
            manager.add(&mut package, &args.dep_name, &index, version)?;
            manager.save_package(&package, &package_filepath)
        }
        Commands::Remove(args) => {
            let package_filepath = paths::package_filepath();
            let mut package = manager.load_package(&package_filepath)?;
            manager.remove(&mut package, &args.dep_name)?;
            manager.save_package(&package, &package_filepath)
        }
        Commands::Lock(_) => {
            let package_filepath = paths::package_filepath();
            let mut package = manager.load_package(&package_filepath)?;
            let index = load_index(manager)?;
            manager.lock(&mut package, &index)?;
            manager.save_package(&package, &package_filepath)
        }
        Commands::Unlock(_) => {
            let package_filepath = paths::package_filepath();
            let mut package = manager.load_package(&package_filepath)?;
            manager.unlock(&mut package)?;
            manager.save_package(&package, &package_filepath)
        }
        Commands::Update(_) => {
            let package_filepath = paths::package_filepath();
            let mut package = manager.load_package(&package_filepath)?;
            let index = load_index(manager)?;
            manager.update(&mut package, &index)?;
            manager.save_package(&package, &package_filepath)
        }
        Commands::Check(args) => {
            let package = manager.load_package(&paths::package_filepath())?;
            let index = load_index(manager)?;
            let version = parse_version_opt(args.version.as_deref())?;
            manager.check(&package, &index, version)
        }
        Commands::Diff(args) => {
            let package = manager.load_package(&paths::package_filepath())?;
            let index = load_index(manager)?;
            let version = parse_version_opt(args.version.as_deref())?;
            manager.diff(&package, &index, version)
        }
        Commands::Publish(args) => {
            let package_filepath = paths::package_filepath();
            let mut package = manager.load_package(&package_filepath)?;
            let (index_filepath, mut index) = load_index_with_path(manager)?;
            manager.publish(&mut package, &mut index, args.interactive(), args.major)?;
            manager.save_index(&index, &index_filepath)?;
            manager.save_package(&package, &package_filepath)
        }
        Commands::Yank(args) => {
            let version: Version = args.version.parse()?;
            let package = manager.load_package(&paths::package_filepath())?;
            let (index_filepath, mut index) = load_index_with_path(manager)?;
            manager.yank(&package, version, &mut index)?;
            manager.save_index(&index, &index_filepath)
        }
        Commands::Index(args) => {
            let index = load_index(manager)?;
            manager.index_info(&index, args.package.as_deref(), args.show_versions())
        }
        Commands::Version(args) => {
            let version: Version = args.version.parse()?;
            let package_filepath = paths::package_filepath();
            let mut package = manager.load_package(&package_filepath)?;
            manager.set_version(&mut package, version);
            manager.save_package(&package, &package_filepath)
        }
    }
}

fn load_index(manager: &Manager) -> Result<Index, Error> {
    Ok(load_index_with_path(manager)?.1)
}

/// Load the index, seeding an empty "primary" index on first use.
fn load_index_with_path(manager: &Manager) -> Result<(PathBuf, Index), Error> {
    let path = paths::index_filepath()?;
    if !path.exists() {
        manager.save_index(&Index::new("primary"), &path)?;
    }
    let index = manager.load_index(&path)?;
    Ok((path, index))
}

fn parse_version_opt(version: Option<&str>) -> Result<Option<Version>, UserError> {
    version.map(str::parse).transpose()
}
