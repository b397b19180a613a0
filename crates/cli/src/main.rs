// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod commands;

use clap::{Arg, ArgAction, Parser, Subcommand};
use color_eyre::{Result, eyre::Context};
use groupsync::Reconciliation;
use groupsync_config::Config;
use groupsync_executor::SnapshotDirectory;
use std::path::PathBuf;
use std::time::Duration;
use time::{Date, OffsetDateTime};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    color_eyre::install()?;
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = args.run() {
        error!("{err:#}");
        std::process::exit(1);
    }
    Ok(())
}

/// `LOG_LEVEL` wins over `RUST_LOG`; both fall back to `info`.
fn env_filter() -> EnvFilter {
    std::env::var("LOG_LEVEL")
        .ok()
        .and_then(|level| EnvFilter::try_new(level).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Groupmanager - converges directory groups to their local declarations
#[derive(Debug, Parser)]
#[command(
    name = "groupmanager",
    author,
    version,
    about,
    long_about = None,
    disable_version_flag = true,
    arg = version_flag()
)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Check that every user referenced locally exists in the directory
    #[arg(long, global = true)]
    verify_users: bool,

    /// Root of the local state tree. Overrides `AG_LOCAL_STATE`.
    #[arg(long, global = true, value_name = "DIR")]
    local_state: Option<PathBuf>,

    /// Snapshot file holding the directory
    #[arg(long, global = true, value_name = "FILE", default_value = "directory.yaml")]
    directory: PathBuf,

    /// Base DN of the managed tree. Overrides `AG_TREEBASE`.
    #[arg(long, global = true, value_name = "DN")]
    tree_base: Option<String>,

    /// Seconds to wait between creating and modifying groups. Overrides `AG_SETTLE_SLEEP`.
    #[arg(long, global = true, value_name = "SECS")]
    settle_delay: Option<u64>,

    /// Reference date for time-gated members. Defaults to today (UTC).
    #[arg(long, global = true, value_name = "YYYY-MM-DD", value_parser = parse_today)]
    today: Option<Date>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Subcommand)]
enum Command {
    /// Print the operations needed to converge the directory, as JSON
    Diff,

    /// Apply the operations to the directory
    Apply,
}

impl Args {
    fn run(self) -> Result<()> {
        let config: Config = self.config()?;
        let today: Date = self
            .today
            .unwrap_or_else(|| OffsetDateTime::now_utc().date());
        info!(?config, %today, command = ?self.command, "Starting groupmanager");

        let mut directory: SnapshotDirectory = SnapshotDirectory::load(&self.directory)
            .wrap_err("Failed to load the directory snapshot")?;
        let reconciliation: Reconciliation = commands::plan(&config, &directory, today)?;

        if self.verify_users {
            commands::verify(&config, &directory, &reconciliation)?;
        }

        match self.command {
            Command::Diff => commands::print_plan(&reconciliation.plan),
            Command::Apply => {
                commands::apply(&config, &mut directory, &reconciliation)?;
                directory
                    .save(&self.directory)
                    .wrap_err("Failed to save the directory snapshot")
            }
        }
    }

    /// Environment configuration with command-line overrides applied.
    fn config(&self) -> Result<Config> {
        let mut config: Config = Config::from_env().wrap_err("Invalid configuration")?;
        if let Some(root) = &self.local_state {
            config.local_state_root.clone_from(root);
        }
        if let Some(tree_base) = &self.tree_base {
            config.tree_base = Some(tree_base.clone());
        }
        if let Some(seconds) = self.settle_delay {
            config.settle_delay = Duration::from_secs(seconds);
        }
        Ok(config)
    }
}

/// `-v` and `--version` print the version; `-V` is kept as an alias.
fn version_flag() -> Arg {
    Arg::new("version")
        .short('v')
        .short_alias('V')
        .long("version")
        .action(ArgAction::Version)
        .help("Print version")
}

fn parse_today(value: &str) -> Result<Date, String> {
    groupsync_domain::parse_date(value).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_parse_flags_and_subcommand() {
        let args: Args = Args::try_parse_from([
            "groupmanager",
            "--verify-users",
            "--local-state",
            "/srv/state",
            "--tree-base",
            "DC=example,DC=com",
            "--settle-delay",
            "0",
            "--today",
            "2026-10-18",
            "apply",
        ])
        .unwrap();

        assert_eq!(args.command, Command::Apply);
        assert!(args.verify_users);
        assert_eq!(args.local_state, Some(PathBuf::from("/srv/state")));
        assert_eq!(args.tree_base.as_deref(), Some("DC=example,DC=com"));
        assert_eq!(args.settle_delay, Some(0));
        assert_eq!(args.today, Some(date!(2026 - 10 - 18)));
        assert_eq!(args.directory, PathBuf::from("directory.yaml"));
    }

    #[test]
    fn test_flags_are_accepted_after_subcommand() {
        let args: Args =
            Args::try_parse_from(["groupmanager", "diff", "--directory", "remote.yaml"]).unwrap();

        assert_eq!(args.command, Command::Diff);
        assert_eq!(args.directory, PathBuf::from("remote.yaml"));
        assert!(!args.verify_users);
    }

    #[test]
    fn test_invalid_today_is_rejected() {
        let result: Result<Args, clap::Error> =
            Args::try_parse_from(["groupmanager", "--today", "18/10/2026", "diff"]);

        assert!(result.is_err());
    }

    #[test]
    fn test_version_flags() {
        for flag in ["-v", "-V", "--version"] {
            let error: clap::Error = Args::try_parse_from(["groupmanager", flag]).unwrap_err();

            assert_eq!(error.kind(), clap::error::ErrorKind::DisplayVersion);
        }
    }

    #[test]
    fn test_subcommand_is_required() {
        let result: Result<Args, clap::Error> = Args::try_parse_from(["groupmanager"]);

        assert!(result.is_err());
    }
}
