// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use color_eyre::{
    Result,
    eyre::{Context, eyre},
};
use groupsync::{Reconciliation, reconcile};
use groupsync_config::{Config, load_local_state};
use groupsync_domain::{CategorizedGroups, OperationsPlan, RawGroupMap};
use groupsync_executor::{
    DirectoryClient, DirectoryLayout, ExecutionReport, Executor, SnapshotDirectory, verify_users,
};
use time::Date;
use tracing::{info, warn};

/// Loads local and remote state and computes the operations plan.
///
/// # Errors
///
/// Returns an error if no tree base is configured, either side cannot be
/// loaded or the local declarations are invalid. No directory mutation has
/// happened yet.
pub fn plan(config: &Config, directory: &SnapshotDirectory, today: Date) -> Result<Reconciliation> {
    let layout: DirectoryLayout = layout(config)?;
    let local: CategorizedGroups = load_local_state(&config.local_state_root).wrap_err_with(|| {
        format!(
            "Failed to load local state from {}",
            config.local_state_root.display()
        )
    })?;
    let remote: RawGroupMap = directory
        .list_groups(&layout)
        .wrap_err("Failed to list remote groups")?;

    reconcile(&local, &remote, today).wrap_err("Reconciliation failed")
}

/// Checks that every locally referenced user exists in the directory.
///
/// # Errors
///
/// Returns an error if no tree base is configured or a user is missing.
pub fn verify(
    config: &Config,
    directory: &SnapshotDirectory,
    reconciliation: &Reconciliation,
) -> Result<()> {
    let layout: DirectoryLayout = layout(config)?;
    verify_users(directory, &layout, &reconciliation.users())
        .wrap_err("User verification failed")
}

/// Writes the plan to stdout as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if the plan cannot be serialized.
pub fn print_plan(plan: &OperationsPlan) -> Result<()> {
    let json: String = serde_json::to_string_pretty(plan).wrap_err("Failed to render plan")?;
    println!("{json}");
    Ok(())
}

/// Applies a computed plan to the directory.
///
/// # Errors
///
/// Returns an error if no tree base is configured or the directory rejects
/// an operation.
pub fn apply(
    config: &Config,
    directory: &mut SnapshotDirectory,
    reconciliation: &Reconciliation,
) -> Result<ExecutionReport> {
    if reconciliation.plan.is_empty() {
        info!("Directory already matches local state");
        return Ok(ExecutionReport::default());
    }

    let layout: DirectoryLayout = layout(config)?;
    let mut executor: Executor<'_, SnapshotDirectory> = Executor::new(
        directory,
        &layout,
        &reconciliation.index,
        config.settle_delay,
    );
    let report: ExecutionReport = executor
        .apply(&reconciliation.plan)
        .wrap_err("Failed to apply plan")?;

    for name in &report.not_found {
        warn!(group = %name, "Group was not deleted because it could not be found");
    }
    Ok(report)
}

fn layout(config: &Config) -> Result<DirectoryLayout> {
    config
        .tree_base
        .as_deref()
        .map(DirectoryLayout::new)
        .ok_or_else(|| eyre!("No tree base configured; set AG_TREEBASE or pass --tree-base"))
}
