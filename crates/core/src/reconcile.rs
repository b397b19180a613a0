// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::canonical::{canonicalize, canonicalize_remote};
use crate::diff::diff;
use crate::error::CoreError;
use crate::lookup::{CategoryIndex, local_users};
use crate::resolve::resolve_members;
use crate::validation::validate_unique_members;
use groupsync_domain::{CategorizedGroups, GroupSet, OperationsPlan, RawGroupMap};
use time::Date;
use tracing::{debug, info};

/// The outcome of a successful reconciliation run.
///
/// Every stage's output is kept so callers can inspect what the plan was
/// computed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    /// The canonical, resolved local groups.
    pub local: GroupSet,
    /// The canonical remote groups.
    pub remote: GroupSet,
    /// Classification of entry names for directory placement.
    pub index: CategoryIndex,
    /// The changes to apply.
    pub plan: OperationsPlan,
}

impl Reconciliation {
    /// Every user referenced by the local groups.
    #[must_use]
    pub fn users(&self) -> Vec<String> {
        local_users(&self.local)
    }
}

/// Runs the full pipeline: resolve, canonicalize, validate, diff.
///
/// Each stage builds a fresh structure from the previous one; the inputs are
/// never modified. Either a complete plan is produced or nothing is.
///
/// # Arguments
///
/// * `local` - The local declarations, by category
/// * `remote` - The groups observed in the directory
/// * `today` - The reference date for time-gated members
///
/// # Errors
///
/// Returns an error if:
/// - A member entry is malformed
/// - A group name is declared in two categories
/// - A local group repeats a member
/// - A managed attribute carries a value of the wrong shape
pub fn reconcile(
    local: &CategorizedGroups,
    remote: &RawGroupMap,
    today: Date,
) -> Result<Reconciliation, CoreError> {
    info!(
        local_groups = local.group_count(),
        remote_groups = remote.len(),
        %today,
        "Reconciling groups"
    );

    let resolved: CategorizedGroups = resolve_members(local, today)?;
    let local_set: GroupSet = canonicalize(&resolved)?;
    debug!(groups = ?local_set, "Canonical local groups");

    validate_unique_members(&local_set)?;

    let remote_set: GroupSet = canonicalize_remote(remote)?;
    debug!(groups = ?remote_set, "Canonical remote groups");

    let plan: OperationsPlan = diff(&local_set, &remote_set);

    Ok(Reconciliation {
        local: local_set,
        remote: remote_set,
        index: CategoryIndex::new(&resolved),
        plan,
    })
}
