// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Plan computation.
//!
//! The diff is attribute-level: a group whose member list differs gets one
//! modification carrying the complete desired list, never per-member
//! additions or removals.

use groupsync_domain::{AttributeValue, GroupSet, OperationsPlan};
use tracing::{debug, info};

/// Computes the operations that converge `remote` to `local`.
///
/// For every local group:
/// - If it exists remotely, each declared attribute that differs (see
///   [`attributes_equal`]) yields a modification
/// - Otherwise the group is created and every declared attribute yields a
///   modification, including empty ones
///
/// Every remote group absent locally is deleted. A name therefore never
/// appears both in `creates` and `deletes`, nor in `modifies` and
/// `deletes`.
///
/// Both inputs must be canonical.
#[must_use]
pub fn diff(local: &GroupSet, remote: &GroupSet) -> OperationsPlan {
    let mut plan: OperationsPlan = OperationsPlan::new();

    for (name, group) in local.iter() {
        if let Some(existing) = remote.get(name) {
            for (attribute, desired) in group.iter() {
                let current: Option<&AttributeValue> = existing.get(attribute);
                if !attributes_equal(desired, current) {
                    debug!(
                        group = %name,
                        %attribute,
                        local = ?desired,
                        remote = ?current,
                        "Attribute requires change"
                    );
                    plan.push_modify(name.clone(), attribute, desired.clone());
                }
            }
        } else {
            plan.push_create(name.clone());
            for (attribute, desired) in group.iter() {
                plan.push_modify(name.clone(), attribute, desired.clone());
            }
        }
    }

    for name in remote.names().filter(|name| !local.contains(name)) {
        plan.push_delete(name.clone());
    }

    info!(
        creates = plan.creates.len(),
        modifies = plan.modifies.len(),
        deletes = plan.deletes.len(),
        "Computed operations plan"
    );

    plan
}

/// Compares a declared attribute value to the observed one.
///
/// Directories commonly represent "no members" by omitting the attribute,
/// so an empty member list, a null value and an absent value are all
/// equivalent. Everything else is compared structurally; member lists must
/// already be sorted.
#[must_use]
pub fn attributes_equal(local: &AttributeValue, remote: Option<&AttributeValue>) -> bool {
    match remote {
        None => local.is_empty(),
        Some(remote) if local.is_empty() || remote.is_empty() => {
            local.is_empty() && remote.is_empty()
        }
        Some(remote) => local == remote,
    }
}
