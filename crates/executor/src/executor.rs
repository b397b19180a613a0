// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::client::DirectoryClient;
use crate::error::{ExecutorError, Phase};
use crate::layout::DirectoryLayout;
use groupsync::CategoryIndex;
use groupsync_domain::{
    AttributeKey, AttributeValue, EntryCategory, Modification, Operation, OperationKind,
    OperationsPlan,
};
use std::time::Duration;
use tracing::{debug, info, warn};

/// What an execution did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionReport {
    /// Groups created.
    pub created: usize,
    /// Attribute replacements applied.
    pub modified: usize,
    /// Groups deleted.
    pub deleted: usize,
    /// Groups scheduled for deletion that could not be located.
    pub not_found: Vec<String>,
}

/// Drives an operations plan against a directory.
///
/// Phases run strictly in order: every create, then every modify, then
/// every delete. Groups are only ever looked up inside the layout's group
/// containers. The first directory error stops execution.
pub struct Executor<'a, C: DirectoryClient> {
    client: &'a mut C,
    layout: &'a DirectoryLayout,
    index: &'a CategoryIndex,
    settle_delay: Duration,
}

impl<'a, C: DirectoryClient> Executor<'a, C> {
    /// Creates an executor.
    ///
    /// # Arguments
    ///
    /// * `client` - The directory to mutate
    /// * `layout` - Where entries live in the tree
    /// * `index` - Classification of names into categories
    /// * `settle_delay` - Pause between creating groups and modifying them
    pub const fn new(
        client: &'a mut C,
        layout: &'a DirectoryLayout,
        index: &'a CategoryIndex,
        settle_delay: Duration,
    ) -> Self {
        Self {
            client,
            layout,
            index,
            settle_delay,
        }
    }

    /// Applies a plan.
    ///
    /// The plan is checked for operations that would undo each other before
    /// anything is sent to the directory.
    ///
    /// # Errors
    ///
    /// Returns `ExecutorError::ConflictingPlan` if the plan both deletes a
    /// group and creates or modifies it, and `ExecutorError::Directory`
    /// naming the phase and target of the first operation the directory
    /// rejected.
    pub fn apply(
        &mut self,
        plan: &OperationsPlan,
    ) -> Result<ExecutionReport, ExecutorError<C::Error>> {
        let operations: Vec<Operation> = plan.in_execution_order();
        check_consistent::<C::Error>(plan, &operations)?;

        info!(
            creates = plan.creates.len(),
            modifies = plan.modifies.len(),
            deletes = plan.deletes.len(),
            "Applying plan"
        );

        let mut report: ExecutionReport = ExecutionReport::default();
        let mut settled: bool = plan.creates.is_empty() || self.settle_delay.is_zero();

        for operation in &operations {
            if !settled && operation.kind() != OperationKind::Create {
                debug!(delay = ?self.settle_delay, "Waiting for new groups to settle");
                std::thread::sleep(self.settle_delay);
                settled = true;
            }

            match operation {
                Operation::Create { name } => self.create(name, &mut report)?,
                Operation::Modify(modification) => self.modify(modification, &mut report)?,
                Operation::Delete { name } => self.delete(name, &mut report)?,
            }
        }

        info!(
            created = report.created,
            modified = report.modified,
            deleted = report.deleted,
            "Plan applied"
        );
        Ok(report)
    }

    fn create(
        &mut self,
        name: &str,
        report: &mut ExecutionReport,
    ) -> Result<(), ExecutorError<C::Error>> {
        let dn: String = self.dn_of(name);
        debug!(%dn, "Creating group");
        self.client
            .create_group(&dn, name)
            .map_err(|source| directory_error(Phase::Create, &dn, source))?;
        report.created += 1;
        Ok(())
    }

    /// Replaces one attribute, addressing the group where it already lives.
    ///
    /// A group that sits under another category's container is modified in
    /// place rather than at the DN its local category implies.
    fn modify(
        &mut self,
        modification: &Modification,
        report: &mut ExecutionReport,
    ) -> Result<(), ExecutorError<C::Error>> {
        let expected: String = self.dn_of(&modification.group);
        let found: Option<String> = self
            .client
            .find_group(self.layout, &modification.group)
            .map_err(|source| directory_error(Phase::Modify, &expected, source))?;

        let dn: String = match found {
            Some(dn) if dn != expected => {
                warn!(
                    group = %modification.group,
                    %dn,
                    %expected,
                    "Group lives outside its declared category"
                );
                dn
            }
            Some(dn) => dn,
            None => expected,
        };

        let values: Vec<String> = self.values_of(modification);
        debug!(%dn, attribute = %modification.attribute, ?values, "Replacing attribute");
        self.client
            .replace_attribute(&dn, modification.attribute, &values)
            .map_err(|source| directory_error(Phase::Modify, &dn, source))?;
        report.modified += 1;
        Ok(())
    }

    fn delete(
        &mut self,
        name: &str,
        report: &mut ExecutionReport,
    ) -> Result<(), ExecutorError<C::Error>> {
        let found: Option<String> = self
            .client
            .find_group(self.layout, name)
            .map_err(|source| directory_error(Phase::Delete, name, source))?;

        let Some(dn) = found else {
            warn!(group = %name, "Group scheduled for deletion was not found");
            report.not_found.push(name.to_string());
            return Ok(());
        };

        debug!(%dn, "Deleting group");
        self.client
            .delete_entry(&dn)
            .map_err(|source| directory_error(Phase::Delete, &dn, source))?;
        report.deleted += 1;
        Ok(())
    }

    fn dn_of(&self, name: &str) -> String {
        self.layout.dn(name, self.index.category_of(name))
    }

    /// Renders a modification's value as directory attribute values.
    ///
    /// Member names become distinguished names; null clears the attribute.
    fn values_of(&self, modification: &Modification) -> Vec<String> {
        match &modification.value {
            AttributeValue::Null => Vec::new(),
            AttributeValue::Text(text) => vec![text.clone()],
            AttributeValue::Members(members) if modification.attribute == AttributeKey::Member => {
                members.iter().map(|member| self.dn_of(member)).collect()
            }
            AttributeValue::Members(values) => values.clone(),
        }
    }
}

/// Checks that every user referenced locally exists in the directory.
///
/// # Errors
///
/// Returns `ExecutorError::MissingUser` for the first user without an
/// entry, or `ExecutorError::Directory` if the directory cannot be
/// searched.
pub fn verify_users<C: DirectoryClient>(
    client: &C,
    layout: &DirectoryLayout,
    users: &[String],
) -> Result<(), ExecutorError<C::Error>> {
    info!(count = users.len(), "Verifying local users against remote");

    for user in users {
        let dn: String = layout.dn(user, EntryCategory::User);
        let exists: bool = client
            .entry_exists(&dn)
            .map_err(|source| directory_error(Phase::Verify, &dn, source))?;

        if !exists {
            return Err(ExecutorError::MissingUser {
                user: user.clone(),
                dn,
            });
        }
        debug!(%dn, "User exists");
    }

    Ok(())
}

/// Rejects a plan that deletes a group it also creates or modifies.
fn check_consistent<E: std::error::Error + 'static>(
    plan: &OperationsPlan,
    operations: &[Operation],
) -> Result<(), ExecutorError<E>> {
    let conflict: Option<&Operation> = operations.iter().find(|operation| match operation {
        Operation::Modify(modification) => {
            plan.has_operation(OperationKind::Delete, &modification.group)
        }
        _ => operations.iter().any(|other| operation.is_opposite_of(other)),
    });

    if let Some(operation) = conflict {
        return Err(ExecutorError::ConflictingPlan {
            group: operation.target().to_string(),
        });
    }
    Ok(())
}

fn directory_error<E: std::error::Error + 'static>(
    phase: Phase,
    target: &str,
    source: E,
) -> ExecutorError<E> {
    ExecutorError::Directory {
        phase,
        target: target.to_string(),
        source,
    }
}
