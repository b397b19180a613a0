// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::group::{AttributeKey, AttributeValue};
use serde::{Deserialize, Serialize};

/// The kind of change an operation requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Create,
    Modify,
    Delete,
}

/// A single attribute assignment on a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modification {
    /// The target group.
    #[serde(rename = "cn")]
    pub group: String,
    /// The attribute to replace.
    #[serde(rename = "attrib")]
    pub attribute: AttributeKey,
    /// The full value the attribute must hold afterwards.
    pub value: AttributeValue,
}

/// One intent of an operations plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Create an empty group entry.
    Create {
        /// The group to create.
        name: String,
    },
    /// Replace one attribute of a group.
    Modify(Modification),
    /// Delete a group entry.
    Delete {
        /// The group to delete.
        name: String,
    },
}

impl Operation {
    #[must_use]
    pub const fn kind(&self) -> OperationKind {
        match self {
            Self::Create { .. } => OperationKind::Create,
            Self::Modify(_) => OperationKind::Modify,
            Self::Delete { .. } => OperationKind::Delete,
        }
    }

    /// The group this operation targets.
    #[must_use]
    pub fn target(&self) -> &str {
        match self {
            Self::Create { name } | Self::Delete { name } => name,
            Self::Modify(modification) => &modification.group,
        }
    }

    /// Whether applying both operations would cancel out: a create and a
    /// delete of the same group.
    #[must_use]
    pub fn is_opposite_of(&self, other: &Self) -> bool {
        matches!(
            (self.kind(), other.kind()),
            (OperationKind::Create, OperationKind::Delete)
                | (OperationKind::Delete, OperationKind::Create)
        ) && self.target() == other.target()
    }
}

/// The set of changes that converges the directory to the declared state.
///
/// Within each list order carries no meaning, but consumers must apply all
/// creates, then all modifies, then all deletes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OperationsPlan {
    /// Groups to create.
    pub creates: Vec<String>,
    /// Attribute replacements.
    pub modifies: Vec<Modification>,
    /// Groups to delete.
    pub deletes: Vec<String>,
}

impl OperationsPlan {
    /// Creates an empty plan.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            creates: Vec::new(),
            modifies: Vec::new(),
            deletes: Vec::new(),
        }
    }

    /// Records a group creation.
    pub fn push_create(&mut self, name: impl Into<String>) {
        self.creates.push(name.into());
    }

    /// Records an attribute replacement.
    pub fn push_modify(
        &mut self,
        group: impl Into<String>,
        attribute: AttributeKey,
        value: AttributeValue,
    ) {
        self.modifies.push(Modification {
            group: group.into(),
            attribute,
            value,
        });
    }

    /// Records a group deletion.
    pub fn push_delete(&mut self, name: impl Into<String>) {
        self.deletes.push(name.into());
    }

    /// Whether the plan already holds an operation of `kind` on `name`.
    #[must_use]
    pub fn has_operation(&self, kind: OperationKind, name: &str) -> bool {
        match kind {
            OperationKind::Create => self.creates.iter().any(|n| n == name),
            OperationKind::Modify => self.modifies.iter().any(|m| m.group == name),
            OperationKind::Delete => self.deletes.iter().any(|n| n == name),
        }
    }

    /// The attribute replacements targeting one group.
    pub fn modifies_for<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Modification> {
        self.modifies.iter().filter(move |m| m.group == name)
    }

    /// Every operation in the order it must be applied.
    #[must_use]
    pub fn in_execution_order(&self) -> Vec<Operation> {
        self.creates
            .iter()
            .map(|name| Operation::Create { name: name.clone() })
            .chain(self.modifies.iter().cloned().map(Operation::Modify))
            .chain(
                self.deletes
                    .iter()
                    .map(|name| Operation::Delete { name: name.clone() }),
            )
            .collect()
    }

    /// Total number of operations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.creates.len() + self.modifies.len() + self.deletes.len()
    }

    /// Whether nothing needs to change.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.creates.is_empty() && self.modifies.is_empty() && self.deletes.is_empty()
    }
}
