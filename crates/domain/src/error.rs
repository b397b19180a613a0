// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::GroupCategory;

/// A group whose declared member list repeats one or more identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateMember {
    /// The group carrying the duplicates.
    pub group: String,
    /// Every identifier listed more than once, sorted.
    pub identifiers: Vec<String>,
}

impl std::fmt::Display for DuplicateMember {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]", self.group, self.identifiers.join(", "))
    }
}

/// Errors raised while interpreting group definitions.
///
/// Every variant is fatal to a reconciliation run: no plan is produced
/// once one of these has been returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// The same group name is declared under two categories.
    #[error("Group '{group}' is declared as both {first} and {second}")]
    ConfigConflict {
        /// The colliding group name.
        group: String,
        /// The category that declared the group first.
        first: GroupCategory,
        /// The category that declared it again.
        second: GroupCategory,
    },
    /// A member entry is neither a plain identifier nor a well-formed
    /// conditional member.
    #[error("Malformed member in group '{group}'{}: {reason}", category_suffix(.category.as_ref()))]
    MalformedMember {
        /// The group containing the entry.
        group: String,
        /// The category of the group, when known.
        category: Option<GroupCategory>,
        /// What was wrong with the entry.
        reason: String,
    },
    /// One or more groups list the same member more than once.
    #[error("Duplicate members declared: {}", join_duplicates(.duplicates))]
    DuplicateMembers {
        /// Every offending group with all of its repeated identifiers.
        duplicates: Vec<DuplicateMember>,
    },
    /// A recognized attribute carries a value of the wrong shape.
    #[error("Malformed attribute '{attribute}' in group '{group}': {reason}")]
    MalformedAttribute {
        /// The group containing the attribute.
        group: String,
        /// The attribute name.
        attribute: String,
        /// What was wrong with the value.
        reason: String,
    },
    /// A date string could not be parsed.
    #[error("Invalid date '{value}': {reason}")]
    InvalidDate {
        /// The offending text.
        value: String,
        /// The parser's complaint.
        reason: String,
    },
    /// A category name is not one of the four known group categories.
    #[error("Unknown group category: {0}")]
    UnknownCategory(String),
}

fn category_suffix(category: Option<&GroupCategory>) -> String {
    category.map_or_else(String::new, |c| format!(" ({c})"))
}

fn join_duplicates(duplicates: &[DuplicateMember]) -> String {
    duplicates
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<String>>()
        .join("; ")
}
