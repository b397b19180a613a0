// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use groupsync_domain::{DomainError, DuplicateMember, GroupSet};

/// Validates that no local group declares the same member twice.
///
/// A repeated identifier in the declared intent is an authoring mistake and
/// must not be absorbed by the set semantics of the directory. Every
/// offending group is reported with every identifier it repeats.
///
/// This must run on resolved, canonical local groups before diffing.
///
/// # Arguments
///
/// * `groups` - The canonical local groups
///
/// # Errors
///
/// Returns `DomainError::DuplicateMembers` if any group lists an identifier
/// more than once.
pub fn validate_unique_members(groups: &GroupSet) -> Result<(), CoreError> {
    let duplicates: Vec<DuplicateMember> = groups
        .iter()
        .filter_map(|(name, group)| {
            let identifiers: Vec<String> = repeated(group.members());
            (!identifiers.is_empty()).then(|| DuplicateMember {
                group: name.clone(),
                identifiers,
            })
        })
        .collect();

    if duplicates.is_empty() {
        Ok(())
    } else {
        Err(DomainError::DuplicateMembers { duplicates }.into())
    }
}

/// Collects each identifier appearing more than once in a sorted list.
fn repeated(members: &[String]) -> Vec<String> {
    let mut identifiers: Vec<String> = members
        .windows(2)
        .filter(|pair| pair[0] == pair[1])
        .map(|pair| pair[0].clone())
        .collect();
    identifiers.dedup();
    identifiers
}
