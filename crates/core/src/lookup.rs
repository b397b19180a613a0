// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use groupsync_domain::{CategorizedGroups, EntryCategory, GroupCategory, GroupSet};
use std::collections::BTreeSet;

/// Classifies entry names by the category of the local group declaring them.
///
/// Categories are consulted in a fixed priority order (organizational,
/// functional, permission, location). A name declared by no local group is
/// taken to be a user.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CategoryIndex {
    priority: Vec<(GroupCategory, BTreeSet<String>)>,
}

impl CategoryIndex {
    /// Builds the index from local declarations.
    #[must_use]
    pub fn new(groups: &CategorizedGroups) -> Self {
        let priority: Vec<(GroupCategory, BTreeSet<String>)> = GroupCategory::ALL
            .into_iter()
            .map(|category| {
                let names: BTreeSet<String> = groups
                    .category(category)
                    .map(|declared| declared.keys().cloned().collect())
                    .unwrap_or_default();
                (category, names)
            })
            .collect();

        Self { priority }
    }

    /// Classifies a name.
    #[must_use]
    pub fn category_of(&self, name: &str) -> EntryCategory {
        self.priority
            .iter()
            .find(|(_, names)| names.contains(name))
            .map_or(EntryCategory::User, |(category, _)| {
                EntryCategory::Group(*category)
            })
    }
}

/// Lists every user referenced by the local groups.
///
/// Members that are themselves local groups are excluded. The result is
/// sorted and free of duplicates.
#[must_use]
pub fn local_users(groups: &GroupSet) -> Vec<String> {
    let users: BTreeSet<&String> = groups
        .iter()
        .flat_map(|(_, group)| group.members())
        .filter(|member| !groups.contains(member))
        .collect();

    users.into_iter().cloned().collect()
}
