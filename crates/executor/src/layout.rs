// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use groupsync_domain::{EntryCategory, GroupCategory};

const GROUPS_OU: &str = "OU=Groups";
const USERS_OU: &str = "OU=Users";

/// Places entries in the directory tree.
///
/// Groups live in one organizational unit per category below `OU=Groups`;
/// users live in `OU=Users`. Both sit directly under the tree base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryLayout {
    tree_base: String,
}

impl DirectoryLayout {
    #[must_use]
    pub fn new(tree_base: impl Into<String>) -> Self {
        Self {
            tree_base: tree_base.into(),
        }
    }

    #[must_use]
    pub fn tree_base(&self) -> &str {
        &self.tree_base
    }

    /// The container DN for entries of a category.
    #[must_use]
    pub fn container(&self, category: EntryCategory) -> String {
        match category {
            EntryCategory::Group(group) => {
                let ou: &str = match group {
                    GroupCategory::Organizational => "OU=Organizational",
                    GroupCategory::Functional => "OU=Functional",
                    GroupCategory::Permission => "OU=Permission",
                    GroupCategory::Location => "OU=Location",
                };
                format!("{ou},{GROUPS_OU},{}", self.tree_base)
            }
            EntryCategory::User => format!("{USERS_OU},{}", self.tree_base),
        }
    }

    /// The full DN of a named entry.
    #[must_use]
    pub fn dn(&self, name: &str, category: EntryCategory) -> String {
        format!("CN={name},{}", self.container(category))
    }

    /// The containers holding managed groups, one per category.
    #[must_use]
    pub fn group_containers(&self) -> Vec<String> {
        GroupCategory::ALL
            .into_iter()
            .map(|category| self.container(EntryCategory::Group(category)))
            .collect()
    }

    /// Whether `dn` names an entry directly inside one of the group
    /// containers. Entries elsewhere in the tree are never managed.
    #[must_use]
    pub fn is_managed_group(&self, dn: &str) -> bool {
        let Some((_, parent)) = dn.split_once(',') else {
            return false;
        };
        let parent: String = normalize(parent);

        self.group_containers()
            .iter()
            .any(|container| normalize(container) == parent)
    }
}

/// Lowercases a DN and drops whitespace around its separators.
fn normalize(dn: &str) -> String {
    dn.split(',')
        .map(|component| {
            component
                .split_once('=')
                .map_or_else(
                    || component.trim().to_string(),
                    |(kind, value)| format!("{}={}", kind.trim(), value.trim()),
                )
                .to_ascii_lowercase()
        })
        .collect::<Vec<String>>()
        .join(",")
}

/// Extracts the common name from a distinguished name.
///
/// Returns the value of the first `CN=` component, matched
/// case-insensitively.
#[must_use]
pub fn common_name(dn: &str) -> Option<&str> {
    dn.split(',').map(str::trim).find_map(|component| {
        let (kind, value) = component.split_once('=')?;
        kind.trim().eq_ignore_ascii_case("cn").then(|| value.trim())
    })
}
