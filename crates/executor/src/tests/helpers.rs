// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DirectoryLayout, SnapshotDirectory, SnapshotEntry};
use groupsync::CategoryIndex;
use groupsync_domain::{CategorizedGroups, GroupCategory, RawGroup, RawValue};

pub const TREE_BASE: &str = "DC=example,DC=com";

pub fn create_test_layout() -> DirectoryLayout {
    DirectoryLayout::new(TREE_BASE)
}

pub fn user_dn(name: &str) -> String {
    format!("CN={name},OU=Users,{TREE_BASE}")
}

pub fn organizational_dn(name: &str) -> String {
    format!("CN={name},OU=Organizational,OU=Groups,{TREE_BASE}")
}

pub fn create_test_groups() -> CategorizedGroups {
    CategorizedGroups::new()
        .with(
            GroupCategory::Organizational,
            "eng",
            RawGroup::new().with("member", RawValue::text_list(["alice", "oncall"])),
        )
        .with(
            GroupCategory::Functional,
            "oncall",
            RawGroup::new().with("member", RawValue::text_list(["bob"])),
        )
}

pub fn create_test_index() -> CategoryIndex {
    CategoryIndex::new(&create_test_groups())
}

/// A directory holding users alice and bob and nothing else.
pub fn create_test_directory() -> SnapshotDirectory {
    let mut directory: SnapshotDirectory = SnapshotDirectory::new();
    for user in ["alice", "bob"] {
        directory.insert(user_dn(user), SnapshotEntry::with_classes(&["top", "person"]));
    }
    directory
}
