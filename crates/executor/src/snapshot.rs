// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! A directory held in memory and persisted as a YAML file.
//!
//! The file maps distinguished names to entries:
//!
//! ```yaml
//! CN=eng,OU=Organizational,OU=Groups,DC=example,DC=com:
//!   objectClass: [top, group]
//!   sAMAccountName: eng
//!   description: Engineering
//!   member:
//!     - CN=alice,OU=Users,DC=example,DC=com
//! CN=alice,OU=Users,DC=example,DC=com:
//!   objectClass: [top, person]
//! ```

use crate::client::DirectoryClient;
use crate::layout::{DirectoryLayout, common_name};
use groupsync_domain::{AttributeKey, RawGroup, RawGroupMap, RawValue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const GROUP_CLASS: &str = "group";

/// Errors raised by the snapshot directory.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// The snapshot file could not be read or written.
    #[error("Cannot access {}: {source}", .path.display())]
    Io {
        /// The snapshot file.
        path: PathBuf,
        /// The underlying failure.
        source: std::io::Error,
    },
    /// The snapshot file is not valid.
    #[error("Invalid snapshot {}: {source}", .path.display())]
    Yaml {
        /// The snapshot file.
        path: PathBuf,
        /// The parser failure.
        source: serde_yaml::Error,
    },
    /// The addressed entry does not exist.
    #[error("No such entry: {0}")]
    NoSuchEntry(String),
    /// An entry with this DN already exists.
    #[error("Entry already exists: {0}")]
    AlreadyExists(String),
}

/// One directory entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    /// Object classes of the entry.
    #[serde(rename = "objectClass", default, skip_serializing_if = "Vec::is_empty")]
    pub object_class: Vec<String>,
    /// Account name, set on groups at creation.
    #[serde(rename = "sAMAccountName", default, skip_serializing_if = "Option::is_none")]
    pub account_name: Option<String>,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Member DNs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub member: Vec<String>,
}

impl SnapshotEntry {
    /// An entry with the given object classes.
    #[must_use]
    pub fn with_classes(classes: &[&str]) -> Self {
        Self {
            object_class: classes.iter().map(ToString::to_string).collect(),
            ..Self::default()
        }
    }

    fn is_group(&self) -> bool {
        self.object_class
            .iter()
            .any(|class| class.eq_ignore_ascii_case(GROUP_CLASS))
    }
}

/// An in-memory directory keyed by distinguished name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnapshotDirectory {
    entries: BTreeMap<String, SnapshotEntry>,
}

impl SnapshotDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Reads a snapshot file. A missing file yields an empty directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let text: String = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::new()),
            Err(source) => {
                return Err(SnapshotError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        if text.trim().is_empty() {
            return Ok(Self::new());
        }

        serde_yaml::from_str(&text).map_err(|source| SnapshotError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Writes the directory to a snapshot file.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be serialized or written.
    pub fn save(&self, path: &Path) -> Result<(), SnapshotError> {
        let text: String = serde_yaml::to_string(self).map_err(|source| SnapshotError::Yaml {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, text).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Adds or replaces an entry.
    pub fn insert(&mut self, dn: impl Into<String>, entry: SnapshotEntry) {
        self.entries.insert(dn.into(), entry);
    }

    /// Looks up an entry.
    #[must_use]
    pub fn get(&self, dn: &str) -> Option<&SnapshotEntry> {
        self.entries.get(dn)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn managed_groups<'a>(
        &'a self,
        layout: &'a DirectoryLayout,
    ) -> impl Iterator<Item = (&'a String, &'a SnapshotEntry)> {
        self.entries
            .iter()
            .filter(move |(dn, entry)| entry.is_group() && layout.is_managed_group(dn))
    }

    fn entry_mut(&mut self, dn: &str) -> Result<&mut SnapshotEntry, SnapshotError> {
        self.entries
            .get_mut(dn)
            .ok_or_else(|| SnapshotError::NoSuchEntry(dn.to_string()))
    }
}

impl DirectoryClient for SnapshotDirectory {
    type Error = SnapshotError;

    fn list_groups(&self, layout: &DirectoryLayout) -> Result<RawGroupMap, Self::Error> {
        let mut groups: RawGroupMap = RawGroupMap::new();

        for (dn, entry) in self.managed_groups(layout) {
            let Some(cn) = common_name(dn) else {
                continue;
            };

            let mut group: RawGroup = RawGroup::new();
            if !entry.member.is_empty() {
                let mut members: Vec<&str> =
                    entry.member.iter().filter_map(|m| common_name(m)).collect();
                members.sort_unstable();
                group.insert(AttributeKey::Member.as_str(), RawValue::text_list(members));
            }
            if let Some(description) = &entry.description {
                group.insert(
                    AttributeKey::Description.as_str(),
                    RawValue::Text(description.clone()),
                );
            }

            groups.insert(cn.to_string(), group);
        }

        Ok(groups)
    }

    fn entry_exists(&self, dn: &str) -> Result<bool, Self::Error> {
        Ok(self.entries.contains_key(dn))
    }

    fn find_group(
        &self,
        layout: &DirectoryLayout,
        cn: &str,
    ) -> Result<Option<String>, Self::Error> {
        Ok(self
            .managed_groups(layout)
            .find(|(dn, _)| common_name(dn) == Some(cn))
            .map(|(dn, _)| dn.clone()))
    }

    fn create_group(&mut self, dn: &str, cn: &str) -> Result<(), Self::Error> {
        if self.entries.contains_key(dn) {
            return Err(SnapshotError::AlreadyExists(dn.to_string()));
        }

        let mut entry: SnapshotEntry = SnapshotEntry::with_classes(&["top", GROUP_CLASS]);
        entry.account_name = Some(cn.to_string());
        self.entries.insert(dn.to_string(), entry);
        Ok(())
    }

    fn replace_attribute(
        &mut self,
        dn: &str,
        attribute: AttributeKey,
        values: &[String],
    ) -> Result<(), Self::Error> {
        let entry: &mut SnapshotEntry = self.entry_mut(dn)?;
        match attribute {
            AttributeKey::Description => entry.description = values.first().cloned(),
            AttributeKey::Member => entry.member = values.to_vec(),
        }
        Ok(())
    }

    fn delete_entry(&mut self, dn: &str) -> Result<(), Self::Error> {
        self.entries
            .remove(dn)
            .map(|_| ())
            .ok_or_else(|| SnapshotError::NoSuchEntry(dn.to_string()))
    }
}
