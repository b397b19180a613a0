// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::layout::DirectoryLayout;
use groupsync_domain::{AttributeKey, RawGroupMap};

/// The directory operations reconciliation needs.
///
/// Implementations own connection handling, authentication and retries.
/// Entries are addressed by distinguished name.
pub trait DirectoryClient {
    /// The client's failure type.
    type Error: std::error::Error + 'static;

    /// Lists every group in the layout's group containers by common name.
    ///
    /// Groups anywhere else in the tree are not reported. `member` values
    /// must be reduced to common names. A group without members may omit
    /// the attribute.
    ///
    /// # Errors
    ///
    /// Returns the client's error if the directory cannot be searched.
    fn list_groups(&self, layout: &DirectoryLayout) -> Result<RawGroupMap, Self::Error>;

    /// Whether an entry exists.
    ///
    /// # Errors
    ///
    /// Returns the client's error if the directory cannot be searched.
    fn entry_exists(&self, dn: &str) -> Result<bool, Self::Error>;

    /// Locates a group by common name within the layout's group
    /// containers.
    ///
    /// # Errors
    ///
    /// Returns the client's error if the directory cannot be searched.
    fn find_group(
        &self,
        layout: &DirectoryLayout,
        cn: &str,
    ) -> Result<Option<String>, Self::Error>;

    /// Adds an empty group entry.
    ///
    /// # Errors
    ///
    /// Returns the client's error if the entry cannot be added.
    fn create_group(&mut self, dn: &str, cn: &str) -> Result<(), Self::Error>;

    /// Replaces every value of one attribute. An empty slice clears it.
    ///
    /// # Errors
    ///
    /// Returns the client's error if the entry cannot be modified.
    fn replace_attribute(
        &mut self,
        dn: &str,
        attribute: AttributeKey,
        values: &[String],
    ) -> Result<(), Self::Error>;

    /// Removes an entry.
    ///
    /// # Errors
    ///
    /// Returns the client's error if the entry cannot be removed.
    fn delete_entry(&mut self, dn: &str) -> Result<(), Self::Error>;
}
