// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Local state discovery.
//!
//! Group definitions live in YAML files anywhere below the local state
//! root. The directory containing a file names the category of every group
//! in it:
//!
//! ```text
//! state/
//!   organizational/teams.yaml
//!   permissions/admin.yml
//!   locations/offices/locations/canada.yaml
//! ```
//!
//! Each file maps group names to attribute mappings.

use crate::error::ConfigError;
use groupsync_domain::{CategorizedGroups, GroupCategory, RawGroup, RawValue};
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, trace};

/// Loads every group definition below `root`.
///
/// Files are read in sorted path order. Attributes are kept as written;
/// unmanaged ones are dropped later during canonicalization.
///
/// # Errors
///
/// Returns an error if:
/// - No `.yaml` or `.yml` file exists below `root`
/// - A file's parent directory is not a group category
/// - A file cannot be read or parsed, or is not a mapping of groups
/// - A group is defined twice within the same category
pub fn load_local_state(root: &Path) -> Result<CategorizedGroups, ConfigError> {
    let files: Vec<PathBuf> = discover(root)?;
    trace!(?files, "Discovered local state files");

    if files.is_empty() {
        return Err(ConfigError::NoConfigurationFiles(root.to_path_buf()));
    }

    let mut groups: CategorizedGroups = CategorizedGroups::new();
    let mut defined_in: BTreeMap<(GroupCategory, String), PathBuf> = BTreeMap::new();

    for file in files {
        debug!(file = %file.display(), "Loading local state");
        let category: GroupCategory = category_of(&file)?;

        for (name, group) in read_groups(&file)? {
            if let Some(first) = defined_in.insert((category, name.clone()), file.clone()) {
                return Err(ConfigError::DuplicateDefinition {
                    group: name,
                    category,
                    first,
                    second: file,
                });
            }
            groups.insert(category, name, group);
        }
    }

    Ok(groups)
}

fn discover(root: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let root_str: &str = root
        .to_str()
        .ok_or_else(|| ConfigError::InvalidPath(root.to_path_buf()))?;
    let base: String = glob::Pattern::escape(root_str);

    let mut files: Vec<PathBuf> = Vec::new();
    for extension in ["yaml", "yml"] {
        for entry in glob::glob(&format!("{base}/**/*.{extension}"))? {
            files.push(entry?);
        }
    }
    files.sort();
    Ok(files)
}

fn category_of(file: &Path) -> Result<GroupCategory, ConfigError> {
    let name: String = file
        .parent()
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    GroupCategory::from_str(&name).map_err(|_| ConfigError::UnknownCategory {
        path: file.to_path_buf(),
        name,
    })
}

fn read_groups(file: &Path) -> Result<Vec<(String, RawGroup)>, ConfigError> {
    let text: String = std::fs::read_to_string(file).map_err(|source| ConfigError::Io {
        path: file.to_path_buf(),
        source,
    })?;
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let document: Value = serde_yaml::from_str(&text).map_err(|source| ConfigError::Yaml {
        path: file.to_path_buf(),
        source,
    })?;

    let invalid = |reason: String| ConfigError::InvalidDocument {
        path: file.to_path_buf(),
        reason,
    };

    let mapping: serde_yaml::Mapping = match document {
        Value::Null => return Ok(Vec::new()),
        Value::Mapping(mapping) => mapping,
        _ => return Err(invalid(String::from("expected a mapping of group names"))),
    };

    let mut groups: Vec<(String, RawGroup)> = Vec::with_capacity(mapping.len());
    for (key, body) in mapping {
        let name: String = scalar_text(&key)
            .ok_or_else(|| invalid(String::from("group names must be scalars")))?;

        let group: RawGroup = match body {
            Value::Null => RawGroup::new(),
            Value::Mapping(attributes) => attributes
                .into_iter()
                .map(|(key, value)| -> Result<(String, RawValue), ConfigError> {
                    let key: String = scalar_text(&key).ok_or_else(|| {
                        invalid(format!("attribute names of '{name}' must be scalars"))
                    })?;
                    Ok((key, raw_value(value).map_err(&invalid)?))
                })
                .collect::<Result<RawGroup, ConfigError>>()?,
            _ => return Err(invalid(format!("group '{name}' must be a mapping"))),
        };

        groups.push((name, group));
    }

    Ok(groups)
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn raw_value(value: Value) -> Result<RawValue, String> {
    match value {
        Value::Null => Ok(RawValue::Null),
        Value::Sequence(items) => items
            .into_iter()
            .map(raw_value)
            .collect::<Result<Vec<RawValue>, String>>()
            .map(RawValue::List),
        Value::Mapping(mapping) => mapping
            .into_iter()
            .map(|(key, value)| -> Result<(String, RawValue), String> {
                let key: String =
                    scalar_text(&key).ok_or_else(|| String::from("mapping keys must be scalars"))?;
                Ok((key, raw_value(value)?))
            })
            .collect::<Result<BTreeMap<String, RawValue>, String>>()
            .map(RawValue::Map),
        Value::Tagged(tagged) => raw_value(tagged.value),
        scalar => scalar_text(&scalar)
            .map(RawValue::Text)
            .ok_or_else(|| String::from("unsupported value")),
    }
}
