// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use groupsync_domain::GroupCategory;
use std::path::PathBuf;

/// Errors raised while building configuration or loading local state.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A configuration value could not be interpreted.
    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        /// The configuration key.
        key: &'static str,
        /// The offending value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
    /// The working directory could not be determined.
    #[error("Cannot determine the current directory: {0}")]
    CurrentDir(#[source] std::io::Error),
    /// A path cannot be used as a search root.
    #[error("Path is not valid UTF-8: {}", .0.display())]
    InvalidPath(PathBuf),
    /// The file search pattern was rejected.
    #[error("Invalid search pattern: {0}")]
    Pattern(#[from] glob::PatternError),
    /// A directory entry could not be read during the search.
    #[error("Cannot read directory entry: {0}")]
    Glob(#[from] glob::GlobError),
    /// No local state files were found.
    #[error("No configuration files detected under {}", .0.display())]
    NoConfigurationFiles(PathBuf),
    /// A file could not be read.
    #[error("Cannot read {}: {source}", .path.display())]
    Io {
        /// The file being read.
        path: PathBuf,
        /// The underlying failure.
        source: std::io::Error,
    },
    /// A file is not valid YAML.
    #[error("Cannot parse {}: {source}", .path.display())]
    Yaml {
        /// The file being parsed.
        path: PathBuf,
        /// The parser failure.
        source: serde_yaml::Error,
    },
    /// A file sits in a directory that is not a known group category.
    #[error("{} is not in a group category directory: '{name}'", .path.display())]
    UnknownCategory {
        /// The file.
        path: PathBuf,
        /// The name of its parent directory.
        name: String,
    },
    /// A file does not have the expected shape.
    #[error("Invalid document {}: {reason}", .path.display())]
    InvalidDocument {
        /// The file.
        path: PathBuf,
        /// What was wrong with it.
        reason: String,
    },
    /// The same group is defined twice within one category.
    #[error(
        "Group '{group}' ({category}) is defined in both {} and {}",
        .first.display(),
        .second.display()
    )]
    DuplicateDefinition {
        /// The group name.
        group: String,
        /// The category both definitions belong to.
        category: GroupCategory,
        /// The file with the first definition.
        first: PathBuf,
        /// The file with the second definition.
        second: PathBuf,
    },
}
