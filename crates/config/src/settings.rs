// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::ConfigError;
use std::path::PathBuf;
use std::time::Duration;

/// How long to wait after creating groups before modifying them.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(15);

const DIRECTORY_HOST: &str = "AG_LDAP_HOST";
const USER_IDENTITY: &str = "AG_USER_DN";
const CREDENTIAL: &str = "AG_PASSWORD";
const TREE_BASE: &str = "AG_TREEBASE";
const LOCAL_STATE: &str = "AG_LOCAL_STATE";
const SETTLE_DELAY: &str = "AG_SETTLE_SLEEP";

/// Run configuration.
///
/// Built once at startup and passed to whatever needs it; nothing reads the
/// environment after construction.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    /// Host name of the directory server.
    pub directory_host: Option<String>,
    /// Distinguished name used to bind.
    pub user_identity: Option<String>,
    /// Bind password.
    pub credential: Option<String>,
    /// Base DN under which all managed entries live.
    pub tree_base: Option<String>,
    /// Root of the local state tree.
    pub local_state_root: PathBuf,
    /// Delay between the create and modify phases.
    pub settle_delay: Duration,
}

impl Config {
    /// Builds configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a value cannot be parsed or the current directory
    /// is unavailable when no local state root is configured.
    pub fn from_env() -> Result<Self, ConfigError> {
        let current_dir: PathBuf = std::env::current_dir().map_err(ConfigError::CurrentDir)?;
        Self::from_lookup(|key| std::env::var(key).ok(), current_dir)
    }

    /// Builds configuration from an arbitrary key lookup.
    ///
    /// Empty values count as unset.
    ///
    /// # Arguments
    ///
    /// * `lookup` - Returns the value for an environment key
    /// * `current_dir` - The local state root used when none is configured
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the settle delay is not a
    /// whole number of seconds.
    pub fn from_lookup<F>(lookup: F, current_dir: PathBuf) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let settle_delay: Duration = match get(SETTLE_DELAY) {
            Some(value) => {
                let seconds: u64 =
                    value
                        .trim()
                        .parse()
                        .map_err(|e: std::num::ParseIntError| ConfigError::InvalidValue {
                            key: SETTLE_DELAY,
                            value: value.clone(),
                            reason: e.to_string(),
                        })?;
                Duration::from_secs(seconds)
            }
            None => DEFAULT_SETTLE_DELAY,
        };

        Ok(Self {
            directory_host: get(DIRECTORY_HOST),
            user_identity: get(USER_IDENTITY),
            credential: get(CREDENTIAL),
            tree_base: get(TREE_BASE),
            local_state_root: get(LOCAL_STATE).map_or(current_dir, PathBuf::from),
            settle_delay,
        })
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("directory_host", &self.directory_host)
            .field("user_identity", &self.user_identity)
            .field("credential", &self.credential.as_ref().map(|_| "<redacted>"))
            .field("tree_base", &self.tree_base)
            .field("local_state_root", &self.local_state_root)
            .field("settle_delay", &self.settle_delay)
            .finish()
    }
}
