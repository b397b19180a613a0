// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// The stage of plan execution an error occurred in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Verify,
    Create,
    Modify,
    Delete,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name: &str = match self {
            Self::Verify => "verify",
            Self::Create => "create",
            Self::Modify => "modify",
            Self::Delete => "delete",
        };
        write!(f, "{name}")
    }
}

/// Errors raised while applying a plan.
#[derive(Debug, thiserror::Error)]
pub enum ExecutorError<E: std::error::Error + 'static> {
    /// The directory rejected an operation. Nothing after it was attempted.
    #[error("Failed to {phase} '{target}': {source}")]
    Directory {
        /// The phase that failed.
        phase: Phase,
        /// The entry being acted on.
        target: String,
        /// The client's error.
        source: E,
    },
    /// The plan deletes a group that it also creates or modifies.
    #[error("Plan both deletes and creates or modifies group '{group}'")]
    ConflictingPlan {
        /// The group the conflicting operations target.
        group: String,
    },
    /// A locally referenced user has no entry in the directory.
    #[error("User '{user}' does not exist ({dn})")]
    MissingUser {
        /// The user's name.
        user: String,
        /// Where the user was expected.
        dn: String,
    },
}
