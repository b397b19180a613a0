// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use groupsync_domain::DomainError;

/// Errors that abort a reconciliation run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// A group definition violated a domain rule.
    #[error("Domain violation: {0}")]
    DomainViolation(#[from] DomainError),
}
