//! Ownership check between the session identity and a requested resource owner.

use crate::auth::claims::IdentityClaim;
use crate::error::AppError;
use crate::logging::security;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

/// Exact, case-sensitive comparison of the two subjects.
pub fn authorize(claim_subject: &str, requested_subject: &str) -> Decision {
    if claim_subject == requested_subject {
        Decision::Allow
    } else {
        Decision::Deny
    }
}

/// Fails with `Forbidden` unless `requested` names the caller's own email.
/// A missing owner parameter is treated as a mismatch.
pub fn require_owner(claim: &IdentityClaim, requested: Option<&str>) -> Result<(), AppError> {
    let decision = match requested {
        Some(owner) => authorize(&claim.email, owner),
        None => Decision::Deny,
    };

    match decision {
        Decision::Allow => Ok(()),
        Decision::Deny => {
            security::access_forbidden(&claim.email, requested);
            Err(AppError::forbidden())
        }
    }
}
