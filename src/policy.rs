//! Per-request access decisions.

use crate::{errors::AppError, models::Identity};

/// Whether an operation mutates the resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Safe,
    Unsafe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    DenyForbidden,
    DenyUnauthorized,
}

impl Decision {
    pub fn into_result(self) -> Result<(), AppError> {
        match self {
            Decision::Allow => Ok(()),
            Decision::DenyForbidden => Err(AppError::Forbidden(
                "You do not have permission to perform this action.".into(),
            )),
            Decision::DenyUnauthorized => Err(AppError::Unauthorized(
                "Authentication credentials were not provided.".into(),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Reads for everyone, writes for staff. Anonymous writers get the same 403 as non-staff.
    AdminOrReadOnly,
    /// Reads for everyone, writes for the resource owner. Anonymous writers get a 401.
    OwnerOrReadOnly,
    /// Any identity may act; anonymous callers get a 401.
    Authenticated,
}

impl Policy {
    pub fn decide(
        self,
        caller: Option<&Identity>,
        owner_id: Option<i64>,
        operation: Operation,
    ) -> Decision {
        match self {
            Policy::AdminOrReadOnly => match (operation, caller) {
                (Operation::Safe, _) => Decision::Allow,
                (Operation::Unsafe, Some(identity)) if identity.is_admin => Decision::Allow,
                (Operation::Unsafe, _) => Decision::DenyForbidden,
            },
            Policy::OwnerOrReadOnly => match (operation, caller) {
                (Operation::Safe, _) => Decision::Allow,
                (Operation::Unsafe, None) => Decision::DenyUnauthorized,
                (Operation::Unsafe, Some(identity)) => {
                    if owner_id == Some(identity.user_id) {
                        Decision::Allow
                    } else {
                        Decision::DenyForbidden
                    }
                }
            },
            Policy::Authenticated => match caller {
                Some(_) => Decision::Allow,
                None => Decision::DenyUnauthorized,
            },
        }
    }

    pub fn authorize(
        self,
        caller: Option<&Identity>,
        owner_id: Option<i64>,
        operation: Operation,
    ) -> Result<(), AppError> {
        let decision = self.decide(caller, owner_id, operation);
        if decision != Decision::Allow {
            tracing::warn!(
                "Access denied by {:?} for {:?} on {:?} operation",
                self,
                caller.map(|identity| identity.username.as_str()),
                operation
            );
        }
        decision.into_result()
    }
}
