//! Shared domain enums for the borrow/return lifecycle

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// Leg
// ---------------------------------------------------------------------------

/// Which half of the borrowing cycle a record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Leg {
    Borrow,
    Return,
}

impl Leg {
    /// Backend collection path for this leg
    pub fn path(self) -> &'static str {
        match self {
            Leg::Borrow => "borrow",
            Leg::Return => "return",
        }
    }
}

impl std::fmt::Display for Leg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

// ---------------------------------------------------------------------------
// TransactionStatus
// ---------------------------------------------------------------------------

/// Status of a borrow or return request
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum TransactionStatus {
    BorrowPending,
    BorrowApproved,
    BorrowRejected,
    ReturnPending,
    ReturnApproved,
    ReturnRejected,
}

impl TransactionStatus {
    pub const ALL: [TransactionStatus; 6] = [
        TransactionStatus::BorrowPending,
        TransactionStatus::ReturnPending,
        TransactionStatus::BorrowApproved,
        TransactionStatus::ReturnApproved,
        TransactionStatus::BorrowRejected,
        TransactionStatus::ReturnRejected,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TransactionStatus::BorrowPending => "borrow-pending",
            TransactionStatus::BorrowApproved => "borrow-approved",
            TransactionStatus::BorrowRejected => "borrow-rejected",
            TransactionStatus::ReturnPending => "return-pending",
            TransactionStatus::ReturnApproved => "return-approved",
            TransactionStatus::ReturnRejected => "return-rejected",
        }
    }

    pub fn leg(self) -> Leg {
        match self {
            TransactionStatus::BorrowPending
            | TransactionStatus::BorrowApproved
            | TransactionStatus::BorrowRejected => Leg::Borrow,
            TransactionStatus::ReturnPending
            | TransactionStatus::ReturnApproved
            | TransactionStatus::ReturnRejected => Leg::Return,
        }
    }

    /// Position in the operator's status list (lower comes first)
    pub fn priority(self) -> u8 {
        match self {
            TransactionStatus::BorrowPending => 1,
            TransactionStatus::ReturnPending => 2,
            TransactionStatus::BorrowApproved => 3,
            TransactionStatus::ReturnApproved => 4,
            TransactionStatus::BorrowRejected => 5,
            TransactionStatus::ReturnRejected => 6,
        }
    }

    /// Statuses hidden from the status list unless completed records are shown.
    ///
    /// `borrow-approved` is not among them: the item is still out and may be overdue.
    pub fn is_completed(self) -> bool {
        matches!(
            self,
            TransactionStatus::BorrowRejected
                | TransactionStatus::ReturnApproved
                | TransactionStatus::ReturnRejected
        )
    }

    pub fn is_pending(self) -> bool {
        matches!(
            self,
            TransactionStatus::BorrowPending | TransactionStatus::ReturnPending
        )
    }

    /// Map a backend status value onto the lifecycle vocabulary.
    ///
    /// The backend reports leg-local values (`pending`, `approved`, `rejected`) on its
    /// `/borrow` and `/return` collections; fully qualified values are accepted too as
    /// long as they belong to the same leg.
    pub fn from_leg(leg: Leg, value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        let status = match (leg, normalized.as_str()) {
            (Leg::Borrow, "pending") => TransactionStatus::BorrowPending,
            (Leg::Borrow, "approved") => TransactionStatus::BorrowApproved,
            (Leg::Borrow, "rejected") => TransactionStatus::BorrowRejected,
            (Leg::Return, "pending") => TransactionStatus::ReturnPending,
            (Leg::Return, "approved") => TransactionStatus::ReturnApproved,
            (Leg::Return, "rejected") => TransactionStatus::ReturnRejected,
            (_, other) => {
                let status = other.parse::<TransactionStatus>().ok()?;
                if status.leg() != leg {
                    return None;
                }
                status
            }
        };
        Some(status)
    }
}

impl FromStr for TransactionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TransactionStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("Unknown transaction status '{}'", s))
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Decisions and actions
// ---------------------------------------------------------------------------

/// Operator decision sent to the backend's `/{leg}/{id}/status` endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Approved,
    Rejected,
}

impl FromStr for Decision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approved" => Ok(Decision::Approved),
            "rejected" => Ok(Decision::Rejected),
            _ => Err("Valid status is required (approved or rejected)".to_string()),
        }
    }
}

/// Action that moves a transaction through the lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum TransitionAction {
    Approve,
    Reject,
    RequestReturn,
}

impl From<Decision> for TransitionAction {
    fn from(d: Decision) -> Self {
        match d {
            Decision::Approved => TransitionAction::Approve,
            Decision::Rejected => TransitionAction::Reject,
        }
    }
}

impl std::fmt::Display for TransitionAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            TransitionAction::Approve => "approve",
            TransitionAction::Reject => "reject",
            TransitionAction::RequestReturn => "request return of",
        };
        f.write_str(label)
    }
}
