//! Borrow/return status transitions

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::{
        Attachment, Decision, Leg, ReturnRequest, Transaction, TransactionStatus,
        TransitionAction,
    },
};

use TransactionStatus::*;

/// Status reached by applying `action` in `from`, if the transition exists.
///
/// `borrow-rejected` and `return-approved` are terminal. `return-rejected` has no
/// outgoing transition either; it is followed up through the sanction view.
pub fn next_status(from: TransactionStatus, action: TransitionAction) -> Option<TransactionStatus> {
    match (from, action) {
        (BorrowPending, TransitionAction::Approve) => Some(BorrowApproved),
        (BorrowPending, TransitionAction::Reject) => Some(BorrowRejected),
        (BorrowApproved, TransitionAction::RequestReturn) => Some(ReturnPending),
        (ReturnPending, TransitionAction::Approve) => Some(ReturnApproved),
        (ReturnPending, TransitionAction::Reject) => Some(ReturnRejected),
        _ => None,
    }
}

fn checked_next(tx: &Transaction, action: TransitionAction) -> AppResult<TransactionStatus> {
    next_status(tx.status, action).ok_or_else(|| AppError::Conflict {
        id: tx.id.clone(),
        status: tx.status,
        action,
    })
}

/// Apply a transition to a copy of `tx`, refreshing `updated_at`.
///
/// On error the input is untouched and no copy is produced.
pub fn apply_transition(
    tx: &Transaction,
    action: TransitionAction,
    now: DateTime<Utc>,
) -> AppResult<Transaction> {
    let status = checked_next(tx, action)?;
    Ok(Transaction {
        status,
        updated_at: now,
        ..tx.clone()
    })
}

/// Operator decision to be dispatched to the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusIntent {
    pub transaction_id: String,
    pub leg: Leg,
    pub decision: Decision,
    pub next_status: TransactionStatus,
}

/// Check an approve/reject decision against the state machine and build its intent
pub fn decide(tx: &Transaction, decision: Decision) -> AppResult<StatusIntent> {
    let next_status = checked_next(tx, decision.into())?;
    Ok(StatusIntent {
        transaction_id: tx.id.clone(),
        leg: tx.status.leg(),
        decision,
        next_status,
    })
}

/// Build the request opening the return leg of an approved borrow
pub fn return_request_for(
    tx: &Transaction,
    damaged_item: Option<Attachment>,
) -> AppResult<ReturnRequest> {
    checked_next(tx, TransitionAction::RequestReturn)?;
    Ok(ReturnRequest {
        item_id: tx.item_id.clone(),
        borrow_date: tx.borrow_date,
        return_date: tx.return_date,
        damaged_item,
    })
}
