//! Sanction view: overdue borrows and rejected returns awaiting follow-up

use chrono::NaiveDate;
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::HashSet;
use utoipa::ToSchema;

use super::due::{days_overdue, is_overdue, CalendarDay, DueInfo};
use super::item_names::ItemNameLookup;
use crate::models::{Transaction, TransactionStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum SanctionReason {
    /// Approved borrow past its due date
    Overdue,
    /// Return refused by an operator (damaged or missing item)
    ReturnRejected,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Sanction {
    pub transaction: Transaction,
    pub item_name: String,
    pub reason: SanctionReason,
    pub days_overdue: i64,
    pub due: DueInfo,
}

pub(super) type BorrowKey<'a> = (&'a str, &'a str, NaiveDate);

pub(super) fn borrow_key<'a>(tx: &'a Transaction, day: &CalendarDay) -> BorrowKey<'a> {
    (tx.user_id.as_str(), tx.item_id.as_str(), day.date_of(tx.borrow_date))
}

/// Borrows whose return leg has been approved.
///
/// In the two-leg model the borrow record keeps `borrow-approved` after the item comes
/// back, so it is matched to its return by user, item and borrow day.
pub(super) fn settled_borrows<'a>(transactions: &'a [Transaction], day: &CalendarDay) -> HashSet<BorrowKey<'a>> {
    transactions
        .iter()
        .filter(|tx| tx.status == TransactionStatus::ReturnApproved)
        .map(|tx| borrow_key(tx, day))
        .collect()
}

/// Why a transaction needs follow-up, if it does
pub fn sanction_reason(tx: &Transaction, day: &CalendarDay) -> Option<SanctionReason> {
    match tx.status {
        TransactionStatus::BorrowApproved if is_overdue(tx, day) => Some(SanctionReason::Overdue),
        TransactionStatus::ReturnRejected => Some(SanctionReason::ReturnRejected),
        _ => None,
    }
}

/// Sanctioned transactions, excluding resolved ids.
///
/// Overdue borrows come first, most overdue first; rejected returns follow. Ties are
/// broken by creation time, newest first.
pub fn sanction_view(
    transactions: &[Transaction],
    names: &ItemNameLookup,
    day: &CalendarDay,
    resolved: &HashSet<String>,
) -> Vec<Sanction> {
    let settled = settled_borrows(transactions, day);

    let mut sanctions: Vec<Sanction> = transactions
        .iter()
        .filter(|tx| !resolved.contains(&tx.id))
        .filter_map(|tx| {
            let reason = sanction_reason(tx, day)?;
            if reason == SanctionReason::Overdue && settled.contains(&borrow_key(tx, day)) {
                return None;
            }
            Some(Sanction {
                transaction: tx.clone(),
                item_name: names.resolve(tx).into_owned(),
                reason,
                days_overdue: match reason {
                    SanctionReason::Overdue => days_overdue(tx, day),
                    SanctionReason::ReturnRejected => 0,
                },
                due: DueInfo::for_transaction(tx, day),
            })
        })
        .collect();

    sanctions.sort_by_key(|s| {
        (
            s.reason,
            Reverse(s.days_overdue),
            Reverse(s.transaction.created_at),
        )
    });
    sanctions
}
