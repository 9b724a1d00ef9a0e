//! Home page counters

use serde::Serialize;
use std::collections::HashSet;
use utoipa::ToSchema;

use super::due::CalendarDay;
use super::item_names::ItemNameLookup;
use super::sanctions::{borrow_key, sanction_view, settled_borrows, SanctionReason};
use crate::models::{Item, Transaction, TransactionStatus};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusCount {
    pub status: TransactionStatus,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub pending_borrows: usize,
    pub pending_returns: usize,
    /// Approved borrows still out, overdue or not
    pub active_borrows: usize,
    /// Overdue borrows still awaiting an approved return
    pub overdue: usize,
    /// Open (unresolved) sanctions
    pub sanctions: usize,
    /// Per-status counts in list priority order
    pub by_status: Vec<StatusCount>,
    pub total_items: usize,
    pub available_quantity: u64,
}

pub fn summarize(
    transactions: &[Transaction],
    items: &[Item],
    day: &CalendarDay,
    resolved: &HashSet<String>,
) -> DashboardSummary {
    let count = |status: TransactionStatus| {
        transactions.iter().filter(|tx| tx.status == status).count()
    };

    // Settled borrows are neither active nor overdue
    let settled = settled_borrows(transactions, day);
    let active_borrows = transactions
        .iter()
        .filter(|tx| tx.status == TransactionStatus::BorrowApproved)
        .filter(|tx| !settled.contains(&borrow_key(tx, day)))
        .count();

    let open = sanction_view(transactions, &ItemNameLookup::default(), day, &HashSet::new());
    let overdue = open
        .iter()
        .filter(|s| s.reason == SanctionReason::Overdue)
        .count();
    let sanctions = open
        .iter()
        .filter(|s| !resolved.contains(&s.transaction.id))
        .count();

    DashboardSummary {
        pending_borrows: count(TransactionStatus::BorrowPending),
        pending_returns: count(TransactionStatus::ReturnPending),
        active_borrows,
        overdue,
        sanctions,
        by_status: TransactionStatus::ALL
            .into_iter()
            .map(|status| StatusCount {
                status,
                count: count(status),
            })
            .collect(),
        total_items: items.len(),
        available_quantity: items.iter().map(|item| u64::from(item.quantity)).sum(),
    }
}
