//! Status list view: search, status filter, completed toggle and priority sort

use serde::Serialize;
use std::str::FromStr;
use utoipa::ToSchema;

use super::due::{CalendarDay, DueInfo};
use super::item_names::ItemNameLookup;
use crate::models::{Transaction, TransactionStatus};

/// Status filter of the list view; `all` disables it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(TransactionStatus),
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "all" => Ok(StatusFilter::All),
            other => other.parse().map(StatusFilter::Only),
        }
    }
}

/// Operator's current list view settings
#[derive(Debug, Clone, Default)]
pub struct ListView {
    pub search: String,
    pub status: StatusFilter,
    pub show_completed: bool,
}

impl ListView {
    /// Filter then sort. The filters commute; sorting always comes last.
    pub fn apply(&self, transactions: Vec<Transaction>, names: &ItemNameLookup) -> Vec<Transaction> {
        let found = search(transactions, &self.search, names);
        let filtered = filter_status(found, self.status, self.show_completed);
        sort_by_priority(filtered)
    }
}

fn matches(tx: &Transaction, needle: &str, names: &ItemNameLookup) -> bool {
    [
        tx.user_name.as_str(),
        tx.user_email.as_str(),
        tx.user_nim.as_str(),
        tx.item_id.as_str(),
    ]
    .into_iter()
    .any(|field| field.to_lowercase().contains(needle))
        || names.resolve(tx).to_lowercase().contains(needle)
}

/// Case-insensitive substring search over requester identity and item
pub fn search(
    transactions: Vec<Transaction>,
    query: &str,
    names: &ItemNameLookup,
) -> Vec<Transaction> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return transactions;
    }
    transactions
        .into_iter()
        .filter(|tx| matches(tx, &needle, names))
        .collect()
}

pub fn filter_status(
    transactions: Vec<Transaction>,
    filter: StatusFilter,
    show_completed: bool,
) -> Vec<Transaction> {
    transactions
        .into_iter()
        .filter(|tx| match filter {
            StatusFilter::All => true,
            StatusFilter::Only(status) => tx.status == status,
        })
        .filter(|tx| show_completed || !tx.status.is_completed())
        .collect()
}

/// Status priority first, newest first within a status
pub fn sort_by_priority(mut transactions: Vec<Transaction>) -> Vec<Transaction> {
    transactions.sort_by(|a, b| {
        a.status
            .priority()
            .cmp(&b.status.priority())
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
    transactions
}

/// Row of the status list
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRow {
    pub transaction: Transaction,
    pub item_name: String,
    /// Present while the item is out (approved borrow, pending or rejected return)
    pub due: Option<DueInfo>,
}

impl TransactionRow {
    pub fn new(transaction: Transaction, names: &ItemNameLookup, day: &CalendarDay) -> Self {
        let item_name = names.resolve(&transaction).into_owned();
        let due = matches!(
            transaction.status,
            TransactionStatus::BorrowApproved
                | TransactionStatus::ReturnPending
                | TransactionStatus::ReturnRejected
        )
        .then(|| DueInfo::for_transaction(&transaction, day));
        Self {
            transaction,
            item_name,
            due,
        }
    }
}
