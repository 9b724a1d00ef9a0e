//! Borrow/return transaction service

use chrono::{FixedOffset, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    lifecycle::{self, CalendarDay, ItemNameLookup, ListView, StatusIntent, TransactionRow},
    models::{Attachment, Decision, Item, Leg, ReturnRequest, Transaction},
    repository::Repository,
};

/// Both legs plus the item collection, fetched together
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub transactions: Vec<Transaction>,
    pub items: Vec<Item>,
}

impl Snapshot {
    pub fn names(&self) -> ItemNameLookup {
        ItemNameLookup::from_items(&self.items)
    }
}

/// Result of an operator decision
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DecisionOutcome {
    pub intent: StatusIntent,
    pub transaction: Transaction,
}

#[derive(Clone)]
pub struct TransactionsService {
    repository: Repository,
    page_limit: u32,
    item_limit: u32,
    tz: FixedOffset,
}

impl TransactionsService {
    pub fn new(repository: Repository, page_limit: u32, item_limit: u32, tz: FixedOffset) -> Self {
        Self {
            repository,
            page_limit,
            item_limit,
            tz,
        }
    }

    /// Today in the reference timezone
    pub fn today(&self) -> CalendarDay {
        CalendarDay::at(Utc::now(), self.tz)
    }

    /// One page of a leg's collection
    pub async fn list_leg(
        &self,
        token: &str,
        leg: Leg,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> AppResult<Vec<Transaction>> {
        let page = page.unwrap_or(1).max(1);
        let limit = limit.unwrap_or(self.page_limit).max(1);
        self.repository.leg(leg).list(token, page, limit).await
    }

    /// Every borrow, return and item, each collection paged through to its end
    pub async fn snapshot(&self, token: &str) -> AppResult<Snapshot> {
        let (borrows, returns, items) = tokio::try_join!(
            self.repository.borrows.list_all(token, self.page_limit),
            self.repository.returns.list_all(token, self.page_limit),
            self.repository.items.list_all(token, self.item_limit),
        )?;

        let mut transactions = borrows;
        transactions.extend(returns);
        Ok(Snapshot {
            transactions,
            items,
        })
    }

    /// Status list rows for the operator's current view
    pub async fn status_view(&self, token: &str, view: &ListView) -> AppResult<Vec<TransactionRow>> {
        let snapshot = self.snapshot(token).await?;
        let names = snapshot.names();
        let today = self.today();

        Ok(view
            .apply(snapshot.transactions, &names)
            .into_iter()
            .map(|tx| TransactionRow::new(tx, &names, &today))
            .collect())
    }

    /// Look a record up across every page of its leg
    pub async fn find(&self, token: &str, leg: Leg, id: &str) -> AppResult<Transaction> {
        self.repository
            .leg(leg)
            .list_all(token, self.page_limit)
            .await?
            .into_iter()
            .find(|tx| tx.id == id)
            .ok_or_else(|| AppError::NotFound(format!("{} request {} not found", leg, id)))
    }

    /// Approve or reject a pending request after checking the transition locally.
    ///
    /// Illegal transitions are refused before anything is sent to the backend.
    pub async fn decide(
        &self,
        token: &str,
        leg: Leg,
        id: &str,
        decision: Decision,
    ) -> AppResult<(DecisionOutcome, Option<String>)> {
        let current = self.find(token, leg, id).await?;
        let intent = lifecycle::decide(&current, decision).map_err(|e| {
            tracing::warn!("Refused {:?} on {} {}: {}", decision, leg, id, e);
            e
        })?;

        let (echoed, message) = self
            .repository
            .leg(intent.leg)
            .set_status(token, &intent.transaction_id, intent.decision)
            .await?;

        let transaction = match echoed {
            Some(tx) => tx,
            None => lifecycle::apply_transition(&current, decision.into(), Utc::now())?,
        };

        tracing::info!(
            "{} {} moved {} -> {}",
            leg,
            id,
            current.status,
            intent.next_status
        );

        Ok((DecisionOutcome { intent, transaction }, message))
    }

    /// Submit a return request exactly as entered
    pub async fn submit_return(
        &self,
        token: &str,
        request: &ReturnRequest,
    ) -> AppResult<(Option<Transaction>, Option<String>)> {
        request.validate()?;
        let result = self.repository.returns.submit_return(token, request).await?;
        tracing::info!(
            "Return requested for item {} (damage report: {})",
            request.item_id,
            request.damaged_item.is_some()
        );
        Ok(result)
    }

    /// Open the return leg of an approved borrow
    pub async fn return_borrow(
        &self,
        token: &str,
        borrow_id: &str,
        damaged_item: Option<Attachment>,
    ) -> AppResult<(Option<Transaction>, Option<String>)> {
        let borrow = self.find(token, Leg::Borrow, borrow_id).await?;
        let request = lifecycle::return_request_for(&borrow, damaged_item)?;
        self.submit_return(token, &request).await
    }
}
