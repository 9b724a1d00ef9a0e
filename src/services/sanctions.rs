//! Sanction follow-up service

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;
use utoipa::ToSchema;

use super::transactions::TransactionsService;
use crate::{
    error::{AppError, AppResult},
    lifecycle::{sanction_view, summarize, DashboardSummary, Sanction},
};

/// Where sanction resolutions are recorded.
///
/// The inventory backend has no resolution endpoint, so the shipped implementation is
/// [`LocalSanctionLedger`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SanctionResolver: Send + Sync {
    async fn resolve(&self, transaction_id: &str) -> AppResult<()>;

    async fn resolved(&self) -> AppResult<HashSet<String>>;
}

/// In-process record of resolved sanctions; lost on restart
#[derive(Default)]
pub struct LocalSanctionLedger {
    resolved: RwLock<HashSet<String>>,
}

#[async_trait]
impl SanctionResolver for LocalSanctionLedger {
    async fn resolve(&self, transaction_id: &str) -> AppResult<()> {
        self.resolved.write().await.insert(transaction_id.to_string());
        Ok(())
    }

    async fn resolved(&self) -> AppResult<HashSet<String>> {
        Ok(self.resolved.read().await.clone())
    }
}

/// Body of a bulk resolution
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct ResolveSanctionsRequest {
    pub ids: Vec<String>,
}

/// Outcome of a bulk resolution
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkResolution {
    pub resolved: Vec<Sanction>,
    /// Requested ids with no open sanction
    pub not_found: Vec<String>,
}

#[derive(Clone)]
pub struct SanctionsService {
    transactions: TransactionsService,
    resolver: Arc<dyn SanctionResolver>,
}

impl SanctionsService {
    pub fn new(transactions: TransactionsService, resolver: Arc<dyn SanctionResolver>) -> Self {
        Self {
            transactions,
            resolver,
        }
    }

    /// Open sanctions, most urgent first
    pub async fn list(&self, token: &str) -> AppResult<Vec<Sanction>> {
        let snapshot = self.transactions.snapshot(token).await?;
        let resolved = self.resolver.resolved().await?;
        Ok(sanction_view(
            &snapshot.transactions,
            &snapshot.names(),
            &self.transactions.today(),
            &resolved,
        ))
    }

    /// Resolve an open sanction; ids not currently in the view are not found
    pub async fn resolve(&self, token: &str, transaction_id: &str) -> AppResult<Sanction> {
        let open = self.list(token).await?;
        self.resolve_from(open, transaction_id).await
    }

    /// Resolve several sanctions against a single read of the open view
    pub async fn resolve_many(&self, token: &str, ids: &[String]) -> AppResult<BulkResolution> {
        if ids.is_empty() {
            return Err(AppError::Validation("ids must not be empty".to_string()));
        }
        let open = self.list(token).await?;
        self.resolve_many_from(open, ids).await
    }

    async fn resolve_many_from(&self, open: Vec<Sanction>, ids: &[String]) -> AppResult<BulkResolution> {
        let mut requested = HashSet::new();
        let mut outcome = BulkResolution {
            resolved: Vec::new(),
            not_found: Vec::new(),
        };

        for id in ids.iter().filter(|id| requested.insert(id.as_str())) {
            match open.iter().find(|s| &s.transaction.id == id) {
                Some(sanction) => {
                    self.resolver.resolve(id).await?;
                    outcome.resolved.push(sanction.clone());
                }
                None => outcome.not_found.push(id.clone()),
            }
        }

        tracing::info!(
            "Resolved {} sanction(s), {} id(s) had none open",
            outcome.resolved.len(),
            outcome.not_found.len()
        );
        Ok(outcome)
    }

    async fn resolve_from(&self, open: Vec<Sanction>, transaction_id: &str) -> AppResult<Sanction> {
        let sanction = open
            .into_iter()
            .find(|s| s.transaction.id == transaction_id)
            .ok_or_else(|| {
                AppError::NotFound(format!("No open sanction for transaction {}", transaction_id))
            })?;

        self.resolver.resolve(transaction_id).await?;
        tracing::info!(
            "Resolved {:?} sanction on transaction {}",
            sanction.reason,
            transaction_id
        );
        Ok(sanction)
    }

    /// Home page counters
    pub async fn summary(&self, token: &str) -> AppResult<DashboardSummary> {
        let snapshot = self.transactions.snapshot(token).await?;
        let resolved = self.resolver.resolved().await?;
        Ok(summarize(
            &snapshot.transactions,
            &snapshot.items,
            &self.transactions.today(),
            &resolved,
        ))
    }
}
