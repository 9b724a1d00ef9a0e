//! Business logic services

pub mod auth;
pub mod items;
pub mod sanctions;
pub mod transactions;

use std::sync::Arc;

use crate::{config::AppConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub items: items::ItemsService,
    pub transactions: transactions::TransactionsService,
    pub sanctions: sanctions::SanctionsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, config: &AppConfig) -> Self {
        Self::with_resolver(
            repository,
            config,
            Arc::new(sanctions::LocalSanctionLedger::default()),
        )
    }

    /// Same as [`Services::new`] with a custom sanction resolver
    pub fn with_resolver(
        repository: Repository,
        config: &AppConfig,
        resolver: Arc<dyn sanctions::SanctionResolver>,
    ) -> Self {
        let transactions = transactions::TransactionsService::new(
            repository.clone(),
            config.backend.borrow_page_limit,
            config.backend.item_page_limit,
            config.dashboard.timezone(),
        );

        Self {
            auth: auth::AuthService::new(repository.clone()),
            items: items::ItemsService::new(repository, config.backend.item_page_limit),
            sanctions: sanctions::SanctionsService::new(transactions.clone(), resolver),
            transactions,
        }
    }
}
