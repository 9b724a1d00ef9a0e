//! Data access layer over the external inventory backend

pub mod auth;
pub mod client;
pub mod items;
pub mod paging;
pub mod transactions;

pub use client::BackendClient;

use crate::models::Leg;

/// Main repository struct holding one accessor per backend resource
#[derive(Clone)]
pub struct Repository {
    pub auth: auth::AuthRepository,
    pub items: items::ItemsRepository,
    pub borrows: transactions::TransactionsRepository,
    pub returns: transactions::TransactionsRepository,
}

impl Repository {
    /// Create a new repository over the given backend client
    pub fn new(client: BackendClient) -> Self {
        Self {
            auth: auth::AuthRepository::new(client.clone()),
            items: items::ItemsRepository::new(client.clone()),
            borrows: transactions::TransactionsRepository::new(client.clone(), Leg::Borrow),
            returns: transactions::TransactionsRepository::new(client, Leg::Return),
        }
    }

    pub fn leg(&self, leg: Leg) -> &transactions::TransactionsRepository {
        match leg {
            Leg::Borrow => &self.borrows,
            Leg::Return => &self.returns,
        }
    }
}
