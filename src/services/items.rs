//! Inventory item service

use serde_json::Value;
use validator::Validate;

use crate::{
    error::AppResult,
    models::{Envelope, Item, ItemPayload, ItemQuery},
    repository::Repository,
};

#[derive(Clone)]
pub struct ItemsService {
    repository: Repository,
    default_limit: u32,
}

impl ItemsService {
    pub fn new(repository: Repository, default_limit: u32) -> Self {
        Self {
            repository,
            default_limit,
        }
    }

    /// List one page of items, optionally narrowed by name or id
    pub async fn list(&self, token: &str, query: &ItemQuery) -> AppResult<Vec<Item>> {
        let page = query.page.unwrap_or(1).max(1);
        let limit = query.limit.unwrap_or(self.default_limit).max(1);
        let items = self.repository.items.list(token, page, limit).await?;

        Ok(match query.q.as_deref() {
            Some(q) => items.into_iter().filter(|item| item.matches(q)).collect(),
            None => items,
        })
    }

    pub async fn get(&self, token: &str, id: &str) -> AppResult<Item> {
        self.repository.items.get(token, id).await
    }

    pub async fn create(&self, token: &str, item: &ItemPayload) -> AppResult<Envelope<Item>> {
        item.validate()?;
        let created = self.repository.items.create(token, item).await?;
        tracing::info!("Created item '{}' (quantity {})", item.name, item.quantity);
        Ok(created)
    }

    pub async fn update(&self, token: &str, id: &str, item: &ItemPayload) -> AppResult<Envelope<Item>> {
        item.validate()?;
        self.repository.items.update(token, id, item).await
    }

    pub async fn delete(&self, token: &str, id: &str) -> AppResult<Envelope<Value>> {
        let deleted = self.repository.items.delete(token, id).await?;
        tracing::info!("Deleted item {}", id);
        Ok(deleted)
    }
}
