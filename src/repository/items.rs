//! Backend item endpoints

use reqwest::Method;
use serde_json::Value;

use super::client::{require_data, BackendClient};
use super::paging::fetch_all;
use crate::{
    error::AppResult,
    models::{Envelope, Item, ItemPayload, Listing},
};

#[derive(Clone)]
pub struct ItemsRepository {
    client: BackendClient,
}

impl ItemsRepository {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, token: &str, page: u32, limit: u32) -> AppResult<Vec<Item>> {
        let envelope: Envelope<Listing<Item>> = self
            .client
            .get(
                &["item"],
                token,
                &[("page", page.to_string()), ("limit", limit.to_string())],
            )
            .await?;
        Ok(envelope.data.map(Listing::into_vec).unwrap_or_default())
    }

    /// Whole catalog, `limit` items per request
    pub async fn list_all(&self, token: &str, limit: u32) -> AppResult<Vec<Item>> {
        fetch_all(limit, |page, limit| self.list(token, page, limit)).await
    }

    pub async fn get(&self, token: &str, id: &str) -> AppResult<Item> {
        let envelope = self.client.get(&["item", id], token, &[]).await?;
        require_data(envelope, "item")
    }

    pub async fn create(&self, token: &str, item: &ItemPayload) -> AppResult<Envelope<Item>> {
        self.client
            .send_json(Method::POST, &["item"], Some(token), item)
            .await
    }

    pub async fn update(&self, token: &str, id: &str, item: &ItemPayload) -> AppResult<Envelope<Item>> {
        self.client
            .send_json(Method::PUT, &["item", id], Some(token), item)
            .await
    }

    pub async fn delete(&self, token: &str, id: &str) -> AppResult<Envelope<Value>> {
        self.client.delete(&["item", id], token).await
    }
}
