//! Walking paginated backend collections

use std::collections::HashSet;
use std::future::Future;

use crate::{
    error::AppResult,
    models::{Item, Transaction},
};

/// Records identified by a backend id
pub trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for Transaction {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for Item {
    fn key(&self) -> &str {
        &self.id
    }
}

/// Fetch pages `1, 2, ...` of `limit` records until the collection is exhausted.
///
/// Stops on a short page, or on a page that adds no unseen ids (a backend that ignores
/// `page` keeps returning the same records).
pub async fn fetch_all<T, F, Fut>(limit: u32, mut fetch: F) -> AppResult<Vec<T>>
where
    T: Keyed,
    F: FnMut(u32, u32) -> Fut,
    Fut: Future<Output = AppResult<Vec<T>>>,
{
    let limit = limit.max(1);
    let mut seen = HashSet::new();
    let mut records = Vec::new();
    let mut page = 1;

    loop {
        let batch = fetch(page, limit).await?;
        let full_page = batch.len() >= limit as usize;
        let before = records.len();

        for record in batch {
            if seen.insert(record.key().to_string()) {
                records.push(record);
            }
        }

        if !full_page || records.len() == before {
            break;
        }
        page += 1;
    }

    tracing::debug!("Fetched {} records over {} page(s)", records.len(), page);
    Ok(records)
}
