//! Backend borrow and return collections

use chrono::SecondsFormat;
use reqwest::{
    multipart::{Form, Part},
    Method,
};
use serde_json::{json, Value};

use super::client::BackendClient;
use super::paging::fetch_all;
use crate::{
    error::{AppError, AppResult},
    models::{Decision, Envelope, Leg, Listing, ReturnRequest, Transaction, TransactionRecord},
};

/// One leg's collection (`/borrow` or `/return`)
#[derive(Clone)]
pub struct TransactionsRepository {
    client: BackendClient,
    leg: Leg,
}

impl TransactionsRepository {
    pub fn new(client: BackendClient, leg: Leg) -> Self {
        Self { client, leg }
    }

    pub fn leg(&self) -> Leg {
        self.leg
    }

    pub async fn list(&self, token: &str, page: u32, limit: u32) -> AppResult<Vec<Transaction>> {
        let envelope: Envelope<Listing<TransactionRecord>> = self
            .client
            .get(
                &[self.leg.path()],
                token,
                &[("page", page.to_string()), ("limit", limit.to_string())],
            )
            .await?;

        envelope
            .data
            .map(Listing::into_vec)
            .unwrap_or_default()
            .into_iter()
            .map(|record| record.into_transaction(self.leg))
            .collect()
    }

    /// Every record of the leg, `limit` per request
    pub async fn list_all(&self, token: &str, limit: u32) -> AppResult<Vec<Transaction>> {
        fetch_all(limit, |page, limit| self.list(token, page, limit)).await
    }

    /// Send an operator decision. Returns the updated record when the backend echoes it.
    pub async fn set_status(
        &self,
        token: &str,
        id: &str,
        decision: Decision,
    ) -> AppResult<(Option<Transaction>, Option<String>)> {
        let envelope: Envelope<Value> = self
            .client
            .send_json(
                Method::POST,
                &[self.leg.path(), id, "status"],
                Some(token),
                &json!({ "status": decision }),
            )
            .await?;

        Ok((self.echoed(envelope.data), envelope.message))
    }

    /// Open a return leg (`POST /return`, multipart)
    pub async fn submit_return(
        &self,
        token: &str,
        request: &ReturnRequest,
    ) -> AppResult<(Option<Transaction>, Option<String>)> {
        let mut form = Form::new()
            .text("itemId", request.item_id.clone())
            .text(
                "borrowDate",
                request.borrow_date.to_rfc3339_opts(SecondsFormat::Millis, true),
            )
            .text(
                "returnDate",
                request.return_date.to_rfc3339_opts(SecondsFormat::Millis, true),
            );

        if let Some(attachment) = &request.damaged_item {
            let mut part = Part::bytes(attachment.bytes.clone()).file_name(attachment.file_name.clone());
            if let Some(content_type) = &attachment.content_type {
                part = part
                    .mime_str(content_type)
                    .map_err(|e| AppError::Validation(format!("Invalid attachment type: {}", e)))?;
            }
            form = form.part("damagedItem", part);
        }

        let envelope: Envelope<Value> = self
            .client
            .send_multipart(&[Leg::Return.path()], token, form)
            .await?;

        Ok((
            envelope
                .data
                .and_then(|v| serde_json::from_value::<TransactionRecord>(v).ok())
                .and_then(|record| record.into_transaction(Leg::Return).ok()),
            envelope.message,
        ))
    }

    /// Decode a record echoed by the backend; anything else is ignored
    fn echoed(&self, data: Option<Value>) -> Option<Transaction> {
        let record = serde_json::from_value::<TransactionRecord>(data?).ok()?;
        match record.into_transaction(self.leg) {
            Ok(tx) => Some(tx),
            Err(e) => {
                tracing::warn!("Ignoring malformed {} record from backend: {}", self.leg, e);
                None
            }
        }
    }
}
