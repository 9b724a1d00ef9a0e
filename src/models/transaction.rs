//! Borrow/return transaction model and backend wire records

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use super::enums::{Leg, TransactionStatus};
use crate::error::{AppError, AppResult};

/// One borrow or return request tying a user to an item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub user_email: String,
    /// Student identification number
    #[serde(rename = "userNIM")]
    pub user_nim: String,
    pub user_program_study: Option<String>,
    pub item_id: String,
    /// Item name as reported by the backend, when it denormalizes it
    pub item_name: Option<String>,
    pub borrow_date: DateTime<Utc>,
    /// Due date
    pub return_date: DateTime<Utc>,
    pub status: TransactionStatus,
    /// Reference to the damage report attached to a return request
    pub damaged_item: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Transaction as served by the backend's `/borrow` and `/return` collections.
///
/// Field names drift between backend versions (`startDate`/`endDate` vs
/// `borrowDate`/`returnDate`, numeric vs string ids), so decoding is lenient here and
/// strict in [`TransactionRecord::into_transaction`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    #[serde(default, deserialize_with = "de_opt_id")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default, rename = "userNIM", alias = "userNim")]
    pub user_nim: Option<String>,
    #[serde(default)]
    pub user_program_study: Option<String>,
    #[serde(deserialize_with = "de_id")]
    pub item_id: String,
    #[serde(default)]
    pub item_name: Option<String>,
    #[serde(alias = "startDate", deserialize_with = "de_date")]
    pub borrow_date: DateTime<Utc>,
    #[serde(alias = "endDate", deserialize_with = "de_date")]
    pub return_date: DateTime<Utc>,
    pub status: String,
    #[serde(default)]
    pub damaged_item: Option<String>,
    #[serde(deserialize_with = "de_date")]
    pub created_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "de_opt_date")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl TransactionRecord {
    /// Validate a backend record fetched from the given leg's collection
    pub fn into_transaction(self, leg: Leg) -> AppResult<Transaction> {
        let status = TransactionStatus::from_leg(leg, &self.status).ok_or_else(|| {
            AppError::Validation(format!(
                "Transaction {} has unknown {} status '{}'",
                self.id, leg, self.status
            ))
        })?;

        if self.return_date < self.borrow_date {
            return Err(AppError::Validation(format!(
                "Transaction {} is due ({}) before it was borrowed ({})",
                self.id, self.return_date, self.borrow_date
            )));
        }

        Ok(Transaction {
            id: self.id,
            user_id: self.user_id.unwrap_or_default(),
            user_name: self.user_name.unwrap_or_default(),
            user_email: self.user_email.unwrap_or_default(),
            user_nim: self.user_nim.unwrap_or_default(),
            user_program_study: self.user_program_study,
            item_id: self.item_id,
            item_name: self.item_name.filter(|n| !n.trim().is_empty()),
            borrow_date: self.borrow_date,
            return_date: self.return_date,
            status,
            damaged_item: self.damaged_item,
            updated_at: self.updated_at.unwrap_or(self.created_at),
            created_at: self.created_at,
        })
    }
}

/// Parse a backend or form date: RFC 3339, naive `YYYY-MM-DDTHH:MM:SS`, or `YYYY-MM-DD`
/// (taken as midnight UTC).
pub fn parse_flexible_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn de_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_flexible_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid date '{}'", raw)))
}

fn de_opt_date<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error> {
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) => parse_flexible_date(&raw)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date '{}'", raw))),
        None => Ok(None),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }
    }
}

/// Ids are opaque strings; some backend versions serialize them as numbers
pub(crate) fn de_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    RawId::deserialize(deserializer).map(String::from)
}

fn de_opt_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<RawId>::deserialize(deserializer)?.map(String::from))
}
