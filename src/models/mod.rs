//! Data models for the inventory dashboard

pub mod enums;
pub mod envelope;
pub mod item;
pub mod return_request;
pub mod transaction;
pub mod user;

// Re-export commonly used types
pub use enums::{Decision, Leg, TransactionStatus, TransitionAction};
pub use envelope::{Envelope, Listing};
pub use item::{Item, ItemPayload, ItemQuery};
pub use return_request::{Attachment, ReturnRequest};
pub use transaction::{Transaction, TransactionRecord};
pub use user::{LoginRequest, RegisterRequest, TokenPair};
