//! Borrow/return transaction lifecycle engine
//!
//! Pure functions over transaction and item collections already fetched from the
//! inventory backend:
//!
//! - [`transitions`]: the status state machine and the intents sent back to the backend
//! - [`due`]: calendar-day overdue arithmetic in the reference timezone
//! - [`sanctions`]: the derived sanction view
//! - [`listing`]: search, filter and sort policy of the status list
//! - [`item_names`]: `itemId -> name` resolution
//! - [`summary`]: home page counters
//!
//! Nothing here performs I/O or reads the clock; callers pass "today" in as a
//! [`CalendarDay`].

pub mod due;
pub mod item_names;
pub mod listing;
pub mod sanctions;
pub mod summary;
pub mod transitions;

pub use due::{CalendarDay, DueInfo};
pub use item_names::ItemNameLookup;
pub use listing::{ListView, StatusFilter, TransactionRow};
pub use sanctions::{sanction_view, Sanction, SanctionReason};
pub use summary::{summarize, DashboardSummary};
pub use transitions::{apply_transition, decide, next_status, return_request_for, StatusIntent};
