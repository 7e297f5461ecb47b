//! Business rules the client derives locally from backend records.
//!
//! Everything here is pure: no I/O, no clock reads. Callers pass `today`.

pub mod display;
pub mod navigation;
pub mod pagination;
pub mod subscription;
pub mod validation;

pub use navigation::{guard, visible_sections, Navigation, Route, Section};
pub use pagination::{AfterRemoval, ListState};
pub use subscription::{effective_status, end_date, SubscriptionForm};
