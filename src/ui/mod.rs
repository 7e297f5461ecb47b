//! Terminal presentation: user feedback, confirmations, tables.

mod confirm;
mod feedback;
pub mod table;

pub use confirm::{Confirm, StdinConfirm};
#[cfg(test)]
pub(crate) use confirm::testing::ScriptedConfirm;
pub use feedback::{Feedback, Notice, NoticeLevel};
