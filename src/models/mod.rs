//! API record types, split by resource.

pub mod activity;
pub mod client;
pub mod common;
pub mod dashboard;
pub mod employee;
pub mod subscription;
pub mod trash;
pub mod user;

pub use activity::*;
pub use client::*;
pub use common::*;
pub use dashboard::*;
pub use employee::*;
pub use subscription::*;
pub use trash::*;
pub use user::*;
