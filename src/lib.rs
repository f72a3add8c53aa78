//! Session-scoped diet tracking.
//!
//! Meals are recorded under an opaque session token and tagged on-diet or
//! off-diet. The service lists a session's meals and reports adherence
//! metrics, including the longest run of consecutive on-diet meals.

pub mod config;
pub mod db;
pub mod models;
pub mod server;
