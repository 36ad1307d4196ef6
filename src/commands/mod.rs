//! Command implementations
//!
//! `porcelain` holds the user-facing operations, all implemented on top of
//! [`Repository`](crate::areas::repository::Repository).

pub mod porcelain;
