//! Working tree status inspection
//!
//! - `file_change`: kinds of unstaged changes
//! - `inspector`: detects unstaged changes of one path
//! - `status_info`: the five-section status report

pub mod file_change;
pub mod inspector;
pub mod status_info;
