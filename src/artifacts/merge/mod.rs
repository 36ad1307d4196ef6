//! Merge support
//!
//! - `split_point`: closest common ancestor search over any commit loader
//! - `commit_graph`: history traversal backed by the object database
//! - `resolution`: per-path three-way classification and conflict content

pub mod commit_graph;
pub mod resolution;
pub mod split_point;
