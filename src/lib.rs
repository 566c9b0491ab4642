//! Single-author RSS republisher.
//!
//! Fetches a multi-author RSS feed, keeps the items written by one author
//! and serves the result as a new RSS 2.0 feed over HTTP.

pub mod config;
pub mod feed;
pub mod server;
pub mod util;
