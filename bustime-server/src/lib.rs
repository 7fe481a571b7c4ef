//! Bus route search server.
//!
//! Proxies the MTA Bus Time route catalog and answers "which routes
//! have this in their name?" as an HTML fragment.

pub mod bustime;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod web;
