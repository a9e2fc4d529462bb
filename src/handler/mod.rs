//! Request handling module
//!
//! Routing plus the three route handlers: catalog, download, static assets.

pub mod catalog;
pub mod download;
pub mod router;
pub mod static_files;

pub use router::handle_request;
