//! Knowledge Tree - Checkbox tree views for brain knowledge and cloud storage
//!
//! This crate provides functionality for:
//! - Building key-addressed trees from slash-separated file paths
//! - Building the same trees from parent-pointer and path-keyed provider listings
//! - Paging through Dropbox and Google Drive listings and downloading checked files

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod knowledge;
pub mod listing;
pub mod selection;
pub mod session;
pub mod tree;

// Re-export commonly used types
pub use config::Config;
pub use error::{KnowledgeTreeError, Result};
