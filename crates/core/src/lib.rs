//! Core types and shared functionality for newsdesk.
//!
//! This crate provides:
//! - The news data model (articles, evidence documents, answers)
//! - In-memory result cache with a fixed TTL
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;
pub mod model;

pub use cache::ResultCache;
pub use config::{AppConfig, ConfigError};
pub use error::Error;
pub use model::{Article, ChatAnswer, EvidenceDoc};
