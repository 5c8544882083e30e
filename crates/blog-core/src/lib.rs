//! # Blog Core
//!
//! The domain layer of the blog: posts, categories, tags and the rules that
//! apply when they are stored.
//! This crate contains pure business logic with zero infrastructure dependencies.

pub mod admin;
pub mod domain;
pub mod error;
pub mod excerpt;
pub mod ports;
pub mod service;
pub mod urls;

pub use error::{DomainError, RepoError};
