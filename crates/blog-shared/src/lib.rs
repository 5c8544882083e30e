//! # Blog Shared
//!
//! Wire types of the blog HTTP API: request bodies, response bodies and the
//! problem-details error document.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorResponse};
