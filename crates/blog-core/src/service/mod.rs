//! Use-case services layered over the repository ports.

mod post_service;

pub use post_service::PostService;
