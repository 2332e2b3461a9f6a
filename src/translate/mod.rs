//! Translation between the OpenAI embeddings dialect and the Jina dialect.
//!
//! Requests go caller → upstream, responses go upstream → caller. All
//! translation functions are pure (no I/O).

pub mod request;
pub mod response;
pub mod types;
