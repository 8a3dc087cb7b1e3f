pub mod archive;
pub mod config;
pub mod content_type;
pub mod fetch;
pub mod observability;
pub mod pipeline;
