//! Request handlers.

pub mod cache;
pub mod generate;
pub mod groups;
pub mod health;
pub mod jobs;
pub mod pipeline;
pub mod query;
pub mod videos;

pub use cache::*;
pub use generate::*;
pub use groups::*;
pub use health::*;
pub use jobs::*;
pub use pipeline::*;
pub use query::*;
pub use videos::*;
