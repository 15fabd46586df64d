//! Blog posts and topic categories, stored as one JSON document.

mod post;
mod store;
mod topic;

pub use post::{Post, PostDraft};
pub use store::PostStore;
pub use topic::{Topic, TopicDraft};
