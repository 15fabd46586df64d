mod anchors;
mod export;
mod post;
mod slug;
mod toc;
mod topic;

pub use anchors::{anchor_document, handle_anchors_command};
pub use export::handle_export_command;
pub use post::handle_post_command;
pub use slug::handle_slug_command;
pub use toc::{format_toc, handle_toc_command};
pub use topic::handle_topic_command;
