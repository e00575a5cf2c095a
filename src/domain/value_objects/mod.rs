pub mod citation;
pub mod class_name;
pub mod content_digest;
pub mod plan;

pub use citation::{Citation, SourceChunk, bind_citations, extract_markers};
pub use class_name::ClassName;
pub use content_digest::ContentDigest;
pub use plan::Plan;
