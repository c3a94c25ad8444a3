mod context;

pub mod agent_sessions;
pub mod around;
pub mod errors;
pub mod logs;
pub mod projects;
pub mod sessions;
pub mod stats;
pub mod summary;
pub mod timeline;
pub mod tools;

pub use context::HandlerContext;
