pub mod constants;
pub mod entry;
pub mod error;
pub mod project;
pub mod record;
pub mod report;
mod util;

pub use constants::*;
pub use entry::*;
pub use error::{Error, Result};
pub use project::*;
pub use record::*;
pub use report::*;
pub use util::*;
