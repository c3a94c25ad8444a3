// Engine module - rebuilds the conversation structure of a session
// Sits between raw records (types/providers) and the runtime/CLI layers

mod commands;
mod context;
mod flags;
mod hierarchy;
mod matcher;
pub mod report;
mod sidechain;
mod tokens;
mod transform;

pub use commands::link_command_outputs;
pub use flags::flag_missing;
pub use report::SessionRef;
pub use tokens::aggregate_tokens;
pub use transform::{format_timestamp, transform_record};

use cclog_types::{ProcessedEntry, RawRecord};

use context::ProcessingContext;

// Façade API - the only entry point the runtime layer uses

/// Rebuild the processed forest of one session from its raw records.
///
/// Records are taken in file order (main session first, then sub-agent files).
/// Passes run in a fixed order:
///
/// 1. transform every non-summary record
/// 2. pair tool calls with their results
/// 3. reconcile sidechains and attach them to Task calls
/// 4. aggregate per-entry token totals
/// 5. flag missing results and sidechains
/// 6. merge local command output into its command entry (top level)
///
/// Infallible: malformed records degrade to sparse entries instead of errors.
pub fn process_entries(records: &[RawRecord]) -> Vec<ProcessedEntry> {
    let mut ctx = ProcessingContext::new(records);
    matcher::match_tool_results(&mut ctx);
    sidechain::link_sidechains(&mut ctx);

    let mut entries = hierarchy::materialize(&ctx);
    tokens::aggregate_tokens(&mut entries);
    flags::flag_missing(&mut entries);
    commands::link_command_outputs(&mut entries);
    entries
}
