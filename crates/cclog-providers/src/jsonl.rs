use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use cclog_types::RawRecord;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::Result;

/// Read one JSONL file into raw records.
///
/// Blank lines, lines that are not valid records, records without a uuid and
/// `summary` records are skipped. Only I/O failures are errors.
pub fn read_jsonl_file(path: &Path) -> Result<Vec<RawRecord>> {
    let reader = BufReader::new(File::open(path)?);
    let mut records = Vec::new();

    for (line_num, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let record = match RawRecord::from_line(&line) {
            Ok(record) => record,
            Err(err) => {
                debug!(path = %path.display(), line = line_num + 1, error = %err, "skipping unparsable line");
                continue;
            }
        };
        if record.is_summary() {
            continue;
        }
        if record.uuid.is_empty() {
            debug!(path = %path.display(), line = line_num + 1, record_type = %record.record_type, "skipping record without uuid");
            continue;
        }
        records.push(record);
    }

    Ok(records)
}

/// Read a main session file followed by every sub-agent file of that session.
///
/// Sub-agent files live in `<dir>/<session-id>/subagents/agent-*.jsonl` and are
/// appended in file-name order. An unreadable sub-agent file is skipped.
pub fn read_session_records(main_file: &Path) -> Result<Vec<RawRecord>> {
    let mut records = read_jsonl_file(main_file)?;

    for agent_file in subagent_files(main_file) {
        match read_jsonl_file(&agent_file) {
            Ok(agent_records) => {
                debug!(
                    file = %agent_file.display(),
                    count = agent_records.len(),
                    "loaded sub-agent records"
                );
                records.extend(agent_records);
            }
            Err(err) => {
                warn!(file = %agent_file.display(), error = %err, "skipping unreadable sub-agent file");
            }
        }
    }

    Ok(records)
}

/// `agent-*.jsonl` files belonging to the session stored at `main_file`, sorted by name.
pub fn subagent_files(main_file: &Path) -> Vec<PathBuf> {
    let (Some(dir), Some(session_id)) = (main_file.parent(), main_file.file_stem()) else {
        return Vec::new();
    };
    let subagents_dir = dir.join(session_id).join("subagents");
    if !subagents_dir.is_dir() {
        return Vec::new();
    }

    WalkDir::new(&subagents_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_agent_file_name(&e.file_name().to_string_lossy()))
        .map(|e| e.into_path())
        .collect()
}

fn is_agent_file_name(name: &str) -> bool {
    name.starts_with("agent-") && name.ends_with(".jsonl")
}
