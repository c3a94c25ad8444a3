use cclog_types::{ProcessedEntry, TAG_COMMAND_STDOUT, extract_tag};

/// Merge a local command entry with the following entry holding its stdout.
///
/// The stdout payload moves into the command's `command_output`; the following
/// entry keeps its place (and uuid) with its content blanked.
pub fn link_command_outputs(entries: &mut [ProcessedEntry]) {
    let marker = format!("<{}>", TAG_COMMAND_STDOUT);

    for i in 1..entries.len() {
        let (head, tail) = entries.split_at_mut(i);
        let current = &mut head[i - 1];
        let next = &mut tail[0];

        if current.command.is_command_message && next.is_user() && next.content.contains(&marker) {
            current.command.command_output = extract_tag(&next.content, TAG_COMMAND_STDOUT)
                .unwrap_or_default()
                .to_string();
            next.content.clear();
        }
    }
}
