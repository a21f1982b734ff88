use crate::error::EditorError;
use crate::model::{DesktopEntryRecord, EntryKind, ExecParam, TextField};
use log::debug;
use std::collections::HashMap;
use std::fmt::Write;

const DESKTOP_ENTRY: &str = "Desktop Entry";

/// Render a record as `.desktop` text. Values are written verbatim.
pub fn serialize(record: &DesktopEntryRecord) -> String {
    let mut out = String::from("[Desktop Entry]\n");

    let mut line = |key: &str, value: &str| {
        let _ = writeln!(out, "{key}={value}");
    };

    line("Name", &record.name);
    if !record.generic_name.is_empty() {
        line("GenericName", &record.generic_name);
    }
    if !record.comment.is_empty() {
        line("Comment", &record.comment);
    }
    line("Type", record.kind.label());
    if !record.exec.is_empty() {
        match record.exec_param.token() {
            Some(token) => line("Exec", &format!("{} {}", record.exec, token)),
            None => line("Exec", &record.exec),
        }
    }
    for field in [TextField::Icon, TextField::StartupWmClass, TextField::Categories] {
        let value = record.text(field);
        if !value.is_empty() {
            line(field.key(), value);
        }
    }
    line("Terminal", bool_str(record.terminal));
    line("NoDisplay", bool_str(record.no_display));

    out
}

/// Read the `[Desktop Entry]` group of `input` into a record.
pub fn parse(input: &str) -> Result<DesktopEntryRecord, EditorError> {
    let group = desktop_entry_group(input).ok_or(EditorError::MissingSection)?;
    let get = |key: &str| -> String { group.get(key).copied().unwrap_or_default().to_string() };

    let mut record = DesktopEntryRecord::default();
    for field in TextField::ALL {
        *record.text_mut(field) = get(field.key());
    }

    if let Some(kind) = group.get("Type") {
        match kind.parse::<EntryKind>() {
            Ok(kind) => record.kind = kind,
            Err(_) => debug!("Unknown Type '{}', keeping {}", kind, record.kind),
        }
    }

    let (exec, param) = split_exec_param(&record.exec);
    record.exec = exec;
    record.exec_param = param;

    record.terminal = get("Terminal").eq_ignore_ascii_case("true");
    record.no_display = get("NoDisplay").eq_ignore_ascii_case("true");

    Ok(record)
}

/// Pull the first field code found, by priority rather than position, out of `exec`.
pub fn split_exec_param(exec: &str) -> (String, ExecParam) {
    for param in ExecParam::PRIORITY {
        let Some(token) = param.token() else { continue };
        if exec.contains(token) {
            return (exec.replace(token, "").trim().to_string(), param);
        }
    }
    (exec.to_string(), ExecParam::None)
}

fn desktop_entry_group(input: &str) -> Option<HashMap<&str, &str>> {
    let mut group: Option<HashMap<&str, &str>> = None;
    let mut in_section = false;

    for line in input.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            in_section = header.strip_suffix(']') == Some(DESKTOP_ENTRY);
            if in_section {
                group.get_or_insert_with(HashMap::new);
            }
            continue;
        }

        if !in_section {
            continue;
        }

        if let Some((key, value)) = line.split_once('=') {
            if let Some(group) = group.as_mut() {
                group.insert(key.trim(), value.trim());
            }
        }
    }

    group
}

fn bool_str(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}
