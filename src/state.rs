//! Editor state, the actions that change it, and the effects they request.

use std::path::PathBuf;

use crate::codec;
use crate::destination::{self, Destinations, SaveTarget};
use crate::error::EditorError;
use crate::model::{DesktopEntryRecord, EntryKind, ExecParam, TextField};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warning,
    Error,
}

/// A user-visible message, shown modally by the front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: Level,
    pub title: String,
    pub body: String,
}

impl Notice {
    fn new(level: Level, title: &str, body: impl Into<String>) -> Self {
        Self { level, title: title.to_string(), body: body.into() }
    }
}

#[derive(Debug)]
pub enum Action {
    SetText(TextField, String),
    SetKind(EntryKind),
    SetExecParam(ExecParam),
    SetTerminal(bool),
    SetNoDisplay(bool),
    /// Result of the executable picker.
    ExecutablePicked(Option<PathBuf>),
    /// Result of the icon picker.
    IconPicked(Option<PathBuf>),
    Save(SaveTarget),
    WriteFinished { path: PathBuf, result: Result<(), EditorError> },
    /// Result of the desktop entry picker.
    Load(Option<PathBuf>),
    FileRead { path: PathBuf, result: Result<String, EditorError> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Notify(Notice),
    ReadFile(PathBuf),
    WriteEntry { dir: PathBuf, path: PathBuf, contents: String },
    PreviewIcon(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorState {
    pub record: DesktopEntryRecord,
    /// Bumped on every change to `record`.
    pub revision: u64,
    pub destinations: Destinations,
}

#[derive(Debug)]
pub struct Transition {
    pub state: EditorState,
    pub effects: Vec<Effect>,
}

impl EditorState {
    pub fn new(destinations: Destinations) -> Self {
        Self {
            record: DesktopEntryRecord::default(),
            revision: 0,
            destinations,
        }
    }

    fn with_record(&self, record: DesktopEntryRecord) -> Self {
        Self {
            record,
            revision: self.revision + 1,
            destinations: self.destinations.clone(),
        }
    }

    fn edit(&self, f: impl FnOnce(&mut DesktopEntryRecord)) -> Self {
        let mut record = self.record.clone();
        f(&mut record);
        self.with_record(record)
    }
}

/// Apply `action` to `state`, returning the next state and the side effects to run.
pub fn handle(state: &EditorState, action: Action) -> Transition {
    let mut effects = Vec::new();

    let next = match action {
        Action::SetText(field, value) => {
            if field == TextField::Icon {
                effects.push(Effect::PreviewIcon(value.clone()));
            }
            state.edit(|r| *r.text_mut(field) = value)
        }
        Action::SetKind(kind) => state.edit(|r| r.kind = kind),
        Action::SetExecParam(param) => state.edit(|r| r.exec_param = param),
        Action::SetTerminal(value) => state.edit(|r| r.terminal = value),
        Action::SetNoDisplay(value) => state.edit(|r| r.no_display = value),

        Action::ExecutablePicked(None) | Action::IconPicked(None) | Action::Load(None) => {
            state.clone()
        }
        Action::ExecutablePicked(Some(path)) => {
            let exec = path.to_string_lossy().into_owned();
            state.edit(|r| r.exec = exec)
        }
        Action::IconPicked(Some(path)) => {
            let icon = path.to_string_lossy().into_owned();
            effects.push(Effect::PreviewIcon(icon.clone()));
            state.edit(|r| r.icon = icon)
        }

        Action::Save(target) => {
            if state.record.name.is_empty() {
                effects.push(Effect::Notify(Notice::new(
                    Level::Warning,
                    "Missing Information",
                    EditorError::MissingName.to_string(),
                )));
            } else if let Some(dir) = state.destinations.resolve(&target) {
                let path = destination::entry_path(&dir, &state.record.name);
                effects.push(Effect::WriteEntry {
                    dir,
                    path,
                    contents: codec::serialize(&state.record),
                });
            }
            state.clone()
        }
        Action::WriteFinished { path, result } => {
            let notice = match result {
                Ok(()) => Notice::new(
                    Level::Info,
                    "Success",
                    format!("Desktop entry saved to {}", path.display()),
                ),
                Err(err) => Notice::new(Level::Error, error_title(&err), err.to_string()),
            };
            effects.push(Effect::Notify(notice));
            state.clone()
        }

        Action::Load(Some(path)) => {
            effects.push(Effect::ReadFile(path));
            state.clone()
        }
        Action::FileRead { path, result } => match result.and_then(|text| codec::parse(&text)) {
            Ok(record) => {
                effects.push(Effect::Notify(Notice::new(
                    Level::Info,
                    "Success",
                    format!("Loaded desktop entry from {}", path.display()),
                )));
                effects.push(Effect::PreviewIcon(record.icon.clone()));
                state.with_record(record)
            }
            Err(err) => {
                effects.push(Effect::Notify(Notice::new(
                    Level::Error,
                    "Error",
                    format!("Failed to load desktop entry: {err}"),
                )));
                state.clone()
            }
        },
    };

    Transition { state: next, effects }
}

fn error_title(err: &EditorError) -> &'static str {
    match err.kind() {
        crate::error::ErrorKind::Permission => "Permission Error",
        _ => "Error",
    }
}
