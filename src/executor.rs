use std::collections::VecDeque;
use std::fs::{self, File};
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use log::{debug, info, warn};

use crate::error::EditorError;
use crate::state::{self, Action, EditorState, Effect, Level};
use crate::ui::View;
use crate::ui::icons::IconResolver;

/// Mode given to every written entry (rwxr-xr-x).
pub const ENTRY_MODE: u32 = 0o755;

pub struct Executor {
    icons: IconResolver,
}

impl Executor {
    pub fn new(icons: IconResolver) -> Self {
        Self { icons }
    }

    pub fn icons(&self) -> &IconResolver {
        &self.icons
    }

    /// Run `action` and every action its effects lead to, returning the settled state.
    pub fn dispatch(&self, state: EditorState, action: Action, view: &mut dyn View) -> EditorState {
        let mut state = state;
        let mut queue = VecDeque::from([action]);

        while let Some(action) = queue.pop_front() {
            let transition = state::handle(&state, action);
            state = transition.state;

            for effect in transition.effects {
                if let Some(next) = self.run(effect, view) {
                    queue.push_back(next);
                }
            }
        }

        state
    }

    fn run(&self, effect: Effect, view: &mut dyn View) -> Option<Action> {
        match effect {
            Effect::Notify(notice) => {
                match notice.level {
                    Level::Info => info!("{}: {}", notice.title, notice.body),
                    Level::Warning | Level::Error => warn!("{}: {}", notice.title, notice.body),
                }
                view.notify(&notice);
                None
            }
            Effect::PreviewIcon(value) => {
                view.show_icon(&self.icons.resolve(&value));
                None
            }
            Effect::ReadFile(path) => {
                let result = read_entry(&path);
                Some(Action::FileRead { path, result })
            }
            Effect::WriteEntry { dir, path, contents } => {
                let result = write_entry(&dir, &path, &contents);
                Some(Action::WriteFinished { path, result })
            }
        }
    }
}

pub fn read_entry(path: &Path) -> Result<String, EditorError> {
    debug!("Reading {:?}", path);
    fs::read_to_string(path).map_err(|e| EditorError::read(path, e))
}

/// Create `dir` if needed, write `contents` to `path` and mark it executable.
pub fn write_entry(dir: &Path, path: &Path, contents: &str) -> Result<(), EditorError> {
    if !dir.exists() {
        debug!("Creating {:?}", dir);
        fs::create_dir_all(dir).map_err(|e| EditorError::create_dir(dir, e))?;
    }

    {
        let mut file = File::create(path).map_err(|e| EditorError::write(path, e))?;
        file.write_all(contents.as_bytes())
            .map_err(|e| EditorError::write(path, e))?;
    }

    fs::set_permissions(path, fs::Permissions::from_mode(ENTRY_MODE))
        .map_err(|e| EditorError::write(path, e))?;

    info!("Wrote {} bytes to {:?}", contents.len(), path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IconConfig;
    use crate::destination::{Destinations, SaveTarget};
    use crate::model::{ExecParam, TextField};
    use crate::state::Notice;
    use crate::ui::icons::IconPreview;
    use tempfile::tempdir;

    #[derive(Default)]
    struct Recorder {
        notices: Vec<Notice>,
        previews: Vec<String>,
    }

    impl View for Recorder {
        fn notify(&mut self, notice: &Notice) {
            self.notices.push(notice.clone());
        }

        fn show_icon(&mut self, preview: &IconPreview) {
            self.previews.push(preview.label());
        }
    }

    fn executor() -> Executor {
        Executor::new(IconResolver::new(&IconConfig { theme_paths: vec![], preview_size: 64 }))
    }

    fn state_in(root: &Path) -> EditorState {
        EditorState::new(Destinations {
            user: root.join("user/applications"),
            system: root.join("system/applications"),
        })
    }

    #[test]
    fn save_creates_directory_and_executable_file() {
        let tmp = tempdir().unwrap();
        let exec = executor();
        let mut view = Recorder::default();

        let mut state = state_in(tmp.path());
        state = exec.dispatch(state, Action::SetText(TextField::Name, "My App".into()), &mut view);
        state = exec.dispatch(state, Action::SetText(TextField::Exec, "my-app".into()), &mut view);
        state = exec.dispatch(state, Action::SetExecParam(ExecParam::File), &mut view);
        let state = exec.dispatch(state, Action::Save(SaveTarget::User), &mut view);

        let path = tmp.path().join("user/applications/my-app.desktop");
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("[Desktop Entry]\nName=My App\n"));
        assert!(written.contains("Exec=my-app %f\n"));

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);

        let last = view.notices.last().unwrap();
        assert_eq!(last.level, Level::Info);
        assert_eq!(last.body, format!("Desktop entry saved to {}", path.display()));
        assert_eq!(state.record.name, "My App");
    }

    #[test]
    fn empty_name_never_touches_the_filesystem() {
        let tmp = tempdir().unwrap();
        let exec = executor();
        let mut view = Recorder::default();

        let custom = tmp.path().join("custom");
        let state = exec.dispatch(
            state_in(tmp.path()),
            Action::Save(SaveTarget::Custom(Some(custom.clone()))),
            &mut view,
        );
        exec.dispatch(state, Action::Save(SaveTarget::User), &mut view);

        assert!(!custom.exists());
        assert!(!tmp.path().join("user").exists());
        assert_eq!(view.notices.len(), 2);
        assert!(view.notices.iter().all(|n| n.title == "Missing Information"));
    }

    #[test]
    fn load_round_trips_a_saved_entry() {
        let tmp = tempdir().unwrap();
        let exec = executor();
        let mut view = Recorder::default();

        let path = tmp.path().join("files.desktop");
        write_entry(
            tmp.path(),
            &path,
            "[Desktop Entry]\nName=Files\nType=Application\nExec=nautilus --new-window %U\nTerminal=false\nNoDisplay=TRUE\n",
        )
        .unwrap();

        let state = exec.dispatch(state_in(tmp.path()), Action::Load(Some(path.clone())), &mut view);
        assert_eq!(state.record.name, "Files");
        assert_eq!(state.record.exec, "nautilus --new-window");
        assert_eq!(state.record.exec_param, ExecParam::Urls);
        assert!(state.record.no_display);
        assert_eq!(view.notices[0].body, format!("Loaded desktop entry from {}", path.display()));
        assert_eq!(view.previews, vec!["No Icon".to_string()]);
    }

    #[test]
    fn unreadable_file_is_reported() {
        let tmp = tempdir().unwrap();
        let exec = executor();
        let mut view = Recorder::default();

        let missing = tmp.path().join("missing.desktop");
        let before = state_in(tmp.path());
        let after = exec.dispatch(before.clone(), Action::Load(Some(missing)), &mut view);

        assert_eq!(after, before);
        assert_eq!(view.notices.len(), 1);
        assert_eq!(view.notices[0].level, Level::Error);
        assert!(view.notices[0].body.starts_with("Failed to load desktop entry: "));
    }

    #[test]
    fn write_into_a_file_path_fails_cleanly() {
        let tmp = tempdir().unwrap();
        let blocker = tmp.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let dir = blocker.join("apps");
        let err = write_entry(&dir, &dir.join("a.desktop"), "x").unwrap_err();
        assert!(err.to_string().contains("blocker"));
    }
}
