use std::path::{Path, PathBuf};

/// Where a save action writes the entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveTarget {
    User,
    System,
    /// Directory chosen by the user; `None` when the picker was cancelled.
    Custom(Option<PathBuf>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destinations {
    pub user: PathBuf,
    pub system: PathBuf,
}

impl Destinations {
    /// Directory for `target`, or `None` for a cancelled custom pick.
    pub fn resolve(&self, target: &SaveTarget) -> Option<PathBuf> {
        match target {
            SaveTarget::User => Some(self.user.clone()),
            SaveTarget::System => Some(self.system.clone()),
            SaveTarget::Custom(dir) => dir.clone(),
        }
    }
}

/// `My App` -> `my-app.desktop`
pub fn file_name_for(name: &str) -> String {
    format!("{}.desktop", name.to_lowercase().replace(' ', "-"))
}

pub fn entry_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(file_name_for(name))
}
