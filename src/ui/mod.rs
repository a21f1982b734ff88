use std::path::PathBuf;

use crate::state::Notice;
use icons::IconPreview;

pub mod icons;
pub mod terminal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickKind {
    Executable,
    Icon,
    DesktopEntry,
}

impl PickKind {
    pub fn title(self) -> &'static str {
        match self {
            PickKind::Executable => "Select Executable",
            PickKind::Icon => "Select Icon",
            PickKind::DesktopEntry => "Open Desktop Entry",
        }
    }

    /// File name extensions offered by default; empty means any file.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            PickKind::Executable => &[],
            PickKind::Icon => &["png", "xpm", "jpg", "svg"],
            PickKind::DesktopEntry => &["desktop"],
        }
    }
}

/// File and directory choosers. `None` means the user cancelled.
pub trait Picker {
    fn pick_file(&mut self, kind: PickKind) -> Option<PathBuf>;
    fn pick_directory(&mut self) -> Option<PathBuf>;
}

/// Where notices and the icon preview end up.
pub trait View {
    fn notify(&mut self, notice: &Notice);
    fn show_icon(&mut self, preview: &IconPreview);
}
