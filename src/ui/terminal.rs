use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use directories::BaseDirs;

use super::icons::IconPreview;
use super::{PickKind, Picker, View};
use crate::state::{Level, Notice};

/// Line-oriented front end: pickers are prompts, notices are printed.
pub struct TerminalUi<R, W> {
    input: R,
    output: W,
    home: PathBuf,
    entries_dir: PathBuf,
}

impl<R: BufRead, W: Write> TerminalUi<R, W> {
    pub fn new(input: R, output: W, entries_dir: PathBuf) -> Self {
        let home = BaseDirs::new()
            .map(|dirs| dirs.home_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("/"));
        Self { input, output, home, entries_dir }
    }

    /// Prompt and read one trimmed line. `None` at end of input.
    pub fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    pub fn print(&mut self, text: &str) {
        let _ = writeln!(self.output, "{text}");
    }

    fn start_dir(&self, kind: PickKind) -> &Path {
        match kind {
            PickKind::DesktopEntry => &self.entries_dir,
            PickKind::Executable | PickKind::Icon => &self.home,
        }
    }

    fn answer_to_path(&self, answer: &str, base: &Path) -> PathBuf {
        if let Some(rest) = answer.strip_prefix("~/") {
            return self.home.join(rest);
        }
        base.join(answer)
    }

    fn prompt_path(&mut self, title: &str, base: PathBuf, hint: &str) -> Option<PathBuf> {
        let prompt = format!("{title} [{}]{hint}: ", base.display());
        match self.read_line(&prompt) {
            Ok(Some(answer)) if !answer.is_empty() => Some(self.answer_to_path(&answer, &base)),
            _ => None,
        }
    }
}

impl<R: BufRead, W: Write> Picker for TerminalUi<R, W> {
    fn pick_file(&mut self, kind: PickKind) -> Option<PathBuf> {
        let hint = match kind.extensions() {
            [] => String::new(),
            exts => format!(" (*.{})", exts.join(" *.")),
        };
        let base = self.start_dir(kind).to_path_buf();
        self.prompt_path(kind.title(), base, &hint)
    }

    fn pick_directory(&mut self) -> Option<PathBuf> {
        let base = self.home.clone();
        self.prompt_path("Select Directory", base, "")
    }
}

impl<R: BufRead, W: Write> View for TerminalUi<R, W> {
    fn notify(&mut self, notice: &Notice) {
        let tag = match notice.level {
            Level::Info => "info",
            Level::Warning => "warning",
            Level::Error => "error",
        };
        self.print(&format!("[{tag}] {}: {}", notice.title, notice.body));
    }

    fn show_icon(&mut self, preview: &IconPreview) {
        self.print(&format!("Icon preview: {}", preview.label()));
    }
}
