//! Interactive `edit` session over stdin.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use log::debug;

use crate::codec;
use crate::destination::SaveTarget;
use crate::executor::Executor;
use crate::model::{EntryKind, ExecParam, TextField};
use crate::state::{Action, EditorState};
use crate::ui::terminal::TerminalUi;
use crate::ui::{PickKind, Picker};

const HELP: &str = "\
commands:
  set <field> [value]        name, genericname, comment, exec, icon, startupwmclass, categories
  type <kind>                Application, Link or Directory
  param <token>              None, %f, %F, %u, %U, %i, %c, %k
  params                     describe exec parameters
  terminal on|off
  nodisplay on|off
  browse exec|icon           pick a file
  load [file]                load a desktop entry
  save user|system|custom    write the entry
  show                       print the entry as it would be saved
  help
  quit";

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Set(TextField, String),
    Kind(EntryKind),
    Param(ExecParam),
    Params,
    Terminal(bool),
    NoDisplay(bool),
    Browse(PickKind),
    Load(Option<PathBuf>),
    Save(SaveKind),
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveKind {
    User,
    System,
    Custom,
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word {
        "set" => {
            let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            Ok(Command::Set(field.parse()?, value.trim().to_string()))
        }
        "type" => Ok(Command::Kind(rest.parse()?)),
        "param" => Ok(Command::Param(rest.parse()?)),
        "params" => Ok(Command::Params),
        "terminal" => Ok(Command::Terminal(on_off(rest)?)),
        "nodisplay" => Ok(Command::NoDisplay(on_off(rest)?)),
        "browse" => match rest {
            "exec" => Ok(Command::Browse(PickKind::Executable)),
            "icon" => Ok(Command::Browse(PickKind::Icon)),
            _ => Err("browse exec|icon".to_string()),
        },
        "load" if rest.is_empty() => Ok(Command::Load(None)),
        "load" => Ok(Command::Load(Some(PathBuf::from(rest)))),
        "save" => match rest {
            "user" => Ok(Command::Save(SaveKind::User)),
            "system" => Ok(Command::Save(SaveKind::System)),
            "custom" => Ok(Command::Save(SaveKind::Custom)),
            _ => Err("save user|system|custom".to_string()),
        },
        "show" => Ok(Command::Show),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(format!("unknown command '{other}', try 'help'")),
    }
}

fn on_off(value: &str) -> Result<bool, String> {
    match value {
        "on" | "true" | "yes" => Ok(true),
        "off" | "false" | "no" => Ok(false),
        _ => Err(format!("expected on or off, got '{value}'")),
    }
}

pub struct Session<R, W> {
    ui: TerminalUi<R, W>,
    executor: Executor,
    state: EditorState,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(ui: TerminalUi<R, W>, executor: Executor, state: EditorState) -> Self {
        Self { ui, executor, state }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn apply(&mut self, action: Action) {
        debug!("Dispatching {:?}", action);
        self.state = self.executor.dispatch(self.state.clone(), action, &mut self.ui);
    }

    pub fn run(&mut self) -> io::Result<()> {
        self.ui.print("Desktop Entry Creator. Type 'help' for commands.");

        while let Some(line) = self.ui.read_line("> ")? {
            if line.is_empty() {
                continue;
            }
            match parse_command(&line) {
                Ok(Command::Quit) => break,
                Ok(command) => self.execute(command),
                Err(message) => self.ui.print(&message),
            }
        }

        Ok(())
    }

    fn execute(&mut self, command: Command) {
        let action = match command {
            Command::Set(field, value) => Action::SetText(field, value),
            Command::Kind(kind) => Action::SetKind(kind),
            Command::Param(param) => Action::SetExecParam(param),
            Command::Terminal(value) => Action::SetTerminal(value),
            Command::NoDisplay(value) => Action::SetNoDisplay(value),
            Command::Browse(PickKind::Icon) => Action::IconPicked(self.ui.pick_file(PickKind::Icon)),
            Command::Browse(kind) => Action::ExecutablePicked(self.ui.pick_file(kind)),
            Command::Load(Some(path)) => Action::Load(Some(path)),
            Command::Load(None) => Action::Load(self.ui.pick_file(PickKind::DesktopEntry)),
            Command::Save(SaveKind::User) => Action::Save(SaveTarget::User),
            Command::Save(SaveKind::System) => Action::Save(SaveTarget::System),
            Command::Save(SaveKind::Custom) => {
                Action::Save(SaveTarget::Custom(self.ui.pick_directory()))
            }
            Command::Params => {
                for param in ExecParam::PRIORITY {
                    self.ui.print(&format!("{param}: {}", param.description()));
                }
                return;
            }
            Command::Show => {
                let text = codec::serialize(&self.state.record);
                self.ui.print(text.trim_end());
                return;
            }
            Command::Help => {
                self.ui.print(HELP);
                return;
            }
            Command::Quit => return,
        };
        self.apply(action);
    }
}
