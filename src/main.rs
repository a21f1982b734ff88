mod codec;
mod config;
mod destination;
mod error;
mod executor;
mod model;
mod session;
mod state;
mod ui;

use std::io;
use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use log::debug;

use crate::config::load_config;
use crate::destination::SaveTarget;
use crate::executor::Executor;
use crate::model::{EntryKind, ExecParam, TextField};
use crate::session::Session;
use crate::state::{Action, EditorState};
use crate::ui::icons::{IconPreview, IconResolver};
use crate::ui::terminal::TerminalUi;

#[derive(Parser, Debug)]
#[command(author, version, about = "Create and edit .desktop entries", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a new desktop entry from the given fields
    Create {
        #[command(flatten)]
        fields: Fields,
        #[command(flatten)]
        target: Target,
    },
    /// Print the fields read from a desktop entry
    Show {
        file: PathBuf,
        /// Print the record as JSON
        #[arg(long)]
        json: bool,
    },
    /// Resolve an Icon value to an image
    Preview {
        icon: String,
        /// Save the rendered preview as PNG
        #[arg(long, value_name = "PNG")]
        out: Option<PathBuf>,
    },
    /// Edit an entry interactively
    Edit {
        /// Entry to load first
        file: Option<PathBuf>,
    },
}

#[derive(clap::Args, Debug)]
struct Fields {
    #[arg(long, default_value = "")]
    name: String,
    #[arg(long, default_value = "")]
    generic_name: String,
    #[arg(long, default_value = "")]
    comment: String,
    #[arg(long = "type", default_value = "Application")]
    kind: EntryKind,
    #[arg(long, default_value = "")]
    exec: String,
    /// Field code appended to Exec (%f, %F, %u, %U, %i, %c, %k)
    #[arg(long, default_value = "None")]
    exec_param: ExecParam,
    /// Icon file path or theme icon name
    #[arg(long, default_value = "")]
    icon: String,
    #[arg(long, default_value = "")]
    wm_class: String,
    /// Semicolon-separated, e.g. "Utility;Development;"
    #[arg(long, default_value = "")]
    categories: String,
    #[arg(long)]
    terminal: bool,
    #[arg(long)]
    no_display: bool,
}

impl Fields {
    fn into_actions(self) -> Vec<Action> {
        let mut actions = vec![
            Action::SetText(TextField::Name, self.name),
            Action::SetText(TextField::GenericName, self.generic_name),
            Action::SetText(TextField::Comment, self.comment),
            Action::SetKind(self.kind),
            Action::SetText(TextField::Exec, self.exec),
            Action::SetExecParam(self.exec_param),
            Action::SetText(TextField::StartupWmClass, self.wm_class),
            Action::SetText(TextField::Categories, self.categories),
            Action::SetTerminal(self.terminal),
            Action::SetNoDisplay(self.no_display),
        ];
        if !self.icon.is_empty() {
            actions.push(Action::SetText(TextField::Icon, self.icon));
        }
        actions
    }
}

#[derive(clap::Args, Debug)]
#[group(required = true, multiple = false)]
struct Target {
    /// Save to the user applications directory
    #[arg(long)]
    user: bool,
    /// Save to the system applications directory
    #[arg(long)]
    system: bool,
    /// Save to a directory of your choice
    #[arg(long, value_name = "DIR")]
    dir: Option<PathBuf>,
}

impl Target {
    fn save_target(self) -> SaveTarget {
        match (self.user, self.system, self.dir) {
            (_, _, Some(dir)) => SaveTarget::Custom(Some(dir)),
            (_, true, None) => SaveTarget::System,
            _ => SaveTarget::User,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = load_config()?;
    let destinations = config.paths.destinations();
    let executor = Executor::new(IconResolver::new(&config.icons));
    let state = EditorState::new(destinations.clone());

    let stdin = io::stdin();
    let ui = TerminalUi::new(stdin.lock(), io::stdout(), destinations.user.clone());

    match args.command {
        Command::Create { fields, target } => {
            let mut session = Session::new(ui, executor, state);
            for action in fields.into_actions() {
                session.apply(action);
            }
            session.apply(Action::Save(target.save_target()));
        }
        Command::Show { file, json } => {
            let text = executor::read_entry(&file)?;
            let record = codec::parse(&text)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                print!("{}", codec::serialize(&record));
            }
        }
        Command::Preview { icon, out } => {
            let preview = executor.icons().resolve(&icon);
            println!("{}", preview.label());
            match (preview, out) {
                (IconPreview::Image { pixmap, .. }, Some(out)) => {
                    pixmap.save_png(&out)?;
                    println!("Saved preview to {}", out.display());
                }
                (_, Some(_)) => bail!("no image to save for '{icon}'"),
                (_, None) => {}
            }
        }
        Command::Edit { file } => {
            let mut session = Session::new(ui, executor, state);
            if file.is_some() {
                session.apply(Action::Load(file));
            }
            session.run()?;
            debug!("Session ended at revision {}", session.state().revision);
        }
    }

    Ok(())
}
