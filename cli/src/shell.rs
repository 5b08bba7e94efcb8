//! Line-oriented command shell driving the three pages.
//!
//! Each command is one line; the shell redraws the current page after every
//! command that may have changed it and prints pending notices.

use std::io::{BufRead, Write};

use anyhow::Result;
use thiserror::Error;
use todoapp_core::{App, Route, Transport};

use crate::render;

pub const HELP: &str = "\
Navigation:  go <path> | home | todos | users | refresh
Todos page:  add <task> | toggle <id> | edit <id> | save [text] | cancel | rm <id>
Users page:  useradd <email> [name...] | show <user id> | hide
Notices:     notices | dismiss <n> | dismiss all
Other:       help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Go(String),
    Refresh,
    Add(String),
    Toggle(i64),
    Edit(i64),
    Save(Option<String>),
    Cancel,
    Remove(i64),
    UserAdd { email: String, name: String },
    Show(i64),
    Hide,
    Notices,
    Dismiss(Option<usize>),
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command `{0}` (try `help`)")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error("`{0}` is not a valid number")]
    BadNumber(String),
}

fn number<N: std::str::FromStr>(raw: &str) -> Result<N, CommandError> {
    raw.parse().map_err(|_| CommandError::BadNumber(raw.to_string()))
}

fn required<'a>(rest: &'a str, command: &'static str) -> Result<&'a str, CommandError> {
    if rest.is_empty() {
        Err(CommandError::MissingArgument(command))
    } else {
        Ok(rest)
    }
}

impl Command {
    /// Parse one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Option<Result<Command, CommandError>> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };
        let parsed = match head {
            "go" => required(rest, "go").map(|p| Command::Go(p.to_string())),
            "home" => Ok(Command::Go("/".to_string())),
            "todos" => Ok(Command::Go("/todos".to_string())),
            "users" => Ok(Command::Go("/users".to_string())),
            "refresh" | "r" | "list" | "ls" => Ok(Command::Refresh),
            // The raw remainder is the task; blank input is left to the page.
            "add" => Ok(Command::Add(rest.to_string())),
            "toggle" | "t" => required(rest, "toggle").and_then(number).map(Command::Toggle),
            "edit" | "e" => required(rest, "edit").and_then(number).map(Command::Edit),
            "save" => Ok(Command::Save((!rest.is_empty()).then(|| rest.to_string()))),
            "cancel" => Ok(Command::Cancel),
            "rm" | "delete" => required(rest, "rm").and_then(number).map(Command::Remove),
            "useradd" => required(rest, "useradd").map(|rest| {
                let (email, name) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                Command::UserAdd {
                    email: email.to_string(),
                    name: name.trim().to_string(),
                }
            }),
            "show" => required(rest, "show").and_then(number).map(Command::Show),
            "hide" => Ok(Command::Hide),
            "notices" => Ok(Command::Notices),
            "dismiss" => match rest {
                "" => Err(CommandError::MissingArgument("dismiss")),
                "all" => Ok(Command::Dismiss(None)),
                n => number(n).map(|n| Command::Dismiss(Some(n))),
            },
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        };
        Some(parsed)
    }

    fn page(&self) -> Option<Route> {
        match self {
            Command::Add(_)
            | Command::Toggle(_)
            | Command::Edit(_)
            | Command::Save(_)
            | Command::Cancel
            | Command::Remove(_) => Some(Route::Todos),
            Command::UserAdd { .. } | Command::Show(_) | Command::Hide => Some(Route::Users),
            _ => None,
        }
    }
}

pub struct Shell<T, R, W> {
    app: App<T>,
    input: R,
    out: W,
}

impl<T, R, W> Shell<T, R, W>
where
    T: Transport + Clone,
    R: BufRead,
    W: Write,
{
    pub fn new(app: App<T>, input: R, out: W) -> Self {
        Self { app, input, out }
    }

    pub fn app(&self) -> &App<T> {
        &self.app
    }

    /// Open `path`, then process commands until `quit` or end of input.
    pub fn run(&mut self, path: &str) -> Result<()> {
        self.app.navigate_path(path)?;
        self.draw()?;
        while let Some(line) = self.read_line()? {
            let command = match Command::parse(&line) {
                None => continue,
                Some(Ok(command)) => command,
                Some(Err(err)) => {
                    writeln!(self.out, "{err}")?;
                    continue;
                }
            };
            if command == Command::Quit {
                break;
            }
            self.execute(command)?;
        }
        Ok(())
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        write!(self.out, "{}> ", self.app.route())?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    pub fn execute(&mut self, command: Command) -> Result<()> {
        if let Some(route) = command.page() {
            if self.app.route() != route {
                let name = command_name(&command);
                writeln!(self.out, "`{name}` works on {route}; run `go {route}` first")?;
                return Ok(());
            }
        }
        match command {
            Command::Go(path) => match self.app.navigate_path(&path) {
                Ok(_) => {}
                Err(err) => {
                    writeln!(self.out, "{err}")?;
                    return Ok(());
                }
            },
            Command::Refresh => {
                let route = self.app.route();
                self.app.navigate(route);
            }
            Command::Add(task) => {
                let page = self.app.todos_mut();
                page.form_mut().set_new_task(task);
                let _ = page.submit_new_todo();
            }
            Command::Toggle(id) => {
                let _ = self.app.todos_mut().toggle(id);
            }
            Command::Edit(id) => {
                if !self.app.todos_mut().begin_edit(id) {
                    writeln!(self.out, "no todo #{id} on this page")?;
                    return Ok(());
                }
            }
            Command::Save(text) => {
                let page = self.app.todos_mut();
                if page.form().editing().is_none() {
                    writeln!(self.out, "nothing is being edited; use `edit <id>`")?;
                    return Ok(());
                }
                if let Some(text) = text {
                    page.form_mut().set_edit_text(text);
                }
                let _ = page.save_edit();
            }
            Command::Cancel => self.app.todos_mut().cancel_edit(),
            Command::Remove(id) => {
                let input = &mut self.input;
                let out = &mut self.out;
                let _ = self.app.todos_mut().remove(id, |prompt| confirm(input, out, prompt));
            }
            Command::UserAdd { email, name } => {
                let page = self.app.users_mut();
                page.form_mut().set(name, email);
                let _ = page.submit_new_user();
            }
            Command::Show(id) => {
                self.app.users_mut().select_user(id);
            }
            Command::Hide => self.app.users_mut().clear_selection(),
            Command::Notices => {
                if !self.print_notices()? {
                    writeln!(self.out, "no notices")?;
                }
                return Ok(());
            }
            Command::Dismiss(which) => {
                match self.app.notices_mut() {
                    Some(notices) => match which {
                        Some(n) => {
                            if notices.dismiss(n).is_none() {
                                writeln!(self.out, "no notice [{n}]")?;
                            }
                        }
                        None => {
                            notices.dismiss_all();
                        }
                    },
                    None => writeln!(self.out, "no notices on this page")?,
                }
                return Ok(());
            }
            Command::Help => {
                writeln!(self.out, "{HELP}")?;
                return Ok(());
            }
            Command::Quit => return Ok(()),
        }
        self.draw()
    }

    fn draw(&mut self) -> Result<()> {
        let view = match self.app.route() {
            Route::Home => render::home(self.app.home()),
            Route::Todos => render::todos(self.app.todos()),
            Route::Users => render::users(self.app.users()),
        };
        write!(self.out, "{view}")?;
        self.print_notices()?;
        Ok(())
    }

    /// Print the current page's notices; `false` when there were none.
    fn print_notices(&mut self) -> Result<bool> {
        let text = match self.app.route() {
            Route::Home => String::new(),
            Route::Todos => render::notices(self.app.todos().notices()),
            Route::Users => render::notices(self.app.users().notices()),
        };
        write!(self.out, "{text}")?;
        Ok(!text.is_empty())
    }
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Add(_) => "add",
        Command::Toggle(_) => "toggle",
        Command::Edit(_) => "edit",
        Command::Save(_) => "save",
        Command::Cancel => "cancel",
        Command::Remove(_) => "rm",
        Command::UserAdd { .. } => "useradd",
        Command::Show(_) => "show",
        Command::Hide => "hide",
        _ => "command",
    }
}

/// Ask a yes/no question on the shell's own streams. Anything but `y`/`yes`
/// declines, including end of input.
fn confirm<R: BufRead, W: Write>(input: &mut R, out: &mut W, prompt: &str) -> bool {
    if write!(out, "{prompt} [y/N] ").and_then(|_| out.flush()).is_err() {
        return false;
    }
    let mut answer = String::new();
    match input.read_line(&mut answer) {
        Ok(0) | Err(_) => false,
        Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<Command, CommandError> {
        Command::parse(line).unwrap()
    }

    #[test]
    fn blank_lines_are_ignored() {
        assert!(Command::parse("").is_none());
        assert!(Command::parse("   \n").is_none());
    }

    #[test]
    fn navigation_commands() {
        assert_eq!(parse("go /users"), Ok(Command::Go("/users".to_string())));
        assert_eq!(parse("todos"), Ok(Command::Go("/todos".to_string())));
        assert_eq!(parse("home"), Ok(Command::Go("/".to_string())));
        assert_eq!(parse("ls"), Ok(Command::Refresh));
        assert_eq!(parse("go"), Err(CommandError::MissingArgument("go")));
    }

    #[test]
    fn add_keeps_inner_spacing() {
        assert_eq!(
            parse("add buy  oat milk\n"),
            Ok(Command::Add("buy  oat milk".to_string()))
        );
        assert_eq!(parse("add"), Ok(Command::Add(String::new())));
    }

    #[test]
    fn ids_must_be_numbers() {
        assert_eq!(parse("toggle 3"), Ok(Command::Toggle(3)));
        assert_eq!(parse("rm 12"), Ok(Command::Remove(12)));
        assert_eq!(
            parse("rm twelve"),
            Err(CommandError::BadNumber("twelve".to_string()))
        );
        assert_eq!(parse("edit"), Err(CommandError::MissingArgument("edit")));
    }

    #[test]
    fn save_with_and_without_text() {
        assert_eq!(parse("save"), Ok(Command::Save(None)));
        assert_eq!(
            parse("save new text"),
            Ok(Command::Save(Some("new text".to_string())))
        );
    }

    #[test]
    fn useradd_splits_email_from_name() {
        assert_eq!(
            parse("useradd ann@example.com Ann Lee"),
            Ok(Command::UserAdd {
                email: "ann@example.com".to_string(),
                name: "Ann Lee".to_string()
            })
        );
        assert_eq!(
            parse("useradd dup@example.com"),
            Ok(Command::UserAdd {
                email: "dup@example.com".to_string(),
                name: String::new()
            })
        );
    }

    #[test]
    fn dismiss_forms() {
        assert_eq!(parse("dismiss all"), Ok(Command::Dismiss(None)));
        assert_eq!(parse("dismiss 2"), Ok(Command::Dismiss(Some(2))));
        assert!(parse("dismiss").is_err());
    }

    #[test]
    fn unknown_command() {
        assert_eq!(
            parse("frobnicate now"),
            Err(CommandError::Unknown("frobnicate".to_string()))
        );
    }

    #[test]
    fn confirm_accepts_only_yes() {
        let mut out = Vec::new();
        assert!(confirm(&mut "y\n".as_bytes(), &mut out, "Delete?"));
        assert!(confirm(&mut "YES\n".as_bytes(), &mut out, "Delete?"));
        assert!(!confirm(&mut "n\n".as_bytes(), &mut out, "Delete?"));
        assert!(!confirm(&mut "".as_bytes(), &mut out, "Delete?"));
        assert!(String::from_utf8(out).unwrap().starts_with("Delete? [y/N] "));
    }
}
