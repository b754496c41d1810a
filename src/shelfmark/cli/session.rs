//! # Interactive Session
//!
//! `shelfmark shell` keeps one API instance alive, so batches from several series,
//! manual imports and assistant requests end up on the same sheet. Rules and config
//! changes made in the session apply to everything generated or printed afterwards.
//!
//! Each line is one command. Errors are reported and the session carries on; only a
//! failure to read stdin ends it early.
//!
//! `clear` needs to be typed twice within [`CLEAR_CONFIRM_WINDOW`]. Any other command
//! in between disarms it.

use super::commands::write_sheet;
use super::render::{
    render_config_internal, render_messages_internal, render_preview_internal,
    render_rules_internal, use_color,
};
use super::setup::parse_rule;
use colored::Colorize;
use shelfmark::api::{CmdMessage, CmdResult, ConfigAction, ShelfmarkApi};
use shelfmark::assist::{CodeAssistant, GeminiAssistant};
use shelfmark::error::Result;
use shelfmark::model::{SeriesSpec, SortOrder};
use shelfmark::store::LabelStore;
use std::io::{BufRead, IsTerminal, Write};
use std::path::Path;
use std::time::{Duration, Instant};

pub const CLEAR_CONFIRM_WINDOW: Duration = Duration::from_secs(3);

const HELP: &str = "\
Commands:
  series AISLE START END [LEVELS]   Add AISLE.POS.LEVEL codes (LEVELS defaults to 6)
  add CODE                          Add the rest of the line as one code
  import FILE                       Add codes from a file, one per line
  assist PROMPT...                  Ask the assistant for codes
  rule add POS:LEVEL:SUFFIX         Add a suffix rule (POS/LEVEL: blank, * or all)
  rule rm N...                      Remove rules by number
  rule list                         Show rules
  sort [asc|desc]                   Set or toggle the sort order
  config [KEY [VALUE]]              Show or change the label config
  preview                           Show strips and pages
  print FILE [--print]              Write the HTML print sheet
  count                             Number of labels
  clear                             Remove all labels (type twice to confirm)
  help                              This help
  quit                              Leave the session";

/// Two-step confirmation for `clear`.
#[derive(Debug, Default)]
pub struct ClearGuard {
    armed_at: Option<Instant>,
}

impl ClearGuard {
    /// Returns true when this press confirms an earlier one still inside the window.
    /// Otherwise arms the guard and returns false.
    pub fn press(&mut self, now: Instant) -> bool {
        match self.armed_at.take() {
            Some(at) if now.saturating_duration_since(at) <= CLEAR_CONFIRM_WINDOW => true,
            _ => {
                self.armed_at = Some(now);
                false
            }
        }
    }

    pub fn reset(&mut self) {
        self.armed_at = None;
    }

    pub fn is_armed(&self, now: Instant) -> bool {
        self.armed_at
            .is_some_and(|at| now.saturating_duration_since(at) <= CLEAR_CONFIRM_WINDOW)
    }
}

pub struct Step {
    pub output: String,
    pub quit: bool,
}

impl Step {
    fn show(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            quit: false,
        }
    }
}

pub struct Session<'a, S: LabelStore> {
    api: &'a mut ShelfmarkApi<S>,
    assistant: Option<Box<dyn CodeAssistant>>,
    clear_guard: ClearGuard,
    use_color: bool,
}

impl<'a, S: LabelStore> Session<'a, S> {
    pub fn new(api: &'a mut ShelfmarkApi<S>, use_color: bool) -> Self {
        Self {
            api,
            assistant: None,
            clear_guard: ClearGuard::default(),
            use_color,
        }
    }

    #[cfg(test)]
    pub fn with_assistant(mut self, assistant: Box<dyn CodeAssistant>) -> Self {
        self.assistant = Some(assistant);
        self
    }

    pub fn execute(&mut self, line: &str) -> Step {
        self.execute_at(line, Instant::now())
    }

    pub fn execute_at(&mut self, line: &str, now: Instant) -> Step {
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((&command, args)) = words.split_first() else {
            return Step::show("");
        };

        if command != "clear" {
            self.clear_guard.reset();
        }

        let outcome = match command {
            "quit" | "exit" | "q" => {
                return Step {
                    output: String::new(),
                    quit: true,
                }
            }
            "help" | "?" => Ok(format!("{}\n", HELP)),
            "series" => self.series(args),
            "add" => {
                let code = line.trim_start()[command.len()..].trim();
                let result = self.api.add_manual(code);
                Ok(self.messages(&result))
            }
            "import" => self.import(args),
            "assist" => self.assist(args),
            "rule" | "rules" => self.rule(args),
            "sort" => self.sort(args),
            "config" => Ok(self.config(args)),
            "preview" | "ls" => Ok(render_preview_internal(
                &self.api.layout(),
                self.api.sort_order(),
                self.use_color,
            )),
            "print" => self.print(args),
            "count" => Ok(format!("{}\n", self.api.label_count())),
            "clear" => Ok(self.clear(now)),
            other => Ok(self.error(format!(
                "Unknown command: {}. Type help for a list.",
                other
            ))),
        };

        match outcome {
            Ok(output) => Step::show(output),
            Err(e) => Step::show(self.error(e.to_string())),
        }
    }

    fn series(&mut self, args: &[&str]) -> Result<String> {
        let usage = "Usage: series AISLE START END [LEVELS]";
        let (aisle, numbers) = match args.split_first() {
            Some((aisle, rest)) if (2..=3).contains(&rest.len()) => (aisle, rest),
            _ => return Ok(self.error(usage)),
        };
        let parsed: std::result::Result<Vec<i64>, _> =
            numbers.iter().map(|n| n.parse::<i64>()).collect();
        let Ok(parsed) = parsed else {
            return Ok(self.error(usage));
        };
        let levels = parsed.get(2).copied().unwrap_or(6);
        let spec = SeriesSpec::new(*aisle, parsed[0], parsed[1], levels);
        let result = self.api.generate_series(&spec);
        Ok(self.messages(&result))
    }

    fn import(&mut self, args: &[&str]) -> Result<String> {
        if args.is_empty() {
            return Ok(self.error("Usage: import FILE"));
        }
        let text = std::fs::read_to_string(args.join(" "))?;
        let result = self.api.add_manual(&text);
        Ok(self.messages(&result))
    }

    fn assist(&mut self, args: &[&str]) -> Result<String> {
        if self.assistant.is_none() {
            self.assistant = Some(Box::new(GeminiAssistant::from_env()?));
        }
        let Some(assistant) = self.assistant.as_deref() else {
            return Ok(String::new());
        };
        let result = self.api.add_assisted(assistant, &args.join(" "))?;
        Ok(self.messages(&result))
    }

    fn rule(&mut self, args: &[&str]) -> Result<String> {
        match args.split_first() {
            Some((&"add", [spec])) => {
                let draft = match parse_rule(spec) {
                    Ok(draft) => draft,
                    Err(e) => return Ok(self.error(e)),
                };
                let result = self.api.add_rule(&draft);
                if result.rules.is_empty() {
                    return Ok(self.info(format!("No rule added: {}", spec)));
                }
                Ok(self.messages(&result))
            }
            Some((&"rm", selectors)) if !selectors.is_empty() => {
                let result = self.api.remove_rules(selectors)?;
                Ok(self.messages(&result))
            }
            Some((&"list", [])) | None => {
                let result = self.api.list_rules();
                if result.rules.is_empty() {
                    Ok(self.messages(&result))
                } else {
                    Ok(render_rules_internal(&result.rules, self.use_color))
                }
            }
            _ => Ok(self.error("Usage: rule add POS:LEVEL:SUFFIX | rule rm N... | rule list")),
        }
    }

    fn sort(&mut self, args: &[&str]) -> Result<String> {
        let order = match args {
            [] => self.api.toggle_sort_order(),
            [value] => match value.parse::<SortOrder>() {
                Ok(order) => {
                    self.api.set_sort_order(order);
                    order
                }
                Err(e) => return Ok(self.error(e)),
            },
            _ => return Ok(self.error("Usage: sort [asc|desc]")),
        };
        Ok(self.info(format!("Sorting {}.", order)))
    }

    fn config(&mut self, args: &[&str]) -> String {
        let action = match args {
            [] => return render_config_internal(self.api.label_config(), self.use_color),
            [key] => ConfigAction::ShowKey(key.to_string()),
            [key, value] => ConfigAction::Set(key.to_string(), value.to_string()),
            _ => return self.error("Usage: config [KEY [VALUE]]"),
        };
        let result = self.api.config(action);
        self.messages(&result)
    }

    fn print(&mut self, args: &[&str]) -> Result<String> {
        let (path, auto_print) = match args {
            [path] => (path, false),
            [path, "--print"] => (path, true),
            _ => return Ok(self.error("Usage: print FILE [--print]")),
        };
        let messages = write_sheet(&*self.api, Path::new(path), auto_print)?;
        Ok(render_messages_internal(&messages, self.use_color))
    }

    fn clear(&mut self, now: Instant) -> String {
        if self.api.label_count() == 0 {
            self.clear_guard.reset();
            return self.info("No labels to clear.");
        }
        if self.clear_guard.press(now) {
            let result = self.api.clear_labels();
            return self.messages(&result);
        }
        self.info(format!(
            "Type clear again within {} seconds to remove all {} labels.",
            CLEAR_CONFIRM_WINDOW.as_secs(),
            self.api.label_count()
        ))
    }

    fn messages(&self, result: &CmdResult) -> String {
        render_messages_internal(&result.messages, self.use_color)
    }

    fn info(&self, text: impl Into<String>) -> String {
        render_messages_internal(&[CmdMessage::info(text)], self.use_color)
    }

    fn error(&self, text: impl Into<String>) -> String {
        render_messages_internal(&[CmdMessage::error(text)], self.use_color)
    }
}

/// Runs the session on stdin until `quit` or end of input.
pub fn run<S: LabelStore>(api: &mut ShelfmarkApi<S>) -> Result<()> {
    let stdin = std::io::stdin();
    let interactive = stdin.is_terminal();
    let mut session = Session::new(api, use_color());
    let mut stdout = std::io::stdout();

    if interactive {
        writeln!(
            stdout,
            "{} {}",
            "shelfmark".bold(),
            "interactive session. Type help for commands.".dimmed()
        )?;
    }

    let mut line = String::new();
    loop {
        if interactive {
            let armed = session.clear_guard.is_armed(Instant::now());
            write!(stdout, "{} ", prompt(session.api.label_count(), armed))?;
            stdout.flush()?;
        }
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let step = session.execute(&line);
        write!(stdout, "{}", step.output)?;
        if step.quit {
            break;
        }
    }
    Ok(())
}

fn prompt(count: usize, clear_armed: bool) -> String {
    let marker = if clear_armed { " clear?".red() } else { "".normal() };
    format!("{}{}{}", format!("[{}]", count).cyan(), marker, " >".bold())
}
