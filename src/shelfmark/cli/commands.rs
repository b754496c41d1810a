//! # CLI Layer
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr, stdin)
//! - Reads input files and writes print sheets
//! - Installs the tracing subscriber
//! - Formats output for human consumption
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: Convert shell arguments into typed commands via clap
//! 2. **Context Setup**: Layer the label config (defaults, file, `--set`) and build the API
//! 3. **API Dispatch**: Call the appropriate `ShelfmarkApi` method
//! 4. **Output**: Preview in the terminal, or write the HTML sheet
//!
//! ## Structure
//!
//! - `run()`: Main dispatch logic (called by `main.rs`)
//! - `init_context()`: Builds `AppContext` with API and configuration
//! - `handle_*()`: Per-command handlers that call API and format output

use super::render::{print_messages, render_config, render_preview};
use super::session;
use super::setup::{Cli, Commands, OutputArgs};
use clap::Parser;
use shelfmark::api::{CmdMessage, ConfigAction, MessageLevel, ShelfmarkApi};
use shelfmark::assist::GeminiAssistant;
use shelfmark::barcode::JsBarcodeMarkup;
use shelfmark::config::LabelConfig;
use shelfmark::error::{Result, ShelfmarkError};
use shelfmark::model::{RuleDraft, SeriesSpec};
use shelfmark::sheet::SheetOptions;
use shelfmark::store::memory::InMemoryStore;
use shelfmark::store::LabelStore;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

struct AppContext {
    api: ShelfmarkApi<InMemoryStore>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut ctx = init_context(&cli)?;

    match cli.command {
        Commands::Series {
            aisle,
            start,
            end,
            levels,
            rules,
            output,
        } => handle_series(
            &mut ctx,
            SeriesSpec::new(aisle, start, end, levels),
            &rules,
            &output,
        ),
        Commands::Manual { file, output } => handle_manual(&mut ctx, file, &output),
        Commands::Assist {
            prompt,
            model,
            output,
        } => handle_assist(&mut ctx, prompt.join(" "), model, &output),
        Commands::Config { key } => handle_config(&mut ctx, key),
        Commands::Shell => session::run(&mut ctx.api),
    }
}

/// Logs go to stderr. `RUST_LOG` wins over the default level.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,shelfmark={}", level)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let config = load_config(cli.config_file.as_deref(), &cli.overrides)?;
    Ok(AppContext {
        api: ShelfmarkApi::new(InMemoryStore::new(), config),
    })
}

/// Defaults, then the config file, then each `--set` in order.
fn load_config(path: Option<&Path>, overrides: &[(String, String)]) -> Result<LabelConfig> {
    let mut config = match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading label config");
            LabelConfig::load(path)?
        }
        None => LabelConfig::default(),
    };
    for (key, value) in overrides {
        config.set(key, value).map_err(ShelfmarkError::Config)?;
    }
    Ok(config)
}

fn handle_series(
    ctx: &mut AppContext,
    spec: SeriesSpec,
    rules: &[RuleDraft],
    output: &OutputArgs,
) -> Result<()> {
    for draft in rules {
        let result = ctx.api.add_rule(draft);
        if result.rules.is_empty() {
            tracing::warn!(
                pos = %draft.pos,
                level = %draft.level,
                suffix = %draft.suffix,
                "ignoring invalid rule"
            );
        }
    }
    let result = ctx.api.generate_series(&spec);
    print_messages(&result.messages);
    finish(ctx, output)
}

fn handle_manual(ctx: &mut AppContext, file: Option<PathBuf>, output: &OutputArgs) -> Result<()> {
    let text = match file {
        Some(path) => std::fs::read_to_string(&path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    let result = ctx.api.add_manual(&text);
    print_messages(&result.messages);
    finish(ctx, output)
}

fn handle_assist(
    ctx: &mut AppContext,
    prompt: String,
    model: Option<String>,
    output: &OutputArgs,
) -> Result<()> {
    let mut assistant = GeminiAssistant::from_env()?;
    if let Some(model) = model {
        assistant = assistant.with_model(model);
    }
    let result = ctx.api.add_assisted(&assistant, &prompt)?;
    print_messages(&result.messages);
    finish(ctx, output)
}

fn handle_config(ctx: &mut AppContext, key: Option<String>) -> Result<()> {
    match key {
        None => print!("{}", render_config(ctx.api.label_config())),
        Some(key) => {
            let result = ctx.api.config(ConfigAction::ShowKey(key));
            if let Some(err) = first_error(&result.messages) {
                return Err(ShelfmarkError::Config(err));
            }
            print_messages(&result.messages);
        }
    }
    Ok(())
}

/// Either writes the sheet or previews the layout, in the requested order.
fn finish(ctx: &mut AppContext, output: &OutputArgs) -> Result<()> {
    ctx.api.set_sort_order(output.sort_order());
    match &output.output {
        Some(path) => {
            let messages = write_sheet(&ctx.api, path, output.print)?;
            print_messages(&messages);
        }
        None => print!("{}", render_preview(&ctx.api.layout(), ctx.api.sort_order())),
    }
    Ok(())
}

/// Renders the print sheet and writes it to `path`. Nothing is written for an empty store.
pub(super) fn write_sheet<S: LabelStore>(
    api: &ShelfmarkApi<S>,
    path: &Path,
    auto_print: bool,
) -> Result<Vec<CmdMessage>> {
    let options = SheetOptions {
        auto_print,
        ..Default::default()
    };
    let mut result = api.print_sheet(&JsBarcodeMarkup::default(), &options)?;
    if let Some(document) = result.document.take() {
        std::fs::write(path, document)?;
        tracing::debug!(path = %path.display(), "wrote print sheet");
        result.add_message(CmdMessage::info(format!("Wrote {}", path.display())));
    }
    Ok(result.messages)
}

fn first_error(messages: &[CmdMessage]) -> Option<String> {
    messages
        .iter()
        .find(|m| m.level == MessageLevel::Error)
        .map(|m| m.content.clone())
}
