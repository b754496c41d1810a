//! # CLI Behavior
//!
//! This is **one possible UI client** for shelfmark, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes, and output formatting.
//!
//! ## One-Shot Commands
//!
//! `series`, `manual` and `assist` each build a fresh label store, fill it from one
//! source and then either:
//!
//! - write an HTML print sheet (`-o sheet.html`, add `--print` to open the print dialog on load), or
//! - show a terminal preview of the strips, page by page.
//!
//! ### Manual Input
//!
//! `shelfmark manual codes.txt` reads one code per line. Without a file, stdin is read:
//! `cat codes.txt | shelfmark manual`.
//!
//! ## The Shell
//!
//! `shelfmark shell` keeps one store, rule list and config alive for the whole session,
//! so several batches can be combined before printing. Type `help` inside it.
//!
//! ## Module Structure
//!
//! - `commands`: Context setup and per-command handlers
//! - `render`: Terminal previews and message output
//! - `session`: The interactive shell
//! - `setup`: Argument parsing via clap
//! - `styles`: Terminal styling
//! - `templates`: Output templates

mod commands;
mod render;
mod session;
pub mod setup;
mod styles;
mod templates;

pub use commands::run;
