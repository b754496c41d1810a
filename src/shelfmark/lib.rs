//! # Shelfmark Architecture
//!
//! Shelfmark turns warehouse location codes into printable barcode label sheets. It is
//! a **UI-agnostic library** with a CLI client: the same core could sit behind a web
//! page, a desktop app or a print server.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, previews layouts, writes print sheets  │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Application state: store, config, rules, sort order      │
//! │  - Thin facade over commands                                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Append batches, manage rules, clear, config, print       │
//! │  - Returns structured CmdResult values                      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Engines (generator.rs, layout.rs, sheet.rs)                │
//! │  - Pure functions over their inputs                         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Data Flow
//!
//! ```text
//! series rule ─┐
//! manual text ─┼─▶ batch of codes ─▶ LabelStore ─▶ Layout (sort → strips → pages) ─▶ sheet
//! assistant  ──┘
//! ```
//!
//! Labels only ever enter the store in batches and only ever leave it all at once.
//! Strips and pages are recomputed from the store on every read.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade and application state
//! - [`commands`]: Business logic for each operation
//! - [`generator`]: Series expansion and manual input parsing
//! - [`rules`]: Custom suffix rules and their validation
//! - [`layout`]: Natural sort, strip and page chunking
//! - [`collate`]: The natural comparator
//! - [`sheet`]: HTML print sheet rendering
//! - [`barcode`]: Barcode renderer seam
//! - [`assist`]: Natural-language code assistant seam
//! - [`store`]: Label storage
//! - [`model`]: Core data types
//! - [`config`]: Label configuration
//! - [`error`]: Error types

pub mod api;
pub mod assist;
pub mod barcode;
pub mod collate;
pub mod commands;
pub mod config;
pub mod error;
pub mod generator;
pub mod layout;
pub mod model;
pub mod rules;
pub mod sheet;
pub mod store;
