//! # Command Layer
//!
//! This module contains the **core business logic** of shelfmark. Each command lives in
//! its own submodule and implements plain Rust functions over the store, the rule set
//! and the label config.
//!
//! ## What Commands Do NOT Do
//!
//! - **Any I/O**: No stdout, stderr or terminal concerns. The one exception is the
//!   assistant, which is reached through the [`CodeAssistant`](crate::assist::CodeAssistant)
//!   trait and can be swapped for a stub.
//! - **Argument parsing**: That's the CLI layer's job
//! - **User interaction**: No prompts or confirmations (return data, UI decides)
//!
//! ## Structured Returns
//!
//! Commands return [`CmdResult`], not strings:
//! - `added_labels`: Labels appended to the store by this command
//! - `rules`: Rules to display, or the rule that was added or removed
//! - `config`: Configuration data (for `config` commands)
//! - `document`: A rendered print sheet
//! - `messages`: Structured messages with levels (info, success, warning, error)
//!
//! ## Command Modules
//!
//! - [`add`]: Append batches from a series, manual text, or the assistant
//! - [`rules`]: Add, remove and list custom suffix rules
//! - [`clear`]: Empty the label store
//! - [`config`]: Show and change the label config
//! - [`print`]: Render the print sheet

use crate::config::LabelConfig;
use crate::model::{CustomRule, LabelItem};

pub mod add;
pub mod clear;
pub mod config;
pub mod print;
pub mod rules;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub added_labels: Vec<LabelItem>,
    pub rules: Vec<CustomRule>,
    pub config: Option<LabelConfig>,
    pub document: Option<String>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_added_labels(mut self, labels: Vec<LabelItem>) -> Self {
        self.added_labels = labels;
        self
    }

    pub fn with_rules(mut self, rules: Vec<CustomRule>) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_config(mut self, config: LabelConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_document(mut self, document: String) -> Self {
        self.document = Some(document);
        self
    }

    pub fn has_errors(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.level == MessageLevel::Error)
    }
}
