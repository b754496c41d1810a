use crate::commands::{CmdMessage, CmdResult};
use crate::config::LabelConfig;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(config: &mut LabelConfig, action: ConfigAction) -> CmdResult {
    match action {
        ConfigAction::ShowAll => CmdResult::default().with_config(config.clone()),
        ConfigAction::ShowKey(key) => {
            let mut result = CmdResult::default();
            match config.get(&key) {
                Some(val) => result.add_message(CmdMessage::info(format!("{} = {}", key, val))),
                None => {
                    result.add_message(CmdMessage::error(format!("Unknown config key: {}", key)))
                }
            }
            result
        }
        ConfigAction::Set(key, value) => {
            if let Err(e) = config.set(&key, &value) {
                let mut res = CmdResult::default();
                res.add_message(CmdMessage::error(e));
                return res;
            }
            let mut result = CmdResult::default().with_config(config.clone());
            let display_val = config.get(&key).unwrap_or(value);
            result.add_message(CmdMessage::success(format!(
                "{} set to {}",
                key, display_val
            )));
            result
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;

    #[test]
    fn show_all_returns_config() {
        let mut config = LabelConfig::default();
        let result = run(&mut config, ConfigAction::ShowAll);
        assert_eq!(result.config, Some(LabelConfig::default()));
    }

    #[test]
    fn show_key() {
        let mut config = LabelConfig::default();
        let result = run(&mut config, ConfigAction::ShowKey("gap".into()));
        assert_eq!(result.messages[0].content, "gap = 4");

        let result = run(&mut config, ConfigAction::ShowKey("nope".into()));
        assert_eq!(result.messages[0].level, MessageLevel::Error);
    }

    #[test]
    fn set_updates_config() {
        let mut config = LabelConfig::default();
        let result = run(&mut config, ConfigAction::Set("columns".into(), "2".into()));
        assert_eq!(config.columns, 2);
        assert_eq!(result.messages[0].content, "columns set to 2");
        assert_eq!(result.config.unwrap().columns, 2);
    }

    #[test]
    fn bad_set_reports_error_and_keeps_config() {
        let mut config = LabelConfig::default();
        let result = run(&mut config, ConfigAction::Set("columns".into(), "0".into()));
        assert!(result.has_errors());
        assert_eq!(config.columns, 3);
    }
}
