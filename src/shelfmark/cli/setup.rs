use clap::{Args, Parser, Subcommand};
use shelfmark::model::{RuleDraft, SortOrder};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "shelfmark",
    bin_name = "shelfmark",
    version,
    disable_help_subcommand = true,
    after_help = "Combine several sources before printing with:\n  shelfmark shell"
)]
#[command(about = "Barcode label sheets for warehouse location codes", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Label config file (JSON)
    #[arg(
        long = "config",
        value_name = "FILE",
        env = "SHELFMARK_CONFIG",
        global = true,
        help_heading = "Options"
    )]
    pub config_file: Option<PathBuf>,

    /// Override a config key, e.g. --set columns=2
    #[arg(
        long = "set",
        value_name = "KEY=VALUE",
        value_parser = parse_key_value,
        global = true,
        help_heading = "Options"
    )]
    pub overrides: Vec<(String, String)>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate AISLE.POS.LEVEL codes for a range of positions
    #[command(alias = "s", display_order = 1)]
    Series {
        /// Aisle prefix, e.g. A or 12
        aisle: String,

        /// First position
        #[arg(long, default_value_t = 1)]
        start: i64,

        /// Last position (inclusive)
        #[arg(long, default_value_t = 1)]
        end: i64,

        /// Levels per position
        #[arg(long, default_value_t = 6)]
        levels: i64,

        /// Suffix rule; POS and LEVEL may be blank, * or all (repeatable)
        #[arg(long = "rule", value_name = "POS:LEVEL:SUFFIX", value_parser = parse_rule)]
        rules: Vec<RuleDraft>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Label codes from a file or stdin, one per line
    #[command(alias = "m", display_order = 2)]
    Manual {
        /// Input file (reads stdin when absent)
        file: Option<PathBuf>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Describe the codes you want and let the assistant list them
    #[command(display_order = 3)]
    Assist {
        /// Request, e.g. "aisle C positions 1 to 4, levels 1 to 3"
        #[arg(required = true, num_args = 1..)]
        prompt: Vec<String>,

        /// Model name
        #[arg(long)]
        model: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show the effective label config
    #[command(display_order = 10)]
    Config {
        /// Show a single key
        key: Option<String>,
    },

    /// Interactive session: combine batches, tweak config, print
    #[command(display_order = 11)]
    Shell,
}

#[derive(Args, Debug, Default, Clone)]
pub struct OutputArgs {
    /// Sort A-Z
    #[arg(long, conflicts_with = "desc")]
    pub asc: bool,

    /// Sort Z-A (default)
    #[arg(long)]
    pub desc: bool,

    /// Write the HTML print sheet to FILE instead of previewing
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Open the print dialog when the sheet is loaded
    #[arg(long, requires = "output")]
    pub print: bool,
}

impl OutputArgs {
    pub fn sort_order(&self) -> SortOrder {
        if self.asc {
            SortOrder::Ascending
        } else {
            SortOrder::Descending
        }
    }
}

pub fn parse_key_value(input: &str) -> Result<(String, String), String> {
    let (key, value) = input
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", input))?;
    if key.trim().is_empty() {
        return Err(format!("missing key in '{}'", input));
    }
    Ok((key.trim().to_string(), value.trim().to_string()))
}

/// Parses `POS:LEVEL:SUFFIX`. Validation of the numbers happens when the rule is added.
pub fn parse_rule(input: &str) -> Result<RuleDraft, String> {
    let mut parts = input.splitn(3, ':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(pos), Some(level), Some(suffix)) => Ok(RuleDraft::new(
            wildcard(pos),
            wildcard(level),
            suffix,
        )),
        _ => Err(format!("expected POS:LEVEL:SUFFIX, got '{}'", input)),
    }
}

fn wildcard(field: &str) -> &str {
    match field.trim() {
        "*" => "",
        f if f.eq_ignore_ascii_case("all") => "",
        f => f,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn series_with_rules() {
        let cli = Cli::try_parse_from([
            "shelfmark",
            "series",
            "B",
            "--start",
            "3",
            "--end",
            "5",
            "--rule",
            "*:6:TOP",
            "--rule",
            "4::X",
        ])
        .unwrap();
        match cli.command {
            Commands::Series {
                aisle,
                start,
                end,
                levels,
                rules,
                output,
            } => {
                assert_eq!(aisle, "B");
                assert_eq!((start, end, levels), (3, 5, 6));
                assert_eq!(rules[0], RuleDraft::new("", "6", "TOP"));
                assert_eq!(rules[1], RuleDraft::new("4", "", "X"));
                assert_eq!(output.sort_order(), SortOrder::Descending);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn rule_wildcards() {
        assert_eq!(parse_rule("all:ALL:S").unwrap(), RuleDraft::new("", "", "S"));
        assert_eq!(parse_rule("2:3:a:b").unwrap().suffix, "a:b");
        assert!(parse_rule("2:3").is_err());
    }

    #[test]
    fn key_values() {
        assert_eq!(
            parse_key_value("columns=2").unwrap(),
            ("columns".to_string(), "2".to_string())
        );
        assert!(parse_key_value("columns").is_err());
        assert!(parse_key_value("=2").is_err());
    }

    #[test]
    fn asc_and_desc_conflict() {
        assert!(Cli::try_parse_from(["shelfmark", "manual", "--asc", "--desc"]).is_err());
    }

    #[test]
    fn print_requires_output() {
        assert!(Cli::try_parse_from(["shelfmark", "manual", "--print"]).is_err());
        let cli =
            Cli::try_parse_from(["shelfmark", "manual", "--asc", "-o", "out.html", "--print"])
                .unwrap();
        match cli.command {
            Commands::Manual { file, output } => {
                assert!(file.is_none());
                assert!(output.print);
                assert_eq!(output.sort_order(), SortOrder::Ascending);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn global_options_after_subcommand() {
        let cli = Cli::try_parse_from(["shelfmark", "config", "--set", "gap=2", "-v"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.overrides, vec![("gap".to_string(), "2".to_string())]);
    }
}
