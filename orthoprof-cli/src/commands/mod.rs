//! CLI command implementations

use anyhow::Result;
use clap::Subcommand;

pub mod check;
pub mod common;
pub mod format;
pub mod generate_config;
pub mod trim;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Clean, check and sort a profile, optionally counting rule use in a wordlist
    Format(format::FormatArgs),

    /// Remove rules the rest of the profile already implies
    Trim(trim::TrimArgs),

    /// Report duplicate, conflicting and unknown entries
    Check(check::CheckArgs),

    /// Write a configuration file template
    GenerateConfig(generate_config::GenerateConfigArgs),
}

impl Commands {
    /// Run the selected command
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Format(args) => args.execute(),
            Commands::Trim(args) => args.execute(),
            Commands::Check(args) => args.execute(),
            Commands::GenerateConfig(args) => args.execute(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct TestCli {
        #[command(subcommand)]
        command: Commands,
    }

    fn parse(args: &[&str]) -> Commands {
        TestCli::try_parse_from(std::iter::once("orthoprof").chain(args.iter().copied()))
            .unwrap()
            .command
    }

    #[test]
    fn test_commands_debug_format() {
        let command = parse(&["format", "deu.tsv", "--wl", "words.tsv"]);
        let debug_str = format!("{:?}", command);
        assert!(debug_str.contains("Format"));
        assert!(debug_str.contains("deu.tsv"));
        assert!(debug_str.contains("words.tsv"));
    }

    #[test]
    fn test_enum_variants_completeness() {
        match parse(&["trim", "deu.tsv", "-vv"]) {
            Commands::Trim(args) => assert_eq!(args.profile.verbose, 2),
            other => panic!("Should be Trim: {other:?}"),
        }

        match parse(&["check", "deu.tsv", "--format", "json"]) {
            Commands::Check(args) => assert_eq!(args.format, check::ReportFormat::Json),
            other => panic!("Should be Check: {other:?}"),
        }

        match parse(&["generate-config", "-o", "orthoprof.toml"]) {
            Commands::GenerateConfig(args) => {
                assert_eq!(args.output, std::path::PathBuf::from("orthoprof.toml"))
            }
            other => panic!("Should be GenerateConfig: {other:?}"),
        }
    }

    #[test]
    fn test_profile_is_required() {
        let result = TestCli::try_parse_from(["orthoprof", "format"]);
        assert!(result.is_err());
    }
}
