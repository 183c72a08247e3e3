//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// specdriver - drive an AI backend to assemble technical specifications
#[derive(Parser)]
#[command(
    name = "specdriver",
    about = "Generate technical specifications from a project questionnaire",
    version,
    after_help = "Logs are written to: ~/.local/share/specdriver/logs/specdriver.log"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Generate a specification from a questionnaire answers file
    Generate {
        /// Flat YAML answers file (dot-path keys to values)
        #[arg(value_name = "ANSWERS")]
        answers: PathBuf,

        /// Write the document here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Ask the assistant a question about an indexed project
    Ask {
        /// The question
        query: String,

        /// Project identifier the question is scoped to
        #[arg(short, long)]
        project: String,
    },

    /// Upload a project document (.docx) to the knowledge base
    Upload {
        /// Document to upload
        file: PathBuf,

        /// Project identifier to index under
        #[arg(short, long)]
        project: String,
    },

    /// List known project identifiers
    Projects,

    /// Check AI backend availability
    Health,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_generate() {
        let cli = Cli::parse_from(["sd", "generate", "answers.yml", "--output", "spec.md"]);
        match cli.command {
            Command::Generate { answers, output } => {
                assert_eq!(answers, PathBuf::from("answers.yml"));
                assert_eq!(output, Some(PathBuf::from("spec.md")));
            }
            _ => panic!("expected generate command"),
        }
    }

    #[test]
    fn test_cli_parse_ask() {
        let cli = Cli::parse_from(["sd", "ask", "what about security?", "--project", "gold"]);
        match cli.command {
            Command::Ask { query, project } => {
                assert_eq!(query, "what about security?");
                assert_eq!(project, "gold");
            }
            _ => panic!("expected ask command"),
        }
    }

    #[test]
    fn test_cli_parse_global_flags() {
        let cli = Cli::parse_from(["sd", "-v", "-c", "custom.yml", "projects"]);
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("custom.yml")));
        assert!(matches!(cli.command, Command::Projects));
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["sd"]).is_err());
    }
}
