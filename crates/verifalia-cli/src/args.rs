/*
[INPUT]:  Command line arguments
[OUTPUT]: Parsed subcommands and their options
[POS]:    CLI layer - argument definitions
[UPDATE]: When adding commands or flags
*/

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use verifalia_client::{ContentType, Deduplication, Quality};

#[derive(Parser, Debug)]
#[command(name = "verifalia", version, about = "Verifalia email verification client")]
pub struct Cli {
    #[arg(long = "config", value_name = "PATH")]
    pub config_path: Option<PathBuf>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "warn")]
    pub log_level: String,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Verify one or more email addresses
    Verify {
        #[arg(required = true, value_name = "EMAIL")]
        addresses: Vec<String>,
        #[command(flatten)]
        submission: SubmissionArgs,
    },
    /// Verify the addresses contained in a file (txt, csv, tsv, xls, xlsx)
    VerifyFile {
        #[arg(value_name = "PATH")]
        path: PathBuf,
        #[arg(long, value_enum)]
        content_type: Option<ContentTypeArg>,
        /// Zero-based index of the first row to import
        #[arg(long)]
        starting_row: Option<u32>,
        /// Zero-based index of the last row to import
        #[arg(long)]
        ending_row: Option<u32>,
        /// Zero-based column holding the addresses
        #[arg(long)]
        column: Option<u32>,
        /// Zero-based worksheet index of spreadsheet files
        #[arg(long)]
        sheet: Option<u32>,
        #[arg(long)]
        delimiter: Option<String>,
        #[command(flatten)]
        submission: SubmissionArgs,
    },
    /// Fetch a validation job
    Get {
        id: String,
        /// Poll until the job completes
        #[arg(long)]
        wait: bool,
    },
    /// Delete a validation job
    Delete { id: String },
    /// List validation jobs
    List {
        /// Page size requested from the server
        #[arg(long)]
        page_size: Option<u32>,
        /// Stop after this many jobs
        #[arg(long)]
        max: Option<usize>,
        /// Newest jobs first
        #[arg(long)]
        newest_first: bool,
    },
    /// Show the credit balance
    Balance,
}

#[derive(Args, Debug, Clone, Default)]
pub struct SubmissionArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long, value_enum)]
    pub quality: Option<QualityArg>,
    #[arg(long, value_enum)]
    pub deduplication: Option<DeduplicationArg>,
    /// Processing priority, 0 (lowest) to 255 (highest)
    #[arg(long)]
    pub priority: Option<u8>,
    /// Return right after submission instead of waiting for completion
    #[arg(long)]
    pub no_wait: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum QualityArg {
    Standard,
    High,
    Extreme,
}

impl From<QualityArg> for Quality {
    fn from(value: QualityArg) -> Self {
        match value {
            QualityArg::Standard => Quality::Standard,
            QualityArg::High => Quality::High,
            QualityArg::Extreme => Quality::Extreme,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum DeduplicationArg {
    Off,
    Safe,
    Relaxed,
}

impl From<DeduplicationArg> for Deduplication {
    fn from(value: DeduplicationArg) -> Self {
        match value {
            DeduplicationArg::Off => Deduplication::Off,
            DeduplicationArg::Safe => Deduplication::Safe,
            DeduplicationArg::Relaxed => Deduplication::Relaxed,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum ContentTypeArg {
    Txt,
    Csv,
    Tsv,
    Xls,
    Xlsx,
}

impl From<ContentTypeArg> for ContentType {
    fn from(value: ContentTypeArg) -> Self {
        match value {
            ContentTypeArg::Txt => ContentType::TextPlain,
            ContentTypeArg::Csv => ContentType::TextCsv,
            ContentTypeArg::Tsv => ContentType::TextTsv,
            ContentTypeArg::Xls => ContentType::ExcelXls,
            ContentTypeArg::Xlsx => ContentType::ExcelXlsx,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_verify() {
        let cli = Cli::try_parse_from([
            "verifalia",
            "verify",
            "batman@gmail.com",
            "robin@gmail.com",
            "--quality",
            "high",
            "--no-wait",
        ])
        .unwrap();
        match cli.command {
            Command::Verify {
                addresses,
                submission,
            } => {
                assert_eq!(addresses.len(), 2);
                assert!(submission.no_wait);
                assert!(matches!(submission.quality, Some(QualityArg::High)));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_verify_requires_addresses() {
        assert!(Cli::try_parse_from(["verifalia", "verify"]).is_err());
    }

    #[test]
    fn test_parse_list_flags() {
        let cli = Cli::try_parse_from([
            "verifalia",
            "--log-level",
            "debug",
            "list",
            "--max",
            "5",
            "--newest-first",
        ])
        .unwrap();
        assert_eq!(cli.log_level, "debug");
        assert!(matches!(
            cli.command,
            Command::List {
                max: Some(5),
                newest_first: true,
                ..
            }
        ));
    }
}
