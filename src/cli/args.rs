use clap::Parser;
use std::path::PathBuf;

use crate::core::importer::ImportConfig;

/// Import delimited transaction files with category reconciliation
#[derive(Parser, Debug)]
#[command(name = "transaction-importer")]
#[command(about = "Import CSV transaction files with category reconciliation", long_about = None)]
pub struct CliArgs {
    /// Input CSV file path containing transaction rows
    #[arg(value_name = "INPUT", help = "Path to the input CSV file")]
    pub input_file: PathBuf,

    /// Number of rows to read from the stream per batch
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of rows per read batch (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    /// Keep the source file after a successful import
    #[arg(
        long = "keep-source",
        help = "Do not delete the input file after a successful import"
    )]
    pub keep_source: bool,
}

impl CliArgs {
    /// Create an ImportConfig from CLI arguments
    ///
    /// Falls back to library defaults for anything not provided. A zero
    /// batch size is rejected with a stderr warning and replaced by the
    /// default.
    pub fn to_import_config(&self) -> ImportConfig {
        let default = ImportConfig::default();

        let batch_size = match self.batch_size {
            Some(0) => {
                eprintln!(
                    "Warning: Invalid batch_size (0), using default ({})",
                    default.batch_size
                );
                default.batch_size
            }
            Some(size) => size,
            None => default.batch_size,
        };

        ImportConfig {
            batch_size,
            remove_source: !self.keep_source,
            ..default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::defaults(&["program", "input.csv"], None, false)]
    #[case::batch_size(&["program", "--batch-size", "200", "input.csv"], Some(200), false)]
    #[case::keep_source(&["program", "--keep-source", "input.csv"], None, true)]
    #[case::all_options(
        &["program", "--batch-size", "200", "--keep-source", "input.csv"],
        Some(200),
        true
    )]
    fn test_arg_parsing(
        #[case] args: &[&str],
        #[case] batch_size: Option<usize>,
        #[case] keep_source: bool,
    ) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.batch_size, batch_size);
        assert_eq!(parsed.keep_source, keep_source);
        assert_eq!(parsed.input_file, PathBuf::from("input.csv"));
    }

    #[rstest]
    #[case::custom_batch(&["program", "--batch-size", "200", "input.csv"], 200, true)]
    #[case::zero_falls_back(&["program", "--batch-size", "0", "input.csv"], 1000, true)]
    #[case::keep_source(&["program", "--keep-source", "input.csv"], 1000, false)]
    fn test_import_config_conversion(
        #[case] args: &[&str],
        #[case] expected_batch_size: usize,
        #[case] expected_remove_source: bool,
    ) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        let config = parsed.to_import_config();

        assert_eq!(config.batch_size, expected_batch_size);
        assert_eq!(config.remove_source, expected_remove_source);
    }

    #[rstest]
    #[case::missing_input(&["program"])]
    #[case::unknown_flag(&["program", "--nope", "input.csv"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        let result = CliArgs::try_parse_from(args);
        assert!(result.is_err());
    }
}
