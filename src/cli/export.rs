//! Export command for writing the filtered records as CSV.

use crate::cli::common::{CliError, CliResult};
use crate::cli::filter::FilterSelection;
use crate::export;
use clap::Args;
use std::io;
use std::path::PathBuf;

/// Export the filtered records as CSV
#[derive(Debug, Clone, Args)]
pub struct ExportArgs {
    /// Filter flags
    #[command(flatten)]
    pub selection: FilterSelection,

    /// Output path for the CSV file (stdout when omitted)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl ExportArgs {
    /// Execute the export command
    pub fn execute(&self) -> CliResult<()> {
        let session = self.selection.build_session()?;
        let view = session.view();

        match &self.output {
            Some(path) => {
                export::export_to_file(&view.records, path)
                    .map_err(|e| CliError::io(format!("Failed to export CSV: {e:#}")))?;
                eprintln!(
                    "Exported {} record(s) to {}",
                    view.records.len(),
                    path.display()
                );
            }
            None => {
                export::write_csv(&view.records, io::stdout().lock())
                    .map_err(|e| CliError::io(format!("Failed to write CSV: {e:#}")))?;
            }
        }

        Ok(())
    }
}
