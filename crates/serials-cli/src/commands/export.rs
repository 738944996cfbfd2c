use std::io::{self, IsTerminal};
use std::path::Path;

use serials_core::export::{
    ExportDestination, ExportSink, FileExportSink, ShareExportSink, WriterExportSink,
};

use crate::commands::common::open_controller;
use crate::error::CliError;

/// Where `serials export` sends the CSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportTarget<'a> {
    Stdout,
    File(&'a Path),
    Share(&'a Path),
}

impl<'a> ExportTarget<'a> {
    pub fn from_args(output: Option<&'a Path>, share: bool, share_dir: &'a Path) -> Self {
        match (output, share) {
            (Some(path), _) => Self::File(path),
            (None, true) => Self::Share(share_dir),
            (None, false) => Self::Stdout,
        }
    }
}

pub fn run_export(target: ExportTarget<'_>, db_path: &Path) -> Result<(), CliError> {
    let mut controller = open_controller(db_path)?;

    let mut sink: Box<dyn ExportSink> = match target {
        ExportTarget::Stdout => Box::new(WriterExportSink::new(io::stdout())),
        ExportTarget::File(path) => Box::new(FileExportSink::new(path)),
        ExportTarget::Share(dir) => Box::new(ShareExportSink::new(dir).with_handoff(|path| {
            tracing::info!("Staged {} for sharing", path.display());
            Ok(())
        })),
    };
    let receipt = controller.export_csv(sink.as_mut())?;

    match receipt.destination {
        // The CSV carries no trailing newline; keep the prompt on its own line
        ExportDestination::Stream if io::stdout().is_terminal() => println!(),
        ExportDestination::Stream => {}
        ExportDestination::File(path) | ExportDestination::Shared(path) => {
            println!("{}", path.display());
        }
    }
    tracing::info!("Exported {} serial number(s)", receipt.count);
    Ok(())
}
