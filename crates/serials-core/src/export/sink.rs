use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::suggested_export_file_name;

/// Where an export ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportDestination {
    /// A user-chosen file
    File(PathBuf),
    /// A staged file handed to a share mechanism
    Shared(PathBuf),
    /// An output stream such as stdout
    Stream,
}

impl fmt::Display for ExportDestination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) | Self::Shared(path) => write!(f, "{}", path.display()),
            Self::Stream => write!(f, "<stream>"),
        }
    }
}

/// Receives the rendered export bytes.
pub trait ExportSink {
    fn write(&mut self, bytes: &[u8]) -> io::Result<ExportDestination>;
}

/// Writes the export to a user-chosen path, creating parent directories.
#[derive(Debug, Clone)]
pub struct FileExportSink {
    path: PathBuf,
}

impl FileExportSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ExportSink for FileExportSink {
    fn write(&mut self, bytes: &[u8]) -> io::Result<ExportDestination> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, bytes)?;
        Ok(ExportDestination::File(self.path.clone()))
    }
}

const MAX_STAGING_ATTEMPTS: u32 = 10_000;

type Handoff = Box<dyn FnMut(&Path) -> io::Result<()>>;

/// Stages the export as a file and hands its path to a share mechanism.
pub struct ShareExportSink {
    staging_dir: PathBuf,
    handoff: Option<Handoff>,
}

impl ShareExportSink {
    pub fn new(staging_dir: impl Into<PathBuf>) -> Self {
        Self {
            staging_dir: staging_dir.into(),
            handoff: None,
        }
    }

    /// Run `handoff` with the staged file path after each write.
    #[must_use]
    pub fn with_handoff(mut self, handoff: impl FnMut(&Path) -> io::Result<()> + 'static) -> Self {
        self.handoff = Some(Box::new(handoff));
        self
    }

    /// Create a new staged file, never reusing the path of an earlier export.
    fn create_staged_file(&self) -> io::Result<(PathBuf, File)> {
        let base = suggested_export_file_name(chrono::Utc::now().timestamp_millis());
        let stem = base.trim_end_matches(".csv");

        for attempt in 0..MAX_STAGING_ATTEMPTS {
            let file_name = if attempt == 0 {
                base.clone()
            } else {
                format!("{stem}-{attempt}.csv")
            };
            let path = self.staging_dir.join(file_name);
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => return Ok((path, file)),
                Err(error) if error.kind() == io::ErrorKind::AlreadyExists => {}
                Err(error) => return Err(error),
            }
        }

        Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!(
                "No free export file name in {} after {MAX_STAGING_ATTEMPTS} attempts",
                self.staging_dir.display()
            ),
        ))
    }
}

impl fmt::Debug for ShareExportSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShareExportSink")
            .field("staging_dir", &self.staging_dir)
            .field("handoff", &self.handoff.is_some())
            .finish()
    }
}

impl ExportSink for ShareExportSink {
    fn write(&mut self, bytes: &[u8]) -> io::Result<ExportDestination> {
        std::fs::create_dir_all(&self.staging_dir)?;
        let (path, mut file) = self.create_staged_file()?;
        file.write_all(bytes)?;
        file.sync_all()?;
        drop(file);

        if let Some(handoff) = self.handoff.as_mut() {
            handoff(&path)?;
        }
        Ok(ExportDestination::Shared(path))
    }
}

/// Writes the export to any `io::Write`, e.g. stdout.
#[derive(Debug)]
pub struct WriterExportSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterExportSink<W> {
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ExportSink for WriterExportSink<W> {
    fn write(&mut self, bytes: &[u8]) -> io::Result<ExportDestination> {
        self.writer.write_all(bytes)?;
        self.writer.flush()?;
        Ok(ExportDestination::Stream)
    }
}
