//! File provider implementation

use super::parse_options;
use crate::core::{Provider, Record, Result};
use serde::Deserialize;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
#[serde(default)]
struct FileOptions {
    dir: String,
    filename: String,
}

impl Default for FileOptions {
    fn default() -> Self {
        Self {
            dir: ".".to_string(),
            filename: "app.log".to_string(),
        }
    }
}

/// Appends rendered records to a single log file through a buffered
/// writer. The target directory is created if missing.
pub struct FileProvider {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl FileProvider {
    /// Construct from the opaque JSON options payload
    /// (`{"dir": "...", "filename": "..."}`).
    pub fn from_options(opts: &str) -> Result<Self> {
        let options: FileOptions = parse_options("file", opts)?;
        Self::open(Path::new(&options.dir).join(&options.filename))
    }

    /// Open (or create) the log file at `path` for appending.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            writer: BufWriter::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Provider for FileProvider {
    fn write(&mut self, record: &Record) -> Result<()> {
        writeln!(self.writer, "{}", record.format_line())?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn type_name(&self) -> &'static str {
        "file"
    }
}

impl Drop for FileProvider {
    fn drop(&mut self) {
        // Buffered data goes to disk even without an explicit flush.
        let _ = self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Level, SourceLocation};
    use tempfile::TempDir;

    #[test]
    fn test_write_and_flush() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.log");
        let mut provider = FileProvider::open(&path).unwrap();

        let record = Record::new(
            Level::Info,
            SourceLocation::new("file.rs", 1),
            "hello file".to_string(),
        );
        provider.write(&record).unwrap();
        provider.flush().unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("hello file"));
        assert!(content.contains("[INFO "));
    }

    #[test]
    fn test_from_options_creates_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        let opts = format!(
            r#"{{"dir":{:?},"filename":"svc.log"}}"#,
            nested.to_string_lossy()
        );
        let provider = FileProvider::from_options(&opts).unwrap();
        assert!(provider.path().exists());
    }

    #[test]
    fn test_open_failure_surfaces_io_error() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, b"plain file").unwrap();

        let result = FileProvider::open(blocker.join("sub").join("app.log"));
        assert!(result.is_err());
    }
}
