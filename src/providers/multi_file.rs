//! Multi-file provider: one log file per level

use super::parse_options;
use crate::core::{Level, Provider, Record, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
#[serde(default)]
struct MultiFileOptions {
    rootdir: String,
    filename: String,
}

impl Default for MultiFileOptions {
    fn default() -> Self {
        Self {
            rootdir: "logs".to_string(),
            filename: "app".to_string(),
        }
    }
}

/// Splits output by level: records land in
/// `<rootdir>/<filename>.<level>.log` (e.g. `logs/app.error.log`).
/// Per-level files are opened lazily on first write.
pub struct MultiFileProvider {
    rootdir: PathBuf,
    filename: String,
    writers: HashMap<Level, BufWriter<File>>,
}

impl MultiFileProvider {
    /// Construct from the opaque JSON options payload
    /// (`{"rootdir": "...", "filename": "..."}`).
    pub fn from_options(opts: &str) -> Result<Self> {
        let options: MultiFileOptions = parse_options("multifile", opts)?;
        Self::new(options.rootdir, options.filename)
    }

    pub fn new(rootdir: impl Into<PathBuf>, filename: impl Into<String>) -> Result<Self> {
        let rootdir = rootdir.into();
        fs::create_dir_all(&rootdir)?;
        Ok(Self {
            rootdir,
            filename: filename.into(),
            writers: HashMap::new(),
        })
    }

    pub fn level_path(&self, level: Level) -> PathBuf {
        self.rootdir
            .join(format!("{}.{}.log", self.filename, level.as_lower_str()))
    }

    fn writer_for(&mut self, level: Level) -> Result<&mut BufWriter<File>> {
        if !self.writers.contains_key(&level) {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(self.level_path(level))?;
            self.writers.insert(level, BufWriter::new(file));
        }
        // Just inserted above when absent.
        Ok(self
            .writers
            .get_mut(&level)
            .expect("writer present after insert"))
    }
}

impl Provider for MultiFileProvider {
    fn write(&mut self, record: &Record) -> Result<()> {
        let line = record.format_line();
        let writer = self.writer_for(record.level)?;
        writeln!(writer, "{}", line)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        for writer in self.writers.values_mut() {
            writer.flush()?;
        }
        Ok(())
    }

    fn type_name(&self) -> &'static str {
        "multifile"
    }
}

impl Drop for MultiFileProvider {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}
