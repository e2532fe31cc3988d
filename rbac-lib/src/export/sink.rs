//! Export output sinks.

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use log::debug;

use super::ExportFile;
use crate::error::ExportError;

/// Receives export output.
pub trait ExportSink {
    /// Delivers a generated file.
    fn download(&mut self, file: ExportFile) -> Result<(), ExportError>;

    /// Places text on the clipboard.
    fn copy_to_clipboard(&mut self, text: String) -> Result<(), ExportError>;
}

/// Writes files into a directory and copies through the system clipboard.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Paths written so far.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl ExportSink for DirectorySink {
    fn download(&mut self, file: ExportFile) -> Result<(), ExportError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(&file.name);
        fs::write(&path, &file.bytes)?;
        debug!("wrote {} bytes to {}", file.bytes.len(), path.display());
        self.written.push(path);
        Ok(())
    }

    #[cfg(feature = "clipboard")]
    fn copy_to_clipboard(&mut self, text: String) -> Result<(), ExportError> {
        let mut clipboard = arboard::Clipboard::new().map_err(|e| ExportError::Clipboard(e.to_string()))?;
        clipboard
            .set_text(text)
            .map_err(|e| ExportError::Clipboard(e.to_string()))
    }

    #[cfg(not(feature = "clipboard"))]
    fn copy_to_clipboard(&mut self, _text: String) -> Result<(), ExportError> {
        Err(ExportError::Clipboard("built without clipboard support".to_string()))
    }
}

/// Keeps export output in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    files: Vec<ExportFile>,
    clipboard: Option<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> &[ExportFile] {
        &self.files
    }

    pub fn file(&self, name: &str) -> Option<&ExportFile> {
        self.files.iter().find(|f| f.name == name)
    }

    /// Last text copied to the clipboard.
    pub fn clipboard(&self) -> Option<&str> {
        self.clipboard.as_deref()
    }
}

impl ExportSink for MemorySink {
    fn download(&mut self, file: ExportFile) -> Result<(), ExportError> {
        self.files.push(file);
        Ok(())
    }

    fn copy_to_clipboard(&mut self, text: String) -> Result<(), ExportError> {
        self.clipboard = Some(text);
        Ok(())
    }
}
