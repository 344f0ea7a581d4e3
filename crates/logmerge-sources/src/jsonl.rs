use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use logmerge_core::{AsyncLogSource, LogSource, SourceError, SourceResult};
use logmerge_types::LogEntry;
use tracing::debug;

/// Source that reads one JSON-encoded [`LogEntry`] per line.
///
/// Blank lines are skipped. A line that does not decode is reported as
/// [`SourceError::Parse`] with its one-based line number. The async pull
/// reads from the same blocking reader; it is meant for local files and
/// in-memory buffers, not slow devices.
#[derive(Debug)]
pub struct JsonLinesSource<R> {
    reader: R,
    line: u64,
    buf: String,
    label: Option<PathBuf>,
}

impl<R: BufRead> JsonLinesSource<R> {
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            buf: String::new(),
            label: None,
        }
    }

    /// Number of lines consumed so far, blank lines included.
    pub fn lines_read(&self) -> u64 {
        self.line
    }

    /// Path the source was opened from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.label.as_deref()
    }

    fn read_entry(&mut self) -> SourceResult<Option<LogEntry>> {
        loop {
            self.buf.clear();
            if self.reader.read_line(&mut self.buf)? == 0 {
                return Ok(None);
            }
            self.line += 1;

            let text = self.buf.trim();
            if text.is_empty() {
                continue;
            }
            return serde_json::from_str(text)
                .map(Some)
                .map_err(|e| SourceError::Parse {
                    line: self.line,
                    reason: e.to_string(),
                });
        }
    }
}

impl JsonLinesSource<BufReader<File>> {
    /// Open a JSON-lines file.
    pub fn open(path: impl AsRef<Path>) -> SourceResult<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        debug!(path = %path.display(), "opened json-lines source");
        let mut source = Self::from_reader(BufReader::new(file));
        source.label = Some(path.to_path_buf());
        Ok(source)
    }
}

impl<R: BufRead> LogSource for JsonLinesSource<R> {
    fn pop(&mut self) -> SourceResult<Option<LogEntry>> {
        self.read_entry()
    }
}

#[async_trait]
impl<R: BufRead + Send> AsyncLogSource for JsonLinesSource<R> {
    async fn pop_async(&mut self) -> SourceResult<Option<LogEntry>> {
        self.read_entry()
    }
}
