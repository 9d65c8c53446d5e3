// File: src/persistence.rs
use crate::core::engine::RecordSink;
use crate::core::types::{NormalizedRecord, RawEntry};
use crate::error::{LexiconError, Result};
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;

/// Reads raw entries from JSON Lines, one Lefff row per line.
///
/// A line that is not UTF-8 or not JSON is reported on its own; the lines after
/// it are still read.
pub struct JsonLinesReader<R> {
    reader: R,
    buf: Vec<u8>,
    line_no: usize,
}

impl<R: BufRead> JsonLinesReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, buf: Vec::new(), line_no: 0 }
    }
}

impl<R: BufRead> Iterator for JsonLinesReader<R> {
    type Item = Result<RawEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(e.into())),
            }
            self.line_no += 1;
            let line_no = self.line_no;

            let line = match String::from_utf8(std::mem::take(&mut self.buf)) {
                Ok(line) => line,
                Err(source) => return Some(Err(LexiconError::Decode { line: line_no, source })),
            };
            let line = line.trim_end_matches(['\n', '\r']);
            if line.trim().is_empty() {
                continue;
            }
            return Some(
                serde_json::from_str(line)
                    .map_err(|source| LexiconError::Json { line: line_no, source }),
            );
        }
    }
}

/// Streams `form\tlemma\ttag` lines into a temporary file next to the target.
/// Nothing appears at the target path until [`finish`](Self::finish) succeeds.
pub struct TsvWriter {
    writer: BufWriter<NamedTempFile>,
    target: PathBuf,
}

impl TsvWriter {
    pub fn create(path: &Path) -> Result<Self> {
        let parent_dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent_dir)?;

        let temp_file = NamedTempFile::new_in(parent_dir)?;
        Ok(Self {
            writer: BufWriter::new(temp_file),
            target: path.to_path_buf(),
        })
    }

    /// Flushes and atomically moves the file into place. Returns its size in bytes.
    pub fn finish(self) -> Result<u64> {
        let temp_file = self.writer.into_inner().map_err(|e| e.into_error())?;
        let file = temp_file.persist(&self.target)?;
        let size = file.metadata()?.len();
        info!(path = %self.target.display(), bytes = size, "lexicon written");
        Ok(size)
    }
}

impl RecordSink for TsvWriter {
    fn accept(&mut self, record: &NormalizedRecord) -> Result<()> {
        writeln!(self.writer, "{record}")?;
        Ok(())
    }
}

/// The first `count` lines of a written lexicon.
pub fn sample_lines(path: &Path, count: usize) -> Result<Vec<String>> {
    let reader = BufReader::new(File::open(path)?);
    let mut sample = Vec::with_capacity(count);
    for line in reader.lines().take(count) {
        sample.push(line?);
    }
    Ok(sample)
}

/// For each word, up to `limit` written lines whose form is exactly that word.
pub fn lines_for_forms(
    path: &Path,
    words: &[String],
    limit: usize,
) -> Result<Vec<(String, Vec<String>)>> {
    let content = fs::read_to_string(path)?;
    let found = words
        .iter()
        .map(|word| {
            let prefix = format!("{word}\t");
            let matches = content
                .lines()
                .filter(|line| line.starts_with(&prefix))
                .take(limit)
                .map(str::to_string)
                .collect();
            (word.clone(), matches)
        })
        .collect();
    Ok(found)
}
