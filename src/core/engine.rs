use crate::core::filter::{self, SkipReason};
use crate::core::tagger;
use crate::core::types::{NormalizedRecord, RawEntry};
use crate::error::{LexiconError, Result};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Consumes accepted records. Errors here abort the conversion.
pub trait RecordSink {
    fn accept(&mut self, record: &NormalizedRecord) -> Result<()>;
}

impl RecordSink for Vec<NormalizedRecord> {
    fn accept(&mut self, record: &NormalizedRecord) -> Result<()> {
        self.push(record.clone());
        Ok(())
    }
}

/// Skipped entries, one counter per reason.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SkipCounts {
    pub malformed_entry: u64,
    pub excluded_category: u64,
    pub non_alphabetic_form: u64,
    pub mapping_failure: u64,
}

impl SkipCounts {
    fn bump(&mut self, reason: SkipReason) {
        let counter = match reason {
            SkipReason::MalformedEntry => &mut self.malformed_entry,
            SkipReason::ExcludedCategory => &mut self.excluded_category,
            SkipReason::NonAlphabeticForm => &mut self.non_alphabetic_form,
            SkipReason::MappingFailure => &mut self.mapping_failure,
        };
        *counter += 1;
    }

    pub fn total(&self) -> u64 {
        self.malformed_entry + self.excluded_category + self.non_alphabetic_form + self.mapping_failure
    }
}

/// What a conversion pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConversionReport {
    pub accepted: u64,
    pub skipped: SkipCounts,
}

impl ConversionReport {
    pub fn skipped_total(&self) -> u64 {
        self.skipped.total()
    }
}

/// The fate of a single raw entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Accepted(NormalizedRecord),
    Skipped(SkipReason),
}

/// Runs each entry through the filter and the tag mapper, feeding a sink.
///
/// Entries are independent of each other; the converter only carries the counts.
#[derive(Debug, Default)]
pub struct LexiconConverter {
    report: ConversionReport,
}

impl LexiconConverter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter, then map. Never fails: every problem becomes a skip.
    pub fn classify(entry: &RawEntry) -> Outcome {
        let category = match filter::admit(entry) {
            Ok(category) => category,
            Err(reason) => return Outcome::Skipped(reason),
        };
        match tagger::normalize(entry, &category) {
            Ok(record) => Outcome::Accepted(record),
            Err(e) => {
                debug!(form = %entry.form, error = %e, "tag mapping failed");
                Outcome::Skipped(SkipReason::MappingFailure)
            }
        }
    }

    pub fn process<S: RecordSink>(&mut self, entry: &RawEntry, sink: &mut S) -> Result<()> {
        match Self::classify(entry) {
            Outcome::Accepted(record) => {
                sink.accept(&record)?;
                self.report.accepted += 1;
            }
            Outcome::Skipped(reason) => {
                debug!(form = %entry.form, category = %entry.category, %reason, "skipping entry");
                self.report.skipped.bump(reason);
            }
        }
        Ok(())
    }

    /// Like [`process`](Self::process), for entries coming from a fallible source.
    /// Undecodable lines count as malformed entries; anything else is fatal.
    pub fn process_read<S: RecordSink>(&mut self, read: Result<RawEntry>, sink: &mut S) -> Result<()> {
        match read {
            Ok(entry) => self.process(&entry, sink),
            Err(LexiconError::Json { line, source }) => {
                warn!(line, error = %source, "unreadable lexicon line");
                self.report.skipped.bump(SkipReason::MalformedEntry);
                Ok(())
            }
            Err(LexiconError::Decode { line, source }) => {
                warn!(line, error = %source, "lexicon line is not valid UTF-8");
                self.report.skipped.bump(SkipReason::MalformedEntry);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    pub fn report(&self) -> ConversionReport {
        self.report
    }

    pub fn finish(self) -> ConversionReport {
        info!(
            accepted = self.report.accepted,
            skipped = self.report.skipped_total(),
            "conversion finished"
        );
        self.report
    }
}

/// Converts a whole sequence of entries in one pass.
pub fn convert<I, S>(entries: I, sink: &mut S) -> Result<ConversionReport>
where
    I: IntoIterator<Item = RawEntry>,
    S: RecordSink,
{
    let mut converter = LexiconConverter::new();
    for entry in entries {
        converter.process(&entry, sink)?;
    }
    Ok(converter.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    struct FailingSink;

    impl RecordSink for FailingSink {
        fn accept(&mut self, _record: &NormalizedRecord) -> Result<()> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full").into())
        }
    }

    fn json_error(line: usize) -> LexiconError {
        let source = serde_json::from_str::<RawEntry>("{not json").unwrap_err();
        LexiconError::Json { line, source }
    }

    #[test]
    fn counts_every_skip_reason() {
        let entries = vec![
            RawEntry::new("chat", "chat", "nc", "ms", ""),
            RawEntry::new("chat", "", "nc", "ms", ""),
            RawEntry::new(",", ",", "poncts", "", ""),
            RawEntry::new("123", "123", "adj", "", ""),
            RawEntry::new("chat", "chat", "nc", "m s", ""),
        ];
        let mut sink: Vec<NormalizedRecord> = Vec::new();
        let report = convert(entries, &mut sink).unwrap();

        assert_eq!(report.accepted, 1);
        assert_eq!(
            report.skipped,
            SkipCounts {
                malformed_entry: 1,
                excluded_category: 1,
                non_alphabetic_form: 1,
                mapping_failure: 1,
            }
        );
        assert_eq!(report.skipped_total(), 4);
        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].to_string(), "chat\tchat\tN m s");
    }

    #[test]
    fn classify_reports_the_skip_reason() {
        let entry = RawEntry::new("du", "de", "amlgm", "", "");
        assert_eq!(
            LexiconConverter::classify(&entry),
            Outcome::Skipped(SkipReason::ExcludedCategory)
        );
    }

    #[test]
    fn unreadable_lines_are_malformed_entries() {
        let mut converter = LexiconConverter::new();
        let mut sink: Vec<NormalizedRecord> = Vec::new();
        converter.process_read(Err(json_error(7)), &mut sink).unwrap();
        converter
            .process_read(Ok(RawEntry::new("vite", "vite", "adv", "", "")), &mut sink)
            .unwrap();
        assert_eq!(converter.report().skipped_total(), 1);

        let report = converter.finish();
        assert_eq!(report.accepted, 1);
        assert_eq!(report.skipped.malformed_entry, 1);
    }

    #[test]
    fn undecodable_lines_are_malformed_entries() {
        let source = String::from_utf8(vec![b'c', 0xff]).unwrap_err();
        let mut converter = LexiconConverter::new();
        let mut sink: Vec<NormalizedRecord> = Vec::new();
        converter.process_read(Err(LexiconError::Decode { line: 2, source }), &mut sink).unwrap();
        assert_eq!(converter.report().skipped.malformed_entry, 1);
    }

    #[test]
    fn io_errors_from_the_source_are_fatal() {
        let mut converter = LexiconConverter::new();
        let err = io::Error::new(io::ErrorKind::UnexpectedEof, "truncated");
        let mut sink: Vec<NormalizedRecord> = Vec::new();
        let result = converter.process_read(Err(err.into()), &mut sink);
        assert!(matches!(result, Err(LexiconError::Io(_))));
    }

    #[test]
    fn sink_errors_abort_the_conversion() {
        let entries = vec![RawEntry::new("chat", "chat", "nc", "ms", "")];
        assert!(convert(entries, &mut FailingSink).is_err());
    }

    #[test]
    fn report_serializes_with_reason_counters() {
        let report = ConversionReport {
            accepted: 2,
            skipped: SkipCounts { mapping_failure: 1, ..SkipCounts::default() },
        };
        let json = serde_json::to_value(report).unwrap();
        assert_eq!(json["accepted"], 2);
        assert_eq!(json["skipped"]["mapping_failure"], 1);
        assert_eq!(json["skipped"]["excluded_category"], 0);
    }
}
