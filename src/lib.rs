// src/lib.rs

pub mod core;
pub mod error;
pub mod persistence;

pub use crate::core::engine::{convert, ConversionReport, LexiconConverter, RecordSink};
pub use crate::core::types::{NormalizedRecord, RawEntry, Tag};
pub use crate::error::{LexiconError, Result};
