pub mod engine;
pub mod features;
pub mod filter;
pub mod tagger;
pub mod types;
