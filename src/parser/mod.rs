//! HTML parsing and record extraction
//!
//! This module converts Sidearm athletics pages into typed records
//! (players, games, stat lines, news articles).

pub mod html;
pub mod sanitize;
pub mod selectors;

// Re-export main parser and public types
pub use html::{FieldValues, PageParser};
pub use selectors::{record_spec, FieldSpec, Read, RecordSpec};
