//! Protocol decoding modules.
//!
//! Each protocol follows a layered structure:
//! - `table`: command code descriptions (source of truth)
//! - `scanner`: ordered field-by-field tokenization
//! - `parser`: domain-level decoding (no direct character indexing)
//! - `error`: explicit, actionable errors
//!
//! Parsers are pure and contain no I/O; sources and the stream decoder
//! handle file access and aggregation.

pub mod lss;
