//! Parser tests.
//!
//! - `parser`: trees produced for each construct
//! - `errors`: error codes, positions, and context
//! - `roundtrip`: printed trees parse back to themselves

mod parser;
mod roundtrip;
