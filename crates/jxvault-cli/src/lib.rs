//! # jxvault-cli — Command-Line Interface
//!
//! Thin shell over the engine: parses exactly one payload flag, wires the
//! MD5 hasher and the file-backed store to an engine rooted at the working
//! directory, drives one submission, and prints the outcome.
//!
//! ```bash
//! jxvault --json '{"a":1}'
//! jxvault --xml '<a>1</a>' --dir ./vault
//! ```
//!
//! Exit status is 0 on acceptance and 1 on any rejection or failure.

pub mod submit;
