//! # MICRO BASIC
//!
//! A classic line-numbered BASIC interpreter. Numbered statements are
//! stored in a program table, listed and edited by line number, run by
//! an interpreting engine, and saved to or loaded from plain text files.
//!
//! Run the `basic` binary for the interactive prompt:
//! ```text
//! MICRO BASIC
//! READY.
//! > 10 PRINT "HELLO"
//! > RUN
//! HELLO
//! ```

pub mod lang;
pub mod mach;
pub mod term;
