/*!
# Language Module

Lexical analysis and statement parsing for the BASIC language.

*/

#[macro_use]
mod error;
mod ident;
mod lex;
mod parse;

pub mod ast;
pub mod token;

pub use error::Error;
pub use error::ErrorCode;
pub use ident::Ident;
pub use lex::lex;
pub use parse::parse;

/// Character range within a canonically rendered line.
pub type Column = std::ops::Range<usize>;

/// Key of a stored program statement; also a jump target.
pub type LineNumber = u16;

/// Highest line number a program may use.
pub const MAX_LINE: LineNumber = 65529;
