/*!
## Machine Module

The statement store and the execution engine for BASIC programs.

*/

mod eval;
mod program;
mod runtime;
mod stack;
mod val;
mod var;

pub use program::Program;
pub use runtime::Position;
pub use runtime::Runtime;
pub use stack::Stack;
pub use val::Val;
pub use var::Var;
