/*!
## Terminal Module

The capability boundary between the interpreter and the outside
world. The engine talks only to the `Terminal` trait; the console
backend and the test harness both live behind it.

*/

mod console;

pub use console::Console;

use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// Everything a running program may do to its surroundings. Screen
/// control and key input have refusing defaults so a minimal backend
/// only has to write text and read lines.
pub trait Terminal {
    /// Write text with no trailing newline.
    fn write(&mut self, text: &str) -> Result<()>;

    fn newline(&mut self) -> Result<()>;

    fn print(&mut self, text: &str) -> Result<()> {
        self.write(text)?;
        self.newline()
    }

    /// Show the prompt and read one line of input.
    fn read_line(&mut self, prompt: &str) -> Result<String>;

    /// Wait for one key and return its char code.
    fn read_char(&mut self) -> Result<u32> {
        Err(unsupported())
    }

    /// Return a pending key without waiting, if there is one.
    fn poll_char(&mut self) -> Option<u32> {
        None
    }

    fn clear(&mut self) -> Result<()> {
        Err(unsupported())
    }

    fn home(&mut self) -> Result<()> {
        Err(unsupported())
    }

    fn cursor(&mut self, column: usize, row: usize) -> Result<()> {
        let _ = (column, row);
        Err(unsupported())
    }

    /// True once when the user has requested a break. Polled by the
    /// engine between statements.
    fn interrupted(&mut self) -> bool {
        false
    }
}

fn unsupported() -> Error {
    error!(IllegalFunctionCall; "NOT SUPPORTED BY TERMINAL")
}
