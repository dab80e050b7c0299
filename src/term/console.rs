use super::Terminal;
use crate::error;
use crate::lang::Error;
use linefeed::{DefaultTerminal, Interface, ReadResult, Signal};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

type Result<T> = std::result::Result<T, Error>;

/// Interactive console with line editing and history. Ctrl-C sets a
/// flag the engine polls between statements instead of killing the
/// process.
pub struct Console {
    interface: Interface<DefaultTerminal>,
    interrupt: Arc<AtomicBool>,
}

impl Console {
    pub fn new() -> std::io::Result<Console> {
        let interface = Interface::new("BASIC")?;
        interface.set_report_signal(Signal::Interrupt, true);
        let interrupt = Arc::new(AtomicBool::new(false));
        let int_moved = interrupt.clone();
        ctrlc::set_handler(move || {
            int_moved.store(true, Ordering::SeqCst);
        })
        .expect("Error setting Ctrl-C handler");
        Ok(Console {
            interface,
            interrupt,
        })
    }

    /// Read one command with the command prompt.
    pub fn read_command(&mut self) -> Result<String> {
        let line = self.prompted_line("> ")?;
        if !line.trim().is_empty() {
            self.interface.add_history_unique(line.clone());
        }
        Ok(line)
    }

    /// Drop any break request left over from the last command.
    pub fn reset_interrupt(&mut self) {
        self.interrupt.store(false, Ordering::SeqCst);
    }

    fn prompted_line(&mut self, prompt: &str) -> Result<String> {
        self.interface.set_prompt(prompt).map_err(io_error)?;
        match self.interface.read_line().map_err(io_error)? {
            ReadResult::Input(line) => Ok(line),
            ReadResult::Signal(_) => Err(error!(Break)),
            ReadResult::Eof => Err(error!(InternalError; "END OF INPUT")),
        }
    }
}

impl Terminal for Console {
    fn write(&mut self, text: &str) -> Result<()> {
        self.interface
            .write_fmt(format_args!("{}", text))
            .map_err(io_error)
    }

    fn newline(&mut self) -> Result<()> {
        self.interface
            .write_fmt(format_args!("\n"))
            .map_err(io_error)
    }

    fn read_line(&mut self, prompt: &str) -> Result<String> {
        self.prompted_line(prompt)
    }

    fn clear(&mut self) -> Result<()> {
        self.write("\x1b[2J\x1b[H")
    }

    fn home(&mut self) -> Result<()> {
        self.write("\x1b[H")
    }

    // ANSI rows and columns are one-based.
    fn cursor(&mut self, column: usize, row: usize) -> Result<()> {
        self.write(&format!("\x1b[{};{}H", row + 1, column + 1))
    }

    fn interrupted(&mut self) -> bool {
        self.interrupt.swap(false, Ordering::SeqCst)
    }
}

fn io_error(error: std::io::Error) -> Error {
    error!(InternalError; &error.to_string())
}
