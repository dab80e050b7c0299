use crate::error;
use crate::lang::{Error, ErrorCode};

type Result<T> = std::result::Result<T, Error>;

/// ## Stack enforced and size limited vector
///
/// Underflow reports the code the stack was built with, so the GOSUB
/// stack raises RETURN WITHOUT GOSUB and the loop stack raises
/// NEXT WITHOUT FOR.

pub struct Stack<T> {
    underflow: ErrorCode,
    vec: Vec<T>,
}

impl<T: std::fmt::Debug> std::fmt::Debug for Stack<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.vec)
    }
}

impl<T> Stack<T> {
    pub fn new(underflow: ErrorCode) -> Stack<T> {
        Stack {
            underflow,
            vec: vec![],
        }
    }

    fn max_len(&self) -> usize {
        u16::max_value() as usize
    }

    pub fn clear(&mut self) {
        self.vec.clear()
    }

    pub fn len(&self) -> usize {
        self.vec.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vec.is_empty()
    }

    pub fn last(&self) -> Option<&T> {
        self.vec.last()
    }

    pub fn push(&mut self, val: T) -> Result<()> {
        self.vec.push(val);
        if self.vec.len() > self.max_len() {
            Err(error!(OutOfMemory; "STACK OVERFLOW"))
        } else {
            Ok(())
        }
    }

    pub fn pop(&mut self) -> Result<T> {
        match self.vec.pop() {
            Some(v) => Ok(v),
            None => Err(Error::new(self.underflow)),
        }
    }
}
