use std::rc::Rc;

/// Runtime value. All numeric arithmetic is f64; strings are the only
/// other type and never coerce to numbers.
#[derive(Debug, Clone, PartialEq)]
pub enum Val {
    Number(f64),
    String(Rc<str>),
}

impl Val {
    /// Default for an unassigned variable of the named type.
    pub fn default_for(name: &str) -> Val {
        if name.ends_with('$') {
            Val::String("".into())
        } else {
            Val::Number(0.0)
        }
    }

    pub fn is_string(&self) -> bool {
        match self {
            Val::Number(_) => false,
            Val::String(_) => true,
        }
    }
}

impl std::fmt::Display for Val {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            // Integral values print without a decimal point.
            Val::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            Val::String(s) => write!(f, "{}", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_display() {
        assert_eq!(Val::Number(1.0).to_string(), "1");
        assert_eq!(Val::Number(-3.0).to_string(), "-3");
        assert_eq!(Val::Number(1.5).to_string(), "1.5");
    }

    #[test]
    fn test_default_by_suffix() {
        assert_eq!(Val::default_for("A"), Val::Number(0.0));
        assert_eq!(Val::default_for("A$"), Val::String("".into()));
    }
}
