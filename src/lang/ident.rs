// Used in both Token and Ast

use std::rc::Rc;

/// Variable name. The `$` suffix is part of the identity and selects
/// the string type; everything else is a number.
#[derive(Debug, PartialEq, Hash, Clone)]
pub enum Ident {
    Plain(Rc<str>),
    String(Rc<str>),
}

impl Ident {
    pub fn name(&self) -> &Rc<str> {
        match self {
            Ident::Plain(s) => s,
            Ident::String(s) => s,
        }
    }

    pub fn is_string(&self) -> bool {
        match self {
            Ident::Plain(_) => false,
            Ident::String(_) => true,
        }
    }
}

impl std::fmt::Display for Ident {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
