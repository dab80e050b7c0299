use super::Val;
use crate::error;
use crate::lang::Error;
use std::collections::HashMap;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// ## Variable memory
///
/// Scalars and arrays live in separate tables; the `$` suffix of a
/// name fixes its type and mismatched stores are errors, never
/// coercions. Arrays exist only after DIM and are never resized.

#[derive(Debug, Default)]
pub struct Var {
    vars: HashMap<Rc<str>, Val>,
    arrays: HashMap<Rc<str>, Vec<Val>>,
}

impl Var {
    pub fn new() -> Var {
        Var::default()
    }

    pub fn clear(&mut self) {
        self.vars.clear();
        self.arrays.clear();
    }

    pub fn fetch(&self, var_name: &Rc<str>) -> Val {
        match self.vars.get(var_name) {
            Some(val) => val.clone(),
            None => Val::default_for(var_name),
        }
    }

    pub fn store(&mut self, var_name: &Rc<str>, value: Val) -> Result<()> {
        if self.vars.len() > u16::max_value() as usize {
            return Err(error!(OutOfMemory));
        }
        self.type_check(var_name, &value)?;
        match self.vars.get_mut(var_name) {
            Some(var) => *var = value,
            None => {
                self.vars.insert(var_name.clone(), value);
            }
        }
        Ok(())
    }

    /// DIM: elements 0..=size, defaulted per the name's type.
    pub fn dimension(&mut self, var_name: &Rc<str>, size: usize) -> Result<()> {
        if self.arrays.contains_key(var_name) {
            return Err(error!(RedimensionedArray));
        }
        if size > u16::max_value() as usize {
            return Err(error!(OutOfMemory));
        }
        let default = Val::default_for(var_name);
        self.arrays
            .insert(var_name.clone(), vec![default; size + 1]);
        Ok(())
    }

    pub fn fetch_element(&self, var_name: &Rc<str>, index: f64) -> Result<Val> {
        let index = self.element_index(var_name, index)?;
        match self.arrays.get(var_name) {
            Some(arr) => match arr.get(index) {
                Some(val) => Ok(val.clone()),
                None => Err(error!(SubscriptOutOfRange)),
            },
            None => Err(error!(SubscriptOutOfRange; "ARRAY NOT DIMENSIONED")),
        }
    }

    pub fn store_element(&mut self, var_name: &Rc<str>, index: f64, value: Val) -> Result<()> {
        self.type_check(var_name, &value)?;
        let index = self.element_index(var_name, index)?;
        match self.arrays.get_mut(var_name) {
            Some(arr) => match arr.get_mut(index) {
                Some(slot) => {
                    *slot = value;
                    Ok(())
                }
                None => Err(error!(SubscriptOutOfRange)),
            },
            None => Err(error!(SubscriptOutOfRange; "ARRAY NOT DIMENSIONED")),
        }
    }

    fn element_index(&self, _var_name: &Rc<str>, index: f64) -> Result<usize> {
        if index < 0.0 || !index.is_finite() {
            return Err(error!(SubscriptOutOfRange));
        }
        Ok(index as usize)
    }

    fn type_check(&self, var_name: &Rc<str>, value: &Val) -> Result<()> {
        if var_name.ends_with('$') != value.is_string() {
            return Err(error!(TypeMismatch));
        }
        Ok(())
    }
}
