//! Call frames and argument coercion

use super::value::Value;
use crate::error::{Error, Result};

static UNDEFINED: Value = Value::Undefined;

/// Arguments of one host call
#[derive(Debug, Clone, Default)]
pub struct CallInfo {
    construct: bool,
    args: Vec<Value>,
}

impl CallInfo {
    /// A `new` invocation
    pub fn construct(args: Vec<Value>) -> Self {
        Self { construct: true, args }
    }

    /// A plain function invocation
    pub fn call(args: Vec<Value>) -> Self {
        Self { construct: false, args }
    }

    pub fn is_construct_call(&self) -> bool {
        self.construct
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Argument at `pos`; missing arguments read as undefined
    pub fn arg(&self, pos: usize) -> &Value {
        self.args.get(pos).unwrap_or(&UNDEFINED)
    }

    /// Same arguments as a `new` invocation
    pub(crate) fn into_construct(self) -> Self {
        Self {
            construct: true,
            args: self.args,
        }
    }
}

/// Typed access to call arguments
///
/// Coercion failures are recorded rather than returned; only the first
/// failure is kept and [`Arguments::check`] turns it into a type error.
#[derive(Debug)]
pub struct Arguments<'a> {
    info: &'a CallInfo,
    error: Option<String>,
}

impl<'a> Arguments<'a> {
    pub fn new(info: &'a CallInfo) -> Self {
        Self { info, error: None }
    }

    pub fn get_int(&mut self, pos: usize) -> i32 {
        self.get(pos, Value::as_i32, "integer")
    }

    /// The first coercion failure, if any
    pub fn check(self) -> Result<()> {
        match self.error {
            Some(message) => Err(Error::Type(message)),
            None => Ok(()),
        }
    }

    fn get<T: Default>(&mut self, pos: usize, coerce: impl FnOnce(&Value) -> Option<T>, what: &str) -> T {
        match coerce(self.info.arg(pos)) {
            Some(v) => v,
            None => {
                if self.error.is_none() {
                    self.error = Some(format!("{what} required at position {pos}"));
                }
                T::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_first_failure_wins() {
        let info = CallInfo::call(vec![Value::from("x"), Value::Null]);
        let mut args = Arguments::new(&info);
        assert_eq!(args.get_int(0), 0);
        assert_eq!(args.get_int(1), 0);
        assert_eq!(args.check(), Err(Error::Type("integer required at position 0".into())));
    }

    #[test]
    fn test_integral_arguments_pass() {
        let info = CallInfo::call(vec![Value::from(7), Value::from(-2)]);
        let mut args = Arguments::new(&info);
        assert_eq!(args.get_int(0), 7);
        assert_eq!(args.get_int(1), -2);
        assert!(args.check().is_ok());
    }

    #[test]
    fn test_missing_argument_is_undefined() {
        let info = CallInfo::construct(Vec::new());
        assert!(matches!(info.arg(3), Value::Undefined));
        assert!(info.is_construct_call());
        assert!(CallInfo::call(Vec::new()).into_construct().is_construct_call());
    }
}
