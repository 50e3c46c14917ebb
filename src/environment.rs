use crate::error::Error;
use crate::functions::{Function, FUNCTIONS};
use crate::lexer::is_identifier;
use hashbrown::HashMap;

/// Variables and functions available to an expression.
///
/// A new environment knows the constants `pi` and `e`, and all the
/// [`FUNCTIONS`](struct.FUNCTIONS.html).
///
/// # Examples
///
/// ```
/// # use smartcalc::Environment;
/// let mut env = Environment::new();
/// assert_eq!(env.get("pi"), Some(std::f64::consts::PI));
/// assert!(env.is_function("sqrt"));
///
/// env.define("x", 4.0).unwrap();
/// assert_eq!(env.get("x"), Some(4.0));
/// ```
#[derive(Debug, Clone)]
pub struct Environment {
    variables: HashMap<String, f64>,
    functions: HashMap<String, Function>,
}

impl Default for Environment {
    fn default() -> Self {
        let mut variables = HashMap::new();
        variables.insert("pi".to_owned(), std::f64::consts::PI);
        variables.insert("e".to_owned(), std::f64::consts::E);
        Self {
            variables,
            functions: (*FUNCTIONS).clone(),
        }
    }
}

impl Environment {
    /// Create an environment with the default constants and functions
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an environment without any variable or function
    pub fn empty() -> Self {
        Self {
            variables: HashMap::new(),
            functions: HashMap::new(),
        }
    }

    /// Get the value of the variable `name`, if it is defined
    pub fn get(&self, name: &str) -> Option<f64> {
        self.variables.get(name).copied()
    }

    /// Bind `name` to `value`, replacing any previous value.
    ///
    /// Fails if `name` is not a lowercase identifier, or if it is the name of
    /// a function.
    pub fn define(&mut self, name: &str, value: f64) -> Result<(), Error> {
        if !is_identifier(name) || self.is_function(name) {
            return Err(Error::InvalidName(name.into()));
        }
        self.variables.insert(name.into(), value);
        Ok(())
    }

    /// Remove the variable `name`, returning its last value
    pub fn remove(&mut self, name: &str) -> Option<f64> {
        self.variables.remove(name)
    }

    /// Iterate over all the defined variables
    pub fn variables(&self) -> impl Iterator<Item = (&str, f64)> {
        self.variables.iter().map(|(name, &value)| (name.as_str(), value))
    }

    /// Get the function `name`, if it is known
    pub fn function(&self, name: &str) -> Option<Function> {
        self.functions.get(name).copied()
    }

    /// Check if `name` is a known function
    pub fn is_function(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Make `function` available as `name`.
    ///
    /// A variable with the same name is shadowed for the rest of the session,
    /// so it is removed.
    pub fn register_function(&mut self, name: &str, function: Function) -> Result<(), Error> {
        if !is_identifier(name) {
            return Err(Error::InvalidName(name.into()));
        }
        self.variables.remove(name);
        self.functions.insert(name.into(), function);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Environment;
    use crate::error::Error;

    #[test]
    fn defaults() {
        let env = Environment::new();
        assert_eq!(env.get("pi"), Some(std::f64::consts::PI));
        assert_eq!(env.get("e"), Some(std::f64::consts::E));
        assert_eq!(env.get("x"), None);
        assert!(env.function("factorial").is_some());
        assert_eq!(env.variables().count(), 2);

        let empty = Environment::empty();
        assert_eq!(empty.get("pi"), None);
        assert!(!empty.is_function("sin"));
    }

    #[test]
    fn define() {
        let mut env = Environment::new();
        env.define("x", 1.0).unwrap();
        env.define("x", 2.0).unwrap();
        assert_eq!(env.get("x"), Some(2.0));
        env.define("pi", 3.0).unwrap();
        assert_eq!(env.get("pi"), Some(3.0));
        assert_eq!(env.remove("x"), Some(2.0));
        assert_eq!(env.get("x"), None);

        for name in &["", "X", "2x", "a b", "sin"] {
            assert_eq!(
                env.define(name, 1.0),
                Err(Error::InvalidName((*name).into()))
            );
        }
    }

    #[test]
    fn register_function() {
        fn double(x: f64) -> Result<f64, Error> {
            Ok(2.0 * x)
        }

        let mut env = Environment::new();
        env.define("twice", 1.0).unwrap();
        env.register_function("twice", double).unwrap();
        assert_eq!(env.get("twice"), None);
        assert_eq!(env.function("twice").map(|f| f(4.0)), Some(Ok(8.0)));
        assert!(env.register_function("Twice", double).is_err());
    }
}
