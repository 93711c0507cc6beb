//! Constructor templates keyed by class name

use std::fmt;
use std::sync::Arc;

use ahash::AHashMap;

use super::call::CallInfo;
use super::value::Object;
use crate::env::Env;
use crate::error::{Error, Result};

/// Constructor body of a class
pub type Constructor = fn(&Arc<Env>, &CallInfo) -> Result<Object>;

/// How instances of a class come into being
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
    /// Callers may construct instances
    Public,
    /// Only the guarded stub path constructs instances
    Stub,
}

/// A registered class
#[derive(Clone, Copy)]
pub struct ClassTemplate {
    pub name: &'static str,
    pub kind: ClassKind,
    construct: Constructor,
}

impl ClassTemplate {
    pub fn new(name: &'static str, kind: ClassKind, construct: Constructor) -> Self {
        Self { name, kind, construct }
    }

    /// Run the constructor body
    pub fn construct(&self, env: &Arc<Env>, info: &CallInfo) -> Result<Object> {
        (self.construct)(env, info)
    }
}

impl fmt::Debug for ClassTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassTemplate")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish()
    }
}

/// Class templates, built once and shared by every book
#[derive(Debug, Default)]
pub struct Registry {
    classes: AHashMap<&'static str, ClassTemplate>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a class; a later registration under the same name replaces it
    pub fn register(&mut self, template: ClassTemplate) {
        tracing::trace!("registering class {}", template.name);
        self.classes.insert(template.name, template);
    }

    pub fn get(&self, name: &str) -> Option<&ClassTemplate> {
        self.classes.get(name)
    }

    /// Look up a class or fail with a generic error
    pub fn require(&self, name: &str) -> Result<&ClassTemplate> {
        self.get(name)
            .ok_or_else(|| Error::Generic(format!("class {name} is not registered")))
    }

    /// Registered class names, sorted
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.classes.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
