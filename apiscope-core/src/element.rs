//! References into the source model.
//!
//! These are plain identifiers, not owners: the source model resolves them on
//! every call. Superclass links are followed by asking the model again.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A class, by qualified name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClassRef(pub String);

impl ClassRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClassRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A method of a class. `ordinal` is the declaration position and tells
/// overloads apart.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodRef {
    pub class: ClassRef,
    pub name: String,
    pub ordinal: usize,
}

impl MethodRef {
    pub fn new(class: ClassRef, name: impl Into<String>, ordinal: usize) -> Self {
        Self {
            class,
            name: name.into(),
            ordinal,
        }
    }
}

impl fmt::Display for MethodRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.class, self.name)
    }
}

/// A parameter of a method, by position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParamRef {
    pub method: MethodRef,
    pub index: usize,
}

impl ParamRef {
    pub fn new(method: MethodRef, index: usize) -> Self {
        Self { method, index }
    }
}

impl fmt::Display for ParamRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.method, self.index)
    }
}

/// Any annotatable entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element<'a> {
    Class(&'a ClassRef),
    Method(&'a MethodRef),
    Param(&'a ParamRef),
}

impl fmt::Display for Element<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Class(class) => class.fmt(f),
            Element::Method(method) => method.fmt(f),
            Element::Param(param) => param.fmt(f),
        }
    }
}

impl<'a> From<&'a ClassRef> for Element<'a> {
    fn from(class: &'a ClassRef) -> Self {
        Element::Class(class)
    }
}

impl<'a> From<&'a MethodRef> for Element<'a> {
    fn from(method: &'a MethodRef) -> Self {
        Element::Method(method)
    }
}

impl<'a> From<&'a ParamRef> for Element<'a> {
    fn from(param: &'a ParamRef) -> Self {
        Element::Param(param)
    }
}
