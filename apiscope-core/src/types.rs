//! Resolved parameter types.
//!
//! The generic export pipeline turns a declared type into one of these before
//! the classifier sees it. The classifier only needs the shape: whether a
//! value is an object with fields, an uploadable file, or something scalar.

use serde::{Deserialize, Serialize};

/// Structural description of a parameter type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolvedType {
    Scalar {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        example: Option<String>,
    },
    File,
    Array {
        item: Box<ResolvedType>,
    },
    Object {
        name: String,
        #[serde(default)]
        fields: Vec<Field>,
    },
}

/// A field of an object type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: ResolvedType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
}

impl ResolvedType {
    pub fn scalar(name: impl Into<String>) -> Self {
        ResolvedType::Scalar {
            name: name.into(),
            example: None,
        }
    }

    pub fn object(name: impl Into<String>, fields: Vec<Field>) -> Self {
        ResolvedType::Object {
            name: name.into(),
            fields,
        }
    }

    /// Whether an uploadable file appears anywhere in the structure.
    pub fn contains_file(&self) -> bool {
        match self {
            ResolvedType::File => true,
            ResolvedType::Scalar { .. } => false,
            ResolvedType::Array { item } => item.contains_file(),
            ResolvedType::Object { fields, .. } => fields.iter().any(|f| f.ty.contains_file()),
        }
    }

    /// Example text for scalar values, empty for everything else.
    pub fn example(&self) -> String {
        match self {
            ResolvedType::Scalar { example, .. } => example.clone().unwrap_or_default(),
            _ => String::new(),
        }
    }
}

impl Field {
    pub fn new(name: impl Into<String>, ty: ResolvedType) -> Self {
        Self {
            name: name.into(),
            ty,
            description: None,
            required: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }
}
