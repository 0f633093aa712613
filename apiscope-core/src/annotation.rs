//! Annotation facts and typed attribute access.
//!
//! Source models hand out annotation attributes as raw JSON values. Annotations
//! in user code are irregular (arrays where a single value is expected, enum
//! references written as text, empty defaults), so every accessor here degrades
//! to "absent" instead of failing.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw attribute map of one annotation instance.
pub type AttributeMap = serde_json::Map<String, Value>;

/// Spring annotations understood by the inference engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnnotationKind {
    Controller,
    RestController,
    RequestMapping,
    GetMapping,
    PostMapping,
    PutMapping,
    DeleteMapping,
    PatchMapping,
    RequestBody,
    ModelAttribute,
    RequestHeader,
    PathVariable,
    RequestParam,
}

impl AnnotationKind {
    /// Annotations marking a class as a controller.
    pub const CONTROLLERS: [AnnotationKind; 2] =
        [AnnotationKind::Controller, AnnotationKind::RestController];

    /// Mapping annotations, in lookup order.
    pub const MAPPINGS: [AnnotationKind; 6] = [
        AnnotationKind::RequestMapping,
        AnnotationKind::GetMapping,
        AnnotationKind::PostMapping,
        AnnotationKind::PutMapping,
        AnnotationKind::DeleteMapping,
        AnnotationKind::PatchMapping,
    ];

    /// Fully-qualified annotation name.
    pub fn qualified_name(&self) -> &'static str {
        match self {
            AnnotationKind::Controller => "org.springframework.stereotype.Controller",
            AnnotationKind::RestController => {
                "org.springframework.web.bind.annotation.RestController"
            }
            AnnotationKind::RequestMapping => {
                "org.springframework.web.bind.annotation.RequestMapping"
            }
            AnnotationKind::GetMapping => "org.springframework.web.bind.annotation.GetMapping",
            AnnotationKind::PostMapping => "org.springframework.web.bind.annotation.PostMapping",
            AnnotationKind::PutMapping => "org.springframework.web.bind.annotation.PutMapping",
            AnnotationKind::DeleteMapping => {
                "org.springframework.web.bind.annotation.DeleteMapping"
            }
            AnnotationKind::PatchMapping => {
                "org.springframework.web.bind.annotation.PatchMapping"
            }
            AnnotationKind::RequestBody => "org.springframework.web.bind.annotation.RequestBody",
            AnnotationKind::ModelAttribute => {
                "org.springframework.web.bind.annotation.ModelAttribute"
            }
            AnnotationKind::RequestHeader => {
                "org.springframework.web.bind.annotation.RequestHeader"
            }
            AnnotationKind::PathVariable => {
                "org.springframework.web.bind.annotation.PathVariable"
            }
            AnnotationKind::RequestParam => {
                "org.springframework.web.bind.annotation.RequestParam"
            }
        }
    }

    /// Simple (unqualified) annotation name.
    pub fn simple_name(&self) -> &'static str {
        simple_name(self.qualified_name())
    }
}

impl std::fmt::Display for AnnotationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "@{}", self.simple_name())
    }
}

/// Last segment of a dotted name.
pub fn simple_name(qualified: &str) -> &str {
    qualified.rsplit('.').next().unwrap_or(qualified)
}

/// An annotation instance found on a class, method or parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationFact {
    pub kind: AnnotationKind,
    pub attributes: AttributeMap,
}

impl AnnotationFact {
    pub fn new(kind: AnnotationKind, attributes: AttributeMap) -> Self {
        Self { kind, attributes }
    }

    /// Raw attribute value.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Attribute rendered as a string, see [`tiny_string`].
    pub fn string(&self, name: &str) -> Option<String> {
        self.get(name).and_then(tiny_string)
    }

    /// Alias lookup: the first listed attribute with a non-blank value.
    pub fn any(&self, names: &[&str]) -> Option<String> {
        names
            .iter()
            .filter_map(|name| self.string(name))
            .find(|value| !value.trim().is_empty())
    }
}

/// Render an attribute value as text.
///
/// Arrays are joined with `,` so that callers looking at "the first entry" of
/// a multi-valued attribute can split on the comma.
pub fn tiny_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(tiny_string)
                .collect::<Vec<_>>()
                .join(","),
        ),
        Value::Object(_) => Some(value.to_string()),
    }
}

/// Keep only the part before the first comma.
pub fn first_segment(value: &str) -> &str {
    match value.split_once(',') {
        Some((first, _)) => first,
        None => value,
    }
}
