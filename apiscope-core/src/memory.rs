//! A source model held in memory.
//!
//! Models are usually loaded from a JSON document produced by a source
//! indexer, but can also be assembled with the builder methods.
//!
//! ```
//! use apiscope_core::memory::{ClassDecl, InMemoryModel, MethodDecl, ParamDecl};
//! use serde_json::json;
//!
//! let model = InMemoryModel::new().with_class(
//!     ClassDecl::new("com.example.UserController")
//!         .annotate("RestController", json!({}))
//!         .annotate("RequestMapping", json!({"value": "/users"}))
//!         .method(
//!             MethodDecl::new("get")
//!                 .annotate("GetMapping", json!({"value": "/{id}"}))
//!                 .param(ParamDecl::new("id", "long").annotate("PathVariable", json!({}))),
//!         ),
//! );
//!
//! assert_eq!(model.classes.len(), 1);
//! ```

use crate::annotation::{AttributeMap, simple_name};
use crate::element::{ClassRef, Element, MethodRef, ParamRef};
use crate::error::{Error, Result};
use crate::model::SourceModel;
use crate::types::ResolvedType;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

/// In-memory source model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryModel {
    #[serde(default)]
    pub classes: Vec<ClassDecl>,
    /// Comments attached to types, keyed by type name.
    #[serde(default)]
    pub type_comments: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnnotationDecl {
    /// Qualified or simple annotation name.
    pub name: String,
    #[serde(default)]
    pub attributes: AttributeMap,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassDecl {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superclass: Option<String>,
    #[serde(default)]
    pub annotations: Vec<AnnotationDecl>,
    #[serde(default)]
    pub methods: Vec<MethodDecl>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MethodDecl {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    #[serde(default)]
    pub annotations: Vec<AnnotationDecl>,
    #[serde(default)]
    pub params: Vec<ParamDecl>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParamDecl {
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    #[serde(default)]
    pub annotations: Vec<AnnotationDecl>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    /// Resolved type; defaults to a scalar named after the declared type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved: Option<ResolvedType>,
}

fn matches_annotation(decl: &AnnotationDecl, qualified_name: &str) -> bool {
    decl.name == qualified_name || decl.name == simple_name(qualified_name)
}

fn find_in(annotations: &[AnnotationDecl], qualified_name: &str) -> Option<AttributeMap> {
    annotations
        .iter()
        .find(|decl| matches_annotation(decl, qualified_name))
        .map(|decl| decl.attributes.clone())
}

fn into_attributes(attributes: Value) -> AttributeMap {
    match attributes {
        Value::Object(map) => map,
        Value::Null => AttributeMap::new(),
        // A bare value is the annotation's `value` attribute.
        other => {
            let mut map = AttributeMap::new();
            map.insert("value".to_string(), other);
            map
        }
    }
}

impl AnnotationDecl {
    pub fn new(name: impl Into<String>, attributes: Value) -> Self {
        Self {
            name: name.into(),
            attributes: into_attributes(attributes),
        }
    }
}

impl InMemoryModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a model from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Model(format!("Invalid model JSON: {}", e)))
    }

    /// Load a model from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn with_class(mut self, class: ClassDecl) -> Self {
        self.classes.push(class);
        self
    }

    pub fn with_type_comment(
        mut self,
        type_name: impl Into<String>,
        comment: impl Into<String>,
    ) -> Self {
        self.type_comments.insert(type_name.into(), comment.into());
        self
    }

    pub fn class(&self, class: &ClassRef) -> Option<&ClassDecl> {
        self.classes.iter().find(|c| c.name == class.0)
    }

    fn method(&self, method: &MethodRef) -> Option<&MethodDecl> {
        self.class(&method.class)
            .and_then(|c| c.methods.get(method.ordinal))
            .filter(|m| m.name == method.name)
    }

    fn param(&self, param: &ParamRef) -> Option<&ParamDecl> {
        self.method(&param.method).and_then(|m| m.params.get(param.index))
    }
}

impl ClassDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn extends(mut self, superclass: impl Into<String>) -> Self {
        self.superclass = Some(superclass.into());
        self
    }

    pub fn annotate(mut self, name: impl Into<String>, attributes: Value) -> Self {
        self.annotations.push(AnnotationDecl::new(name, attributes));
        self
    }

    pub fn method(mut self, method: MethodDecl) -> Self {
        self.methods.push(method);
        self
    }
}

impl MethodDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn annotate(mut self, name: impl Into<String>, attributes: Value) -> Self {
        self.annotations.push(AnnotationDecl::new(name, attributes));
        self
    }

    pub fn param(mut self, param: ParamDecl) -> Self {
        self.params.push(param);
        self
    }
}

impl ParamDecl {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: Some(type_name.into()),
            ..Self::default()
        }
    }

    pub fn annotate(mut self, name: impl Into<String>, attributes: Value) -> Self {
        self.annotations.push(AnnotationDecl::new(name, attributes));
        self
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn resolved(mut self, ty: ResolvedType) -> Self {
        self.resolved = Some(ty);
        self
    }
}

impl SourceModel for InMemoryModel {
    fn annotation_attributes(
        &self,
        element: Element<'_>,
        qualified_name: &str,
    ) -> Option<AttributeMap> {
        match element {
            Element::Class(class) => self
                .class(class)
                .and_then(|c| find_in(&c.annotations, qualified_name)),
            Element::Method(method) => self
                .method(method)
                .and_then(|m| find_in(&m.annotations, qualified_name)),
            Element::Param(param) => self
                .param(param)
                .and_then(|p| find_in(&p.annotations, qualified_name)),
        }
    }

    fn superclass_of(&self, class: &ClassRef) -> Option<ClassRef> {
        self.class(class)
            .and_then(|c| c.superclass.as_ref())
            .map(ClassRef::new)
    }

    fn declared_default_value(&self, param: &ParamRef) -> Option<String> {
        self.param(param).and_then(|p| p.default_value.clone())
    }

    fn type_level_comment(&self, type_name: &str, _context: &ParamRef) -> Option<String> {
        self.type_comments
            .get(type_name)
            .or_else(|| self.type_comments.get(simple_name(type_name)))
            .cloned()
    }

    fn classes(&self) -> Vec<ClassRef> {
        self.classes.iter().map(|c| ClassRef::new(&c.name)).collect()
    }

    fn methods_of(&self, class: &ClassRef) -> Vec<MethodRef> {
        self.class(class)
            .map(|c| {
                c.methods
                    .iter()
                    .enumerate()
                    .map(|(ordinal, m)| MethodRef::new(class.clone(), &m.name, ordinal))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn parameters_of(&self, method: &MethodRef) -> Vec<ParamRef> {
        self.method(method)
            .map(|m| {
                (0..m.params.len())
                    .map(|index| ParamRef::new(method.clone(), index))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn parameter_name(&self, param: &ParamRef) -> String {
        self.param(param).map(|p| p.name.clone()).unwrap_or_default()
    }

    fn parameter_type(&self, param: &ParamRef) -> Option<String> {
        self.param(param).and_then(|p| p.type_name.clone())
    }

    fn method_doc(&self, method: &MethodRef) -> Option<String> {
        self.method(method).and_then(|m| m.doc.clone())
    }

    fn resolved_type(&self, param: &ParamRef) -> ResolvedType {
        match self.param(param) {
            Some(ParamDecl {
                resolved: Some(ty), ..
            }) => ty.clone(),
            Some(p) => ResolvedType::scalar(
                p.type_name
                    .as_deref()
                    .map(simple_name)
                    .unwrap_or("string"),
            ),
            None => ResolvedType::scalar("string"),
        }
    }

    fn parameter_doc(&self, param: &ParamRef) -> Option<String> {
        self.param(param).and_then(|p| p.doc.clone())
    }
}
