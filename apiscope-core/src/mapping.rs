//! Mapping annotation lookup and HTTP method resolution.

use crate::annotation::{AnnotationFact, AnnotationKind, first_segment};
use crate::element::{ClassRef, Element};
use crate::model::{SourceModel, find_annotation};
use crate::request::HttpMethod;
use std::collections::HashSet;
use tracing::{debug, warn};

const REQUEST_METHOD_QUALIFIER: &str = "RequestMethod.";

/// What a mapping annotation says about the HTTP method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mapping {
    /// Verb shorthand such as `@GetMapping`.
    Verb(HttpMethod),
    /// `@RequestMapping`, with its raw `method` attribute.
    Generic { method_attr: Option<String> },
    /// No mapping annotation.
    None,
}

impl Mapping {
    pub fn classify(mapping: Option<&AnnotationFact>) -> Self {
        let Some(mapping) = mapping else {
            return Mapping::None;
        };
        match mapping.kind {
            AnnotationKind::GetMapping => Mapping::Verb(HttpMethod::GET),
            AnnotationKind::PostMapping => Mapping::Verb(HttpMethod::POST),
            AnnotationKind::PutMapping => Mapping::Verb(HttpMethod::PUT),
            AnnotationKind::DeleteMapping => Mapping::Verb(HttpMethod::DELETE),
            AnnotationKind::PatchMapping => Mapping::Verb(HttpMethod::PATCH),
            AnnotationKind::RequestMapping => Mapping::Generic {
                method_attr: mapping.string("method"),
            },
            AnnotationKind::Controller
            | AnnotationKind::RestController
            | AnnotationKind::RequestBody
            | AnnotationKind::ModelAttribute
            | AnnotationKind::RequestHeader
            | AnnotationKind::PathVariable
            | AnnotationKind::RequestParam => Mapping::None,
        }
    }

    pub fn http_method(&self) -> Option<HttpMethod> {
        match self {
            Mapping::Verb(method) => Some(*method),
            Mapping::Generic { method_attr } => method_attr.as_deref().and_then(parse_method_attr),
            Mapping::None => None,
        }
    }
}

/// First mapping annotation on the element, in [`AnnotationKind::MAPPINGS`]
/// order.
pub fn find_mapping<M>(model: &M, element: Element<'_>) -> Option<AnnotationFact>
where
    M: SourceModel + ?Sized,
{
    AnnotationKind::MAPPINGS
        .into_iter()
        .find_map(|kind| find_annotation(model, element, kind))
}

/// Mapping annotation of a class, inherited from the nearest superclass
/// that declares one.
pub fn find_class_mapping<M>(model: &M, class: &ClassRef) -> Option<AnnotationFact>
where
    M: SourceModel + ?Sized,
{
    let mut visited = HashSet::new();
    let mut current = Some(class.clone());

    while let Some(cls) = current {
        if let Some(mapping) = find_mapping(model, Element::Class(&cls)) {
            if &cls != class {
                debug!(class = %class, declared_on = %cls, "Using inherited class mapping");
            }
            return Some(mapping);
        }
        if !visited.insert(cls.clone()) {
            warn!(class = %class, cycle_at = %cls, "Superclass cycle while resolving mapping");
            return None;
        }
        current = model.superclass_of(&cls);
    }

    None
}

/// HTTP method declared by a mapping annotation.
pub fn resolve_http_method(mapping: Option<&AnnotationFact>) -> Option<HttpMethod> {
    Mapping::classify(mapping).http_method()
}

fn parse_method_attr(raw: &str) -> Option<HttpMethod> {
    let first = first_segment(raw).trim();
    let verb = match first.rfind(REQUEST_METHOD_QUALIFIER) {
        Some(idx) => &first[idx + REQUEST_METHOD_QUALIFIER.len()..],
        None => first,
    }
    .trim();

    if verb.is_empty() {
        return None;
    }

    let method = HttpMethod::from_str(verb);
    if method.is_none() {
        warn!(method = %verb, "Unknown HTTP method in mapping");
    }
    method
}
