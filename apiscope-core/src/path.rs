//! Path resolution for controllers and handler methods.

use crate::annotation::{AnnotationFact, first_segment};
use crate::element::{ClassRef, Element, MethodRef};
use crate::error::{Error, Result};
use crate::mapping::{find_class_mapping, find_mapping};
use crate::model::SourceModel;
use crate::rules::{RuleEvaluator, RuleKey};
use tracing::debug;

/// Path declared by a mapping annotation, alias `path`/`value`. Only the
/// first entry of a multi-path mapping is kept.
pub fn mapping_path(mapping: &AnnotationFact) -> Option<String> {
    mapping
        .any(&["path", "value"])
        .map(|path| first_segment(&path).trim().to_string())
}

/// Join two path fragments with exactly one separating slash.
///
/// A blank side yields the other side unchanged. Runs of slashes are collapsed
/// so the result never contains `//`.
pub fn join_path(prefix: Option<&str>, suffix: Option<&str>) -> Option<String> {
    let joined = match (prefix, suffix) {
        (p, s) if p.is_none_or(|p| p.trim().is_empty()) => s?.to_string(),
        (Some(p), s) if s.is_none_or(|s| s.trim().is_empty()) => p.to_string(),
        (Some(p), Some(s)) => format!("{}/{}", p.trim_end_matches('/'), s.trim_start_matches('/')),
        _ => return None,
    };
    Some(collapse_slashes(&joined))
}

fn collapse_slashes(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut previous_slash = false;
    for c in path.chars() {
        if c == '/' {
            if previous_slash {
                continue;
            }
            previous_slash = true;
        } else {
            previous_slash = false;
        }
        out.push(c);
    }
    out
}

/// Base path of a controller class.
///
/// The mapping annotation is searched on the class first, then on each
/// superclass, nearest first. A non-blank `class.prefix.path` rule value is
/// joined in front.
pub fn resolve_class_path<M, R>(model: &M, rules: &R, class: &ClassRef) -> String
where
    M: SourceModel + ?Sized,
    R: RuleEvaluator + ?Sized,
{
    let base_path = find_class_mapping(model, class)
        .and_then(|mapping| mapping_path(&mapping))
        .unwrap_or_default();

    match rules.eval_text(RuleKey::ClassPrefixPath, Element::Class(class)) {
        Some(prefix) => {
            debug!(class = %class, prefix = %prefix, "Applying class prefix path");
            join_path(Some(&prefix), Some(&base_path)).unwrap_or_default()
        }
        None => base_path,
    }
}

/// Full path of a handler method under the resolved class path.
pub fn resolve_method_path<M>(model: &M, class_path: &str, method: &MethodRef) -> Result<String>
where
    M: SourceModel + ?Sized,
{
    let method_path = find_mapping(model, Element::Method(method))
        .and_then(|mapping| mapping_path(&mapping))
        .unwrap_or_default();

    join_path(Some(class_path), Some(&method_path)).ok_or_else(|| Error::MissingPath {
        method: method.to_string(),
    })
}
