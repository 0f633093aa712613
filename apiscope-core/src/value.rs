//! Default values and requiredness of bound parameters.

use crate::annotation::AnnotationFact;
use crate::element::{Element, ParamRef};
use crate::rules::{RuleEvaluator, RuleKey};

/// Spring's `ValueConstants.DEFAULT_NONE`.
pub const DEFAULT_NONE: &str = "\n\t\t\n\t\t\n\u{E000}\u{E001}\u{E002}\n\t\t\t\t\n";

/// `DEFAULT_NONE` as it appears when the attribute is read as source text.
pub const ESCAPED_DEFAULT_NONE: &str = "\\n\\t\\t\\n\\t\\t\\n\\ue000\\ue001\\ue002\\n\\t\\t\\t\\t\\n";

/// `DEFAULT_NONE` referenced by constant name.
pub const DEFAULT_NONE_REFERENCE: &str = "ValueConstants.DEFAULT_NONE";

/// Framework markers meaning "no default value".
pub const DEFAULT_NONE_SENTINELS: [&str; 3] =
    [DEFAULT_NONE, ESCAPED_DEFAULT_NONE, DEFAULT_NONE_REFERENCE];

pub fn is_default_none(value: &str) -> bool {
    DEFAULT_NONE_SENTINELS.contains(&value)
}

/// Default value declared by a binding annotation.
///
/// Absent values and sentinels both become `""`, which callers must treat as
/// a resolved default.
pub fn annotation_default(annotation: &AnnotationFact) -> String {
    match annotation.string("defaultValue") {
        Some(value) if !is_default_none(&value) => value,
        _ => String::new(),
    }
}

/// Requiredness declared by a binding annotation: true unless the `required`
/// attribute says `false`.
pub fn annotation_required(annotation: &AnnotationFact) -> bool {
    !annotation
        .string("required")
        .is_some_and(|required| required.contains("false"))
}

/// OR the declared requiredness with the `param.required` rule. The rule can
/// upgrade a parameter to required, never downgrade it.
pub fn resolve_required<R: RuleEvaluator + ?Sized>(
    rules: &R,
    param: &ParamRef,
    declared: bool,
) -> bool {
    declared
        || rules
            .eval_bool(RuleKey::ParamRequired, Element::Param(param))
            .unwrap_or(false)
}
