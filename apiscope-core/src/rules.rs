//! Pluggable rule evaluation.
//!
//! Rules let users override what the engine would infer on its own: a prefix
//! for every path of a class, the method used when a bound object forces one,
//! or extra conditions that make a parameter required. The engine asks one
//! question per decision and treats `None` as "no opinion", so [`NoRules`]
//! reproduces the plain inference exactly.

use crate::element::Element;
use crate::model::SourceModel;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Keys the engine evaluates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKey {
    /// Path prepended to the base path of a class.
    ClassPrefixPath,
    /// Method used when a bound object needs one and none is set.
    MethodDefaultHttpMethod,
    /// Whether a parameter is required.
    ParamRequired,
}

impl RuleKey {
    pub const ALL: [RuleKey; 3] = [
        RuleKey::ClassPrefixPath,
        RuleKey::MethodDefaultHttpMethod,
        RuleKey::ParamRequired,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKey::ClassPrefixPath => "class.prefix.path",
            RuleKey::MethodDefaultHttpMethod => "method.default.http.method",
            RuleKey::ParamRequired => "param.required",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == s.trim())
    }

    /// Boolean keys combine their expressions with OR.
    pub fn is_boolean(&self) -> bool {
        matches!(self, RuleKey::ParamRequired)
    }
}

impl std::fmt::Display for RuleKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value produced by a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleValue {
    Bool(bool),
    Text(String),
}

impl RuleValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            RuleValue::Bool(b) => Some(*b),
            RuleValue::Text(s) => parse_bool(s),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            RuleValue::Text(s) => Some(s),
            RuleValue::Bool(_) => None,
        }
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

/// Strategy evaluating a rule key against an element.
///
/// Implementations must be side-effect free; the engine may call them any
/// number of times.
pub trait RuleEvaluator {
    fn evaluate(&self, key: RuleKey, element: Element<'_>) -> Option<RuleValue>;

    /// Rule value as a boolean, if it has one.
    fn eval_bool(&self, key: RuleKey, element: Element<'_>) -> Option<bool> {
        self.evaluate(key, element).and_then(|v| v.as_bool())
    }

    /// Rule value as non-blank text, if it has one.
    fn eval_text(&self, key: RuleKey, element: Element<'_>) -> Option<String> {
        self.evaluate(key, element)
            .and_then(|v| v.as_text().map(str::to_string))
            .filter(|s| !s.trim().is_empty())
    }
}

impl<R: RuleEvaluator + ?Sized> RuleEvaluator for &R {
    fn evaluate(&self, key: RuleKey, element: Element<'_>) -> Option<RuleValue> {
        (**self).evaluate(key, element)
    }
}

impl<R: RuleEvaluator + ?Sized> RuleEvaluator for Box<R> {
    fn evaluate(&self, key: RuleKey, element: Element<'_>) -> Option<RuleValue> {
        (**self).evaluate(key, element)
    }
}

impl<R: RuleEvaluator + ?Sized> RuleEvaluator for Arc<R> {
    fn evaluate(&self, key: RuleKey, element: Element<'_>) -> Option<RuleValue> {
        (**self).evaluate(key, element)
    }
}

/// Evaluator without any rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRules;

impl RuleEvaluator for NoRules {
    fn evaluate(&self, _key: RuleKey, _element: Element<'_>) -> Option<RuleValue> {
        None
    }
}

/// Evaluator backed by a closure.
pub struct FnRules<F>(pub F);

impl<F> FnRules<F>
where
    F: Fn(RuleKey, Element<'_>) -> Option<RuleValue>,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> RuleEvaluator for FnRules<F>
where
    F: Fn(RuleKey, Element<'_>) -> Option<RuleValue>,
{
    fn evaluate(&self, key: RuleKey, element: Element<'_>) -> Option<RuleValue> {
        (self.0)(key, element)
    }
}

/// One rule expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleExpr {
    /// `@name`: the element carries the annotation.
    HasAnnotation(String),
    /// `!@name`: the element does not carry the annotation.
    LacksAnnotation(String),
    Bool(bool),
    Literal(String),
}

impl RuleExpr {
    /// Parse an expression. Blank input yields `None`.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }
        if let Some(name) = s.strip_prefix("!@") {
            return Some(RuleExpr::LacksAnnotation(name.trim().to_string()));
        }
        if let Some(name) = s.strip_prefix('@') {
            return Some(RuleExpr::HasAnnotation(name.trim().to_string()));
        }
        match s {
            "true" => Some(RuleExpr::Bool(true)),
            "false" => Some(RuleExpr::Bool(false)),
            _ => Some(RuleExpr::Literal(s.to_string())),
        }
    }
}

/// Rules declared in configuration and evaluated against a source model.
///
/// ```
/// use apiscope_core::memory::InMemoryModel;
/// use apiscope_core::rules::{ConfigRules, RuleKey};
///
/// let rules = ConfigRules::new(InMemoryModel::new())
///     .rule(RuleKey::ClassPrefixPath, "/api")
///     .rule(RuleKey::ParamRequired, "@javax.validation.constraints.NotNull");
///
/// assert_eq!(rules.expressions(RuleKey::ParamRequired).len(), 1);
/// ```
pub struct ConfigRules<M> {
    model: M,
    rules: HashMap<RuleKey, Vec<RuleExpr>>,
}

impl<M: SourceModel> ConfigRules<M> {
    pub fn new(model: M) -> Self {
        Self {
            model,
            rules: HashMap::new(),
        }
    }

    /// Append an expression for a key.
    pub fn rule(mut self, key: RuleKey, expr: &str) -> Self {
        self.add(key, expr);
        self
    }

    pub fn add(&mut self, key: RuleKey, expr: &str) {
        if let Some(expr) = RuleExpr::parse(expr) {
            self.rules.entry(key).or_default().push(expr);
        }
    }

    /// Build from a JSON table mapping rule keys to an expression or a list
    /// of expressions. Unknown keys and non-text entries are skipped.
    pub fn from_value(model: M, table: &Value) -> Self {
        let mut rules = Self::new(model);
        rules.extend_from_value(table);
        rules
    }

    pub fn extend_from_value(&mut self, table: &Value) {
        let Value::Object(map) = table else {
            if !table.is_null() {
                warn!("Rule table is not an object, ignoring it");
            }
            return;
        };

        for (name, value) in map {
            let Some(key) = RuleKey::from_str(name) else {
                warn!(rule = %name, "Unknown rule key, ignoring it");
                continue;
            };
            match value {
                Value::String(expr) => self.add(key, expr),
                Value::Bool(b) => self.add(key, &b.to_string()),
                Value::Array(items) => {
                    for item in items {
                        match item {
                            Value::String(expr) => self.add(key, expr),
                            Value::Bool(b) => self.add(key, &b.to_string()),
                            other => {
                                debug!(rule = %key, value = %other, "Skipping non-text rule entry")
                            }
                        }
                    }
                }
                other => debug!(rule = %key, value = %other, "Skipping non-text rule entry"),
            }
        }
    }

    pub fn expressions(&self, key: RuleKey) -> &[RuleExpr] {
        self.rules.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.rules.values().all(Vec::is_empty)
    }

    fn test(&self, expr: &RuleExpr, element: Element<'_>) -> Option<bool> {
        match expr {
            RuleExpr::HasAnnotation(name) => Some(self.model.has_annotation(element, name)),
            RuleExpr::LacksAnnotation(name) => Some(!self.model.has_annotation(element, name)),
            RuleExpr::Bool(b) => Some(*b),
            RuleExpr::Literal(s) => parse_bool(s),
        }
    }
}

impl<M: SourceModel> RuleEvaluator for ConfigRules<M> {
    fn evaluate(&self, key: RuleKey, element: Element<'_>) -> Option<RuleValue> {
        let exprs = self.expressions(key);
        if exprs.is_empty() {
            return None;
        }

        if key.is_boolean() {
            let mut applied = false;
            for expr in exprs {
                match self.test(expr, element) {
                    Some(true) => return Some(RuleValue::Bool(true)),
                    Some(false) => applied = true,
                    None => {}
                }
            }
            return applied.then_some(RuleValue::Bool(false));
        }

        exprs.iter().find_map(|expr| match expr {
            RuleExpr::Literal(s) => Some(RuleValue::Text(s.clone())),
            _ => None,
        })
    }
}
