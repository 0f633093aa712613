//! Export driver: walks controllers and produces one request per handler
//! method.

use crate::annotation::AnnotationKind;
use crate::classifier::{Binding, ParameterClassifier};
use crate::element::{ClassRef, Element, MethodRef, ParamRef};
use crate::error::Result;
use crate::mapping::{find_class_mapping, find_mapping, resolve_http_method};
use crate::model::{SourceModel, has_annotation};
use crate::path::{resolve_class_path, resolve_method_path};
use crate::request::{HttpMethod, Request};
use crate::rules::{NoRules, RuleEvaluator};
use crate::types::ResolvedType;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Values computed once per controller class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassContext {
    pub base_path: String,
    /// Method of the class-level mapping, used by handlers without one.
    pub default_method: Option<HttpMethod>,
}

/// Exports requests for Spring controllers found in a source model.
///
/// ```
/// use apiscope_core::exporter::SpringRequestExporter;
/// use apiscope_core::memory::{ClassDecl, InMemoryModel, MethodDecl};
/// use apiscope_core::request::HttpMethod;
/// use serde_json::json;
///
/// let model = InMemoryModel::new().with_class(
///     ClassDecl::new("HealthController")
///         .annotate("RestController", json!({}))
///         .method(MethodDecl::new("ping").annotate("GetMapping", json!("/ping"))),
/// );
///
/// let requests = SpringRequestExporter::new(model).export_all();
/// assert_eq!(requests[0].path, "/ping");
/// assert_eq!(requests[0].method, Some(HttpMethod::GET));
/// ```
pub struct SpringRequestExporter<M, R = NoRules> {
    model: M,
    rules: R,
    contexts: RwLock<HashMap<ClassRef, ClassContext>>,
}

impl<M: SourceModel> SpringRequestExporter<M> {
    pub fn new(model: M) -> Self {
        Self::with_rules(model, NoRules)
    }
}

impl<M: SourceModel, R: RuleEvaluator> SpringRequestExporter<M, R> {
    pub fn with_rules(model: M, rules: R) -> Self {
        Self {
            model,
            rules,
            contexts: RwLock::new(HashMap::new()),
        }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn rules(&self) -> &R {
        &self.rules
    }

    pub fn is_controller(&self, class: &ClassRef) -> bool {
        AnnotationKind::CONTROLLERS
            .into_iter()
            .any(|kind| has_annotation(&self.model, Element::Class(class), kind))
    }

    pub fn is_handler_method(&self, method: &MethodRef) -> bool {
        AnnotationKind::MAPPINGS
            .into_iter()
            .any(|kind| has_annotation(&self.model, Element::Method(method), kind))
    }

    /// Base path and default method of a class, computed on first use.
    pub fn populate_class_context(&self, class: &ClassRef) -> ClassContext {
        if let Some(context) = self.contexts.read().get(class) {
            return context.clone();
        }

        let context = ClassContext {
            base_path: resolve_class_path(&self.model, &self.rules, class),
            default_method: resolve_http_method(find_class_mapping(&self.model, class).as_ref()),
        };
        debug!(
            class = %class,
            base_path = %context.base_path,
            default_method = ?context.default_method,
            "Resolved class context"
        );

        self.contexts
            .write()
            .entry(class.clone())
            .or_insert(context)
            .clone()
    }

    /// Set method and path of a handler's request.
    pub fn populate_request(
        &self,
        method: &MethodRef,
        context: &ClassContext,
        request: &mut Request,
    ) -> Result<()> {
        let mapping = find_mapping(&self.model, Element::Method(method));
        let http_method = resolve_http_method(mapping.as_ref()).or(context.default_method);
        request.set_method(http_method);

        let path = resolve_method_path(&self.model, &context.base_path, method)?;
        request.set_path(path);
        Ok(())
    }

    pub fn classify_parameter(
        &self,
        param: &ParamRef,
        request: &mut Request,
        ty: &ResolvedType,
        description: Option<&str>,
    ) -> Binding {
        ParameterClassifier::new(&self.model, &self.rules).classify(param, request, ty, description)
    }

    /// Requests for every handler method of a controller. Other classes yield
    /// nothing.
    pub fn export_class(&self, class: &ClassRef) -> Vec<Request> {
        if !self.is_controller(class) {
            debug!(class = %class, "Not a controller, skipping");
            return Vec::new();
        }

        let context = self.populate_class_context(class);
        let mut requests = Vec::new();

        for method in self.model.methods_of(class) {
            if !self.is_handler_method(&method) {
                continue;
            }

            let mut request = Request::new(&method.name);
            request.description = self.model.method_doc(&method);

            if let Err(e) = self.populate_request(&method, &context, &mut request) {
                warn!(method = %method, error = %e, "Skipping handler method");
                continue;
            }

            for param in self.model.parameters_of(&method) {
                let ty = self.model.resolved_type(&param);
                let description = self.model.parameter_doc(&param);
                self.classify_parameter(&param, &mut request, &ty, description.as_deref());
            }

            requests.push(request);
        }

        debug!(class = %class, requests = requests.len(), "Exported controller");
        requests
    }

    /// Requests for every controller in the model.
    pub fn export_all(&self) -> Vec<Request> {
        let requests: Vec<Request> = self
            .model
            .classes()
            .iter()
            .flat_map(|class| self.export_class(class))
            .collect();
        info!(requests = requests.len(), "Export finished");
        requests
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{ClassDecl, InMemoryModel, MethodDecl, ParamDecl};
    use serde_json::json;

    fn controller() -> ClassDecl {
        ClassDecl::new("com.example.UserController")
            .annotate("RestController", json!({}))
            .annotate("RequestMapping", json!({"value": "/users", "method": "RequestMethod.POST"}))
    }

    #[test]
    fn test_non_controller_yields_nothing() {
        let model = InMemoryModel::new().with_class(
            ClassDecl::new("Service")
                .method(MethodDecl::new("m").annotate("GetMapping", json!("/x"))),
        );
        let exporter = SpringRequestExporter::new(model);
        assert!(exporter.export_class(&ClassRef::new("Service")).is_empty());
    }

    #[test]
    fn test_non_handler_methods_skipped() {
        let model = InMemoryModel::new().with_class(
            controller()
                .method(MethodDecl::new("helper"))
                .method(MethodDecl::new("list").annotate("GetMapping", json!({}))),
        );
        let requests = SpringRequestExporter::new(model).export_all();

        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].name, "list");
        assert_eq!(requests[0].path, "/users");
    }

    #[test]
    fn test_class_default_method_used_when_method_has_none() {
        let model = InMemoryModel::new().with_class(
            controller()
                .method(MethodDecl::new("create").annotate("RequestMapping", json!("/new")))
                .method(MethodDecl::new("remove").annotate("DeleteMapping", json!("/{id}"))),
        );
        let requests = SpringRequestExporter::new(model).export_all();

        assert_eq!(requests[0].method, Some(HttpMethod::POST));
        assert_eq!(requests[0].path, "/users/new");
        assert_eq!(requests[1].method, Some(HttpMethod::DELETE));
    }

    #[test]
    fn test_class_context_is_cached() {
        let model = InMemoryModel::new().with_class(controller());
        let exporter = SpringRequestExporter::new(model);
        let class = ClassRef::new("com.example.UserController");

        let first = exporter.populate_class_context(&class);
        let second = exporter.populate_class_context(&class);

        assert_eq!(first, second);
        assert_eq!(exporter.contexts.read().len(), 1);
        assert_eq!(first.default_method, Some(HttpMethod::POST));
    }

    #[test]
    fn test_parameters_classified_in_order() {
        let model = InMemoryModel::new().with_class(
            controller().method(
                MethodDecl::new("update")
                    .doc("Update a user")
                    .annotate("PutMapping", json!("/{id}"))
                    .param(
                        ParamDecl::new("id", "long")
                            .annotate("PathVariable", json!({}))
                            .doc("user id"),
                    )
                    .param(ParamDecl::new("user", "User").annotate("RequestBody", json!({}))),
            ),
        );
        let requests = SpringRequestExporter::new(model).export_all();
        let request = &requests[0];

        assert_eq!(request.description.as_deref(), Some("Update a user"));
        assert_eq!(request.method, Some(HttpMethod::PUT));
        assert_eq!(request.path_params[0].description, "user id");
        assert!(request.body.is_some());
    }

    #[test]
    fn test_exporter_is_sync() {
        fn assert_sync<T: Sync>() {}
        assert_sync::<SpringRequestExporter<InMemoryModel>>();
    }
}
