//! Parameter classification.
//!
//! Every handler parameter lands in exactly one binding role. The branches
//! are tried in a fixed order and the first match wins:
//!
//! 1. `@RequestBody` becomes a JSON body.
//! 2. `@ModelAttribute` expands the bound object into query or form fields.
//! 3. `@RequestHeader` becomes a header.
//! 4. `@PathVariable` becomes a path parameter.
//! 5. Anything else is a request parameter: a query parameter when a default
//!    value is known, otherwise expanded by the shape of its type.

use crate::annotation::AnnotationKind;
use crate::element::{Element, ParamRef};
use crate::model::{SourceModel, find_annotation, has_annotation};
use crate::request::{
    APPLICATION_JSON, CONTENT_TYPE, FORM_URLENCODED, FormKind, FormParam, Header, HttpMethod,
    MULTIPART_FORM_DATA, Param, Request,
};
use crate::rules::{RuleEvaluator, RuleKey};
use crate::types::{Field, ResolvedType};
use crate::value::{annotation_default, annotation_required, resolve_required};
use serde::Serialize;
use tracing::{debug, warn};

/// Role a parameter was bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Binding {
    Body,
    Header,
    PathVariable,
    Query,
    Form,
}

/// Name, requiredness and description carried into an expansion.
struct Target {
    name: String,
    required: bool,
    description: String,
}

/// Classifies handler parameters into request entries.
pub struct ParameterClassifier<'a, M: ?Sized, R: ?Sized> {
    model: &'a M,
    rules: &'a R,
}

impl<'a, M, R> ParameterClassifier<'a, M, R>
where
    M: SourceModel + ?Sized,
    R: RuleEvaluator + ?Sized,
{
    pub fn new(model: &'a M, rules: &'a R) -> Self {
        Self { model, rules }
    }

    /// Classify one parameter and write it into `request`.
    ///
    /// `ty` is the resolved type of the parameter and `description` the
    /// description the pipeline found for it, if any.
    pub fn classify(
        &self,
        param: &ParamRef,
        request: &mut Request,
        ty: &ResolvedType,
        description: Option<&str>,
    ) -> Binding {
        let element = Element::Param(param);

        if has_annotation(self.model, element, AnnotationKind::RequestBody) {
            request.set_method_if_missed(HttpMethod::POST);
            request.add_header(Header::new(CONTENT_TYPE, APPLICATION_JSON));
            request.set_json_body(ty.clone(), description.map(str::to_string));
            debug!(param = %param, "Bound request body");
            return Binding::Body;
        }

        if has_annotation(self.model, element, AnnotationKind::ModelAttribute) {
            return self.bind_model_attribute(param, request, ty, description);
        }

        let description = self.merged_description(param, description);

        if let Some(header) = find_annotation(self.model, element, AnnotationKind::RequestHeader) {
            let name = header
                .any(&["value", "name"])
                .unwrap_or_else(|| self.model.parameter_name(param));
            let required = resolve_required(self.rules, param, annotation_required(&header));
            let default = annotation_default(&header);

            debug!(param = %param, header = %name, required, "Bound request header");
            request.add_header(Header {
                name,
                example: default.clone(),
                value: default,
                description,
                required,
            });
            return Binding::Header;
        }

        if let Some(path_variable) =
            find_annotation(self.model, element, AnnotationKind::PathVariable)
        {
            let name = path_variable
                .any(&["value", "name"])
                .unwrap_or_else(|| self.model.parameter_name(param));
            debug!(param = %param, path_variable = %name, "Bound path variable");
            request.add_path_param(name, description);
            return Binding::PathVariable;
        }

        self.bind_request_param(param, request, ty, description)
    }

    fn bind_model_attribute(
        &self,
        param: &ParamRef,
        request: &mut Request,
        ty: &ResolvedType,
        description: Option<&str>,
    ) -> Binding {
        let mut target = Target {
            name: self.model.parameter_name(param),
            required: false,
            description: String::new(),
        };

        if request.method == Some(HttpMethod::GET) {
            self.expand_query(request, ty, &target);
            return Binding::Query;
        }

        if request.method.is_none() {
            let method = self.default_method(param);
            debug!(param = %param, method = %method, "Model attribute sets default method");
            request.set_method(Some(method));
        }

        target.description = description.unwrap_or_default().to_string();
        self.expand_form(request, ty, &target);
        Binding::Form
    }

    fn bind_request_param(
        &self,
        param: &ParamRef,
        request: &mut Request,
        ty: &ResolvedType,
        description: String,
    ) -> Binding {
        let mut name = None;
        let mut required = false;
        let mut default = None;

        if let Some(request_param) =
            find_annotation(self.model, Element::Param(param), AnnotationKind::RequestParam)
        {
            name = request_param.any(&["name", "value"]);
            required = annotation_required(&request_param);
            default = Some(annotation_default(&request_param));
        }

        if let Some(declared) = self
            .model
            .declared_default_value(param)
            .filter(|value| !value.trim().is_empty())
        {
            default = Some(declared);
        }

        let required = resolve_required(self.rules, param, required);
        let name = name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| self.model.parameter_name(param));

        if let Some(value) = default {
            debug!(
                param = %param,
                name = %name,
                value = %value,
                "Bound query parameter with default"
            );
            request.add_query_param(Param {
                name,
                value,
                required,
                description,
            });
            return Binding::Query;
        }

        let target = Target {
            name,
            required,
            description,
        };
        if request.method != Some(HttpMethod::GET) && self.model.contains_uploadable_file(ty) {
            self.expand_form(request, ty, &target);
            return Binding::Form;
        }

        self.expand_query(request, ty, &target);
        Binding::Query
    }

    /// External description and the type-level comment of the declared
    /// type, space-joined.
    fn merged_description(&self, param: &ParamRef, description: Option<&str>) -> String {
        let type_comment = self
            .model
            .parameter_type(param)
            .and_then(|type_name| self.model.type_level_comment(&type_name, param));

        [description, type_comment.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn default_method(&self, param: &ParamRef) -> HttpMethod {
        let Some(text) = self
            .rules
            .eval_text(RuleKey::MethodDefaultHttpMethod, Element::Method(&param.method))
        else {
            return HttpMethod::POST;
        };
        HttpMethod::from_str(&text).unwrap_or_else(|| {
            warn!(
                method = %text,
                rule = %RuleKey::MethodDefaultHttpMethod,
                "Unknown HTTP method from rule, using POST"
            );
            HttpMethod::POST
        })
    }

    /// Object fields become one query parameter each; anything else,
    /// files included, is a single query parameter.
    fn expand_query(&self, request: &mut Request, ty: &ResolvedType, target: &Target) {
        match ty {
            ResolvedType::Object { fields, .. } => {
                for field in fields {
                    request.add_query_param(Param {
                        name: field.name.clone(),
                        value: field.ty.example(),
                        required: field.required,
                        description: field.description.clone().unwrap_or_default(),
                    });
                }
            }
            _ => request.add_query_param(Param {
                name: target.name.clone(),
                value: ty.example(),
                required: target.required,
                description: target.description.clone(),
            }),
        }
    }

    fn expand_form(&self, request: &mut Request, ty: &ResolvedType, target: &Target) {
        let content_type = if self.model.contains_uploadable_file(ty) {
            MULTIPART_FORM_DATA
        } else {
            FORM_URLENCODED
        };
        request.add_header_if_missed(CONTENT_TYPE, content_type);

        match ty {
            ResolvedType::Object { fields, .. } => self.push_form_fields(request, "", fields),
            _ => request.add_form_param(self.form_param(
                target.name.clone(),
                ty,
                target.required,
                target.description.clone(),
            )),
        }
    }

    /// Nested objects are flattened with dotted names.
    fn push_form_fields(&self, request: &mut Request, prefix: &str, fields: &[Field]) {
        for field in fields {
            let name = if prefix.is_empty() {
                field.name.clone()
            } else {
                format!("{}.{}", prefix, field.name)
            };
            match &field.ty {
                ResolvedType::Object { fields: nested, .. } => {
                    self.push_form_fields(request, &name, nested)
                }
                ty => request.add_form_param(self.form_param(
                    name,
                    ty,
                    field.required,
                    field.description.clone().unwrap_or_default(),
                )),
            }
        }
    }

    fn form_param(
        &self,
        name: String,
        ty: &ResolvedType,
        required: bool,
        description: String,
    ) -> FormParam {
        let file = self.model.contains_uploadable_file(ty);
        FormParam {
            name,
            value: if file { String::new() } else { ty.example() },
            kind: if file { FormKind::File } else { FormKind::Text },
            required,
            description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ClassRef, MethodRef};
    use crate::memory::{ClassDecl, InMemoryModel, MethodDecl, ParamDecl};
    use crate::rules::{ConfigRules, NoRules};
    use crate::value::DEFAULT_NONE;
    use serde_json::json;

    fn model_with(param: ParamDecl) -> InMemoryModel {
        InMemoryModel::new()
            .with_class(ClassDecl::new("C").method(MethodDecl::new("m").param(param)))
    }

    fn param_ref() -> ParamRef {
        ParamRef::new(MethodRef::new(ClassRef::new("C"), "m", 0), 0)
    }

    fn classify(
        model: &InMemoryModel,
        request: &mut Request,
        ty: &ResolvedType,
        description: Option<&str>,
    ) -> Binding {
        ParameterClassifier::new(model, &NoRules).classify(&param_ref(), request, ty, description)
    }

    fn user_type() -> ResolvedType {
        ResolvedType::object(
            "User",
            vec![
                Field::new("name", ResolvedType::scalar("string")).required(true),
                Field::new(
                    "address",
                    ResolvedType::object(
                        "Address",
                        vec![Field::new("city", ResolvedType::scalar("string"))],
                    ),
                ),
            ],
        )
    }

    #[test]
    fn test_request_body() {
        let model = model_with(ParamDecl::new("user", "User").annotate("RequestBody", json!({})));
        let mut request = Request::new("m");

        let binding = classify(&model, &mut request, &user_type(), Some("the user"));

        assert_eq!(binding, Binding::Body);
        assert_eq!(request.method, Some(HttpMethod::POST));
        assert_eq!(request.header(CONTENT_TYPE).unwrap().value, APPLICATION_JSON);
        let body = request.body.unwrap();
        assert_eq!(body.ty, user_type());
        assert_eq!(body.description.as_deref(), Some("the user"));
    }

    #[test]
    fn test_request_body_keeps_existing_method() {
        let model = model_with(ParamDecl::new("user", "User").annotate("RequestBody", json!({})));
        let mut request = Request::new("m");
        request.set_method(Some(HttpMethod::PUT));

        classify(&model, &mut request, &user_type(), None);
        assert_eq!(request.method, Some(HttpMethod::PUT));
    }

    #[test]
    fn test_model_attribute_on_get_expands_query() {
        let model =
            model_with(ParamDecl::new("filter", "User").annotate("ModelAttribute", json!({})));
        let mut request = Request::new("m");
        request.set_method(Some(HttpMethod::GET));

        let binding = classify(&model, &mut request, &user_type(), Some("ignored"));

        assert_eq!(binding, Binding::Query);
        let names: Vec<_> = request.query_params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["name", "address"]);
        assert!(request.query_params[0].required);
        assert!(request.form_params.is_empty());
    }

    #[test]
    fn test_model_attribute_without_method_defaults_to_post_form() {
        let model =
            model_with(ParamDecl::new("form", "User").annotate("ModelAttribute", json!({})));
        let mut request = Request::new("m");

        let binding = classify(&model, &mut request, &user_type(), None);

        assert_eq!(binding, Binding::Form);
        assert_eq!(request.method, Some(HttpMethod::POST));
        assert_eq!(request.header(CONTENT_TYPE).unwrap().value, FORM_URLENCODED);
        let names: Vec<_> = request.form_params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["name", "address.city"]);
    }

    #[test]
    fn test_model_attribute_method_from_rule() {
        let model =
            model_with(ParamDecl::new("form", "User").annotate("ModelAttribute", json!({})));
        let rules = ConfigRules::new(&model).rule(RuleKey::MethodDefaultHttpMethod, "put");
        let mut request = Request::new("m");

        ParameterClassifier::new(&model, &rules).classify(
            &param_ref(),
            &mut request,
            &user_type(),
            None,
        );
        assert_eq!(request.method, Some(HttpMethod::PUT));
    }

    #[test]
    fn test_model_attribute_with_file_is_multipart() {
        let model =
            model_with(ParamDecl::new("upload", "Upload").annotate("ModelAttribute", json!({})));
        let ty = ResolvedType::object(
            "Upload",
            vec![
                Field::new("title", ResolvedType::scalar("string")),
                Field::new("file", ResolvedType::File),
            ],
        );
        let mut request = Request::new("m");
        request.set_method(Some(HttpMethod::POST));

        classify(&model, &mut request, &ty, None);

        assert_eq!(request.header(CONTENT_TYPE).unwrap().value, MULTIPART_FORM_DATA);
        assert_eq!(request.form_params[1].kind, FormKind::File);
        assert_eq!(request.form_params[0].kind, FormKind::Text);
    }

    #[test]
    fn test_request_header() {
        let model = model_with(ParamDecl::new("token", "String").annotate(
            "RequestHeader",
            json!({"value": "X-Token", "required": false, "defaultValue": "abc"}),
        ));
        let mut request = Request::new("m");

        let binding = classify(&model, &mut request, &ResolvedType::scalar("String"), Some("auth"));

        assert_eq!(binding, Binding::Header);
        let header = request.header("x-token").unwrap();
        assert_eq!(header.value, "abc");
        assert_eq!(header.example, "abc");
        assert!(!header.required);
        assert_eq!(header.description, "auth");
    }

    #[test]
    fn test_request_header_sentinel_default_and_declared_name() {
        let model = model_with(
            ParamDecl::new("traceId", "String")
                .annotate("RequestHeader", json!({"defaultValue": DEFAULT_NONE})),
        );
        let mut request = Request::new("m");

        classify(&model, &mut request, &ResolvedType::scalar("String"), None);

        let header = request.header("traceId").unwrap();
        assert_eq!(header.value, "");
        assert!(header.required);
    }

    #[test]
    fn test_path_variable_with_type_comment() {
        let model = model_with(
            ParamDecl::new("id", "com.example.UserId").annotate("PathVariable", json!({})),
        )
        .with_type_comment("com.example.UserId", "numeric user id");
        let mut request = Request::new("m");

        let binding = classify(&model, &mut request, &ResolvedType::scalar("long"), Some("the id"));

        assert_eq!(binding, Binding::PathVariable);
        assert_eq!(request.path_params[0].name, "id");
        assert_eq!(request.path_params[0].description, "the id numeric user id");
    }

    #[test]
    fn test_path_variable_explicit_name() {
        let model =
            model_with(ParamDecl::new("id", "long").annotate("PathVariable", json!("userId")));
        let mut request = Request::new("m");

        classify(&model, &mut request, &ResolvedType::scalar("long"), None);
        assert_eq!(request.path_params[0].name, "userId");
        assert_eq!(request.path_params[0].description, "");
    }

    #[test]
    fn test_request_param_always_has_default() {
        let model = model_with(
            ParamDecl::new("q", "String").annotate("RequestParam", json!({"required": false})),
        );
        let mut request = Request::new("m");
        request.set_method(Some(HttpMethod::GET));

        let binding = classify(&model, &mut request, &ResolvedType::scalar("String"), None);

        assert_eq!(binding, Binding::Query);
        assert_eq!(request.query_params.len(), 1);
        let q = &request.query_params[0];
        assert_eq!(q.name, "q");
        assert_eq!(q.value, "");
        assert!(!q.required);
    }

    #[test]
    fn test_declared_default_overrides_annotation_default() {
        let model = model_with(
            ParamDecl::new("size", "int")
                .annotate("RequestParam", json!({"name": "pageSize", "defaultValue": "10"}))
                .default_value("20"),
        );
        let mut request = Request::new("m");

        classify(&model, &mut request, &ResolvedType::scalar("int"), None);

        assert_eq!(request.query_params[0].name, "pageSize");
        assert_eq!(request.query_params[0].value, "20");
    }

    #[test]
    fn test_blank_declared_default_is_ignored() {
        let model = model_with(
            ParamDecl::new("size", "int")
                .annotate("RequestParam", json!({"defaultValue": "10"}))
                .default_value("  "),
        );
        let mut request = Request::new("m");

        classify(&model, &mut request, &ResolvedType::scalar("int"), None);
        assert_eq!(request.query_params[0].value, "10");
    }

    #[test]
    fn test_unannotated_object_on_post_expands_query() {
        let model = model_with(ParamDecl::new("filter", "User"));
        let mut request = Request::new("m");
        request.set_method(Some(HttpMethod::POST));

        let binding = classify(&model, &mut request, &user_type(), None);

        assert_eq!(binding, Binding::Query);
        assert_eq!(request.query_params.len(), 2);
    }

    #[test]
    fn test_unannotated_file_on_post_is_form() {
        let model = model_with(ParamDecl::new("file", "MultipartFile"));
        let mut request = Request::new("m");
        request.set_method(Some(HttpMethod::POST));

        let binding = classify(&model, &mut request, &ResolvedType::File, Some("upload"));

        assert_eq!(binding, Binding::Form);
        let field = &request.form_params[0];
        assert_eq!(field.name, "file");
        assert_eq!(field.kind, FormKind::File);
        assert_eq!(field.description, "upload");
        assert_eq!(request.header(CONTENT_TYPE).unwrap().value, MULTIPART_FORM_DATA);
    }

    #[test]
    fn test_unannotated_file_on_get_is_query() {
        let model = model_with(ParamDecl::new("file", "MultipartFile"));
        let mut request = Request::new("m");
        request.set_method(Some(HttpMethod::GET));

        let binding = classify(&model, &mut request, &ResolvedType::File, None);

        assert_eq!(binding, Binding::Query);
        assert_eq!(request.query_params.len(), 1);
        assert_eq!(request.query_params[0].name, "file");
        assert_eq!(request.query_params[0].value, "");
        assert!(request.form_params.is_empty());
        assert!(request.header(CONTENT_TYPE).is_none());
    }

    #[test]
    fn test_model_attribute_with_file_on_get_is_query() {
        let model =
            model_with(ParamDecl::new("upload", "Upload").annotate("ModelAttribute", json!({})));
        let ty = ResolvedType::object(
            "Upload",
            vec![
                Field::new("title", ResolvedType::scalar("string")),
                Field::new("file", ResolvedType::File),
            ],
        );
        let mut request = Request::new("m");
        request.set_method(Some(HttpMethod::GET));

        let binding = classify(&model, &mut request, &ty, None);

        assert_eq!(binding, Binding::Query);
        let names: Vec<_> = request.query_params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["title", "file"]);
        assert!(request.form_params.is_empty());
        assert!(request.header(CONTENT_TYPE).is_none());
    }

    #[test]
    fn test_unannotated_scalar_on_get_is_query() {
        let model = model_with(ParamDecl::new("page", "int"));
        let mut request = Request::new("m");
        request.set_method(Some(HttpMethod::GET));

        classify(&model, &mut request, &ResolvedType::scalar("int"), Some("page number"));

        let page = &request.query_params[0];
        assert_eq!(page.name, "page");
        assert!(!page.required);
        assert_eq!(page.description, "page number");
    }

    #[test]
    fn test_required_rule_upgrades() {
        let model = model_with(
            ParamDecl::new("q", "String")
                .annotate("RequestParam", json!({"required": false}))
                .annotate("NotNull", json!({})),
        );
        let rules = ConfigRules::new(&model).rule(RuleKey::ParamRequired, "@NotNull");
        let mut request = Request::new("m");

        ParameterClassifier::new(&model, &rules).classify(
            &param_ref(),
            &mut request,
            &ResolvedType::scalar("String"),
            None,
        );
        assert!(request.query_params[0].required);
    }
}
