//! End-to-end export of controller models described as JSON documents.

use apiscope_core::*;
use serde_json::json;

const MODEL: &str = r#"{
  "classes": [
    {
      "name": "com.example.BaseController",
      "annotations": [
        { "name": "org.springframework.web.bind.annotation.RequestMapping", "attributes": { "value": "/api" } }
      ]
    },
    {
      "name": "com.example.UserController",
      "superclass": "com.example.BaseController",
      "annotations": [ { "name": "RestController" } ],
      "methods": [
        {
          "name": "get",
          "doc": "Find a user by id",
          "annotations": [ { "name": "GetMapping", "attributes": { "value": "/users/{id}" } } ],
          "params": [
            { "name": "id", "type": "java.lang.Long", "annotations": [ { "name": "PathVariable" } ] }
          ]
        },
        {
          "name": "search",
          "annotations": [ { "name": "GetMapping", "attributes": { "path": ["/users", "/people"] } } ],
          "params": [
            {
              "name": "query",
              "type": "java.lang.String",
              "annotations": [ { "name": "RequestParam", "attributes": { "value": "q", "required": false } } ]
            }
          ]
        },
        {
          "name": "create",
          "annotations": [ { "name": "PostMapping", "attributes": { "value": "/users" } } ],
          "params": [
            {
              "name": "user",
              "type": "com.example.User",
              "annotations": [ { "name": "RequestBody" } ],
              "resolved": {
                "kind": "object",
                "name": "User",
                "fields": [ { "name": "name", "type": { "kind": "scalar", "name": "string" }, "required": true } ]
              }
            }
          ]
        }
      ]
    },
    {
      "name": "com.example.FormController",
      "annotations": [
        { "name": "Controller" },
        { "name": "RequestMapping", "attributes": { "value": "/forms", "method": "RequestMethod.POST" } }
      ],
      "methods": [
        {
          "name": "submit",
          "annotations": [ { "name": "RequestMapping", "attributes": { "value": "/submit" } } ]
        }
      ]
    }
  ]
}"#;

fn exporter() -> SpringRequestExporter<InMemoryModel> {
    SpringRequestExporter::new(InMemoryModel::from_json(MODEL).unwrap())
}

fn find<'a>(requests: &'a [Request], name: &str) -> &'a Request {
    requests.iter().find(|r| r.name == name).unwrap()
}

#[test]
fn test_path_variable_under_inherited_base_path() {
    let requests = exporter().export_all();
    let get = find(&requests, "get");

    assert_eq!(get.method, Some(HttpMethod::GET));
    assert_eq!(get.path, "/api/users/{id}");
    assert_eq!(get.path_params.len(), 1);
    assert_eq!(get.path_params[0].name, "id");
    assert_eq!(get.description.as_deref(), Some("Find a user by id"));
}

#[test]
fn test_class_default_method_fallback() {
    let requests = exporter().export_class(&ClassRef::new("com.example.FormController"));

    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Some(HttpMethod::POST));
    assert_eq!(requests[0].path, "/forms/submit");
}

#[test]
fn test_optional_request_param_on_get() {
    let requests = exporter().export_all();
    let search = find(&requests, "search");

    assert_eq!(search.path, "/api/users");
    assert_eq!(search.query_params.len(), 1);
    assert_eq!(search.query_params[0].name, "q");
    assert!(!search.query_params[0].required);
}

#[test]
fn test_request_body_is_exclusive() {
    let requests = exporter().export_all();
    let create = find(&requests, "create");

    assert_eq!(create.method, Some(HttpMethod::POST));
    assert_eq!(create.header(CONTENT_TYPE).unwrap().value, APPLICATION_JSON);
    assert_eq!(create.headers.len(), 1);
    assert!(create.body.is_some());
    assert!(create.path_params.is_empty());
    assert!(create.query_params.is_empty());
    assert!(create.form_params.is_empty());
}

#[test]
fn test_base_controller_is_not_exported() {
    let requests = exporter().export_class(&ClassRef::new("com.example.BaseController"));
    assert!(requests.is_empty());
}

#[test]
fn test_rules_from_config_table() {
    let model = InMemoryModel::from_json(MODEL).unwrap();
    let table = json!({
        "class.prefix.path": "/v1",
        "param.required": ["@NotNull", "@RequestParam"],
        "no.such.rule": "ignored"
    });
    let rules = ConfigRules::from_value(model.clone(), &table);
    let requests = SpringRequestExporter::with_rules(model, rules).export_all();

    let search = find(&requests, "search");
    assert_eq!(search.path, "/v1/api/users");
    assert!(search.query_params[0].required);

    let submit = find(&requests, "submit");
    assert_eq!(submit.path, "/v1/forms/submit");
}

#[test]
fn test_requests_serialize_to_json() {
    let requests = exporter().export_all();
    let value = serde_json::to_value(find(&requests, "get")).unwrap();

    assert_eq!(value["method"], "GET");
    assert_eq!(value["path"], "/api/users/{id}");
    assert_eq!(value["path_params"][0]["name"], "id");
    assert!(value.get("body").is_none());
}

#[test]
fn test_invalid_model_document() {
    let err = InMemoryModel::from_json("{ not json").unwrap_err();
    assert!(matches!(err, Error::Model(_)));
}
