//! The request description every resolver writes into.

use crate::types::ResolvedType;
use serde::{Deserialize, Serialize};

pub const CONTENT_TYPE: &str = "Content-Type";
pub const APPLICATION_JSON: &str = "application/json";
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";
pub const MULTIPART_FORM_DATA: &str = "multipart/form-data";

/// HTTP verbs a handler can be bound to. An undetermined method is `None`
/// wherever an `Option<HttpMethod>` appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(clippy::upper_case_acronyms)]
pub enum HttpMethod {
    GET,
    POST,
    PUT,
    DELETE,
    PATCH,
    HEAD,
    OPTIONS,
    TRACE,
}

impl HttpMethod {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "GET" => Some(HttpMethod::GET),
            "POST" => Some(HttpMethod::POST),
            "PUT" => Some(HttpMethod::PUT),
            "DELETE" => Some(HttpMethod::DELETE),
            "PATCH" => Some(HttpMethod::PATCH),
            "HEAD" => Some(HttpMethod::HEAD),
            "OPTIONS" => Some(HttpMethod::OPTIONS),
            "TRACE" => Some(HttpMethod::TRACE),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::DELETE => "DELETE",
            HttpMethod::PATCH => "PATCH",
            HttpMethod::HEAD => "HEAD",
            HttpMethod::OPTIONS => "OPTIONS",
            HttpMethod::TRACE => "TRACE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request header.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Header {
    pub name: String,
    pub value: String,
    pub example: String,
    #[serde(default)]
    pub description: String,
    pub required: bool,
}

impl Header {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            name: name.into(),
            example: value.clone(),
            value,
            description: String::new(),
            required: true,
        }
    }
}

/// A query parameter.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub value: String,
    pub required: bool,
    #[serde(default)]
    pub description: String,
}

/// A path variable.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PathParam {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Form field kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormKind {
    #[default]
    Text,
    File,
}

/// A form field.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FormParam {
    pub name: String,
    pub value: String,
    pub kind: FormKind,
    pub required: bool,
    #[serde(default)]
    pub description: String,
}

/// A JSON request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    #[serde(rename = "type")]
    pub ty: ResolvedType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The request a handler method answers to.
///
/// A fresh `Request` is created per handler method by the caller; the engine
/// only mutates it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Request {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub method: Option<HttpMethod>,
    pub path: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<Header>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path_params: Vec<PathParam>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub query_params: Vec<Param>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub form_params: Vec<FormParam>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Body>,
}

impl Request {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn set_method(&mut self, method: Option<HttpMethod>) {
        self.method = method;
    }

    /// Set the method only if none has been determined yet.
    pub fn set_method_if_missed(&mut self, method: HttpMethod) {
        if self.method.is_none() {
            self.method = Some(method);
        }
    }

    pub fn set_path(&mut self, path: impl Into<String>) {
        self.path = path.into();
    }

    /// Add a header. A header with the same name (ignoring case) is replaced
    /// in place.
    pub fn add_header(&mut self, header: Header) {
        match self
            .headers
            .iter_mut()
            .find(|h| h.name.eq_ignore_ascii_case(&header.name))
        {
            Some(existing) => *existing = header,
            None => self.headers.push(header),
        }
    }

    /// Add a header unless one with the same name is already present.
    pub fn add_header_if_missed(&mut self, name: &str, value: &str) {
        if self.header(name).is_none() {
            self.headers.push(Header::new(name, value));
        }
    }

    pub fn header(&self, name: &str) -> Option<&Header> {
        self.headers.iter().find(|h| h.name.eq_ignore_ascii_case(name))
    }

    pub fn add_path_param(&mut self, name: impl Into<String>, description: impl Into<String>) {
        self.path_params.push(PathParam {
            name: name.into(),
            description: description.into(),
        });
    }

    pub fn add_query_param(&mut self, param: Param) {
        self.query_params.push(param);
    }

    pub fn add_form_param(&mut self, param: FormParam) {
        self.form_params.push(param);
    }

    pub fn set_json_body(&mut self, ty: ResolvedType, description: Option<String>) {
        self.body = Some(Body { ty, description });
    }
}
