// apiscope - HTTP request inference for Spring controllers
//
// This library reads a source model of annotated controller classes and
// infers one HTTP request per handler method: path, verb, headers, path
// variables, query and form parameters, and body.

// Re-export core functionality
pub use apiscope_core::*;

// Re-export optional crates
#[cfg(feature = "config")]
pub use apiscope_config;

#[cfg(feature = "http-client")]
pub use apiscope_http_client;

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        AnnotationKind, ClassDecl, ClassRef, ConfigRules, Element, Error, FnRules, HttpMethod,
        InMemoryModel, MethodDecl, MethodRef, NoRules, ParamDecl, ParamRef, Request,
        ResolvedType, Result, RuleEvaluator, RuleKey, RuleValue, SourceModel,
        SpringRequestExporter,
    };

    #[cfg(feature = "config")]
    pub use apiscope_config::{ConfigManager, Settings};

    #[cfg(feature = "http-client")]
    pub use apiscope_http_client::{ConfigurableHttpClientProvider, HttpClientProvider, fetch_text};
}
