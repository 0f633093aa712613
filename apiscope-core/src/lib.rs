// Request inference engine for Spring-style controllers
// Derives method, path, headers, parameters and body of each handler method
// from the annotations declared on its class, the method and its parameters.

pub mod annotation;
pub mod classifier;
pub mod element;
pub mod error;
pub mod exporter;
pub mod logging;
pub mod mapping;
pub mod memory;
pub mod model;
pub mod path;
pub mod request;
pub mod rules;
pub mod types;
pub mod value;

// Re-export commonly used types
pub use annotation::*;
pub use classifier::{Binding, ParameterClassifier};
pub use element::*;
pub use error::*;
pub use exporter::*;
pub use mapping::{Mapping, find_class_mapping, find_mapping, resolve_http_method};
pub use memory::*;
pub use model::*;
pub use path::*;
pub use request::*;
pub use rules::*;
pub use types::*;
pub use value::*;
