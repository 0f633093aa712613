//! The source model the engine reads annotation metadata from.

use crate::annotation::{AnnotationFact, AnnotationKind, AttributeMap};
use crate::element::{ClassRef, Element, MethodRef, ParamRef};
use crate::types::ResolvedType;
use std::sync::Arc;

/// Read-only view over classes, methods and parameters with their declared
/// annotations, types and comments.
///
/// The first group of methods is what the inference engine consumes. The
/// navigation group and the pipeline hooks (`resolved_type`,
/// `parameter_doc`) are used by the export driver to walk a controller.
pub trait SourceModel {
    /// Attributes of the annotation with the given qualified name, if the
    /// element carries it.
    fn annotation_attributes(&self, element: Element<'_>, qualified_name: &str)
    -> Option<AttributeMap>;

    /// Direct superclass, if any.
    fn superclass_of(&self, class: &ClassRef) -> Option<ClassRef>;

    /// Language-level default value declared on the parameter.
    fn declared_default_value(&self, param: &ParamRef) -> Option<String>;

    /// Comment attached to a declared type, resolved in the context of a
    /// parameter.
    fn type_level_comment(&self, type_name: &str, context: &ParamRef) -> Option<String>;

    /// Whether the resolved type contains an uploadable file field.
    fn contains_uploadable_file(&self, ty: &ResolvedType) -> bool {
        ty.contains_file()
    }

    fn has_annotation(&self, element: Element<'_>, qualified_name: &str) -> bool {
        self.annotation_attributes(element, qualified_name).is_some()
    }

    // Navigation

    fn classes(&self) -> Vec<ClassRef>;

    fn methods_of(&self, class: &ClassRef) -> Vec<MethodRef>;

    fn parameters_of(&self, method: &MethodRef) -> Vec<ParamRef>;

    fn parameter_name(&self, param: &ParamRef) -> String;

    /// Declared type name of the parameter.
    fn parameter_type(&self, param: &ParamRef) -> Option<String>;

    fn method_doc(&self, method: &MethodRef) -> Option<String>;

    // Generic pipeline hooks

    fn resolved_type(&self, param: &ParamRef) -> ResolvedType;

    fn parameter_doc(&self, param: &ParamRef) -> Option<String>;
}

/// Typed lookup of a known annotation.
pub fn find_annotation<M: SourceModel + ?Sized>(
    model: &M,
    element: Element<'_>,
    kind: AnnotationKind,
) -> Option<AnnotationFact> {
    model
        .annotation_attributes(element, kind.qualified_name())
        .map(|attributes| AnnotationFact::new(kind, attributes))
}

pub fn has_annotation<M: SourceModel + ?Sized>(
    model: &M,
    element: Element<'_>,
    kind: AnnotationKind,
) -> bool {
    model.has_annotation(element, kind.qualified_name())
}

macro_rules! forward_source_model {
    ($($target:ty),*) => {
        $(
            impl<T: SourceModel + ?Sized> SourceModel for $target {
                fn annotation_attributes(
                    &self,
                    element: Element<'_>,
                    qualified_name: &str,
                ) -> Option<AttributeMap> {
                    (**self).annotation_attributes(element, qualified_name)
                }

                fn superclass_of(&self, class: &ClassRef) -> Option<ClassRef> {
                    (**self).superclass_of(class)
                }

                fn declared_default_value(&self, param: &ParamRef) -> Option<String> {
                    (**self).declared_default_value(param)
                }

                fn type_level_comment(
                    &self,
                    type_name: &str,
                    context: &ParamRef,
                ) -> Option<String> {
                    (**self).type_level_comment(type_name, context)
                }

                fn contains_uploadable_file(&self, ty: &ResolvedType) -> bool {
                    (**self).contains_uploadable_file(ty)
                }

                fn has_annotation(&self, element: Element<'_>, qualified_name: &str) -> bool {
                    (**self).has_annotation(element, qualified_name)
                }

                fn classes(&self) -> Vec<ClassRef> {
                    (**self).classes()
                }

                fn methods_of(&self, class: &ClassRef) -> Vec<MethodRef> {
                    (**self).methods_of(class)
                }

                fn parameters_of(&self, method: &MethodRef) -> Vec<ParamRef> {
                    (**self).parameters_of(method)
                }

                fn parameter_name(&self, param: &ParamRef) -> String {
                    (**self).parameter_name(param)
                }

                fn parameter_type(&self, param: &ParamRef) -> Option<String> {
                    (**self).parameter_type(param)
                }

                fn method_doc(&self, method: &MethodRef) -> Option<String> {
                    (**self).method_doc(method)
                }

                fn resolved_type(&self, param: &ParamRef) -> ResolvedType {
                    (**self).resolved_type(param)
                }

                fn parameter_doc(&self, param: &ParamRef) -> Option<String> {
                    (**self).parameter_doc(param)
                }
            }
        )*
    };
}

forward_source_model!(&T, Arc<T>, Box<T>);
