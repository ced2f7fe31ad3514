//! Builders for constructing element models by hand in tests.

use std::path::PathBuf;

use crate::facet::MinecraftFacet;
use crate::types::Span;

use super::element::{
    Annotation, ClassId, ClassKind, FieldId, FileId, Import, JavaClass, JavaField, JavaFile,
    JavaMethod, MethodId,
};
use super::module::ModuleModel;

pub struct ModelBuilder {
    model: ModuleModel,
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self {
            model: ModuleModel::new(PathBuf::from("/test-module")),
        }
    }

    pub fn set_facet(&mut self, facet: MinecraftFacet) {
        self.model.facet = Some(facet);
    }

    pub fn file(&mut self, path: &str, package: Option<&str>) -> FileId {
        self.file_with_imports(path, package, &[])
    }

    pub fn file_with_imports(
        &mut self,
        path: &str,
        package: Option<&str>,
        imports: &[&str],
    ) -> FileId {
        self.model.add_file(JavaFile {
            path: PathBuf::from(path),
            package: package.map(String::from),
            imports: imports
                .iter()
                .map(|p| Import {
                    path: (*p).to_string(),
                    wildcard: false,
                    is_static: false,
                })
                .collect(),
            classes: Vec::new(),
        })
    }

    pub fn class(&mut self, file: FileId, name: &str, annotations: &[Annotation]) -> ClassId {
        self.class_spanning(file, name, annotations, Span::default())
    }

    pub fn class_spanning(
        &mut self,
        file: FileId,
        name: &str,
        annotations: &[Annotation],
        span: Span,
    ) -> ClassId {
        self.insert_class(file, None, name, &[], annotations, span)
    }

    pub fn class_extending(
        &mut self,
        file: FileId,
        name: &str,
        super_types: &[&str],
        annotations: &[Annotation],
    ) -> ClassId {
        self.insert_class(file, None, name, super_types, annotations, Span::default())
    }

    pub fn nested_class(&mut self, outer: ClassId, name: &str, annotations: &[Annotation]) -> ClassId {
        self.nested_class_spanning(outer, name, annotations, Span::default())
    }

    pub fn nested_class_spanning(
        &mut self,
        outer: ClassId,
        name: &str,
        annotations: &[Annotation],
        span: Span,
    ) -> ClassId {
        let file = self.model.class(outer).file;
        self.insert_class(file, Some(outer), name, &[], annotations, span)
    }

    pub fn nested_class_extending(
        &mut self,
        outer: ClassId,
        name: &str,
        super_types: &[&str],
        annotations: &[Annotation],
    ) -> ClassId {
        let file = self.model.class(outer).file;
        self.insert_class(file, Some(outer), name, super_types, annotations, Span::default())
    }

    fn insert_class(
        &mut self,
        file: FileId,
        enclosing: Option<ClassId>,
        name: &str,
        super_types: &[&str],
        annotations: &[Annotation],
        span: Span,
    ) -> ClassId {
        let qualified_name = match enclosing {
            Some(outer) => format!("{}.{name}", self.model.class(outer).qualified_name),
            None => match &self.model.file(file).package {
                Some(pkg) => format!("{pkg}.{name}"),
                None => name.to_string(),
            },
        };
        self.model.add_class(JavaClass {
            file,
            name: name.to_string(),
            qualified_name,
            kind: ClassKind::Class,
            annotations: annotations.to_vec(),
            super_types: super_types.iter().map(|s| (*s).to_string()).collect(),
            enclosing,
            nested: Vec::new(),
            methods: Vec::new(),
            fields: Vec::new(),
            span,
        })
    }

    pub fn method(&mut self, owner: ClassId, name: &str, annotations: &[Annotation]) -> MethodId {
        self.method_spanning(owner, name, annotations, Span::default())
    }

    pub fn method_spanning(
        &mut self,
        owner: ClassId,
        name: &str,
        annotations: &[Annotation],
        span: Span,
    ) -> MethodId {
        self.model.add_method(JavaMethod {
            owner,
            name: name.to_string(),
            annotations: annotations.to_vec(),
            param_count: 0,
            is_static: false,
            is_constructor: false,
            span,
        })
    }

    /// Escape hatch for tests that need full control over a method record
    pub fn method_with(&mut self, method: JavaMethod) -> MethodId {
        self.model.add_method(method)
    }

    pub fn field(&mut self, owner: ClassId, name: &str, annotations: &[Annotation]) -> FieldId {
        self.model.add_field(JavaField {
            owner,
            name: name.to_string(),
            annotations: annotations.to_vec(),
            span: Span::default(),
        })
    }

    pub fn finish(self) -> ModuleModel {
        self.model
    }
}

/// A marker annotation, e.g. `@Override`
pub fn marker(name: &str, qualified: &str) -> Annotation {
    Annotation {
        name: name.to_string(),
        qualified_name: Some(qualified.to_string()),
        values: Vec::new(),
        span: Span::default(),
    }
}

/// An annotation with a single positional value, e.g. `@OnlyIn(Dist.CLIENT)`
pub fn with_value(name: &str, qualified: &str, value: &str) -> Annotation {
    Annotation {
        name: name.to_string(),
        qualified_name: Some(qualified.to_string()),
        values: vec![("value".to_string(), value.to_string())],
        span: Span::default(),
    }
}
