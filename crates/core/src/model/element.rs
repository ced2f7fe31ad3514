use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::types::Span;

/// Index of a file within a [`ModuleModel`](super::ModuleModel) arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileId(pub u32);

/// Index of a class within a [`ModuleModel`](super::ModuleModel) arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClassId(pub u32);

/// Index of a method within a [`ModuleModel`](super::ModuleModel) arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodId(pub u32);

/// Index of a field within a [`ModuleModel`](super::ModuleModel) arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldId(pub u32);

/// A single `import` declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Import {
    /// The imported path, without the trailing `.*` for wildcard imports
    pub path: String,
    pub wildcard: bool,
    pub is_static: bool,
}

/// One parsed Java source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JavaFile {
    pub path: PathBuf,
    pub package: Option<String>,
    pub imports: Vec<Import>,
    /// Top-level classes declared in this file
    pub classes: Vec<ClassId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassKind {
    Class,
    Interface,
    Enum,
    Record,
    Annotation,
}

/// A class-like declaration (class, interface, enum, record, `@interface`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JavaClass {
    pub file: FileId,
    pub name: String,
    /// Dotted qualified name, nested classes included: `com.example.Outer.Inner`
    pub qualified_name: String,
    pub kind: ClassKind,
    pub annotations: Vec<Annotation>,
    /// Textual supertype references from `extends`/`implements`, as written
    pub super_types: Vec<String>,
    /// Lexically enclosing class, if this is a nested class
    pub enclosing: Option<ClassId>,
    pub nested: Vec<ClassId>,
    pub methods: Vec<MethodId>,
    pub fields: Vec<FieldId>,
    pub span: Span,
}

/// A method or constructor declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JavaMethod {
    pub owner: ClassId,
    pub name: String,
    pub annotations: Vec<Annotation>,
    pub param_count: u32,
    pub is_static: bool,
    pub is_constructor: bool,
    pub span: Span,
}

/// A field declaration (one entry per declarator)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JavaField {
    pub owner: ClassId,
    pub name: String,
    pub annotations: Vec<Annotation>,
    pub span: Span,
}

/// A declared annotation with its attribute values.
///
/// `qualified_name` is resolved through the file's imports where possible;
/// annotations written with their full package keep it verbatim. A single
/// positional argument is recorded under the `value` attribute name, matching
/// how Java treats it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// The name as written at the use site, e.g. `SideOnly`
    pub name: String,
    pub qualified_name: Option<String>,
    /// Attribute `(name, value-text)` pairs
    pub values: Vec<(String, String)>,
    pub span: Span,
}

impl Annotation {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// The `value` attribute, present for `@Ann(X)` and `@Ann(value = X)`
    pub fn value(&self) -> Option<&str> {
        self.attribute("value")
    }

    /// Simple name of the annotation, with any package prefix removed
    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }
}
