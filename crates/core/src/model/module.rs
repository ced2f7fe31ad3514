use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::facet::MinecraftFacet;
use crate::mixin::MixinConfigFile;
use crate::types::Position;

use super::element::{ClassId, FieldId, FileId, JavaClass, JavaField, JavaFile, JavaMethod, MethodId};

/// The analyzed model of one mod module: parsed files, the element arenas,
/// the detected platform facet and any discovered mixin configs.
///
/// The model is an immutable snapshot once built; resolvers borrow it and may
/// cache results keyed by element ids for as long as the borrow lives.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ModuleModel {
    pub root: PathBuf,
    pub facet: Option<MinecraftFacet>,
    pub mixin_configs: Vec<MixinConfigFile>,
    files: Vec<JavaFile>,
    classes: Vec<JavaClass>,
    methods: Vec<JavaMethod>,
    fields: Vec<JavaField>,
    /// Qualified name -> class, maintained by `add_class`
    index: HashMap<String, ClassId>,
}

impl ModuleModel {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            ..Self::default()
        }
    }

    pub fn file(&self, id: FileId) -> &JavaFile {
        &self.files[id.0 as usize]
    }

    pub fn class(&self, id: ClassId) -> &JavaClass {
        &self.classes[id.0 as usize]
    }

    pub fn method(&self, id: MethodId) -> &JavaMethod {
        &self.methods[id.0 as usize]
    }

    pub fn field(&self, id: FieldId) -> &JavaField {
        &self.fields[id.0 as usize]
    }

    pub fn files(&self) -> impl Iterator<Item = (FileId, &JavaFile)> {
        self.files
            .iter()
            .enumerate()
            .map(|(i, f)| (FileId(i as u32), f))
    }

    pub fn classes(&self) -> impl Iterator<Item = (ClassId, &JavaClass)> {
        self.classes
            .iter()
            .enumerate()
            .map(|(i, c)| (ClassId(i as u32), c))
    }

    pub fn add_file(&mut self, file: JavaFile) -> FileId {
        let id = FileId(self.files.len() as u32);
        self.files.push(file);
        id
    }

    /// Add a class and register it: in the index, in its file's top-level
    /// list (or its enclosing class's nested list).
    pub fn add_class(&mut self, class: JavaClass) -> ClassId {
        let id = ClassId(self.classes.len() as u32);
        self.index.insert(class.qualified_name.clone(), id);
        match class.enclosing {
            Some(outer) => self.classes[outer.0 as usize].nested.push(id),
            None => self.files[class.file.0 as usize].classes.push(id),
        }
        self.classes.push(class);
        id
    }

    pub fn add_method(&mut self, method: JavaMethod) -> MethodId {
        let id = MethodId(self.methods.len() as u32);
        self.classes[method.owner.0 as usize].methods.push(id);
        self.methods.push(method);
        id
    }

    pub fn add_field(&mut self, field: JavaField) -> FieldId {
        let id = FieldId(self.fields.len() as u32);
        self.classes[field.owner.0 as usize].fields.push(id);
        self.fields.push(field);
        id
    }

    /// Look up a class by its exact qualified name
    pub fn class_by_qualified_name(&self, qualified: &str) -> Option<ClassId> {
        self.index.get(qualified).copied()
    }

    /// Resolve a textual type reference appearing in `from`'s file to a class
    /// in this module. Resolution order follows Java visibility: as-written
    /// qualified name, same-file declarations, explicit imports, wildcard
    /// imports, same package. Types not declared in this module (JDK and
    /// library types) resolve to `None`.
    pub fn resolve_class(&self, name: &str, from: FileId) -> Option<ClassId> {
        let file = self.file(from);

        if name.contains('.') {
            if let Some(id) = self.index.get(name) {
                return Some(*id);
            }
            // Partially qualified nested reference, e.g. `Outer.Inner` in the
            // declaring package
            if let Some(pkg) = &file.package {
                if let Some(id) = self.index.get(&format!("{pkg}.{name}")) {
                    return Some(*id);
                }
            }
            return None;
        }

        // Same file, including nested classes
        for &top in &file.classes {
            if let Some(id) = self.find_in_class_tree(top, name) {
                return Some(id);
            }
        }

        // Explicit imports
        for import in &file.imports {
            if !import.wildcard && import.path.ends_with(&format!(".{name}")) {
                return self.index.get(&import.path).copied();
            }
        }

        // Wildcard imports
        for import in &file.imports {
            if import.wildcard {
                if let Some(id) = self.index.get(&format!("{}.{name}", import.path)) {
                    return Some(*id);
                }
            }
        }

        // Same package
        let qualified = match &file.package {
            Some(pkg) => format!("{pkg}.{name}"),
            None => name.to_string(),
        };
        self.index.get(&qualified).copied()
    }

    fn find_in_class_tree(&self, id: ClassId, name: &str) -> Option<ClassId> {
        let class = self.class(id);
        if class.name == name {
            return Some(id);
        }
        class
            .nested
            .iter()
            .find_map(|&nested| self.find_in_class_tree(nested, name))
    }

    /// Innermost class whose span contains `position`
    pub fn find_class_at(&self, file: FileId, position: Position) -> Option<ClassId> {
        let mut found = None;
        for &top in &self.file(file).classes {
            self.descend_at(top, position, &mut found);
        }
        found
    }

    fn descend_at(&self, id: ClassId, position: Position, found: &mut Option<ClassId>) {
        let class = self.class(id);
        if !class.span.contains(position) {
            return;
        }
        *found = Some(id);
        for &nested in &class.nested {
            self.descend_at(nested, position, found);
        }
    }

    /// Method of `class` whose span contains `position`, if any
    pub fn find_method_at(&self, class: ClassId, position: Position) -> Option<MethodId> {
        self.class(class)
            .methods
            .iter()
            .copied()
            .find(|&m| self.method(m).span.contains(position))
    }
}
