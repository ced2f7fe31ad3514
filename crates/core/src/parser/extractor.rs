use std::path::Path;

use tree_sitter::{Node, Tree};

use crate::model::{
    Annotation, ClassId, ClassKind, FileId, Import, JavaClass, JavaField, JavaFile, JavaMethod,
    ModuleModel,
};

use super::utils::{node_span, node_text};

const TYPE_DECLARATION_KINDS: &[&str] = &[
    "class_declaration",
    "interface_declaration",
    "enum_declaration",
    "record_declaration",
    "annotation_type_declaration",
];

/// Walks a Java parse tree and populates the element model.
///
/// The extractor is deliberately lenient: tree-sitter error nodes and
/// declarations with missing names are skipped, never fatal, so analysis
/// keeps working on sources that do not currently compile.
pub struct ElementExtractor;

impl Default for ElementExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract one source file into the module model, returning its id
    pub fn extract_file(
        &self,
        tree: &Tree,
        source: &str,
        path: &Path,
        module: &mut ModuleModel,
    ) -> FileId {
        let root = tree.root_node();
        let mut package = None;
        let mut imports = Vec::new();
        let mut type_nodes = Vec::new();

        let mut cursor = root.walk();
        for child in root.named_children(&mut cursor) {
            let kind = child.kind();
            if kind == "package_declaration" {
                package = extract_package(child, source);
            } else if kind == "import_declaration" {
                if let Some(import) = extract_import(child, source) {
                    imports.push(import);
                }
            } else if TYPE_DECLARATION_KINDS.contains(&kind) {
                type_nodes.push(child);
            }
        }

        let scope = FileScope { package, imports };
        let file_id = module.add_file(JavaFile {
            path: path.to_path_buf(),
            package: scope.package.clone(),
            imports: scope.imports.clone(),
            classes: Vec::new(),
        });

        for node in type_nodes {
            self.extract_class(node, source, file_id, None, &scope, module);
        }

        tracing::trace!("Extracted {:?}", path);
        file_id
    }

    fn extract_class(
        &self,
        node: Node,
        source: &str,
        file: FileId,
        enclosing: Option<ClassId>,
        scope: &FileScope,
        module: &mut ModuleModel,
    ) -> Option<ClassId> {
        let kind = match node.kind() {
            "class_declaration" => ClassKind::Class,
            "interface_declaration" => ClassKind::Interface,
            "enum_declaration" => ClassKind::Enum,
            "record_declaration" => ClassKind::Record,
            "annotation_type_declaration" => ClassKind::Annotation,
            _ => return None,
        };
        let name = node_text(&node.child_by_field_name("name")?, source).to_string();

        let qualified_name = match enclosing {
            Some(outer) => format!("{}.{name}", module.class(outer).qualified_name),
            None => match &scope.package {
                Some(pkg) => format!("{pkg}.{name}"),
                None => name.clone(),
            },
        };

        let (annotations, _) = extract_modifiers(node, source, scope);
        let class_id = module.add_class(JavaClass {
            file,
            name,
            qualified_name,
            kind,
            annotations,
            super_types: extract_super_types(node, source),
            enclosing,
            nested: Vec::new(),
            methods: Vec::new(),
            fields: Vec::new(),
            span: node_span(&node),
        });

        if let Some(body) = node.child_by_field_name("body") {
            self.extract_members(body, source, file, class_id, scope, module);
        }

        Some(class_id)
    }

    fn extract_members(
        &self,
        body: Node,
        source: &str,
        file: FileId,
        class_id: ClassId,
        scope: &FileScope,
        module: &mut ModuleModel,
    ) {
        let mut cursor = body.walk();
        let members: Vec<Node> = body.named_children(&mut cursor).collect();
        for member in members {
            let kind = member.kind();
            if kind == "method_declaration" || kind == "constructor_declaration" {
                extract_method(member, source, class_id, scope, module);
            } else if kind == "field_declaration" {
                extract_fields(member, source, class_id, scope, module);
            } else if kind == "enum_body_declarations" {
                // Members of an enum live behind the constant list
                self.extract_members(member, source, file, class_id, scope, module);
            } else if TYPE_DECLARATION_KINDS.contains(&kind) {
                self.extract_class(member, source, file, Some(class_id), scope, module);
            }
        }
    }
}

struct FileScope {
    package: Option<String>,
    imports: Vec<Import>,
}

impl FileScope {
    /// Resolve a simple annotation name through the file's explicit imports.
    /// Names written with a package are kept verbatim; anything else is left
    /// unresolved and matched by simple name downstream.
    fn resolve_annotation_name(&self, name: &str) -> Option<String> {
        if name.contains('.') {
            return Some(name.to_string());
        }
        let suffix = format!(".{name}");
        self.imports
            .iter()
            .find(|i| !i.wildcard && !i.is_static && i.path.ends_with(&suffix))
            .map(|i| i.path.clone())
    }
}

fn extract_package(node: Node, source: &str) -> Option<String> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .find(|c| matches!(c.kind(), "identifier" | "scoped_identifier"))
        .map(|c| node_text(&c, source).to_string())
}

fn extract_import(node: Node, source: &str) -> Option<Import> {
    let mut path = None;
    let mut wildcard = false;
    let mut is_static = false;
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "identifier" | "scoped_identifier" => {
                path = Some(node_text(&child, source).to_string());
            }
            "asterisk" => wildcard = true,
            "static" => is_static = true,
            _ => {}
        }
    }
    Some(Import {
        path: path?,
        wildcard,
        is_static,
    })
}

fn extract_modifiers(node: Node, source: &str, scope: &FileScope) -> (Vec<Annotation>, bool) {
    let mut annotations = Vec::new();
    let mut is_static = false;
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() != "modifiers" {
            continue;
        }
        let mut modifier_cursor = child.walk();
        for modifier in child.children(&mut modifier_cursor) {
            match modifier.kind() {
                "annotation" | "marker_annotation" => {
                    if let Some(annotation) = extract_annotation(modifier, source, scope) {
                        annotations.push(annotation);
                    }
                }
                "static" => is_static = true,
                _ => {}
            }
        }
    }
    (annotations, is_static)
}

fn extract_annotation(node: Node, source: &str, scope: &FileScope) -> Option<Annotation> {
    let name = node_text(&node.child_by_field_name("name")?, source).to_string();
    let qualified_name = scope.resolve_annotation_name(&name);

    let mut values = Vec::new();
    if let Some(arguments) = node.child_by_field_name("arguments") {
        let mut cursor = arguments.walk();
        for argument in arguments.named_children(&mut cursor) {
            if argument.kind() == "element_value_pair" {
                let Some(key) = argument.child_by_field_name("key") else {
                    continue;
                };
                let Some(value) = argument.child_by_field_name("value") else {
                    continue;
                };
                values.push((
                    node_text(&key, source).to_string(),
                    node_text(&value, source).to_string(),
                ));
            } else if !argument.is_extra() {
                // A lone positional argument is the `value` attribute
                values.push(("value".to_string(), node_text(&argument, source).to_string()));
            }
        }
    }

    Some(Annotation {
        name,
        qualified_name,
        values,
        span: node_span(&node),
    })
}

fn extract_super_types(node: Node, source: &str) -> Vec<String> {
    let mut supers = Vec::new();

    if let Some(superclass) = node.child_by_field_name("superclass") {
        let mut cursor = superclass.walk();
        for child in superclass.named_children(&mut cursor) {
            supers.push(type_name(&child, source));
        }
    }

    // `implements` on classes/enums/records is the `interfaces` field;
    // `extends` on interfaces is a plain `extends_interfaces` child
    let mut cursor = node.walk();
    let clause_nodes: Vec<Node> = node
        .named_children(&mut cursor)
        .filter(|c| matches!(c.kind(), "super_interfaces" | "extends_interfaces"))
        .collect();
    for clause in clause_nodes {
        let mut clause_cursor = clause.walk();
        for child in clause.named_children(&mut clause_cursor) {
            if child.kind() == "type_list" {
                let mut list_cursor = child.walk();
                for ty in child.named_children(&mut list_cursor) {
                    supers.push(type_name(&ty, source));
                }
            }
        }
    }

    supers
}

/// Textual type name with any generic arguments stripped
fn type_name(node: &Node, source: &str) -> String {
    let text = node_text(node, source);
    text.split('<').next().unwrap_or(text).trim().to_string()
}

fn extract_method(
    node: Node,
    source: &str,
    owner: ClassId,
    scope: &FileScope,
    module: &mut ModuleModel,
) {
    let Some(name_node) = node.child_by_field_name("name") else {
        return;
    };
    let param_count = node
        .child_by_field_name("parameters")
        .map_or(0, |p| p.named_child_count() as u32);
    let (annotations, is_static) = extract_modifiers(node, source, scope);
    module.add_method(JavaMethod {
        owner,
        name: node_text(&name_node, source).to_string(),
        annotations,
        param_count,
        is_static,
        is_constructor: node.kind() == "constructor_declaration",
        span: node_span(&node),
    });
}

fn extract_fields(
    node: Node,
    source: &str,
    owner: ClassId,
    scope: &FileScope,
    module: &mut ModuleModel,
) {
    let (annotations, _) = extract_modifiers(node, source, scope);
    let mut cursor = node.walk();
    let declarators: Vec<Node> = node.children_by_field_name("declarator", &mut cursor).collect();
    for declarator in declarators {
        let Some(name_node) = declarator.child_by_field_name("name") else {
            continue;
        };
        module.add_field(JavaField {
            owner,
            name: node_text(&name_node, source).to_string(),
            annotations: annotations.clone(),
            span: node_span(&node),
        });
    }
}
