use crate::facet::FABRIC_MOD_JSON;
use crate::model::ModuleModel;

use super::diagnostic::{CheckId, Diagnostic, Severity};

/// Words that cannot appear as segments of a Java class reference
const JAVA_KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "final", "finally", "float",
    "for", "goto", "if", "implements", "import", "instanceof", "int", "interface", "long",
    "native", "new", "package", "private", "protected", "public", "return", "short", "static",
    "strictfp", "super", "switch", "synchronized", "this", "throw", "throws", "transient", "try",
    "void", "volatile", "while", "true", "false", "null",
];

fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_identifier_part(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

fn is_valid_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    is_identifier_start(first)
        && chars.all(is_identifier_part)
        && !JAVA_KEYWORDS.contains(&segment)
}

fn is_valid_class_reference(reference: &str) -> bool {
    !reference.is_empty() && reference.split('.').all(is_valid_identifier)
}

/// Whether the string is a valid entrypoint reference: a dotted class
/// reference, optionally followed by `::member`
pub fn is_valid_entrypoint_reference(reference: &str) -> bool {
    match reference.split_once("::") {
        Some((class, member)) => is_valid_class_reference(class) && is_valid_identifier(member),
        None => is_valid_class_reference(reference),
    }
}

/// Validate the entrypoint references declared in `fabric.mod.json`
pub fn check_module(module: &ModuleModel, diagnostics: &mut Vec<Diagnostic>) {
    let Some(facet) = &module.facet else {
        return;
    };
    let Some(descriptor) = &facet.fabric_json else {
        return;
    };
    let file = facet
        .fabric_json_path
        .clone()
        .unwrap_or_else(|| module.root.join(FABRIC_MOD_JSON));

    for (kind, entries) in &descriptor.entrypoints {
        for entry in entries {
            let reference = entry.reference();
            if !is_valid_entrypoint_reference(reference) {
                diagnostics.push(Diagnostic {
                    check: CheckId::FabricEntrypoint,
                    severity: Severity::Error,
                    file: file.clone(),
                    span: None,
                    message: format!(
                        "`{reference}` is not a valid `entrypoints.{kind}` reference"
                    ),
                    quick_fix: None,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facet::{EntryPointValue, FabricModJson, MinecraftFacet};
    use crate::model::testutil::ModelBuilder;

    #[test]
    fn test_reference_validation() {
        assert!(is_valid_entrypoint_reference("com.example.ExampleMod"));
        assert!(is_valid_entrypoint_reference("ExampleMod"));
        assert!(is_valid_entrypoint_reference("com.example.ExampleMod::init"));
        assert!(is_valid_entrypoint_reference("com.example.Mod$Inner"));

        assert!(!is_valid_entrypoint_reference(""));
        assert!(!is_valid_entrypoint_reference("com..Example"));
        assert!(!is_valid_entrypoint_reference("com.class.Example"));
        assert!(!is_valid_entrypoint_reference("com.example.1Mod"));
        assert!(!is_valid_entrypoint_reference("com.example.Mod::"));
        assert!(!is_valid_entrypoint_reference("com example.Mod"));
    }

    #[test]
    fn test_reports_invalid_entrypoints() {
        let mut descriptor = FabricModJson {
            id: Some("test".to_string()),
            ..FabricModJson::default()
        };
        descriptor.entrypoints.insert(
            "main".to_string(),
            vec![
                EntryPointValue::Reference("com.example.Good".to_string()),
                EntryPointValue::Reference("com.example.123Bad".to_string()),
            ],
        );

        let mut b = ModelBuilder::new();
        b.set_facet(MinecraftFacet::fabric(Some(descriptor), None));
        let model = b.finish();

        let mut diagnostics = Vec::new();
        check_module(&model, &mut diagnostics);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("com.example.123Bad"));
        assert!(diagnostics[0].message.contains("entrypoints.main"));
    }
}
