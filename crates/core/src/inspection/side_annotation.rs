use std::path::Path;

use crate::model::{Annotation, ModuleModel};
use crate::sideonly::{beginning_check, find_side_annotation, resolve_annotation_side};
use crate::types::Side;

use super::diagnostic::{CheckId, Diagnostic, Severity};

/// Report malformed restriction annotations: a missing `value` attribute or a
/// value outside the recognized side spellings. Well-formed restrictions are
/// not diagnostics; they are the normal case.
pub fn check_module(module: &ModuleModel, diagnostics: &mut Vec<Diagnostic>) {
    if !beginning_check(module) {
        return;
    }
    for (_, class) in module.classes() {
        let file = &module.file(class.file).path;
        check_annotations(&class.annotations, file, "class", &class.name, diagnostics);
        for &method in &class.methods {
            let method = module.method(method);
            check_annotations(&method.annotations, file, "method", &method.name, diagnostics);
        }
        for &field in &class.fields {
            let field = module.field(field);
            check_annotations(&field.annotations, file, "field", &field.name, diagnostics);
        }
    }
}

fn check_annotations(
    annotations: &[Annotation],
    file: &Path,
    kind: &str,
    name: &str,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let Some(annotation) = find_side_annotation(annotations) else {
        return;
    };
    let message = match annotation.value() {
        None => format!("@{} on {kind} `{name}` requires a value", annotation.simple_name()),
        Some(value) if resolve_annotation_side(value) == Side::Invalid => format!(
            "unrecognized side `{value}` on {kind} `{name}`"
        ),
        Some(_) => return,
    };
    diagnostics.push(Diagnostic {
        check: CheckId::SideAnnotation,
        severity: Severity::Error,
        file: file.to_path_buf(),
        span: Some(annotation.span),
        message,
        quick_fix: None,
    });
}
