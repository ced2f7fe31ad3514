use crate::mixin::find_unused_mixins;
use crate::model::ModuleModel;
use crate::sideonly::SideResolver;

use super::diagnostic::{CheckId, Diagnostic, Severity};

/// Report mixin classes referenced by no mixin configuration, offering the
/// matching config edit where one can be computed
pub fn check_module(module: &ModuleModel, diagnostics: &mut Vec<Diagnostic>) {
    let mut resolver = SideResolver::new(module);
    for unused in find_unused_mixins(module, &mut resolver) {
        let class = module.class(unused.class);
        diagnostics.push(Diagnostic {
            check: CheckId::UnusedMixin,
            severity: Severity::Warning,
            file: module.file(class.file).path.clone(),
            span: Some(class.span),
            message: format!(
                "Mixin `{}` not found in any mixin config",
                class.qualified_name
            ),
            quick_fix: unused.quick_fix,
        });
    }
}
