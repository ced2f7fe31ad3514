use std::sync::LazyLock;

use regex::Regex;

use crate::model::{ClassId, MethodId, ModuleModel};

use super::config::{self, INVOKER_ANNOTATION};

/// Accessor naming convention: `callFoo`, `invokeFoo`, `newFoo`, `createFoo`,
/// with an optional synthetic `_$md...` suffix added by dev-time remapping
static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(call|invoke|new|create)([A-Z].*?)(_\$md.*)?$").expect("valid invoker pattern")
});

/// The target member name an `@Invoker` method refers to. An explicit
/// annotation value wins; otherwise the name is derived from the accessor
/// naming convention. `new`/`create` accessors target the constructor,
/// spelled `<init>`.
pub fn invoker_target_name(explicit: Option<&str>, member_name: &str) -> Option<String> {
    if let Some(value) = explicit {
        let name = value.trim().trim_matches('"');
        if !name.is_empty() {
            return Some(name.to_string());
        }
    }

    let captures = NAME_PATTERN.captures(member_name)?;
    let prefix = captures.get(1).map_or("", |m| m.as_str());
    if prefix == "new" || prefix == "create" {
        return Some("<init>".to_string());
    }

    let name = captures.get(2).map_or("", |m| m.as_str());
    // All-caps names (acronyms) are kept as written; anything else is
    // decapitalized to match the target member
    if name.to_uppercase() != name {
        let mut chars = name.chars();
        let first = chars.next()?;
        return Some(first.to_lowercase().chain(chars).collect());
    }
    Some(name.to_string())
}

/// Resolve the member an `@Invoker` accessor targets, searching the owning
/// mixin's target classes by name and arity
pub fn find_invoker_target(module: &ModuleModel, method: MethodId) -> Option<(ClassId, MethodId)> {
    let accessor = module.method(method);
    let invoker = accessor
        .annotations
        .iter()
        .find(|a| match a.qualified_name.as_deref() {
            Some(qualified) => qualified == INVOKER_ANNOTATION,
            None => a.simple_name() == "Invoker",
        })?;

    let owner = module.class(accessor.owner);
    let targets = config::mixin_targets(owner);
    if targets.is_empty() {
        return None;
    }

    let name = invoker_target_name(invoker.value(), &accessor.name)?;
    let constructor = name == "<init>";

    for target_name in &targets {
        let Some(target) = module.resolve_class(target_name, owner.file) else {
            continue;
        };
        for &candidate in &module.class(target).methods {
            let data = module.method(candidate);
            let name_matches = if constructor {
                data.is_constructor
            } else {
                data.name == name
            };
            if name_matches && data.param_count == accessor.param_count {
                return Some((target, candidate));
            }
        }
    }
    None
}
