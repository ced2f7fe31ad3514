use sidelint_core::Diagnostic;

/// Render diagnostics the way compilers do: one line per problem, with the
/// available fix indented below it
pub fn render_diagnostics(diagnostics: &[Diagnostic]) -> String {
    let mut out = String::new();
    for diagnostic in diagnostics {
        out.push_str(&diagnostic.to_string());
        out.push('\n');
        if let Some(fix) = &diagnostic.quick_fix {
            out.push_str(&format!(
                "    fix: add \"{}\" to the `{}` array of {}\n",
                fix.entry,
                fix.key,
                fix.config_path.display()
            ));
        }
    }
    out
}

pub fn render_summary(diagnostics: &[Diagnostic]) -> String {
    match diagnostics.len() {
        0 => "No problems found".to_string(),
        1 => "1 problem found".to_string(),
        n => format!("{n} problems found"),
    }
}
