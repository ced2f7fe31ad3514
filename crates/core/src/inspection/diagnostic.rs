use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::mixin::MixinConfigEdit;
use crate::types::{Position, Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckId {
    SideAnnotation,
    UnusedMixin,
    FabricEntrypoint,
}

impl fmt::Display for CheckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CheckId::SideAnnotation => "side-annotation",
            CheckId::UnusedMixin => "unused-mixin",
            CheckId::FabricEntrypoint => "fabric-entrypoint",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
        })
    }
}

/// One reported problem, with an optional structured quick-fix
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    pub check: CheckId,
    pub severity: Severity,
    pub file: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quick_fix: Option<MixinConfigEdit>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.span {
            Some(span) => write!(
                f,
                "{}:{}:{}: {}: {} [{}]",
                self.file.display(),
                span.start.line + 1,
                span.start.character + 1,
                self.severity,
                self.message,
                self.check
            ),
            None => write!(
                f,
                "{}: {}: {} [{}]",
                self.file.display(),
                self.severity,
                self.message,
                self.check
            ),
        }
    }
}

/// Order diagnostics for stable output: by file, then position, then check
pub fn sort_diagnostics(diagnostics: &mut [Diagnostic]) {
    diagnostics.sort_by(|a, b| {
        let a_pos = a.span.map_or(Position::default(), |s| s.start);
        let b_pos = b.span.map_or(Position::default(), |s| s.start);
        (&a.file, a_pos, a.check).cmp(&(&b.file, b_pos, b.check))
    });
}
