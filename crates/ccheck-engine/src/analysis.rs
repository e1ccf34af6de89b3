//! One-call driver: lex, pre-register library names, parse and analyze.

use crate::config::CheckConfig;
use crate::diagnostic::{self, DiagnosticItem, DiagnosticReporter, Severity};
use crate::parser::{parse_program, tokenize, ParseSummary, SemanticAnalyzer};

/// Result of checking one source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    /// Diagnostics in emission order
    pub diagnostics: Vec<DiagnosticItem>,
    pub summary: ParseSummary,
}

impl CheckReport {
    /// No diagnostics of any severity.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(DiagnosticItem::is_error)
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    /// `{"diagnostics": [...]}`
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        diagnostic::items_to_json(&self.diagnostics)
    }

    /// Render against the checked source, without colors.
    pub fn render(
        &self,
        file_name: &str,
        source: &str,
    ) -> Result<String, codespan_reporting::files::Error> {
        diagnostic::render_items(&self.diagnostics, file_name, source)
    }
}

/// Runs the whole front end with a fixed configuration.
///
/// Each call owns its own analyzer and reporter, so one `Checker` can be
/// shared between threads.
#[derive(Debug, Clone, Default)]
pub struct Checker {
    config: CheckConfig,
}

impl Checker {
    pub fn new(config: CheckConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CheckConfig {
        &self.config
    }

    pub fn check(&self, source: &str) -> CheckReport {
        self.check_with_libraries::<&str>(source, &[])
    }

    /// Check `source` with `libraries` registered as known names, in
    /// addition to the configured ones.
    pub fn check_with_libraries<L: AsRef<str>>(&self, source: &str, libraries: &[L]) -> CheckReport {
        let mut diags = DiagnosticReporter::new();
        let summary = self.check_into(source, libraries, &mut diags);
        CheckReport {
            diagnostics: diags.into_items(),
            summary,
        }
    }

    /// Check `source`, appending diagnostics to an existing reporter.
    #[tracing::instrument(skip_all, fields(bytes = source.len()))]
    pub fn check_into<L: AsRef<str>>(
        &self,
        source: &str,
        libraries: &[L],
        diags: &mut DiagnosticReporter,
    ) -> ParseSummary {
        let before = diags.len();
        let tokens = tokenize(source);

        let mut sema = SemanticAnalyzer::new(&self.config);
        let configured = self.config.library_identifiers.iter().map(String::as_str);
        for name in configured.chain(libraries.iter().map(|name| name.as_ref())) {
            sema.library_function(name);
        }

        let summary = parse_program(tokens, diags, &mut sema);

        tracing::debug!(
            tokens = summary.tokens,
            syntax_errors = summary.syntax_errors,
            diagnostics = diags.len() - before,
            "analysis finished"
        );
        summary
    }
}
