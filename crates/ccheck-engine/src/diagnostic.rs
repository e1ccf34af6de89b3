//! Diagnostic collection and output
//!
//! Every stage reports through a [`DiagnosticReporter`]: an append-only list
//! of [`DiagnosticItem`]s in emission order. The list can be exported as JSON
//! for editor integration or rendered with source context for terminals.

use std::ops::Range;

use codespan_reporting::diagnostic::{Diagnostic as CsDiagnostic, Label, Severity as CsSeverity};
use codespan_reporting::files::SimpleFile;
use codespan_reporting::term;
use serde::{Serialize, Serializer};
use termcolor::{Buffer, ColorChoice, StandardStream};

use crate::parser::token::{Token, TokenKind};

/// Severity of a diagnostic. Serialized as its numeric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    Error = 1,
    Warning = 2,
    Info = 3,
}

impl Serialize for Severity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

impl Severity {
    fn to_codespan(self) -> CsSeverity {
        match self {
            Severity::Error => CsSeverity::Error,
            Severity::Warning => CsSeverity::Warning,
            Severity::Info => CsSeverity::Note,
        }
    }
}

/// Stable short identifier of a diagnostic (e.g. "E-SYN")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DiagnosticCode(pub &'static str);

impl DiagnosticCode {
    /// Expected token, keyword or operand missing
    pub const SYNTAX: DiagnosticCode = DiagnosticCode("E-SYN");
    /// Name used without a reachable declaration
    pub const UNDECLARED: DiagnosticCode = DiagnosticCode("E-UNDECL");
    /// Name declared twice in one scope (warning form)
    pub const REDECLARED: DiagnosticCode = DiagnosticCode("W-REDECL");
    /// Name declared twice in one scope (denied form)
    pub const REDECLARED_DENIED: DiagnosticCode = DiagnosticCode("E-REDECL");
    /// `void` function returns a value
    pub const RETURN_VALUE_IN_VOID: DiagnosticCode = DiagnosticCode("E-RETVOID");
    /// Non-`void` function returns nothing
    pub const RETURN_WITHOUT_VALUE: DiagnosticCode = DiagnosticCode("E-RETEMPTY");
    /// `break`/`continue` outside a loop
    pub const LOOP_CONTROL: DiagnosticCode = DiagnosticCode("E-LOOPCTL");

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

/// One reported problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticItem {
    pub severity: Severity,
    pub code: DiagnosticCode,
    pub message: String,
    /// 1-based line
    pub line: u32,
    /// 1-based column
    pub col: u32,
    /// Length in characters
    pub length: u32,
    /// Replacement name offered for an undeclared identifier
    #[serde(skip)]
    pub suggestion: Option<String>,
    /// How to fix a malformed literal
    #[serde(skip)]
    pub hint: Option<&'static str>,
}

impl DiagnosticItem {
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    diagnostics: &'a [DiagnosticItem],
}

/// Append-only sink of diagnostics for one analysis run.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticReporter {
    items: Vec<DiagnosticItem>,
}

impl DiagnosticReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one diagnostic.
    pub fn add(
        &mut self,
        severity: Severity,
        code: DiagnosticCode,
        message: impl Into<String>,
        line: u32,
        col: u32,
        length: u32,
    ) {
        self.items.push(DiagnosticItem {
            severity,
            code,
            message: message.into(),
            line,
            col,
            length,
            suggestion: None,
            hint: None,
        });
    }

    /// Append a diagnostic located at `token`.
    pub fn add_at(
        &mut self,
        severity: Severity,
        code: DiagnosticCode,
        message: impl Into<String>,
        token: &Token,
    ) {
        self.add(
            severity,
            code,
            message,
            token.line(),
            token.column(),
            token.length,
        );
    }

    /// Report a syntax error at `token`. When the token is a malformed
    /// literal its cause is appended and its fix kept as a hint.
    pub fn syntax(&mut self, message: &str, token: &Token) {
        let TokenKind::Error(err) = token.kind else {
            self.add_at(
                Severity::Error,
                DiagnosticCode::SYNTAX,
                format!("syntax error: {}", message),
                token,
            );
            return;
        };

        self.add_at(
            Severity::Error,
            DiagnosticCode::SYNTAX,
            format!("syntax error: {} ({})", message, err),
            token,
        );
        if let Some(last) = self.items.last_mut() {
            last.hint = Some(err.hint());
        }
    }

    pub fn undeclared(&mut self, token: &Token, suggestion: Option<String>) {
        let mut message = format!("'{}' is not declared", token.lexeme);
        if let Some(name) = &suggestion {
            message.push_str(&format!(". Did you mean '{}'?", name));
        }
        self.add_at(Severity::Error, DiagnosticCode::UNDECLARED, message, token);
        if let Some(last) = self.items.last_mut() {
            last.suggestion = suggestion;
        }
    }

    pub fn redeclaration(&mut self, token: &Token, deny: bool) {
        let (severity, code) = if deny {
            (Severity::Error, DiagnosticCode::REDECLARED_DENIED)
        } else {
            (Severity::Warning, DiagnosticCode::REDECLARED)
        };
        self.add_at(
            severity,
            code,
            format!("'{}' is already declared in this scope", token.lexeme),
            token,
        );
    }

    /// All diagnostics in emission order.
    pub fn all(&self) -> &[DiagnosticItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<DiagnosticItem> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn error_count(&self) -> usize {
        self.items.iter().filter(|d| d.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.items
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }

    /// Count of diagnostics carrying `code`.
    pub fn count_code(&self, code: DiagnosticCode) -> usize {
        self.items.iter().filter(|d| d.code == code).count()
    }

    /// Convert to JSON representation for IDE integration
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        items_to_json(&self.items)
    }

    /// Render every diagnostic with source context, without colors.
    pub fn render(
        &self,
        file_name: &str,
        source: &str,
    ) -> Result<String, codespan_reporting::files::Error> {
        render_items(&self.items, file_name, source)
    }

    /// Emit every diagnostic to stderr
    pub fn emit_to_stderr(
        &self,
        file_name: &str,
        source: &str,
        color: ColorChoice,
    ) -> Result<(), codespan_reporting::files::Error> {
        let file = SimpleFile::new(file_name, source);
        let mut writer = StandardStream::stderr(color);
        let config = term::Config::default();
        for item in &self.items {
            term::emit(&mut writer, &config, &file, &to_codespan(item, source))?;
        }
        Ok(())
    }
}

/// `{"diagnostics": [...]}` for a slice of items.
pub fn items_to_json(items: &[DiagnosticItem]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonReport { diagnostics: items })
}

/// Render `items` against `source` into a plain string.
pub fn render_items(
    items: &[DiagnosticItem],
    file_name: &str,
    source: &str,
) -> Result<String, codespan_reporting::files::Error> {
    let file = SimpleFile::new(file_name, source);
    let mut buffer = Buffer::no_color();
    let config = term::Config::default();
    for item in items {
        term::emit(&mut buffer, &config, &file, &to_codespan(item, source))?;
    }
    Ok(String::from_utf8_lossy(buffer.as_slice()).into_owned())
}

fn to_codespan(item: &DiagnosticItem, source: &str) -> CsDiagnostic<()> {
    let range = byte_range(source, item.line, item.col, item.length);
    let mut diag = CsDiagnostic::new(item.severity.to_codespan())
        .with_code(item.code.as_str())
        .with_message(item.message.clone())
        .with_labels(vec![Label::primary((), range)]);
    let mut notes = Vec::new();
    if let Some(name) = &item.suggestion {
        notes.push(format!("help: a declaration named '{}' exists", name));
    }
    if let Some(hint) = item.hint {
        notes.push(format!("help: {}", hint));
    }
    if !notes.is_empty() {
        diag = diag.with_notes(notes);
    }
    diag
}

/// Convert a 1-based line/column and a character length into a byte range,
/// clamped to the source.
fn byte_range(source: &str, line: u32, col: u32, length: u32) -> Range<usize> {
    let line_start = source
        .split_inclusive('\n')
        .take(line.saturating_sub(1) as usize)
        .map(str::len)
        .sum::<usize>()
        .min(source.len());

    let advance = |from: usize, chars: usize| -> usize {
        source[from..]
            .char_indices()
            .nth(chars)
            .map_or(source.len(), |(offset, _)| from + offset)
    };

    let start = advance(line_start, col.saturating_sub(1) as usize);
    let end = advance(start, length as usize);
    start..end
}
