//! Syntax error recovery and termination.

use ccheck_engine::parser::{parse_program, tokenize, SemanticAnalyzer};
use ccheck_engine::{Checker, DiagnosticCode, DiagnosticReporter};

fn syntax_messages(source: &str) -> Vec<String> {
    Checker::default()
        .check(source)
        .diagnostics
        .into_iter()
        .filter(|d| d.code == DiagnosticCode::SYNTAX)
        .map(|d| d.message)
        .collect()
}

#[test]
fn test_missing_semicolon_before_if() {
    let source = "int main(){ int y = 0 if (y>0) return 1; }";
    let report = Checker::default().check(source);

    assert!(report.summary.syntax_errors >= 1);
    let first = &report.diagnostics[0];
    assert_eq!(first.code, DiagnosticCode::SYNTAX);
    assert_eq!(first.message, "syntax error: missing ';'");
    // Reported at the `if` that follows
    assert_eq!((first.line, first.col, first.length), (1, 23, 2));
}

#[test]
fn test_parse_reaches_end_of_input() {
    let mut diags = DiagnosticReporter::new();
    let mut sema = SemanticAnalyzer::default();
    let tokens = tokenize("int main(){ int y = 0 if (y>0) return 1; }");
    let count = tokens.len();

    let summary = parse_program(tokens, &mut diags, &mut sema);
    assert_eq!(summary.tokens, count);
    assert!(!diags.is_empty());
}

#[test]
fn test_errors_in_two_functions_are_independent() {
    let messages = syntax_messages(
        "int f() { int a = 1 return a; }\nint g() { int b = 2; return b }\nint h() { return 0; }",
    );
    assert_eq!(messages.len(), 2, "{:?}", messages);
}

#[test]
fn test_unterminated_function_body() {
    let report = Checker::default().check("int main() {\n  int x = 1;\n");
    assert_eq!(report.summary.syntax_errors, 1);
    assert!(report.diagnostics[0].message.contains("missing '}'"));
}

#[test]
fn test_malformed_literal_names_cause() {
    let messages = syntax_messages("int main() { char *s = \"oops\n; return 0; }");
    assert!(
        messages.iter().any(|m| m.contains("newline inside string literal")),
        "{:?}",
        messages
    );
}

#[test]
fn test_adversarial_inputs_terminate() {
    let inputs = [
        "}}}}}}",
        "((((((((",
        "int int int int",
        "if else while for return",
        "int main( { { { ",
        "int f() { for ( ; ; ) }",
        "int x = = = = ;",
        "int main() { @ # $ ` }",
        "const const * * *",
        "int main() { return return return; }",
        "int ( ) { } ;",
        "x ( x ( x (",
    ];

    for source in inputs {
        let report = Checker::default().check(source);
        assert!(
            !report.diagnostics.is_empty(),
            "expected diagnostics for {:?}",
            source
        );
    }
}

#[test]
fn test_each_statement_recovers_locally() {
    let source = r#"
        int main() {
            int a = 1
            while (a < 10 { a++; }
            if (a) { a = 0 } else a = 1;
            return a;
        }
    "#;
    let report = Checker::default().check(source);
    assert_eq!(report.summary.syntax_errors, 3, "{:?}", report.diagnostics);
    assert_eq!(report.diagnostics.len(), 3);

    let lines: Vec<u32> = report.diagnostics.iter().map(|d| d.line).collect();
    assert_eq!(lines, vec![4, 4, 5]);
}

#[test]
fn test_deep_parentheses_terminate() {
    let depth = 100_000;
    let source = format!("int x = {}1{};", "(".repeat(depth), ")".repeat(depth));
    let messages = syntax_messages(&source);
    assert_eq!(messages.len(), 1, "{:?}", &messages[..messages.len().min(5)]);
    assert!(messages[0].contains("expression nested too deeply"));

    let unbalanced = format!("int main() {{ int x = {}", "(".repeat(depth));
    assert!(!syntax_messages(&unbalanced).is_empty());
}

#[test]
fn test_deep_blocks_terminate() {
    let depth = 100_000;
    let source = format!(
        "int main() {{ {}{} return 0; }}",
        "{".repeat(depth),
        "}".repeat(depth)
    );
    let report = Checker::default().check(&source);
    assert_eq!(report.summary.syntax_errors, 1);
    assert!(report.diagnostics[0]
        .message
        .contains("statement nested too deeply"));

    let unbalanced = format!("int main() {}", "{".repeat(depth));
    assert!(!syntax_messages(&unbalanced).is_empty());
}

#[test]
fn test_deep_calls_and_conditions_terminate() {
    let depth = 50_000;
    let calls = format!("int main() {{ return {}0{}; }}", "f(".repeat(depth), ")".repeat(depth));
    let report = Checker::default().check_with_libraries(&calls, &["f"]);
    assert_eq!(report.summary.syntax_errors, 1);

    let ifs = format!("int main() {{ {}return 0; }}", "if (1) ".repeat(depth));
    let report = Checker::default().check(&ifs);
    assert_eq!(report.summary.syntax_errors, 1);
}

#[test]
fn test_prototype_keeps_following_functions() {
    let source = "int add(int a, int b);\nint main() { return add(1, 2); }";
    let report = Checker::default().check(source);
    assert_eq!(report.summary.syntax_errors, 1);
    assert_eq!(report.diagnostics.len(), 1, "{:?}", report.diagnostics);
    assert_eq!(report.diagnostics[0].message, "syntax error: missing function body");
    assert_eq!((report.diagnostics[0].line, report.diagnostics[0].col), (1, 22));
}
