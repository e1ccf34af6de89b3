//! JSON export and terminal rendering of diagnostics.

use ccheck_engine::{Checker, DiagnosticCode, DiagnosticReporter, Severity};

#[test]
fn test_json_schema() {
    let report = Checker::default().check("int main(){ z = 5; return 0; }");
    let json = report.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    let items = value["diagnostics"].as_array().unwrap();
    assert_eq!(items.len(), 1);

    let item = items[0].as_object().unwrap();
    let mut keys: Vec<&str> = item.keys().map(String::as_str).collect();
    keys.sort();
    assert_eq!(keys, vec!["code", "col", "length", "line", "message", "severity"]);

    assert_eq!(item["severity"], 1);
    assert_eq!(item["code"], "E-UNDECL");
    assert_eq!(item["line"], 1);
    assert_eq!(item["col"], 13);
    assert_eq!(item["length"], 1);
}

#[test]
fn test_json_preserves_emission_order() {
    let mut diags = DiagnosticReporter::new();
    diags.add(Severity::Info, DiagnosticCode::SYNTAX, "late", 9, 1, 1);
    diags.add(Severity::Warning, DiagnosticCode::REDECLARED, "early", 1, 1, 1);

    let value: serde_json::Value = serde_json::from_str(&diags.to_json().unwrap()).unwrap();
    assert_eq!(value["diagnostics"][0]["message"], "late");
    assert_eq!(value["diagnostics"][0]["severity"], 3);
    assert_eq!(value["diagnostics"][1]["severity"], 2);
}

#[test]
fn test_json_escapes_control_characters() {
    let mut diags = DiagnosticReporter::new();
    diags.add(
        Severity::Error,
        DiagnosticCode::SYNTAX,
        "quote \" backslash \\ newline \n bell \u{7}",
        1,
        1,
        1,
    );

    let json = diags.to_json().unwrap();
    assert!(json.contains(r#"quote \" backslash \\ newline \n bell \u0007"#));
}

#[test]
fn test_clean_report_json() {
    let report = Checker::default().check("int main() { return 0; }");
    let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(value, serde_json::json!({ "diagnostics": [] }));
}

#[test]
fn test_render_points_at_source() {
    let source = "int count;\nint main() {\n  count1 = 2;\n  return count;\n}\n";
    let report = Checker::default().check(source);

    let text = report.render("sample.c", source).unwrap();
    assert!(text.contains("error[E-UNDECL]"), "{}", text);
    assert!(text.contains("sample.c:3:3"), "{}", text);
    assert!(text.contains("count1 = 2;"), "{}", text);
    assert!(text.contains("'count'"), "{}", text);
}

#[test]
fn test_render_warning_and_end_of_input() {
    let source = "int x; int x;\nint main() {";
    let report = Checker::default().check(source);

    let text = report.render("open.c", source).unwrap();
    assert!(text.contains("warning[W-REDECL]"), "{}", text);
    assert!(text.contains("missing '}'"), "{}", text);
}

#[test]
fn test_clear_resets_reporter() {
    let mut diags = DiagnosticReporter::new();
    Checker::default().check_into("int main() { y = 1; return 0; }", &[] as &[&str], &mut diags);
    assert_eq!(diags.error_count(), 1);

    diags.clear();
    assert!(diags.all().is_empty());
    assert_eq!(diags.to_json().unwrap(), "{\n  \"diagnostics\": []\n}");
}

#[test]
fn test_render_includes_literal_hint() {
    let source = "int main() { int x = 0x; return x; }\n";
    let report = Checker::default().check(source);
    assert_eq!(report.summary.syntax_errors, 1, "{:?}", report.diagnostics);

    let text = report.render("hex.c", source).unwrap();
    assert!(text.contains("no digits after '0x'"), "{}", text);
    assert!(text.contains("help: write at least one hex digit"), "{}", text);

    let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert!(value["diagnostics"][0].get("hint").is_none());
}
