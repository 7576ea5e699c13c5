use modcss::{ModcssError, NamingStrategy, ScopeConfig, ScopeError, ScopeOptions, process};

#[test]
fn test_process_prints_scoped_css() {
    let processed = process(
        ".foo { composes: bar; color: red } .bar:hover { color: blue }",
        Some("src/app.css"),
        &ScopeOptions::default(),
    )
    .unwrap();

    insta::assert_snapshot!(processed.css, @r###"
    .foo_WjnDF4 {
      color: red;
    }
    .bar_WjnDF4:hover {
      color: blue;
    }
    "###);

    let exports = processed.exports().unwrap();
    assert_eq!(exports.local("foo"), Some("foo_WjnDF4"));
    assert_eq!(exports.composes("foo")[0].name(), "bar");
}

#[test]
fn test_process_with_config_from_json() {
    let config: ScopeConfig =
        serde_json::from_str(r#"{ "naming": "short", "root": "/work/app" }"#).unwrap();
    let options = ScopeOptions::from(config);

    let processed = process(".a {} .b {}", Some("/work/app/src/app.css"), &options).unwrap();
    assert_eq!(processed.css, ".WjnDF40 {}\n.WjnDF41 {}\n");
}

#[test]
fn test_process_with_strategy() {
    let options = ScopeOptions::new().with_strategy(NamingStrategy::Short);
    let processed = process("#x {}", None, &options).unwrap();
    assert_eq!(processed.css, "#_1B2M2Y0 {}\n");
}

#[test]
fn test_process_reports_parse_errors() {
    let err = process(".a { color: red;", None, &ScopeOptions::default()).unwrap_err();
    assert!(matches!(err, ModcssError::Css(_)));
}

#[test]
fn test_process_reports_scope_errors() {
    let err = process(
        ".a .b { composes: c; }",
        Some("src/app.css"),
        &ScopeOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, ModcssError::Scope(ScopeError::ComplexSelector(_))));
    assert!(err.to_string().contains("`.a .b` at 1:1"));
}
