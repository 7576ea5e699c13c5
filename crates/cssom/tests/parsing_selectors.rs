//! Integration tests for selector parsing and stringification.
//!
//! - Simple selectors: type, class, ID, universal, attribute
//! - Compound selectors: `a.b#c:hover`
//! - Combinators: descendant, `>`, `+`, `~`
//! - Pseudo arguments: opaque text vs. nested selectors
//! - Selector lists and round-tripping
//! - Relative selectors: `> img`, `:has(+ p)`
//! - Grammar errors

use cssom::{Attribute, Pseudo, Selector, parse_relative_selector, parse_selector};

fn compound(parts: Vec<Selector>) -> Selector {
    Selector::Compound(parts)
}

// ============================================================================
// SIMPLE SELECTORS
// ============================================================================

#[test]
fn test_class_selector_simple() {
    let selector = parse_selector(".primary").unwrap();
    assert_eq!(selector, compound(vec![Selector::class("primary")]));
}

#[test]
fn test_id_selector_simple() {
    let selector = parse_selector("#sidebar").unwrap();
    assert_eq!(selector, compound(vec![Selector::id("sidebar")]));
}

#[test]
fn test_type_and_universal() {
    assert_eq!(
        parse_selector("button").unwrap(),
        compound(vec![Selector::Type("button".to_string())])
    );
    assert_eq!(parse_selector("*").unwrap(), compound(vec![Selector::Universal]));
}

#[test]
fn test_attribute_selectors() {
    assert_eq!(
        parse_selector("[disabled]").unwrap(),
        compound(vec![Selector::Attribute(Attribute {
            name: "disabled".to_string(),
            operator: None,
            value: None,
        })])
    );
    assert_eq!(
        parse_selector("a[href^=\"https\"]").unwrap(),
        compound(vec![
            Selector::Type("a".to_string()),
            Selector::Attribute(Attribute {
                name: "href".to_string(),
                operator: Some("^=".to_string()),
                value: Some("\"https\"".to_string()),
            }),
        ])
    );
}

#[test]
fn test_escaped_class_name() {
    let selector = parse_selector(r".md\:flex").unwrap();
    assert_eq!(selector, compound(vec![Selector::class(r"md\:flex")]));
    assert_eq!(selector.to_string(), r".md\:flex");
}

#[test]
fn test_hex_escape_swallows_its_terminating_space() {
    let selector = parse_selector(r".\31 0 span").unwrap();
    assert_eq!(
        selector,
        Selector::complex(
            compound(vec![Selector::class(r"\31 0")]),
            " ",
            compound(vec![Selector::Type("span".to_string())]),
        )
    );
    assert_eq!(selector.to_string(), r".\31 0 span");
}

// ============================================================================
// COMPOUND SELECTORS
// ============================================================================

#[test]
fn test_compound_keeps_part_order() {
    let selector = parse_selector("a.link#home:hover::before").unwrap();
    assert_eq!(
        selector,
        compound(vec![
            Selector::Type("a".to_string()),
            Selector::class("link"),
            Selector::id("home"),
            Selector::PseudoClass(Pseudo::new("hover")),
            Selector::PseudoElement(Pseudo::new("before")),
        ])
    );
}

// ============================================================================
// COMBINATORS
// ============================================================================

#[test]
fn test_descendant_combinator() {
    let selector = parse_selector(".a .b").unwrap();
    assert_eq!(
        selector,
        Selector::complex(
            compound(vec![Selector::class("a")]),
            " ",
            compound(vec![Selector::class("b")]),
        )
    );
}

#[test]
fn test_combinators_are_left_associative() {
    let selector = parse_selector(".a > .b+.c").unwrap();
    assert_eq!(
        selector,
        Selector::complex(
            Selector::complex(
                compound(vec![Selector::class("a")]),
                " > ",
                compound(vec![Selector::class("b")]),
            ),
            "+",
            compound(vec![Selector::class("c")]),
        )
    );
}

#[test]
fn test_general_sibling_combinator() {
    let selector = parse_selector("h1 ~ p").unwrap();
    match selector {
        Selector::Complex { combinator, .. } => assert_eq!(combinator, " ~ "),
        other => panic!("expected complex selector, got {other:?}"),
    }
}

// ============================================================================
// PSEUDO ARGUMENTS
// ============================================================================

#[test]
fn test_opaque_pseudo_argument() {
    let selector = parse_selector("li:nth-child(2n+1)").unwrap();
    let Selector::Compound(parts) = selector else {
        panic!("expected compound");
    };
    assert_eq!(
        parts[1],
        Selector::PseudoClass(Pseudo {
            name: "nth-child".to_string(),
            argument: Some("2n+1".to_string()),
            selector: None,
        })
    );
}

#[test]
fn test_selector_pseudo_argument_is_parsed() {
    let selector = parse_selector(":global(.a .b)").unwrap();
    let Selector::Compound(parts) = selector else {
        panic!("expected compound");
    };
    let Selector::PseudoClass(pseudo) = &parts[0] else {
        panic!("expected pseudo-class");
    };
    assert_eq!(pseudo.name, "global");
    assert_eq!(pseudo.argument.as_deref(), Some(".a .b"));
    assert_eq!(
        pseudo.selector.as_deref(),
        Some(&Selector::complex(
            compound(vec![Selector::class("a")]),
            " ",
            compound(vec![Selector::class("b")]),
        ))
    );
}

#[test]
fn test_nested_pseudo_list_argument() {
    let selector = parse_selector(":not(.a, .b)").unwrap();
    let Selector::Compound(parts) = selector else {
        panic!("expected compound");
    };
    let Selector::PseudoClass(pseudo) = &parts[0] else {
        panic!("expected pseudo-class");
    };
    assert!(matches!(pseudo.selector.as_deref(), Some(Selector::List(items)) if items.len() == 2));
}

#[test]
fn test_has_argument_may_start_with_combinator() {
    let selector = parse_selector(".card:has(> img)").unwrap();
    let Selector::Compound(parts) = &selector else {
        panic!("expected compound");
    };
    let Selector::PseudoClass(pseudo) = &parts[1] else {
        panic!("expected pseudo-class");
    };
    assert_eq!(
        pseudo.selector.as_deref(),
        Some(&Selector::relative(
            "> ",
            compound(vec![Selector::Type("img".to_string())])
        ))
    );
    assert_eq!(selector.to_string(), ".card:has(> img)");
}

#[test]
fn test_relative_selector_list() {
    let selector = parse_relative_selector("~ .a,  .b").unwrap();
    let Selector::List(items) = &selector else {
        panic!("expected list");
    };
    assert!(matches!(&items[0], Selector::Relative { combinator, .. } if combinator == "~ "));
    assert_eq!(items[1], compound(vec![Selector::class("b")]));
    assert_eq!(selector.to_string(), "~ .a,.b");
}

#[test]
fn test_bare_and_empty_scope_pseudos() {
    let bare = parse_selector(":local").unwrap();
    assert_eq!(bare, compound(vec![Selector::PseudoClass(Pseudo::new("local"))]));

    let empty = parse_selector(":local()").unwrap();
    assert_eq!(
        empty,
        compound(vec![Selector::PseudoClass(Pseudo {
            name: "local".to_string(),
            argument: Some(String::new()),
            selector: None,
        })])
    );
}

// ============================================================================
// LISTS AND ROUND TRIPS
// ============================================================================

#[test]
fn test_selector_list() {
    let selector = parse_selector(".a, #b").unwrap();
    assert_eq!(
        selector,
        Selector::List(vec![
            compound(vec![Selector::class("a")]),
            compound(vec![Selector::id("b")]),
        ])
    );
    assert_eq!(selector.branches().len(), 2);
}

#[test]
fn test_round_trip_preserves_text() {
    let inputs = [
        ".a",
        "#main",
        "ul > li.item:not(.done)",
        "a[target=_blank]:hover::after",
        ".a .b ~ .c + .d",
        ":global(.foo) .bar",
        "li:nth-child(2n + 1)",
        "input[type=\"checkbox\" i]",
        "::slotted(span)",
    ];
    for input in inputs {
        let selector = parse_selector(input).unwrap();
        assert_eq!(selector.to_string(), input, "round trip of {input}");
    }
}

#[test]
fn test_round_trip_normalizes_list_separators() {
    let selector = parse_selector("  .a ,\n  .b  ").unwrap();
    assert_eq!(selector.to_string(), ".a,.b");
}

// ============================================================================
// ERRORS
// ============================================================================

#[test]
fn test_rejects_empty_selector() {
    assert!(parse_selector("").is_err());
    assert!(parse_selector("   ").is_err());
}

#[test]
fn test_rejects_dangling_combinator() {
    let err = parse_selector(".a >").unwrap_err();
    assert_eq!(err.offset, 4);
}

#[test]
fn test_leading_combinator_needs_relative_context() {
    let err = parse_selector("> .a").unwrap_err();
    assert_eq!(err.offset, 0);
    assert!(parse_selector(":not(> .a)").is_err());
    assert!(parse_relative_selector("> ").is_err());
}

#[test]
fn test_rejects_empty_list_branch() {
    assert!(parse_selector(".a,").is_err());
    assert!(parse_selector(".a,,.b").is_err());
}

#[test]
fn test_rejects_unbalanced_brackets() {
    assert!(parse_selector(":not(.a").is_err());
    assert!(parse_selector("[href").is_err());
    assert!(parse_selector(".a)").is_err());
}

#[test]
fn test_rejects_trailing_garbage() {
    let err = parse_selector(".a !").unwrap_err();
    assert_eq!(err.offset, 3);
}

#[test]
fn test_nested_argument_errors_propagate() {
    assert!(parse_selector(":global(.a,)").is_err());
    assert!(parse_selector(":not(>)").is_err());
}
