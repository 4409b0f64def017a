mod common;

use regaut_lib::{
    accepts, build_automaton,
    regex::{ParseErrorKind, Regex, parser::parse},
};

#[test]
fn test_build_automaton() {
    let nfa = build_automaton("a.(b+c)*").unwrap();

    assert!(accepts(&nfa, "a"));
    assert!(accepts(&nfa, "abcbc"));
    assert!(!accepts(&nfa, ""));
    assert!(!accepts(&nfa, "ba"));
    assert!(!accepts(&nfa, "ad"));
}

#[test]
fn test_labels_follow_construction_order() {
    let a = build_automaton("(a+b)*.a").unwrap();
    let b = build_automaton("(a+b)*.a").unwrap();

    assert_eq!(a.state_count(), 9);
    assert_eq!(a.label(a.get_initial()), "s5");

    let labels = |nfa: &regaut_lib::automaton::FiniteAutomaton| {
        nfa.states().map(|s| nfa.label(s).to_string()).collect::<Vec<_>>()
    };
    assert_eq!(labels(&a), labels(&b));
    assert_eq!(labels(&a)[8], "s8");
}

#[test]
fn test_empty_word_literal() {
    let nfa = build_automaton("a.λ.b").unwrap();
    assert!(accepts(&nfa, "ab"));
    assert!(!accepts(&nfa, "a"));

    let nfa = build_automaton("λ*").unwrap();
    assert!(accepts(&nfa, ""));
    assert!(!accepts(&nfa, "λ"));
}

#[test]
fn test_whitespace_is_a_symbol() {
    let nfa = build_automaton("a. .b").unwrap();
    assert!(accepts(&nfa, "a b"));
    assert!(!accepts(&nfa, "ab"));
}

#[test]
fn test_parse_errors_report_position() {
    let error = build_automaton("(a+b.c").unwrap_err();
    assert_eq!(error.kind, ParseErrorKind::UnbalancedParenthesis);
    assert_eq!(error.position, 0);
    assert_eq!(error.to_string(), "unbalanced parenthesis at position 0");

    let error = build_automaton("a.b+").unwrap_err();
    assert_eq!(error.kind, ParseErrorKind::MissingOperand('+'));
    assert_eq!(error.position, 3);

    let error = build_automaton("").unwrap_err();
    assert_eq!(error.kind, ParseErrorKind::EmptyExpression);
}

#[test]
fn test_display_parses_back() {
    let mut r = common::rng(7);

    for _ in 0..200 {
        let regex = common::random_regex(&mut r, 5);
        let printed = regex.to_string();
        let parsed: Regex = printed.parse().unwrap();
        assert_eq!(parsed, regex, "{printed}");
    }
}

#[test]
fn test_nested_groups() {
    let regex = parse("((((a))))*.((b))").unwrap();
    assert_eq!(regex, Regex::symbol('a').star().concat(Regex::symbol('b')));
}

#[test]
fn test_deeply_nested_groups_are_rejected() {
    let depth = 10_000;
    let input = format!("{}a{}", "(".repeat(depth), ")".repeat(depth));

    let error = build_automaton(&input).unwrap_err();
    assert_eq!(error.kind, ParseErrorKind::NestingTooDeep);

    let input = format!("{}a.b{}*", "(".repeat(200), ")".repeat(200));
    let nfa = build_automaton(&input).unwrap();
    assert!(accepts(&nfa, "abab"));
}
