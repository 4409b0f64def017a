use regaut_lib::{
    are_equivalent, build_automaton,
    automaton::{FiniteAutomaton, minimization::Minimizable},
    format::reader::read,
    is_isomorphic,
};

fn minimal(regex: &str) -> FiniteAutomaton {
    build_automaton(regex).unwrap().determinize().minimize()
}

#[test]
fn test_isomorphism_is_an_equivalence_relation() {
    let a = minimal("(a+b)*");
    let b = minimal("(a*.b*)*");
    let c = minimal("(b+a)*.(a+b)*");

    for (x, y) in [(&a, &a), (&a, &b), (&b, &a), (&b, &c), (&a, &c), (&c, &a)] {
        assert!(is_isomorphic(x, y).is_some());
    }
}

/// Three hand-written automata for the words over `{a, b}` ending in `a`,
/// with different state names and declaration order.
fn ends_with_a_fixtures() -> [FiniteAutomaton; 3] {
    let first = read(
        r#"
        Automaton:
        Symbols: ab

        p
        q final

        ini p -a-> q
        p -b-> p
        q -a-> q
        q -b-> p
        "#,
    )
    .unwrap();

    let second = read(
        r#"
        Automaton:
        Symbols: ba

        acc final
        rej

        acc -b-> rej
        acc -a-> acc
        ini rej -b-> rej
        rej -a-> acc
        "#,
    )
    .unwrap();

    let third = read(
        r#"
        Automaton:
        Symbols: ab

        x1 final
        x0

        x1 -b-> x0
        x1 -a-> x1
        x0 -b-> x0
        ini x0 -a-> x1
        "#,
    )
    .unwrap();

    [first, second, third]
}

#[test]
fn test_isomorphism_of_fixtures_is_an_equivalence_relation() {
    let [a, b, c] = ends_with_a_fixtures();

    // reflexive
    for x in [&a, &b, &c] {
        let identity = is_isomorphic(x, x).unwrap();
        assert!(identity.iter().all(|(from, to)| from == to));
    }

    // symmetric
    for (x, y) in [(&a, &b), (&b, &c), (&a, &c)] {
        let forward = is_isomorphic(x, y).unwrap();
        let backward = is_isomorphic(y, x).unwrap();
        for (from, to) in forward.iter() {
            assert_eq!(backward.get(to), Some(from));
        }
    }

    // transitive
    let ab = is_isomorphic(&a, &b).unwrap();
    let bc = is_isomorphic(&b, &c).unwrap();
    let ac = is_isomorphic(&a, &c).unwrap();
    for (from, via) in ab.iter() {
        assert_eq!(bc.get(via), ac.get(from));
    }
    assert_eq!(
        ac.label_pairs(&a, &c),
        vec![
            ("p".to_string(), "x0".to_string()),
            ("q".to_string(), "x1".to_string())
        ]
    );

    // a fixture for a different language is related to none of them
    let ends_with_b = read(
        r#"
        Automaton:
        Symbols: ab

        p
        q final

        ini p -b-> q
        p -a-> p
        q -b-> q
        q -a-> p
        "#,
    )
    .unwrap();
    for x in [&a, &b, &c] {
        assert!(is_isomorphic(x, &ends_with_b).is_none());
    }
}

#[test]
fn test_mapping_pairs_every_reachable_state() {
    let computed = minimal("(a+b)*.a");
    let expected = read(
        r#"
        Automaton:
        Symbols: ab

        0 final
        1

        0 -a-> 0
        0 -b-> 1
        ini 1 -a-> 0
        1 -b-> 1
        "#,
    )
    .unwrap();

    let mapping = is_isomorphic(&expected, &computed).unwrap();
    assert_eq!(mapping.len(), 2);
    assert_eq!(
        mapping.label_pairs(&expected, &computed),
        vec![
            ("0".to_string(), "1".to_string()),
            ("1".to_string(), "0".to_string())
        ]
    );
}

#[test]
fn test_different_languages_are_not_isomorphic() {
    assert!(is_isomorphic(&minimal("a*"), &minimal("a.a*")).is_none());
    assert!(is_isomorphic(&minimal("a*"), &minimal("(a+b)*")).is_none());
    assert!(is_isomorphic(&minimal("a.b"), &minimal("b.a")).is_none());
    assert!(is_isomorphic(&minimal("(a.a)*"), &minimal("a*")).is_none());
}

#[test]
fn test_unminimized_automata_can_differ() {
    // same language, but the determinized automata have a different shape
    let a = build_automaton("a*").unwrap().determinize();
    let b = build_automaton("λ+a.a*").unwrap().determinize();

    assert_eq!(a.state_count(), 2);
    assert_eq!(b.state_count(), 3);
    assert!(is_isomorphic(&a, &b).is_none());
    assert!(are_equivalent(&a, &b));
}

#[test]
fn test_are_equivalent_on_nfas() {
    let a = build_automaton("(a.b)*.a").unwrap();
    let b = build_automaton("a.(b.a)*").unwrap();
    let c = build_automaton("a.(b.a)*.b").unwrap();

    assert!(are_equivalent(&a, &b));
    assert!(!are_equivalent(&a, &c));
}
