use thompson_compiler::*;
use thompson_runtime::*;

#[test]
fn should_accept_star_followed_by_literal() {
    let nfa = compile("a*b").unwrap();
    let input_output = [
        ("b", true),
        ("ab", true),
        ("aaab", true),
        ("", false),
        ("a", false),
        ("ba", false),
        ("abb", false),
    ];

    for (test_id, (input, expected)) in input_output.into_iter().enumerate() {
        assert_eq!((test_id, expected), (test_id, accepts(&nfa, input)))
    }
}

#[test]
fn should_accept_nested_repetition_around_fixed_infix() {
    let nfa = compile("(a|b*)*abb(a|b)*").unwrap();
    let input_output = [
        ("babbba", true),
        ("abb", true),
        ("aabbb", true),
        ("ab", false),
        ("", false),
        ("bbbb", false),
    ];

    for (test_id, (input, expected)) in input_output.into_iter().enumerate() {
        assert_eq!((test_id, expected), (test_id, accepts(&nfa, input)))
    }
}

#[test]
fn should_accept_optional_groups() {
    let nfa = compile("0?(1?)?0*").unwrap();
    let input_output = [
        ("0100", true),
        ("", true),
        ("1", true),
        ("000", true),
        ("11", false),
        ("0101", false),
    ];

    for (test_id, (input, expected)) in input_output.into_iter().enumerate() {
        assert_eq!((test_id, expected), (test_id, accepts(&nfa, input)))
    }
}

#[test]
fn should_accept_only_empty_input_for_epsilon() {
    let nfa = compile("ε").unwrap();

    assert!(accepts(&nfa, ""));
    assert!(!accepts(&nfa, "a"));
    assert!(!accepts(&nfa, "ε"));
}

#[test]
fn should_fail_unbalanced_pattern_without_building() {
    assert_eq!(
        Err(CompileError::Parse(ParseError::UnbalancedParens {
            position: 0
        })),
        compile("(")
    );
}

#[test]
fn should_isolate_failures_within_a_batch() {
    let patterns = ["a*b", "(", "*a", "a|b"];
    let compiled = patterns.iter().map(|p| compile(p)).collect::<Vec<_>>();

    assert!(compiled[1].is_err());
    assert!(matches!(
        compiled[2],
        Err(CompileError::Build(BuildError::MalformedExpression { .. }))
    ));

    let a_star_b = compiled[0].as_ref().unwrap();
    let a_or_b = compiled[3].as_ref().unwrap();
    assert!(accepts(a_star_b, "aab"));
    assert!(accepts(a_or_b, "b"));
    assert!(!accepts(a_or_b, "ab"));
}

#[test]
fn should_share_automaton_between_threads() {
    let nfa = compile("(a|b)*abb").unwrap();
    let inputs = ["abb", "aabb", "babb", "ab", "", "abba"];

    let results = std::thread::scope(|s| {
        let handles = inputs
            .iter()
            .map(|input| {
                let nfa = &nfa;
                s.spawn(move || accepts(nfa, input))
            })
            .collect::<Vec<_>>();

        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect::<Vec<_>>()
    });

    assert_eq!(vec![true, true, true, false, false, false], results);
}

#[test]
fn should_expose_structure_of_built_automaton() {
    let nfa = compile("a|b").unwrap();
    let id = StateId::from;

    assert_eq!(6, nfa.len());
    assert_eq!((id(4), id(5)), (nfa.start(), nfa.accept()));
    assert_eq!(0, nfa[nfa.accept()].edges().count());
    assert_eq!(
        vec![id(0), id(2)],
        nfa[nfa.start()].epsilon_targets().collect::<Vec<_>>()
    );

    let literal_edges = nfa
        .transitions()
        .filter(|t| !t.symbol.is_epsilon())
        .map(|t| t.to_string())
        .collect::<Vec<_>>();
    assert_eq!(vec!["0000: a -> 0001", "0002: b -> 0003"], literal_edges);
}

#[test]
fn should_agree_between_simulator_and_closure_primitives() {
    let nfa = compile("(ab)+").unwrap();

    let mut current = epsilon_closure(&nfa, &[nfa.start()].into_iter().collect());
    for c in "abab".chars() {
        current = epsilon_closure(&nfa, &r#move(&nfa, &current, Symbol::Literal(c)));
    }

    assert!(current.contains(&nfa.accept()));
    assert!(accepts(&nfa, "abab"));
}
