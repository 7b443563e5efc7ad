use automata_engine::description::{parse_list, DfaDescription};
use automata_engine::error::Error;
use automata_engine::fa::dfa::DFA;
use automata_engine::fa::simulation::DfaStep;
use automata_engine::fa::state::State;
use automata_engine::input_symbol::{epsilon, InputSymbol};
use automata_engine::language::Language;
use hashbrown::HashSet;

/// Strings over {a, b} ending in "a"
fn ends_in_a() -> DFA {
    DFA::from_parts(
        &["p0", "p1"],
        &["a", "b"],
        "p0",
        &["p1"],
        &[
            ("p0", "a", "p1"),
            ("p0", "b", "p0"),
            ("p1", "a", "p1"),
            ("p1", "b", "p0"),
        ],
    )
    .unwrap()
}

fn assert_invalid(result: Result<DFA, Error>) {
    match result {
        Err(Error::InvalidAutomatonDescription(_)) => {}
        other => panic!("expected an invalid description, got {:?}", other),
    }
}

#[test]
fn test_from_parts() {
    let dfa = ends_in_a();
    assert_eq!(dfa.num_states(), 2);
    assert_eq!(dfa.get_start_state(), &State::new("p0"));
    assert_eq!(dfa.get_accept_states(), HashSet::from([State::new("p1")]));
    assert!(dfa.is_total());
    assert!(dfa.accepts_string("ba"));
    assert!(dfa.accepts_string("aaa"));
    assert!(!dfa.accepts_string("ab"));
    assert!(!dfa.accepts_string(""));
    assert!(!dfa.accepts_string("ac"));
}

#[test]
fn test_transition_lookup() {
    let dfa = ends_in_a();
    assert_eq!(
        dfa.transition(&State::new("p0"), &InputSymbol::new("a")),
        Some(&State::new("p1"))
    );
    assert_eq!(
        dfa.transition(&State::new("p0"), &InputSymbol::new("c")),
        None
    );
    assert_eq!(
        dfa.transition(&State::new("p7"), &InputSymbol::new("a")),
        None
    );
}

#[test]
fn test_invalid_descriptions() {
    let states = ["q0", "q1"];
    let alphabet = ["a"];
    // start state not declared
    assert_invalid(DFA::from_parts(&states, &alphabet, "q9", &[], &[]));
    // final state not declared
    assert_invalid(DFA::from_parts(&states, &alphabet, "q0", &["q9"], &[]));
    // transition target not declared
    assert_invalid(DFA::from_parts(
        &states,
        &alphabet,
        "q0",
        &[],
        &[("q0", "a", "q9")],
    ));
    // transition source not declared
    assert_invalid(DFA::from_parts(
        &states,
        &alphabet,
        "q0",
        &[],
        &[("q9", "a", "q0")],
    ));
    // symbol not in the alphabet
    assert_invalid(DFA::from_parts(
        &states,
        &alphabet,
        "q0",
        &[],
        &[("q0", "b", "q1")],
    ));
    // epsilon cannot be declared
    assert_invalid(DFA::from_parts(&states, &["a", "&"], "q0", &[], &[]));
    assert_invalid(DFA::from_parts(&states, &["ε"], "q0", &[], &[]));
    // two targets for one (state, symbol) pair
    assert_invalid(DFA::from_parts(
        &states,
        &alphabet,
        "q0",
        &[],
        &[("q0", "a", "q0"), ("q0", "a", "q1")],
    ));
    // repeating an identical transition is harmless
    assert!(DFA::from_parts(
        &states,
        &alphabet,
        "q0",
        &[],
        &[("q0", "a", "q1"), ("q0", "a", "q1")],
    )
    .is_ok());
}

#[test]
fn test_check_total() {
    let partial = DFA::from_parts(
        &["q0", "q1"],
        &["a", "b"],
        "q0",
        &["q1"],
        &[("q0", "a", "q1"), ("q0", "b", "q0"), ("q1", "a", "q1")],
    )
    .unwrap();
    assert!(!partial.is_total());
    match partial.check_total() {
        Err(Error::InvalidAutomatonDescription(message)) => {
            assert!(message.contains("q1"));
            assert!(message.contains("'b'"));
        }
        other => panic!("expected a missing transition, got {:?}", other),
    }
}

#[test]
fn test_builder() {
    let mut dfa = DFA::new(State::from("x"));
    let y = State::from("y");
    dfa.add_transition(&State::new("x"), &InputSymbol::new("0"), &y)
        .unwrap();
    dfa.add_transition(&y, &InputSymbol::new("1"), &State::new("x"))
        .unwrap();
    dfa.add_accept_state(y.clone());
    assert_eq!(dfa.num_states(), 2);
    assert_eq!(dfa.alphabet.len(), 2);
    assert!(dfa.is_accepting(&y));
    assert!(!dfa.is_accepting(&State::from("x")));
    assert!(!dfa.is_accepting(&State::from("z")));
    assert!(dfa.accepts_string("0"));
    assert!(dfa.accepts_string("010"));
    assert!(!dfa.accepts_string("01"));

    dfa.set_start_state(y);
    assert!(dfa.accepts_string(""));
    assert!(dfa.accepts_string("10"));
}

#[test]
fn test_builder_rejects_epsilon_and_conflicts() {
    let x = State::from("x");
    let y = State::from("y");
    let mut dfa = DFA::new(x.clone());

    for spelling in ["ε", "&", "epsilon"] {
        assert_invalid_unit(dfa.add_transition(&x, &InputSymbol::new(spelling), &y));
    }
    assert!(dfa.alphabet.iter().all(|symbol| !symbol.is_epsilon()));
    assert_eq!(dfa.num_states(), 1, "a rejected transition adds no state");
    assert!(!dfa.accepts(&[epsilon()]));

    dfa.add_transition(&x, &InputSymbol::new("a"), &y).unwrap();
    // the same transition again is harmless
    dfa.add_transition(&x, &InputSymbol::new("a"), &y).unwrap();
    assert_invalid_unit(dfa.add_transition(&x, &InputSymbol::new("a"), &x));
    assert_eq!(
        dfa.transition(&x, &InputSymbol::new("a")),
        Some(&y),
        "the first target is kept"
    );
}

fn assert_invalid_unit(result: Result<(), Error>) {
    match result {
        Err(Error::InvalidAutomatonDescription(_)) => {}
        other => panic!("expected an invalid transition, got {:?}", other),
    }
}

#[test]
fn test_reachable_states() {
    let dfa = DFA::from_parts(
        &["q0", "q1", "q2"],
        &["a"],
        "q0",
        &["q1"],
        &[("q0", "a", "q1"), ("q1", "a", "q1"), ("q2", "a", "q0")],
    )
    .unwrap();
    assert_eq!(
        dfa.reachable_states(),
        HashSet::from([State::new("q0"), State::new("q1")])
    );
}

#[test]
fn test_run_trace() {
    let dfa = ends_in_a();
    let run = dfa.run_string("ab");
    assert!(!run.accepted);
    assert_eq!(
        run.steps,
        vec![
            DfaStep {
                symbol: InputSymbol::new("a"),
                from: State::new("p0"),
                to: Some(State::new("p1")),
            },
            DfaStep {
                symbol: InputSymbol::new("b"),
                from: State::new("p1"),
                to: Some(State::new("p0")),
            },
        ]
    );

    let run = dfa.run_string("ba");
    assert!(run.accepted);
    assert_eq!(run.steps.len(), 2);

    let run = dfa.run_string("");
    assert!(!run.accepted);
    assert!(run.steps.is_empty());
}

#[test]
fn test_run_stops_on_missing_transition() {
    let dfa = ends_in_a();
    let run = dfa.run_string("aca");
    assert!(!run.accepted);
    assert_eq!(run.steps.len(), 2);
    assert_eq!(run.steps[1].from, State::new("p1"));
    assert_eq!(run.steps[1].to, None);
}

#[test]
fn test_parse_list() {
    assert_eq!(parse_list("q0, q1 q2,,q3"), vec!["q0", "q1", "q2", "q3"]);
    assert!(parse_list("  ").is_empty());
}

#[test]
fn test_description_from_text() {
    let description =
        DfaDescription::from_text("p0, p1", "a b", " p0 ", "p1", "p0 a p1, p0 b p0, p1 a p1, p1 b p0")
            .unwrap();
    assert_eq!(description.states, vec!["p0", "p1"]);
    assert_eq!(description.start_state, "p0");
    assert_eq!(description.transitions["p0,a"], "p1");

    let dfa = DFA::try_from(&description).unwrap();
    assert!(dfa.accepts_string("bba"));
    assert!(!dfa.accepts_string("bab"));
}

#[test]
fn test_description_errors() {
    // not a triple
    assert!(matches!(
        DfaDescription::from_text("q0", "a", "q0", "", "q0 a"),
        Err(Error::InvalidAutomatonDescription(_))
    ));
    // conflicting targets
    assert!(matches!(
        DfaDescription::from_text("q0 q1", "a", "q0", "", "q0 a q0, q0 a q1"),
        Err(Error::InvalidAutomatonDescription(_))
    ));
    // undeclared target only shows up when the DFA is built
    let description = DfaDescription::from_text("q0", "a", "q0", "", "q0 a q1").unwrap();
    assert_invalid(description.to_dfa());

    let mut description = DfaDescription::from_text("q0", "a", "q0", "q0", "").unwrap();
    description
        .transitions
        .insert("q0a".to_string(), "q0".to_string());
    assert_invalid(description.to_dfa());
}

#[test]
fn test_description_json() {
    let json = r#"{
        "states": ["s", "t"],
        "alphabet": ["0", "1"],
        "start_state": "s",
        "final_states": ["t"],
        "transitions": {"s,0": "t", "s,1": "s", "t,0": "t", "t,1": "s"}
    }"#;
    let description: DfaDescription = serde_json::from_str(json).unwrap();
    let dfa = description.to_dfa().unwrap();
    assert!(dfa.accepts_string("110"));
    assert!(!dfa.accepts_string("01"));
}

#[test]
fn test_description_ignores_padding() {
    let json = r#"{
        "states": ["q0 ", " q1"],
        "alphabet": [" a"],
        "start_state": "q0 ",
        "final_states": [" q1 "],
        "transitions": {"q0 ,a": "q1 ", " q1, a ": "q0"}
    }"#;
    let description: DfaDescription = serde_json::from_str(json).unwrap();
    let dfa = description.to_dfa().unwrap();
    assert_eq!(dfa.get_start_state(), &State::new("q0"));
    assert!(dfa.is_accepting(&State::new("q1")));
    assert_eq!(dfa.alphabet, vec![InputSymbol::new("a")]);
    assert!(dfa.accepts_string("a"));
    assert!(dfa.accepts_string("aaa"));
    assert!(!dfa.accepts_string("aa"));
}

#[test]
fn test_display() {
    let text = format!("{}", ends_in_a());
    assert!(text.contains("Start State: p0"));
    assert!(text.contains("p0 -- a --> p1"));
    assert!(text.contains("p1 -- b --> p0"));
}
