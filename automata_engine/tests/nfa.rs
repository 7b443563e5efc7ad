use automata_engine::fa::nfa::NFA;
use automata_engine::fa::simulation::TraceStep;
use automata_engine::fa::state::State;
use automata_engine::input_symbol::{epsilon, InputSymbol};
use automata_engine::language::Language;
use automata_engine::regex::compile;
use hashbrown::HashSet;

fn states(names: &[&str]) -> Vec<State> {
    names.iter().map(|n| State::new(n)).collect()
}

/// s --a--> t --ε--> u, u accepting
fn small_nfa() -> NFA {
    let s = State::new("s");
    let t = State::new("t");
    let u = State::new("u");
    let mut nfa = NFA::new(s.clone());
    nfa.add_transition(&s, &InputSymbol::new("a"), &t);
    nfa.add_transition(&t, &epsilon(), &u);
    nfa.add_accept_state(u);
    nfa
}

#[test]
fn test_build_nfa() {
    let nfa = small_nfa();
    assert_eq!(nfa.num_states(), 3);
    assert_eq!(nfa.alphabet, vec![InputSymbol::new("a")]);
    assert_eq!(nfa.get_start_state(), &State::new("s"));
    assert_eq!(nfa.get_accept_states(), HashSet::from([State::new("u")]));
}

#[test]
fn test_transition_lookup() {
    let nfa = small_nfa();
    assert_eq!(
        nfa.transition(&State::new("s"), &InputSymbol::new("a")),
        HashSet::from([State::new("t")])
    );
    assert!(nfa
        .transition(&State::new("t"), &InputSymbol::new("a"))
        .is_empty());
    assert!(nfa
        .transition(&State::new("s"), &InputSymbol::new("z"))
        .is_empty());
    assert_eq!(
        nfa.epsilon_transition(&State::new("t")),
        HashSet::from([State::new("u")])
    );
    assert!(nfa.epsilon_transition(&State::new("missing")).is_empty());
}

#[test]
fn test_epsilon_closure() {
    let nfa = compile("a*").unwrap();
    // q2 is the star's start: it reaches its end q3 and the literal's start q0
    let closure = nfa.epsilon_closure(&HashSet::from([State::new("q2")]));
    assert_eq!(
        closure,
        HashSet::from([State::new("q2"), State::new("q3"), State::new("q0")])
    );

    let closure = nfa.epsilon_closure(&HashSet::from([State::new("q0")]));
    assert_eq!(closure, HashSet::from([State::new("q0")]));

    assert!(nfa.epsilon_closure(&HashSet::new()).is_empty());
}

#[test]
fn test_simulation_trace() {
    let nfa = compile("ab").unwrap();
    let simulation = nfa.simulate_string("ab");
    assert!(simulation.accepted);
    assert_eq!(
        simulation.trace,
        vec![
            TraceStep {
                states: states(&["q0"]),
                symbol: None,
            },
            TraceStep {
                states: states(&["q1", "q2"]),
                symbol: Some(InputSymbol::new("a")),
            },
            TraceStep {
                states: states(&["q3"]),
                symbol: Some(InputSymbol::new("b")),
            },
        ]
    );
}

#[test]
fn test_simulation_rejects_outside_alphabet() {
    let nfa = compile("ab").unwrap();
    let simulation = nfa.simulate_string("ac");
    assert!(!simulation.accepted);
    // the trace stops after the last successful step
    assert_eq!(simulation.trace.len(), 2);
    assert_eq!(simulation.trace[1].symbol, Some(InputSymbol::new("a")));
}

#[test]
fn test_simulation_rejects_dead_end() {
    let nfa = compile("ab").unwrap();
    let simulation = nfa.simulate_string("ba");
    assert!(!simulation.accepted);
    assert_eq!(simulation.trace.len(), 1);
    assert_eq!(simulation.trace[0].symbol, None);
}

#[test]
fn test_simulation_rejects_at_end() {
    let nfa = compile("ab").unwrap();
    let simulation = nfa.simulate_string("a");
    assert!(!simulation.accepted);
    assert_eq!(simulation.trace.len(), 2);
}

#[test]
fn test_simulation_empty_input() {
    let nfa = compile("a*").unwrap();
    let simulation = nfa.simulate_string("");
    assert!(simulation.accepted);
    assert_eq!(simulation.trace.len(), 1);
    assert_eq!(simulation.trace[0].states, states(&["q2", "q3", "q0"]));
}

#[test]
fn test_language_trait() {
    let nfa = small_nfa();
    assert!(nfa.accepts(&[InputSymbol::new("a")]));
    assert!(!nfa.accepts(&[]));
    assert!(!nfa.accepts_string("aa"));
}

#[test]
fn test_compile_does_not_share_state() {
    // two compilations of the same regex give identical, independent automata
    let first = compile("(a|b)*").unwrap();
    let second = compile("(a|b)*").unwrap();
    assert_eq!(first.describe(), second.describe());
    assert_eq!(first.simulate_string("abba"), second.simulate_string("abba"));
}

#[test]
fn test_display() {
    let text = format!("{}", small_nfa());
    assert!(text.contains("s -- a --> t"));
    assert!(text.contains("t -- ε --> u"));
}
