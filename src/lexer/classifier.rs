//! Keyword / reserved word / noise word matcher.
//!
//! The vocabulary is compiled once into a deterministic automaton whose states are
//! plain data: every state owns a sorted list of `(byte, next state)` transitions and
//! an optional accepting class. A word is accepted only when the whole case-folded
//! word walks from the start state to an accepting state; any missing transition or
//! trailing input leaves it an identifier.

use lazy_static::lazy_static;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordClass {
    Identifier,
    Keyword,
    Reserved,
    Noise,
}

impl Display for WordClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// The fixed SIMPLE vocabulary. Datatype names are listed as keywords here; the
/// scanner gives them their own token kind before consulting the automaton.
pub const VOCABULARY: &[(&str, WordClass)] = &[
    ("let", WordClass::Keyword),
    ("local", WordClass::Keyword),
    ("store", WordClass::Keyword),
    ("show", WordClass::Keyword),
    ("string", WordClass::Keyword),
    ("secure", WordClass::Keyword),
    ("int", WordClass::Keyword),
    ("if", WordClass::Keyword),
    ("float", WordClass::Keyword),
    ("char", WordClass::Keyword),
    ("collection", WordClass::Keyword),
    ("text", WordClass::Keyword),
    ("time", WordClass::Keyword),
    ("timestamp", WordClass::Keyword),
    ("try", WordClass::Keyword),
    ("do", WordClass::Keyword),
    ("to do", WordClass::Keyword),
    ("bool", WordClass::Keyword),
    ("date", WordClass::Keyword),
    ("array", WordClass::Keyword),
    ("get", WordClass::Keyword),
    ("global", WordClass::Keyword),
    ("else", WordClass::Keyword),
    ("end", WordClass::Keyword),
    ("next", WordClass::Keyword),
    ("return", WordClass::Keyword),
    ("handle", WordClass::Keyword),
    ("system", WordClass::Reserved),
    ("object", WordClass::Reserved),
    ("main", WordClass::Reserved),
    ("error", WordClass::Reserved),
    ("null", WordClass::Reserved),
    ("for", WordClass::Reserved),
    ("please", WordClass::Noise),
    ("then", WordClass::Noise),
    ("to", WordClass::Noise),
];

pub type StateId = usize;

#[derive(Debug, Clone, Default)]
struct State {
    transitions: Vec<(u8, StateId)>,
    accept: Option<WordClass>,
}

#[derive(Debug, Clone)]
pub struct Dfa {
    states: Vec<State>,
}

impl Dfa {
    pub const START: StateId = 0;

    /// Builds the automaton from `(word, class)` pairs. Words are folded to lowercase.
    pub fn build(vocabulary: &[(&str, WordClass)]) -> Dfa {
        let mut dfa = Dfa {
            states: vec![State::default()],
        };

        for (word, class) in vocabulary {
            let mut state = Dfa::START;
            for byte in word.bytes().map(|b| b.to_ascii_lowercase()) {
                state = match dfa.step(state, byte) {
                    Some(next) => next,
                    None => dfa.add_transition(state, byte),
                };
            }
            debug_assert!(
                dfa.states[state].accept.is_none(),
                "duplicate vocabulary entry {:?}",
                word
            );
            dfa.states[state].accept = Some(*class);
        }

        dfa
    }

    fn add_transition(&mut self, from: StateId, byte: u8) -> StateId {
        let next = self.states.len();
        self.states.push(State::default());

        let transitions = &mut self.states[from].transitions;
        let at = transitions.partition_point(|(b, _)| *b < byte);
        transitions.insert(at, (byte, next));

        next
    }

    pub fn step(&self, state: StateId, byte: u8) -> Option<StateId> {
        let transitions = &self.states.get(state)?.transitions;
        transitions
            .binary_search_by_key(&byte, |(b, _)| *b)
            .ok()
            .map(|i| transitions[i].1)
    }

    pub fn accepting(&self, state: StateId) -> Option<WordClass> {
        self.states.get(state).and_then(|s| s.accept)
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Runs a whole word, folding ASCII case as it goes.
    pub fn run(&self, word: &str) -> WordClass {
        let mut state = Dfa::START;

        for byte in word.bytes() {
            match self.step(state, byte.to_ascii_lowercase()) {
                Some(next) => state = next,
                None => return WordClass::Identifier,
            }
        }

        self.accepting(state).unwrap_or(WordClass::Identifier)
    }
}

lazy_static! {
    pub static ref KEYWORD_DFA: Dfa = Dfa::build(VOCABULARY);
}

pub fn classify(word: &str) -> WordClass {
    KEYWORD_DFA.run(word)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_every_vocabulary_word_is_accepted() {
        for (word, class) in VOCABULARY {
            assert_eq!(classify(word), *class, "{:?}", word);
        }
    }

    #[test]
    fn test_reserved_and_noise_words() {
        assert_eq!(classify("main"), WordClass::Reserved);
        assert_eq!(classify("for"), WordClass::Reserved);
        assert_eq!(classify("null"), WordClass::Reserved);
        assert_eq!(classify("please"), WordClass::Noise);
        assert_eq!(classify("then"), WordClass::Noise);
        assert_eq!(classify("to"), WordClass::Noise);
        assert_eq!(classify("to do"), WordClass::Keyword);
    }

    #[test]
    fn test_case_is_folded() {
        assert_eq!(classify("Let"), WordClass::Keyword);
        assert_eq!(classify("LET"), WordClass::Keyword);
        assert_eq!(classify("SyStEm"), WordClass::Reserved);
        assert_eq!(classify("PLEASE"), WordClass::Noise);
        assert_eq!(classify("TO DO"), WordClass::Keyword);
    }

    #[test]
    fn test_prefixes_and_extensions_are_identifiers() {
        for word in [
            "lets", "le", "l", "globals", "glob", "times", "timestam", "todo", "to  do", "to d",
            "returned", "mains", "",
        ] {
            assert_eq!(classify(word), WordClass::Identifier, "{:?}", word);
        }
    }

    #[test]
    fn test_global_and_get_share_prefix() {
        assert_eq!(classify("get"), WordClass::Keyword);
        assert_eq!(classify("global"), WordClass::Keyword);
        assert_eq!(classify("gel"), WordClass::Identifier);
    }

    #[test]
    fn test_states_step_in_isolation() {
        let dfa = Dfa::build(&[("do", WordClass::Keyword), ("date", WordClass::Keyword)]);

        // start, d, do, da, dat, date
        assert_eq!(dfa.state_count(), 6);

        let d = dfa.step(Dfa::START, b'd').unwrap();
        assert_eq!(dfa.accepting(d), None);

        let o = dfa.step(d, b'o').unwrap();
        assert_eq!(dfa.accepting(o), Some(WordClass::Keyword));
        assert_eq!(dfa.step(o, b'o'), None);

        assert_eq!(dfa.step(Dfa::START, b'x'), None);
        assert_eq!(dfa.step(999, b'd'), None);
        assert_eq!(dfa.accepting(999), None);
    }

    #[test]
    fn test_shared_prefixes_reuse_states() {
        let dfa = Dfa::build(&[("time", WordClass::Keyword), ("timestamp", WordClass::Keyword)]);
        assert_eq!(dfa.state_count(), 10);
        assert_eq!(dfa.run("time"), WordClass::Keyword);
        assert_eq!(dfa.run("timestamp"), WordClass::Keyword);
        assert_eq!(dfa.run("times"), WordClass::Identifier);
    }

    proptest! {
        #[test]
        fn prop_classification_ignores_case(index in 0..VOCABULARY.len(), mask in any::<u64>()) {
            let (word, class) = VOCABULARY[index];
            let mixed: String = word
                .chars()
                .enumerate()
                .map(|(i, c)| if (mask >> (i % 64)) & 1 == 1 { c.to_ascii_uppercase() } else { c })
                .collect();

            prop_assert_eq!(classify(&mixed), class);
            prop_assert_eq!(classify(&mixed.to_ascii_lowercase()), classify(&mixed.to_ascii_uppercase()));
        }

        #[test]
        fn prop_words_outside_vocabulary_are_identifiers(word in "[A-Za-z_][A-Za-z0-9_]{0,12}") {
            let folded = word.to_ascii_lowercase();
            prop_assume!(!VOCABULARY.iter().any(|(w, _)| *w == folded));
            prop_assert_eq!(classify(&word), WordClass::Identifier);
        }
    }
}
