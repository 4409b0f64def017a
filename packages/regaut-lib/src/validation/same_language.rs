use itertools::{Itertools, repeat_n};

use crate::automaton::Language;

/// The symbols of both alphabets, sorted and without duplicates.
fn joint_alphabet<L: Language>(a: &L, b: &L) -> Vec<L::Letter> {
    a.alphabet()
        .iter()
        .chain(b.alphabet())
        .cloned()
        .sorted()
        .dedup()
        .collect_vec()
}

/// Returns the shortest word, up to `max_word_length` letters, that exactly
/// one of the automata accepts. Words are drawn from the symbols of both
/// alphabets.
pub fn find_difference<L: Language>(
    a: &L,
    b: &L,
    max_word_length: usize,
) -> Option<Vec<L::Letter>> {
    let alphabet = joint_alphabet(a, b);

    for i in 0..=max_word_length {
        let combinations = repeat_n(alphabet.iter(), i).multi_cartesian_product();

        for word in combinations {
            let word = word.into_iter().cloned().collect_vec();
            if a.accepts(&word) != b.accepts(&word) {
                return Some(word);
            }
        }
    }

    None
}

/// Checks if two automata accept the same words up to `max_word_length`
/// letters.
pub fn same_language<L: Language>(a: &L, b: &L, max_word_length: usize) -> bool {
    find_difference(a, b, max_word_length).is_none()
}

pub fn assert_same_language<L: Language>(a: &L, b: &L, max_word_length: usize) {
    if let Some(word) = find_difference(a, b, max_word_length) {
        if a.accepts(&word) {
            panic!(
                "{:?} is accepted by automaton `a` but not by automaton `b`. Thus their languages are not equal.",
                word
            );
        } else {
            panic!(
                "{:?} is accepted by automaton `b` but not by automaton `a`. Thus their languages are not equal.",
                word
            );
        }
    }
}

/// Assert that every word up to `max_word_length` letters accepted by `a` is
/// accepted by `b` as well.
pub fn assert_subset_language<L: Language>(a: &L, b: &L, max_word_length: usize) {
    let alphabet = joint_alphabet(a, b);

    for i in 0..=max_word_length {
        let combinations = repeat_n(alphabet.iter(), i).multi_cartesian_product();

        for word in combinations {
            let word = word.into_iter().cloned().collect_vec();
            if a.accepts(&word) && !b.accepts(&word) {
                panic!(
                    "{:?} is accepted by automaton `a` but not by automaton `b`. Thus the language of `a` is not a subset of `b`.",
                    word
                );
            }
        }
    }
}
