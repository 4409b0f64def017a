use rand::{RngExt, SeedableRng, rngs::StdRng};
use regaut_lib::regex::Regex;

pub const SYMBOLS: [char; 3] = ['a', 'b', 'c'];

pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// A random expression over `a`, `b` and `c` with at most `depth` nested
/// operators.
pub fn random_regex(r: &mut StdRng, depth: usize) -> Regex {
    if depth == 0 || r.random_range(0..4) == 0 {
        return match r.random_range(0..7) {
            0 => Regex::Empty,
            i => Regex::symbol(SYMBOLS[i % SYMBOLS.len()]),
        };
    }

    match r.random_range(0..3) {
        0 => random_regex(r, depth - 1).union(random_regex(r, depth - 1)),
        1 => random_regex(r, depth - 1).concat(random_regex(r, depth - 1)),
        _ => random_regex(r, depth - 1).star(),
    }
}
