//! Bounded language comparison. Enumerates every word up to a length and
//! compares the verdicts of two automata, which makes it independent of the
//! algorithms it is used to check.
pub mod same_language;
