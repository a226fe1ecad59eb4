//! Caption suggestions: choosing what to ask for and applying the answer.

/// Suggestion types and selection rules.
pub mod suggest;
