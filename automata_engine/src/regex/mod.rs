pub mod parser;
pub mod thompson;

use crate::error::Result;
use crate::fa::nfa::NFA;
use log::{debug, trace};
use parser::{format_tokens, insert_concatenation, to_postfix, tokenize};
use thompson::ThompsonBuilder;

/// Compiles a regular expression over single-character symbols into an NFA.
///
/// Supported syntax: `|` (union), `*` (zero or more), implicit concatenation,
/// parentheses, and `&`/`ε` for the empty string. The empty regex denotes `{ε}`.
pub fn compile(regex: &str) -> Result<NFA> {
    let mut builder = ThompsonBuilder::new();
    if regex.is_empty() {
        return Ok(builder.epsilon());
    }

    let tokens = insert_concatenation(&tokenize(regex));
    trace!("Explicit form: {}", format_tokens(&tokens));
    let postfix = to_postfix(&tokens)?;
    trace!("Postfix form: {}", format_tokens(&postfix));

    let nfa = builder.evaluate(&postfix)?;
    debug!(
        "Compiled '{}' into an NFA with {} states over {} symbols",
        regex,
        nfa.num_states(),
        nfa.alphabet.len()
    );
    Ok(nfa)
}
