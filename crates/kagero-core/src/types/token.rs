use serde::{Deserialize, Serialize};

/// One observation: the emitted symbol and, when known, the state that emitted it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token<S, O> {
    /// Observed output symbol.
    pub symbol: O,
    /// Hidden state label, if the sequence is labelled.
    pub state: Option<S>,
}

impl<S, O> Token<S, O> {
    /// Creates a token with an optional state label.
    pub fn new(symbol: O, state: Option<S>) -> Self {
        Self { symbol, state }
    }

    /// Creates a token carrying a state label.
    pub fn labelled(symbol: O, state: S) -> Self {
        Self {
            symbol,
            state: Some(state),
        }
    }

    /// Creates a token without a state label.
    pub fn unlabelled(symbol: O) -> Self {
        Self {
            symbol,
            state: None,
        }
    }

    /// Returns `true` if the token carries a state label.
    #[must_use]
    pub fn is_labelled(&self) -> bool {
        self.state.is_some()
    }
}

/// Wraps raw symbols as unlabelled tokens.
pub fn unlabelled_sequence<S, O>(symbols: impl IntoIterator<Item = O>) -> Vec<Token<S, O>> {
    symbols.into_iter().map(Token::unlabelled).collect()
}

/// Returns `true` if every token carries a state label.
pub fn is_labelled<S, O>(sequence: &[Token<S, O>]) -> bool {
    sequence.iter().all(Token::is_labelled)
}

/// Drops the state labels, keeping the symbols.
pub fn strip_labels<S, O: Clone>(sequence: &[Token<S, O>]) -> Vec<Token<S, O>> {
    sequence
        .iter()
        .map(|token| Token::unlabelled(token.symbol.clone()))
        .collect()
}
