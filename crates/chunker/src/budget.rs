use serde::{Deserialize, Serialize};

/// Tokens reserved for the relevance prompt, the question and the JSON reply
pub const RELEVANCE_OVERHEAD: usize = 1000;

/// Tokens reserved for the answer prompt, the question and the written answer
pub const ANSWER_OVERHEAD: usize = 1500;

/// Floor applied to every budget, whatever the context window
pub const MIN_BUDGET_TOKENS: usize = 500;

// 4/5 of the context window is handed out to entries
const CONTEXT_SHARE_NUMERATOR: usize = 4;
const CONTEXT_SHARE_DENOMINATOR: usize = 5;

/// Estimate the token count of `text` (roughly 4 characters per token).
#[must_use]
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count() / 4
}

/// Number of prompt tokens available for entries in one request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TokenBudget(usize);

impl TokenBudget {
    /// Derive the entry budget from a model context window.
    ///
    /// `floor(context_size * 0.8) - overhead`, clamped to [`MIN_BUDGET_TOKENS`].
    #[must_use]
    pub fn from_context(context_size: usize, overhead: usize) -> Self {
        let effective =
            context_size.saturating_mul(CONTEXT_SHARE_NUMERATOR) / CONTEXT_SHARE_DENOMINATOR;
        Self(effective.saturating_sub(overhead).max(MIN_BUDGET_TOKENS))
    }

    /// Budget with an exact token count (no floor applied)
    #[must_use]
    pub const fn exact(tokens: usize) -> Self {
        Self(tokens)
    }

    #[must_use]
    pub const fn tokens(self) -> usize {
        self.0
    }

    /// Whether `used + extra` still fits
    #[must_use]
    pub const fn fits(self, used: usize, extra: usize) -> bool {
        match used.checked_add(extra) {
            Some(total) => total <= self.0,
            None => false,
        }
    }
}
