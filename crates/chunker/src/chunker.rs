use crate::budget::TokenBudget;

/// An ordered batch of entries whose estimated size stays within one budget
/// (unless a single entry alone exceeds it)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk<T> {
    items: Vec<T>,
    tokens: usize,
}

impl<T> Chunk<T> {
    fn start(item: T, tokens: usize) -> Self {
        Self {
            items: vec![item],
            tokens,
        }
    }

    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Sum of the estimated entry sizes
    #[must_use]
    pub const fn tokens(&self) -> usize {
        self.tokens
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// True when one entry alone is bigger than the budget it was packed for
    #[must_use]
    pub fn is_oversized(&self, budget: TokenBudget) -> bool {
        self.items.len() == 1 && self.tokens > budget.tokens()
    }
}

/// Greedily pack `items` into chunks, preserving input order.
///
/// An item that does not fit into a non-empty chunk closes it and opens the
/// next one. An item larger than the whole budget still gets its own chunk.
pub fn chunk_by_budget<T, F>(items: Vec<T>, budget: TokenBudget, mut cost: F) -> Vec<Chunk<T>>
where
    F: FnMut(&T) -> usize,
{
    let mut chunks = Vec::new();
    let mut current: Option<Chunk<T>> = None;

    for item in items {
        let tokens = cost(&item);
        current = match current.take() {
            Some(mut chunk) if budget.fits(chunk.tokens, tokens) => {
                chunk.items.push(item);
                chunk.tokens += tokens;
                Some(chunk)
            }
            Some(full) => {
                chunks.push(full);
                Some(Chunk::start(item, tokens))
            }
            None => Some(Chunk::start(item, tokens)),
        };
    }
    chunks.extend(current);

    for chunk in chunks.iter().filter(|c| c.is_oversized(budget)) {
        log::debug!(
            "Entry of {} tokens exceeds the {} token budget; sending it alone",
            chunk.tokens,
            budget.tokens()
        );
    }

    chunks
}
