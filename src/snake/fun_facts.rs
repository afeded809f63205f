//! Ordered fun-fact deck.
//!
//! The deck outlives individual games: its cursor keeps advancing across
//! restarts and wraps at the end of the list.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunFactDeck {
    facts: Vec<String>,
    next_index: usize,
}

impl FunFactDeck {
    pub fn new(facts: Vec<String>) -> Self {
        Self {
            facts,
            next_index: 0,
        }
    }

    /// Index of the fact the next `draw` returns.
    pub fn next_index(&self) -> usize {
        self.next_index
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    /// Take the next fact and advance the cursor. `None` for an empty deck.
    pub fn draw(&mut self) -> Option<(usize, &str)> {
        if self.facts.is_empty() {
            return None;
        }
        let index = self.next_index;
        self.next_index = (index + 1) % self.facts.len();
        Some((index, self.facts[index].as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deck() -> FunFactDeck {
        FunFactDeck::new(vec!["a".into(), "b".into(), "c".into()])
    }

    #[test]
    fn test_draws_in_order_and_wraps() {
        let mut deck = deck();
        let drawn: Vec<usize> = (0..5).map(|_| deck.draw().unwrap().0).collect();
        assert_eq!(drawn, vec![0, 1, 2, 0, 1]);
        assert_eq!(deck.next_index(), 2);
    }

    #[test]
    fn test_draw_returns_text() {
        let mut deck = deck();
        assert_eq!(deck.draw(), Some((0, "a")));
        assert_eq!(deck.draw(), Some((1, "b")));
    }

    #[test]
    fn test_empty_deck() {
        let mut deck = FunFactDeck::new(Vec::new());
        assert!(deck.is_empty());
        assert_eq!(deck.draw(), None);
    }
}
