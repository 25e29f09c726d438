use super::calculator::{GenericCalculator, ScoreCalculator, WarzoneCalculator};

/// Fixed-priority list of scoring strategies.
///
/// Game-specific calculators come first; the generic catch-all is last so
/// every slug resolves to exactly one calculator. First match wins, and the
/// order is part of the scoring contract: reordering changes which formula
/// a game gets.
pub struct CalculatorRegistry {
    calculators: Vec<Box<dyn ScoreCalculator>>,
}

impl CalculatorRegistry {
    /// Builds an empty registry. Callers are expected to push a catch-all
    /// calculator last; `CalculatorRegistry::default` does this already.
    pub fn new() -> Self {
        Self {
            calculators: Vec::new(),
        }
    }

    /// Appends a calculator at the lowest priority position.
    pub fn register(&mut self, calculator: Box<dyn ScoreCalculator>) {
        log::debug!("Registering score calculator '{}'", calculator.name());
        self.calculators.push(calculator);
    }

    /// Returns the first calculator that supports the slug.
    pub fn select(&self, game_slug: &str) -> Option<&dyn ScoreCalculator> {
        self.calculators
            .iter()
            .find(|c| c.supports(game_slug))
            .map(|c| c.as_ref())
    }

    pub fn len(&self) -> usize {
        self.calculators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calculators.is_empty()
    }
}

impl Default for CalculatorRegistry {
    fn default() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(WarzoneCalculator));
        registry.register(Box::new(GenericCalculator));
        registry
    }
}
