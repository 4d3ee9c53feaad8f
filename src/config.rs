/// Player-facing options the rules engine branches on.
///
/// ```
/// use set_rs::config::Settings;
///
/// let s = Settings::default().with_auto_deal(false).with_seed(7);
/// assert!(!s.auto_deal);
/// assert!(s.hints);
/// assert_eq!(s.seed, Some(7));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct Settings {
    /// Grow the table automatically while no set is showing.
    pub auto_deal: bool,
    /// Allow hint requests.
    pub hints: bool,
    /// Seed for reproducible shuffles; `None` draws one from the thread RNG.
    pub seed: Option<u64>,
}

impl Settings {
    pub fn with_auto_deal(mut self, auto_deal: bool) -> Self {
        self.auto_deal = auto_deal;
        self
    }

    pub fn with_hints(mut self, hints: bool) -> Self {
        self.hints = hints;
        self
    }

    /// Set a deterministic RNG seed for reproducible games.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self { auto_deal: true, hints: true, seed: None }
    }
}
