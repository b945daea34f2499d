use super::ScalarFilter;

/// Exponential moving average: `ema += alpha * (value - ema)`.
///
/// The accumulator starts at zero rather than at the first input, so a fresh
/// smoother eases in from neutral.
#[derive(Debug, Clone)]
pub struct ExponentialSmoother {
    alpha: f32,
    value: f32,
}

impl ExponentialSmoother {
    /// Create a smoother with the given blend factor
    ///
    /// # Panics
    ///
    /// Panics if alpha is not in the range (0, 1]
    #[must_use]
    pub fn new(alpha: f32) -> Self {
        assert!(alpha > 0.0 && alpha <= 1.0, "Alpha must be in (0, 1]");
        Self { alpha, value: 0.0 }
    }

    /// Current accumulator value
    #[must_use]
    pub const fn value(&self) -> f32 {
        self.value
    }

    #[must_use]
    pub const fn alpha(&self) -> f32 {
        self.alpha
    }
}

impl ScalarFilter for ExponentialSmoother {
    fn apply(&mut self, value: f32) -> f32 {
        self.value = self.alpha.mul_add(value - self.value, self.value);
        self.value
    }

    fn reset(&mut self) {
        self.value = 0.0;
    }

    fn name(&self) -> &str {
        "ExponentialSmoother"
    }
}
