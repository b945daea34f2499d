/// Snaps inputs with magnitude below `width` to exactly zero
#[derive(Debug, Clone, Copy)]
pub struct Deadzone {
    width: f32,
}

impl Deadzone {
    /// # Panics
    ///
    /// Panics if width is negative or NaN
    #[must_use]
    pub fn new(width: f32) -> Self {
        assert!(width >= 0.0, "Deadzone width must be non-negative");
        Self { width }
    }

    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Zero for inputs inside the band, the input unchanged otherwise
    #[must_use]
    pub fn filter(&self, value: f32) -> f32 {
        if value.abs() < self.width {
            0.0
        } else {
            value
        }
    }
}
