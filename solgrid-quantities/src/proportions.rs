quantity!(Percentage, via: f64, suffix: "%", precision: 1);

impl Percentage {
    pub const HUNDRED: Self = Self(100.0);

    /// Express the ratio `0.0..=1.0` as a percentage.
    pub const fn from_ratio(ratio: f64) -> Self {
        Self(ratio * 100.0)
    }

    /// Convert the percentage into `0.0..=1.0`.
    #[must_use]
    pub const fn to_ratio(self) -> f64 {
        0.01 * self.0
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_ratio() {
        assert_abs_diff_eq!(Percentage::from_ratio(1.2).0, 120.0);
        assert_abs_diff_eq!(Percentage(45.0).to_ratio(), 0.45);
    }

    #[test]
    fn test_ordering() {
        assert!(Percentage(99.9) < Percentage::HUNDRED);
        assert_eq!(Percentage(3.0).max(Percentage(4.0)), Percentage(4.0));
    }
}
