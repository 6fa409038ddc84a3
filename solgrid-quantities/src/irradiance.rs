/// Irradiance at standard test conditions.
pub const STC_IRRADIANCE: WattsPerSquareMeter = WattsPerSquareMeter(1000.0);

quantity!(WattsPerSquareMeter, via: f64, suffix: "W/m²", precision: 1);

impl WattsPerSquareMeter {
    /// Irradiance as a fraction of [`STC_IRRADIANCE`].
    #[must_use]
    pub fn to_stc_ratio(self) -> f64 {
        self / STC_IRRADIANCE
    }

    /// Clamp negative readings to zero.
    pub const fn non_negative(self) -> Self {
        if self.0 > 0.0 { self } else { Self::ZERO }
    }
}
