/// Cell temperature at standard test conditions.
pub const STC_TEMPERATURE: Celsius = Celsius(25.0);

quantity!(Celsius, via: f64, suffix: "°C", precision: 1);
