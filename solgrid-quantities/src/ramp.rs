quantity!(WattsPerSecond, via: f64, suffix: "W/s", precision: 2);
