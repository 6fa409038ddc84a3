//! Centred smoothing kernels for the dispatch targets.

use std::{
    f64::consts::PI,
    fmt::{Display, Formatter},
    str::FromStr,
};

use solgrid_quantities::Kilowatts;

use crate::prelude::*;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Kernel {
    /// Flat weights.
    MovingAverage,

    /// Linearly decaying weights, peaking at the centre.
    Triangular,

    /// Raised cosine, non-zero up to the window edges.
    Hann,

    /// Bell curve with the standard deviation in samples.
    Gaussian { sigma: f64 },
}

impl Kernel {
    /// Weight at `offset` samples from the centre of a window with the `half_width`.
    fn weight(self, offset: isize, half_width: usize) -> f64 {
        let distance = offset.unsigned_abs() as f64;
        let half_width = half_width as f64;
        match self {
            Self::MovingAverage => 1.0,
            Self::Triangular => half_width + 1.0 - distance,
            Self::Hann => 0.5 * (1.0 + (PI * distance / (half_width + 1.0)).cos()),
            Self::Gaussian { sigma } => (-0.5 * (distance / sigma).powi(2)).exp(),
        }
    }
}

/// A kernel applied over an odd window of samples.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Smoother {
    pub kernel: Kernel,

    /// Window length in samples, odd.
    pub window: usize,
}

impl Smoother {
    /// A day of one-second samples, rounded up to odd.
    pub const MAX_WINDOW: usize = 86_401;

    pub fn new(kernel: Kernel, window: usize) -> Result<Self> {
        ensure!(window % 2 == 1, "smoothing window must be odd and positive, got {window}");
        ensure!(
            window <= Self::MAX_WINDOW,
            "smoothing window must not exceed {} samples, got {window}",
            Self::MAX_WINDOW,
        );
        if let Kernel::Gaussian { sigma } = kernel {
            ensure!(sigma.is_finite() && sigma > 0.0, "Gaussian sigma must be positive, got {sigma}");
        }
        Ok(Self { kernel, window })
    }

    fn weights(&self) -> Vec<f64> {
        let half_width = self.window / 2;
        (0..self.window)
            .map(|index| self.kernel.weight(index as isize - half_width as isize, half_width))
            .collect()
    }

    /// Weighted centred average; edges renormalize over the part of the window that exists.
    pub fn smooth(&self, values: &[Kilowatts]) -> Vec<Kilowatts> {
        let weights = self.weights();
        let half_width = self.window / 2;
        (0..values.len())
            .map(|center| {
                let (weighted_sum, weight_sum) = weights
                    .iter()
                    .enumerate()
                    .filter_map(|(index, weight)| {
                        (center + index).checked_sub(half_width).and_then(|position| {
                            values.get(position).map(|value| (value.0 * weight, *weight))
                        })
                    })
                    .fold((0.0, 0.0), |(value_sum, weight_sum), (value, weight)| {
                        (value_sum + value, weight_sum + weight)
                    });
                Kilowatts(weighted_sum / weight_sum)
            })
            .collect()
    }
}

impl Display for Smoother {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.kernel {
            Kernel::MovingAverage => write!(f, "moving-average:{}", self.window),
            Kernel::Triangular => write!(f, "triangular:{}", self.window),
            Kernel::Hann => write!(f, "hann:{}", self.window),
            Kernel::Gaussian { sigma } => write!(f, "gaussian:{}:{sigma}", self.window),
        }
    }
}

impl FromStr for Smoother {
    type Err = Error;

    /// Parse `<kernel>:<window>`, or `gaussian:<window>:<sigma>`.
    fn from_str(value: &str) -> Result<Self> {
        let mut parts = value.split(':');
        let kernel = parts.next().unwrap_or_default();
        let window = parts
            .next()
            .with_context(|| format!("missing window length in `{value}`"))?
            .parse::<usize>()
            .with_context(|| format!("invalid window length in `{value}`"))?;
        let kernel = match kernel {
            "moving-average" => Kernel::MovingAverage,
            "triangular" => Kernel::Triangular,
            "hann" => Kernel::Hann,
            "gaussian" => Kernel::Gaussian {
                sigma: parts
                    .next()
                    .with_context(|| format!("missing sigma in `{value}`"))?
                    .parse()
                    .with_context(|| format!("invalid sigma in `{value}`"))?,
            },
            _ => bail!("unknown smoothing kernel `{kernel}`"),
        };
        ensure!(parts.next().is_none(), "unexpected trailing parameters in `{value}`");
        Self::new(kernel, window)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn kilowatts(values: &[f64]) -> Vec<Kilowatts> {
        values.iter().copied().map(Kilowatts).collect()
    }

    fn values(series: &[Kilowatts]) -> Vec<f64> {
        series.iter().map(|value| value.0).collect()
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            "moving-average:3".parse::<Smoother>().unwrap(),
            Smoother { kernel: Kernel::MovingAverage, window: 3 },
        );
        assert_eq!(
            "gaussian:13:2.5".parse::<Smoother>().unwrap(),
            Smoother { kernel: Kernel::Gaussian { sigma: 2.5 }, window: 13 },
        );
        assert_eq!("hann:9".parse::<Smoother>().unwrap().to_string(), "hann:9");
        assert!("triangular:4".parse::<Smoother>().is_err());
        assert!("triangular:0".parse::<Smoother>().is_err());
        assert!("gaussian:5".parse::<Smoother>().is_err());
        assert!("gaussian:5:-1".parse::<Smoother>().is_err());
        assert!("median:5".parse::<Smoother>().is_err());
        assert!("hann:5:1".parse::<Smoother>().is_err());
    }

    #[test]
    fn test_window_is_bounded() {
        assert!("moving-average:9223372036854775807".parse::<Smoother>().is_err());
        assert!(Smoother::new(Kernel::Hann, Smoother::MAX_WINDOW + 2).is_err());
        let widest = Smoother::new(Kernel::MovingAverage, Smoother::MAX_WINDOW).unwrap();
        assert_eq!(widest.smooth(&kilowatts(&[1.0, 3.0])), kilowatts(&[2.0, 2.0]));
    }

    #[test]
    fn test_moving_average_with_edges() {
        let smoother = Smoother::new(Kernel::MovingAverage, 3).unwrap();
        let smoothed = smoother.smooth(&kilowatts(&[3.0, 6.0, 9.0, 0.0]));
        let expected = [4.5, 6.0, 5.0, 4.5];
        for (actual, expected) in values(&smoothed).into_iter().zip(expected) {
            assert_abs_diff_eq!(actual, expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_window_of_one_is_identity() {
        let input = kilowatts(&[1.0, 7.0, 2.0]);
        for kernel in [Kernel::MovingAverage, Kernel::Triangular, Kernel::Hann, Kernel::Gaussian { sigma: 1.0 }] {
            assert_eq!(Smoother::new(kernel, 1).unwrap().smooth(&input), input);
        }
    }

    #[test]
    fn test_constant_is_preserved() {
        let input = kilowatts(&[5.0; 20]);
        for kernel in [Kernel::Triangular, Kernel::Hann, Kernel::Gaussian { sigma: 2.0 }] {
            for value in values(&Smoother::new(kernel, 7).unwrap().smooth(&input)) {
                assert_abs_diff_eq!(value, 5.0, epsilon = 1e-12);
            }
        }
    }

    /// Centre-weighted kernels keep more of a peak than a flat average of the same width.
    #[test]
    fn test_weighted_kernels_preserve_peaks() {
        let mut input = vec![0.0; 21];
        input[10] = 100.0;
        let input = kilowatts(&input);
        let flat = Smoother::new(Kernel::MovingAverage, 7).unwrap().smooth(&input)[10];
        for kernel in [Kernel::Triangular, Kernel::Hann, Kernel::Gaussian { sigma: 1.5 }] {
            assert!(Smoother::new(kernel, 7).unwrap().smooth(&input)[10] > flat);
        }
    }

    #[test]
    fn test_triangular_weights() {
        let weights = Smoother::new(Kernel::Triangular, 5).unwrap().weights();
        assert_eq!(weights, [1.0, 2.0, 3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_empty() {
        assert!(Smoother::new(Kernel::Hann, 5).unwrap().smooth(&[]).is_empty());
    }
}
