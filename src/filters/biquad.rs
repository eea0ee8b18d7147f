//! Second-order IIR sections.
//!
//! A [`Biquad`] runs the standard biquad difference equation in Direct
//! Form I. Recursive filters of any order are built as cascades of these
//! sections, which stay numerically stable where a single high-order
//! polynomial would not.

use rustfft::num_complex::Complex64;

/// Normalized biquad coefficients (`a0 == 1`).
///
/// A first-order section is a biquad with `b2 == a2 == 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Biquad {
    b0: f64, // Feedforward coefficient for x[n]
    b1: f64, // Feedforward coefficient for x[n-1]
    b2: f64, // Feedforward coefficient for x[n-2]
    a1: f64, // Feedback coefficient for y[n-1]
    a2: f64, // Feedback coefficient for y[n-2]
}

/// Previous inputs and outputs of one section.
#[derive(Debug, Clone, Copy, Default)]
struct State {
    x1: f64,
    x2: f64,
    y1: f64,
    y2: f64,
}

impl Biquad {
    pub fn new(b0: f64, b1: f64, b2: f64, a1: f64, a2: f64) -> Self {
        Self { b0, b1, b2, a1, a2 }
    }

    /// Gain of the section for a constant input.
    pub fn dc_gain(&self) -> f64 {
        (self.b0 + self.b1 + self.b2) / (1.0 + self.a1 + self.a2)
    }

    /// Whether both poles lie strictly inside the unit circle.
    pub fn is_stable(&self) -> bool {
        self.a2.abs() < 1.0 && self.a1.abs() < 1.0 + self.a2
    }

    /// Complex response at `omega` radians per sample.
    pub fn response(&self, omega: f64) -> Complex64 {
        let z1 = Complex64::from_polar(1.0, -omega);
        let z2 = z1 * z1;
        let num = self.b0 + z1 * self.b1 + z2 * self.b2;
        let den = 1.0 + z1 * self.a1 + z2 * self.a2;
        num / den
    }

    /// Filters `input`, starting from the steady state the section would
    /// reach after an infinitely long run of `input[0]`.
    ///
    /// Starting in steady state removes the startup transient a zero
    /// initial state would cause when the signal does not begin at zero.
    pub fn process(&self, input: &[f64]) -> Vec<f64> {
        let Some(&first) = input.first() else {
            return Vec::new();
        };
        let settled = first * self.dc_gain();
        let mut state = State {
            x1: first,
            x2: first,
            y1: settled,
            y2: settled,
        };

        input
            .iter()
            .map(|&x0| {
                // y[n] = b0*x[n] + b1*x[n-1] + b2*x[n-2] - a1*y[n-1] - a2*y[n-2]
                let y0 = self.b0 * x0 + self.b1 * state.x1 + self.b2 * state.x2
                    - self.a1 * state.y1
                    - self.a2 * state.y2;

                state.x2 = state.x1;
                state.x1 = x0;
                state.y2 = state.y1;
                state.y1 = y0;

                y0
            })
            .collect()
    }
}
