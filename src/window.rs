//! Temporal windows applied to each analysis frame before the FFT.

use std::f32::consts::PI;

/// Supported analysis windows.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TemporalWindow {
    /// `0.42 - 0.5 cos(2πn/(N-1)) + 0.08 cos(4πn/(N-1))`
    Blackman,
    /// `0.54 - 0.46 cos(2πn/(N-1))`
    Hamming,
}

impl TemporalWindow {
    /// Generate `len` window coefficients.
    ///
    /// A single-sample window is `[1.0]`; an empty window is empty.
    pub fn coefficients(self, len: usize) -> Vec<f32> {
        if len == 1 {
            return vec![1.0];
        }
        let denom = len as f32 - 1.0;
        (0..len)
            .map(|n| {
                let phase = 2.0 * PI * n as f32 / denom;
                match self {
                    TemporalWindow::Blackman => {
                        0.42 - 0.5 * phase.cos() + 0.08 * (2.0 * phase).cos()
                    }
                    TemporalWindow::Hamming => 0.54 - 0.46 * phase.cos(),
                }
            })
            .collect()
    }
}
