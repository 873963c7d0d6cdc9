//! Fourier transform
//!
//! Magnitude spectrum of a real-valued frame. The `N` real samples are packed
//! into `N/2` complex pairs, forward-transformed with a half-length complex
//! FFT, then split back into the positive-frequency half of the real spectrum.
//!
//! Magnitudes follow the packed-real convention: every bin is twice the
//! textbook DFT magnitude, and bin 0 carries both the DC and the Nyquist
//! terms as its real and imaginary parts. The factor is uniform across bins and
//! the chroma kernel is tuned against it, so it is kept end to end.

use std::{f64::consts::PI, sync::Arc};

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use thiserror::Error;

/// Errors returned by [`FourierTransform`].
#[derive(Debug, Error)]
pub enum FourierError {
    /// Frame received was not of the configured size.
    #[error("expected frame of length {expected}, got {got}")]
    InvalidFrameSize {
        /// The configured frame size.
        expected: usize,
        /// The length of the received frame.
        got: usize,
    },

    /// The transform could not be planned for the requested size.
    #[error("configuration error: {0}")]
    Configuration(String),
}

/// A reusable transform plan together with its scratch buffers.
///
/// Each call to [`FourierTransform::magnitudes`] overwrites every scratch
/// buffer before reading it, so calls are independent. The buffers are owned,
/// which is why a transform needs `&mut self` and cannot be shared between
/// threads mid-call; see [`crate::pool::ResourcePool`] for sharing.
#[derive(Clone)]
pub struct FourierTransform {
    frame_size: usize,
    fft: Arc<dyn Fft<f32>>,
    twiddles: Vec<Complex<f32>>,
    packed: Vec<Complex<f32>>,
    scratch: Vec<Complex<f32>>,
    magnitudes: Vec<f32>,
}

impl FourierTransform {
    /// Plan a transform for frames of `frame_size` samples.
    ///
    /// `frame_size` must be a power of two no smaller than 2.
    pub fn new(frame_size: usize) -> Result<Self, FourierError> {
        if frame_size < 2 || !frame_size.is_power_of_two() {
            return Err(FourierError::Configuration(format!(
                "frame size must be a power of two >= 2, got {frame_size}"
            )));
        }
        let half = frame_size / 2;

        let mut planner = FftPlanner::<f32>::new();
        let fft = planner.plan_fft_forward(half);
        let scratch_len = fft.get_inplace_scratch_len();

        // W^k = e^{-2πik/N}, computed in f64 to keep the split step accurate
        let twiddles = (0..half)
            .map(|k| {
                let angle = -2.0 * PI * k as f64 / frame_size as f64;
                Complex::new(angle.cos() as f32, angle.sin() as f32)
            })
            .collect();

        log::debug!("planned {frame_size}-point real FFT");

        Ok(FourierTransform {
            frame_size,
            fft,
            twiddles,
            packed: vec![Complex::new(0.0, 0.0); half],
            scratch: vec![Complex::new(0.0, 0.0); scratch_len],
            magnitudes: vec![0.0; half],
        })
    }

    /// Frame length this transform was planned for.
    pub fn frame_size(&self) -> usize {
        self.frame_size
    }

    /// Compute the `frame_size / 2` magnitudes of `signal`.
    ///
    /// Returns `Err(FourierError::InvalidFrameSize)` if `signal` is not
    /// exactly `frame_size` samples long.
    pub fn magnitudes(&mut self, signal: &[f32]) -> Result<&[f32], FourierError> {
        if signal.len() != self.frame_size {
            return Err(FourierError::InvalidFrameSize {
                expected: self.frame_size,
                got: signal.len(),
            });
        }

        for (z, pair) in self.packed.iter_mut().zip(signal.chunks_exact(2)) {
            *z = Complex::new(pair[0], pair[1]);
        }

        self.fft.process_with_scratch(&mut self.packed, &mut self.scratch);

        let half = self.packed.len();
        let z0 = self.packed[0];
        let dc = z0.re + z0.im;
        let nyquist = z0.re - z0.im;
        self.magnitudes[0] = 2.0 * dc.hypot(nyquist);

        // 2X[k] = (Z[k] + Z*[M-k]) - i W^k (Z[k] - Z*[M-k])
        for k in 1..half {
            let a = self.packed[k];
            let b = self.packed[half - k].conj();
            let odd = self.twiddles[k] * (a - b);
            let doubled = (a + b) + Complex::new(odd.im, -odd.re);
            self.magnitudes[k] = doubled.norm();
        }

        Ok(&self.magnitudes)
    }
}

impl std::fmt::Debug for FourierTransform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FourierTransform")
            .field("frame_size", &self.frame_size)
            .finish_non_exhaustive()
    }
}
