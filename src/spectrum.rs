//! Spectrum analyser
//!
//! Slides a window over a mono signal, transforms each frame, folds its
//! spectrum into chroma and averages the per-frame chroma vectors.

use std::sync::Arc;

use thiserror::Error;

use crate::{
    chroma::{ChromaError, ChromaTransform},
    constants::{ChromaVector, BANDS, DOWNSAMPLED_FRAME_RATE, FFT_FRAME_SIZE},
    fourier::{FourierError, FourierTransform},
    window::TemporalWindow,
};

/// Errors returned by the spectrum analyser.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// There were no samples to analyse.
    #[error("cannot analyse an empty signal")]
    EmptySignal,

    /// The FFT rejected its input or configuration.
    #[error(transparent)]
    Fourier(#[from] FourierError),

    /// The chroma kernel rejected its input or configuration.
    #[error(transparent)]
    Chroma(#[from] ChromaError),
}

/// Builder for a [`SpectrumAnalyser`].
pub struct SpectrumAnalyserBuilder {
    sample_rate: u32,
    frame_size: usize,
    window: TemporalWindow,
}

impl SpectrumAnalyserBuilder {
    /// Start with the standard analysis parameters:
    /// sample_rate = 4410, frame_size = 16384, Blackman window.
    pub fn new() -> Self {
        SpectrumAnalyserBuilder {
            sample_rate: DOWNSAMPLED_FRAME_RATE,
            frame_size: FFT_FRAME_SIZE,
            window: TemporalWindow::Blackman,
        }
    }

    /// Set the working sample rate of incoming signals.
    pub fn sample_rate(mut self, rate: u32) -> Self {
        self.sample_rate = rate;
        self
    }

    /// Set the FFT frame size. The hop is always a quarter of it.
    pub fn frame_size(mut self, size: usize) -> Self {
        self.frame_size = size;
        self
    }

    /// Set the window applied to each frame.
    pub fn window(mut self, window: TemporalWindow) -> Self {
        self.window = window;
        self
    }

    /// Derive the kernel and window, and finalize the analyser.
    pub fn build(self) -> Result<SpectrumAnalyser, AnalysisError> {
        if self.frame_size < 4 || !self.frame_size.is_power_of_two() {
            return Err(FourierError::Configuration(format!(
                "frame size must be a power of two >= 4, got {}",
                self.frame_size
            ))
            .into());
        }
        let chroma = ChromaTransform::new(self.sample_rate, self.frame_size)?;
        let window = self.window.coefficients(self.frame_size);

        log::debug!(
            "spectrum analyser ready: {} Hz, frame {}, hop {}, {:?} window",
            self.sample_rate,
            self.frame_size,
            self.frame_size / 4,
            self.window
        );

        Ok(SpectrumAnalyser {
            sample_rate: self.sample_rate,
            frame_size: self.frame_size,
            hop_size: self.frame_size / 4,
            window: window.into(),
            chroma: Arc::new(chroma),
        })
    }
}

impl Default for SpectrumAnalyserBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Framing and averaging front end of the key detector.
///
/// Holds only immutable state, so one analyser is shared by every worker; the
/// mutable FFT workspace is passed in per call.
#[derive(Debug, Clone)]
pub struct SpectrumAnalyser {
    sample_rate: u32,
    frame_size: usize,
    hop_size: usize,
    window: Arc<[f32]>,
    chroma: Arc<ChromaTransform>,
}

impl SpectrumAnalyser {
    /// Start customizing with a builder.
    pub fn builder() -> SpectrumAnalyserBuilder {
        SpectrumAnalyserBuilder::new()
    }

    /// Working sample rate the kernel was derived for.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Samples per analysis frame.
    pub fn frame_size(&self) -> usize {
        self.frame_size
    }

    /// Samples between successive frame starts.
    pub fn hop_size(&self) -> usize {
        self.hop_size
    }

    /// The shared chroma kernel.
    pub fn chroma_transform(&self) -> &ChromaTransform {
        &self.chroma
    }

    /// Plan an FFT workspace matching this analyser's frame size.
    pub fn fourier_transform(&self) -> Result<FourierTransform, FourierError> {
        FourierTransform::new(self.frame_size)
    }

    /// Number of frames `chroma_vector` will average for a signal of `len` samples.
    pub fn frame_count(&self, len: usize) -> usize {
        len.div_ceil(self.hop_size)
    }

    /// Mean chroma vector of `samples`.
    ///
    /// Frames start every hop. A frame that does not fit entirely before the
    /// end of the signal is zero-filled and its remaining samples are written
    /// at `position % frame_size`, so they wrap around inside the frame rather
    /// than sitting at its start.
    pub fn chroma_vector(
        &self,
        fft: &mut FourierTransform,
        samples: &[f32],
    ) -> Result<ChromaVector, AnalysisError> {
        if samples.is_empty() {
            return Err(AnalysisError::EmptySignal);
        }

        let n = self.frame_size;
        let hops = self.frame_count(samples.len());
        let scale = hops as f32;
        let mut frame = vec![0.0f32; n];
        let mut mean = [0.0f32; BANDS];

        for start in (0..samples.len()).step_by(self.hop_size) {
            if start + n < samples.len() {
                let slice = &samples[start..start + n];
                for ((out, &s), &w) in frame.iter_mut().zip(slice).zip(self.window.iter()) {
                    *out = s * w;
                }
            } else {
                frame.fill(0.0);
                for (position, &s) in samples.iter().enumerate().skip(start) {
                    let index = position % n;
                    frame[index] = s * self.window[index];
                }
            }

            let magnitudes = fft.magnitudes(&frame)?;
            let chroma = self.chroma.chroma_vector(magnitudes)?;
            for (acc, value) in mean.iter_mut().zip(chroma) {
                *acc += value / scale;
            }
        }

        log::debug!(
            "averaged {} frames over {} samples ({:.1}s)",
            hops,
            samples.len(),
            samples.len() as f32 / self.sample_rate as f32
        );

        Ok(mean)
    }
}
