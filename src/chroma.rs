//! Chroma transform
//!
//! A sparse band-pass kernel folding FFT magnitudes into the 72 chroma bands.
//! Each band integrates a window of consecutive bins around its reference
//! frequency, shaped by `1 - cos(2πn/W)`. The coefficients are normalised to
//! unit sum and then scaled by the band's frequency, which closely models a
//! constant-Q transform.

use std::f32::consts::PI;

use thiserror::Error;

use crate::constants::{ChromaVector, BANDS, DIRECT_SK_STRETCH, FREQUENCIES, SEMITONES};

/// Errors raised while building or applying a [`ChromaTransform`].
#[derive(Debug, Error)]
pub enum ChromaError {
    /// The highest reference frequency does not fit under Nyquist.
    #[error("reference frequency {frequency} Hz is above Nyquist ({nyquist} Hz)")]
    AboveNyquist {
        /// Highest reference frequency.
        frequency: f32,
        /// Half the sample rate.
        nyquist: f32,
    },

    /// FFT bins are too coarse to separate the two lowest bands.
    #[error("bin width {bin_width} Hz is coarser than the lowest band spacing {spacing} Hz")]
    InsufficientResolution {
        /// `sample_rate / frame_size`.
        bin_width: f32,
        /// Distance between the two lowest reference frequencies.
        spacing: f32,
    },

    /// The magnitude spectrum passed in does not match the kernel.
    #[error("expected spectrum of length {expected}, got {got}")]
    InvalidSpectrumLength {
        /// `frame_size / 2`.
        expected: usize,
        /// The length of the received spectrum.
        got: usize,
    },

    /// Any other degenerate parameter.
    #[error("configuration error: {0}")]
    Configuration(String),
}

/// One band of the kernel.
#[derive(Debug, Clone)]
pub struct KernelBand {
    /// Reference frequency of the band in Hz.
    pub frequency: f32,
    /// Index of the first FFT bin the band reads.
    pub first_bin: usize,
    /// Weights applied to consecutive bins starting at `first_bin`.
    pub coefficients: Vec<f32>,
}

/// Precomputed chroma kernel. Immutable once built, so one instance can be
/// shared read-only by any number of analyses.
#[derive(Debug, Clone)]
pub struct ChromaTransform {
    spectrum_len: usize,
    bands: Vec<KernelBand>,
}

impl ChromaTransform {
    /// Derive the kernel for the given working sample rate and FFT frame size.
    pub fn new(sample_rate: u32, frame_size: usize) -> Result<Self, ChromaError> {
        if sample_rate == 0 || frame_size == 0 {
            return Err(ChromaError::Configuration(format!(
                "sample rate and frame size must be non-zero (got {sample_rate} Hz, {frame_size} samples)"
            )));
        }
        let rate = sample_rate as f32;
        let size = frame_size as f32;

        let highest = FREQUENCIES[BANDS - 1];
        if highest > rate / 2.0 {
            return Err(ChromaError::AboveNyquist {
                frequency: highest,
                nyquist: rate / 2.0,
            });
        }

        let bin_width = rate / size;
        let spacing = FREQUENCIES[1] - FREQUENCIES[0];
        if bin_width > spacing {
            return Err(ChromaError::InsufficientResolution { bin_width, spacing });
        }

        let spectrum_len = frame_size / 2;
        let q = DIRECT_SK_STRETCH * (2f32.powf(1.0 / SEMITONES as f32) - 1.0);

        let mut bands = Vec::with_capacity(BANDS);
        for &frequency in FREQUENCIES.iter() {
            let centre = frequency * size / rate;
            let width = centre * q;
            let start = centre - width / 2.0;
            let end = start + width;

            let first_bin = start.ceil() as usize;
            let last_bin = end.floor() as usize;
            let mut coefficients: Vec<f32> = (first_bin..last_bin)
                .map(|bin| kernel_window(bin as f32 - start, width))
                .collect();

            let sum: f32 = coefficients.iter().sum();
            if coefficients.is_empty() || sum <= 0.0 {
                return Err(ChromaError::Configuration(format!(
                    "band at {frequency} Hz covers no FFT bins"
                )));
            }
            if first_bin + coefficients.len() > spectrum_len {
                return Err(ChromaError::Configuration(format!(
                    "band at {frequency} Hz reads past the end of the spectrum"
                )));
            }

            for c in coefficients.iter_mut() {
                *c = *c / sum * frequency;
            }

            bands.push(KernelBand {
                frequency,
                first_bin,
                coefficients,
            });
        }

        log::debug!(
            "built chroma kernel: {} bands, {} Hz, {}-point frames, {} coefficients",
            bands.len(),
            sample_rate,
            frame_size,
            bands.iter().map(|b| b.coefficients.len()).sum::<usize>()
        );

        Ok(ChromaTransform {
            spectrum_len,
            bands,
        })
    }

    /// The kernel, one entry per band in ascending frequency.
    pub fn bands(&self) -> &[KernelBand] {
        &self.bands
    }

    /// Number of magnitudes expected by [`ChromaTransform::chroma_vector`].
    pub fn spectrum_len(&self) -> usize {
        self.spectrum_len
    }

    /// Fold a magnitude spectrum into a chroma vector.
    pub fn chroma_vector(&self, magnitudes: &[f32]) -> Result<ChromaVector, ChromaError> {
        if magnitudes.len() != self.spectrum_len {
            return Err(ChromaError::InvalidSpectrumLength {
                expected: self.spectrum_len,
                got: magnitudes.len(),
            });
        }

        let mut chroma = [0.0; BANDS];
        for (value, band) in chroma.iter_mut().zip(&self.bands) {
            *value = band
                .coefficients
                .iter()
                .zip(&magnitudes[band.first_bin..])
                .map(|(c, m)| c * m)
                .sum();
        }
        Ok(chroma)
    }
}

/// Sampled `1 - cos(2πn/W)`; not one of the standard analysis windows.
#[inline]
fn kernel_window(n: f32, width: f32) -> f32 {
    1.0 - (2.0 * PI * n / width).cos()
}
