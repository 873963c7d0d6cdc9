//! Tone profiles
//!
//! A reference template stored as six independent 12-element octave rings.
//! Rotating a ring tests a different tonic without touching the stored data.

use thiserror::Error;

use crate::constants::{ChromaVector, BANDS, OCTAVES, SEMITONES};

/// Ring position paired with the first band (C) of each octave at offset 0.
/// The rings are C-rooted while offset 0 tests an A tonic, three semitones down.
const TONIC_OFFSET: usize = 3;

/// Errors when building a tone profile.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// The template did not have one value per band.
    #[error("expected a {expected}-band profile, got {got}")]
    InvalidLength {
        /// Always [`BANDS`].
        expected: usize,
        /// Length of the supplied template.
        got: usize,
    },
}

/// A circularly rotatable reference template.
#[derive(Debug, Clone, PartialEq)]
pub struct ToneProfile {
    rings: [[f32; SEMITONES]; OCTAVES],
}

impl ToneProfile {
    /// Build a profile from 72 values laid out octave by octave.
    pub fn new(profile: &[f32]) -> Result<Self, ProfileError> {
        if profile.len() != BANDS {
            return Err(ProfileError::InvalidLength {
                expected: BANDS,
                got: profile.len(),
            });
        }
        let mut rings = [[0.0; SEMITONES]; OCTAVES];
        for (ring, values) in rings.iter_mut().zip(profile.chunks_exact(SEMITONES)) {
            ring.copy_from_slice(values);
        }
        Ok(ToneProfile { rings })
    }

    /// Infallible form of [`ToneProfile::new`] for a full chroma-shaped table.
    pub fn from_bands(profile: &ChromaVector) -> Self {
        ToneProfile {
            rings: std::array::from_fn(|o| {
                std::array::from_fn(|s| profile[o * SEMITONES + s])
            }),
        }
    }

    /// The all-zero profile. Its similarity to anything is 0.
    pub fn silence() -> Self {
        ToneProfile {
            rings: [[0.0; SEMITONES]; OCTAVES],
        }
    }

    /// Cosine similarity between `input` and this profile rotated so that its
    /// tonic sits `offset` semitones above A.
    ///
    /// Returns exactly `0.0` when either vector has zero norm.
    pub fn cosine_similarity(&self, input: &ChromaVector, offset: usize) -> f32 {
        let start = (TONIC_OFFSET + SEMITONES - offset % SEMITONES) % SEMITONES;

        let mut intersection = 0.0f32;
        let mut profile_norm = 0.0f32;
        let mut input_norm = 0.0f32;

        for (ring, octave) in self.rings.iter().zip(input.chunks_exact(SEMITONES)) {
            for (s, &x) in octave.iter().enumerate() {
                let p = ring[(start + s) % SEMITONES];
                intersection += x * p;
                profile_norm += p * p;
                input_norm += x * x;
            }
        }

        if profile_norm > 0.0 && input_norm > 0.0 {
            intersection / (profile_norm.sqrt() * input_norm.sqrt())
        } else {
            0.0
        }
    }
}
