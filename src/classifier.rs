//! Classifier
//!
//! Scores a chroma vector against every rotation of the major and minor
//! profiles and picks the best match by cosine similarity.

use crate::{
    constants::{major_profile, minor_profile, ChromaVector, SEMITONES},
    key::{Key, NUM_KEYS},
    profile::{ProfileError, ToneProfile},
};

/// Similarity of one chroma vector against every key hypothesis.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyScores {
    /// Similarity against the silence profile, the baseline to beat.
    pub silence: f32,
    /// One score per tonal key, indexed like [`Key::ALL`]: even indices are
    /// major, odd are minor, tonic rising from A in semitone steps.
    pub keys: [f32; NUM_KEYS - 1],
}

impl KeyScores {
    /// Highest-scoring key. Only a strictly greater score replaces the
    /// current best, so silence wins unless beaten and earlier keys win ties.
    pub fn best(&self) -> Key {
        let mut best_score = self.silence;
        let mut best_match = Key::Silence;
        for (i, &score) in self.keys.iter().enumerate() {
            if score > best_score {
                best_score = score;
                best_match = Key::ALL[i];
            }
        }
        best_match
    }
}

/// Key classifier over the three reference profiles.
#[derive(Debug, Clone)]
pub struct Classifier {
    major: ToneProfile,
    minor: ToneProfile,
    silence: ToneProfile,
}

impl Classifier {
    /// Classifier over the built-in major and minor profiles.
    pub fn new() -> Self {
        Classifier {
            major: ToneProfile::from_bands(&major_profile()),
            minor: ToneProfile::from_bands(&minor_profile()),
            silence: ToneProfile::silence(),
        }
    }

    /// Classifier over custom 72-band major and minor templates.
    pub fn with_profiles(major: &[f32], minor: &[f32]) -> Result<Self, ProfileError> {
        Ok(Classifier {
            major: ToneProfile::new(major)?,
            minor: ToneProfile::new(minor)?,
            silence: ToneProfile::silence(),
        })
    }

    /// Score `chroma` against all 24 key hypotheses and the silence baseline.
    pub fn scores(&self, chroma: &ChromaVector) -> KeyScores {
        let mut keys = [0.0; NUM_KEYS - 1];
        for offset in 0..SEMITONES {
            keys[offset * 2] = self.major.cosine_similarity(chroma, offset);
            keys[offset * 2 + 1] = self.minor.cosine_similarity(chroma, offset);
        }
        KeyScores {
            silence: self.silence.cosine_similarity(chroma, 0),
            keys,
        }
    }

    /// Best-matching key for `chroma`; silence when nothing scores above it.
    pub fn classify(&self, chroma: &ChromaVector) -> Key {
        let key = self.scores(chroma).best();
        log::trace!("classified chroma vector as {key:?}");
        key
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Classifier::new()
    }
}
