//! Key finder
//!
//! Ties the pipeline together: decode → analyse → classify, for one signal or
//! for many in parallel. Decoding itself is left to implementors of
//! [`Decoder`].

use std::{borrow::Cow, time::Duration};

use rayon::prelude::*;
use thiserror::Error;

use crate::{
    classifier::Classifier,
    constants::{ChromaVector, DOWNSAMPLED_FRAME_RATE, FFT_FRAME_SIZE},
    fourier::{FourierError, FourierTransform},
    key::Key,
    pool::ResourcePool,
    spectrum::{AnalysisError, SpectrumAnalyser},
};

/// Errors reported by a [`Decoder`].
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The source is longer than the configured admission limit.
    #[error("duration {duration:?} exceeds limit {limit:?}")]
    DurationExceeded {
        /// Duration reported by the source.
        duration: Duration,
        /// The configured limit.
        limit: Duration,
    },

    /// The source delivers samples at a rate other than the working rate.
    #[error("sample rate {got} Hz does not match working rate {expected} Hz")]
    SampleRateMismatch {
        /// Working rate of the finder.
        expected: u32,
        /// Rate reported by the source.
        got: u32,
    },

    /// Any decoder-specific failure.
    #[error("decode failed: {0}")]
    Other(String),
}

/// Errors from the key-finding pipeline.
#[derive(Debug, Error)]
pub enum KeyFinderError {
    /// The source could not be decoded or was not admitted.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Analysis of the decoded samples failed.
    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    /// The FFT workspace could not be planned.
    #[error(transparent)]
    Fourier(#[from] FourierError),
}

/// Supplies mono samples at the finder's working sample rate.
///
/// Format handling, channel mixing and resampling all happen behind this
/// trait.
pub trait Decoder {
    /// Name used in log messages.
    fn describe(&self) -> String {
        String::from("<signal>")
    }

    /// Duration of the source if known without decoding it.
    fn duration(&self) -> Option<Duration> {
        None
    }

    /// Sample rate of the decoded output, if the source knows it.
    fn sample_rate(&self) -> Option<u32> {
        None
    }

    /// Produce the mono samples. Sources already in memory may lend them.
    fn decode(&self) -> Result<Cow<'_, [f32]>, DecodeError>;
}

/// Samples already in memory at a known rate.
#[derive(Debug, Clone)]
pub struct PcmSignal {
    name: String,
    samples: Vec<f32>,
    sample_rate: u32,
}

impl PcmSignal {
    /// Wrap decoded samples.
    pub fn new(name: impl Into<String>, samples: Vec<f32>, sample_rate: u32) -> Self {
        PcmSignal {
            name: name.into(),
            samples,
            sample_rate,
        }
    }

    /// The wrapped samples.
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }
}

impl Decoder for PcmSignal {
    fn describe(&self) -> String {
        self.name.clone()
    }

    fn duration(&self) -> Option<Duration> {
        (self.sample_rate > 0)
            .then(|| Duration::from_secs_f64(self.samples.len() as f64 / self.sample_rate as f64))
    }

    fn sample_rate(&self) -> Option<u32> {
        Some(self.sample_rate)
    }

    fn decode(&self) -> Result<Cow<'_, [f32]>, DecodeError> {
        Ok(Cow::Borrowed(&self.samples))
    }
}

/// Builder for a [`KeyFinder`].
pub struct KeyFinderBuilder {
    sample_rate: u32,
    frame_size: usize,
    max_duration: Option<Duration>,
    workers: usize,
}

impl KeyFinderBuilder {
    /// Start with defaults:
    /// sample_rate = 4410, frame_size = 16384, no duration limit,
    /// one FFT workspace per rayon thread.
    pub fn new() -> Self {
        KeyFinderBuilder {
            sample_rate: DOWNSAMPLED_FRAME_RATE,
            frame_size: FFT_FRAME_SIZE,
            max_duration: None,
            workers: rayon::current_num_threads(),
        }
    }

    /// Set the working sample rate decoders deliver.
    pub fn sample_rate(mut self, rate: u32) -> Self {
        self.sample_rate = rate;
        self
    }

    /// Set the FFT frame size.
    pub fn frame_size(mut self, size: usize) -> Self {
        self.frame_size = size;
        self
    }

    /// Skip sources whose reported duration exceeds `limit`.
    pub fn max_duration(mut self, limit: Duration) -> Self {
        self.max_duration = Some(limit);
        self
    }

    /// Set the maximum number of FFT workspaces kept in the pool.
    pub fn workers(mut self, n: usize) -> Self {
        self.workers = n;
        self
    }

    /// Build the shared kernel, window, profiles and workspace pool.
    pub fn build(self) -> Result<KeyFinder, KeyFinderError> {
        let analyser = SpectrumAnalyser::builder()
            .sample_rate(self.sample_rate)
            .frame_size(self.frame_size)
            .build()?;
        let prototype = analyser.fourier_transform()?;
        let workspaces = ResourcePool::new(self.workers, move || prototype.clone());

        log::debug!(
            "key finder ready with up to {} FFT workspaces",
            workspaces.capacity()
        );

        Ok(KeyFinder {
            analyser,
            classifier: Classifier::new(),
            workspaces,
            max_duration: self.max_duration,
        })
    }
}

impl Default for KeyFinderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// End-to-end key detection.
///
/// All analysis state is immutable apart from the pooled FFT workspaces, so a
/// single finder can be shared across threads.
#[derive(Debug)]
pub struct KeyFinder {
    analyser: SpectrumAnalyser,
    classifier: Classifier,
    workspaces: ResourcePool<FourierTransform>,
    max_duration: Option<Duration>,
}

impl KeyFinder {
    /// Start customizing with a builder.
    pub fn builder() -> KeyFinderBuilder {
        KeyFinderBuilder::new()
    }

    /// Finder with the standard configuration.
    pub fn new() -> Result<Self, KeyFinderError> {
        KeyFinderBuilder::new().build()
    }

    /// The shared spectrum analyser.
    pub fn analyser(&self) -> &SpectrumAnalyser {
        &self.analyser
    }

    /// The shared classifier.
    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Mean chroma vector of `samples`.
    pub fn chroma_vector(&self, samples: &[f32]) -> Result<ChromaVector, KeyFinderError> {
        let chroma = self
            .workspaces
            .with(|fft| self.analyser.chroma_vector(fft, samples))?;
        Ok(chroma)
    }

    /// Key of `samples`, which must already be at the working sample rate.
    pub fn key(&self, samples: &[f32]) -> Result<Key, KeyFinderError> {
        let chroma = self.chroma_vector(samples)?;
        Ok(self.classifier.classify(&chroma))
    }

    /// Admit, decode and classify one source.
    pub fn analyse<D: Decoder + ?Sized>(&self, source: &D) -> Result<Key, KeyFinderError> {
        if let (Some(limit), Some(duration)) = (self.max_duration, source.duration()) {
            if duration > limit {
                return Err(DecodeError::DurationExceeded { duration, limit }.into());
            }
        }
        let expected = self.analyser.sample_rate();
        if let Some(got) = source.sample_rate().filter(|&rate| rate != expected) {
            return Err(DecodeError::SampleRateMismatch { expected, got }.into());
        }
        let samples = source.decode()?;
        let key = self.key(&samples)?;
        log::info!("{}: {}", source.describe(), key_label(key));
        Ok(key)
    }

    /// Analyse many sources in parallel. Results come back in input order;
    /// a failing source does not affect the others.
    pub fn analyse_batch<D: Decoder + Sync>(&self, sources: &[D]) -> Vec<Result<Key, KeyFinderError>> {
        log::debug!("analysing batch of {} sources", sources.len());
        sources
            .par_iter()
            .map(|source| {
                let result = self.analyse(source);
                if let Err(e) = &result {
                    log::warn!("skipping {}: {e}", source.describe());
                }
                result
            })
            .collect()
    }
}

fn key_label(key: Key) -> &'static str {
    match key {
        Key::Silence => "silence",
        k => k.as_str(),
    }
}
