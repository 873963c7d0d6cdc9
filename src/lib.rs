//! # key_finder
//!
//! Musical key detection for decoded audio: fold a mono signal into a 72-band
//! chroma profile (12 semitones × 6 octaves) and classify it against major,
//! minor and silence tone profiles.
//!
//! ## Example
//! ```rust,no_run
//! use key_finder::{Key, KeyFinder};
//!
//! fn run() -> Result<(), Box<dyn std::error::Error>> {
//!     // 1) Build the shared kernel, window, profiles and FFT workspaces once
//!     let finder = KeyFinder::builder()
//!         .sample_rate(4410)
//!         .build()?;
//!
//!     // 2) Feed mono samples at the working rate
//!     let samples: Vec<f32> = vec![0.0; 4410 * 30]; // fill with decoded audio
//!     let key = finder.key(&samples)?;
//!
//!     if key == Key::Silence {
//!         println!("no tonal content");
//!     } else {
//!         println!("Detected {key} ({:?} {:?})", key.tonic(), key.mode());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//! - [`SpectrumAnalyser`]: Blackman-windowed frames with a quarter-frame hop,
//!   a packed real FFT and a constant-Q-like [`ChromaTransform`] kernel,
//!   averaged into one [`ChromaVector`].
//! - [`Classifier`]: cosine similarity against every rotation of the
//!   [`ToneProfile`]s, best of 24 keys or silence.
//! - [`KeyFinder`]: decode → analyse → classify, batched over `rayon`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rust_2018_idioms)]
#![deny(clippy::all)]

/// Chroma kernel.
pub use chroma::{ChromaError, ChromaTransform, KernelBand};

/// Key classification.
pub use classifier::{Classifier, KeyScores};

/// Fixed analysis contract.
pub use constants::ChromaVector;

/// End-to-end pipeline.
pub use finder::{Decoder, DecodeError, KeyFinder, KeyFinderBuilder, KeyFinderError, PcmSignal};

/// Packed real FFT.
pub use fourier::{FourierError, FourierTransform};

/// Output alphabet.
pub use key::{Key, Mode, PitchClass};

/// Workspace pooling.
pub use pool::ResourcePool;

/// Tone profiles.
pub use profile::{ProfileError, ToneProfile};

/// Framing and averaging.
pub use spectrum::{AnalysisError, SpectrumAnalyser, SpectrumAnalyserBuilder};

/// Analysis windows.
pub use window::TemporalWindow;

/// Chroma kernel module.
pub mod chroma;

/// Classifier module.
pub mod classifier;

/// Analysis constants and reference tables.
pub mod constants;

/// Pipeline module.
pub mod finder;

/// FFT module.
pub mod fourier;

/// Key label module.
pub mod key;

/// Resource pool module.
pub mod pool;

/// Tone profile module.
pub mod profile;

/// Spectrum analyser module.
pub mod spectrum;

/// Temporal window module.
pub mod window;
