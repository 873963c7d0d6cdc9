//! Chroma kernel construction and application.

use key_finder::{
    constants::{BANDS, DOWNSAMPLED_FRAME_RATE, FFT_FRAME_SIZE, FREQUENCIES},
    ChromaError, ChromaTransform,
};

fn standard() -> ChromaTransform {
    ChromaTransform::new(DOWNSAMPLED_FRAME_RATE, FFT_FRAME_SIZE).unwrap()
}

#[test]
fn kernel_coefficients_sum_to_one_before_frequency_scaling() {
    let kernel = standard();
    assert_eq!(kernel.bands().len(), BANDS);
    for (i, band) in kernel.bands().iter().enumerate() {
        assert_eq!(band.frequency, FREQUENCIES[i]);
        assert!(!band.coefficients.is_empty(), "band {i} is empty");
        let sum: f32 = band.coefficients.iter().map(|c| c / band.frequency).sum();
        assert!((sum - 1.0).abs() < 1e-4, "band {i} sums to {sum}");
        assert!(band.coefficients.iter().all(|&c| c >= 0.0));
    }
}

#[test]
fn kernel_windows_follow_bin_space_geometry() {
    let kernel = standard();
    let q = 0.8 * (2f32.powf(1.0 / 12.0) - 1.0);
    for band in kernel.bands() {
        let centre = band.frequency * FFT_FRAME_SIZE as f32 / DOWNSAMPLED_FRAME_RATE as f32;
        let width = centre * q;
        let start = centre - width / 2.0;
        assert_eq!(band.first_bin, start.ceil() as usize);
        assert_eq!(
            band.first_bin + band.coefficients.len(),
            (start + width).floor() as usize
        );
    }
}

#[test]
fn bands_do_not_overlap() {
    let kernel = standard();
    for pair in kernel.bands().windows(2) {
        assert!(pair[0].first_bin + pair[0].coefficients.len() <= pair[1].first_bin);
    }
}

#[test]
fn flat_spectrum_yields_band_frequencies() {
    let kernel = standard();
    let flat = vec![1.0f32; kernel.spectrum_len()];
    let chroma = kernel.chroma_vector(&flat).unwrap();
    for (i, &value) in chroma.iter().enumerate() {
        let expected = FREQUENCIES[i];
        assert!(
            (value - expected).abs() / expected < 1e-4,
            "band {i}: expected {expected}, got {value}"
        );
    }
}

#[test]
fn single_bin_lands_in_one_band() {
    let kernel = standard();
    let band = &kernel.bands()[45];
    let mut spectrum = vec![0.0f32; kernel.spectrum_len()];
    let bin = band.first_bin + band.coefficients.len() / 2;
    spectrum[bin] = 1.0;

    let chroma = kernel.chroma_vector(&spectrum).unwrap();
    for (i, &value) in chroma.iter().enumerate() {
        if i == 45 {
            assert!(value > 0.0);
        } else {
            assert_eq!(value, 0.0, "band {i} picked up energy");
        }
    }
}

#[test]
fn chroma_vector_is_pure() {
    let kernel = standard();
    let spectrum: Vec<f32> = (0..kernel.spectrum_len())
        .map(|i| ((i * 31) % 17) as f32)
        .collect();
    let a = kernel.chroma_vector(&spectrum).unwrap();
    let b = kernel.chroma_vector(&spectrum).unwrap();
    assert_eq!(a, b);
}

#[test]
fn rejects_frequencies_above_nyquist() {
    assert!(matches!(
        ChromaTransform::new(2000, FFT_FRAME_SIZE),
        Err(ChromaError::AboveNyquist { .. })
    ));
}

#[test]
fn rejects_insufficient_low_end_resolution() {
    assert!(matches!(
        ChromaTransform::new(DOWNSAMPLED_FRAME_RATE, 2048),
        Err(ChromaError::InsufficientResolution { .. })
    ));
}

#[test]
fn rejects_degenerate_parameters() {
    assert!(matches!(
        ChromaTransform::new(0, FFT_FRAME_SIZE),
        Err(ChromaError::Configuration(_))
    ));
    assert!(matches!(
        ChromaTransform::new(DOWNSAMPLED_FRAME_RATE, 0),
        Err(ChromaError::Configuration(_))
    ));
}

#[test]
fn rejects_mismatched_spectrum() {
    let kernel = standard();
    match kernel.chroma_vector(&[0.0; 100]) {
        Err(ChromaError::InvalidSpectrumLength { expected, got }) => {
            assert_eq!(expected, FFT_FRAME_SIZE / 2);
            assert_eq!(got, 100);
        }
        other => panic!("expected InvalidSpectrumLength, got {other:?}"),
    }
}

#[test]
fn higher_sample_rates_build() {
    // higher Nyquist, same bin resolution order
    let kernel = ChromaTransform::new(8000, 32768).unwrap();
    assert_eq!(kernel.spectrum_len(), 16384);
}
