//! Speaker embeddings
//!
//! A speaker embedding is a fixed-length vector fingerprint of a voice over
//! one speech segment. The pipeline only depends on the
//! [`EmbeddingExtractor`] seam; [`FilterbankEmbedder`] is a lightweight
//! built-in implementation based on log-mel filterbank statistics, suitable
//! when no external speaker model is wired in.

use rustfft::{num_complex::Complex, FftPlanner};
use std::f32::consts::PI;

use crate::error::{VoxError, VoxResult};

/// Analysis frame length in samples (25ms at 16kHz)
const FRAME_LENGTH: usize = 400;

/// Analysis frame shift in samples (10ms at 16kHz)
const FRAME_SHIFT: usize = 160;

/// FFT size for the power spectrum
const N_FFT: usize = 512;

/// Number of mel filterbank channels
const N_MELS: usize = 40;

/// Built-in embedding dimension (mean + std per mel channel)
pub const EMBEDDING_DIM: usize = 2 * N_MELS;

/// Speaker embedding vector
#[derive(Debug, Clone, PartialEq)]
pub struct SpeakerEmbedding {
    vector: Vec<f32>,
}

impl SpeakerEmbedding {
    /// Create a new embedding from a raw vector
    #[must_use]
    pub fn new(vector: Vec<f32>) -> Self {
        Self { vector }
    }

    /// Get the embedding vector
    #[must_use]
    pub fn vector(&self) -> &[f32] {
        &self.vector
    }

    /// Get embedding dimension
    #[must_use]
    pub fn dim(&self) -> usize {
        self.vector.len()
    }

    /// Compute cosine similarity with another embedding.
    ///
    /// Mismatched dimensions or zero-norm vectors yield 0.0.
    #[must_use]
    pub fn cosine_similarity(&self, other: &Self) -> f32 {
        if self.vector.len() != other.vector.len() {
            return 0.0;
        }

        let dot: f32 = self
            .vector
            .iter()
            .zip(other.vector.iter())
            .map(|(a, b)| a * b)
            .sum();

        let norm_a: f32 = self.vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        let norm_b: f32 = other.vector.iter().map(|x| x * x).sum::<f32>().sqrt();

        if norm_a < f32::EPSILON || norm_b < f32::EPSILON {
            return 0.0;
        }

        dot / (norm_a * norm_b)
    }

    /// Compute Euclidean distance to another embedding
    #[must_use]
    pub fn euclidean_distance(&self, other: &Self) -> f32 {
        if self.vector.len() != other.vector.len() {
            return f32::MAX;
        }

        self.vector
            .iter()
            .zip(other.vector.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f32>()
            .sqrt()
    }

    /// Normalize the embedding to unit length
    #[must_use]
    pub fn normalized(&self) -> Self {
        let norm: f32 = self.vector.iter().map(|x| x * x).sum::<f32>().sqrt();

        if norm < f32::EPSILON {
            return self.clone();
        }

        Self {
            vector: self.vector.iter().map(|x| x / norm).collect(),
        }
    }
}

/// Seam for the external speaker embedding model.
///
/// Called exactly once per speech segment, in segment order; implementations
/// must be deterministic for the pipeline's outputs to be reproducible.
pub trait EmbeddingExtractor {
    /// Map a waveform slice to a fixed-length speaker embedding.
    fn embed(&self, samples: &[f32], sample_rate: u32) -> VoxResult<SpeakerEmbedding>;
}

/// Log-mel filterbank statistics embedder.
///
/// Frames the segment (25ms window, 10ms shift, Hann window), computes the
/// power spectrum per frame, applies a triangular mel filterbank, and pools
/// log energies into per-channel mean and standard deviation. The pooled
/// vector is L2-normalized. Segments shorter than one analysis frame are
/// zero-padded to a single frame.
#[derive(Debug, Clone)]
pub struct FilterbankEmbedder {
    sample_rate: u32,
    /// Triangular mel filters over `N_FFT / 2 + 1` frequency bins
    mel_filters: Vec<Vec<f32>>,
    /// Precomputed Hann window
    window: Vec<f32>,
}

impl FilterbankEmbedder {
    /// Create an embedder for the given sample rate
    #[must_use]
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            mel_filters: compute_mel_filterbank(N_MELS, N_FFT, sample_rate),
            window: hann_window(FRAME_LENGTH),
        }
    }

    /// Sample rate this embedder was built for
    #[must_use]
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Compute log-mel energies for one windowed frame
    fn log_mel_frame(&self, frame: &[f32], planner: &mut FftPlanner<f32>) -> Vec<f32> {
        let fft = planner.plan_fft_forward(N_FFT);

        let mut buffer: Vec<Complex<f32>> = (0..N_FFT)
            .map(|i| {
                let sample = if i < frame.len() {
                    frame[i] * self.window[i.min(self.window.len() - 1)]
                } else {
                    0.0
                };
                Complex::new(sample, 0.0)
            })
            .collect();

        fft.process(&mut buffer);

        let power: Vec<f32> = buffer[..=N_FFT / 2]
            .iter()
            .map(|c| c.norm_sqr())
            .collect();

        self.mel_filters
            .iter()
            .map(|filter| {
                let energy: f32 = filter
                    .iter()
                    .zip(power.iter())
                    .map(|(&f, &p)| f * p)
                    .sum();
                energy.max(1e-10).ln()
            })
            .collect()
    }
}

impl EmbeddingExtractor for FilterbankEmbedder {
    fn embed(&self, samples: &[f32], sample_rate: u32) -> VoxResult<SpeakerEmbedding> {
        if samples.is_empty() {
            return Err(VoxError::Embedding(
                "empty audio for embedding extraction".to_string(),
            ));
        }
        if sample_rate != self.sample_rate {
            return Err(VoxError::Embedding(format!(
                "embedder built for {}Hz, got {}Hz",
                self.sample_rate, sample_rate
            )));
        }

        // Short segments get one zero-padded frame instead of an error
        let padded;
        let samples = if samples.len() < FRAME_LENGTH {
            padded = {
                let mut p = samples.to_vec();
                p.resize(FRAME_LENGTH, 0.0);
                p
            };
            &padded[..]
        } else {
            samples
        };

        let num_frames = (samples.len() - FRAME_LENGTH) / FRAME_SHIFT + 1;
        let mut planner = FftPlanner::new();

        let mut means = vec![0.0f32; N_MELS];
        let mut sq_sums = vec![0.0f32; N_MELS];

        for frame_idx in 0..num_frames {
            let start = frame_idx * FRAME_SHIFT;
            let log_mel = self.log_mel_frame(&samples[start..start + FRAME_LENGTH], &mut planner);

            for (channel, &value) in log_mel.iter().enumerate() {
                means[channel] += value;
                sq_sums[channel] += value * value;
            }
        }

        let n = num_frames as f32;
        let mut vector = Vec::with_capacity(EMBEDDING_DIM);
        for channel in 0..N_MELS {
            means[channel] /= n;
            vector.push(means[channel]);
        }
        for channel in 0..N_MELS {
            let variance = (sq_sums[channel] / n - means[channel] * means[channel]).max(0.0);
            vector.push(variance.sqrt());
        }

        Ok(SpeakerEmbedding::new(vector).normalized())
    }
}

/// Precompute a Hann window of the given length
fn hann_window(len: usize) -> Vec<f32> {
    (0..len)
        .map(|i| 0.5 * (1.0 - (2.0 * PI * i as f32 / len as f32).cos()))
        .collect()
}

/// Convert frequency in Hz to mel scale
fn hz_to_mel(hz: f32) -> f32 {
    2595.0 * (1.0 + hz / 700.0).log10()
}

/// Convert mel scale to frequency in Hz
fn mel_to_hz(mel: f32) -> f32 {
    700.0 * (10.0f32.powf(mel / 2595.0) - 1.0)
}

/// Compute a triangular mel filterbank matrix (`n_mels` x `n_fft/2 + 1`)
fn compute_mel_filterbank(n_mels: usize, n_fft: usize, sample_rate: u32) -> Vec<Vec<f32>> {
    let n_freqs = n_fft / 2 + 1;
    let max_mel = hz_to_mel(sample_rate as f32 / 2.0);

    // n_mels + 2 equally spaced mel points define the triangle edges
    let mel_points: Vec<f32> = (0..n_mels + 2)
        .map(|i| mel_to_hz(max_mel * i as f32 / (n_mels + 1) as f32))
        .collect();

    let bin_of = |hz: f32| (hz * n_fft as f32 / sample_rate as f32).floor() as usize;

    let mut filters = vec![vec![0.0f32; n_freqs]; n_mels];
    for (m, filter) in filters.iter_mut().enumerate() {
        let left = bin_of(mel_points[m]);
        let center = bin_of(mel_points[m + 1]);
        let right = bin_of(mel_points[m + 2]);

        for bin in left..center {
            if center > left {
                filter[bin.min(n_freqs - 1)] = (bin - left) as f32 / (center - left) as f32;
            }
        }
        for bin in center..=right.min(n_freqs - 1) {
            if right > center {
                filter[bin] = (right - bin) as f32 / (right - center) as f32;
            }
        }
    }

    filters
}
