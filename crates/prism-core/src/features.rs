//! Color-histogram feature extraction.
//!
//! Each channel is reduced to a 256-bin histogram of its sample values and
//! the histograms are concatenated channel-major. The result depends only on
//! the value distribution, not on where the values sit in the image.

use crate::math::l2_normalize;
use crate::types::{ChannelOrder, FeatureVector, PixelBuffer, BINS_PER_CHANNEL};

/// Compute the concatenated per-channel histogram of a buffer.
pub fn extract_features(buf: &PixelBuffer, order: ChannelOrder) -> FeatureVector {
    let channels = buf.channels();
    let mut per_channel = vec![[0u32; BINS_PER_CHANNEL]; channels];

    for px in buf.samples().chunks_exact(channels) {
        for (hist, &value) in per_channel.iter_mut().zip(px) {
            hist[value as usize] += 1;
        }
    }

    let counts = order
        .offsets(channels)
        .into_iter()
        .flat_map(|c| per_channel[c])
        .collect();
    FeatureVector::new(counts, channels)
}

/// Feature values as written to the dataset, optionally L2-normalized.
pub fn dataset_values(features: &FeatureVector, normalize: bool) -> Vec<f64> {
    let values = features.to_f64();
    if normalize {
        l2_normalize(&values)
    } else {
        values
    }
}
