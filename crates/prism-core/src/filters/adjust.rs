//! Linear brightness/contrast adjustment.

use crate::math::saturate_u8;
use crate::types::PixelBuffer;

/// Apply `out = clamp(round(alpha * in + beta), 0, 255)` to every sample.
///
/// No range checks on `alpha` or `beta`; any value is accepted.
pub fn adjust_brightness_contrast(buf: &PixelBuffer, alpha: f32, beta: f32) -> PixelBuffer {
    let mut lut = [0u8; 256];
    for (value, slot) in lut.iter_mut().enumerate() {
        *slot = saturate_u8(alpha * value as f32 + beta);
    }

    let mut out = buf.clone();
    for sample in out.samples_mut() {
        *sample = lut[*sample as usize];
    }
    out
}
