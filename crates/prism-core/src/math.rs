//! Shared math utilities.

/// L2-normalize a vector in place so its magnitude is 1.
///
/// The zero vector is left unchanged.
pub fn l2_normalize_in_place(v: &mut [f64]) {
    let norm: f64 = v.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}

/// L2-normalize a slice, returning a new vector with unit magnitude.
pub fn l2_normalize(v: &[f64]) -> Vec<f64> {
    let mut result = v.to_vec();
    l2_normalize_in_place(&mut result);
    result
}

/// Round to nearest and saturate into the 8-bit sample range.
#[inline]
pub fn saturate_u8(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}
