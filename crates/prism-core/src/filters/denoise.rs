//! Non-local-means denoising.
//!
//! Color images are split into luma and chroma planes. Luma is filtered with
//! [`LUMINANCE_STRENGTH`], the two chroma planes together with
//! [`COLOR_STRENGTH`]. Patch distances for each search offset are summed with
//! an integral image, so the cost per pixel does not depend on the template
//! size.

use super::blur::reflect101;
use crate::math::saturate_u8;
use crate::types::PixelBuffer;

/// Filter strength applied to the luminance plane.
pub const LUMINANCE_STRENGTH: f32 = 10.0;

/// Filter strength applied to the chroma planes.
pub const COLOR_STRENGTH: f32 = 10.0;

/// Side of the square patch compared between pixels.
pub const TEMPLATE_WINDOW: usize = 7;

/// Side of the square area searched for similar patches.
pub const SEARCH_WINDOW: usize = 21;

/// Denoise a buffer with the fixed strengths above.
pub fn denoise(buf: &PixelBuffer) -> PixelBuffer {
    let width = buf.width() as usize;
    let height = buf.height() as usize;
    if width == 0 || height == 0 {
        return buf.clone();
    }
    let params = NlMeansParams {
        template_radius: TEMPLATE_WINDOW / 2,
        search_radius: SEARCH_WINDOW / 2,
    };

    match buf.channels() {
        3 => {
            let [y, cb, cr] = rgb_to_ycbcr(buf.samples());
            let y = nl_means(&[y], width, height, LUMINANCE_STRENGTH, params);
            let chroma = nl_means(&[cb, cr], width, height, COLOR_STRENGTH, params);
            let mut out = buf.clone();
            ycbcr_to_rgb(&y[0], &chroma[0], &chroma[1], out.samples_mut());
            out
        }
        _ => {
            let plane: Vec<f32> = buf.samples().iter().map(|&s| f32::from(s)).collect();
            let filtered = nl_means(&[plane], width, height, LUMINANCE_STRENGTH, params);
            let mut out = buf.clone();
            for (dst, &v) in out.samples_mut().iter_mut().zip(&filtered[0]) {
                *dst = saturate_u8(v);
            }
            out
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct NlMeansParams {
    template_radius: usize,
    search_radius: usize,
}

/// Filter a group of planes that share one set of patch weights.
///
/// The patch distance is the squared difference averaged over the template
/// area and the planes in the group; the weight is `exp(-d / h²)`.
fn nl_means(
    planes: &[Vec<f32>],
    width: usize,
    height: usize,
    strength: f32,
    params: NlMeansParams,
) -> Vec<Vec<f32>> {
    let r = params.template_radius;
    let s = params.search_radius as isize;
    let pixels = width * height;

    // Integral image covers the image padded by the template radius.
    let pw = width + 2 * r;
    let ph = height + 2 * r;
    let mut integral = vec![0.0f64; (pw + 1) * (ph + 1)];

    let area = ((2 * r + 1) * (2 * r + 1) * planes.len()) as f64;
    let inv_h2 = 1.0 / f64::from(strength * strength);

    let mut weight_sum = vec![0.0f64; pixels];
    let mut accum = vec![vec![0.0f64; pixels]; planes.len()];

    let sample = |plane: &[f32], x: isize, y: isize| -> f64 {
        let xi = reflect101(x, width);
        let yi = reflect101(y, height);
        f64::from(plane[yi * width + xi])
    };

    for dy in -s..=s {
        for dx in -s..=s {
            // Squared differences over the padded area, accumulated in place.
            for py in 0..ph {
                let y = py as isize - r as isize;
                let mut row_sum = 0.0f64;
                for px in 0..pw {
                    let x = px as isize - r as isize;
                    let mut d = 0.0f64;
                    for plane in planes {
                        let diff = sample(plane, x, y) - sample(plane, x + dx, y + dy);
                        d += diff * diff;
                    }
                    row_sum += d;
                    integral[(py + 1) * (pw + 1) + px + 1] =
                        integral[py * (pw + 1) + px + 1] + row_sum;
                }
            }

            let span = 2 * r + 1;
            for y in 0..height {
                for x in 0..width {
                    let top = y * (pw + 1);
                    let bottom = (y + span) * (pw + 1);
                    let ssd = integral[bottom + x + span] - integral[top + x + span]
                        - integral[bottom + x]
                        + integral[top + x];
                    let weight = (-(ssd / area) * inv_h2).exp();

                    let idx = y * width + x;
                    weight_sum[idx] += weight;
                    for (acc, plane) in accum.iter_mut().zip(planes) {
                        acc[idx] += weight * sample(plane, x as isize + dx, y as isize + dy);
                    }
                }
            }
        }
    }

    accum
        .into_iter()
        .map(|acc| {
            acc.iter()
                .zip(&weight_sum)
                .map(|(&a, &w)| (a / w) as f32)
                .collect()
        })
        .collect()
}

fn rgb_to_ycbcr(samples: &[u8]) -> [Vec<f32>; 3] {
    let n = samples.len() / 3;
    let mut y = Vec::with_capacity(n);
    let mut cb = Vec::with_capacity(n);
    let mut cr = Vec::with_capacity(n);
    for px in samples.chunks_exact(3) {
        let (r, g, b) = (f32::from(px[0]), f32::from(px[1]), f32::from(px[2]));
        y.push(0.299 * r + 0.587 * g + 0.114 * b);
        cb.push(128.0 - 0.168_736 * r - 0.331_264 * g + 0.5 * b);
        cr.push(128.0 + 0.5 * r - 0.418_688 * g - 0.081_312 * b);
    }
    [y, cb, cr]
}

fn ycbcr_to_rgb(y: &[f32], cb: &[f32], cr: &[f32], out: &mut [u8]) {
    let planes = y.iter().zip(cb).zip(cr);
    for (px, ((&y, &cb), &cr)) in out.chunks_exact_mut(3).zip(planes) {
        let (cb, cr) = (cb - 128.0, cr - 128.0);
        px[0] = saturate_u8(y + 1.402 * cr);
        px[1] = saturate_u8(y - 0.344_136 * cb - 0.714_136 * cr);
        px[2] = saturate_u8(y + 1.772 * cb);
    }
}
