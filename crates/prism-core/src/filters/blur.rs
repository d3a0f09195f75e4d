//! Separable Gaussian blur with kernel-size driven sigma.

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, PipelineResult};
use crate::math::saturate_u8;
use crate::types::PixelBuffer;

/// Blur kernel dimensions. Both sides must be odd and positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KernelSize {
    pub width: u32,
    pub height: u32,
}

impl KernelSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Reject even or zero sides.
    pub fn validate(self) -> PipelineResult<()> {
        for (axis, size) in [("width", self.width), ("height", self.height)] {
            if size == 0 || size % 2 == 0 {
                return Err(PipelineError::InvalidParameter {
                    stage: "blur",
                    message: format!("kernel {axis} {size} must be odd and positive"),
                });
            }
        }
        Ok(())
    }
}

impl From<[u32; 2]> for KernelSize {
    fn from([width, height]: [u32; 2]) -> Self {
        Self { width, height }
    }
}

/// Sigma derived from the kernel size when none is given.
pub fn auto_sigma(size: u32) -> f32 {
    0.3 * ((size as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Normalized 1-D Gaussian weights for an odd `size`.
///
/// Sizes up to 7 use the fixed binomial tables; larger sizes sample the
/// Gaussian at [`auto_sigma`].
pub fn gaussian_kernel_1d(size: u32) -> Vec<f32> {
    match size {
        1 => vec![1.0],
        3 => vec![0.25, 0.5, 0.25],
        5 => vec![0.0625, 0.25, 0.375, 0.25, 0.0625],
        7 => vec![
            0.031_25, 0.109_375, 0.218_75, 0.281_25, 0.218_75, 0.109_375, 0.031_25,
        ],
        _ => {
            let sigma = auto_sigma(size);
            let center = (size / 2) as f32;
            let mut kernel: Vec<f32> = (0..size)
                .map(|i| {
                    let x = i as f32 - center;
                    (-(x * x) / (2.0 * sigma * sigma)).exp()
                })
                .collect();
            let sum: f32 = kernel.iter().sum();
            for v in &mut kernel {
                *v /= sum;
            }
            kernel
        }
    }
}

/// Mirror an out-of-range index back into `0..len` without repeating the
/// edge sample (`dcb|abcd|cba`).
#[inline]
pub(crate) fn reflect101(mut i: isize, len: usize) -> usize {
    let n = len as isize;
    if n == 1 {
        return 0;
    }
    loop {
        if i < 0 {
            i = -i;
        } else if i >= n {
            i = 2 * n - 2 - i;
        } else {
            return i as usize;
        }
    }
}

/// Blur every channel with a separable Gaussian of the given kernel size.
pub fn gaussian_blur(buf: &PixelBuffer, kernel: KernelSize) -> PipelineResult<PixelBuffer> {
    kernel.validate()?;

    let width = buf.width() as usize;
    let height = buf.height() as usize;
    let channels = buf.channels();
    if width == 0 || height == 0 {
        return Ok(buf.clone());
    }

    let kx = gaussian_kernel_1d(kernel.width);
    let ky = gaussian_kernel_1d(kernel.height);
    let rx = (kx.len() / 2) as isize;
    let ry = (ky.len() / 2) as isize;
    let src = buf.samples();

    // Horizontal pass
    let mut tmp = vec![0.0f32; src.len()];
    for y in 0..height {
        let row = y * width * channels;
        for x in 0..width {
            for c in 0..channels {
                let mut acc = 0.0f32;
                for (k, &w) in kx.iter().enumerate() {
                    let sx = reflect101(x as isize + k as isize - rx, width);
                    acc += w * f32::from(src[row + sx * channels + c]);
                }
                tmp[row + x * channels + c] = acc;
            }
        }
    }

    // Vertical pass
    let mut result = buf.clone();
    let out = result.samples_mut();
    let stride = width * channels;
    for y in 0..height {
        for x in 0..width {
            for c in 0..channels {
                let mut acc = 0.0f32;
                for (k, &w) in ky.iter().enumerate() {
                    let sy = reflect101(y as isize + k as isize - ry, height);
                    acc += w * tmp[sy * stride + x * channels + c];
                }
                out[y * stride + x * channels + c] = saturate_u8(acc);
            }
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Rgb, RgbImage};

    #[test]
    fn test_even_kernel_is_rejected() {
        let buf = PixelBuffer::from(RgbImage::new(8, 8));
        let err = gaussian_blur(&buf, KernelSize::new(4, 4)).unwrap_err();
        assert!(err.is_invalid_parameter());
    }

    #[test]
    fn test_zero_kernel_is_rejected() {
        let buf = PixelBuffer::from(RgbImage::new(8, 8));
        let err = gaussian_blur(&buf, KernelSize::new(5, 0)).unwrap_err();
        assert!(err.to_string().contains("height"));
    }

    #[test]
    fn test_kernels_sum_to_one() {
        for size in [1, 3, 5, 7, 9, 15, 31] {
            let k = gaussian_kernel_1d(size);
            assert_eq!(k.len(), size as usize);
            let sum: f32 = k.iter().sum();
            assert!((sum - 1.0).abs() < 1e-5, "size {size} sums to {sum}");
        }
    }

    #[test]
    fn test_auto_sigma() {
        assert!((auto_sigma(3) - 0.8).abs() < 1e-6);
        assert!((auto_sigma(9) - 1.7).abs() < 1e-6);
    }

    #[test]
    fn test_reflect101() {
        assert_eq!(reflect101(-1, 5), 1);
        assert_eq!(reflect101(-2, 5), 2);
        assert_eq!(reflect101(5, 5), 3);
        assert_eq!(reflect101(6, 5), 2);
        assert_eq!(reflect101(3, 1), 0);
    }

    #[test]
    fn test_constant_image_unchanged() {
        let buf = PixelBuffer::from(RgbImage::from_pixel(9, 7, Rgb([40, 120, 200])));
        let out = gaussian_blur(&buf, KernelSize::new(5, 5)).unwrap();
        assert_eq!(out, buf);
    }

    #[test]
    fn test_impulse_spreads_symmetrically() {
        let mut img = GrayImage::new(9, 9);
        img.put_pixel(4, 4, image::Luma([255]));
        let out = gaussian_blur(&PixelBuffer::from(img), KernelSize::new(3, 3)).unwrap();
        let s = out.samples();
        let at = |x: usize, y: usize| s[y * 9 + x];

        assert_eq!(at(4, 4), 64); // 255 * 0.5 * 0.5
        assert_eq!(at(3, 4), at(5, 4));
        assert_eq!(at(4, 3), at(4, 5));
        assert!(at(4, 4) > at(3, 4));
        assert_eq!(at(0, 0), 0);
    }

    #[test]
    fn test_non_square_kernel() {
        let mut img = GrayImage::new(9, 9);
        img.put_pixel(4, 4, image::Luma([255]));
        let out = gaussian_blur(&PixelBuffer::from(img), KernelSize::new(1, 3)).unwrap();
        let s = out.samples();
        // Width 1 means no horizontal spread
        assert_eq!(s[4 * 9 + 3], 0);
        assert!(s[3 * 9 + 4] > 0);
    }
}
