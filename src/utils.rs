use image::{GrayImage, Luma};
use ndarray::{Array1, Array2, Axis, Zip};

/// Horizontal distance between consecutive wave samples, in pixels
pub const WAVE_STEP: f64 = 10.0;

/// Clamp a circle center so a circle of `radius` stays inside `[0, extent]`.
///
/// When the canvas is narrower than the circle the lower bound wins.
#[inline]
pub fn clamp_center(center: i64, radius: i64, extent: i64) -> i64 {
    radius.max(center.min(extent - radius))
}

/// Clamp a coordinate to `[0, extent]`
#[inline]
pub fn clamp_to_extent(value: f64, extent: f64) -> f64 {
    value.max(0.0).min(extent)
}

/// Reorder two corners so the first is the minimum on both axes.
pub fn ordered_corners(a: (i64, i64), b: (i64, i64)) -> ((i64, i64), (i64, i64)) {
    let (mut x1, mut y1) = a;
    let (mut x2, mut y2) = b;
    if x2 < x1 {
        std::mem::swap(&mut x1, &mut x2);
    }
    if y2 < y1 {
        std::mem::swap(&mut y1, &mut y2);
    }
    ((x1, y1), (x2, y2))
}

/// Sample positions across `[0, width)` at `WAVE_STEP` spacing
pub fn wave_xs(width: u32) -> Array1<f64> {
    Array1::range(0.0, width as f64, WAVE_STEP)
}

/// Height of a wave at `x`, for the wave with the given phase index
#[inline]
pub fn wave_offset(x: f64, amplitude: f64, wave: u32) -> f64 {
    amplitude * (x / 50.0 + wave as f64).sin()
}

/// Euclidean distance from point `p` to the segment `a`-`b`
pub fn segment_distance(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq == 0.0 {
        0.0
    } else {
        (((p.0 - a.0) * dx + (p.1 - a.1) * dy) / len_sq).clamp(0.0, 1.0)
    };
    let (cx, cy) = (a.0 + t * dx, a.1 + t * dy);
    ((p.0 - cx).powi(2) + (p.1 - cy).powi(2)).sqrt()
}

/// Normalized 1-D Gaussian kernel with half-width `ceil(3 * sigma)`
pub fn gaussian_kernel(sigma: f32) -> Array1<f32> {
    let half = (3.0 * sigma).ceil().max(1.0) as i64;
    let two_sigma_sq = 2.0 * (sigma as f64).powi(2);
    let weights: Array1<f64> =
        Array1::from_iter((-half..=half).map(|t| (-((t * t) as f64) / two_sigma_sq).exp()));
    let total = weights.sum();
    weights.mapv(|w| (w / total) as f32)
}

/// Gaussian blur with `sigma = radius`, applied as two separable passes.
///
/// Edges are clamped. Each output pixel is computed independently, so the
/// parallel passes give the same result on every run.
pub fn gaussian_blur(image: &GrayImage, radius: f32) -> GrayImage {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 || radius <= 0.0 {
        return image.clone();
    }

    let src = Array2::from_shape_fn((height as usize, width as usize), |(y, x)| {
        image.get_pixel(x as u32, y as u32)[0] as f32
    });
    let kernel = gaussian_kernel(radius);

    let horizontal = convolve_axis(&src, &kernel, Axis(1));
    let blurred = convolve_axis(&horizontal, &kernel, Axis(0));

    let mut out = GrayImage::new(width, height);
    for (x, y, pixel) in out.enumerate_pixels_mut() {
        let v = blurred[[y as usize, x as usize]];
        *pixel = Luma([v.round().clamp(0.0, 255.0) as u8]);
    }
    out
}

fn convolve_axis(src: &Array2<f32>, kernel: &Array1<f32>, axis: Axis) -> Array2<f32> {
    let half = (kernel.len() / 2) as isize;
    let len = src.len_of(axis) as isize;
    let mut out = Array2::<f32>::zeros(src.dim());

    Zip::indexed(&mut out).par_for_each(|(row, col), value| {
        let mut acc = 0.0;
        for (t, &w) in kernel.iter().enumerate() {
            let offset = t as isize - half;
            let sample = if axis == Axis(1) {
                src[[row, clamp_index(col as isize + offset, len)]]
            } else {
                src[[clamp_index(row as isize + offset, len), col]]
            };
            acc += w * sample;
        }
        *value = acc;
    });

    out
}

#[inline(always)]
fn clamp_index(i: isize, len: isize) -> usize {
    i.clamp(0, len - 1) as usize
}
