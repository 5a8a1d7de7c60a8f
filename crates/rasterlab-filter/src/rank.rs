//! Rank (order-statistic) filtering
//!
//! - [`median_filter`] sorts every window
//! - [`fast_median_filter`] keeps running histograms and walks them in a
//!   snake (boustrophedon) order
//! - [`vector_median_filter`] picks the window member closest to all others
//!   in color space
//!
//! All three pad the input by `mask_size / 2` replicated pixels first.

use crate::convolve::{collect_rows, per_channel};
use crate::kernel::{check_mask_size, window_area};
use crate::FilterResult;
use rasterlab_core::color::color_distance;
use rasterlab_core::{ColorImage, GrayImage, Raster};

/// Median filter by sorting each window.
///
/// The output is element `k*k/2` of the sorted `k x k` window. Color rasters
/// are filtered per channel.
///
/// # Errors
///
/// Returns [`crate::FilterError::InvalidParameters`] if `mask_size` is even
/// or zero.
pub fn median_filter<const C: usize>(image: &Raster<u8, C>, mask_size: u32) -> FilterResult<Raster<u8, C>> {
    check_mask_size(mask_size)?;
    per_channel(image, |gray| median_gray(gray, mask_size))
}

fn median_gray(image: &GrayImage, k: u32) -> FilterResult<GrayImage> {
    let (w, h) = image.dimensions();
    let padded = image.border_replicate(k / 2)?;
    let n = window_area(k)?;

    collect_rows(w, h, |y| {
        let mut window = Vec::with_capacity(n);
        (0..w)
            .map(|x| {
                window.clear();
                for wy in y..y + k {
                    window.extend_from_slice(&padded.row(wy)[x as usize..(x + k) as usize]);
                }
                window.sort_unstable();
                window[n / 2]
            })
            .collect()
    })
}

/// Median filter with sliding histograms.
///
/// Keeps one 256-bin histogram per padded column (covering the `k` rows of
/// the current window) and one histogram for the window itself. Moving the
/// window sideways subtracts the departing column and adds the entering one;
/// rows are scanned alternately left-to-right and right-to-left so a
/// vertical step only slides the columns down by one row. The median is
/// found by walking the window histogram to the `(k*k + 1) / 2`-th sample.
///
/// Produces exactly the same output as [`median_filter`].
pub fn fast_median_filter<const C: usize>(image: &Raster<u8, C>, mask_size: u32) -> FilterResult<Raster<u8, C>> {
    check_mask_size(mask_size)?;
    log::debug!(
        "fast_median_filter: {}x{} mask {}",
        image.width(),
        image.height(),
        mask_size
    );
    per_channel(image, |gray| fast_median_gray(gray, mask_size))
}

struct SnakeWindow {
    columns: Vec<[u32; 256]>,
    window: [u32; 256],
    middle: u32,
}

impl SnakeWindow {
    fn median(&self) -> u8 {
        let mut acc = 0;
        for (level, &c) in self.window.iter().enumerate() {
            acc += c;
            if acc >= self.middle {
                return level as u8;
            }
        }
        u8::MAX
    }

    fn add_column(&mut self, col: usize) {
        for (w, &c) in self.window.iter_mut().zip(self.columns[col].iter()) {
            *w += c;
        }
    }

    fn remove_column(&mut self, col: usize) {
        for (w, &c) in self.window.iter_mut().zip(self.columns[col].iter()) {
            *w -= c;
        }
    }
}

fn fast_median_gray(image: &GrayImage, k: u32) -> FilterResult<GrayImage> {
    let (w, h) = image.dimensions();
    let padded = image.border_replicate(k / 2)?;
    let pw = padded.width() as usize;
    let ku = k as usize;

    let mut state = SnakeWindow {
        columns: vec![[0u32; 256]; pw],
        window: [0u32; 256],
        middle: window_area(k)?.div_ceil(2) as u32,
    };
    for y in 0..k {
        for (col, &v) in padded.row(y).iter().enumerate() {
            state.columns[col][v as usize] += 1;
        }
    }
    for col in 0..ku {
        state.add_column(col);
    }

    let mut out = GrayImage::new(w, h)?;
    // window covers padded columns [x, x + k)
    let mut x = 0usize;
    for y in 0..h {
        if y > 0 {
            // vertical step: every column drops row y-1 and gains row y+k-1
            let leaving = padded.row(y - 1);
            let entering = padded.row(y + k - 1);
            for col in 0..pw {
                let (a, b) = (leaving[col] as usize, entering[col] as usize);
                state.columns[col][a] -= 1;
                state.columns[col][b] += 1;
                if (x..x + ku).contains(&col) {
                    state.window[a] -= 1;
                    state.window[b] += 1;
                }
            }
        }

        let forward = y % 2 == 0;
        out.set_value(x as u32, y, state.median());
        for _ in 1..w {
            if forward {
                state.remove_column(x);
                state.add_column(x + ku);
                x += 1;
            } else {
                state.remove_column(x + ku - 1);
                x -= 1;
                state.add_column(x);
            }
            out.set_value(x as u32, y, state.median());
        }
    }
    Ok(out)
}

/// Vector median filter for color rasters.
///
/// For every `k x k` window, computes the summed Euclidean color distance
/// from each member to all other members and outputs the member with the
/// smallest sum. Ties go to the first member in row-major window order.
pub fn vector_median_filter(image: &ColorImage, mask_size: u32) -> FilterResult<ColorImage> {
    check_mask_size(mask_size)?;
    let (w, h) = image.dimensions();
    let k = mask_size;
    let padded = image.border_replicate(k / 2)?;
    let n = window_area(k)?;

    collect_rows(w, h, |y| {
        let mut members = Vec::with_capacity(n);
        let mut sums = vec![0.0f64; n];
        let mut row = Vec::with_capacity(w as usize * 3);
        for x in 0..w {
            members.clear();
            for wy in y..y + k {
                for wx in x..x + k {
                    members.push(padded.pixel(wx, wy));
                }
            }
            sums.fill(0.0);
            for i in 0..n {
                for j in i + 1..n {
                    let d = color_distance(members[i], members[j]);
                    sums[i] += d;
                    sums[j] += d;
                }
            }
            let mut best = 0;
            for i in 1..n {
                if sums[i] < sums[best] {
                    best = i;
                }
            }
            row.extend_from_slice(&members[best]);
        }
        row
    })
}
