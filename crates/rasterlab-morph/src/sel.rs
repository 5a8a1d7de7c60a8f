//! Structuring Element (SEL) for morphological operations
//!
//! A structuring element defines the neighborhood used in morphological
//! operations. Square all-hit SELs drive dilation and erosion; SELs with
//! hits, misses and don't-cares are the hit-or-miss templates used by
//! skeletonization.

use crate::{MorphError, MorphResult};
use rasterlab_core::GrayImage;

/// Element type in a structuring element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum SelElement {
    /// Don't care - this position is ignored
    #[default]
    DontCare = 0,
    /// Hit - must match foreground (set pixels)
    Hit = 1,
    /// Miss - must match background (unset pixels)
    Miss = 2,
}

/// Structuring Element (SEL)
///
/// Defines the neighborhood pattern for morphological operations.
/// The origin (cx, cy) is the reference point for the operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sel {
    width: u32,
    height: u32,
    cx: u32,
    cy: u32,
    data: Vec<SelElement>,
}

/// Validate a square mask side: odd and at least 1.
pub fn check_mask_size(size: u32) -> MorphResult<()> {
    if size == 0 || size % 2 == 0 {
        return Err(MorphError::InvalidParameters(format!(
            "mask size must be odd and >= 1, got {size}"
        )));
    }
    Ok(())
}

impl Sel {
    /// Create a new structuring element of don't-cares, origin at the center
    pub fn new(width: u32, height: u32) -> MorphResult<Self> {
        if width == 0 || height == 0 {
            return Err(MorphError::InvalidSel(format!(
                "dimensions must be positive, got {width}x{height}"
            )));
        }
        Ok(Self {
            width,
            height,
            cx: width / 2,
            cy: height / 2,
            data: vec![SelElement::DontCare; (width * height) as usize],
        })
    }

    /// Create a square structuring element with all hits
    ///
    /// # Errors
    ///
    /// Returns [`MorphError::InvalidParameters`] unless `size` is odd.
    pub fn create_square(size: u32) -> MorphResult<Self> {
        check_mask_size(size)?;
        let mut sel = Self::new(size, size)?;
        sel.data.fill(SelElement::Hit);
        Ok(sel)
    }

    /// Create a structuring element from a string pattern
    ///
    /// Rows are separated by newlines and must all have the same length.
    /// Leading and trailing whitespace on each row is ignored.
    ///
    /// # Arguments
    /// * `pattern` - String with 'x' for hit, 'o' for miss, '.' for don't care
    /// * `origin_x` - X coordinate of origin
    /// * `origin_y` - Y coordinate of origin
    pub fn from_string(pattern: &str, origin_x: u32, origin_y: u32) -> MorphResult<Self> {
        let rows: Vec<&str> = pattern
            .lines()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .collect();
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |r| r.chars().count()) as u32;
        let mut sel = Self::new(width, height)?;

        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() as u32 != width {
                return Err(MorphError::InvalidSel(format!(
                    "row {y} has {} elements, expected {width}",
                    row.chars().count()
                )));
            }
            for (x, ch) in row.chars().enumerate() {
                let elem = match ch {
                    'x' => SelElement::Hit,
                    'o' => SelElement::Miss,
                    '.' => SelElement::DontCare,
                    other => {
                        return Err(MorphError::InvalidSel(format!(
                            "unexpected character {other:?}"
                        )));
                    }
                };
                sel.data[y * width as usize + x] = elem;
            }
        }

        sel.set_origin(origin_x, origin_y)?;
        Ok(sel)
    }

    /// Get the width
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the height
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the origin x coordinate
    #[inline]
    pub fn origin_x(&self) -> u32 {
        self.cx
    }

    /// Get the origin y coordinate
    #[inline]
    pub fn origin_y(&self) -> u32 {
        self.cy
    }

    /// Set the origin
    pub fn set_origin(&mut self, cx: u32, cy: u32) -> MorphResult<()> {
        if cx >= self.width || cy >= self.height {
            return Err(MorphError::InvalidSel(format!(
                "origin ({cx}, {cy}) outside {}x{}",
                self.width, self.height
            )));
        }
        self.cx = cx;
        self.cy = cy;
        Ok(())
    }

    /// Get an element at (x, y)
    #[inline]
    pub fn get_element(&self, x: u32, y: u32) -> Option<SelElement> {
        if x < self.width && y < self.height {
            Some(self.data[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    /// Set an element at (x, y)
    pub fn set_element(&mut self, x: u32, y: u32, elem: SelElement) -> MorphResult<()> {
        if x >= self.width || y >= self.height {
            return Err(MorphError::InvalidSel(format!(
                "element ({x}, {y}) outside {}x{}",
                self.width, self.height
            )));
        }
        self.data[(y * self.width + x) as usize] = elem;
        Ok(())
    }

    /// Get raw element data
    pub fn data(&self) -> &[SelElement] {
        &self.data
    }

    /// Count the number of hit elements
    pub fn hit_count(&self) -> usize {
        self.data.iter().filter(|&&e| e == SelElement::Hit).count()
    }

    /// Count the number of miss elements
    pub fn miss_count(&self) -> usize {
        self.data.iter().filter(|&&e| e == SelElement::Miss).count()
    }

    /// Rotate the SEL clockwise by 90 degrees `rotation` times
    ///
    /// The origin rotates with the elements.
    pub fn rotate_orth(&self, rotation: u32) -> Self {
        let mut sel = self.clone();
        for _ in 0..rotation % 4 {
            let (w, h) = (sel.width, sel.height);
            let mut data = vec![SelElement::DontCare; sel.data.len()];
            // (x, y) in a w x h grid lands at (h - 1 - y, x) in an h x w grid
            for y in 0..h {
                for x in 0..w {
                    let (nx, ny) = (h - 1 - y, x);
                    data[(ny * h + nx) as usize] = sel.data[(y * w + x) as usize];
                }
            }
            sel = Self {
                width: h,
                height: w,
                cx: h - 1 - sel.cy,
                cy: sel.cx,
                data,
            };
        }
        sel
    }

    fn offsets_of(&self, kind: SelElement) -> impl Iterator<Item = (i32, i32)> + '_ {
        let cx = self.cx as i32;
        let cy = self.cy as i32;
        let width = self.width;

        self.data
            .iter()
            .enumerate()
            .filter(move |&(_, &elem)| elem == kind)
            .map(move |(idx, _)| {
                let x = (idx as u32 % width) as i32;
                let y = (idx as u32 / width) as i32;
                (x - cx, y - cy)
            })
    }

    /// Iterate over hit positions relative to origin
    pub fn hit_offsets(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.offsets_of(SelElement::Hit)
    }

    /// Iterate over miss positions relative to origin
    pub fn miss_offsets(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.offsets_of(SelElement::Miss)
    }

    /// Whether the SEL placed with its origin on `(x, y)` matches a binary
    /// image: every hit on foreground, every miss on background. Pixels
    /// outside the image count as background.
    pub fn matches(&self, image: &GrayImage, x: u32, y: u32) -> bool {
        let (w, h) = image.dimensions();
        let fg = |(dx, dy): (i32, i32)| {
            let (sx, sy) = (x as i64 + dx as i64, y as i64 + dy as i64);
            sx >= 0
                && sy >= 0
                && sx < w as i64
                && sy < h as i64
                && image.value(sx as u32, sy as u32) != 0
        };
        self.hit_offsets().all(fg) && !self.miss_offsets().any(fg)
    }
}
