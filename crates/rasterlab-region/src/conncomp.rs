//! Connected component analysis
//!
//! This module provides functions for finding and labeling connected components
//! in binary images. It uses Union-Find (disjoint set) data structure for
//! efficient labeling.
//!
//! # Algorithm
//!
//! A single raster scan assigns provisional labels: each foreground pixel
//! looks at its already-visited neighbours (W, NW, N, NE for 8-way; W, N
//! for 4-way). With no labelled neighbour it opens a new set; otherwise it
//! takes the smallest neighbour label and unions all neighbour labels. A
//! second pass replaces every label by its set root, renumbered `1..=n` in
//! order of first appearance.

use std::collections::HashSet;

use crate::error::{RegionResult, check_binary};
use rand::prelude::*;
use rasterlab_core::color::random_color;
use rasterlab_core::{ColorImage, DisjointSet, GrayImage, LabelImage};

/// Connectivity type for component analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectivityType {
    /// 4-way connectivity (up, down, left, right)
    FourWay,
    /// 8-way connectivity (includes diagonals)
    #[default]
    EightWay,
}

impl ConnectivityType {
    /// Causal neighbour offsets visited before the current pixel
    fn causal_offsets(self) -> &'static [(i64, i64)] {
        match self {
            ConnectivityType::FourWay => &[(-1, 0), (0, -1)],
            ConnectivityType::EightWay => &[(-1, 0), (-1, -1), (0, -1), (1, -1)],
        }
    }
}

/// Axis-aligned bounding box of a component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    /// Left column
    pub x: u32,
    /// Top row
    pub y: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

/// A connected component in an image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectedComponent {
    /// Unique label for this component
    pub label: u32,
    /// Number of pixels in this component
    pub pixel_count: u32,
    /// Bounding box of this component
    pub bounds: Bounds,
}

/// Result of [`label_components`]: a label raster (0 = background,
/// components `1..=count`) and the number of components.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentLabels {
    labels: LabelImage,
    count: u32,
}

impl ComponentLabels {
    /// The label raster
    pub fn labels(&self) -> &LabelImage {
        &self.labels
    }

    /// Number of components
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Label at `(x, y)`, 0 for background.
    pub fn label_at(&self, x: u32, y: u32) -> Option<u32> {
        self.labels.get(x, y, 0)
    }

    /// Pixel count and bounding box of every component, by label.
    pub fn components(&self) -> Vec<ConnectedComponent> {
        // (count, min_x, min_y, max_x, max_y)
        let mut stats = vec![(0u32, u32::MAX, u32::MAX, 0u32, 0u32); self.count as usize];
        let (w, h) = self.labels.dimensions();
        for y in 0..h {
            for x in 0..w {
                let label = self.labels.value(x, y);
                if label == 0 {
                    continue;
                }
                let s = &mut stats[(label - 1) as usize];
                s.0 += 1;
                s.1 = s.1.min(x);
                s.2 = s.2.min(y);
                s.3 = s.3.max(x);
                s.4 = s.4.max(y);
            }
        }
        stats
            .into_iter()
            .enumerate()
            .map(|(i, (n, x0, y0, x1, y1))| ConnectedComponent {
                label: i as u32 + 1,
                pixel_count: n,
                bounds: Bounds {
                    x: x0,
                    y: y0,
                    width: x1 - x0 + 1,
                    height: y1 - y0 + 1,
                },
            })
            .collect()
    }

    /// Render each component in its own random non-black color; background
    /// stays black. Components never share a color.
    pub fn colorize_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> ColorImage {
        let mut used = HashSet::with_capacity(self.count as usize);
        let palette: Vec<[u8; 3]> = (0..self.count)
            .map(|_| loop {
                let c = random_color(rng);
                if used.insert(c) {
                    break c;
                }
            })
            .collect();
        self.labels.map_pixels(|[label]| {
            if label == 0 {
                [0, 0, 0]
            } else {
                palette[(label - 1) as usize]
            }
        })
    }

    /// [`ComponentLabels::colorize_with_rng`] with the thread-local generator.
    pub fn colorize(&self) -> ColorImage {
        self.colorize_with_rng(&mut rand::rng())
    }
}

/// Label all connected components in a binary image
///
/// # Errors
///
/// Returns [`crate::RegionError::NotBinary`] for non-binary input.
pub fn label_components(
    image: &GrayImage,
    connectivity: ConnectivityType,
) -> RegionResult<ComponentLabels> {
    check_binary(image)?;
    let (w, h) = image.dimensions();
    let mut labels = LabelImage::new(w, h)?;
    let mut sets = DisjointSet::new();
    let offsets = connectivity.causal_offsets();

    for y in 0..h {
        for x in 0..w {
            if image.value(x, y) == 0 {
                continue;
            }
            let mut neighbours = offsets.iter().filter_map(|&(dx, dy)| {
                let (nx, ny) = (x as i64 + dx, y as i64 + dy);
                if nx < 0 || ny < 0 || nx >= w as i64 {
                    return None;
                }
                Some(labels.value(nx as u32, ny as u32)).filter(|&l| l != 0)
            });
            let label = match neighbours.next() {
                None => sets.make_set(),
                Some(first) => {
                    let mut smallest = first;
                    for other in neighbours {
                        smallest = smallest.min(other);
                        sets.union(first, other);
                    }
                    smallest
                }
            };
            labels.set_value(x, y, label);
        }
    }

    // resolve roots and renumber in scan order
    let mut renumber = vec![0u32; sets.len() + 1];
    let mut count = 0u32;
    for label in labels.data_mut() {
        if *label == 0 {
            continue;
        }
        let root = sets.find_set(*label) as usize;
        if renumber[root] == 0 {
            count += 1;
            renumber[root] = count;
        }
        *label = renumber[root];
    }

    log::debug!("label_components: {count} components from {} provisional labels", sets.len());
    Ok(ComponentLabels { labels, count })
}

/// Find all connected components in a binary image
///
/// Returns a vector of connected components, each with a label, pixel count,
/// and bounding box.
pub fn find_connected_components(
    image: &GrayImage,
    connectivity: ConnectivityType,
) -> RegionResult<Vec<ConnectedComponent>> {
    Ok(label_components(image, connectivity)?.components())
}

/// Color the 8-connected components of a binary image with random colors.
pub fn color_components(image: &GrayImage) -> RegionResult<ColorImage> {
    Ok(label_components(image, ConnectivityType::EightWay)?.colorize())
}

/// [`color_components`] with a caller-supplied generator.
pub fn color_components_with_rng<R: Rng + ?Sized>(
    image: &GrayImage,
    rng: &mut R,
) -> RegionResult<ColorImage> {
    Ok(label_components(image, ConnectivityType::EightWay)?.colorize_with_rng(rng))
}
