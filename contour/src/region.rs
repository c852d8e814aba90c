//! Regions and region extraction.
//!
//! A `Region` is a set of device pixels stored as non-overlapping rectangles
//! in y-x band order. Consecutive bands with identical horizontal spans are
//! merged, so a region has exactly one representation and two regions cover
//! the same pixels iff they compare equal.
//!
//! `extract_region` turns the opaque part of a rendered surface into such a
//! region. Shaped windows use it as their hit-test and input area.

use tracing::{trace, warn};

use crate::primitives::IntRect;
use crate::surface::{Content, PixelSurface};

/// A set of device pixels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Region {
    rects: Vec<IntRect>,
}

impl Region {
    /// An empty region.
    pub fn new() -> Self {
        Self::default()
    }

    /// A region covering one rectangle. Empty rectangles give an empty region.
    pub fn from_rect(rect: IntRect) -> Self {
        if rect.is_empty() {
            Self::new()
        } else {
            Self { rects: vec![rect] }
        }
    }

    /// The union of arbitrary, possibly overlapping rectangles.
    pub fn from_rects(rects: impl IntoIterator<Item = IntRect>) -> Self {
        let rects: Vec<IntRect> = rects.into_iter().filter(|r| !r.is_empty()).collect();
        normalize(&rects)
    }

    /// Rectangles in band order.
    pub fn rects(&self) -> &[IntRect] {
        &self.rects
    }

    pub fn iter(&self) -> impl Iterator<Item = &IntRect> {
        self.rects.iter()
    }

    /// Number of rectangles.
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Number of pixels covered.
    pub fn area(&self) -> u64 {
        self.rects.iter().map(IntRect::area).sum()
    }

    /// Smallest rectangle containing the whole region.
    pub fn bounds(&self) -> IntRect {
        self.rects
            .iter()
            .fold(IntRect::ZERO, |acc, rect| acc.union(rect))
    }

    /// Check whether pixel `(x, y)` belongs to the region.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.rects
            .iter()
            .take_while(|r| r.y <= y)
            .any(|r| r.contains(x, y))
    }

    /// Check whether any pixel of `rect` belongs to the region.
    pub fn intersects(&self, rect: &IntRect) -> bool {
        self.rects.iter().any(|r| r.intersects(rect))
    }

    /// Add a rectangle. Pixels already covered are not duplicated.
    pub fn union_rect(&mut self, rect: IntRect) {
        if rect.is_empty() {
            return;
        }
        let mut rects = std::mem::take(&mut self.rects);
        rects.push(rect);
        *self = normalize(&rects);
    }

    /// Add every pixel of another region.
    pub fn union(&mut self, other: &Region) {
        if other.is_empty() {
            return;
        }
        let mut rects = std::mem::take(&mut self.rects);
        rects.extend_from_slice(&other.rects);
        *self = normalize(&rects);
    }

    /// Move every rectangle by `(dx, dy)`.
    pub fn translate(&mut self, dx: i32, dy: i32) {
        for rect in &mut self.rects {
            *rect = rect.translate(dx, dy);
        }
    }
}

/// Rebuild the canonical band form from arbitrary rectangles.
///
/// The plane is cut at every distinct top and bottom edge; within each slab
/// the covering x-intervals are merged and emitted as one band.
fn normalize(rects: &[IntRect]) -> Region {
    let mut edges: Vec<i32> = rects.iter().flat_map(|r| [r.y, r.bottom()]).collect();
    edges.sort_unstable();
    edges.dedup();

    let mut builder = RegionBuilder::new();
    for slab in edges.windows(2) {
        let (top, bottom) = (slab[0], slab[1]);
        let mut spans: Vec<(i32, i32)> = rects
            .iter()
            .filter(|r| r.y <= top && r.bottom() >= bottom)
            .map(|r| (r.x, r.right()))
            .collect();
        spans.sort_unstable();

        let mut merged: Vec<(i32, i32)> = Vec::with_capacity(spans.len());
        for (x0, x1) in spans {
            match merged.last_mut() {
                Some(last) if x0 <= last.1 => last.1 = last.1.max(x1),
                _ => merged.push((x0, x1)),
            }
        }
        builder.push_band(top, bottom - top, merged);
    }
    builder.finish()
}

/// Accumulates bands top to bottom, merging vertically identical neighbours.
#[derive(Debug, Default)]
struct RegionBuilder {
    rects: Vec<IntRect>,
    /// Open band: top, height, spans.
    pending: Option<(i32, i32, Vec<(i32, i32)>)>,
}

impl RegionBuilder {
    fn new() -> Self {
        Self::default()
    }

    /// Add a band of sorted, disjoint, non-touching spans.
    fn push_band(&mut self, top: i32, height: i32, spans: Vec<(i32, i32)>) {
        if spans.is_empty() {
            self.flush();
            return;
        }
        if let Some((pending_top, pending_height, pending_spans)) = &mut self.pending
            && *pending_top + *pending_height == top
            && *pending_spans == spans
        {
            *pending_height += height;
            return;
        }
        self.flush();
        self.pending = Some((top, height, spans));
    }

    fn flush(&mut self) {
        if let Some((top, height, spans)) = self.pending.take() {
            self.rects.extend(
                spans
                    .into_iter()
                    .map(|(x0, x1)| IntRect::new(x0, top, x1 - x0, height)),
            );
        }
    }

    fn finish(mut self) -> Region {
        self.flush();
        Region { rects: self.rects }
    }
}

// =========================================================================
// Extraction
// =========================================================================

/// Integer extents of everything drawable on `surface`, or `None` when they
/// cannot be represented in `i32` device coordinates.
pub fn try_surface_extents(surface: &PixelSurface<'_>) -> Option<IntRect> {
    let (x1, y1, x2, y2) = surface.clip_extents();
    let x1 = x1.floor();
    let y1 = y1.floor();
    let width = x2.ceil() - x1;
    let height = y2.ceil() - y1;

    let min = i32::MIN as f64;
    let max = i32::MAX as f64;
    if x1 < min
        || x1 > max
        || y1 < min
        || y1 > max
        || width > max
        || height > max
        || x1 + width > max
        || y1 + height > max
    {
        return None;
    }

    Some(IntRect::new(x1 as i32, y1 as i32, width as i32, height as i32))
}

/// Integer extents of `surface`; overflowing extents collapse to a zero rect.
pub fn surface_extents(surface: &PixelSurface<'_>) -> IntRect {
    try_surface_extents(surface).unwrap_or_else(|| {
        warn!(
            origin = ?surface.origin(),
            width = surface.width(),
            height = surface.height(),
            "surface extents overflow device coordinates"
        );
        IntRect::ZERO
    })
}

/// Compute the region of `surface` that is not fully transparent.
///
/// Any alpha above zero counts as covered. Fully opaque (`Content::Color`)
/// surfaces skip the scan and return their extents. The result is in the
/// surface's own coordinate space.
pub fn extract_region(surface: &PixelSurface<'_>) -> Region {
    let extents = surface_extents(surface);
    if extents.is_empty() {
        return Region::new();
    }

    if surface.content() == Content::Color {
        return Region::from_rect(extents);
    }

    let mask = surface.to_alpha_mask(extents);
    let width = mask.width();
    let mut builder = RegionBuilder::new();
    let mut span_count = 0usize;

    for y in 0..mask.height() {
        let row = mask.row(y);
        let mut spans = Vec::new();
        let mut x = 0;
        while x < width {
            if row[x] == 0 {
                x += 1;
                continue;
            }
            let x0 = x;
            while x < width && row[x] != 0 {
                x += 1;
            }
            spans.push((x0 as i32, x as i32));
        }
        span_count += spans.len();
        builder.push_band(y as i32, 1, spans);
    }

    let mut region = builder.finish();
    region.translate(extents.x, extents.y);
    trace!(
        ?extents,
        borrowed = mask.is_borrowed(),
        spans = span_count,
        rects = region.len(),
        "extracted region"
    );
    region
}
