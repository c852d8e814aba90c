//! Pixel surfaces handed over by the painter.
//!
//! A `PixelSurface` borrows the painter's pixel buffer read-only. It carries
//! the pixel format, the content classification (opaque color vs. alpha), and
//! the surface-space position of its first pixel so that regions extracted
//! from it come back in the surface's own coordinates.

use std::borrow::Cow;

use image::{GrayImage, RgbImage, RgbaImage};

use crate::error::{ContourError, Result};
use crate::primitives::IntRect;

/// Memory layout of one pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// 32-bit native-endian words, alpha in the high byte.
    Argb32,
    /// Four bytes per pixel, alpha last.
    Rgba8,
    /// Three bytes per pixel, always opaque.
    Rgb8,
    /// One alpha byte per pixel.
    A8,
}

impl PixelFormat {
    /// Bytes occupied by one pixel.
    #[inline]
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Argb32 | PixelFormat::Rgba8 => 4,
            PixelFormat::Rgb8 => 3,
            PixelFormat::A8 => 1,
        }
    }

    /// Alpha of the pixel starting at `px`.
    #[inline]
    fn alpha(self, px: &[u8]) -> u8 {
        match self {
            PixelFormat::Argb32 => (u32::from_ne_bytes([px[0], px[1], px[2], px[3]]) >> 24) as u8,
            PixelFormat::Rgba8 => px[3],
            PixelFormat::Rgb8 => u8::MAX,
            PixelFormat::A8 => px[0],
        }
    }

    /// The content a surface of this format carries unless told otherwise.
    pub const fn default_content(self) -> Content {
        match self {
            PixelFormat::Rgb8 => Content::Color,
            PixelFormat::A8 => Content::Alpha,
            PixelFormat::Argb32 | PixelFormat::Rgba8 => Content::ColorAlpha,
        }
    }
}

/// What a surface's pixels describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Content {
    /// Color only: every pixel is opaque.
    Color,
    /// Alpha only.
    Alpha,
    /// Color with alpha.
    ColorAlpha,
}

/// A read-only view of rendered pixels.
#[derive(Debug, Clone, Copy)]
pub struct PixelSurface<'a> {
    data: &'a [u8],
    format: PixelFormat,
    content: Content,
    width: u32,
    height: u32,
    stride: usize,
    origin: (i32, i32),
}

impl<'a> PixelSurface<'a> {
    /// Wrap a pixel buffer.
    ///
    /// `stride` is the distance in bytes between the starts of two rows.
    pub fn new(
        data: &'a [u8],
        format: PixelFormat,
        width: u32,
        height: u32,
        stride: usize,
    ) -> Result<Self> {
        if width > i32::MAX as u32 || height > i32::MAX as u32 {
            return Err(ContourError::SurfaceSize { width, height });
        }

        let row_bytes = (width as usize)
            .checked_mul(format.bytes_per_pixel())
            .ok_or(ContourError::SurfaceSize { width, height })?;
        if stride < row_bytes {
            return Err(ContourError::InvalidStride {
                stride,
                min: row_bytes,
            });
        }

        let expected = if height == 0 {
            0
        } else {
            stride
                .checked_mul(height as usize - 1)
                .and_then(|n| n.checked_add(row_bytes))
                .ok_or(ContourError::SurfaceSize { width, height })?
        };
        if data.len() < expected {
            return Err(ContourError::BufferTooSmall {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            data,
            format,
            content: format.default_content(),
            width,
            height,
            stride,
            origin: (0, 0),
        })
    }

    /// Wrap a tightly packed buffer (no row padding).
    pub fn packed(data: &'a [u8], format: PixelFormat, width: u32, height: u32) -> Result<Self> {
        let stride = (width as usize)
            .checked_mul(format.bytes_per_pixel())
            .ok_or(ContourError::SurfaceSize { width, height })?;
        Self::new(data, format, width, height, stride)
    }

    /// Place the first pixel at `(x, y)` in surface coordinates.
    pub fn with_origin(mut self, x: i32, y: i32) -> Self {
        self.origin = (x, y);
        self
    }

    /// Override the content classification.
    ///
    /// Painters that know a color+alpha buffer is fully opaque mark it
    /// `Content::Color` so region extraction can skip the scan.
    pub fn with_content(mut self, content: Content) -> Self {
        self.content = content;
        self
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn content(&self) -> Content {
        self.content
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn origin(&self) -> (i32, i32) {
        self.origin
    }

    /// Bounds of everything that can be drawn, as `(x1, y1, x2, y2)` in
    /// surface coordinates.
    ///
    /// Computed in `f64` so that callers can range-check before narrowing.
    pub fn clip_extents(&self) -> (f64, f64, f64, f64) {
        let x1 = self.origin.0 as f64;
        let y1 = self.origin.1 as f64;
        (x1, y1, x1 + self.width as f64, y1 + self.height as f64)
    }

    /// Alpha of the buffer pixel at `(col, row)`, transparent outside the buffer.
    fn alpha_at(&self, col: i64, row: i64) -> u8 {
        if col < 0 || row < 0 || col >= self.width as i64 || row >= self.height as i64 {
            return 0;
        }
        let bpp = self.format.bytes_per_pixel();
        let start = row as usize * self.stride + col as usize * bpp;
        self.format.alpha(&self.data[start..start + bpp])
    }

    /// Reduce this surface to one alpha byte per pixel over `extents`.
    ///
    /// An A8 surface whose buffer fully covers `extents` is borrowed as-is;
    /// anything else is copied into a packed mask. Pixels of `extents` that
    /// fall outside the buffer read as transparent.
    pub fn to_alpha_mask(&self, extents: IntRect) -> AlphaMask<'a> {
        let width = extents.width.max(0) as usize;
        let height = extents.height.max(0) as usize;
        let col0 = extents.x as i64 - self.origin.0 as i64;
        let row0 = extents.y as i64 - self.origin.1 as i64;

        let covered = col0 >= 0
            && row0 >= 0
            && col0 + width as i64 <= self.width as i64
            && row0 + height as i64 <= self.height as i64;

        if self.format == PixelFormat::A8 && covered {
            let offset = row0 as usize * self.stride + col0 as usize;
            let data: &'a [u8] = self.data;
            return AlphaMask {
                data: Cow::Borrowed(&data[offset.min(data.len())..]),
                width,
                height,
                stride: self.stride,
            };
        }

        let mut data = vec![0u8; width * height];
        for (y, row) in data.chunks_exact_mut(width.max(1)).take(height).enumerate() {
            for (x, alpha) in row.iter_mut().enumerate() {
                *alpha = self.alpha_at(col0 + x as i64, row0 + y as i64);
            }
        }
        AlphaMask {
            data: Cow::Owned(data),
            width,
            height,
            stride: width,
        }
    }
}

impl<'a> TryFrom<&'a RgbaImage> for PixelSurface<'a> {
    type Error = ContourError;

    fn try_from(image: &'a RgbaImage) -> Result<Self> {
        Self::packed(image.as_raw(), PixelFormat::Rgba8, image.width(), image.height())
    }
}

impl<'a> TryFrom<&'a RgbImage> for PixelSurface<'a> {
    type Error = ContourError;

    fn try_from(image: &'a RgbImage) -> Result<Self> {
        Self::packed(image.as_raw(), PixelFormat::Rgb8, image.width(), image.height())
    }
}

/// A grayscale image is read as an alpha mask.
impl<'a> TryFrom<&'a GrayImage> for PixelSurface<'a> {
    type Error = ContourError;

    fn try_from(image: &'a GrayImage) -> Result<Self> {
        Self::packed(image.as_raw(), PixelFormat::A8, image.width(), image.height())
    }
}

/// Single-channel alpha view over a rectangle of a surface.
#[derive(Debug)]
pub struct AlphaMask<'a> {
    data: Cow<'a, [u8]>,
    width: usize,
    height: usize,
    stride: usize,
}

impl AlphaMask<'_> {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether the mask reads the source buffer directly.
    pub fn is_borrowed(&self) -> bool {
        matches!(self.data, Cow::Borrowed(_))
    }

    /// Alpha bytes of row `y`, exactly `width` long.
    #[inline]
    pub fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.width]
    }
}
