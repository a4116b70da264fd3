//! Positioned raster content shared by image layers and layer masks.
//!
//! A [`Raster`] is a pixel buffer plus an integer translation relative to the
//! canvas origin. Buffers are reference counted: copying a document copies
//! only the `Arc`s, and each operation installs a fresh buffer instead of
//! writing into the shared one.

use std::sync::Arc;

use image::{imageops, ImageBuffer, Luma, Pixel, Rgba};
use kurbo::Affine;

use crate::error::EditError;
use crate::geometry::{Canvas, IntRect};
use crate::transform::{crop_buffer, flip_buffer, resize_buffer, rotate_buffer};
use crate::transform::{FilterType, FlipDirection, QuadrantAngle};

/// An owned pixel buffer with 8-bit channels.
pub type Buffer<P> = ImageBuffer<P, Vec<u8>>;

/// Pixel types that can live in a [`Raster`].
///
/// `blank` is the value used for areas a raster gains when it grows, and for
/// samples taken outside of it.
pub trait BlankPixel: Pixel<Subpixel = u8> + Send + Sync + 'static {
    fn blank() -> Self;
}

impl BlankPixel for Rgba<u8> {
    /// Fully transparent.
    fn blank() -> Self {
        Rgba([0, 0, 0, 0])
    }
}

impl BlankPixel for Luma<u8> {
    /// Fully revealing, so a grown mask does not hide anything.
    fn blank() -> Self {
        Luma([255])
    }
}

/// Pixel content positioned on the canvas by a translation offset.
#[derive(Debug, Clone)]
pub struct Raster<P: BlankPixel> {
    image: Arc<Buffer<P>>,
    tx: i32,
    ty: i32,
}

impl<P: BlankPixel> Raster<P> {
    pub fn new(image: Buffer<P>, tx: i32, ty: i32) -> Self {
        Self {
            image: Arc::new(image),
            tx,
            ty,
        }
    }

    /// A raster of the given size filled with one pixel value, at the origin.
    pub fn filled(width: u32, height: u32, pixel: P) -> Self {
        Self::new(ImageBuffer::from_pixel(width, height, pixel), 0, 0)
    }

    /// A blank raster covering the canvas.
    pub fn blank_for(canvas: Canvas) -> Self {
        Self::filled(canvas.width(), canvas.height(), P::blank())
    }

    /// Build a raster from raw channel data, checking the buffer length.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self, EditError> {
        let expected = width as usize * height as usize * P::CHANNEL_COUNT as usize;
        let actual = data.len();
        ImageBuffer::from_raw(width, height, data)
            .map(|image| Self::new(image, 0, 0))
            .ok_or_else(|| {
                EditError::InvalidRaster(format!(
                    "{width}x{height} needs {expected} bytes, got {actual}"
                ))
            })
    }

    pub fn image(&self) -> &Buffer<P> {
        &self.image
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn translation(&self) -> (i32, i32) {
        (self.tx, self.ty)
    }

    pub fn set_translation(&mut self, tx: i32, ty: i32) {
        self.tx = tx;
        self.ty = ty;
    }

    pub fn with_translation(mut self, tx: i32, ty: i32) -> Self {
        self.set_translation(tx, ty);
        self
    }

    /// The area the content occupies in image space.
    pub fn bounds(&self) -> IntRect {
        IntRect::new(self.tx, self.ty, self.width() as i32, self.height() as i32)
    }

    /// True when both rasters point at the same pixel buffer.
    pub fn shares_pixels_with(&self, other: &Raster<P>) -> bool {
        Arc::ptr_eq(&self.image, &other.image)
    }

    /// The pixel at an image-space position, blank outside the content.
    pub fn sample(&self, x: i32, y: i32) -> P {
        let lx = x - self.tx;
        let ly = y - self.ty;
        if lx < 0 || ly < 0 || lx >= self.width() as i32 || ly >= self.height() as i32 {
            return P::blank();
        }
        *self.image.get_pixel(lx as u32, ly as u32)
    }

    /// Shift the content without touching its pixels.
    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.tx += dx;
        self.ty += dy;
    }

    /// Move the content origin to where `transform` maps the content bounds.
    fn follow_transform(&mut self, transform: Affine) {
        let moved = self.bounds().transformed(transform);
        self.tx = moved.x;
        self.ty = moved.y;
    }

    /// Mirror the pixels, with the offset following the canvas transform.
    pub fn flip(&mut self, direction: FlipDirection, transform: Affine) {
        self.follow_transform(transform);
        self.image = Arc::new(flip_buffer(&self.image, direction));
    }

    /// Rotate the pixels, with the offset following the canvas transform.
    pub fn rotate(&mut self, angle: QuadrantAngle, transform: Affine) {
        self.follow_transform(transform);
        self.image = Arc::new(rotate_buffer(&self.image, angle));
    }

    /// Grow the buffer with blank pixels until it covers the whole canvas.
    ///
    /// Existing pixels are never resampled, only re-anchored.
    pub fn cover(&mut self, canvas: Canvas) {
        let bounds = self.bounds();
        let covered = bounds.union(&canvas.bounds());
        if covered == bounds {
            return;
        }

        let mut grown = ImageBuffer::from_pixel(
            covered.width as u32,
            covered.height as u32,
            P::blank(),
        );
        imageops::replace(
            &mut grown,
            &*self.image,
            (bounds.x - covered.x) as i64,
            (bounds.y - covered.y) as i64,
        );
        self.image = Arc::new(grown);
        self.tx = covered.x;
        self.ty = covered.y;
    }

    /// Crop to `rect` (image space, before the crop).
    ///
    /// With `delete_cropped_pixels` the buffer becomes exactly the crop
    /// rectangle at the new origin. Otherwise the pixels are kept and only the
    /// offset moves; `allow_growing` then pads the buffer so it still covers
    /// `new_canvas`.
    pub fn crop(
        &mut self,
        rect: IntRect,
        delete_cropped_pixels: bool,
        allow_growing: bool,
        new_canvas: Canvas,
    ) {
        if delete_cropped_pixels {
            let local = IntRect::new(rect.x - self.tx, rect.y - self.ty, rect.width, rect.height);
            self.image = Arc::new(crop_buffer(&self.image, local));
            self.tx = 0;
            self.ty = 0;
        } else {
            self.translate(-rect.x, -rect.y);
            if allow_growing {
                self.cover(new_canvas);
            }
        }
    }

    /// Resample for a canvas resize from `old_canvas` to `target`.
    ///
    /// Content that exactly matches the canvas is resized to exactly the
    /// target. Larger or offset content is scaled by the canvas ratios, its
    /// offset scaled with it.
    pub fn resized(
        &self,
        old_canvas: Canvas,
        target: Canvas,
        filter: FilterType,
        max_dimension: u32,
    ) -> Result<Self, String> {
        let (width, height, tx, ty) = if self.bounds() == old_canvas.bounds() {
            (target.width(), target.height(), 0, 0)
        } else {
            let sx = target.width() as f64 / old_canvas.width() as f64;
            let sy = target.height() as f64 / old_canvas.height() as f64;
            (
                ((self.width() as f64 * sx).round() as u32).max(1),
                ((self.height() as f64 * sy).round() as u32).max(1),
                (self.tx as f64 * sx).round() as i32,
                (self.ty as f64 * sy).round() as i32,
            )
        };

        if width > max_dimension || height > max_dimension {
            return Err(format!(
                "{width}x{height} exceeds the maximum layer dimension of {max_dimension}"
            ));
        }

        Ok(Self::new(resize_buffer(&self.image, width, height, filter), tx, ty))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::crop_transform;

    fn numbered(width: u32, height: u32) -> Raster<Luma<u8>> {
        let image = ImageBuffer::from_fn(width, height, |x, y| Luma([(y * width + x) as u8]));
        Raster::new(image, 0, 0)
    }

    #[test]
    fn test_from_raw_checks_length() {
        assert!(Raster::<Rgba<u8>>::from_raw(2, 2, vec![0; 16]).is_ok());
        let err = Raster::<Rgba<u8>>::from_raw(2, 2, vec![0; 15]).unwrap_err();
        assert!(matches!(err, EditError::InvalidRaster(_)));
    }

    #[test]
    fn test_sample_outside_is_blank() {
        let raster = Raster::<Rgba<u8>>::filled(2, 2, Rgba([9, 9, 9, 255])).with_translation(1, 1);
        assert_eq!(raster.sample(0, 0), Rgba([0, 0, 0, 0]));
        assert_eq!(raster.sample(1, 1), Rgba([9, 9, 9, 255]));
        assert_eq!(raster.sample(3, 3), Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_cover_pads_towards_canvas() {
        let mut raster = numbered(4, 4).with_translation(2, -1);
        raster.cover(Canvas::new(8, 3));

        assert_eq!(raster.translation(), (0, -1));
        assert_eq!((raster.width(), raster.height()), (8, 4));
        // original top-left pixel moved two columns to the right in the buffer
        assert_eq!(raster.image().get_pixel(2, 0), &Luma([0]));
        assert_eq!(raster.image().get_pixel(0, 0), &Luma([255]));
    }

    #[test]
    fn test_cover_keeps_buffer_when_already_covering() {
        let mut raster = numbered(10, 10).with_translation(-2, -2);
        let before = raster.clone();
        raster.cover(Canvas::new(8, 8));
        assert!(raster.shares_pixels_with(&before));
    }

    #[test]
    fn test_crop_deleting_pixels() {
        let mut raster = numbered(10, 10);
        raster.crop(IntRect::new(3, 2, 4, 5), true, false, Canvas::new(4, 5));

        assert_eq!((raster.width(), raster.height()), (4, 5));
        assert_eq!(raster.translation(), (0, 0));
        assert_eq!(raster.image().get_pixel(0, 0), &Luma([23]));
    }

    #[test]
    fn test_crop_keeping_pixels_moves_offset() {
        let mut raster = numbered(10, 10).with_translation(-1, 0);
        raster.crop(IntRect::new(3, 2, 4, 5), false, false, Canvas::new(4, 5));

        assert_eq!((raster.width(), raster.height()), (10, 10));
        assert_eq!(raster.translation(), (-4, -2));
    }

    #[test]
    fn test_flip_offset_uses_canvas_width() {
        let canvas = Canvas::new(20, 10);
        let mut raster = numbered(24, 14).with_translation(-4, -4);
        raster.flip(
            FlipDirection::Horizontal,
            FlipDirection::Horizontal.canvas_transform(&canvas),
        );
        // new x = 20 - (-4) - 24
        assert_eq!(raster.translation(), (0, -4));
        assert_eq!(raster.image().get_pixel(23, 0), &Luma([0]));
    }

    #[test]
    fn test_rotate_offset_follows_transform() {
        let canvas = Canvas::new(20, 10);
        let mut raster = numbered(24, 14).with_translation(-4, -4);
        raster.rotate(QuadrantAngle::Deg90, QuadrantAngle::Deg90.canvas_transform(&canvas));

        // 90° CW: x' = H - y - h, y' = x
        assert_eq!(raster.translation(), (10 - (-4) - 14, -4));
        assert_eq!((raster.width(), raster.height()), (14, 24));
    }

    #[test]
    fn test_follow_crop_transform() {
        let mut raster = numbered(4, 4).with_translation(5, 5);
        raster.follow_transform(crop_transform(IntRect::new(2, 3, 10, 10)));
        assert_eq!(raster.translation(), (3, 2));
    }

    #[test]
    fn test_resize_canvas_sized_content_hits_target() {
        let raster = numbered(20, 10);
        let resized = raster
            .resized(Canvas::new(20, 10), Canvas::new(7, 3), FilterType::Bilinear, 1000)
            .unwrap();
        assert_eq!((resized.width(), resized.height()), (7, 3));
        assert_eq!(resized.translation(), (0, 0));
    }

    #[test]
    fn test_resize_scales_offset_of_large_content() {
        let raster = numbered(24, 14).with_translation(-4, -4);
        let resized = raster
            .resized(Canvas::new(20, 10), Canvas::new(10, 5), FilterType::Nearest, 1000)
            .unwrap();
        assert_eq!((resized.width(), resized.height()), (12, 7));
        assert_eq!(resized.translation(), (-2, -2));
    }

    #[test]
    fn test_resize_rejects_oversized_result() {
        let raster = numbered(40, 10).with_translation(-20, 0);
        let result =
            raster.resized(Canvas::new(20, 10), Canvas::new(30, 15), FilterType::Nearest, 30);
        assert!(result.is_err());
    }
}
