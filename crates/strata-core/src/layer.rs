//! Layers and the per-layer structural transforms.

use std::sync::atomic::{AtomicU64, Ordering};

use image::Rgba;
use kurbo::Affine;
use rayon::prelude::*;

use crate::error::EditError;
use crate::geometry::{Canvas, IntRect};
use crate::mask::LayerMask;
use crate::outsets::Outsets;
use crate::raster::Raster;
use crate::transform::{FilterType, FlipDirection, QuadrantAngle};

/// Pixel content of an image layer.
pub type ImageRaster = Raster<Rgba<u8>>;

static NEXT_LAYER_ID: AtomicU64 = AtomicU64::new(1);

/// Process-wide unique layer identity. Copies of a document keep the ids of
/// the layers they were copied from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(u64);

impl LayerId {
    pub fn next() -> Self {
        LayerId(NEXT_LAYER_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

/// An embedded composite that is shown through a rendered preview and can
/// only be moved, never re-rasterized by a structural edit.
#[derive(Debug, Clone)]
pub struct SmartObject {
    pub source_name: String,
    pub preview: ImageRaster,
}

#[derive(Debug, Clone)]
pub enum LayerKind {
    Image(ImageRaster),
    SmartObject(SmartObject),
    /// Applies a color adjustment to the layers below; has no content.
    Adjustment,
    Group(Vec<Layer>),
}

#[derive(Debug, Clone)]
pub struct Layer {
    id: LayerId,
    pub name: String,
    pub visible: bool,
    pub opacity: f32,
    pub kind: LayerKind,
    pub mask: Option<LayerMask>,
}

impl Layer {
    fn with_kind(name: impl Into<String>, kind: LayerKind) -> Self {
        Self {
            id: LayerId::next(),
            name: name.into(),
            visible: true,
            opacity: 1.0,
            kind,
            mask: None,
        }
    }

    pub fn image(name: impl Into<String>, raster: ImageRaster) -> Self {
        Self::with_kind(name, LayerKind::Image(raster))
    }

    pub fn smart_object(
        name: impl Into<String>,
        source_name: impl Into<String>,
        preview: ImageRaster,
    ) -> Self {
        let smart = SmartObject {
            source_name: source_name.into(),
            preview,
        };
        Self::with_kind(name, LayerKind::SmartObject(smart))
    }

    pub fn adjustment(name: impl Into<String>) -> Self {
        Self::with_kind(name, LayerKind::Adjustment)
    }

    pub fn group(name: impl Into<String>, children: Vec<Layer>) -> Self {
        Self::with_kind(name, LayerKind::Group(children))
    }

    pub fn with_mask(mut self, mask: LayerMask) -> Self {
        self.mask = Some(mask);
        self
    }

    pub fn id(&self) -> LayerId {
        self.id
    }

    /// The image raster of an image layer.
    pub fn raster(&self) -> Option<&ImageRaster> {
        match &self.kind {
            LayerKind::Image(raster) => Some(raster),
            _ => None,
        }
    }

    pub fn children(&self) -> &[Layer] {
        match &self.kind {
            LayerKind::Group(children) => children,
            _ => &[],
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Layer>> {
        match &mut self.kind {
            LayerKind::Group(children) => Some(children),
            _ => None,
        }
    }

    pub fn is_smart_object(&self) -> bool {
        matches!(self.kind, LayerKind::SmartObject(_))
    }

    /// True for layers with positionable content of their own.
    pub fn has_content(&self) -> bool {
        matches!(self.kind, LayerKind::Image(_) | LayerKind::SmartObject(_))
    }

    /// Image-space area of the content, if the layer has content.
    pub fn content_bounds(&self) -> Option<IntRect> {
        match &self.kind {
            LayerKind::Image(raster) => Some(raster.bounds()),
            LayerKind::SmartObject(smart) => Some(smart.preview.bounds()),
            LayerKind::Adjustment | LayerKind::Group(_) => None,
        }
    }

    /// Mirror content and mask. Smart objects must be rejected before
    /// reaching this point.
    pub fn flip(&mut self, direction: FlipDirection, transform: Affine) {
        match &mut self.kind {
            LayerKind::Image(raster) => raster.flip(direction, transform),
            LayerKind::SmartObject(_) => {
                unreachable!("flip reached smart object {}", self.name)
            }
            LayerKind::Adjustment | LayerKind::Group(_) => {}
        }
        if let Some(mask) = &mut self.mask {
            mask.flip(direction, transform);
        }
    }

    /// Rotate content and mask. Smart objects must be rejected before
    /// reaching this point.
    pub fn rotate(&mut self, angle: QuadrantAngle, transform: Affine) {
        match &mut self.kind {
            LayerKind::Image(raster) => raster.rotate(angle, transform),
            LayerKind::SmartObject(_) => {
                unreachable!("rotation reached smart object {}", self.name)
            }
            LayerKind::Adjustment | LayerKind::Group(_) => {}
        }
        if let Some(mask) = &mut self.mask {
            mask.rotate(angle, transform);
        }
    }

    /// Shift by the left and top margins, padding rasters so they keep
    /// covering `new_canvas`. Smart objects are only shifted.
    pub fn enlarge(&mut self, outsets: &Outsets, new_canvas: Canvas) {
        match &mut self.kind {
            LayerKind::Image(raster) => {
                raster.translate(outsets.left, outsets.top);
                raster.cover(new_canvas);
            }
            LayerKind::SmartObject(smart) => smart.preview.translate(outsets.left, outsets.top),
            LayerKind::Adjustment | LayerKind::Group(_) => {}
        }
        if let Some(mask) = &mut self.mask {
            mask.translate(outsets.left, outsets.top);
            mask.cover(new_canvas);
        }
    }

    /// Crop to `rect` (image space before the crop). Smart objects only move.
    pub fn crop(
        &mut self,
        rect: IntRect,
        delete_cropped_pixels: bool,
        allow_growing: bool,
        new_canvas: Canvas,
    ) {
        match &mut self.kind {
            LayerKind::Image(raster) => {
                raster.crop(rect, delete_cropped_pixels, allow_growing, new_canvas)
            }
            LayerKind::SmartObject(smart) => smart.preview.translate(-rect.x, -rect.y),
            LayerKind::Adjustment | LayerKind::Group(_) => {}
        }
        if let Some(mask) = &mut self.mask {
            mask.crop(rect, delete_cropped_pixels, allow_growing, new_canvas);
        }
    }

    /// Resample content and mask for a canvas resize. Content and mask are
    /// resized in parallel, as are the children of a group.
    pub fn resize(
        &mut self,
        old_canvas: Canvas,
        target: Canvas,
        filter: FilterType,
        max_dimension: u32,
    ) -> Result<(), EditError> {
        let name = self.name.clone();
        let failed = |reason: String| EditError::LayerResize {
            layer: name.clone(),
            reason,
        };

        let (content, mask) = rayon::join(
            || -> Result<(), EditError> {
                match &mut self.kind {
                    LayerKind::Image(raster) => {
                        *raster = raster
                            .resized(old_canvas, target, filter, max_dimension)
                            .map_err(failed)?;
                    }
                    LayerKind::SmartObject(smart) => {
                        smart.preview = smart
                            .preview
                            .resized(old_canvas, target, filter, max_dimension)
                            .map_err(failed)?;
                    }
                    LayerKind::Group(children) => {
                        children.par_iter_mut().try_for_each(|child| {
                            child.resize(old_canvas, target, filter, max_dimension)
                        })?;
                    }
                    LayerKind::Adjustment => {}
                }
                Ok(())
            },
            || -> Result<(), EditError> {
                if let Some(mask) = &mut self.mask {
                    *mask = mask
                        .resized(old_canvas, target, filter, max_dimension)
                        .map_err(failed)?;
                }
                Ok(())
            },
        );
        content?;
        mask
    }
}
