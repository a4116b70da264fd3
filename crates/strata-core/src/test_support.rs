//! Shared fixtures for the engine tests.

use image::{ImageBuffer, Luma, Rgba};
use kurbo::Rect;

use crate::config::EngineConfig;
use crate::document::Document;
use crate::editor::Editor;
use crate::geometry::{Canvas, IntRect};
use crate::layer::Layer;
use crate::messages::RecordingMessages;
use crate::raster::Raster;
use crate::selection::Selection;

pub const CANVAS_WIDTH: u32 = 20;
pub const CANVAS_HEIGHT: u32 = 10;

/// Offset of the layers in the translated fixture.
pub const TX: i32 = -4;
pub const TY: i32 = -4;

pub fn selection_rect() -> IntRect {
    IntRect::new(2, 2, 4, 2)
}

/// Route engine logs to the test output. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// A layer covering the canvas, shifted up-left by `(tx, ty)` and grown so
/// its right and bottom edges still touch the canvas edges. The mask has the
/// same geometry.
pub fn covering_layer(name: &str, tx: i32, ty: i32, with_mask: bool) -> Layer {
    let width = (CANVAS_WIDTH as i32 - tx) as u32;
    let height = (CANVAS_HEIGHT as i32 - ty) as u32;
    let image = ImageBuffer::from_fn(width, height, |x, y| {
        Rgba([(x * 10 % 256) as u8, (y * 20 % 256) as u8, 77, 255])
    });
    let layer = Layer::image(name, Raster::new(image, tx, ty));
    if with_mask {
        let mask = ImageBuffer::from_fn(width, height, |x, _| {
            Luma([if x % 2 == 0 { 255 } else { 128 }])
        });
        layer.with_mask(Raster::new(mask, tx, ty))
    } else {
        layer
    }
}

/// The fixture: two layers (both translated when `translated`), each with a
/// mask, and the selection when `selected`.
pub fn fixture(translated: bool, selected: bool) -> Document {
    let (tx, ty) = if translated { (TX, TY) } else { (0, 0) };
    let mut document = Document::new("Test", Canvas::new(CANVAS_WIDTH, CANVAS_HEIGHT))
        .with_layer(covering_layer("layer 1", tx, ty, true))
        .with_layer(covering_layer("layer 2", tx, ty, true));
    if selected {
        document = document.with_selection(Selection::rectangle(selection_rect().to_rect()));
    }
    document
}

pub fn editor_for(document: Document) -> (Editor, RecordingMessages) {
    editor_with_config(document, EngineConfig::default())
}

pub fn editor_with_config(document: Document, config: EngineConfig) -> (Editor, RecordingMessages) {
    init_tracing();
    let recorder = RecordingMessages::new();
    let editor = Editor::new(document, config)
        .expect("thread pool")
        .with_messages(recorder.clone());
    (editor, recorder)
}

/// The selection bounds rounded to whole pixels.
pub fn selection_bounds(document: &Document) -> Option<IntRect> {
    document.selection().map(|s| IntRect::from_rect_bounds(s.bounds()))
}

/// Bounds of the first layer's content and mask.
pub fn first_layer_geometry(document: &Document) -> (IntRect, Option<IntRect>) {
    let layer = &document.layers()[0];
    let content = layer.content_bounds().expect("image layer");
    (content, layer.mask.as_ref().map(|m| m.bounds()))
}

pub fn ellipse_selection() -> Selection {
    Selection::ellipse(Rect::new(2.0, 1.0, 12.0, 9.0))
}
