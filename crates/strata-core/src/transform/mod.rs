//! Coordinate-transform derivation and per-buffer pixel operations.
//!
//! Every structural edit derives exactly one [`kurbo::Affine`] mapping the
//! pre-edit image space onto the post-edit image space. That single transform
//! is then handed to the selection, the guides and the layer offsets, so the
//! collaborators can never drift apart.
//!
//! # Transform Kinds
//!
//! - Crop: translation by `(-x, -y)` of the crop rectangle
//! - Enlarge canvas: translation by `(left, top)`
//! - Flip: mirror through the canvas width or height
//! - Rotate: quarter turn followed by a compensating translation
//! - Resize: axis-aligned scale
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner of the canvas
//! - Rotations are clockwise, as seen on screen (y axis points down)

mod crop;
mod flip;
mod resize;
mod rotation;

pub use crop::{crop_buffer, crop_transform};
pub use flip::{flip_buffer, FlipDirection};
pub use resize::{fit_in_box, resize_buffer, scale_transform, FilterType};
pub use rotation::{rotate_buffer, QuadrantAngle};
