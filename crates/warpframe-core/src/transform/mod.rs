//! Image transformation operators.
//!
//! Every operator is a pure function `&ImageBuffer -> Result<ImageBuffer>`:
//! it validates its parameters before touching any pixels, never mutates
//! its input, and returns a copy of the input for identity parameters.
//!
//! # Operators
//!
//! - Brightness: per-pixel intensity scaling (two explicit modes)
//! - Rotation: clockwise about the centre, fixed canvas
//! - Scale: resizes the canvas
//! - Translation: fixed canvas, `fill` or `wrap` edges
//! - Skew: shear anchored at the origin, fixed canvas
//!
//! Rotation, translation and skew share [`apply_affine`], which resamples
//! through a single forward matrix with bilinear interpolation.
//!
//! # Coordinate System
//!
//! - Origin is the centre of the top-left pixel
//! - x grows right, y grows down
//! - Positive rotation angles turn content clockwise on screen

mod brightness;
mod rotation;
mod scale;
mod skew;
mod translate;
mod warp;

pub use brightness::apply_brightness;
pub use rotation::apply_rotation;
pub use scale::{apply_scale, scaled_dimensions, MAX_OUTPUT_DIMENSION};
pub use skew::apply_skew;
pub use translate::apply_translation;
pub use warp::apply_affine;
