#![forbid(unsafe_code)]

//! Headless pin layout for annotated food photos.
//!
//! Given detected ingredients (optionally with detection boxes on a 0–1000 model scale),
//! `pinlay` computes where each ingredient's marker goes:
//! - ingredients with boxes are pinned at their box center;
//! - a set without boxes gets a generated, readable arrangement (template placement,
//!   pairwise repulsion, safe-area clamping);
//! - centers are then projected from image space into the container the photo is shown
//!   in, accounting for letterboxing and pillarboxing.
//!
//! Everything here is pure and deterministic: no I/O, no shared state, no randomness.
//! Rendering, image decoding and measurement are left to the caller.

pub mod config;
pub mod error;
pub mod frame;
pub mod generator;
pub mod geom;
pub mod ingredient;
pub mod overlay;
pub mod pass;
pub mod projector;

pub use config::PinLayoutConfig;
pub use error::{Error, Result};
pub use frame::{ImageLayoutStyle, RenderedFrame, VerticalAnchor, image_layout_style};
pub use generator::{
    GeneratorOptions, PinPosition, SafeBounds, generate_layout, generate_positions,
    initial_position,
};
pub use geom::{BoxFrame, ModelBox, Point, Size};
pub use ingredient::{
    DisplayPin, Ingredient, JsonFields, JsonIngredient, Pin, RESERVED_KEYS,
};
pub use overlay::{OverlayItem, has_renderable_bounding_boxes, overlay_items};
pub use pass::{LayoutPass, layout_pass};
pub use projector::{
    MixedBoxPolicy, ProjectorOptions, has_real_coordinates, map_to_display, project,
    to_base_pins,
};

/// Version of the `pinlay` crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Reads a JSON array of ingredient objects, keeping every caller field in the payload.
pub fn ingredients_from_json_str(text: &str) -> Result<Vec<JsonIngredient>> {
    Ok(serde_json::from_str(text)?)
}
