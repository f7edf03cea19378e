//! Pixel frames for drawing detection boxes over the photo.

use serde::Serialize;

use crate::geom::{BoxFrame, Size};
use crate::ingredient::Ingredient;

/// One detection box ready to draw, with the ingredient fields its label and colour
/// come from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayItem<'a, T> {
    /// Stable element key, `box-{index}`.
    pub key: String,
    /// Position of the ingredient in the input list.
    pub index: usize,
    /// Caller fields of the ingredient (e.g. `name`, `isAllergen`).
    pub ingredient: &'a T,
    pub frame: BoxFrame,
}

pub fn has_renderable_bounding_boxes<T>(ingredients: &[Ingredient<T>]) -> bool {
    ingredients.iter().any(|i| i.model_box().is_some())
}

/// One overlay rectangle per ingredient with a valid box, in input order.
pub fn overlay_items<T>(ingredients: &[Ingredient<T>], image: Size) -> Vec<OverlayItem<'_, T>> {
    ingredients
        .iter()
        .enumerate()
        .filter_map(|(index, ingredient)| {
            let model_box = ingredient.model_box()?;
            Some(OverlayItem {
                key: format!("box-{index}"),
                index,
                ingredient: &ingredient.payload,
                frame: model_box.to_frame(image),
            })
        })
        .collect()
}
