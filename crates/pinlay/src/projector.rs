//! Projection of ingredient centers into container display coordinates.
//!
//! Step A derives a percent-space center per ingredient (from its detection box, or from
//! the generator when the set has no boxes). Steps B and C fit the image into the
//! container and re-express each center as a percentage of the container.

use serde::{Deserialize, Serialize};

use crate::frame::{RenderedFrame, VerticalAnchor};
use crate::generator::{GeneratorOptions, generate_layout};
use crate::geom::Size;
use crate::ingredient::{DisplayPin, Ingredient, Pin};

/// Center used for an ingredient that has no usable box in a set that does.
pub const FALLBACK_CENTER: (f64, f64) = (50.0, 50.0);

/// How to place box-less ingredients when other ingredients in the same set have boxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MixedBoxPolicy {
    /// Any valid box in the set disables the generator; box-less items sit at the image
    /// center.
    #[default]
    AllOrNothing,
    /// Run the generator on the box-less items only and keep detected centers for the rest.
    LayoutMissing,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectorOptions {
    pub generator: GeneratorOptions,
    pub mixed_box_policy: MixedBoxPolicy,
    pub vertical_anchor: VerticalAnchor,
}

pub fn has_real_coordinates<T>(ingredients: &[Ingredient<T>]) -> bool {
    ingredients.iter().any(|i| i.model_box().is_some())
}

fn detected_pin<T>(ingredient: Ingredient<T>) -> Pin<T> {
    let (cx, cy) = match ingredient.model_box() {
        Some(b) => {
            let c = b.center_percent();
            (c.x, c.y)
        }
        None => FALLBACK_CENTER,
    };
    Pin {
        ingredient,
        cx,
        cy,
        original_cx: None,
        original_cy: None,
    }
}

/// Step A: percent-space centers for every ingredient, in input order.
pub fn to_base_pins<T>(ingredients: Vec<Ingredient<T>>, opts: &ProjectorOptions) -> Vec<Pin<T>> {
    if !has_real_coordinates(&ingredients) {
        tracing::debug!(
            count = ingredients.len(),
            "no detection boxes, generating layout"
        );
        return generate_layout(ingredients, &opts.generator);
    }

    match opts.mixed_box_policy {
        MixedBoxPolicy::AllOrNothing => ingredients.into_iter().map(detected_pin).collect(),
        MixedBoxPolicy::LayoutMissing => {
            let mut slots: Vec<Option<Pin<T>>> = Vec::with_capacity(ingredients.len());
            let mut missing_idx = Vec::new();
            let mut missing = Vec::new();
            for ingredient in ingredients {
                if ingredient.model_box().is_some() {
                    slots.push(Some(detected_pin(ingredient)));
                } else {
                    missing_idx.push(slots.len());
                    missing.push(ingredient);
                    slots.push(None);
                }
            }
            tracing::debug!(
                detected = slots.len() - missing.len(),
                generated = missing.len(),
                "mixed detection boxes, generating layout for box-less ingredients"
            );
            for (idx, pin) in missing_idx
                .into_iter()
                .zip(generate_layout(missing, &opts.generator))
            {
                slots[idx] = Some(pin);
            }
            slots.into_iter().flatten().collect()
        }
    }
}

/// Steps B and C: percent-of-image centers to percent-of-container display coordinates.
///
/// Without a usable image and container size the centers pass through unchanged.
pub fn map_to_display<T>(
    pins: Vec<Pin<T>>,
    image: Option<Size>,
    container: Size,
    opts: &ProjectorOptions,
) -> Vec<DisplayPin<T>> {
    let frame = image.and_then(|image| RenderedFrame::fit(image, container, opts.vertical_anchor));
    if frame.is_none() && !pins.is_empty() {
        tracing::debug!(?image, ?container, "no usable frame, display equals image percent");
    }

    pins.into_iter()
        .map(|pin| {
            let display = match &frame {
                Some(frame) => frame.image_percent_to_container_percent(pin.center()),
                None => pin.center(),
            };
            DisplayPin {
                pin,
                display_x: display.x,
                display_y: display.y,
            }
        })
        .collect()
}

/// Full projection: centers from boxes or the generator, then display coordinates.
pub fn project<T>(
    ingredients: Vec<Ingredient<T>>,
    image: Option<Size>,
    container: Size,
    opts: &ProjectorOptions,
) -> Vec<DisplayPin<T>> {
    let pins = to_base_pins(ingredients, opts);
    map_to_display(pins, image, container, opts)
}
