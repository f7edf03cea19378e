//! One layout pass for a result screen: pins plus the matching image style.

use serde::Serialize;

use crate::config::PinLayoutConfig;
use crate::frame::{ImageLayoutStyle, image_layout_style};
use crate::geom::{Size, size};
use crate::ingredient::{DisplayPin, Ingredient};
use crate::projector::project;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutPass<T> {
    pub pins: Vec<DisplayPin<T>>,
    pub layout_style: Option<ImageLayoutStyle>,
    #[serde(serialize_with = "serialize_size")]
    pub image_size: Option<Size>,
}

fn serialize_size<S>(value: &Option<Size>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    #[derive(Serialize)]
    struct SizeOut {
        width: f64,
        height: f64,
    }

    value
        .map(|s| SizeOut {
            width: s.width,
            height: s.height,
        })
        .serialize(serializer)
}

/// Computes pins and image style for one render of the photo header.
///
/// With `show_pins` off the photo is partly covered by a bottom sheet, so the image style
/// is fitted to the container minus `sheet_overlap` and no pins are produced. Pins are
/// always projected against the full container.
pub fn layout_pass<T>(
    ingredients: Option<Vec<Ingredient<T>>>,
    image: Option<Size>,
    container: Size,
    config: &PinLayoutConfig,
    show_pins: bool,
) -> LayoutPass<T> {
    let anchor = config.projector.vertical_anchor;

    let Some(ingredients) = ingredients else {
        return LayoutPass {
            pins: Vec::new(),
            layout_style: None,
            image_size: image,
        };
    };

    if !show_pins {
        let style_container = size(
            container.width,
            (container.height - config.sheet_overlap).max(0.0),
        );
        return LayoutPass {
            pins: Vec::new(),
            layout_style: image_layout_style(image, style_container, anchor),
            image_size: image,
        };
    }

    let pins = project(ingredients, image, container, &config.projector);
    tracing::debug!(pins = pins.len(), "layout pass complete");
    LayoutPass {
        pins,
        layout_style: image_layout_style(image, container, anchor),
        image_size: image,
    }
}
