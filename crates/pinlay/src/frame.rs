//! Where an aspect-preserving image lands inside its container.
//!
//! Both the image element style and the pin projection are derived from
//! [`RenderedFrame::fit`], so pins and photo always share the same scale and offset.

use serde::{Deserialize, Serialize};

use crate::geom::{Point, Size, is_usable_size, point};

/// Vertical placement of an image that is relatively wider than its container.
///
/// Taller images are always centered horizontally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VerticalAnchor {
    /// Pin the image to the top edge of the container.
    #[default]
    Top,
    /// Center the image vertically.
    Center,
}

/// Rendered image rectangle in container pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderedFrame {
    pub width: f64,
    pub height: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub container: Size,
}

impl RenderedFrame {
    /// Fits `image` inside `container` preserving its aspect ratio ("contain").
    ///
    /// Returns `None` when either size has a non-positive or non-finite dimension.
    pub fn fit(image: Size, container: Size, anchor: VerticalAnchor) -> Option<Self> {
        if !is_usable_size(image) || !is_usable_size(container) {
            return None;
        }

        let image_ratio = image.width / image.height;
        let container_ratio = container.width / container.height;

        if image_ratio > container_ratio {
            let height = container.width / image_ratio;
            let offset_y = match anchor {
                VerticalAnchor::Top => 0.0,
                VerticalAnchor::Center => (container.height - height) / 2.0,
            };
            Some(Self {
                width: container.width,
                height,
                offset_x: 0.0,
                offset_y,
                container,
            })
        } else {
            let width = container.height * image_ratio;
            Some(Self {
                width,
                height: container.height,
                offset_x: (container.width - width) / 2.0,
                offset_y: 0.0,
                container,
            })
        }
    }

    /// Maps a percent-of-image point to percent-of-container.
    pub fn image_percent_to_container_percent(&self, p: Point) -> Point {
        let pixel_x = (p.x / 100.0) * self.width;
        let pixel_y = (p.y / 100.0) * self.height;
        point(
            ((pixel_x + self.offset_x) / self.container.width) * 100.0,
            ((pixel_y + self.offset_y) / self.container.height) * 100.0,
        )
    }

    pub fn layout_style(&self) -> ImageLayoutStyle {
        ImageLayoutStyle {
            width: self.width,
            height: self.height,
            margin_top: self.offset_y,
            margin_left: self.offset_x,
        }
    }
}

/// Size and margins for the image element, in container pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageLayoutStyle {
    pub width: f64,
    pub height: f64,
    pub margin_top: f64,
    pub margin_left: f64,
}

/// Style for the image element, or `None` when the image size is unknown or degenerate.
pub fn image_layout_style(
    image: Option<Size>,
    container: Size,
    anchor: VerticalAnchor,
) -> Option<ImageLayoutStyle> {
    image
        .and_then(|image| RenderedFrame::fit(image, container, anchor))
        .map(|frame| frame.layout_style())
}
