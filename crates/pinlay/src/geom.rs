//! Geometry primitives shared by the generator, the projector and the overlay helpers.
//!
//! Three coordinate spaces show up throughout the crate:
//! - model space: detection boxes on a fixed 0–1000 scale, `[ymin, xmin, ymax, xmax]`;
//! - percent space: pin centers as 0–100 of the image width/height;
//! - container space: pixels (or 0–100 percent) of the on-screen container.

use serde::{Deserialize, Serialize};

pub type Unit = euclid::UnknownUnit;

pub type Point = euclid::Point2D<f64, Unit>;
pub type Vector = euclid::Vector2D<f64, Unit>;
pub type Size = euclid::Size2D<f64, Unit>;

/// Upper end of the model-space scale used by detection boxes.
pub const MODEL_SCALE: f64 = 1000.0;

pub fn point(x: f64, y: f64) -> Point {
    euclid::point2(x, y)
}

pub fn vector(x: f64, y: f64) -> Vector {
    euclid::vec2(x, y)
}

pub fn size(width: f64, height: f64) -> Size {
    euclid::size2(width, height)
}

/// Returns `true` when both dimensions are finite and strictly positive.
pub fn is_usable_size(s: Size) -> bool {
    s.width.is_finite() && s.height.is_finite() && s.width > 0.0 && s.height > 0.0
}

/// Axis-aligned detection box in model space (0–1000 on both axes).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelBox {
    pub ymin: f64,
    pub xmin: f64,
    pub ymax: f64,
    pub xmax: f64,
}

impl ModelBox {
    pub fn new(ymin: f64, xmin: f64, ymax: f64, xmax: f64) -> Self {
        Self {
            ymin,
            xmin,
            ymax,
            xmax,
        }
    }

    /// Reads a `[ymin, xmin, ymax, xmax]` array.
    ///
    /// Only the shape is checked (exactly four finite numbers); ordering of the corners is
    /// taken as given.
    pub fn from_slice(values: &[f64]) -> Option<Self> {
        let &[ymin, xmin, ymax, xmax] = values else {
            return None;
        };
        if [ymin, xmin, ymax, xmax].iter().all(|v| v.is_finite()) {
            Some(Self::new(ymin, xmin, ymax, xmax))
        } else {
            None
        }
    }

    /// Square box of `half_extent` model units around a percent-space center.
    pub fn around_center(center: Point, half_extent: f64) -> Self {
        let cx = center.x * 10.0;
        let cy = center.y * 10.0;
        Self::new(
            cy - half_extent,
            cx - half_extent,
            cy + half_extent,
            cx + half_extent,
        )
    }

    /// Box center in percent space.
    pub fn center_percent(&self) -> Point {
        point(
            ((self.xmin + self.xmax) / 2.0) / 10.0,
            ((self.ymin + self.ymax) / 2.0) / 10.0,
        )
    }

    pub fn to_array(&self) -> [f64; 4] {
        [self.ymin, self.xmin, self.ymax, self.xmax]
    }

    /// Pixel rectangle of this box over an image of the given natural size.
    pub fn to_frame(&self, image: Size) -> BoxFrame {
        let top = (self.ymin / MODEL_SCALE) * image.height;
        let left = (self.xmin / MODEL_SCALE) * image.width;
        let bottom = (self.ymax / MODEL_SCALE) * image.height;
        let right = (self.xmax / MODEL_SCALE) * image.width;
        BoxFrame {
            top,
            left,
            width: right - left,
            height: bottom - top,
        }
    }
}

/// Pixel rectangle in image space, shaped like an absolutely positioned element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxFrame {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_slice_requires_exactly_four_finite_numbers() {
        assert!(ModelBox::from_slice(&[1.0, 2.0, 3.0]).is_none());
        assert!(ModelBox::from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0]).is_none());
        assert!(ModelBox::from_slice(&[1.0, f64::NAN, 3.0, 4.0]).is_none());
        assert_eq!(
            ModelBox::from_slice(&[1.0, 2.0, 3.0, 4.0]),
            Some(ModelBox::new(1.0, 2.0, 3.0, 4.0))
        );
    }

    #[test]
    fn usable_size_rejects_degenerate_dimensions() {
        assert!(is_usable_size(size(1.0, 1.0)));
        assert!(!is_usable_size(size(0.0, 1.0)));
        assert!(!is_usable_size(size(1.0, -3.0)));
        assert!(!is_usable_size(size(f64::INFINITY, 1.0)));
    }
}
