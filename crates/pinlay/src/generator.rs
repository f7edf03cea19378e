//! Readable pin placement for ingredients without usable detection boxes.
//!
//! The generator works in percent space (0–100 of the image on each axis) and runs in
//! three phases:
//! 1. a count-dependent template assigns every pin an initial center;
//! 2. pairwise repulsion pushes pins closer than `min_distance` apart;
//! 3. centers are clamped to the safe bounds.
//!
//! Each pin then gets a synthesized model-space box around its final center so downstream
//! overlay code can treat generated and detected pins alike.
//!
//! The relaxation is a pure positional correction (no velocities), bounded by
//! `iterations` full passes over all unordered pairs. Dense inputs may keep some residual
//! overlap after the budget is spent.

use serde::{Deserialize, Serialize};

use crate::geom::{ModelBox, Point, Vector, point, vector};
use crate::ingredient::{Ingredient, Pin};

/// Inclusive clamp range for generated centers, in percent space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SafeBounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Default for SafeBounds {
    fn default() -> Self {
        // The bottom edge stays clear for the label area under each pin.
        Self {
            min_x: 10.0,
            max_x: 90.0,
            min_y: 10.0,
            max_y: 85.0,
        }
    }
}

impl SafeBounds {
    pub fn clamp(&self, p: Point) -> Point {
        point(
            p.x.max(self.min_x).min(self.max_x),
            p.y.max(self.min_y).min(self.max_y),
        )
    }

    pub fn contains(&self, p: Point) -> bool {
        (self.min_x..=self.max_x).contains(&p.x) && (self.min_y..=self.max_y).contains(&p.y)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorOptions {
    /// Pins closer than this (percent units) repel each other.
    pub min_distance: f64,
    /// Upper bound on full relaxation passes.
    pub iterations: usize,
    /// Offset applied to the first pin of an exactly coincident pair.
    pub jitter: [f64; 2],
    pub bounds: SafeBounds,
    /// Half the side of the synthesized box, in model units.
    pub box_half_extent: f64,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            min_distance: 18.0,
            iterations: 8,
            jitter: [5.0, 3.0],
            bounds: SafeBounds::default(),
            box_half_extent: 50.0,
        }
    }
}

/// A generated pin position, independent of any ingredient payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinPosition {
    pub center: Point,
    /// Template center before repulsion and clamping.
    pub original: Point,
    pub model_box: ModelBox,
}

/// Template center for item `idx` out of `total`.
///
/// Up to six items use fixed templates. Larger sets use a three-column grid with odd
/// rows shifted right by 10, growing downwards until y = 75; rows below that stack on
/// the last row and are left to the repulsion phase.
pub fn initial_position(idx: usize, total: usize) -> Point {
    match total {
        0 | 1 => point(50.0, 50.0),
        2 => point(if idx == 0 { 30.0 } else { 70.0 }, 50.0),
        3 => {
            const TRIANGLE: [(f64, f64); 3] = [(50.0, 30.0), (30.0, 65.0), (70.0, 65.0)];
            let (x, y) = TRIANGLE[idx.min(2)];
            point(x, y)
        }
        4 => {
            const SQUARE: [(f64, f64); 4] = [(30.0, 35.0), (70.0, 35.0), (30.0, 65.0), (70.0, 65.0)];
            let (x, y) = SQUARE[idx.min(3)];
            point(x, y)
        }
        5 | 6 => {
            let (row, col, items_in_row) = if idx < 3 {
                (0, idx, 3)
            } else {
                (1, idx - 3, total - 3)
            };
            let spacing = 80.0 / (items_in_row as f64 + 1.0);
            point(
                10.0 + spacing * (col as f64 + 1.0),
                if row == 0 { 35.0 } else { 65.0 },
            )
        }
        _ => {
            let row = idx / 3;
            let col = idx % 3;
            let row_offset = (row % 2) as f64 * 10.0;
            point(
                20.0 + col as f64 * 30.0 + row_offset,
                (25.0 + row as f64 * 20.0).min(75.0),
            )
        }
    }
}

/// Runs the repulsion passes in place and returns how many passes were executed.
///
/// A pass that moves no pin is a fixed point of the relaxation, so stopping there yields
/// exactly the positions the full budget would.
pub fn relax(points: &mut [Point], opts: &GeneratorOptions) -> usize {
    let jitter = vector(opts.jitter[0], opts.jitter[1]);
    for pass in 0..opts.iterations {
        let mut moved = false;
        for i in 0..points.len() {
            for j in (i + 1)..points.len() {
                let delta: Vector = points[i] - points[j];
                let dist = delta.length();

                if dist < opts.min_distance && dist > 0.0 {
                    let overlap = opts.min_distance - dist;
                    let adjust = delta / dist * overlap * 0.5;
                    points[i] += adjust;
                    points[j] -= adjust;
                    moved = true;
                } else if dist == 0.0 {
                    points[i] += jitter;
                    moved = true;
                }
            }
        }
        if !moved {
            return pass + 1;
        }
    }
    opts.iterations
}

/// Positions for `count` pins without any ingredient data attached.
pub fn generate_positions(count: usize, opts: &GeneratorOptions) -> Vec<PinPosition> {
    if count == 0 {
        return Vec::new();
    }

    let original: Vec<Point> = (0..count).map(|i| initial_position(i, count)).collect();
    let mut centers = original.clone();
    let passes = relax(&mut centers, opts);
    tracing::trace!(count, passes, "pin relaxation finished");

    original
        .into_iter()
        .zip(centers)
        .map(|(original, center)| {
            let center = opts.bounds.clamp(center);
            PinPosition {
                center,
                original,
                model_box: ModelBox::around_center(center, opts.box_half_extent),
            }
        })
        .collect()
}

/// Lays out every ingredient, ignoring any box it may carry.
///
/// The synthesized box replaces `box_2d`; all other fields pass through.
pub fn generate_layout<T>(ingredients: Vec<Ingredient<T>>, opts: &GeneratorOptions) -> Vec<Pin<T>> {
    let positions = generate_positions(ingredients.len(), opts);
    tracing::debug!(count = positions.len(), "generated pin layout");

    ingredients
        .into_iter()
        .zip(positions)
        .map(|(mut ingredient, pos)| {
            ingredient.box_2d = Some(pos.model_box.to_array().to_vec());
            Pin {
                ingredient,
                cx: pos.center.x,
                cy: pos.center.y,
                original_cx: Some(pos.original.x),
                original_cy: Some(pos.original.y),
            }
        })
        .collect()
}
