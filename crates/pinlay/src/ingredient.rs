//! Ingredient records and the pin shapes derived from them.
//!
//! Callers own the ingredient schema. The core only reads the optional detection box
//! (`box_2d` or `bbox`, both `[ymin, xmin, ymax, xmax]` on the 0–1000 scale) and passes
//! every other field through in the flattened payload.

use serde::{Deserialize, Deserializer, Serialize};

use crate::geom::{ModelBox, Point, point};

/// Ingredient with an arbitrary caller payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient<T> {
    #[serde(flatten)]
    pub payload: T,
    #[serde(
        default,
        deserialize_with = "lenient_numbers",
        skip_serializing_if = "Option::is_none"
    )]
    pub box_2d: Option<Vec<f64>>,
    #[serde(
        default,
        deserialize_with = "lenient_numbers",
        skip_serializing_if = "Option::is_none"
    )]
    pub bbox: Option<Vec<f64>>,
}

/// Ingredient whose payload is the raw JSON object it was read from.
pub type JsonIngredient = Ingredient<JsonFields>;

/// Keys the layout writes on [`Pin`] and [`DisplayPin`].
pub const RESERVED_KEYS: [&str; 6] = [
    "cx",
    "cy",
    "originalCx",
    "originalCy",
    "displayX",
    "displayY",
];

/// Caller fields of a JSON ingredient, minus [`RESERVED_KEYS`].
///
/// Stale layout keys (e.g. from re-feeding earlier output) are dropped on the way in, so
/// every key appears once in serialized pins.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct JsonFields(serde_json::Map<String, serde_json::Value>);

impl JsonFields {
    pub fn into_inner(self) -> serde_json::Map<String, serde_json::Value> {
        self.0
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for JsonFields {
    fn from(mut map: serde_json::Map<String, serde_json::Value>) -> Self {
        map.retain(|key, _| !RESERVED_KEYS.contains(&key.as_str()));
        Self(map)
    }
}

impl std::ops::Deref for JsonFields {
    type Target = serde_json::Map<String, serde_json::Value>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'de> Deserialize<'de> for JsonFields {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        serde_json::Map::deserialize(deserializer).map(Self::from)
    }
}

impl<T> Ingredient<T> {
    pub fn new(payload: T) -> Self {
        Self {
            payload,
            box_2d: None,
            bbox: None,
        }
    }

    pub fn with_bbox(mut self, bbox: [f64; 4]) -> Self {
        self.bbox = Some(bbox.to_vec());
        self
    }

    pub fn with_box_2d(mut self, box_2d: [f64; 4]) -> Self {
        self.box_2d = Some(box_2d.to_vec());
        self
    }

    /// The detection box this ingredient carries, if any.
    ///
    /// `bbox` wins over `box_2d` when both are valid; a malformed value in one field falls
    /// back to the other.
    pub fn model_box(&self) -> Option<ModelBox> {
        self.bbox
            .as_deref()
            .and_then(ModelBox::from_slice)
            .or_else(|| self.box_2d.as_deref().and_then(ModelBox::from_slice))
    }
}

/// Accepts any JSON value for a box field; anything other than an array of numbers reads
/// as "no box" instead of failing the whole record.
fn lenient_numbers<'de, D>(deserializer: D) -> Result<Option<Vec<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Lenient {
        Numbers(Vec<f64>),
        Other(serde::de::IgnoredAny),
    }

    Ok(match Option::<Lenient>::deserialize(deserializer)? {
        Some(Lenient::Numbers(values)) => Some(values),
        Some(Lenient::Other(_)) | None => None,
    })
}

/// An ingredient with a percent-space center (0–100 of the image width/height).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pin<T> {
    #[serde(flatten)]
    pub ingredient: Ingredient<T>,
    pub cx: f64,
    pub cy: f64,
    /// Center before collision resolution. Only set for generated positions.
    #[serde(rename = "originalCx", skip_serializing_if = "Option::is_none")]
    pub original_cx: Option<f64>,
    #[serde(rename = "originalCy", skip_serializing_if = "Option::is_none")]
    pub original_cy: Option<f64>,
}

impl<T> Pin<T> {
    pub fn center(&self) -> Point {
        point(self.cx, self.cy)
    }
}

/// A pin expressed as 0–100 percent of the container it is drawn over.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayPin<T> {
    #[serde(flatten)]
    pub pin: Pin<T>,
    #[serde(rename = "displayX")]
    pub display_x: f64,
    #[serde(rename = "displayY")]
    pub display_y: f64,
}
