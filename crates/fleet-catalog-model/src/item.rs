use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError(pub String);

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ValidationError {}

/// Stable identity of a catalog entry; the only join key between the seed
/// dataset and persisted edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(u32);

impl ItemId {
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for ItemId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl Display for ItemId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ItemId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .map(Self)
            .map_err(|_| ValidationError(format!("item id must be a non-negative integer: {s}")))
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Category {
    #[default]
    #[serde(rename = "Vehiculos")]
    Vehicle,
    #[serde(rename = "Maquinarias")]
    Machinery,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Vehicle, Category::Machinery];

    /// Wire value, as persisted and embedded in snapshots.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Vehicle => "Vehiculos",
            Self::Machinery => "Maquinarias",
        }
    }

    /// Human label for toggles and headings.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Vehicle => "Vehículos",
            Self::Machinery => "Maquinaria",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vehiculos" | "vehicle" | "vehicles" => Ok(Self::Vehicle),
            "maquinarias" | "maquinaria" | "machinery" => Ok(Self::Machinery),
            other => Err(ValidationError(format!(
                "unknown category `{other}` (expected vehiculos or maquinarias)"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Fuel {
    Diesel,
    Nafta,
}

impl Fuel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Diesel => "Diesel",
            Self::Nafta => "Nafta",
        }
    }
}

impl Display for Fuel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SatelliteTracking {
    #[serde(rename = "activo")]
    Active,
    #[serde(rename = "N/A")]
    NotApplicable,
    #[serde(rename = "-")]
    None,
}

impl SatelliteTracking {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "activo",
            Self::NotApplicable => "N/A",
            Self::None => "-",
        }
    }
}

impl Display for SatelliteTracking {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalog entry.
///
/// Descriptive fields are owned by the seed dataset; `images` and
/// `technical_sheet` are owned by the operator's persisted edits. Image
/// entries are remote URLs or `data:` URIs, index 0 is the cover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub category: Category,
    pub brand: String,
    pub model: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub year: u16,
    pub domain: String,
    #[serde(rename = "rastreoSatelital")]
    pub satellite_tracking: SatelliteTracking,
    pub fuel: Fuel,
    pub capacity: String,
    pub equipment: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technical_sheet: Option<String>,
}

impl Item {
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.brand, self.model)
    }

    #[must_use]
    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Replaces index 0 and keeps every later image. An empty list gains the
    /// payload as its only entry.
    pub fn replace_cover_image(&mut self, payload: impl Into<String>) {
        let payload = payload.into();
        match self.images.first_mut() {
            Some(cover) => *cover = payload,
            None => self.images.push(payload),
        }
    }

    pub fn set_technical_sheet(&mut self, payload: impl Into<String>) {
        self.technical_sheet = Some(payload.into());
    }
}

/// Rejects collections where two entries share an id.
pub fn check_unique_ids(items: &[Item]) -> Result<(), ValidationError> {
    let mut seen = BTreeSet::new();
    for item in items {
        if !seen.insert(item.id) {
            return Err(ValidationError(format!("duplicate item id {}", item.id)));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Item {
        Item {
            id: ItemId::new(7),
            category: Category::Vehicle,
            brand: "Toyota".to_string(),
            model: "Hilux".to_string(),
            kind: "Pick-up".to_string(),
            year: 2022,
            domain: "AF123BC".to_string(),
            satellite_tracking: SatelliteTracking::Active,
            fuel: Fuel::Diesel,
            capacity: String::new(),
            equipment: "N/A".to_string(),
            images: vec!["https://img/1.jpg".to_string()],
            technical_sheet: None,
        }
    }

    #[test]
    fn wire_names_follow_persisted_layout() {
        let value = serde_json::to_value(sample()).expect("json");
        assert_eq!(value["type"], "Pick-up");
        assert_eq!(value["rastreoSatelital"], "activo");
        assert_eq!(value["category"], "Vehiculos");
        assert!(value.get("technicalSheet").is_none());
    }

    #[test]
    fn technical_sheet_round_trips_when_present() {
        let mut item = sample();
        item.set_technical_sheet("data:application/pdf;base64,AAAA");
        let text = serde_json::to_string(&item).expect("json");
        assert!(text.contains(r#""technicalSheet":"data:application/pdf;base64,AAAA""#));
        let back: Item = serde_json::from_str(&text).expect("parse");
        assert_eq!(back, item);
    }

    #[test]
    fn missing_images_default_to_empty() {
        let raw = r#"{"id":1,"category":"Maquinarias","brand":"CAT","model":"320","type":"Excavadora","year":2019,"domain":"-","rastreoSatelital":"-","fuel":"Diesel","capacity":"20 t","equipment":"N/A"}"#;
        let item: Item = serde_json::from_str(raw).expect("parse");
        assert!(item.images.is_empty());
        assert_eq!(item.category, Category::Machinery);
    }

    #[test]
    fn replace_cover_keeps_tail() {
        let mut item = sample();
        item.images = vec!["a".into(), "b".into(), "c".into()];
        item.replace_cover_image("x");
        assert_eq!(item.images, vec!["x", "b", "c"]);

        item.images.clear();
        item.replace_cover_image("y");
        assert_eq!(item.images, vec!["y"]);
    }

    #[test]
    fn category_parses_cli_spellings() {
        assert_eq!("Vehiculos".parse::<Category>(), Ok(Category::Vehicle));
        assert_eq!("machinery".parse::<Category>(), Ok(Category::Machinery));
        assert!("boats".parse::<Category>().is_err());
    }

    #[test]
    fn duplicate_ids_are_reported() {
        let items = vec![sample(), sample()];
        let err = check_unique_ids(&items).expect_err("duplicate");
        assert!(err.0.contains('7'));
    }
}
