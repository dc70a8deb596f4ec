//! # Freight Container Variants
//!
//! Every container carries a validated [`IdentifierCode`] and a gross weight
//! (tare plus contents, in whole tonnes). The closed [`Container`] enum has
//! one payload per variant:
//!
//! | Variant | Extra attribute | Range |
//! |---------|-----------------|-------|
//! | [`GeneralGoods`] | none | |
//! | [`DangerousGoods`] | hazard category | 1..=9 |
//! | [`Refrigerated`] | temperature (°C) | any, mutable |
//!
//! Gross weight must lie in 4..=30 tonnes for every variant, matching a
//! standard 20-foot container (4 t tare, 30 t maximum gross).
//!
//! Stack homogeneity compares the fieldless [`ContainerKind`] tag, so adding
//! a variant forces every `match` in the workspace to handle it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::code::IdentifierCode;
use crate::error::InvalidContainer;

/// Lightest permitted gross weight, in tonnes (the empty container's tare).
pub const MIN_GROSS_WEIGHT: i32 = 4;

/// Heaviest permitted gross weight, in tonnes.
pub const MAX_GROSS_WEIGHT: i32 = 30;

/// Lowest dangerous-goods hazard category.
pub const MIN_CATEGORY: i32 = 1;

/// Highest dangerous-goods hazard category.
pub const MAX_CATEGORY: i32 = 9;

fn require_gross_weight(weight: i32) -> Result<(), InvalidContainer> {
    if !(MIN_GROSS_WEIGHT..=MAX_GROSS_WEIGHT).contains(&weight) {
        return Err(InvalidContainer::GrossWeightOutOfRange {
            weight,
            min: MIN_GROSS_WEIGHT,
            max: MAX_GROSS_WEIGHT,
        });
    }
    Ok(())
}

fn require_category(category: i32) -> Result<(), InvalidContainer> {
    if !(MIN_CATEGORY..=MAX_CATEGORY).contains(&category) {
        return Err(InvalidContainer::CategoryOutOfRange {
            category,
            min: MIN_CATEGORY,
            max: MAX_CATEGORY,
        });
    }
    Ok(())
}

// ─── Kind ────────────────────────────────────────────────────────────

/// The variant of a container, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerKind {
    /// General goods.
    General,
    /// Dangerous goods.
    DangerousGoods,
    /// Refrigerated goods.
    Refrigerated,
}

impl ContainerKind {
    /// All kinds in declaration order.
    pub fn all() -> &'static [ContainerKind] {
        &[Self::General, Self::DangerousGoods, Self::Refrigerated]
    }

    /// The snake_case name used in serialized records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::DangerousGoods => "dangerous_goods",
            Self::Refrigerated => "refrigerated",
        }
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContainerKind {
    type Err = InvalidContainer;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "general" => Ok(Self::General),
            "dangerous_goods" | "dangerous" => Ok(Self::DangerousGoods),
            "refrigerated" | "reefer" => Ok(Self::Refrigerated),
            _ => Err(InvalidContainer::UnknownKind(s.to_string())),
        }
    }
}

// ─── Variants ────────────────────────────────────────────────────────

/// A general-goods container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneralGoods {
    code: IdentifierCode,
    gross_weight: i32,
}

impl GeneralGoods {
    /// Create a general-goods container.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidContainer::GrossWeightOutOfRange`] if the gross
    /// weight is not between 4 and 30 tonnes inclusive.
    pub fn new(code: IdentifierCode, gross_weight: i32) -> Result<Self, InvalidContainer> {
        require_gross_weight(gross_weight)?;
        Ok(Self { code, gross_weight })
    }

    /// The container's code.
    pub fn code(&self) -> &IdentifierCode {
        &self.code
    }

    /// Gross weight in tonnes.
    pub fn gross_weight(&self) -> i32 {
        self.gross_weight
    }
}

/// A dangerous-goods container tagged with its hazard category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DangerousGoods {
    code: IdentifierCode,
    gross_weight: i32,
    category: i32,
}

impl DangerousGoods {
    /// Create a dangerous-goods container.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidContainer`] if the gross weight is not between 4 and
    /// 30 tonnes or the category is not between 1 and 9, both inclusive.
    pub fn new(
        code: IdentifierCode,
        gross_weight: i32,
        category: i32,
    ) -> Result<Self, InvalidContainer> {
        require_gross_weight(gross_weight)?;
        require_category(category)?;
        Ok(Self {
            code,
            gross_weight,
            category,
        })
    }

    /// The container's code.
    pub fn code(&self) -> &IdentifierCode {
        &self.code
    }

    /// Gross weight in tonnes.
    pub fn gross_weight(&self) -> i32 {
        self.gross_weight
    }

    /// Hazard category, 1 through 9.
    pub fn category(&self) -> i32 {
        self.category
    }
}

/// A refrigerated container with an adjustable set-point temperature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Refrigerated {
    code: IdentifierCode,
    gross_weight: i32,
    temperature: i32,
}

impl Refrigerated {
    /// Create a refrigerated container. Any temperature is accepted.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidContainer::GrossWeightOutOfRange`] if the gross
    /// weight is not between 4 and 30 tonnes inclusive.
    pub fn new(
        code: IdentifierCode,
        gross_weight: i32,
        temperature: i32,
    ) -> Result<Self, InvalidContainer> {
        require_gross_weight(gross_weight)?;
        Ok(Self {
            code,
            gross_weight,
            temperature,
        })
    }

    /// The container's code.
    pub fn code(&self) -> &IdentifierCode {
        &self.code
    }

    /// Gross weight in tonnes.
    pub fn gross_weight(&self) -> i32 {
        self.gross_weight
    }

    /// Current set-point temperature.
    pub fn temperature(&self) -> i32 {
        self.temperature
    }

    /// Overwrite the set-point temperature. Not range-checked.
    pub fn set_temperature(&mut self, temperature: i32) {
        self.temperature = temperature;
    }
}

// ─── Container ───────────────────────────────────────────────────────

/// A freight container of one of the three variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ContainerRecord", into = "ContainerRecord")]
pub enum Container {
    /// General goods.
    General(GeneralGoods),
    /// Dangerous goods.
    DangerousGoods(DangerousGoods),
    /// Refrigerated goods.
    Refrigerated(Refrigerated),
}

impl Container {
    /// Create a general-goods container.
    pub fn general(code: IdentifierCode, gross_weight: i32) -> Result<Self, InvalidContainer> {
        GeneralGoods::new(code, gross_weight).map(Self::General)
    }

    /// Create a dangerous-goods container.
    pub fn dangerous_goods(
        code: IdentifierCode,
        gross_weight: i32,
        category: i32,
    ) -> Result<Self, InvalidContainer> {
        DangerousGoods::new(code, gross_weight, category).map(Self::DangerousGoods)
    }

    /// Create a refrigerated container.
    pub fn refrigerated(
        code: IdentifierCode,
        gross_weight: i32,
        temperature: i32,
    ) -> Result<Self, InvalidContainer> {
        Refrigerated::new(code, gross_weight, temperature).map(Self::Refrigerated)
    }

    /// The container's code.
    pub fn code(&self) -> &IdentifierCode {
        match self {
            Self::General(c) => c.code(),
            Self::DangerousGoods(c) => c.code(),
            Self::Refrigerated(c) => c.code(),
        }
    }

    /// Gross weight in tonnes.
    pub fn gross_weight(&self) -> i32 {
        match self {
            Self::General(c) => c.gross_weight(),
            Self::DangerousGoods(c) => c.gross_weight(),
            Self::Refrigerated(c) => c.gross_weight(),
        }
    }

    /// The variant tag.
    pub fn kind(&self) -> ContainerKind {
        match self {
            Self::General(_) => ContainerKind::General,
            Self::DangerousGoods(_) => ContainerKind::DangerousGoods,
            Self::Refrigerated(_) => ContainerKind::Refrigerated,
        }
    }

    /// Hazard category, for dangerous-goods containers.
    pub fn category(&self) -> Option<i32> {
        match self {
            Self::DangerousGoods(c) => Some(c.category()),
            _ => None,
        }
    }

    /// Set-point temperature, for refrigerated containers.
    pub fn temperature(&self) -> Option<i32> {
        match self {
            Self::Refrigerated(c) => Some(c.temperature()),
            _ => None,
        }
    }

    /// Mutable access to the refrigerated payload.
    pub fn as_refrigerated_mut(&mut self) -> Option<&mut Refrigerated> {
        match self {
            Self::Refrigerated(c) => Some(c),
            _ => None,
        }
    }
}

impl From<GeneralGoods> for Container {
    fn from(c: GeneralGoods) -> Self {
        Self::General(c)
    }
}

impl From<DangerousGoods> for Container {
    fn from(c: DangerousGoods) -> Self {
        Self::DangerousGoods(c)
    }
}

impl From<Refrigerated> for Container {
    fn from(c: Refrigerated) -> Self {
        Self::Refrigerated(c)
    }
}

// ─── Record ──────────────────────────────────────────────────────────

/// Flat serialized form of a [`Container`].
///
/// Deserializing a `Container` goes through this record and then through the
/// variant constructors, so out-of-range attributes are rejected at the serde
/// boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerRecord {
    /// Variant name.
    pub kind: ContainerKind,
    /// Container code.
    pub code: IdentifierCode,
    /// Gross weight in tonnes.
    pub gross_weight: i32,
    /// Hazard category (dangerous goods only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<i32>,
    /// Set-point temperature (refrigerated only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<i32>,
}

impl TryFrom<ContainerRecord> for Container {
    type Error = InvalidContainer;

    fn try_from(record: ContainerRecord) -> Result<Self, Self::Error> {
        let unexpected = match record.kind {
            ContainerKind::General if record.category.is_some() => Some("category"),
            ContainerKind::General | ContainerKind::DangerousGoods
                if record.temperature.is_some() =>
            {
                Some("temperature")
            }
            ContainerKind::Refrigerated if record.category.is_some() => Some("category"),
            _ => None,
        };
        if let Some(attribute) = unexpected {
            return Err(InvalidContainer::UnexpectedAttribute {
                kind: record.kind.to_string(),
                attribute,
            });
        }

        match record.kind {
            ContainerKind::General => Container::general(record.code, record.gross_weight),
            ContainerKind::DangerousGoods => {
                let category = record.category.ok_or_else(|| InvalidContainer::MissingAttribute {
                    kind: record.kind.to_string(),
                    attribute: "category",
                })?;
                Container::dangerous_goods(record.code, record.gross_weight, category)
            }
            ContainerKind::Refrigerated => {
                let temperature = record
                    .temperature
                    .ok_or_else(|| InvalidContainer::MissingAttribute {
                        kind: record.kind.to_string(),
                        attribute: "temperature",
                    })?;
                Container::refrigerated(record.code, record.gross_weight, temperature)
            }
        }
    }
}

impl From<Container> for ContainerRecord {
    fn from(container: Container) -> Self {
        Self {
            kind: container.kind(),
            category: container.category(),
            temperature: container.temperature(),
            gross_weight: container.gross_weight(),
            code: container.code().clone(),
        }
    }
}
