//! Recipe read models consumed by the shopping-list aggregator.
//!
//! Recipes and ingredients are owned by an external catalogue; this module
//! only carries the fields the aggregator and short-link services read.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::UserId;

/// Validation errors for recipe read models.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecipeValidationError {
    /// Zero, negative or non-numeric id.
    #[error("recipe id must be a positive integer")]
    InvalidRecipeId,
    /// Blank ingredient name.
    #[error("ingredient name must not be empty")]
    EmptyIngredientName,
    /// Blank unit.
    #[error("measurement unit must not be empty")]
    EmptyMeasurementUnit,
    /// Negative stored amount.
    #[error("amount must not be negative")]
    NegativeAmount,
}

/// Store-assigned recipe identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct RecipeId(i64);

impl RecipeId {
    /// Construct from a raw store identifier.
    ///
    /// # Examples
    /// ```
    /// use foodgram::domain::RecipeId;
    ///
    /// assert!(RecipeId::new(7).is_ok());
    /// assert!(RecipeId::new(0).is_err());
    /// ```
    pub fn new(raw: i64) -> Result<Self, RecipeValidationError> {
        if raw > 0 {
            Ok(Self(raw))
        } else {
            Err(RecipeValidationError::InvalidRecipeId)
        }
    }

    /// Raw identifier for adapters.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for RecipeId {
    type Err = RecipeValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s
            .parse::<i64>()
            .map_err(|_| RecipeValidationError::InvalidRecipeId)?;
        Self::new(raw)
    }
}

impl TryFrom<i64> for RecipeId {
    type Error = RecipeValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RecipeId> for i64 {
    fn from(value: RecipeId) -> Self {
        value.0
    }
}

fn non_blank(value: String, error: RecipeValidationError) -> Result<String, RecipeValidationError> {
    if value.trim().is_empty() {
        Err(error)
    } else {
        Ok(value)
    }
}

/// Display name of an ingredient as recorded in the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IngredientName(String);

impl IngredientName {
    /// Validate a non-blank ingredient name. The value is kept verbatim.
    pub fn new(name: impl Into<String>) -> Result<Self, RecipeValidationError> {
        non_blank(name.into(), RecipeValidationError::EmptyIngredientName).map(Self)
    }

    /// Borrow the name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for IngredientName {
    type Error = RecipeValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<IngredientName> for String {
    fn from(value: IngredientName) -> Self {
        value.0
    }
}

/// Measurement unit fixed per ingredient record (`g`, `kg`, `ml`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MeasurementUnit(String);

impl MeasurementUnit {
    /// Validate a non-blank unit. No conversion between units is attempted.
    pub fn new(unit: impl Into<String>) -> Result<Self, RecipeValidationError> {
        non_blank(unit.into(), RecipeValidationError::EmptyMeasurementUnit).map(Self)
    }

    /// Borrow the unit.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for MeasurementUnit {
    type Error = RecipeValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MeasurementUnit> for String {
    fn from(value: MeasurementUnit) -> Self {
        value.0
    }
}

/// Whole-number ingredient quantity in the ingredient's own unit.
///
/// Addition is exact and checked; there is no floating-point path.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Amount(u64);

impl Amount {
    /// The additive identity.
    pub const ZERO: Self = Self(0);

    /// Wrap a raw quantity.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Convert a signed store column, rejecting negative values.
    pub fn from_signed(raw: i64) -> Result<Self, RecipeValidationError> {
        u64::try_from(raw)
            .map(Self)
            .map_err(|_| RecipeValidationError::NegativeAmount)
    }

    /// Raw quantity.
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Exact addition; `None` on overflow.
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One `(ingredient, amount)` line of a recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientLine {
    /// Ingredient display name.
    pub name: IngredientName,
    /// Unit the amount is measured in.
    pub unit: MeasurementUnit,
    /// Quantity used by the recipe.
    pub amount: Amount,
}

impl IngredientLine {
    /// Validate raw parts into a line.
    ///
    /// # Examples
    /// ```
    /// use foodgram::domain::IngredientLine;
    ///
    /// let line = IngredientLine::try_from_parts("Sugar", "g", 200).expect("valid line");
    /// assert_eq!(line.amount.get(), 200);
    /// ```
    pub fn try_from_parts(
        name: impl Into<String>,
        unit: impl Into<String>,
        amount: u64,
    ) -> Result<Self, RecipeValidationError> {
        Ok(Self {
            name: IngredientName::new(name)?,
            unit: MeasurementUnit::new(unit)?,
            amount: Amount::new(amount),
        })
    }
}

/// Recipe header returned when listing a cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeSummary {
    /// Recipe identifier.
    pub id: RecipeId,
    /// User who published the recipe.
    pub author: UserId,
    /// Recipe title.
    pub name: String,
}
