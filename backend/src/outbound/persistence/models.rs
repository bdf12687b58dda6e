//! Diesel row structs. Internal to the persistence adapter.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    Amount, IngredientLine, IngredientName, MeasurementUnit, RecipeId, RecipeSummary,
    RecipeValidationError, ShortCode, ShortLink, UserId,
};

use super::schema::{recipes, shopping_cart_entries, short_links};

/// Recipe header read when listing a cart.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RecipeSummaryRow {
    pub id: i64,
    pub author_id: Uuid,
    pub name: String,
}

impl TryFrom<RecipeSummaryRow> for RecipeSummary {
    type Error = String;

    fn try_from(row: RecipeSummaryRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: RecipeId::new(row.id).map_err(|err| format!("recipe {}: {err}", row.id))?,
            author: UserId::from_uuid(row.author_id),
            name: row.name,
        })
    }
}

/// `(ingredient name, unit, amount)` projected from the recipe/ingredient join.
#[derive(Debug, Clone, Queryable)]
pub(crate) struct IngredientLineRow {
    pub name: String,
    pub measurement_unit: String,
    pub amount: i64,
}

impl TryFrom<IngredientLineRow> for IngredientLine {
    type Error = String;

    fn try_from(row: IngredientLineRow) -> Result<Self, Self::Error> {
        let context = |err: RecipeValidationError| {
            format!("ingredient line {:?} ({:?}): {err}", row.name, row.measurement_unit)
        };
        Ok(Self {
            amount: Amount::from_signed(row.amount).map_err(context)?,
            name: IngredientName::new(row.name.clone()).map_err(context)?,
            unit: MeasurementUnit::new(row.measurement_unit.clone()).map_err(context)?,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = shopping_cart_entries)]
pub(crate) struct NewCartEntryRow {
    pub user_id: Uuid,
    pub recipe_id: i64,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = short_links)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ShortLinkRow {
    pub recipe_id: i64,
    pub code: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<ShortLinkRow> for ShortLink {
    type Error = String;

    fn try_from(row: ShortLinkRow) -> Result<Self, Self::Error> {
        Ok(Self {
            recipe_id: RecipeId::new(row.recipe_id)
                .map_err(|err| format!("short link recipe {}: {err}", row.recipe_id))?,
            code: ShortCode::parse(row.code.clone())
                .map_err(|err| format!("stored short code {:?}: {err}", row.code))?,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = short_links)]
pub(crate) struct NewShortLinkRow<'a> {
    pub recipe_id: i64,
    pub code: &'a str,
}
