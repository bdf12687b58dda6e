//! Shopping-list aggregation.
//!
//! The list merges every ingredient line in a user's cart by the exact
//! `(name, unit)` pair. Lines are never merged across units.

mod service;

pub(crate) use service::map_cart_repository_error;
pub use service::ShoppingListService;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{Amount, Error, FailureKind, IngredientLine, IngredientName, MeasurementUnit};

/// One merged row of the shopping list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingListItem {
    /// Ingredient display name.
    pub name: IngredientName,
    /// Unit shared by every merged line.
    pub unit: MeasurementUnit,
    /// Exact sum of the merged amounts.
    pub amount: Amount,
}

impl ShoppingListItem {
    /// Render the row as `"{name} - {amount} {unit}"`.
    ///
    /// # Examples
    /// ```
    /// use foodgram::domain::{IngredientLine, aggregate_lines};
    ///
    /// let line = IngredientLine::try_from_parts("Sugar", "g", 250).expect("valid line");
    /// let list = aggregate_lines([line]).expect("aggregate");
    /// assert_eq!(list.items()[0].to_line(), "Sugar - 250 g");
    /// ```
    pub fn to_line(&self) -> String {
        format!(
            "{} - {} {}",
            self.name.as_str(),
            self.amount,
            self.unit.as_str()
        )
    }
}

/// Ordered, deduplicated shopping list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingList {
    items: Vec<ShoppingListItem>,
}

impl ShoppingList {
    /// Merged rows sorted by name then unit.
    pub fn items(&self) -> &[ShoppingListItem] {
        &self.items
    }

    /// Consume the list, yielding its rows.
    pub fn into_items(self) -> Vec<ShoppingListItem> {
        self.items
    }

    /// `true` when the cart held no ingredient lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Plain-text export, rows joined by newlines with no trailing newline.
    pub fn to_text(&self) -> String {
        self.items
            .iter()
            .map(ShoppingListItem::to_line)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Sort key: case-folded name and unit first, raw values breaking ties
/// between case variants so the order is total.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct GroupKey {
    folded_name: String,
    folded_unit: String,
    name: IngredientName,
    unit: MeasurementUnit,
}

impl GroupKey {
    fn of(line: &IngredientLine) -> Self {
        Self {
            folded_name: line.name.as_str().to_lowercase(),
            folded_unit: line.unit.as_str().to_lowercase(),
            name: line.name.clone(),
            unit: line.unit.clone(),
        }
    }
}

/// Merge ingredient lines into a sorted shopping list.
///
/// Amounts for the same `(name, unit)` are summed exactly. A sum that does
/// not fit in [`Amount`] fails with an internal `amount_overflow` error.
///
/// # Examples
/// ```
/// use foodgram::domain::{IngredientLine, aggregate_lines};
///
/// let lines = [
///     IngredientLine::try_from_parts("Sugar", "g", 200).expect("valid line"),
///     IngredientLine::try_from_parts("Flour", "kg", 1).expect("valid line"),
///     IngredientLine::try_from_parts("Sugar", "g", 50).expect("valid line"),
/// ];
/// let list = aggregate_lines(lines).expect("aggregate");
/// let rows: Vec<String> = list.items().iter().map(|item| item.to_line()).collect();
/// assert_eq!(rows, ["Flour - 1 kg", "Sugar - 250 g"]);
/// ```
pub fn aggregate_lines<I>(lines: I) -> Result<ShoppingList, Error>
where
    I: IntoIterator<Item = IngredientLine>,
{
    let mut totals: BTreeMap<GroupKey, Amount> = BTreeMap::new();
    for line in lines {
        let total = totals.entry(GroupKey::of(&line)).or_insert(Amount::ZERO);
        *total = total.checked_add(line.amount).ok_or_else(|| {
            Error::internal(format!(
                "total for {} ({}) overflowed",
                line.name.as_str(),
                line.unit.as_str()
            ))
            .with_details(json!({
                "code": FailureKind::AmountOverflow.as_str(),
                "name": line.name.as_str(),
                "unit": line.unit.as_str(),
            }))
        })?;
    }

    let items = totals
        .into_iter()
        .map(|(key, amount)| ShoppingListItem {
            name: key.name,
            unit: key.unit,
            amount,
        })
        .collect();
    Ok(ShoppingList { items })
}
