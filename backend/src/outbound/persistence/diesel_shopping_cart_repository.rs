//! PostgreSQL-backed `ShoppingCartRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{
    CartInsertOutcome, ShoppingCartRepository, ShoppingCartRepositoryError,
};
use crate::domain::{IngredientLine, RecipeId, RecipeSummary, UserId};

use super::diesel_helpers::{RepositoryFault, collect_rows, with_deadline};
use super::models::{IngredientLineRow, NewCartEntryRow, RecipeSummaryRow};
use super::pool::DbPool;
use super::schema::{ingredients, recipe_ingredients, recipes, shopping_cart_entries};

/// Diesel-backed implementation of the `ShoppingCartRepository` port.
#[derive(Clone)]
pub struct DieselShoppingCartRepository {
    pool: DbPool,
}

impl DieselShoppingCartRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShoppingCartRepository for DieselShoppingCartRepository {
    async fn list_cart_recipes(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<RecipeSummary>, ShoppingCartRepositoryError> {
        let user_uuid = *user_id.as_uuid();
        with_deadline(self.pool.query_timeout(), "list cart recipes", async {
            let mut conn = self.pool.get().await.map_err(ShoppingCartRepositoryError::from_pool)?;
            let rows: Vec<RecipeSummaryRow> = shopping_cart_entries::table
                .inner_join(recipes::table)
                .filter(shopping_cart_entries::user_id.eq(user_uuid))
                .order_by(recipes::id.asc())
                .select(RecipeSummaryRow::as_select())
                .load(&mut conn)
                .await
                .map_err(|err| ShoppingCartRepositoryError::from_diesel(err, None))?;
            collect_rows(rows)
        })
        .await
    }

    async fn list_ingredient_lines(
        &self,
        recipe_id: RecipeId,
    ) -> Result<Vec<IngredientLine>, ShoppingCartRepositoryError> {
        with_deadline(self.pool.query_timeout(), "list ingredient lines", async {
            let mut conn = self.pool.get().await.map_err(ShoppingCartRepositoryError::from_pool)?;
            let rows: Vec<IngredientLineRow> = recipe_ingredients::table
                .inner_join(ingredients::table)
                .filter(recipe_ingredients::recipe_id.eq(recipe_id.get()))
                .order_by(recipe_ingredients::id.asc())
                .select((
                    ingredients::name,
                    ingredients::measurement_unit,
                    recipe_ingredients::amount,
                ))
                .load(&mut conn)
                .await
                .map_err(|err| ShoppingCartRepositoryError::from_diesel(err, Some(recipe_id)))?;
            collect_rows(rows)
        })
        .await
    }

    async fn add_entry(
        &self,
        user_id: &UserId,
        recipe_id: RecipeId,
    ) -> Result<CartInsertOutcome, ShoppingCartRepositoryError> {
        let row = NewCartEntryRow {
            user_id: *user_id.as_uuid(),
            recipe_id: recipe_id.get(),
        };
        with_deadline(self.pool.query_timeout(), "add cart entry", async {
            let mut conn = self.pool.get().await.map_err(ShoppingCartRepositoryError::from_pool)?;
            let inserted = diesel::insert_into(shopping_cart_entries::table)
                .values(&row)
                .on_conflict_do_nothing()
                .execute(&mut conn)
                .await
                .map_err(|err| ShoppingCartRepositoryError::from_diesel(err, Some(recipe_id)))?;
            Ok(if inserted == 0 {
                CartInsertOutcome::AlreadyPresent
            } else {
                CartInsertOutcome::Added
            })
        })
        .await
    }

    async fn remove_entry(
        &self,
        user_id: &UserId,
        recipe_id: RecipeId,
    ) -> Result<bool, ShoppingCartRepositoryError> {
        let user_uuid = *user_id.as_uuid();
        with_deadline(self.pool.query_timeout(), "remove cart entry", async {
            let mut conn = self.pool.get().await.map_err(ShoppingCartRepositoryError::from_pool)?;
            let deleted = diesel::delete(
                shopping_cart_entries::table
                    .filter(shopping_cart_entries::user_id.eq(user_uuid))
                    .filter(shopping_cart_entries::recipe_id.eq(recipe_id.get())),
            )
            .execute(&mut conn)
            .await
            .map_err(|err| ShoppingCartRepositoryError::from_diesel(err, Some(recipe_id)))?;
            Ok(deleted > 0)
        })
        .await
    }
}
