//! PostgreSQL-backed `ShortLinkRepository` implementation using Diesel ORM.
//!
//! Uniqueness is enforced by two constraints declared in the migration:
//! `short_links_code_key` on `code` and `short_links_recipe_id_key` (the
//! primary key) on `recipe_id`. A unique violation is translated into the
//! matching [`ShortLinkInsertOutcome`] rather than an error.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{
    ShortLinkInsertOutcome, ShortLinkRepository, ShortLinkRepositoryError,
};
use crate::domain::{RecipeId, ShortCode, ShortLink};

use super::diesel_helpers::{RepositoryFault, with_deadline};
use super::models::{NewShortLinkRow, ShortLinkRow};
use super::pool::DbPool;
use super::schema::short_links;

pub(crate) const CODE_CONSTRAINT: &str = "short_links_code_key";
pub(crate) const RECIPE_CONSTRAINT: &str = "short_links_recipe_id_key";

/// Which uniqueness rule an insert tripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UniqueConflict {
    Code,
    Recipe,
}

fn classify_unique_violation(info: &dyn DatabaseErrorInformation) -> Option<UniqueConflict> {
    let hint = info.constraint_name().unwrap_or_else(|| info.message());
    if hint.contains(CODE_CONSTRAINT) {
        Some(UniqueConflict::Code)
    } else if hint.contains(RECIPE_CONSTRAINT) {
        Some(UniqueConflict::Recipe)
    } else {
        None
    }
}

/// Diesel-backed implementation of the `ShortLinkRepository` port.
#[derive(Clone)]
pub struct DieselShortLinkRepository {
    pool: DbPool,
}

impl DieselShortLinkRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn to_domain(row: ShortLinkRow) -> Result<ShortLink, ShortLinkRepositoryError> {
    ShortLink::try_from(row).map_err(ShortLinkRepositoryError::query)
}

#[async_trait]
impl ShortLinkRepository for DieselShortLinkRepository {
    async fn find_by_recipe(
        &self,
        recipe_id: RecipeId,
    ) -> Result<Option<ShortLink>, ShortLinkRepositoryError> {
        with_deadline(self.pool.query_timeout(), "find short link", async {
            let mut conn = self
                .pool
                .get()
                .await
                .map_err(ShortLinkRepositoryError::from_pool)?;
            let row: Option<ShortLinkRow> = short_links::table
                .filter(short_links::recipe_id.eq(recipe_id.get()))
                .select(ShortLinkRow::as_select())
                .first(&mut conn)
                .await
                .optional()
                .map_err(|err| ShortLinkRepositoryError::from_diesel(err, Some(recipe_id)))?;
            row.map(to_domain).transpose()
        })
        .await
    }

    async fn insert_if_absent(
        &self,
        recipe_id: RecipeId,
        code: &ShortCode,
    ) -> Result<ShortLinkInsertOutcome, ShortLinkRepositoryError> {
        let new_row = NewShortLinkRow {
            recipe_id: recipe_id.get(),
            code: code.as_str(),
        };
        with_deadline(self.pool.query_timeout(), "insert short link", async {
            let mut conn = self
                .pool
                .get()
                .await
                .map_err(ShortLinkRepositoryError::from_pool)?;
            let inserted = diesel::insert_into(short_links::table)
                .values(&new_row)
                .returning(ShortLinkRow::as_returning())
                .get_result(&mut conn)
                .await;
            match inserted {
                Ok(row) => to_domain(row).map(ShortLinkInsertOutcome::Inserted),
                Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info)) => {
                    match classify_unique_violation(info.as_ref()) {
                        Some(UniqueConflict::Code) => Ok(ShortLinkInsertOutcome::CodeTaken),
                        Some(UniqueConflict::Recipe) => {
                            Ok(ShortLinkInsertOutcome::RecipeAlreadyLinked)
                        }
                        None => {
                            warn!(
                                constraint = info.constraint_name(),
                                "unrecognised unique violation on short_links"
                            );
                            Err(ShortLinkRepositoryError::query("unique violation"))
                        }
                    }
                }
                Err(err) => Err(ShortLinkRepositoryError::from_diesel(err, Some(recipe_id))),
            }
        })
        .await
    }

    async fn find_recipe_by_code(
        &self,
        code: &ShortCode,
    ) -> Result<Option<RecipeId>, ShortLinkRepositoryError> {
        with_deadline(self.pool.query_timeout(), "resolve short code", async {
            let mut conn = self
                .pool
                .get()
                .await
                .map_err(ShortLinkRepositoryError::from_pool)?;
            let raw: Option<i64> = short_links::table
                .filter(short_links::code.eq(code.as_str()))
                .select(short_links::recipe_id)
                .first(&mut conn)
                .await
                .optional()
                .map_err(|err| ShortLinkRepositoryError::from_diesel(err, None))?;
            raw.map(|id| {
                RecipeId::new(id).map_err(|err| {
                    ShortLinkRepositoryError::query(format!("stored recipe id {id}: {err}"))
                })
            })
            .transpose()
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    struct ConstraintInfo(Option<&'static str>, &'static str);

    impl DatabaseErrorInformation for ConstraintInfo {
        fn message(&self) -> &str {
            self.1
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            Some("short_links")
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            self.0
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    #[rstest]
    #[case(Some(CODE_CONSTRAINT), "", Some(UniqueConflict::Code))]
    #[case(Some(RECIPE_CONSTRAINT), "", Some(UniqueConflict::Recipe))]
    #[case(
        None,
        "duplicate key value violates unique constraint \"short_links_code_key\"",
        Some(UniqueConflict::Code)
    )]
    #[case(Some("some_other_key"), "", None)]
    fn unique_violations_are_classified_by_constraint(
        #[case] constraint: Option<&'static str>,
        #[case] message: &'static str,
        #[case] expected: Option<UniqueConflict>,
    ) {
        let info = ConstraintInfo(constraint, message);
        assert_eq!(classify_unique_violation(&info), expected);
    }
}
