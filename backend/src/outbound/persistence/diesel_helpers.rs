//! Shared helpers for Diesel repository implementations.
//!
//! Both repositories report the same fault classes, so pool, Diesel and
//! deadline failures are mapped once through [`RepositoryFault`].

use std::future::Future;
use std::time::Duration;

use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};
use tracing::{debug, warn};

use crate::domain::RecipeId;
use crate::domain::ports::{ShoppingCartRepositoryError, ShortLinkRepositoryError};

use super::pool::PoolError;

/// Constructors shared by the repository error enums, plus the pool and
/// Diesel mappings built on them.
pub(crate) trait RepositoryFault: Sized {
    fn connection(message: String) -> Self;
    fn timeout(message: String) -> Self;
    fn query(message: String) -> Self;
    fn recipe_not_found(recipe_id: i64) -> Self;

    /// Pool failures are connection faults.
    fn from_pool(error: PoolError) -> Self {
        Self::connection(error.into_message())
    }

    /// Map Diesel errors that carry no repository-specific meaning.
    ///
    /// A foreign-key violation on the recipe reference becomes
    /// `recipe_not_found` for `recipe`; any other foreign key is unexpected
    /// and surfaces as a query error.
    fn from_diesel(error: DieselError, recipe: Option<RecipeId>) -> Self {
        log_diesel_error(&error);

        match error {
            DieselError::NotFound => Self::query("record not found".to_owned()),
            DieselError::QueryBuilderError(_) => Self::query("database query error".to_owned()),
            DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
                match recipe {
                    Some(recipe_id) if references_recipe(info.as_ref()) => {
                        Self::recipe_not_found(recipe_id.get())
                    }
                    _ => {
                        warn!(
                            constraint = info.constraint_name(),
                            "unrecognised foreign key violation"
                        );
                        Self::query("foreign key violation".to_owned())
                    }
                }
            }
            DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
                Self::connection("database connection error".to_owned())
            }
            _ => Self::query("database error".to_owned()),
        }
    }
}

macro_rules! impl_repository_fault {
    ($error:ty) => {
        impl RepositoryFault for $error {
            fn connection(message: String) -> Self {
                <$error>::connection(message)
            }

            fn timeout(message: String) -> Self {
                <$error>::timeout(message)
            }

            fn query(message: String) -> Self {
                <$error>::query(message)
            }

            fn recipe_not_found(recipe_id: i64) -> Self {
                <$error>::recipe_not_found(recipe_id)
            }
        }
    };
}

impl_repository_fault!(ShoppingCartRepositoryError);
impl_repository_fault!(ShortLinkRepositoryError);

fn log_diesel_error(error: &DieselError) {
    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = info.constraint_name(),
                "diesel operation failed"
            );
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(error),
            "diesel operation failed"
        ),
    }
}

/// `true` when a foreign-key violation points at the `recipes` table.
pub(crate) fn references_recipe(info: &dyn DatabaseErrorInformation) -> bool {
    match info.constraint_name() {
        Some(name) => name.ends_with("recipe_id_fkey"),
        None => info.message().contains("recipe_id"),
    }
}

/// Run a repository operation under the pool's query deadline.
pub(crate) async fn with_deadline<T, E, F>(
    deadline: Duration,
    operation: &'static str,
    fut: F,
) -> Result<T, E>
where
    E: RepositoryFault,
    F: Future<Output = Result<T, E>>,
{
    match tokio::time::timeout(deadline, fut).await {
        Ok(result) => result,
        Err(_) => {
            let deadline_ms = u64::try_from(deadline.as_millis()).unwrap_or(u64::MAX);
            warn!(operation, deadline_ms, "store deadline exceeded");
            Err(E::timeout(format!("{operation} exceeded {deadline_ms}ms")))
        }
    }
}

/// Collect row conversion results, mapping the first error to a query error.
pub(crate) fn collect_rows<T, E, R>(rows: Vec<R>) -> Result<Vec<T>, E>
where
    E: RepositoryFault,
    T: TryFrom<R, Error = String>,
{
    rows.into_iter()
        .map(T::try_from)
        .collect::<Result<Vec<_>, _>>()
        .map_err(E::query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    struct FakeInfo {
        message: &'static str,
        constraint: Option<&'static str>,
    }

    impl DatabaseErrorInformation for FakeInfo {
        fn message(&self) -> &str {
            self.message
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            None
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            self.constraint
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn database_error(kind: DatabaseErrorKind, constraint: Option<&'static str>) -> DieselError {
        DieselError::DatabaseError(
            kind,
            Box::new(FakeInfo {
                message: "violates constraint",
                constraint,
            }),
        )
    }

    #[rstest]
    #[case(
        database_error(
            DatabaseErrorKind::ForeignKeyViolation,
            Some("shopping_cart_entries_recipe_id_fkey")
        ),
        ShortLinkRepositoryError::recipe_not_found(7)
    )]
    #[case(
        database_error(
            DatabaseErrorKind::ForeignKeyViolation,
            Some("shopping_cart_entries_user_id_fkey")
        ),
        ShortLinkRepositoryError::query("foreign key violation")
    )]
    #[case(
        database_error(DatabaseErrorKind::ClosedConnection, None),
        ShortLinkRepositoryError::connection("database connection error")
    )]
    #[case(DieselError::NotFound, ShortLinkRepositoryError::query("record not found"))]
    fn diesel_errors_map_to_repository_faults(
        #[case] error: DieselError,
        #[case] expected: ShortLinkRepositoryError,
    ) {
        let recipe = RecipeId::new(7).ok();
        assert_eq!(ShortLinkRepositoryError::from_diesel(error, recipe), expected);
    }

    #[rstest]
    fn pool_errors_become_connection_faults() {
        let error = ShoppingCartRepositoryError::from_pool(PoolError::checkout("refused"));
        assert_eq!(error, ShoppingCartRepositoryError::connection("refused"));
    }

    #[tokio::test]
    async fn slow_operations_time_out() {
        let result: Result<(), ShoppingCartRepositoryError> =
            with_deadline(Duration::from_millis(10), "list cart", async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(())
            })
            .await;
        assert!(matches!(
            result,
            Err(ShoppingCartRepositoryError::Timeout { .. })
        ));
    }

    #[tokio::test]
    async fn fast_operations_pass_through() {
        let result: Result<u8, ShoppingCartRepositoryError> =
            with_deadline(Duration::from_secs(1), "list cart", async { Ok(3) }).await;
        assert_eq!(result, Ok(3));
    }
}
