//! Integration tests for `DieselShortLinkRepository` against embedded PostgreSQL.
//!
//! The constraint names declared in the migration decide how a unique
//! violation is classified, so these suites insert real conflicting rows
//! rather than faking the driver's error metadata.

use std::collections::HashSet;
use std::sync::Arc;

use foodgram::domain::ports::{
    ShortLinkCommand, ShortLinkInsertOutcome, ShortLinkQuery, ShortLinkRepository,
    ShortLinkRepositoryError,
};
use foodgram::domain::{ErrorCode, RecipeId, ShortCode, ShortLinkService};
use foodgram::outbound::persistence::DieselShortLinkRepository;
use rstest::{fixture, rstest};

#[path = "support/embedded_postgres.rs"]
mod embedded_postgres;

use embedded_postgres::{TestDatabase, handle_cluster_setup_failure};

const TEST_DB: &str = "diesel_short_link_repo_test";

struct TestContext {
    repository: DieselShortLinkRepository,
    database: TestDatabase,
}

fn recipe_id(raw: i64) -> RecipeId {
    RecipeId::new(raw).expect("positive recipe id")
}

fn code(raw: &str) -> ShortCode {
    ShortCode::parse(raw).expect("valid short code")
}

fn setup_context() -> Result<TestContext, String> {
    let database = TestDatabase::start(TEST_DB)?;
    let author = database.seed_user("author")?;
    for (id, name) in [(1, "Pancakes"), (2, "Bread")] {
        database.seed_recipe(id, author, name, &[("Flour", "g", 200)])?;
    }
    Ok(TestContext {
        repository: DieselShortLinkRepository::new(database.pool()),
        database,
    })
}

#[fixture]
fn repo_context() -> Option<TestContext> {
    match setup_context() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

#[rstest]
fn inserts_report_which_uniqueness_rule_tripped(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: inserts_report_which_uniqueness_rule_tripped skipped");
        return;
    };
    let repository = &context.repository;

    context.database.runtime().block_on(async {
        let first = repository
            .insert_if_absent(recipe_id(1), &code("PanCake1"))
            .await
            .expect("first insert succeeds");
        let link = match first {
            ShortLinkInsertOutcome::Inserted(link) => link,
            other => panic!("expected an inserted link, got {other:?}"),
        };
        assert_eq!(link.recipe_id, recipe_id(1));
        assert_eq!(link.code, code("PanCake1"));

        assert_eq!(
            repository
                .insert_if_absent(recipe_id(2), &code("PanCake1"))
                .await,
            Ok(ShortLinkInsertOutcome::CodeTaken),
            "short_links_code_key maps to CodeTaken"
        );
        assert_eq!(
            repository
                .insert_if_absent(recipe_id(1), &code("Other123"))
                .await,
            Ok(ShortLinkInsertOutcome::RecipeAlreadyLinked),
            "short_links_recipe_id_key maps to RecipeAlreadyLinked"
        );
    });

    assert_eq!(
        context.database.count("SELECT COUNT(*) FROM short_links"),
        Ok(1)
    );
}

#[rstest]
fn lookups_round_trip_and_miss_cleanly(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: lookups_round_trip_and_miss_cleanly skipped");
        return;
    };
    let repository = &context.repository;

    context.database.runtime().block_on(async {
        assert_eq!(repository.find_by_recipe(recipe_id(2)).await, Ok(None));
        assert_eq!(
            repository.find_recipe_by_code(&code("Missing0")).await,
            Ok(None)
        );

        repository
            .insert_if_absent(recipe_id(2), &code("Bread777"))
            .await
            .expect("insert succeeds");

        let stored = repository
            .find_by_recipe(recipe_id(2))
            .await
            .expect("lookup succeeds")
            .expect("link stored");
        assert_eq!(stored.code, code("Bread777"));
        assert_eq!(
            repository.find_recipe_by_code(&code("Bread777")).await,
            Ok(Some(recipe_id(2)))
        );
    });
}

#[rstest]
fn linking_a_missing_recipe_is_recipe_not_found(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: linking_a_missing_recipe_is_recipe_not_found skipped");
        return;
    };

    let result = context.database.runtime().block_on(
        context
            .repository
            .insert_if_absent(recipe_id(404), &code("NoRecipe")),
    );
    assert_eq!(result, Err(ShortLinkRepositoryError::recipe_not_found(404_i64)));
}

#[rstest]
fn deleting_a_recipe_removes_its_link(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: deleting_a_recipe_removes_its_link skipped");
        return;
    };
    let repository = &context.repository;
    let runtime = context.database.runtime();

    runtime
        .block_on(repository.insert_if_absent(recipe_id(1), &code("Gone1234")))
        .expect("insert succeeds");
    context
        .database
        .execute("DELETE FROM recipes WHERE id = 1;")
        .expect("recipe deleted");

    assert_eq!(
        runtime.block_on(repository.find_recipe_by_code(&code("Gone1234"))),
        Ok(None)
    );
}

#[rstest]
fn concurrent_issuance_stores_one_row(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: concurrent_issuance_stores_one_row skipped");
        return;
    };
    let service = Arc::new(ShortLinkService::new(Arc::new(context.repository.clone())));

    let codes: HashSet<ShortCode> = context.database.runtime().block_on(async {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let service = service.clone();
                tokio::spawn(async move { service.get_or_create(recipe_id(1)).await })
            })
            .collect();
        let mut codes = HashSet::new();
        for handle in handles {
            codes.insert(handle.await.expect("task joins").expect("link issued"));
        }
        codes
    });

    assert_eq!(codes.len(), 1, "every caller sees the winning code");
    assert_eq!(
        context
            .database
            .count("SELECT COUNT(*) FROM short_links WHERE recipe_id = 1"),
        Ok(1)
    );

    let winner = codes.into_iter().next().expect("one code");
    let resolved = context
        .database
        .runtime()
        .block_on(service.resolve(winner.as_str()));
    assert_eq!(resolved, Ok(recipe_id(1)));
}

#[rstest]
fn missing_recipes_surface_as_not_found(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: missing_recipes_surface_as_not_found skipped");
        return;
    };
    let service = ShortLinkService::new(Arc::new(context.repository.clone()));

    let error = context
        .database
        .runtime()
        .block_on(service.get_or_create(recipe_id(99)))
        .expect_err("recipe 99 does not exist");
    assert_eq!(error.code(), ErrorCode::NotFound);
}
