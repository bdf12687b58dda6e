//! Embedded PostgreSQL harness for the Diesel adapter suites.
//!
//! Each [`TestDatabase`] owns its own [`TestCluster`], which stops
//! PostgreSQL when dropped. The schema comes from the production migration
//! runner so the suites exercise the same DDL the server applies.
//!
//! When `PG_RUNTIME_DIR` or `PG_DATA_DIR` is unset, bootstrap points both at
//! unique directories under the target directory. Bootstrap is serialised
//! because those variables are process-global.

use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

use foodgram::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use pg_embedded_setup_unpriv::TestCluster;
use postgres::{Client, NoTls};
use tokio::runtime::Runtime;
use uuid::Uuid;

static BOOTSTRAP_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// `true` when `SKIP_TEST_CLUSTER` is `1`, `true` or `yes`.
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Skip quietly when the cluster is opted out, otherwise fail loudly.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}

/// Render a `postgres` error with its SQLSTATE and message.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    match error.as_db_error() {
        Some(db_error) => format!(
            "postgres error {:?}: {}",
            db_error.code(),
            db_error.message()
        ),
        None => error.to_string(),
    }
}

fn scratch_dirs() -> Result<(PathBuf, PathBuf), std::io::Error> {
    let target = std::env::var_os("CARGO_TARGET_DIR").map_or_else(
        || PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("..").join("target"),
        PathBuf::from,
    );
    let base = target
        .join("pg-embed")
        .join(format!("foodgram-{}-{}", std::process::id(), Uuid::new_v4()));
    let runtime_dir = base.join("install");
    let data_dir = base.join("data");
    std::fs::create_dir_all(&runtime_dir)?;
    std::fs::create_dir_all(&data_dir)?;
    Ok((runtime_dir, data_dir))
}

fn test_cluster() -> Result<TestCluster, String> {
    let _bootstrap = BOOTSTRAP_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner());

    let needs_override =
        std::env::var_os("PG_RUNTIME_DIR").is_none() || std::env::var_os("PG_DATA_DIR").is_none();
    let _env = if needs_override {
        let (runtime_dir, data_dir) = scratch_dirs().map_err(|err| err.to_string())?;
        Some(env_lock::lock_env([
            ("PG_RUNTIME_DIR", Some(runtime_dir.to_string_lossy().into_owned())),
            ("PG_DATA_DIR", Some(data_dir.to_string_lossy().into_owned())),
        ]))
    } else {
        None
    };

    TestCluster::new().map_err(|err| format!("{err:?}"))
}

fn recreate_database(cluster: &TestCluster, name: &str) -> Result<(), String> {
    let admin_url = cluster.connection().database_url("postgres");
    let mut client =
        Client::connect(&admin_url, NoTls).map_err(|err| format_postgres_error(&err))?;
    client
        .batch_execute(&format!(
            "DROP DATABASE IF EXISTS \"{name}\"; CREATE DATABASE \"{name}\";"
        ))
        .map_err(|err| format_postgres_error(&err))
}

/// A migrated database on a private cluster, plus a runtime to drive the
/// async adapters from synchronous tests.
pub struct TestDatabase {
    pool: DbPool,
    url: String,
    runtime: Runtime,
    _cluster: TestCluster,
}

impl TestDatabase {
    /// Start a cluster, create `name` and apply every migration.
    pub fn start(name: &str) -> Result<Self, String> {
        let cluster = test_cluster()?;
        recreate_database(&cluster, name)?;
        let url = cluster.connection().database_url(name);

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(4)
            .enable_all()
            .build()
            .map_err(|err| err.to_string())?;
        runtime
            .block_on(run_pending_migrations(&url))
            .map_err(|err| err.to_string())?;
        let pool = runtime
            .block_on(DbPool::new(
                PoolConfig::new(url.as_str())
                    .with_max_size(8)
                    .with_min_idle(Some(1)),
            ))
            .map_err(|err| err.to_string())?;

        Ok(Self {
            pool,
            url,
            runtime,
            _cluster: cluster,
        })
    }

    /// Pool shared by the adapters under test.
    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    /// Runtime driving the adapters.
    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    /// Run raw SQL outside Diesel, for seeding and cascades.
    pub fn execute(&self, sql: &str) -> Result<(), String> {
        let mut client =
            Client::connect(&self.url, NoTls).map_err(|err| format_postgres_error(&err))?;
        client
            .batch_execute(sql)
            .map_err(|err| format_postgres_error(&err))
    }

    /// Single `BIGINT` result of `sql`.
    pub fn count(&self, sql: &str) -> Result<i64, String> {
        let mut client =
            Client::connect(&self.url, NoTls).map_err(|err| format_postgres_error(&err))?;
        client
            .query_one(sql, &[])
            .map(|row| row.get::<_, i64>(0))
            .map_err(|err| format_postgres_error(&err))
    }

    /// Insert a user row and return its id.
    pub fn seed_user(&self, username: &str) -> Result<Uuid, String> {
        let id = Uuid::new_v4();
        self.execute(&format!(
            "INSERT INTO users (id, username) VALUES ('{id}', '{username}');"
        ))?;
        Ok(id)
    }

    /// Insert a recipe with its ingredient lines, reusing ingredient rows
    /// that already exist for the same `(name, unit)`.
    pub fn seed_recipe(
        &self,
        id: i64,
        author: Uuid,
        name: &str,
        lines: &[(&str, &str, i64)],
    ) -> Result<(), String> {
        let mut sql = format!(
            "INSERT INTO recipes (id, author_id, name) VALUES ({id}, '{author}', '{name}');"
        );
        for (ingredient, unit, amount) in lines {
            sql.push_str(&format!(
                "INSERT INTO ingredients (name, measurement_unit) VALUES ('{ingredient}', '{unit}') \
                 ON CONFLICT (name, measurement_unit) DO NOTHING; \
                 INSERT INTO recipe_ingredients (recipe_id, ingredient_id, amount) \
                 SELECT {id}, ingredients.id, {amount} FROM ingredients \
                 WHERE name = '{ingredient}' AND measurement_unit = '{unit}';"
            ));
        }
        self.execute(&sql)
    }
}
