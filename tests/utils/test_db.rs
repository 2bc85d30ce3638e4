/// Isolated test database utility that creates and cleans up temporary databases
/// Each test gets its own database that is automatically dropped when the test completes
///
/// This uses TEST_DATABASE_URL from the environment to connect to the test database server.
use anishelf_lib::shared::infrastructure::database::MIGRATIONS;
use anishelf_lib::shared::Database;
use diesel::r2d2::{self, ConnectionManager};
use diesel::{sql_query, Connection, PgConnection, RunQueryDsl};
use diesel_migrations::MigrationHarness;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::thread;

static TEST_DB_COUNTER: AtomicU32 = AtomicU32::new(0);

/// Isolated, migrated test database that is dropped with this value
///
/// # Example
/// ```rust
/// #[tokio::test]
/// #[ignore]
/// async fn test_something() {
///     let test_db = TestDb::new();
///     let repo = ListRepositoryImpl::new(test_db.database());
///     // Test...
/// }
/// ```
pub struct TestDb {
    server_url: String,
    name: String,
    database: Arc<Database>,
}

impl TestDb {
    pub fn new() -> Self {
        dotenvy::dotenv().ok();

        // Unique per process and test so suites can run in parallel
        let name = format!(
            "anishelf_test_{}_{}",
            std::process::id(),
            TEST_DB_COUNTER.fetch_add(1, Ordering::SeqCst)
        );

        let server_url = std::env::var("TEST_DATABASE_URL")
            .expect("TEST_DATABASE_URL must be set in .env for tests");

        let mut conn =
            PgConnection::establish(&server_url).expect("Failed to connect to test database server");
        sql_query(format!("CREATE DATABASE {}", name))
            .execute(&mut conn)
            .unwrap_or_else(|e| panic!("Failed to create test database {}: {}", name, e));

        let isolated_url = match server_url.rfind('/') {
            Some(last_slash) => format!("{}/{}", &server_url[..last_slash], name),
            None => panic!("Invalid TEST_DATABASE_URL format: {}", server_url),
        };

        let pool = r2d2::Pool::builder()
            .max_size(5)
            .test_on_check_out(true)
            .build(ConnectionManager::<PgConnection>::new(isolated_url))
            .expect("Failed to build test database connection pool");

        pool.get()
            .expect("Unable to connect to the test database")
            .run_pending_migrations(MIGRATIONS)
            .expect("Unable to migrate the test database");

        Self {
            server_url,
            name,
            database: Arc::new(Database::from_pool(pool)),
        }
    }

    pub fn database(&self) -> Arc<Database> {
        Arc::clone(&self.database)
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Drop for TestDb {
    /// Terminates open connections and drops the database.
    /// A panicking test leaves its database behind for debugging.
    fn drop(&mut self) {
        if thread::panicking() {
            eprintln!("TestDb leaking database '{}' after a panic", self.name);
            return;
        }

        let Ok(mut conn) = PgConnection::establish(&self.server_url) else {
            eprintln!("Failed to reconnect to drop '{}'", self.name);
            return;
        };

        let _ = sql_query(format!(
            "SELECT pg_terminate_backend(pid) FROM pg_stat_activity WHERE datname = '{}'",
            self.name
        ))
        .execute(&mut conn);

        if let Err(e) = sql_query(format!("DROP DATABASE IF EXISTS {}", self.name)).execute(&mut conn)
        {
            eprintln!("Failed to drop test database '{}': {}", self.name, e);
        }
    }
}
