//! Helpers for integration tests.

use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tempfile::TempDir;

use stockbook::db::{DbPool, establish_connection_pool};
use stockbook::domain::business::NewBusiness;
use stockbook::domain::product::NewProduct;
use stockbook::domain::user::NewUser;
use stockbook::repository::{BusinessWriter, DieselRepository, ProductWriter, UserWriter};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!(); // assumes migrations/ exists

/// Temporary database used in integration tests. The backing directory is
/// removed when the harness drops.
pub struct TestDb {
    _dir: TempDir,
    pool: DbPool,
}

impl TestDb {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temporary directory.");
        let path = dir.path().join("test.db");
        let path = path.to_str().expect("Temporary path is not valid UTF-8.");

        let pool =
            establish_connection_pool(path).expect("Failed to establish SQLite connection.");
        let mut conn = pool
            .get()
            .expect("Failed to get SQLite connection from pool.");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("Migrations failed");

        TestDb { _dir: dir, pool }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }
}

/// Seed an account with one business and return their ids.
pub fn seed_business(repo: &DieselRepository, external_id: &str, name: &str) -> (i32, i32) {
    let user = repo
        .create_user(&NewUser::new(external_id, format!("{external_id}@example.com")))
        .expect("Failed to seed user");
    let business = repo
        .create_business(&NewBusiness::new(user.id, name))
        .expect("Failed to seed business");
    (user.id, business.id)
}

/// Seed a catalog product and return its id.
pub fn seed_product(
    repo: &DieselRepository,
    business_id: i32,
    name: &str,
    price_cents: i64,
    stock: i32,
    low_stock_threshold: i32,
) -> i32 {
    let product = repo
        .create_product(&NewProduct::new(
            business_id,
            name,
            price_cents,
            stock,
            low_stock_threshold,
            format!("{}{business_id}", name.to_ascii_uppercase()),
        ))
        .expect("Failed to seed product");
    product.id
}
