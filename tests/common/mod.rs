//! Shared harness for the DB-backed integration tests.
//!
//! Tests need a reachable Postgres via `DATABASE_URL`; when it is not set
//! they skip instead of failing, so the suite stays green on machines
//! without a database.

use sqlx::PgPool;

pub async fn test_pool() -> Option<PgPool> {
    dotenv::dotenv().ok();

    if std::env::var("JWT_SECRET").is_err() {
        std::env::set_var("JWT_SECRET", "kanboard-test-secret");
    }

    let database_url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("DATABASE_URL not set; skipping DB-backed test");
            return None;
        }
    };

    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to test DB");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    Some(pool)
}

/// Removes a user and everything they own, walking the chain leaf-first so
/// the foreign keys are satisfied.
pub async fn remove_user(pool: &PgPool, email: &str) {
    let _ = sqlx::query(
        "DELETE FROM tasks WHERE column_id IN (
             SELECT c.id FROM columns c
             JOIN boards b ON b.id = c.board_id
             JOIN users u ON u.id = b.user_id
             WHERE u.email = $1)",
    )
    .bind(email)
    .execute(pool)
    .await;

    let _ = sqlx::query(
        "DELETE FROM columns WHERE board_id IN (
             SELECT b.id FROM boards b
             JOIN users u ON u.id = b.user_id
             WHERE u.email = $1)",
    )
    .bind(email)
    .execute(pool)
    .await;

    let _ = sqlx::query("DELETE FROM boards WHERE user_id IN (SELECT id FROM users WHERE email = $1)")
        .bind(email)
        .execute(pool)
        .await;

    let _ = sqlx::query("DELETE FROM users WHERE email = $1")
        .bind(email)
        .execute(pool)
        .await;
}
