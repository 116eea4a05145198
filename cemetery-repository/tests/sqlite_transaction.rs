//! Integration tests for scoped transactions on SQLite.
//!
//! Run with: `cargo test --test sqlite_transaction`

use cemetery_repository::{
    BodyRepository, ErrorKind, GraveRepository, ManagerError, SqliteBodyRepository,
    SqliteGraveRepository, with_transaction,
};
use sqlx::{Row, SqlitePool};

async fn grave_count(pool: &SqlitePool) -> i64 {
    sqlx::query("SELECT COUNT(*) AS count FROM graves")
        .fetch_one(pool)
        .await
        .unwrap()
        .get("count")
}

#[sqlx::test(migrations = "./migrations")]
async fn test_failed_body_discards_its_writes(pool: SqlitePool) {
    let result = with_transaction(&pool, "insert then fail", |tx| {
        Box::pin(async move {
            sqlx::query(
                "INSERT INTO graves (position_column, position_row, capacity) VALUES (1, 1, 1)",
            )
            .execute(&mut **tx)
            .await
            .map_err(|e| ManagerError::service_failure("insert grave", e))?;
            sqlx::query(
                "INSERT INTO bodies (name, gender, vampire) VALUES ('Ann', 'FEMALE', 0)",
            )
            .execute(&mut **tx)
            .await
            .map_err(|e| ManagerError::service_failure("insert body", e))?;

            Err::<(), ManagerError>(ManagerError::illegal_entity("grave is already full"))
        })
    })
    .await;

    match result {
        Err(ManagerError::IllegalEntity(message)) => assert_eq!(message, "grave is already full"),
        other => panic!("Expected the body's own error, got {:?}", other),
    }
    assert_eq!(grave_count(&pool).await, 0);
    assert!(
        SqliteBodyRepository::new(pool.clone())
            .find_all_bodies()
            .await
            .unwrap()
            .is_empty()
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_successful_body_commits(pool: SqlitePool) {
    let id = with_transaction(&pool, "insert grave", |tx| {
        Box::pin(async move {
            let result = sqlx::query(
                "INSERT INTO graves (position_column, position_row, capacity, note) VALUES (3, 4, 2, 'kept')",
            )
            .execute(&mut **tx)
            .await
            .map_err(|e| ManagerError::service_failure("insert grave", e))?;
            Ok::<i64, ManagerError>(result.last_insert_rowid())
        })
    })
    .await
    .unwrap();

    let grave = SqliteGraveRepository::new(pool.clone())
        .get_grave(Some(id))
        .await
        .unwrap()
        .expect("committed grave is visible");
    assert_eq!((grave.column, grave.row, grave.capacity), (3, 4, 2));
    assert_eq!(grave.note.as_deref(), Some("kept"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_failed_statement_rolls_back_earlier_writes(pool: SqlitePool) {
    let result = with_transaction(&pool, "insert then break", |tx| {
        Box::pin(async move {
            sqlx::query(
                "INSERT INTO graves (position_column, position_row, capacity) VALUES (1, 1, 1)",
            )
            .execute(&mut **tx)
            .await
            .map_err(|e| ManagerError::service_failure("insert grave", e))?;
            // NOT NULL violation on `name`.
            sqlx::query("INSERT INTO bodies (gender, vampire) VALUES ('MALE', 0)")
                .execute(&mut **tx)
                .await
                .map_err(|e| ManagerError::service_failure("insert body", e))?;
            Ok::<(), ManagerError>(())
        })
    })
    .await;

    let err = result.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ServiceFailure);
    assert_eq!(err.to_string(), "Service failure: insert body");
    assert_eq!(grave_count(&pool).await, 0);
}
