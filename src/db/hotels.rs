use sqlx::SqliteConnection;

use crate::models::hotel::Hotel;

pub async fn find_all(conn: &mut SqliteConnection) -> Result<Vec<Hotel>, sqlx::Error> {
    sqlx::query_as::<_, Hotel>("SELECT id, name FROM hotels ORDER BY id")
        .fetch_all(&mut *conn)
        .await
}

pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> Result<Option<Hotel>, sqlx::Error> {
    sqlx::query_as::<_, Hotel>("SELECT id, name FROM hotels WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
}

pub async fn insert(conn: &mut SqliteConnection, name: &str) -> Result<Hotel, sqlx::Error> {
    sqlx::query_as::<_, Hotel>("INSERT INTO hotels (name) VALUES (?) RETURNING id, name")
        .bind(name)
        .fetch_one(&mut *conn)
        .await
}

pub async fn count(conn: &mut SqliteConnection) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM hotels")
        .fetch_one(&mut *conn)
        .await
}
