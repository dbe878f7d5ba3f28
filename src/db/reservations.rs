use chrono::NaiveDate;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

use crate::models::hotel::Hotel;
use crate::models::page::{Page, PageRequest};
use crate::models::reservation::{CreateReservation, Reservation, RoomType};

const SELECT_RESERVATIONS: &str = r#"
    SELECT r.id, r.guest_name, r.date_created, r.days_of_stay, r.room_type,
           h.id AS hotel_id, h.name AS hotel_name
    FROM reservations r
    JOIN hotels h ON h.id = r.hotel_id
"#;

#[derive(sqlx::FromRow)]
struct ReservationRow {
    id: i64,
    guest_name: String,
    date_created: NaiveDate,
    days_of_stay: i64,
    room_type: RoomType,
    hotel_id: i64,
    hotel_name: String,
}

impl From<ReservationRow> for Reservation {
    fn from(row: ReservationRow) -> Self {
        Reservation {
            id: row.id,
            guest_name: row.guest_name,
            date_created: row.date_created,
            days_of_stay: row.days_of_stay,
            room_type: row.room_type,
            hotel: Hotel {
                id: row.hotel_id,
                name: row.hotel_name,
            },
        }
    }
}

/// Conjunction of optional reservation predicates.
///
/// An empty guest name, no room type and no hotel match every reservation.
/// Guest-name matching is a case-sensitive substring test.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationFilter {
    pub guest_name: String,
    pub room_type: Option<RoomType>,
    pub hotel_id: Option<i64>,
}

impl ReservationFilter {
    pub fn guest_name_containing(guest_name: impl Into<String>) -> Self {
        Self {
            guest_name: guest_name.into(),
            ..Self::default()
        }
    }

    pub fn room_type(mut self, room_type: Option<RoomType>) -> Self {
        self.room_type = room_type;
        self
    }

    pub fn hotel(mut self, hotel_id: Option<i64>) -> Self {
        self.hotel_id = hotel_id;
        self
    }

    fn push_predicates(&self, query: &mut QueryBuilder<'_, Sqlite>) {
        query.push(" WHERE 1=1");

        if !self.guest_name.is_empty() {
            query
                .push(" AND instr(r.guest_name, ")
                .push_bind(self.guest_name.clone())
                .push(") > 0");
        }

        if let Some(room_type) = self.room_type {
            query.push(" AND r.room_type = ").push_bind(room_type);
        }

        if let Some(hotel_id) = self.hotel_id {
            query.push(" AND r.hotel_id = ").push_bind(hotel_id);
        }
    }
}

pub async fn find_all(conn: &mut SqliteConnection) -> Result<Vec<Reservation>, sqlx::Error> {
    find_matching(conn, &ReservationFilter::default()).await
}

pub async fn find_by_hotel(
    conn: &mut SqliteConnection,
    hotel_id: i64,
) -> Result<Vec<Reservation>, sqlx::Error> {
    find_matching(conn, &ReservationFilter::default().hotel(Some(hotel_id))).await
}

pub async fn find_matching(
    conn: &mut SqliteConnection,
    filter: &ReservationFilter,
) -> Result<Vec<Reservation>, sqlx::Error> {
    let mut query = QueryBuilder::<Sqlite>::new(SELECT_RESERVATIONS);
    filter.push_predicates(&mut query);
    query.push(" ORDER BY r.id");

    let rows = query
        .build_query_as::<ReservationRow>()
        .fetch_all(&mut *conn)
        .await?;

    Ok(rows.into_iter().map(Reservation::from).collect())
}

pub async fn find_page(
    conn: &mut SqliteConnection,
    filter: &ReservationFilter,
    request: PageRequest,
) -> Result<Page<Reservation>, sqlx::Error> {
    let mut count = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM reservations r");
    filter.push_predicates(&mut count);
    let total: i64 = count.build_query_scalar::<i64>().fetch_one(&mut *conn).await?;

    let mut query = QueryBuilder::<Sqlite>::new(SELECT_RESERVATIONS);
    filter.push_predicates(&mut query);
    query
        .push(" ORDER BY r.id LIMIT ")
        .push_bind(request.limit())
        .push(" OFFSET ")
        .push_bind(request.offset().unwrap_or(i64::MAX));

    let rows = query
        .build_query_as::<ReservationRow>()
        .fetch_all(&mut *conn)
        .await?;

    Ok(Page::new(
        rows.into_iter().map(Reservation::from).collect(),
        request,
        total,
    ))
}

pub async fn find_by_id(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<Option<Reservation>, sqlx::Error> {
    let mut query = QueryBuilder::<Sqlite>::new(SELECT_RESERVATIONS);
    query.push(" WHERE r.id = ").push_bind(id);

    let row = query
        .build_query_as::<ReservationRow>()
        .fetch_optional(&mut *conn)
        .await?;

    Ok(row.map(Reservation::from))
}

pub async fn insert(conn: &mut SqliteConnection, input: &CreateReservation) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        INSERT INTO reservations (guest_name, date_created, days_of_stay, room_type, hotel_id)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(&input.guest_name)
    .bind(input.date_created)
    .bind(input.days_of_stay)
    .bind(input.room_type)
    .bind(input.hotel_id)
    .fetch_one(&mut *conn)
    .await
}

/// Overwrites every column except the id. Returns whether a row was touched.
pub async fn update(
    conn: &mut SqliteConnection,
    id: i64,
    input: &CreateReservation,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE reservations
        SET guest_name = ?, date_created = ?, days_of_stay = ?, room_type = ?, hotel_id = ?
        WHERE id = ?
        "#,
    )
    .bind(&input.guest_name)
    .bind(input.date_created)
    .bind(input.days_of_stay)
    .bind(input.room_type)
    .bind(input.hotel_id)
    .bind(id)
    .execute(&mut *conn)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn increment_days_of_stay(conn: &mut SqliteConnection, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE reservations SET days_of_stay = days_of_stay + 1 WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete(conn: &mut SqliteConnection, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM reservations WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{hotels, test_pool};

    fn input(guest_name: &str, room_type: RoomType, hotel_id: i64) -> CreateReservation {
        CreateReservation {
            guest_name: guest_name.to_string(),
            date_created: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            days_of_stay: 2,
            room_type,
            hotel_id,
        }
    }

    #[actix_web::test]
    async fn filters_combine_as_conjunction() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let plaza = hotels::insert(&mut conn, "Plaza").await.unwrap();
        let grand = hotels::insert(&mut conn, "Grand").await.unwrap();

        insert(&mut conn, &input("John Smith", RoomType::Single, plaza.id)).await.unwrap();
        insert(&mut conn, &input("Jane Smith", RoomType::Double, plaza.id)).await.unwrap();
        insert(&mut conn, &input("Ann Smith", RoomType::Double, grand.id)).await.unwrap();
        insert(&mut conn, &input("Bob Jones", RoomType::Double, plaza.id)).await.unwrap();

        let guests = |reservations: Vec<Reservation>| {
            reservations
                .into_iter()
                .map(|r| r.guest_name)
                .collect::<Vec<_>>()
        };

        let all = find_matching(&mut conn, &ReservationFilter::default()).await.unwrap();
        assert_eq!(all.len(), 4);

        let smiths = ReservationFilter::guest_name_containing("Smith");
        assert_eq!(find_matching(&mut conn, &smiths).await.unwrap().len(), 3);

        let at_plaza = smiths.clone().hotel(Some(plaza.id));
        assert_eq!(
            guests(find_matching(&mut conn, &at_plaza).await.unwrap()),
            vec!["John Smith", "Jane Smith"]
        );

        let doubles = smiths.clone().room_type(Some(RoomType::Double));
        assert_eq!(
            guests(find_matching(&mut conn, &doubles).await.unwrap()),
            vec!["Jane Smith", "Ann Smith"]
        );

        let both = doubles.hotel(Some(plaza.id));
        assert_eq!(
            guests(find_matching(&mut conn, &both).await.unwrap()),
            vec!["Jane Smith"]
        );
    }

    #[actix_web::test]
    async fn guest_name_match_is_case_sensitive() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let plaza = hotels::insert(&mut conn, "Plaza").await.unwrap();
        insert(&mut conn, &input("John Smith", RoomType::Single, plaza.id)).await.unwrap();

        let lower = ReservationFilter::guest_name_containing("smith");
        assert!(find_matching(&mut conn, &lower).await.unwrap().is_empty());

        let exact = ReservationFilter::guest_name_containing("Smith");
        assert_eq!(find_matching(&mut conn, &exact).await.unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn page_slices_and_counts_the_filtered_set() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let plaza = hotels::insert(&mut conn, "Plaza").await.unwrap();
        for i in 0..7 {
            insert(&mut conn, &input(&format!("Guest {}", i), RoomType::Single, plaza.id))
                .await
                .unwrap();
        }

        let filter = ReservationFilter::default();
        let last = find_page(&mut conn, &filter, PageRequest::new(2, 3)).await.unwrap();
        assert_eq!(last.total_elements, 7);
        assert_eq!(last.total_pages, 3);
        assert_eq!(last.content.len(), 1);
        assert_eq!(last.content[0].guest_name, "Guest 6");

        let beyond = find_page(&mut conn, &filter, PageRequest::new(5, 3)).await.unwrap();
        assert!(beyond.content.is_empty());
        assert_eq!(beyond.total_pages, 3);
    }

    #[actix_web::test]
    async fn write_operations_report_missing_rows() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let plaza = hotels::insert(&mut conn, "Plaza").await.unwrap();

        assert!(!update(&mut conn, 99, &input("Nobody", RoomType::Single, plaza.id)).await.unwrap());
        assert!(!increment_days_of_stay(&mut conn, 99).await.unwrap());
        assert!(!delete(&mut conn, 99).await.unwrap());
    }

    #[actix_web::test]
    async fn hotel_reference_is_enforced_by_schema() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();

        let result = insert(&mut conn, &input("Orphan", RoomType::Single, 42)).await;
        assert!(result.is_err());
    }
}
