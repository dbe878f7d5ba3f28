use sqlx::{SqliteConnection, SqlitePool};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::db::reservations::ReservationFilter;
use crate::db::{hotels, reservations};
use crate::error::{AppError, AppResult};
use crate::models::hotel::Hotel;
use crate::models::page::{Page, PageRequest};
use crate::models::reservation::{CreateReservation, Reservation, RoomType};

#[derive(Clone)]
pub struct ReservationService {
    pool: SqlitePool,
}

impl ReservationService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list_all(&self) -> AppResult<Vec<Reservation>> {
        let mut conn = self.pool.acquire().await?;
        Ok(reservations::find_all(&mut conn).await?)
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Reservation> {
        let mut conn = self.pool.acquire().await?;
        require_reservation(&mut conn, id).await
    }

    pub async fn create(&self, input: CreateReservation) -> AppResult<Reservation> {
        input.validate()?;

        let mut tx = self.pool.begin().await?;
        require_hotel(&mut tx, input.hotel_id).await?;
        let id = reservations::insert(&mut tx, &input).await?;
        let reservation = require_reservation(&mut tx, id).await?;
        tx.commit().await?;

        log::info!(
            "Created reservation {} for {} at hotel {}",
            reservation.id,
            reservation.guest_name,
            reservation.hotel.id
        );
        Ok(reservation)
    }

    /// Overwrites every field of reservation `id`. The hotel is checked before the reservation.
    pub async fn update(&self, id: i64, input: CreateReservation) -> AppResult<Reservation> {
        input.validate()?;

        let mut tx = self.pool.begin().await?;
        require_hotel(&mut tx, input.hotel_id).await?;
        if !reservations::update(&mut tx, id, &input).await? {
            return Err(AppError::ReservationNotFound(id));
        }
        let reservation = require_reservation(&mut tx, id).await?;
        tx.commit().await?;

        log::info!("Updated reservation {}", id);
        Ok(reservation)
    }

    /// Removes reservation `id` and returns it as it was before deletion.
    pub async fn delete(&self, id: i64) -> AppResult<Reservation> {
        let mut tx = self.pool.begin().await?;
        let reservation = require_reservation(&mut tx, id).await?;
        reservations::delete(&mut tx, id).await?;
        tx.commit().await?;

        log::info!("Deleted reservation {}", id);
        Ok(reservation)
    }

    pub async fn extend_stay(&self, id: i64) -> AppResult<Reservation> {
        let mut tx = self.pool.begin().await?;
        if !reservations::increment_days_of_stay(&mut tx, id).await? {
            return Err(AppError::ReservationNotFound(id));
        }
        let reservation = require_reservation(&mut tx, id).await?;
        tx.commit().await?;

        log::info!(
            "Extended reservation {} to {} days",
            id,
            reservation.days_of_stay
        );
        Ok(reservation)
    }

    /// Filtered page of reservations. A missing guest name matches every guest.
    pub async fn find_page(
        &self,
        guest_name: Option<&str>,
        room_type: Option<RoomType>,
        hotel_id: Option<i64>,
        page_num: u32,
        page_size: u32,
    ) -> AppResult<Page<Reservation>> {
        if page_size == 0 {
            return Err(page_error("pageSize"));
        }
        let request = PageRequest::new(page_num, page_size);
        if request.offset().is_none() {
            return Err(page_error("pageNum"));
        }

        let filter = ReservationFilter::guest_name_containing(guest_name.unwrap_or_default())
            .room_type(room_type)
            .hotel(hotel_id);
        log::debug!("Reservation page {} (size {}) for {:?}", page_num, page_size, filter);

        let mut conn = self.pool.acquire().await?;
        Ok(reservations::find_page(&mut conn, &filter, request).await?)
    }
}

fn page_error(field: &'static str) -> AppError {
    let mut errors = ValidationErrors::new();
    errors.add(field, ValidationError::new("range"));
    AppError::Validation(errors)
}

async fn require_hotel(conn: &mut SqliteConnection, id: i64) -> AppResult<Hotel> {
    hotels::find_by_id(conn, id)
        .await?
        .ok_or(AppError::HotelNotFound(id))
}

async fn require_reservation(conn: &mut SqliteConnection, id: i64) -> AppResult<Reservation> {
    reservations::find_by_id(conn, id)
        .await?
        .ok_or(AppError::ReservationNotFound(id))
}
