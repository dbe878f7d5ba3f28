use sqlx::SqlitePool;

use crate::db::{hotels, reservations};
use crate::error::{AppError, AppResult};
use crate::models::hotel::{Hotel, HotelDetails};

#[derive(Clone)]
pub struct HotelService {
    pool: SqlitePool,
}

impl HotelService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list_all(&self) -> AppResult<Vec<Hotel>> {
        let mut conn = self.pool.acquire().await?;
        Ok(hotels::find_all(&mut conn).await?)
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Hotel> {
        let mut conn = self.pool.acquire().await?;
        hotels::find_by_id(&mut conn, id)
            .await?
            .ok_or(AppError::HotelNotFound(id))
    }

    pub async fn details(&self, id: i64) -> AppResult<HotelDetails> {
        let mut conn = self.pool.acquire().await?;
        let hotel = hotels::find_by_id(&mut conn, id)
            .await?
            .ok_or(AppError::HotelNotFound(id))?;
        let reservations = reservations::find_by_hotel(&mut conn, id).await?;

        Ok(HotelDetails { hotel, reservations })
    }

    /// Inserts `names` when the store holds no hotels yet. Returns how many were inserted.
    pub async fn seed(&self, names: &[String]) -> AppResult<usize> {
        let mut tx = self.pool.begin().await?;
        if names.is_empty() || hotels::count(&mut tx).await? > 0 {
            return Ok(0);
        }

        for name in names {
            let hotel = hotels::insert(&mut tx, name).await?;
            log::debug!("Seeded hotel {} ({})", hotel.id, hotel.name);
        }
        tx.commit().await?;

        log::info!("Seeded {} hotels", names.len());
        Ok(names.len())
    }
}
