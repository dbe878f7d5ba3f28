use serde::{Deserialize, Serialize};

use super::reservation::Reservation;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Hotel {
    pub id: i64,
    pub name: String,
}

/// A hotel together with every reservation that references it.
#[derive(Debug, Serialize)]
pub struct HotelDetails {
    #[serde(flatten)]
    pub hotel: Hotel,
    pub reservations: Vec<Reservation>,
}
