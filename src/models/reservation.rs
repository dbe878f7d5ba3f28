use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::hotel::Hotel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomType {
    Single,
    Double,
    Apartment,
}

impl RoomType {
    pub const ALL: [RoomType; 3] = [RoomType::Single, RoomType::Double, RoomType::Apartment];

    pub fn label(&self) -> &'static str {
        match self {
            RoomType::Single => "SINGLE",
            RoomType::Double => "DOUBLE",
            RoomType::Apartment => "APARTMENT",
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RoomType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RoomType::ALL
            .into_iter()
            .find(|room_type| room_type.label() == s)
            .ok_or_else(|| format!("unknown room type `{}`", s))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: i64,
    pub guest_name: String,
    pub date_created: NaiveDate,
    pub days_of_stay: i64,
    pub room_type: RoomType,
    pub hotel: Hotel,
}

/// Field values for creating or overwriting a reservation, as submitted by the form.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservation {
    pub guest_name: String,
    pub date_created: NaiveDate,
    #[validate(range(min = 1))]
    pub days_of_stay: i64,
    pub room_type: RoomType,
    pub hotel_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_type_labels_parse_back() {
        for room_type in RoomType::ALL {
            assert_eq!(room_type.label().parse::<RoomType>(), Ok(room_type));
        }
        assert!("double".parse::<RoomType>().is_err());
    }

    #[test]
    fn room_type_serializes_as_label() {
        let json = serde_json::to_string(&RoomType::Apartment).unwrap();
        assert_eq!(json, "\"APARTMENT\"");
    }

    #[test]
    fn days_of_stay_must_be_positive() {
        let mut input = CreateReservation {
            guest_name: "Ana".to_string(),
            date_created: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            days_of_stay: 0,
            room_type: RoomType::Double,
            hotel_id: 1,
        };
        assert!(input.validate().is_err());

        input.days_of_stay = 1;
        assert!(input.validate().is_ok());
    }
}
