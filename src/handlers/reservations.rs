use actix_web::http::header;
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::models::hotel::Hotel;
use crate::models::reservation::{CreateReservation, Reservation, RoomType};
use crate::services::{HotelService, ReservationService};

const LIST_PATH: &str = "/reservations";

fn default_page_size() -> u32 {
    3
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationSearch {
    #[serde(default, deserialize_with = "super::empty_as_none")]
    pub guest_name: Option<String>,
    #[serde(default, deserialize_with = "super::empty_as_none")]
    pub room_type: Option<RoomType>,
    #[serde(default, deserialize_with = "super::empty_as_none")]
    pub hotel: Option<i64>,
    #[serde(default)]
    pub page_num: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReservationListView {
    reservations: Vec<Reservation>,
    current_page: u32,
    total_pages: i64,
    guest_name: Option<String>,
    room_type: Option<RoomType>,
    hotel: Option<i64>,
    room_types: [RoomType; 3],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReservationFormView {
    #[serde(skip_serializing_if = "Option::is_none")]
    reservation: Option<Reservation>,
    hotels: Vec<Hotel>,
    room_types: [RoomType; 3],
}

fn redirect_to_list() -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, LIST_PATH))
        .finish()
}

pub async fn list_reservations(
    service: web::Data<ReservationService>,
    params: web::Query<ReservationSearch>,
) -> AppResult<HttpResponse> {
    let params = params.into_inner();

    let page = service
        .find_page(
            params.guest_name.as_deref(),
            params.room_type,
            params.hotel,
            params.page_num,
            params.page_size,
        )
        .await?;

    Ok(HttpResponse::Ok().json(ReservationListView {
        reservations: page.content,
        current_page: params.page_num,
        total_pages: page.total_pages,
        guest_name: params.guest_name,
        room_type: params.room_type,
        hotel: params.hotel,
        room_types: RoomType::ALL,
    }))
}

pub async fn show_add(hotels: web::Data<HotelService>) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(ReservationFormView {
        reservation: None,
        hotels: hotels.list_all().await?,
        room_types: RoomType::ALL,
    }))
}

pub async fn show_edit(
    service: web::Data<ReservationService>,
    hotels: web::Data<HotelService>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let reservation = service.find_by_id(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ReservationFormView {
        reservation: Some(reservation),
        hotels: hotels.list_all().await?,
        room_types: RoomType::ALL,
    }))
}

pub async fn create_reservation(
    service: web::Data<ReservationService>,
    form: web::Form<CreateReservation>,
) -> AppResult<HttpResponse> {
    service.create(form.into_inner()).await?;
    Ok(redirect_to_list())
}

pub async fn update_reservation(
    service: web::Data<ReservationService>,
    path: web::Path<i64>,
    form: web::Form<CreateReservation>,
) -> AppResult<HttpResponse> {
    service.update(path.into_inner(), form.into_inner()).await?;
    Ok(redirect_to_list())
}

pub async fn delete_reservation(
    service: web::Data<ReservationService>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    service.delete(path.into_inner()).await?;
    Ok(redirect_to_list())
}

pub async fn extend_reservation(
    service: web::Data<ReservationService>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    service.extend_stay(path.into_inner()).await?;
    Ok(redirect_to_list())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::error::QueryPayloadError;

    fn parse(query: &str) -> Result<ReservationSearch, QueryPayloadError> {
        web::Query::<ReservationSearch>::from_query(query).map(web::Query::into_inner)
    }

    #[test]
    fn search_defaults_to_first_page_of_three() {
        let search = parse("").unwrap();

        assert_eq!(search.guest_name, None);
        assert_eq!(search.room_type, None);
        assert_eq!(search.hotel, None);
        assert_eq!(search.page_num, 0);
        assert_eq!(search.page_size, 3);
    }

    #[test]
    fn blank_filters_count_as_absent() {
        let search = parse("guestName=&roomType=&hotel=&pageNum=2").unwrap();

        assert_eq!(search.guest_name, None);
        assert_eq!(search.room_type, None);
        assert_eq!(search.hotel, None);
        assert_eq!(search.page_num, 2);
    }

    #[test]
    fn filters_parse_their_labels() {
        let search = parse("guestName=Smith&roomType=DOUBLE&hotel=5&pageSize=10").unwrap();

        assert_eq!(search.guest_name.as_deref(), Some("Smith"));
        assert_eq!(search.room_type, Some(RoomType::Double));
        assert_eq!(search.hotel, Some(5));
        assert_eq!(search.page_size, 10);
    }

    #[test]
    fn guest_name_keeps_surrounding_spaces() {
        let search = parse("guestName=%20Smith").unwrap();
        assert_eq!(search.guest_name.as_deref(), Some(" Smith"));

        let blank = parse("guestName=%20%20").unwrap();
        assert_eq!(blank.guest_name, None);
    }

    #[test]
    fn unknown_room_type_is_rejected() {
        assert!(parse("roomType=SUITE").is_err());
        assert!(parse("hotel=plaza").is_err());
    }
}
