use actix_web::{web, HttpResponse};

use crate::error::AppResult;
use crate::services::HotelService;

pub async fn get_hotels(service: web::Data<HotelService>) -> AppResult<HttpResponse> {
    let hotels = service.list_all().await?;
    Ok(HttpResponse::Ok().json(hotels))
}

pub async fn get_hotel_by_id(
    service: web::Data<HotelService>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let hotel = service.details(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(hotel))
}
