pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;

use actix_web::middleware::from_fn;
use actix_web::web;

use handlers::{hotels, reservations};

/// Registers every route. Expects `ReservationService`, `HotelService` and
/// optionally `auth::AuthConfig` as app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(reservations::list_reservations)))
        .service(
            web::resource("/reservations")
                .route(web::get().to(reservations::list_reservations))
                .route(web::post().to(reservations::create_reservation)),
        )
        .service(
            web::resource("/reservations/add")
                .route(web::get().to(reservations::show_add))
                .wrap(from_fn(auth::require_admin)),
        )
        .service(
            web::resource(r"/reservations/edit/{id:\d+}")
                .route(web::get().to(reservations::show_edit))
                .wrap(from_fn(auth::require_admin)),
        )
        .service(
            web::resource(r"/reservations/delete/{id:\d+}")
                .route(web::post().to(reservations::delete_reservation))
                .wrap(from_fn(auth::require_admin)),
        )
        .service(
            web::resource(r"/reservations/extend/{id:\d+}")
                .route(web::post().to(reservations::extend_reservation))
                .wrap(from_fn(auth::require_user)),
        )
        .service(
            web::resource(r"/reservations/{id:\d+}")
                .route(web::post().to(reservations::update_reservation)),
        )
        .service(web::resource("/hotels").route(web::get().to(hotels::get_hotels)))
        .service(
            web::resource(r"/hotels/{id:\d+}").route(web::get().to(hotels::get_hotel_by_id)),
        );
}
