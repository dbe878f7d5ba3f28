use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;

use hotel_reservations::auth::AuthConfig;
use hotel_reservations::config::AppConfig;
use hotel_reservations::services::{HotelService, ReservationService};
use hotel_reservations::{configure, db};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(std::io::Error::other)?;

    log::info!("Connecting to database...");
    let pool = db::get_db_pool(&config.database_url, config.max_connections)
        .await
        .map_err(std::io::Error::other)?;

    log::info!("Running migrations...");
    db::run_migrations(&pool)
        .await
        .map_err(std::io::Error::other)?;

    let hotel_service = HotelService::new(pool.clone());
    hotel_service
        .seed(&config.seed_hotels)
        .await
        .map_err(std::io::Error::other)?;

    let reservations = web::Data::new(ReservationService::new(pool));
    let hotels = web::Data::new(hotel_service);
    let auth = web::Data::new(AuthConfig {
        role_header: config.role_header.clone(),
    });

    log::info!("Starting server at http://{}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .app_data(reservations.clone())
            .app_data(hotels.clone())
            .app_data(auth.clone())
            .wrap(middleware::Logger::default())
            .configure(configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
