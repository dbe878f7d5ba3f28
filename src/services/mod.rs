pub mod hotels;
pub mod reservations;

pub use hotels::HotelService;
pub use reservations::ReservationService;
