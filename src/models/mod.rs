pub mod hotel;
pub mod page;
pub mod reservation;
