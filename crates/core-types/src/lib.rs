pub mod error;
pub mod structs;
pub mod temporal;
pub mod value;

// Re-export the core types to provide a clean public API.
pub use error::CoreError;
pub use structs::{Reservation, ReservationInput, Validate};
pub use value::Value;
