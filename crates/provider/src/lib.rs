pub mod delivery;
pub mod error;
pub mod log;

pub use delivery::{Delivery, DynDelivery};
pub use error::DeliveryError;
pub use log::LogDelivery;
