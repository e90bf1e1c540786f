pub mod error;
pub mod gateway;

pub use error::RequestError;
pub use gateway::{HealthStatus, RequestGateway};
