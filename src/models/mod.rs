//! Data Models Module
//!
//! Domain records and request/response DTOs for the users API.

mod requests;
mod responses;
mod user;

pub use requests::UserPayload;
pub use responses::HealthResponse;
pub use user::User;
