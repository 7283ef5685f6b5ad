pub mod register_request;

pub use register_request::{LoginRequest, RegisterRequest};
