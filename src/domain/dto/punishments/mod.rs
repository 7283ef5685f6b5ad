pub mod punishment_request;

pub use punishment_request::PunishUserRequest;
