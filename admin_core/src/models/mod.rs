pub mod adoption;
pub mod request;

pub use adoption::*;
pub use request::{ApiResponse, MarkSuccessPayload, SendEmailForm};
