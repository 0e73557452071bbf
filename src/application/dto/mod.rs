//! Data transfer objects.

mod signin_dto;

pub use signin_dto::{SigninRequest, SigninResponse};
