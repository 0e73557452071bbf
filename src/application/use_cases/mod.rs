//! Use case implementations.

mod restore_session_use_case;
mod signin_use_case;

pub use restore_session_use_case::RestoreSessionUseCase;
pub use signin_use_case::SigninUseCase;
