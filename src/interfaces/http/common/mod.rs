//! Shared HTTP building blocks

mod error;
mod response;
mod validated_json;

pub use error::{error_response, status_for, ApiError};
pub use response::{ApiResponse, EmptyData};
pub use validated_json::{ValidatedJson, ValidatedJsonRejection};
