//! Gateway types module
//!
//! - [`response`]: error body, `ApiError`, `ApiResult`

pub mod response;

pub use response::{
    ApiError, ApiResult, ErrorBody, MessageBody, messages, method_not_allowed, ok,
};
