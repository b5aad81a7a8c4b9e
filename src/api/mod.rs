mod client;
mod error;
mod response;
mod source;

pub use client::{
    FundApiClient, DEFAULT_API_BASE_URL, DEFAULT_PERFORMANCE_DAYS, DEFAULT_TOP_HOLDINGS_LIMIT,
};
pub use error::ApiError;
pub use response::{handle_response, ResponseBody};
pub use source::FundDataSource;
