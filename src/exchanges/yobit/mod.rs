pub mod builder;
pub mod connector;
pub mod error_codes;
pub mod rest;
pub mod types;

/// Path prefix of the public API, relative to the server URL
pub const PUBLIC_API_PATH: &str = "api/3";
/// Path of the signed trade API, relative to the server URL
pub const PRIVATE_API_PATH: &str = "tapi";

// Re-export main types for easier importing
pub use builder::{build_connector, build_public_connector, YobitBuilder};
pub use connector::YobitConnector;
pub use rest::YobitRest;
pub use types::{PlaceOrderRequest, SortOrder, TradeHistoryQuery, TradeType, DEFAULT_LIST_LIMIT};
