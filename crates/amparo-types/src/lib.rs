pub mod message;
pub mod session;
pub mod config;
pub mod error;


pub use error::ChatError;
pub type Result<T> = std::result::Result<T, ChatError>;

/// Current time in milliseconds since the Unix epoch.
/// All session timestamps use this resolution.
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
