pub mod arbiter;
pub mod ports;
pub mod session;
