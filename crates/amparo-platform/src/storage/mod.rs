pub mod memory;
#[cfg(target_arch = "wasm32")]
pub mod local_storage;
pub mod auto;

pub use memory::MemoryStorage;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorage;
pub use auto::{auto_detect_storage, storage_for};
