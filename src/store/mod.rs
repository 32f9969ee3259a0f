pub mod http;
pub mod memory;
pub mod traits;
pub mod validation;

pub use http::HttpStore;
pub use memory::InMemoryStore;
pub use traits::PropertyStore;
