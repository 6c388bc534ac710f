pub mod errors;
pub mod memory;
pub mod registry;
pub mod store;
#[cfg(test)]
pub(crate) mod testing;

pub use errors::StoreError;
pub use memory::InMemorySessionStore;
pub use registry::SessionRegistry;
pub use store::SessionStore;
