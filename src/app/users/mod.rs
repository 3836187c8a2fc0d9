//! 用户资源

pub mod handler;
pub mod memory;
pub mod model;
pub mod postgres;
pub mod service;
pub mod store;
pub mod validation;

pub use memory::MemoryUserStore;
pub use model::{User, UserFields, UserPayload};
pub use postgres::PgUserStore;
pub use service::UserService;
pub use store::{StoreError, UserStore};
