pub mod error;
pub mod handlers;
pub mod models;
pub mod server;

pub use server::create_router;
