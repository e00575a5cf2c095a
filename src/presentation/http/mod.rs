pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod session;

pub use error::AppError;
pub use server::{HttpServer, build_router};
