pub mod config;
pub mod email;
pub mod error;
pub mod observability;
pub mod routes;

pub use config::Config;
pub use routes::AppState;
