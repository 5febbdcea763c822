//! Consultant registry: a REST CRUD API over PostgreSQL.

pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod sql;
pub mod state;
pub mod store;

pub use config::{AppConfig, DbConfig};
pub use error::{AppError, ConfigError};
pub use model::{Consultant, NewConsultant, UpdateFields};
pub use response::StatusMessage;
pub use routes::{app_router, consultant_routes};
pub use sql::Filter;
pub use state::AppState;
pub use store::ConsultantStore;
