pub mod api;
pub mod auth;
pub mod config;
pub mod dates;
pub mod error;
pub mod http;
pub mod matrix;
pub mod model;
pub mod session;
pub mod transition;

pub use api::TaskClient;
pub use auth::OauthClient;
pub use config::AppConfig;
pub use matrix::{MatrixView, QuadrantStats};
pub use model::*;
pub use session::Session;
