pub use tickmat_cli::cli;
pub use tickmat_cli::commands;
pub use tickmat_cli::config;
pub use tickmat_cli::init_tracing;

pub use tickmat_core as core;
pub use tickmat_core::api;
pub use tickmat_core::auth;
pub use tickmat_core::matrix;
pub use tickmat_core::model;
pub use tickmat_core::session;
pub use tickmat_core::transition;
