//! Database module - MySQL implementations using SQLx.

pub mod connection;
pub mod mysql;

pub use connection::DatabaseConfig;
pub use mysql::MySqlTwoFactorAuthRepository;
