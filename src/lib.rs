pub mod auth;
pub mod booking;
pub mod db;
pub mod error;
pub mod fare;
pub mod handlers;
pub mod models;
pub mod notify;

pub use db::create_pool;
