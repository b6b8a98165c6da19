pub mod db;
pub mod models;
mod session;
mod tables;

pub use db::{Database, DatabaseError};
pub use tables::*;
