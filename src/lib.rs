//! Personal library tracker: record finished books, browse them on a
//! dashboard, edit and delete entries. Server-rendered pages over SQLite.

pub mod config;
pub mod error;
pub mod flash;
pub mod repo;
pub mod routes;
pub mod sql;
pub mod types;
pub mod views;

pub use config::Config;
pub use error::{Error, Result};
pub use repo::BookRepository;
pub use routes::{router, AppState};
pub use sql::SqliteBooks;
