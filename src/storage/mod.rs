pub mod db;
pub mod error;
pub mod files;
pub mod relational;
pub(crate) mod schema;
