use std::path::Path;

use rusqlite::{Connection, functions::FunctionFlags};

use crate::{reconcile::trigram, storage::schema};

fn open_in_memory() -> Result<rusqlite::Connection, rusqlite::Error> {
    Connection::open_in_memory()
}

fn open_from_file(path: &Path) -> Result<rusqlite::Connection, rusqlite::Error> {
    Connection::open(path)
}

/// registers `similarity(a, b)`, the trigram similarity of two strings
fn register_similarity(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.create_scalar_function(
        "similarity",
        2,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let a = ctx.get::<String>(0)?;
            let b = ctx.get::<String>(1)?;
            Ok(trigram::similarity(&a, &b))
        },
    )
}

/// Opens the reconciliation database, in memory unless a path is given.
///
/// The schema is recreated on every open.
pub fn open(path: Option<&Path>) -> Result<rusqlite::Connection, rusqlite::Error> {
    let db = match path {
        Some(path) => open_from_file(path)?,
        None => open_in_memory()?,
    };
    register_similarity(&db)?;
    schema::init(&db)?;
    Ok(db)
}
