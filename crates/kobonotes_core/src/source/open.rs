//! Read-only connection bootstrap for the e-reader database.
//!
//! # Invariants
//! - Returned connections are opened with `SQLITE_OPEN_READ_ONLY`.
//! - The connection is closed when the returned value is dropped.

use super::SourceResult;
use log::{error, info};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use std::time::{Duration, Instant};

/// Opens the device database read-only.
///
/// # Side effects
/// - Emits `db_open` logging events with duration and status.
pub fn open_kobo_db(path: impl AsRef<Path>) -> SourceResult<Connection> {
    let path = path.as_ref();
    let started_at = Instant::now();
    info!(
        "event=db_open module=source status=start path={}",
        path.display()
    );

    let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    let conn = match Connection::open_with_flags(path, flags) {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=source status=error duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    if let Err(err) = conn.busy_timeout(Duration::from_secs(5)) {
        error!(
            "event=db_open module=source status=error duration_ms={} error_code=db_bootstrap_failed error={}",
            started_at.elapsed().as_millis(),
            err
        );
        return Err(err.into());
    }

    info!(
        "event=db_open module=source status=ok duration_ms={}",
        started_at.elapsed().as_millis()
    );
    Ok(conn)
}
