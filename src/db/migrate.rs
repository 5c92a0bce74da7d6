use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists. Migration bookkeeping lives there,
/// so it is created before anything else.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// Key-value table backing the clock store.
fn migrate_create_kv_table(conn: &Connection) -> Result<bool> {
    let version = "20251016_0001_create_kv_store";

    if migration_applied(conn, version)? {
        return Ok(false);
    }

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS kv (
            key        TEXT PRIMARY KEY,
            value      TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        "#,
    )?;

    mark_applied(conn, version, "Created kv table for the clock store")?;
    Ok(true)
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::init_db(). Returns the number of migrations applied.
pub fn run_pending_migrations(conn: &Connection) -> Result<usize> {
    ensure_log_table(conn)?;

    let mut applied = 0;
    if migrate_create_kv_table(conn)? {
        tracing::info!("created kv table");
        applied += 1;
    }

    if applied > 0 {
        tracing::debug!(applied, "database migrations applied");
    }

    Ok(applied)
}
