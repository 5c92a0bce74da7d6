use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

/// Row counts and bounds of the application database.
#[derive(Debug, Clone, PartialEq)]
pub struct DbInfo {
    pub size_bytes: u64,
    pub keys: i64,
    pub log_rows: i64,
    pub last_write: Option<String>,
}

pub fn collect_db_info(pool: &DbPool, db_path: &str) -> rusqlite::Result<DbInfo> {
    let size_bytes = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);

    let keys: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM kv", [], |row| row.get(0))?;
    let log_rows: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM log", [], |row| row.get(0))?;
    let last_write: Option<String> = pool
        .conn
        .query_row(
            "SELECT updated_at FROM kv ORDER BY updated_at DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    Ok(DbInfo {
        size_bytes,
        keys,
        log_rows,
        last_write,
    })
}

pub fn print_db_info(pool: &DbPool, db_path: &str, entries: usize) -> rusqlite::Result<()> {
    let info = collect_db_info(pool, db_path)?;
    let file_kb = info.size_bytes as f64 / 1024.0;

    println!();
    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.1} KB", CYAN, RESET, file_kb);
    println!("{}• Stored keys:{} {}{}{}", CYAN, RESET, GREEN, info.keys, RESET);
    println!("{}• Entries:{} {}{}{}", CYAN, RESET, GREEN, entries, RESET);
    println!("{}• Log rows:{} {}", CYAN, RESET, info.log_rows);
    println!(
        "{}• Last write:{} {}",
        CYAN,
        RESET,
        info.last_write
            .unwrap_or_else(|| format!("{GREY}--{RESET}"))
    );
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;

    #[test]
    fn counts_keys_and_log_rows() {
        let pool = DbPool::in_memory().unwrap();
        init_db(&pool.conn).unwrap();
        pool.conn
            .execute("INSERT INTO kv (key, value) VALUES ('a', '1')", [])
            .unwrap();

        let info = collect_db_info(&pool, ":memory:").unwrap();
        assert_eq!(info.keys, 1);
        // one migration bookkeeping row
        assert_eq!(info.log_rows, 1);
        assert!(info.last_write.is_some());
    }
}
