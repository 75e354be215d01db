mod schema;

use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{types::Type, Connection, Row};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::*;

/// SQLite-backed store. Clones share one connection.
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: PathBuf) -> Result<Self> {
        let parent = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Database path has no parent directory"))?;
        std::fs::create_dir_all(parent)?;
        let conn = Connection::open(&path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        tracing::debug!("Opened database at {}", path.display());
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_default() -> Result<Self> {
        let dirs = directories::ProjectDirs::from("", "", "roommate-ledger")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        let db_path = dirs.data_dir().join("ledger.db");
        Self::open(db_path)
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock().expect("database lock poisoned");
        schema::run_migrations(&conn)
    }

    // ============================================================
    // Roommate operations
    // ============================================================

    pub fn insert_roommate(&self, roommate: &Roommate) -> Result<()> {
        let conn = self.conn.lock().expect("database lock poisoned");
        conn.execute(
            "INSERT INTO roommates (id, name, email, created_at) VALUES (?, ?, ?, ?)",
            (
                roommate.id.to_string(),
                &roommate.name,
                &roommate.email,
                format_datetime(&roommate.created_at),
            ),
        )?;
        Ok(())
    }

    /// The roster in insertion order.
    pub fn get_all_roommates(&self) -> Result<Vec<Roommate>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt =
            conn.prepare("SELECT id, name, email, created_at FROM roommates ORDER BY rowid")?;

        let roommates = stmt
            .query_map([], roommate_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(roommates)
    }

    pub fn get_roommate(&self, id: Uuid) -> Result<Option<Roommate>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt =
            conn.prepare("SELECT id, name, email, created_at FROM roommates WHERE id = ?")?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            Ok(Some(roommate_from_row(row)?))
        } else {
            Ok(None)
        }
    }

    // ============================================================
    // Bill operations
    // ============================================================

    /// Write a bill and all of its splits in one transaction.
    pub fn insert_bill(&self, bill: &Bill) -> Result<()> {
        let mut conn = self.conn.lock().expect("database lock poisoned");
        let tx = conn.transaction()?;

        tx.execute(
            "INSERT INTO bills (id, description, amount, due_date, payer_id, notes, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
            (
                bill.id.to_string(),
                &bill.description,
                bill.amount.to_string(),
                format_datetime(&bill.due_date),
                bill.payer_id.map(|u| u.to_string()),
                &bill.notes,
                format_datetime(&bill.created_at),
            ),
        )?;

        for (position, split) in bill.splits.iter().enumerate() {
            tx.execute(
                "INSERT INTO bill_splits (bill_id, position, roommate_id, owed_amount, paid)
                 VALUES (?, ?, ?, ?, ?)",
                (
                    bill.id.to_string(),
                    position as i64,
                    split.roommate_id.to_string(),
                    split.owed_amount.to_string(),
                    split.paid as i32,
                ),
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    pub fn get_all_bills(&self) -> Result<Vec<Bill>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, description, amount, due_date, payer_id, notes, created_at
             FROM bills ORDER BY due_date, created_at",
        )?;
        let mut bills = stmt
            .query_map([], bill_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        let mut stmt = conn.prepare(
            "SELECT bill_id, roommate_id, owed_amount, paid
             FROM bill_splits ORDER BY bill_id, position",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                uuid_at(row, 0)?,
                Split {
                    roommate_id: uuid_at(row, 1)?,
                    owed_amount: decimal_at(row, 2)?,
                    paid: row.get::<_, i32>(3)? != 0,
                },
            ))
        })?;

        let mut by_bill: HashMap<Uuid, Vec<Split>> = HashMap::new();
        for row in rows {
            let (bill_id, split) = row?;
            by_bill.entry(bill_id).or_default().push(split);
        }

        for bill in &mut bills {
            bill.splits = by_bill.remove(&bill.id).unwrap_or_default();
        }

        Ok(bills)
    }

    pub fn get_bill(&self, id: Uuid) -> Result<Option<Bill>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, description, amount, due_date, payer_id, notes, created_at
             FROM bills WHERE id = ?",
        )?;

        let mut rows = stmt.query([id.to_string()])?;
        let Some(row) = rows.next()? else {
            return Ok(None);
        };
        let mut bill = bill_from_row(row)?;

        let mut stmt = conn.prepare(
            "SELECT roommate_id, owed_amount, paid
             FROM bill_splits WHERE bill_id = ? ORDER BY position",
        )?;
        bill.splits = stmt
            .query_map([id.to_string()], |row| {
                Ok(Split {
                    roommate_id: uuid_at(row, 0)?,
                    owed_amount: decimal_at(row, 1)?,
                    paid: row.get::<_, i32>(2)? != 0,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(bill))
    }

    // ============================================================
    // Chore operations
    // ============================================================

    /// Write a chore and its assignee list in one transaction.
    pub fn insert_chore(&self, chore: &Chore) -> Result<()> {
        let mut conn = self.conn.lock().expect("database lock poisoned");
        let tx = conn.transaction()?;

        tx.execute(
            "INSERT INTO chores (id, name, due_date, completed, created_at)
             VALUES (?, ?, ?, ?, ?)",
            (
                chore.id.to_string(),
                &chore.name,
                format_datetime(&chore.due_date),
                chore.completed as i32,
                format_datetime(&chore.created_at),
            ),
        )?;

        for (position, roommate_id) in chore.assigned_to.iter().enumerate() {
            tx.execute(
                "INSERT INTO chore_assignees (chore_id, position, roommate_id) VALUES (?, ?, ?)",
                (
                    chore.id.to_string(),
                    position as i64,
                    roommate_id.to_string(),
                ),
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    pub fn get_all_chores(&self) -> Result<Vec<Chore>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, name, due_date, completed, created_at
             FROM chores ORDER BY due_date, created_at",
        )?;
        let mut chores = stmt
            .query_map([], chore_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        let mut stmt = conn.prepare(
            "SELECT chore_id, roommate_id FROM chore_assignees ORDER BY chore_id, position",
        )?;
        let rows = stmt.query_map([], |row| Ok((uuid_at(row, 0)?, uuid_at(row, 1)?)))?;

        let mut by_chore: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        for row in rows {
            let (chore_id, roommate_id) = row?;
            by_chore.entry(chore_id).or_default().push(roommate_id);
        }

        for chore in &mut chores {
            chore.assigned_to = by_chore.remove(&chore.id).unwrap_or_default();
        }

        Ok(chores)
    }

    pub fn get_chore(&self, id: Uuid) -> Result<Option<Chore>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        load_chore(&conn, id)
    }

    /// Set `completed`. Returns `None` if the chore does not exist.
    pub fn complete_chore(&self, id: Uuid) -> Result<Option<Chore>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let rows = conn.execute(
            "UPDATE chores SET completed = 1 WHERE id = ?",
            [id.to_string()],
        )?;

        if rows == 0 {
            return Ok(None);
        }
        load_chore(&conn, id)
    }

    // ============================================================
    // Maintenance
    // ============================================================

    /// Delete every roommate, chore, and bill in one transaction.
    pub fn clear_all(&self) -> Result<ClearReport> {
        let mut conn = self.conn.lock().expect("database lock poisoned");
        let tx = conn.transaction()?;

        tx.execute("DELETE FROM bill_splits", [])?;
        let bills = tx.execute("DELETE FROM bills", [])?;
        tx.execute("DELETE FROM chore_assignees", [])?;
        let chores = tx.execute("DELETE FROM chores", [])?;
        let roommates = tx.execute("DELETE FROM roommates", [])?;

        tx.commit()?;
        Ok(ClearReport {
            roommates,
            chores,
            bills,
        })
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: self.conn.clone(),
        }
    }
}

fn load_chore(conn: &Connection, id: Uuid) -> Result<Option<Chore>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, due_date, completed, created_at FROM chores WHERE id = ?",
    )?;

    let mut rows = stmt.query([id.to_string()])?;
    let Some(row) = rows.next()? else {
        return Ok(None);
    };
    let mut chore = chore_from_row(row)?;

    let mut stmt = conn.prepare(
        "SELECT roommate_id FROM chore_assignees WHERE chore_id = ? ORDER BY position",
    )?;
    chore.assigned_to = stmt
        .query_map([id.to_string()], |row| uuid_at(row, 0))?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Some(chore))
}

fn roommate_from_row(row: &Row<'_>) -> rusqlite::Result<Roommate> {
    Ok(Roommate {
        id: uuid_at(row, 0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        created_at: datetime_at(row, 3)?,
    })
}

/// Splits are attached separately.
fn bill_from_row(row: &Row<'_>) -> rusqlite::Result<Bill> {
    Ok(Bill {
        id: uuid_at(row, 0)?,
        description: row.get(1)?,
        amount: decimal_at(row, 2)?,
        due_date: datetime_at(row, 3)?,
        payer_id: match row.get::<_, Option<String>>(4)? {
            Some(raw) => Some(Uuid::parse_str(&raw).map_err(|e| conversion_error(4, e))?),
            None => None,
        },
        notes: row.get(5)?,
        splits: Vec::new(),
        created_at: datetime_at(row, 6)?,
    })
}

/// Assignees are attached separately.
fn chore_from_row(row: &Row<'_>) -> rusqlite::Result<Chore> {
    Ok(Chore {
        id: uuid_at(row, 0)?,
        name: row.get(1)?,
        assigned_to: Vec::new(),
        due_date: datetime_at(row, 2)?,
        completed: row.get::<_, i32>(3)? != 0,
        created_at: datetime_at(row, 4)?,
    })
}

/// Fixed-width UTC timestamps so that text order matches time order.
fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn uuid_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Uuid> {
    let raw: String = row.get(idx)?;
    Uuid::parse_str(&raw).map_err(|e| conversion_error(idx, e))
}

fn datetime_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| conversion_error(idx, e))
}

fn decimal_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let raw: String = row.get(idx)?;
    Decimal::from_str(&raw).map_err(|e| conversion_error(idx, e))
}

fn conversion_error<E>(idx: usize, err: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bill_with_splits(roommates: &[Uuid]) -> Bill {
        Bill {
            id: Uuid::new_v4(),
            description: "Electric".to_string(),
            amount: Decimal::new(9000, 2),
            due_date: Utc::now(),
            payer_id: None,
            notes: String::new(),
            splits: roommates
                .iter()
                .map(|id| Split {
                    roommate_id: *id,
                    owed_amount: Decimal::new(3000, 2),
                    paid: false,
                })
                .collect(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn failed_split_write_rolls_back_the_bill() {
        let db = Database::open_memory().unwrap();
        db.migrate().unwrap();
        let bill = bill_with_splits(&[Uuid::new_v4(), Uuid::new_v4()]);

        // Occupy the second split slot so the bill's own insert collides.
        {
            let conn = db.conn.lock().unwrap();
            conn.pragma_update(None, "foreign_keys", "OFF").unwrap();
            conn.execute(
                "INSERT INTO bill_splits (bill_id, position, roommate_id, owed_amount, paid)
                 VALUES (?, 1, ?, '1.00', 0)",
                (bill.id.to_string(), Uuid::new_v4().to_string()),
            )
            .unwrap();
        }

        assert!(db.insert_bill(&bill).is_err());
        assert!(db.get_bill(bill.id).unwrap().is_none());

        let conn = db.conn.lock().unwrap();
        let splits: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM bill_splits WHERE bill_id = ?",
                [bill.id.to_string()],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(splits, 1);
    }

    #[test]
    fn corrupt_amount_is_an_error_not_a_default() {
        let db = Database::open_memory().unwrap();
        db.migrate().unwrap();
        let bill = bill_with_splits(&[]);
        db.insert_bill(&bill).unwrap();

        {
            let conn = db.conn.lock().unwrap();
            conn.execute("UPDATE bills SET amount = 'lots'", []).unwrap();
        }

        assert!(db.get_all_bills().is_err());
    }

    #[test]
    fn timestamps_round_trip_exactly() {
        let db = Database::open_memory().unwrap();
        db.migrate().unwrap();
        let bill = bill_with_splits(&[Uuid::new_v4()]);
        db.insert_bill(&bill).unwrap();

        assert_eq!(db.get_bill(bill.id).unwrap(), Some(bill));
    }
}
