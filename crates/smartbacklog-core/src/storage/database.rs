//! SQLite-backed task store.
//!
//! One `tasks` table holds every owner's records. Batches are written inside a
//! single transaction, so a failed distribution leaves no rows behind.

use std::path::Path;

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};

use super::{data_dir, migrations, TaskStore};
use crate::error::{CoreError, StoreError};
use crate::task::{Difficulty, NewTask, Task, TaskId};

const DATE_FORMAT: &str = "%Y-%m-%d";

const SELECT_TASK: &str =
    "SELECT id, owner, subject, size, difficulty, due_date, completed FROM tasks";

/// Raw column values, decoded into a [`Task`] outside the rusqlite closure.
type TaskRow = (i64, String, String, i64, i64, String, bool);

fn read_row(row: &rusqlite::Row) -> Result<TaskRow, rusqlite::Error> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
    ))
}

fn decode_row(row: TaskRow) -> Result<Task, StoreError> {
    let (id, owner, subject, size, difficulty, due_date, completed) = row;
    let corrupt = |message: String| StoreError::CorruptRow { id, message };

    let size = u32::try_from(size).map_err(|_| corrupt(format!("size {size}")))?;
    let difficulty = Difficulty::new(difficulty).map_err(|e| corrupt(e.to_string()))?;
    let due_date = NaiveDate::parse_from_str(&due_date, DATE_FORMAT)
        .map_err(|e| corrupt(format!("due_date '{due_date}': {e}")))?;

    Ok(Task {
        id,
        owner,
        subject,
        size,
        difficulty,
        due_date,
        completed,
    })
}

/// SQLite database for task storage.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database file named in the configuration inside [`data_dir`].
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open(database_file: &str) -> Result<Self, CoreError> {
        let path = data_dir()?.join(database_file);
        Ok(Self::open_at(path)?)
    }

    /// Open (or create) a database at an explicit path.
    pub fn open_at(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|source| StoreError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::with_connection(conn)
    }

    /// Open an in-memory database.
    pub fn open_memory() -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        migrations::migrate(&conn).map_err(|e| StoreError::MigrationFailed(e.to_string()))?;
        Ok(Self { conn })
    }

    fn query_tasks(&self, sql: &str, args: impl rusqlite::Params) -> Result<Vec<Task>, StoreError> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt
            .query_map(args, read_row)?
            .collect::<Result<Vec<_>, _>>()?;
        rows.into_iter().map(decode_row).collect()
    }
}

impl TaskStore for SqliteStore {
    fn insert_many(&self, tasks: &[NewTask]) -> Result<Vec<TaskId>, StoreError> {
        let tx = self.conn.unchecked_transaction()?;
        let mut ids = Vec::with_capacity(tasks.len());
        {
            let mut stmt = tx.prepare(
                "INSERT INTO tasks (owner, subject, size, difficulty, due_date, completed)
                 VALUES (?1, ?2, ?3, ?4, ?5, 0)",
            )?;
            for task in tasks {
                stmt.execute(params![
                    task.owner,
                    task.subject,
                    task.size,
                    task.difficulty.get(),
                    task.due_date.format(DATE_FORMAT).to_string(),
                ])?;
                ids.push(tx.last_insert_rowid());
            }
        }
        // Dropping `tx` on an early return rolls the whole batch back.
        tx.commit()?;
        Ok(ids)
    }

    fn list_by_owner(&self, owner: &str) -> Result<Vec<Task>, StoreError> {
        self.query_tasks(
            &format!("{SELECT_TASK} WHERE owner = ?1 ORDER BY id"),
            params![owner],
        )
    }

    fn list_all(&self) -> Result<Vec<Task>, StoreError> {
        self.query_tasks(&format!("{SELECT_TASK} ORDER BY id"), [])
    }

    fn get(&self, id: TaskId) -> Result<Option<Task>, StoreError> {
        let row = self
            .conn
            .query_row(&format!("{SELECT_TASK} WHERE id = ?1"), params![id], read_row)
            .optional()?;
        row.map(decode_row).transpose()
    }

    fn update_completion(&self, id: TaskId, completed: bool) -> Result<bool, StoreError> {
        let changed = self.conn.execute(
            "UPDATE tasks SET completed = ?2 WHERE id = ?1",
            params![id, completed],
        )?;
        Ok(changed > 0)
    }

    fn delete(&self, id: TaskId) -> Result<bool, StoreError> {
        let removed = self
            .conn
            .execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
        Ok(removed > 0)
    }

    fn delete_all(&self) -> Result<usize, StoreError> {
        Ok(self.conn.execute("DELETE FROM tasks", [])?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    fn new_task(owner: &str, subject: &str) -> NewTask {
        NewTask {
            owner: owner.to_string(),
            subject: subject.to_string(),
            size: 3,
            difficulty: Difficulty::new(6).unwrap(),
            due_date: date(20),
        }
    }

    #[test]
    fn insert_and_get_round_trip() {
        let db = SqliteStore::open_memory().unwrap();
        let ids = db.insert_many(&[new_task("amal", "Physics")]).unwrap();
        let task = db.get(ids[0]).unwrap().unwrap();
        assert_eq!(task.subject, "Physics");
        assert_eq!(task.size, 3);
        assert_eq!(task.difficulty.get(), 6);
        assert_eq!(task.due_date, date(20));
        assert!(!task.completed);
    }

    #[test]
    fn ids_follow_insertion_order() {
        let db = SqliteStore::open_memory().unwrap();
        let ids = db
            .insert_many(&[new_task("a", "one"), new_task("a", "two"), new_task("a", "three")])
            .unwrap();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
        let subjects: Vec<_> = db.list_all().unwrap().into_iter().map(|t| t.subject).collect();
        assert_eq!(subjects, vec!["one", "two", "three"]);
    }

    #[test]
    fn list_by_owner_filters() {
        let db = SqliteStore::open_memory().unwrap();
        db.insert_many(&[new_task("amal", "Math"), new_task("omar", "History")])
            .unwrap();
        let tasks = db.list_by_owner("omar").unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].subject, "History");
        assert!(db.list_by_owner("nobody").unwrap().is_empty());
    }

    #[test]
    fn completion_round_trips_as_boolean() {
        let db = SqliteStore::open_memory().unwrap();
        let id = db.insert_many(&[new_task("a", "Biology")]).unwrap()[0];
        assert!(db.update_completion(id, true).unwrap());
        assert!(db.get(id).unwrap().unwrap().completed);
        let raw: i64 = db
            .conn()
            .query_row("SELECT completed FROM tasks WHERE id = ?1", [id], |r| r.get(0))
            .unwrap();
        assert_eq!(raw, 1);
        db.update_completion(id, false).unwrap();
        assert!(!db.get(id).unwrap().unwrap().completed);
    }

    #[test]
    fn failed_batch_leaves_no_rows() {
        let db = SqliteStore::open_memory().unwrap();
        let mut bad = new_task("a", "broken");
        bad.size = 0; // violates CHECK (size >= 1)
        let result = db.insert_many(&[new_task("a", "fine"), bad]);
        assert!(result.is_err());
        assert!(db.list_all().unwrap().is_empty());
    }

    #[test]
    fn delete_and_delete_all() {
        let db = SqliteStore::open_memory().unwrap();
        let ids = db
            .insert_many(&[new_task("a", "x"), new_task("a", "y"), new_task("b", "z")])
            .unwrap();
        assert!(db.delete(ids[0]).unwrap());
        assert!(db.get(ids[0]).unwrap().is_none());
        assert!(!db.delete(ids[0]).unwrap());
        assert!(!db.update_completion(ids[0], true).unwrap());
        assert_eq!(db.delete_all().unwrap(), 2);
        assert!(db.list_all().unwrap().is_empty());
    }

    #[test]
    fn corrupt_date_is_reported() {
        let db = SqliteStore::open_memory().unwrap();
        db.conn()
            .execute(
                "INSERT INTO tasks (owner, subject, size, difficulty, due_date) VALUES ('a', 'b', 1, 5, 'next week')",
                [],
            )
            .unwrap();
        let err = db.list_all().unwrap_err();
        assert!(matches!(err, StoreError::CorruptRow { .. }));
    }
}
