use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use barista_core::{BaristaError, Drink, RecipePart, Result};

/// Drink menu store. A single connection guarded by a mutex is plenty for
/// this workload; WAL mode keeps concurrent readers from blocking.
pub struct MenuStore {
    db: Arc<Mutex<Connection>>,
}

impl MenuStore {
    /// Open or create the menu database at the given path.
    pub fn open(path: &Path) -> Result<Self> {
        info!(?path, "opening menu store");

        let conn = Connection::open(path)
            .map_err(|e| BaristaError::Menu(e.to_string()))?;

        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")
            .map_err(|e| BaristaError::Menu(e.to_string()))?;

        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS drinks (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL UNIQUE,
                recipe TEXT NOT NULL
            );
            ",
        )
        .map_err(|e| BaristaError::Menu(e.to_string()))?;

        Ok(Self {
            db: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an in-memory database (for tests).
    pub fn open_in_memory() -> Result<Self> {
        Self::open(Path::new(":memory:"))
    }

    /// All drinks on the menu, ordered by id.
    pub fn list(&self) -> Result<Vec<Drink>> {
        let db = self.db.lock();
        let mut stmt = db
            .prepare("SELECT id, title, recipe FROM drinks ORDER BY id")
            .map_err(|e| BaristaError::Menu(e.to_string()))?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })
            .map_err(|e| BaristaError::Menu(e.to_string()))?;

        let mut drinks = Vec::new();
        for row in rows {
            let (id, title, recipe_json) = row.map_err(|e| BaristaError::Menu(e.to_string()))?;
            drinks.push(Drink {
                id,
                title,
                recipe: parse_recipe_json(&recipe_json)?,
            });
        }
        Ok(drinks)
    }

    /// Fetch a single drink by id.
    pub fn get(&self, id: i64) -> Result<Drink> {
        let db = self.db.lock();
        let row = db
            .query_row(
                "SELECT title, recipe FROM drinks WHERE id = ?1",
                params![id],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
            )
            .optional()
            .map_err(|e| BaristaError::Menu(e.to_string()))?;

        match row {
            Some((title, recipe_json)) => Ok(Drink {
                id,
                title,
                recipe: parse_recipe_json(&recipe_json)?,
            }),
            None => Err(BaristaError::DrinkNotFound(id)),
        }
    }

    /// Add a drink. Titles are unique; duplicates are unprocessable.
    pub fn create(&self, title: &str, recipe: Vec<RecipePart>) -> Result<Drink> {
        let recipe_json =
            serde_json::to_string(&recipe).map_err(BaristaError::Serialization)?;
        let db = self.db.lock();
        db.execute(
            "INSERT INTO drinks (title, recipe) VALUES (?1, ?2)",
            params![title, recipe_json],
        )
        .map_err(|e| match e {
            rusqlite::Error::SqliteFailure(err, _)
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                BaristaError::Unprocessable(format!("drink '{title}' already exists"))
            }
            other => BaristaError::Menu(other.to_string()),
        })?;
        let id = db.last_insert_rowid();
        info!(id, title, "drink created");
        Ok(Drink {
            id,
            title: title.to_string(),
            recipe,
        })
    }

    /// Update a drink's title and/or recipe. At least one change must be
    /// supplied; the caller enforces that before reaching the store.
    pub fn update(
        &self,
        id: i64,
        title: Option<&str>,
        recipe: Option<Vec<RecipePart>>,
    ) -> Result<Drink> {
        let mut drink = self.get(id)?;
        if let Some(title) = title {
            drink.title = title.to_string();
        }
        if let Some(recipe) = recipe {
            drink.recipe = recipe;
        }

        let recipe_json =
            serde_json::to_string(&drink.recipe).map_err(BaristaError::Serialization)?;
        let db = self.db.lock();
        db.execute(
            "UPDATE drinks SET title = ?1, recipe = ?2 WHERE id = ?3",
            params![drink.title, recipe_json, id],
        )
        .map_err(|e| match e {
            rusqlite::Error::SqliteFailure(err, _)
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                BaristaError::Unprocessable(format!("drink '{}' already exists", drink.title))
            }
            other => BaristaError::Menu(other.to_string()),
        })?;
        info!(id, "drink updated");
        Ok(drink)
    }

    /// Remove a drink by id.
    pub fn delete(&self, id: i64) -> Result<()> {
        let db = self.db.lock();
        let affected = db
            .execute("DELETE FROM drinks WHERE id = ?1", params![id])
            .map_err(|e| BaristaError::Menu(e.to_string()))?;
        if affected == 0 {
            return Err(BaristaError::DrinkNotFound(id));
        }
        info!(id, "drink deleted");
        Ok(())
    }
}

fn parse_recipe_json(raw: &str) -> Result<Vec<RecipePart>> {
    serde_json::from_str(raw)
        .map_err(|e| BaristaError::Menu(format!("corrupt recipe row: {e}")))
}
