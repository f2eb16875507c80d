//! Implements a SQLite backed category store.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row};

use crate::{
    models::{Category, CategoryName, DatabaseID, NewCategory},
    stores::CategoryStore,
    Error,
};

/// Stores categories in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteCategoryStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteCategoryStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn map_row(row: &Row) -> Result<Category, rusqlite::Error> {
        let id = row.get(0)?;
        let name = CategoryName::new_unchecked(row.get(1)?);
        let description = row.get(2)?;

        Ok(Category::new(id, name, description))
    }
}

impl CategoryStore for SQLiteCategoryStore {
    fn create(&mut self, new_category: NewCategory) -> Result<Category, Error> {
        let connection = self.connection.lock().unwrap();

        connection.execute(
            "INSERT INTO category (name, description) VALUES (?1, ?2)",
            (new_category.name.as_ref(), &new_category.description),
        )?;

        let id = connection.last_insert_rowid();

        Ok(Category::new(
            id,
            new_category.name,
            new_category.description,
        ))
    }

    fn get(&self, id: DatabaseID) -> Result<Category, Error> {
        let category = self
            .connection
            .lock()
            .unwrap()
            .prepare("SELECT id, name, description FROM category WHERE id = :id")?
            .query_row(&[(":id", &id)], Self::map_row)?;

        Ok(category)
    }

    fn get_all(&self) -> Result<Vec<Category>, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare("SELECT id, name, description FROM category")?
            .query_map((), Self::map_row)?
            .map(|maybe_category| maybe_category.map_err(Error::from))
            .collect()
    }

    fn update(&mut self, id: DatabaseID, category: NewCategory) -> Result<Category, Error> {
        let rows_updated = self.connection.lock().unwrap().execute(
            "UPDATE category SET name = ?1, description = ?2 WHERE id = ?3",
            (category.name.as_ref(), &category.description, id),
        )?;

        if rows_updated == 0 {
            return Err(Error::NotFound);
        }

        Ok(Category::new(id, category.name, category.description))
    }

    fn delete(&mut self, id: DatabaseID) -> Result<(), Error> {
        let rows_deleted = self
            .connection
            .lock()
            .unwrap()
            .execute("DELETE FROM category WHERE id = ?1", (id,))?;

        if rows_deleted == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }
}
