//! Mock implementation of RecordStore for testing

use async_trait::async_trait;
use std::sync::Mutex;

use crate::error::StoreFailure;
use crate::records::{Company, NewCompany, RecordStore};

/// Mock implementation of RecordStore for testing.
///
/// Rows live in memory, every insert call is recorded, and the next list or
/// insert can be armed to fail with a given store failure.
pub struct MockRecordStore {
    rows: Mutex<Vec<Company>>,
    insert_calls: Mutex<Vec<NewCompany>>,
    fail_list: Mutex<Option<StoreFailure>>,
    fail_insert: Mutex<Option<StoreFailure>>,
}

impl MockRecordStore {
    /// Create a new mock record store
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            insert_calls: Mutex::new(Vec::new()),
            fail_list: Mutex::new(None),
            fail_insert: Mutex::new(None),
        }
    }

    /// Seed a row directly, bypassing the insert path
    pub fn push_row(&self, company: Company) {
        self.rows.lock().unwrap().push(company);
    }

    /// Snapshot of the stored rows
    pub fn rows(&self) -> Vec<Company> {
        self.rows.lock().unwrap().clone()
    }

    /// Number of stored rows
    pub fn row_count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    /// Every insert call made against this store, in order
    pub fn insert_calls(&self) -> Vec<NewCompany> {
        self.insert_calls.lock().unwrap().clone()
    }

    /// Make the next list call fail with the given failure
    pub fn fail_next_list(&self, failure: StoreFailure) {
        *self.fail_list.lock().unwrap() = Some(failure);
    }

    /// Make the next insert call fail with the given failure
    pub fn fail_next_insert(&self, failure: StoreFailure) {
        *self.fail_insert.lock().unwrap() = Some(failure);
    }

    /// Clear all rows and recorded calls
    pub fn clear(&self) {
        self.rows.lock().unwrap().clear();
        self.insert_calls.lock().unwrap().clear();
    }
}

impl Default for MockRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for MockRecordStore {
    async fn list_all(&self, _token: &str) -> Result<Vec<Company>, StoreFailure> {
        if let Some(failure) = self.fail_list.lock().unwrap().take() {
            return Err(failure);
        }
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn insert(
        &self,
        _token: &str,
        company: &NewCompany,
    ) -> Result<Vec<Company>, StoreFailure> {
        self.insert_calls.lock().unwrap().push(company.clone());

        if let Some(failure) = self.fail_insert.lock().unwrap().take() {
            return Err(failure);
        }

        let mut rows = self.rows.lock().unwrap();
        let inserted = Company {
            id: rows.len() as i64 + 1,
            name: company.name.clone(),
            logo_url: company.logo_url.clone(),
            created_at: None,
        };
        rows.push(inserted.clone());
        Ok(vec![inserted])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_company(name: &str) -> NewCompany {
        NewCompany {
            name: name.to_string(),
            logo_url: format!("http://assets.local/{}", name),
        }
    }

    #[actix_web::test]
    async fn test_insert_assigns_ids_and_records_calls() {
        let store = MockRecordStore::new();
        assert_eq!(store.row_count(), 0);

        let inserted = store.insert("token", &new_company("Acme")).await.unwrap();
        assert_eq!(inserted.len(), 1);
        assert_eq!(inserted[0].id, 1);

        let inserted = store.insert("token", &new_company("Globex")).await.unwrap();
        assert_eq!(inserted[0].id, 2);

        assert_eq!(store.row_count(), 2);
        let calls = store.insert_calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].name, "Acme");
        assert_eq!(calls[1].name, "Globex");
    }

    #[actix_web::test]
    async fn test_armed_failures_fire_once() {
        let store = MockRecordStore::new();

        store.fail_next_insert(StoreFailure::new("duplicate key", Some(409)));
        let err = store.insert("token", &new_company("Acme")).await.unwrap_err();
        assert_eq!(err.status, Some(409));
        assert_eq!(store.row_count(), 0);
        // The failed attempt is still recorded
        assert_eq!(store.insert_calls().len(), 1);

        // Failure is consumed, next insert succeeds
        assert!(store.insert("token", &new_company("Acme")).await.is_ok());

        store.fail_next_list(StoreFailure::transport("connection refused"));
        assert!(store.list_all("token").await.is_err());
        assert!(store.list_all("token").await.is_ok());
    }

    #[actix_web::test]
    async fn test_list_returns_seeded_rows() {
        let store = MockRecordStore::new();
        store.push_row(Company {
            id: 42,
            name: "Initech".to_string(),
            logo_url: "http://assets.local/initech".to_string(),
            created_at: None,
        });

        let rows = store.list_all("token").await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, 42);

        store.clear();
        assert!(store.list_all("token").await.unwrap().is_empty());
    }
}
