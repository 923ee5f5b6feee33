//! In-memory store backend. Used by the test suite and as the dev-mode
//! fallback when no database is configured. Mirrors the semantics the
//! postgres backend gets from its schema: unique usernames, sequential
//! school ids, opaque student ids, idempotent deletes.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use super::models::{NewSchool, NewStudent, School, Student, User};
use super::{SchoolStore, StoreError, StudentStore, UserStore};

#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<String, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().expect("user store lock poisoned");
        Ok(users.get(username).cloned())
    }

    async fn insert(&self, user: User) -> Result<(), StoreError> {
        let mut users = self.users.write().expect("user store lock poisoned");
        if users.contains_key(&user.username) {
            return Err(StoreError::Duplicate("username".to_string()));
        }
        users.insert(user.username.clone(), user);
        Ok(())
    }
}

pub struct MemorySchoolStore {
    next_id: AtomicI64,
    rows: RwLock<BTreeMap<i64, School>>,
}

impl MemorySchoolStore {
    pub fn new() -> Self {
        Self {
            next_id: AtomicI64::new(1),
            rows: RwLock::new(BTreeMap::new()),
        }
    }
}

impl Default for MemorySchoolStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SchoolStore for MemorySchoolStore {
    async fn list(&self) -> Result<Vec<School>, StoreError> {
        let rows = self.rows.read().expect("school store lock poisoned");
        Ok(rows.values().cloned().collect())
    }

    async fn get(&self, id: i64) -> Result<Option<School>, StoreError> {
        let rows = self.rows.read().expect("school store lock poisoned");
        Ok(rows.get(&id).cloned())
    }

    async fn insert(&self, school: NewSchool) -> Result<School, StoreError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let row = School {
            id,
            name: school.name,
            address: school.address,
            director_name: school.director_name,
        };
        let mut rows = self.rows.write().expect("school store lock poisoned");
        rows.insert(id, row.clone());
        Ok(row)
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let mut rows = self.rows.write().expect("school store lock poisoned");
        rows.remove(&id);
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryStudentStore {
    rows: RwLock<BTreeMap<String, Student>>,
}

impl MemoryStudentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StudentStore for MemoryStudentStore {
    async fn list(&self) -> Result<Vec<Student>, StoreError> {
        let rows = self.rows.read().expect("student store lock poisoned");
        Ok(rows.values().cloned().collect())
    }

    async fn get(&self, id: &str) -> Result<Option<Student>, StoreError> {
        let rows = self.rows.read().expect("student store lock poisoned");
        Ok(rows.get(id).cloned())
    }

    async fn insert(&self, student: NewStudent) -> Result<Student, StoreError> {
        let record = Student {
            id: Uuid::new_v4().to_string(),
            name: student.name,
            genre: student.genre,
            school_id: student.school_id,
        };
        let mut rows = self.rows.write().expect("student store lock poisoned");
        rows.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut rows = self.rows.write().expect("student store lock poisoned");
        rows.remove(id);
        Ok(())
    }
}
