use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

pub mod memory;
pub mod models;
pub mod postgres;

use models::{NewSchool, NewStudent, School, Student, User};

use crate::config::DatabaseConfig;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("duplicate {0}")]
    Duplicate(String),
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;
    /// Fails with `StoreError::Duplicate` if the username is taken.
    async fn insert(&self, user: User) -> Result<(), StoreError>;
}

#[async_trait]
pub trait SchoolStore: Send + Sync {
    async fn list(&self) -> Result<Vec<School>, StoreError>;
    async fn get(&self, id: i64) -> Result<Option<School>, StoreError>;
    /// Assigns the next sequential id.
    async fn insert(&self, school: NewSchool) -> Result<School, StoreError>;
    /// Idempotent: deleting an absent row is not an error.
    async fn delete(&self, id: i64) -> Result<(), StoreError>;
}

#[async_trait]
pub trait StudentStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Student>, StoreError>;
    async fn get(&self, id: &str) -> Result<Option<Student>, StoreError>;
    /// Assigns an opaque string id.
    async fn insert(&self, student: NewStudent) -> Result<Student, StoreError>;
    /// Idempotent: deleting an absent record is not an error.
    async fn delete(&self, id: &str) -> Result<(), StoreError>;
}

/// The three per-service stores. Each is owned exclusively by its
/// service surface; nothing here is shared between them.
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub schools: Arc<dyn SchoolStore>,
    pub students: Arc<dyn StudentStore>,
}

impl Stores {
    /// Postgres-backed stores when a database URL is configured,
    /// otherwise the in-memory backend.
    pub async fn connect(config: &DatabaseConfig) -> anyhow::Result<Self> {
        match &config.url {
            Some(url) => {
                let pool = postgres::connect_pool(url, config.max_connections).await?;
                tracing::info!("using postgres store backend");
                Ok(Self {
                    users: Arc::new(postgres::PgUserStore::new(pool.clone())),
                    schools: Arc::new(postgres::PgSchoolStore::new(pool.clone())),
                    students: Arc::new(postgres::PgStudentStore::new(pool)),
                })
            }
            None => {
                tracing::warn!("DATABASE_URL not set, using in-memory store backend");
                Ok(Self::in_memory())
            }
        }
    }

    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(memory::MemoryUserStore::new()),
            schools: Arc::new(memory::MemorySchoolStore::new()),
            students: Arc::new(memory::MemoryStudentStore::new()),
        }
    }
}
