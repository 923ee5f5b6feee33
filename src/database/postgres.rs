//! Postgres store backend. Each store owns its table; the bootstrap DDL
//! runs at connect time so a fresh database is usable immediately.

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use super::models::{NewSchool, NewStudent, School, Student, User};
use super::{SchoolStore, StoreError, StudentStore, UserStore};

pub async fn connect_pool(url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(url)
        .await?;
    bootstrap(&pool).await?;
    Ok(pool)
}

async fn bootstrap(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS users (
            id UUID PRIMARY KEY,
            username TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS schools (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            address TEXT NOT NULL,
            director_name TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    // No foreign key on school_id: the reference crosses a service
    // boundary and deletes there must not cascade here.
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS students (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            genre TEXT NOT NULL,
            school_id BIGINT NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    Ok(())
}

pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash, created_at FROM users WHERE username = $1 LIMIT 1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn insert(&self, user: User) -> Result<(), StoreError> {
        let result = sqlx::query(
            "INSERT INTO users (id, username, password_hash, created_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            // Lost the race against a concurrent register
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(StoreError::Duplicate("username".to_string()))
            }
            Err(other) => Err(other.into()),
        }
    }
}

pub struct PgSchoolStore {
    pool: PgPool,
}

impl PgSchoolStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SchoolStore for PgSchoolStore {
    async fn list(&self) -> Result<Vec<School>, StoreError> {
        let rows = sqlx::query_as::<_, School>(
            "SELECT id, name, address, director_name FROM schools ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn get(&self, id: i64) -> Result<Option<School>, StoreError> {
        let row = sqlx::query_as::<_, School>(
            "SELECT id, name, address, director_name FROM schools WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn insert(&self, school: NewSchool) -> Result<School, StoreError> {
        let row = sqlx::query_as::<_, School>(
            "INSERT INTO schools (name, address, director_name) VALUES ($1, $2, $3)
             RETURNING id, name, address, director_name",
        )
        .bind(&school.name)
        .bind(&school.address)
        .bind(&school.director_name)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM schools WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

pub struct PgStudentStore {
    pool: PgPool,
}

impl PgStudentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StudentStore for PgStudentStore {
    async fn list(&self) -> Result<Vec<Student>, StoreError> {
        let rows = sqlx::query_as::<_, Student>(
            "SELECT id, name, genre, school_id FROM students ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn get(&self, id: &str) -> Result<Option<Student>, StoreError> {
        let row = sqlx::query_as::<_, Student>(
            "SELECT id, name, genre, school_id FROM students WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn insert(&self, student: NewStudent) -> Result<Student, StoreError> {
        let record = Student {
            id: Uuid::new_v4().to_string(),
            name: student.name,
            genre: student.genre,
            school_id: student.school_id,
        };
        sqlx::query("INSERT INTO students (id, name, genre, school_id) VALUES ($1, $2, $3, $4)")
            .bind(&record.id)
            .bind(&record.name)
            .bind(&record.genre)
            .bind(record.school_id)
            .execute(&self.pool)
            .await?;
        Ok(record)
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
