//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use sqlx::PgPool;
use uuid::Uuid;

use platform::password::HashedPassword;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, phone::Phone};
use crate::error::AuthResult;

/// PostgreSQL-backed user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl UserRepository for PgUserRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO usuarios (
                id,
                nombre,
                email,
                password_hash,
                telefono,
                imagen_url,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(&user.nombre)
        .bind(user.email.as_str())
        .bind(user.password_hash.as_str())
        .bind(user.telefono.as_ref().map(|t| t.as_str()))
        .bind(&user.imagen_url)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, nombre, email, password_hash, telefono, imagen_url,
                   created_at, updated_at
            FROM usuarios
            WHERE id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserRow::into_user))
    }

    async fn find_by_email(&self, email: &str) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, nombre, email, password_hash, telefono, imagen_url,
                   created_at, updated_at
            FROM usuarios
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserRow::into_user))
    }

    async fn list(&self) -> AuthResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, nombre, email, password_hash, telefono, imagen_url,
                   created_at, updated_at
            FROM usuarios
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(UserRow::into_user).collect())
    }

    async fn exists_by_email(&self, email: &str, exclude: Option<&UserId>) -> AuthResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM usuarios
                WHERE email = $1 AND ($2::uuid IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(email)
        .bind(exclude.map(|id| *id.as_uuid()))
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn exists_by_phone(&self, phone: &str, exclude: Option<&UserId>) -> AuthResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM usuarios
                WHERE telefono = $1 AND ($2::uuid IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(phone)
        .bind(exclude.map(|id| *id.as_uuid()))
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        sqlx::query(
            r#"
            UPDATE usuarios SET
                nombre = $2,
                email = $3,
                password_hash = $4,
                telefono = $5,
                imagen_url = $6,
                updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(&user.nombre)
        .bind(user.email.as_str())
        .bind(user.password_hash.as_str())
        .bind(user.telefono.as_ref().map(|t| t.as_str()))
        .bind(&user.imagen_url)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_all(&self) -> AuthResult<u64> {
        let deleted = sqlx::query("DELETE FROM usuarios")
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    nombre: String,
    email: String,
    password_hash: String,
    telefono: Option<String>,
    imagen_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> User {
        User {
            user_id: UserId::from_uuid(self.id),
            nombre: self.nombre,
            email: Email::from_db(self.email),
            password_hash: HashedPassword::from_db(self.password_hash),
            telefono: self.telefono.map(Phone::from_db),
            imagen_url: self.imagen_url,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
