//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use tracing::instrument;

use stream_core::entities::{Theme, User};
use stream_core::traits::{RepoResult, UserRepository};

use crate::models::{ThemeModel, UserModel};

use super::error::map_db_error;
use super::unit_of_work::PgUnitOfWork;

#[async_trait]
impl UserRepository for PgUnitOfWork {
    #[instrument(skip(self))]
    async fn find_user(&mut self, id: i64) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r#"
            SELECT id, name, display_name, description
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn find_user_by_name(&mut self, name: &str) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r#"
            SELECT id, name, display_name, description
            FROM users
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self), fields(count = ids.len()))]
    async fn find_users_by_ids(&mut self, ids: &[i64]) -> RepoResult<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let results = sqlx::query_as::<_, UserModel>(
            r#"
            SELECT id, name, display_name, description
            FROM users
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(User::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_theme_by_user(&mut self, user_id: i64) -> RepoResult<Option<Theme>> {
        let result = sqlx::query_as::<_, ThemeModel>(
            r#"
            SELECT id, user_id, dark_mode
            FROM themes
            WHERE user_id = $1
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Theme::from))
    }

    #[instrument(skip(self), fields(count = user_ids.len()))]
    async fn find_themes_by_users(&mut self, user_ids: &[i64]) -> RepoResult<Vec<Theme>> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        let results = sqlx::query_as::<_, ThemeModel>(
            r#"
            SELECT id, user_id, dark_mode
            FROM themes
            WHERE user_id = ANY($1)
            ORDER BY id
            "#,
        )
        .bind(user_ids)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Theme::from).collect())
    }
}
