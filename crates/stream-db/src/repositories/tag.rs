//! PostgreSQL implementation of TagRepository

use async_trait::async_trait;
use tracing::instrument;

use stream_core::entities::Tag;
use stream_core::traits::{RepoResult, TagRepository};

use crate::models::TagModel;

use super::error::map_db_error;
use super::unit_of_work::PgUnitOfWork;

#[async_trait]
impl TagRepository for PgUnitOfWork {
    #[instrument(skip(self))]
    async fn find_tag(&mut self, id: i64) -> RepoResult<Option<Tag>> {
        let result = sqlx::query_as::<_, TagModel>("SELECT id, name FROM tags WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(Tag::from))
    }

    #[instrument(skip(self), fields(count = ids.len()))]
    async fn find_tags_by_ids(&mut self, ids: &[i64]) -> RepoResult<Vec<Tag>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let results =
            sqlx::query_as::<_, TagModel>("SELECT id, name FROM tags WHERE id = ANY($1)")
                .bind(ids)
                .fetch_all(&mut *self.tx)
                .await
                .map_err(map_db_error)?;

        Ok(results.into_iter().map(Tag::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_tag_ids_by_name(&mut self, name: &str) -> RepoResult<Vec<i64>> {
        let ids = sqlx::query_scalar::<_, i64>("SELECT id FROM tags WHERE name = $1")
            .bind(name)
            .fetch_all(&mut *self.tx)
            .await
            .map_err(map_db_error)?;

        Ok(ids)
    }
}
