//! PostgreSQL implementation of LivestreamRepository

use async_trait::async_trait;
use tracing::instrument;

use stream_core::entities::{Livestream, LivestreamTag, LivestreamViewer, NewLivestream};
use stream_core::traits::{LivestreamRepository, RepoResult};

use crate::models::{LivestreamModel, LivestreamTagModel};

use super::error::map_db_error;
use super::unit_of_work::PgUnitOfWork;

#[async_trait]
impl LivestreamRepository for PgUnitOfWork {
    #[instrument(skip(self))]
    async fn find_livestream(&mut self, id: i64) -> RepoResult<Option<Livestream>> {
        let result = sqlx::query_as::<_, LivestreamModel>(
            r#"
            SELECT id, user_id, title, description, playlist_url, thumbnail_url, start_at, end_at
            FROM livestreams
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Livestream::from))
    }

    #[instrument(skip(self), fields(count = ids.len()))]
    async fn find_livestreams_by_ids(&mut self, ids: &[i64]) -> RepoResult<Vec<Livestream>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let results = sqlx::query_as::<_, LivestreamModel>(
            r#"
            SELECT id, user_id, title, description, playlist_url, thumbnail_url, start_at, end_at
            FROM livestreams
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Livestream::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_livestreams_by_user(&mut self, user_id: i64) -> RepoResult<Vec<Livestream>> {
        let results = sqlx::query_as::<_, LivestreamModel>(
            r#"
            SELECT id, user_id, title, description, playlist_url, thumbnail_url, start_at, end_at
            FROM livestreams
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Livestream::from).collect())
    }

    #[instrument(skip(self))]
    async fn list_livestreams(&mut self, limit: Option<i64>) -> RepoResult<Vec<Livestream>> {
        // LIMIT NULL means no limit
        let results = sqlx::query_as::<_, LivestreamModel>(
            r#"
            SELECT id, user_id, title, description, playlist_url, thumbnail_url, start_at, end_at
            FROM livestreams
            ORDER BY id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Livestream::from).collect())
    }

    #[instrument(skip(self, livestream), fields(user_id = livestream.user_id))]
    async fn create_livestream(&mut self, livestream: &NewLivestream) -> RepoResult<i64> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO livestreams
                (user_id, title, description, playlist_url, thumbnail_url, start_at, end_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(livestream.user_id)
        .bind(&livestream.title)
        .bind(&livestream.description)
        .bind(&livestream.playlist_url)
        .bind(&livestream.thumbnail_url)
        .bind(livestream.start_at)
        .bind(livestream.end_at)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        Ok(id)
    }

    #[instrument(skip(self))]
    async fn find_livestream_tags(
        &mut self,
        livestream_id: i64,
    ) -> RepoResult<Vec<LivestreamTag>> {
        let results = sqlx::query_as::<_, LivestreamTagModel>(
            r#"
            SELECT id, livestream_id, tag_id
            FROM livestream_tags
            WHERE livestream_id = $1
            ORDER BY id
            "#,
        )
        .bind(livestream_id)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(LivestreamTag::from).collect())
    }

    #[instrument(skip(self), fields(count = livestream_ids.len()))]
    async fn find_livestream_tags_by_livestreams(
        &mut self,
        livestream_ids: &[i64],
    ) -> RepoResult<Vec<LivestreamTag>> {
        if livestream_ids.is_empty() {
            return Ok(Vec::new());
        }

        let results = sqlx::query_as::<_, LivestreamTagModel>(
            r#"
            SELECT id, livestream_id, tag_id
            FROM livestream_tags
            WHERE livestream_id = ANY($1)
            ORDER BY id
            "#,
        )
        .bind(livestream_ids)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(LivestreamTag::from).collect())
    }

    #[instrument(skip(self), fields(count = tag_ids.len()))]
    async fn find_livestream_tags_by_tags(
        &mut self,
        tag_ids: &[i64],
    ) -> RepoResult<Vec<LivestreamTag>> {
        if tag_ids.is_empty() {
            return Ok(Vec::new());
        }

        let results = sqlx::query_as::<_, LivestreamTagModel>(
            r#"
            SELECT id, livestream_id, tag_id
            FROM livestream_tags
            WHERE tag_id = ANY($1)
            ORDER BY livestream_id DESC
            "#,
        )
        .bind(tag_ids)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(LivestreamTag::from).collect())
    }

    #[instrument(skip(self))]
    async fn create_livestream_tag(&mut self, livestream_id: i64, tag_id: i64) -> RepoResult<()> {
        sqlx::query("INSERT INTO livestream_tags (livestream_id, tag_id) VALUES ($1, $2)")
            .bind(livestream_id)
            .bind(tag_id)
            .execute(&mut *self.tx)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn create_viewer(&mut self, viewer: &LivestreamViewer) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO livestream_viewers_history (user_id, livestream_id, created_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(viewer.user_id)
        .bind(viewer.livestream_id)
        .bind(viewer.created_at)
        .execute(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_viewer(&mut self, user_id: i64, livestream_id: i64) -> RepoResult<u64> {
        let result = sqlx::query(
            "DELETE FROM livestream_viewers_history WHERE user_id = $1 AND livestream_id = $2",
        )
        .bind(user_id)
        .bind(livestream_id)
        .execute(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}
