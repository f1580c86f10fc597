//! PostgreSQL implementation of LivecommentRepository

use async_trait::async_trait;
use tracing::instrument;

use stream_core::entities::{Livecomment, LivecommentReport};
use stream_core::traits::{LivecommentRepository, RepoResult};

use crate::models::{LivecommentModel, LivecommentReportModel};

use super::error::map_db_error;
use super::unit_of_work::PgUnitOfWork;

#[async_trait]
impl LivecommentRepository for PgUnitOfWork {
    #[instrument(skip(self))]
    async fn find_livecomment(&mut self, id: i64) -> RepoResult<Option<Livecomment>> {
        let result = sqlx::query_as::<_, LivecommentModel>(
            r#"
            SELECT id, user_id, livestream_id, comment, tip, created_at
            FROM livecomments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Livecomment::from))
    }

    #[instrument(skip(self))]
    async fn find_reports_by_livestream(
        &mut self,
        livestream_id: i64,
    ) -> RepoResult<Vec<LivecommentReport>> {
        let results = sqlx::query_as::<_, LivecommentReportModel>(
            r#"
            SELECT id, user_id, livestream_id, livecomment_id, created_at
            FROM livecomment_reports
            WHERE livestream_id = $1
            ORDER BY id
            "#,
        )
        .bind(livestream_id)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(LivecommentReport::from).collect())
    }
}
