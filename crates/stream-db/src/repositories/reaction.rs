//! PostgreSQL implementation of ReactionRepository

use async_trait::async_trait;
use tracing::instrument;

use stream_core::entities::{NewReaction, Reaction};
use stream_core::traits::{ReactionRepository, RepoResult};

use crate::models::ReactionModel;

use super::error::map_db_error;
use super::unit_of_work::PgUnitOfWork;

#[async_trait]
impl ReactionRepository for PgUnitOfWork {
    #[instrument(skip(self))]
    async fn find_reactions_by_livestream(
        &mut self,
        livestream_id: i64,
        limit: Option<i64>,
    ) -> RepoResult<Vec<Reaction>> {
        let results = sqlx::query_as::<_, ReactionModel>(
            r#"
            SELECT id, emoji_name, user_id, livestream_id, created_at
            FROM reactions
            WHERE livestream_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(livestream_id)
        .bind(limit)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Reaction::from).collect())
    }

    #[instrument(skip(self, reaction), fields(livestream_id = reaction.livestream_id))]
    async fn create_reaction(&mut self, reaction: &NewReaction) -> RepoResult<i64> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO reactions (user_id, livestream_id, emoji_name, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(reaction.user_id)
        .bind(reaction.livestream_id)
        .bind(&reaction.emoji_name)
        .bind(reaction.created_at)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        Ok(id)
    }
}
