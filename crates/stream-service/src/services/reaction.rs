//! Reaction service
//!
//! Lists and posts emoji reactions on livestreams.

use stream_core::entities::NewReaction;
use stream_core::traits::{LivestreamRepository, ReactionRepository, UnitOfWork};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{ListReactionsQuery, PostReactionRequest, ReactionResponse};

use super::aggregator::aggregate_reactions;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::fetcher::fill_reaction;

/// Reaction service
pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    /// Create a new ReactionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Reactions on a livestream, newest first
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        livestream_id: i64,
        query: ListReactionsQuery,
    ) -> ServiceResult<Vec<ReactionResponse>> {
        query.validate()?;

        self.ctx
            .with_deadline("list_reactions", async move {
                let mut tx = self.ctx.begin().await?;
                let result = list_reactions(tx.as_mut(), livestream_id, query.limit).await;
                self.ctx.finish(tx, result).await
            })
            .await
    }

    /// Post a reaction as `user_id`
    #[instrument(skip(self, req), fields(emoji = %req.emoji_name))]
    pub async fn post(
        &self,
        user_id: i64,
        livestream_id: i64,
        req: PostReactionRequest,
    ) -> ServiceResult<ReactionResponse> {
        req.validate()?;

        let response = self
            .ctx
            .with_deadline("post_reaction", async move {
                let mut tx = self.ctx.begin().await?;
                let result = post_reaction(tx.as_mut(), user_id, livestream_id, req).await;
                self.ctx.finish(tx, result).await
            })
            .await?;

        info!(
            reaction_id = response.id,
            user_id,
            livestream_id,
            "Reaction posted"
        );
        Ok(response)
    }
}

async fn list_reactions(
    tx: &mut dyn UnitOfWork,
    livestream_id: i64,
    limit: Option<i64>,
) -> ServiceResult<Vec<ReactionResponse>> {
    let reactions = tx
        .find_reactions_by_livestream(livestream_id, limit)
        .await?;

    Ok(aggregate_reactions(tx, &reactions).await?)
}

async fn post_reaction(
    tx: &mut dyn UnitOfWork,
    user_id: i64,
    livestream_id: i64,
    req: PostReactionRequest,
) -> ServiceResult<ReactionResponse> {
    if tx.find_livestream(livestream_id).await?.is_none() {
        return Err(ServiceError::not_found("Livestream", livestream_id));
    }

    let reaction = NewReaction::now(user_id, livestream_id, req.emoji_name);
    let id = tx.create_reaction(&reaction).await?;

    Ok(fill_reaction(tx, reaction.into_reaction(id)).await?)
}
