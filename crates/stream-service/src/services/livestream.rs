//! Livestream service
//!
//! Read paths for livestreams and viewer presence tracking.

use std::collections::HashMap;

use chrono::Utc;
use stream_core::entities::{Livestream, LivestreamViewer};
use stream_core::traits::{LivestreamRepository, TagRepository, UnitOfWork, UserRepository};
use stream_core::DomainError;
use tracing::{debug, info, instrument};
use validator::Validate;

use crate::dto::{LivestreamResponse, SearchLivestreamsQuery};

use super::aggregator::{aggregate_livestreams, distinct};
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::fetcher::{dangling, fill_livestream};

/// Livestream service
pub struct LivestreamService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> LivestreamService<'a> {
    /// Create a new LivestreamService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Get a single livestream
    #[instrument(skip(self))]
    pub async fn get(&self, livestream_id: i64) -> ServiceResult<LivestreamResponse> {
        self.ctx
            .with_deadline("get_livestream", async move {
                let mut tx = self.ctx.begin().await?;
                let result = get_livestream(tx.as_mut(), livestream_id).await;
                self.ctx.finish(tx, result).await
            })
            .await
    }

    /// Search livestreams, newest first.
    ///
    /// With a tag, every livestream carrying a tag of that name is returned
    /// and the limit is ignored.
    #[instrument(skip(self))]
    pub async fn search(
        &self,
        query: SearchLivestreamsQuery,
    ) -> ServiceResult<Vec<LivestreamResponse>> {
        query.validate()?;

        self.ctx
            .with_deadline("search_livestreams", async move {
                let mut tx = self.ctx.begin().await?;
                let result = search_livestreams(tx.as_mut(), query).await;
                self.ctx.finish(tx, result).await
            })
            .await
    }

    /// Livestreams owned by the caller
    #[instrument(skip(self))]
    pub async fn list_mine(&self, user_id: i64) -> ServiceResult<Vec<LivestreamResponse>> {
        self.ctx
            .with_deadline("list_my_livestreams", async move {
                let mut tx = self.ctx.begin().await?;
                let result = list_owned(tx.as_mut(), user_id).await;
                self.ctx.finish(tx, result).await
            })
            .await
    }

    /// Livestreams owned by the user with this name
    #[instrument(skip(self))]
    pub async fn list_by_user(&self, username: &str) -> ServiceResult<Vec<LivestreamResponse>> {
        self.ctx
            .with_deadline("list_user_livestreams", async move {
                let mut tx = self.ctx.begin().await?;
                let result = list_by_username(tx.as_mut(), username).await;
                self.ctx.finish(tx, result).await
            })
            .await
    }

    /// Record that `user_id` started watching a livestream
    #[instrument(skip(self))]
    pub async fn enter(&self, user_id: i64, livestream_id: i64) -> ServiceResult<()> {
        self.ctx
            .with_deadline("enter_livestream", async move {
                let mut tx = self.ctx.begin().await?;
                let result = record_viewer(tx.as_mut(), user_id, livestream_id).await;
                self.ctx.finish(tx, result).await
            })
            .await?;

        info!(user_id, livestream_id, "Viewer entered");
        Ok(())
    }

    /// Remove `user_id`'s viewing records for a livestream
    #[instrument(skip(self))]
    pub async fn exit(&self, user_id: i64, livestream_id: i64) -> ServiceResult<()> {
        let removed = self
            .ctx
            .with_deadline("exit_livestream", async move {
                let mut tx = self.ctx.begin().await?;
                let result = tx
                    .delete_viewer(user_id, livestream_id)
                    .await
                    .map_err(ServiceError::from);
                self.ctx.finish(tx, result).await
            })
            .await?;

        info!(user_id, livestream_id, removed, "Viewer exited");
        Ok(())
    }
}

async fn get_livestream(
    tx: &mut dyn UnitOfWork,
    livestream_id: i64,
) -> ServiceResult<LivestreamResponse> {
    let livestream = tx
        .find_livestream(livestream_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Livestream", livestream_id))?;

    Ok(fill_livestream(tx, livestream).await?)
}

async fn search_livestreams(
    tx: &mut dyn UnitOfWork,
    query: SearchLivestreamsQuery,
) -> ServiceResult<Vec<LivestreamResponse>> {
    let livestreams = match query.tag {
        Some(tag_name) => {
            let tag_ids = tx.find_tag_ids_by_name(&tag_name).await?;
            let links = tx.find_livestream_tags_by_tags(&tag_ids).await?;
            let livestream_ids = distinct(links.iter().map(|link| link.livestream_id));
            debug!(tag = %tag_name, matches = livestream_ids.len(), "Tag search");

            let rows = tx.find_livestreams_by_ids(&livestream_ids).await?;
            order_by_ids(rows, &livestream_ids)?
        }
        None => tx.list_livestreams(query.limit).await?,
    };

    render_in_order(tx, livestreams).await
}

async fn list_owned(
    tx: &mut dyn UnitOfWork,
    user_id: i64,
) -> ServiceResult<Vec<LivestreamResponse>> {
    let livestreams = tx.find_livestreams_by_user(user_id).await?;
    render_in_order(tx, livestreams).await
}

async fn list_by_username(
    tx: &mut dyn UnitOfWork,
    username: &str,
) -> ServiceResult<Vec<LivestreamResponse>> {
    let user = tx
        .find_user_by_name(username)
        .await?
        .ok_or_else(|| ServiceError::not_found("User", username))?;

    list_owned(tx, user.id).await
}

async fn record_viewer(
    tx: &mut dyn UnitOfWork,
    user_id: i64,
    livestream_id: i64,
) -> ServiceResult<()> {
    if tx.find_livestream(livestream_id).await?.is_none() {
        return Err(ServiceError::not_found("Livestream", livestream_id));
    }

    tx.create_viewer(&LivestreamViewer {
        user_id,
        livestream_id,
        created_at: Utc::now().timestamp(),
    })
    .await?;
    Ok(())
}

/// Arrange bulk-loaded rows in the order of `ids`
fn order_by_ids(rows: Vec<Livestream>, ids: &[i64]) -> Result<Vec<Livestream>, DomainError> {
    let mut by_id: HashMap<i64, Livestream> =
        rows.into_iter().map(|l| (l.id, l)).collect();

    ids.iter()
        .map(|id| by_id.remove(id).ok_or_else(|| dangling("livestream", *id)))
        .collect()
}

/// Aggregate and re-project in the order of `livestreams`
async fn render_in_order(
    tx: &mut dyn UnitOfWork,
    livestreams: Vec<Livestream>,
) -> ServiceResult<Vec<LivestreamResponse>> {
    let mut rendered = aggregate_livestreams(tx, &livestreams).await?;

    livestreams
        .iter()
        .map(|livestream| {
            rendered.remove(&livestream.id).ok_or_else(|| {
                ServiceError::internal(format!("livestream {} not rendered", livestream.id))
            })
        })
        .collect()
}
