//! Entity fetchers - single-entity read paths
//!
//! Each function resolves the nested references of one row with one query per
//! referenced entity. Listing paths must use [`super::aggregator`] instead.

use stream_core::entities::{Livecomment, LivecommentReport, Livestream, Reaction, User};
use stream_core::traits::{
    LivecommentRepository, LivestreamRepository, TagRepository, UnitOfWork, UserRepository,
};
use stream_core::DomainError;
use tracing::{error, instrument};

use crate::dto::{
    LivecommentReportResponse, LivecommentResponse, LivecommentWithDetails, LivestreamResponse,
    LivestreamWithDetails, ReactionResponse, ReactionWithDetails, ReportWithDetails, TagResponse,
    UserResponse, UserWithTheme,
};

/// Build a dangling reference error and log it; a miss means stored rows
/// violate referential integrity.
pub(crate) fn dangling(entity: &'static str, id: i64) -> DomainError {
    error!(entity, id, "Dangling reference");
    DomainError::dangling(entity, id)
}

/// Render a user row with its theme
#[instrument(skip_all, fields(user_id = user.id))]
pub async fn fill_user(
    tx: &mut dyn UnitOfWork,
    user: User,
) -> Result<UserResponse, DomainError> {
    let theme = tx
        .find_theme_by_user(user.id)
        .await?
        .ok_or_else(|| dangling("theme", user.id))?;

    Ok(UserWithTheme { user, theme }.into())
}

/// Load and render a referenced user
pub async fn fetch_user(tx: &mut dyn UnitOfWork, user_id: i64) -> Result<UserResponse, DomainError> {
    let user = tx
        .find_user(user_id)
        .await?
        .ok_or_else(|| dangling("user", user_id))?;
    fill_user(tx, user).await
}

/// Render a livestream row with its owner and tags
#[instrument(skip_all, fields(livestream_id = livestream.id))]
pub async fn fill_livestream(
    tx: &mut dyn UnitOfWork,
    livestream: Livestream,
) -> Result<LivestreamResponse, DomainError> {
    let owner = fetch_user(tx, livestream.user_id).await?;

    let links = tx.find_livestream_tags(livestream.id).await?;
    let mut tags = Vec::with_capacity(links.len());
    for link in links {
        let tag = tx
            .find_tag(link.tag_id)
            .await?
            .ok_or_else(|| dangling("tag", link.tag_id))?;
        tags.push(TagResponse::from(tag));
    }

    Ok(LivestreamWithDetails {
        livestream,
        owner,
        tags,
    }
    .into())
}

/// Load and render a referenced livestream
pub async fn fetch_livestream(
    tx: &mut dyn UnitOfWork,
    livestream_id: i64,
) -> Result<LivestreamResponse, DomainError> {
    let livestream = tx
        .find_livestream(livestream_id)
        .await?
        .ok_or_else(|| dangling("livestream", livestream_id))?;
    fill_livestream(tx, livestream).await
}

/// Render a reaction row with its user and livestream
#[instrument(skip_all, fields(reaction_id = reaction.id))]
pub async fn fill_reaction(
    tx: &mut dyn UnitOfWork,
    reaction: Reaction,
) -> Result<ReactionResponse, DomainError> {
    let user = fetch_user(tx, reaction.user_id).await?;
    let livestream = fetch_livestream(tx, reaction.livestream_id).await?;

    Ok(ReactionWithDetails {
        reaction,
        user,
        livestream,
    }
    .into())
}

/// Render a livecomment row with its author and livestream
pub async fn fill_livecomment(
    tx: &mut dyn UnitOfWork,
    livecomment: Livecomment,
) -> Result<LivecommentResponse, DomainError> {
    let user = fetch_user(tx, livecomment.user_id).await?;
    let livestream = fetch_livestream(tx, livecomment.livestream_id).await?;

    Ok(LivecommentWithDetails {
        livecomment,
        user,
        livestream,
    }
    .into())
}

/// Render a moderation report with its reporter and livecomment
#[instrument(skip_all, fields(report_id = report.id))]
pub async fn fill_report(
    tx: &mut dyn UnitOfWork,
    report: LivecommentReport,
) -> Result<LivecommentReportResponse, DomainError> {
    let reporter = fetch_user(tx, report.user_id).await?;
    let livecomment = tx
        .find_livecomment(report.livecomment_id)
        .await?
        .ok_or_else(|| dangling("livecomment", report.livecomment_id))?;
    let livecomment = fill_livecomment(tx, livecomment).await?;

    Ok(ReportWithDetails {
        report,
        reporter,
        livecomment,
    }
    .into())
}
