//! Bulk aggregator
//!
//! Resolves the references of N rows with one set-membership query per
//! referenced entity type, then re-associates in memory. The number of
//! queries does not depend on N:
//!
//! | input        | queries (at most)                            |
//! |--------------|----------------------------------------------|
//! | users        | users, themes                                |
//! | livestreams  | users, themes, livestream_tags, tags         |
//! | reactions    | users, themes, livestreams + livestreams' 4  |
//!
//! Empty input issues no query at all.

use std::collections::{HashMap, HashSet};

use stream_core::entities::{Livestream, Reaction, Tag, Theme};
use stream_core::traits::{LivestreamRepository, TagRepository, UnitOfWork, UserRepository};
use stream_core::DomainError;
use tracing::{debug, instrument};

use crate::dto::{
    LivestreamResponse, LivestreamWithDetails, ReactionResponse, ReactionWithDetails,
    TagResponse, UserResponse, UserWithTheme,
};

use super::fetcher::dangling;

/// Deduplicate ids, keeping first-occurrence order
pub(crate) fn distinct(ids: impl IntoIterator<Item = i64>) -> Vec<i64> {
    let mut seen = HashSet::new();
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}

/// Render every user in `user_ids` keyed by id.
///
/// Ids with no user row are absent from the result; callers decide whether
/// that is a dangling reference.
#[instrument(skip_all, fields(count = user_ids.len()))]
pub async fn aggregate_users(
    tx: &mut dyn UnitOfWork,
    user_ids: &[i64],
) -> Result<HashMap<i64, UserResponse>, DomainError> {
    let ids = distinct(user_ids.iter().copied());
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let users = tx.find_users_by_ids(&ids).await?;

    let mut themes: HashMap<i64, Theme> = HashMap::with_capacity(ids.len());
    // Rows arrive by theme id; keep the first like the single lookup does
    for theme in tx.find_themes_by_users(&ids).await? {
        themes.entry(theme.user_id).or_insert(theme);
    }

    let mut rendered = HashMap::with_capacity(users.len());
    for user in users {
        let theme = themes
            .remove(&user.id)
            .ok_or_else(|| dangling("theme", user.id))?;
        rendered.insert(user.id, UserWithTheme { user, theme }.into());
    }

    Ok(rendered)
}

/// Render livestreams with owner and tags, keyed by livestream id.
///
/// A livestream without tag rows gets an empty tag list. Callers needing
/// their original order re-project through the returned map.
#[instrument(skip_all, fields(count = livestreams.len()))]
pub async fn aggregate_livestreams(
    tx: &mut dyn UnitOfWork,
    livestreams: &[Livestream],
) -> Result<HashMap<i64, LivestreamResponse>, DomainError> {
    if livestreams.is_empty() {
        return Ok(HashMap::new());
    }

    let owner_ids = distinct(livestreams.iter().map(|l| l.user_id));
    let livestream_ids = distinct(livestreams.iter().map(|l| l.id));

    let owners = aggregate_users(tx, &owner_ids).await?;

    let links = tx
        .find_livestream_tags_by_livestreams(&livestream_ids)
        .await?;

    let tag_ids = distinct(links.iter().map(|link| link.tag_id));
    let tags: HashMap<i64, Tag> = if tag_ids.is_empty() {
        HashMap::new()
    } else {
        tx.find_tags_by_ids(&tag_ids)
            .await?
            .into_iter()
            .map(|tag| (tag.id, tag))
            .collect()
    };

    let mut tags_by_livestream: HashMap<i64, Vec<TagResponse>> = HashMap::new();
    for link in &links {
        let tag = tags
            .get(&link.tag_id)
            .ok_or_else(|| dangling("tag", link.tag_id))?;
        tags_by_livestream
            .entry(link.livestream_id)
            .or_default()
            .push(TagResponse::from(tag));
    }

    let mut rendered = HashMap::with_capacity(livestreams.len());
    for livestream in livestreams {
        let owner = owners
            .get(&livestream.user_id)
            .cloned()
            .ok_or_else(|| dangling("user", livestream.user_id))?;
        let tags = tags_by_livestream
            .get(&livestream.id)
            .cloned()
            .unwrap_or_default();

        rendered.insert(
            livestream.id,
            LivestreamWithDetails {
                livestream: livestream.clone(),
                owner,
                tags,
            }
            .into(),
        );
    }

    debug!(
        livestreams = rendered.len(),
        owners = owner_ids.len(),
        tags = tag_ids.len(),
        "Aggregated livestreams"
    );
    Ok(rendered)
}

/// Render reactions with user and livestream, in input order
#[instrument(skip_all, fields(count = reactions.len()))]
pub async fn aggregate_reactions(
    tx: &mut dyn UnitOfWork,
    reactions: &[Reaction],
) -> Result<Vec<ReactionResponse>, DomainError> {
    if reactions.is_empty() {
        return Ok(Vec::new());
    }

    let user_ids = distinct(reactions.iter().map(|r| r.user_id));
    let livestream_ids = distinct(reactions.iter().map(|r| r.livestream_id));

    let users = aggregate_users(tx, &user_ids).await?;
    let livestream_rows = tx.find_livestreams_by_ids(&livestream_ids).await?;
    let livestreams = aggregate_livestreams(tx, &livestream_rows).await?;

    reactions
        .iter()
        .map(|reaction| -> Result<ReactionResponse, DomainError> {
            let user = users
                .get(&reaction.user_id)
                .cloned()
                .ok_or_else(|| dangling("user", reaction.user_id))?;
            let livestream = livestreams
                .get(&reaction.livestream_id)
                .cloned()
                .ok_or_else(|| dangling("livestream", reaction.livestream_id))?;

            Ok(ReactionWithDetails {
                reaction: reaction.clone(),
                user,
                livestream,
            }
            .into())
        })
        .collect()
}
