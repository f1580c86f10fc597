//! Report service
//!
//! Moderation reports filed against a livestream's comments. Only the
//! livestream owner may read them.

use stream_core::traits::{LivecommentRepository, LivestreamRepository, UnitOfWork};
use tracing::{instrument, warn};

use crate::dto::LivecommentReportResponse;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::fetcher::fill_report;

/// Report service
pub struct ReportService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReportService<'a> {
    /// Create a new ReportService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Reports on a livestream, readable by its owner only
    #[instrument(skip(self))]
    pub async fn list_for_livestream(
        &self,
        caller_id: i64,
        livestream_id: i64,
    ) -> ServiceResult<Vec<LivecommentReportResponse>> {
        self.ctx
            .with_deadline("list_reports", async move {
                let mut tx = self.ctx.begin().await?;
                let result = list_reports(tx.as_mut(), caller_id, livestream_id).await;
                self.ctx.finish(tx, result).await
            })
            .await
    }
}

async fn list_reports(
    tx: &mut dyn UnitOfWork,
    caller_id: i64,
    livestream_id: i64,
) -> ServiceResult<Vec<LivecommentReportResponse>> {
    let livestream = tx
        .find_livestream(livestream_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Livestream", livestream_id))?;

    if !livestream.is_owned_by(caller_id) {
        warn!(caller_id, owner_id = livestream.user_id, "Report access denied");
        return Err(ServiceError::permission_denied(
            "can't get other streamer's livecomment reports",
        ));
    }

    let reports = tx.find_reports_by_livestream(livestream_id).await?;
    let mut rendered = Vec::with_capacity(reports.len());
    for report in reports {
        rendered.push(fill_report(tx, report).await?);
    }
    Ok(rendered)
}
