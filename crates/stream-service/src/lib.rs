//! # stream-service
//!
//! Application layer: the reservation admission engine, the bulk response
//! aggregator, single-entity fetchers and the services composing them.

pub mod dto;
pub mod services;

pub use services::{
    LivestreamService, ReactionService, ReportService, ReservationService, ServiceContext,
    ServiceError, ServiceResult,
};
