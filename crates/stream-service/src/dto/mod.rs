//! Data transfer objects for requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for service inputs
//! - Response DTOs whose JSON shape existing clients depend on
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

// Re-export commonly used request types
pub use requests::{
    ListReactionsQuery, PostReactionRequest, ReserveLivestreamRequest, SearchLivestreamsQuery,
};

// Re-export commonly used response types
pub use responses::{
    LivecommentReportResponse, LivecommentResponse, LivestreamResponse, ReactionResponse,
    TagResponse, ThemeResponse, UserResponse,
};

// Re-export mapper helper structs
pub use mappers::{
    LivecommentWithDetails, LivestreamWithDetails, ReactionWithDetails, ReportWithDetails,
    UserWithTheme,
};
