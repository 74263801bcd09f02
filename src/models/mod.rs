//! Data models module
//!
//! Defines call results and exploration report structures

pub mod response;

pub use response::{
    ApiResponse, CategoryReport, EndpointResult, ExplorationReport, ExplorationSummary,
    SingleExploration,
};
