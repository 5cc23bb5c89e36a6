//! Validation and orchestration behind the HTTP endpoints.
//!
//! Workflows talk only to a [`ManagementGateway`](crate::gateway::ManagementGateway)
//! and report problems as a [`Failure`](crate::error::Failure); they never build
//! error responses themselves.

pub mod accounts;
pub mod phone_numbers;
