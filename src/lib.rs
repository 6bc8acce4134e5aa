//! Core state engine for a recruiting-pipeline kanban board: ordered stage
//! columns of applicant cards, optimistic mutations reconciled against an
//! optional remote store, and the projections a board surface renders from.

pub mod board;
pub mod config;
pub mod error;
pub mod telemetry;
