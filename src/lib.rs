pub mod access;
pub mod catalog;
pub mod config;
pub mod eligibility;
pub mod engine;
pub mod error;
pub mod interventions;
pub mod output;
pub mod records;
pub mod regions;
pub mod server;
pub mod summary;
