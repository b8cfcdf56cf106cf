pub mod action;
pub mod advisor;
pub mod financials;
pub mod goal;
pub mod metrics;
pub mod policy;
pub mod profile;
pub mod trend;
pub mod user;
