pub mod action_service;
pub mod advisor_service;
pub mod goal_coverage_service;
pub mod history_service;
pub mod metrics_service;
pub mod normalization_service;
pub mod protection_service;
pub mod ratio_service;
pub mod retirement_service;
pub mod totals_service;
