//! Retrospective tracking service.
//!
//! Retrospectives are named, dated records that collect participants and an
//! ordered list of feedback items. The [`service`] layer owns the business
//! rules, [`db`] persists records in SQLite, and [`api`] exposes everything
//! over HTTP.

pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod service;
