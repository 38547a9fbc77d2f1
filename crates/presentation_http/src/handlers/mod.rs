//! HTTP request handlers

pub mod agent;
pub mod health;
