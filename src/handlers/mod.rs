// src/handlers/mod.rs

pub mod analytics;
pub mod attempts;
pub mod auth;
pub mod quiz;
