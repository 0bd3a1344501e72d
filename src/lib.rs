//! Structure tracking and notification forwarding for EVE Online corporations.
//!
//! This crate synchronizes player-owned structures, corporation assets, and raw
//! game notifications from ESI per owning corporation, classifies and renders
//! notifications into Discord messages, delivers them to configured webhooks
//! with retry and rate-limit handling, derives fuel alerts and refueled events
//! from synced state, and exposes a health probe reflecting per-owner sync
//! liveness.

pub mod config;
pub mod constant;
pub mod controller;
pub mod data;
pub mod error;
pub mod esi;
pub mod model;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod worker;
