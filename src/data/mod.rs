//! Repository layer: all database access behind typed methods.
//!
//! Repositories are generic over [`sea_orm::ConnectionTrait`] so the same
//! methods work on a plain connection or inside a transaction.

pub mod asset;
pub mod fuel_alert;
pub mod notification;
pub mod owner;
pub mod structure;
pub mod webhook;
