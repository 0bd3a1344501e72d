//! Background job definitions.
//!
//! Each variant carries the minimal data needed to perform the task. Jobs
//! for the same owner and cycle kind are mutually exclusive in the worker
//! pool so that concurrent cycles never race on the credential rotation
//! cursor or the structure-set replacement.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Background job types for the sync and forwarding pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum WorkerJob {
    /// Replace the owner's structure set from ESI.
    UpdateStructures { owner_id: i32 },
    /// Fetch and store new raw notifications for one owner, then queue
    /// forwarding and timer processing.
    FetchNotifications { owner_id: i32 },
    /// Refresh the owner's corporation assets.
    UpdateAssets { owner_id: i32 },
    /// Deliver all pending messages for one webhook, oldest first.
    SendPendingMessages { webhook_id: i32 },
    /// Evaluate all fuel alert configs against current structure state.
    CheckFuelAlerts,
    /// Recompute owner health and emit edge-triggered notices.
    CheckServiceStatus,
}

impl WorkerJob {
    /// Key identifying the mutual-exclusion group of this job.
    ///
    /// Two jobs with the same key never run concurrently; this serializes
    /// cycles per (owner, kind) and keeps webhook delivery single-consumer.
    pub fn exclusion_key(&self) -> String {
        match self {
            Self::UpdateStructures { owner_id } => format!("structures:{owner_id}"),
            Self::FetchNotifications { owner_id } => format!("notifications:{owner_id}"),
            Self::UpdateAssets { owner_id } => format!("assets:{owner_id}"),
            Self::SendPendingMessages { webhook_id } => format!("webhook:{webhook_id}"),
            Self::CheckFuelAlerts => "fuel_alerts".to_string(),
            Self::CheckServiceStatus => "service_status".to_string(),
        }
    }
}

impl fmt::Display for WorkerJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UpdateStructures { owner_id } => {
                write!(f, "UpdateStructures(owner {owner_id})")
            }
            Self::FetchNotifications { owner_id } => {
                write!(f, "FetchNotifications(owner {owner_id})")
            }
            Self::UpdateAssets { owner_id } => write!(f, "UpdateAssets(owner {owner_id})"),
            Self::SendPendingMessages { webhook_id } => {
                write!(f, "SendPendingMessages(webhook {webhook_id})")
            }
            Self::CheckFuelAlerts => write!(f, "CheckFuelAlerts"),
            Self::CheckServiceStatus => write!(f, "CheckServiceStatus"),
        }
    }
}
