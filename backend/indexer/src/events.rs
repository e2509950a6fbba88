//! Canonical event types emitted by the fund escrow contract.
//!
//! These mirror the Soroban contract events defined in
//! `contracts/fund_escrow/src/events.rs`.

use serde::{Deserialize, Serialize};

/// All recognised event kinds from the escrow contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A new campaign was registered (`created` topic).
    CampaignCreated,
    /// Value was locked against a campaign (`contrib` topic).
    Contributed,
    /// A contribution pushed the campaign to its goal (`goal_met` topic).
    GoalReached,
    /// The creator submitted a proof reference (`proof_sub` topic).
    ProofSubmitted,
    /// The proof outcome was recorded (`proof_ver` topic).
    ProofVerified,
    /// Escrow was paid out to the creator (`withdrawn` topic).
    FundsWithdrawn,
    /// An expired campaign was settled as failed (`failed` topic).
    CampaignFailed,
    /// A contributor reclaimed their escrow (`refunded` topic).
    RefundIssued,
    /// An event from this contract that we don't recognise yet.
    Unknown,
}

const ALL_KINDS: [EventKind; 8] = [
    EventKind::CampaignCreated,
    EventKind::Contributed,
    EventKind::GoalReached,
    EventKind::ProofSubmitted,
    EventKind::ProofVerified,
    EventKind::FundsWithdrawn,
    EventKind::CampaignFailed,
    EventKind::RefundIssued,
];

impl EventKind {
    /// Parse the leading topic symbol string produced by Soroban into an [`EventKind`].
    pub fn from_topic(topic: &str) -> Self {
        match topic {
            "created" => Self::CampaignCreated,
            "contrib" => Self::Contributed,
            "goal_met" => Self::GoalReached,
            "proof_sub" => Self::ProofSubmitted,
            "proof_ver" => Self::ProofVerified,
            "withdrawn" => Self::FundsWithdrawn,
            "failed" => Self::CampaignFailed,
            "refunded" => Self::RefundIssued,
            _ => Self::Unknown,
        }
    }

    /// Return a short identifier string suitable for storage in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CampaignCreated => "campaign_created",
            Self::Contributed => "contributed",
            Self::GoalReached => "goal_reached",
            Self::ProofSubmitted => "proof_submitted",
            Self::ProofVerified => "proof_verified",
            Self::FundsWithdrawn => "funds_withdrawn",
            Self::CampaignFailed => "campaign_failed",
            Self::RefundIssued => "refund_issued",
            Self::Unknown => "unknown",
        }
    }

    /// Inverse of [`EventKind::as_str`].
    pub fn from_stored(s: &str) -> Self {
        ALL_KINDS
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .unwrap_or(Self::Unknown)
    }

    /// `true` for events that move value into or out of escrow.
    pub fn moves_funds(&self) -> bool {
        matches!(
            self,
            Self::Contributed | Self::FundsWithdrawn | Self::RefundIssued
        )
    }
}

/// A fully decoded escrow event, ready to be stored in the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EscrowEvent {
    /// Stable identity used to drop replays: the RPC event id when known.
    pub event_id: String,
    pub event_type: String,
    pub campaign_id: Option<String>,
    pub actor: Option<String>,
    pub amount: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
}

/// A raw event record as stored in / read from the database.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EventRecord {
    pub id: i64,
    pub event_id: String,
    pub event_type: String,
    pub campaign_id: Option<String>,
    pub actor: Option<String>,
    pub amount: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
    pub created_at: i64,
}
