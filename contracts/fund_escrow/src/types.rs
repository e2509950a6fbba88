//! # Types
//!
//! Shared data structures used across all modules of the escrow ledger.
//!
//! ## Design decisions
//!
//! ### Config / State split
//!
//! A `Campaign` is internally stored as two separate ledger entries:
//!
//! - [`CampaignConfig`] — written once at creation; never mutated.
//! - [`CampaignState`] — written on every contribution, settlement and refund.
//!
//! The public API exposes the reconstructed [`Campaign`] struct.
//!
//! ### Status as a Finite-State Machine
//!
//! [`CampaignStatus`] enforces a strict forward-only lifecycle:
//!
//! ```text
//! Active ──► Funded ──► Completed
//!    └──► Failed
//! ```
//!
//! `Active` may also stay `Active` past its deadline: expiry is evaluated
//! lazily, only when someone settles or claims a refund.

use soroban_sdk::{contracttype, Address, String};

/// Lifecycle status of a campaign.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CampaignStatus {
    /// Accepting contributions.
    Active,
    /// Goal reached; waiting for the creator to settle.
    Funded,
    /// Deadline passed without reaching the goal; contributors may refund.
    Failed,
    /// Proof accepted and escrow paid out to the creator.
    Completed,
}

impl CampaignStatus {
    /// `true` for `Failed` and `Completed`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, CampaignStatus::Failed | CampaignStatus::Completed)
    }
}

/// Immutable campaign configuration, written once at creation.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignConfig {
    pub id: u64,
    pub creator: Address,
    pub title: String,
    pub description: String,
    pub goal: i128,
    pub created_at: u64,
    pub deadline: u64,
}

/// Mutable campaign state.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignState {
    pub raised: i128,
    pub status: CampaignStatus,
    pub proof_submitted: bool,
    pub proof_verified: bool,
    pub proof_reference: Option<String>,
    pub contributor_count: u32,
}

impl Default for CampaignState {
    fn default() -> Self {
        CampaignState {
            raised: 0,
            status: CampaignStatus::Active,
            proof_submitted: false,
            proof_verified: false,
            proof_reference: None,
            contributor_count: 0,
        }
    }
}

/// Full snapshot of a campaign, returned by `get_campaign`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Campaign {
    /// Unique identifier (auto-incremented, starting at 0).
    pub id: u64,
    /// Address that created the campaign and receives the payout.
    pub creator: Address,
    pub title: String,
    pub description: String,
    /// Target amount in the escrow token's smallest unit.
    pub goal: i128,
    /// Sum of contributions still held in escrow.
    pub raised: i128,
    /// Ledger timestamp at creation.
    pub created_at: u64,
    /// Ledger timestamp after which contributions are rejected.
    pub deadline: u64,
    pub status: CampaignStatus,
    pub proof_submitted: bool,
    pub proof_verified: bool,
    /// Opaque pointer to externally stored proof material (e.g. an IPFS URI).
    pub proof_reference: Option<String>,
    /// Number of distinct addresses that have ever contributed.
    pub contributor_count: u32,
}

impl Campaign {
    pub fn from_parts(config: CampaignConfig, state: CampaignState) -> Self {
        Campaign {
            id: config.id,
            creator: config.creator,
            title: config.title,
            description: config.description,
            goal: config.goal,
            raised: state.raised,
            created_at: config.created_at,
            deadline: config.deadline,
            status: state.status,
            proof_submitted: state.proof_submitted,
            proof_verified: state.proof_verified,
            proof_reference: state.proof_reference,
            contributor_count: state.contributor_count,
        }
    }
}
