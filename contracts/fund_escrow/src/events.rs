//! # Events
//!
//! Every state transition publishes one event with topics
//! `(symbol, campaign_id)` and a typed payload. Off-chain observers (the
//! indexer under `backend/indexer`, dashboards) match on the leading symbol.
//!
//! | Topic       | Payload            |
//! |-------------|--------------------|
//! | `created`   | [`CampaignCreated`] |
//! | `contrib`   | [`Contributed`]     |
//! | `goal_met`  | [`GoalReached`]     |
//! | `proof_sub` | [`ProofSubmitted`]  |
//! | `proof_ver` | [`ProofVerified`]   |
//! | `withdrawn` | [`FundsWithdrawn`]  |
//! | `failed`    | [`CampaignFailed`]  |
//! | `refunded`  | [`RefundIssued`]    |

use soroban_sdk::{contracttype, symbol_short, Address, Env, String};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignCreated {
    pub campaign_id: u64,
    pub creator: Address,
    pub title: String,
    pub goal: i128,
    pub deadline: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Contributed {
    pub campaign_id: u64,
    pub contributor: Address,
    pub amount: i128,
    /// Campaign total after this contribution.
    pub raised: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GoalReached {
    pub campaign_id: u64,
    pub raised: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProofSubmitted {
    pub campaign_id: u64,
    pub creator: Address,
    pub proof_reference: String,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProofVerified {
    pub campaign_id: u64,
    pub verified: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FundsWithdrawn {
    pub campaign_id: u64,
    pub creator: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignFailed {
    pub campaign_id: u64,
    pub raised: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RefundIssued {
    pub campaign_id: u64,
    pub contributor: Address,
    pub amount: i128,
}

pub fn emit_campaign_created(
    env: &Env,
    campaign_id: u64,
    creator: Address,
    title: String,
    goal: i128,
    deadline: u64,
) {
    let payload = CampaignCreated {
        campaign_id,
        creator,
        title,
        goal,
        deadline,
    };
    env.events()
        .publish((symbol_short!("created"), campaign_id), payload);
}

pub fn emit_contributed(
    env: &Env,
    campaign_id: u64,
    contributor: Address,
    amount: i128,
    raised: i128,
) {
    let payload = Contributed {
        campaign_id,
        contributor,
        amount,
        raised,
    };
    env.events()
        .publish((symbol_short!("contrib"), campaign_id), payload);
}

pub fn emit_goal_reached(env: &Env, campaign_id: u64, raised: i128) {
    env.events().publish(
        (symbol_short!("goal_met"), campaign_id),
        GoalReached {
            campaign_id,
            raised,
        },
    );
}

pub fn emit_proof_submitted(env: &Env, campaign_id: u64, creator: Address, proof_reference: String) {
    let payload = ProofSubmitted {
        campaign_id,
        creator,
        proof_reference,
    };
    env.events()
        .publish((symbol_short!("proof_sub"), campaign_id), payload);
}

pub fn emit_proof_verified(env: &Env, campaign_id: u64, verified: bool) {
    env.events().publish(
        (symbol_short!("proof_ver"), campaign_id),
        ProofVerified {
            campaign_id,
            verified,
        },
    );
}

pub fn emit_funds_withdrawn(env: &Env, campaign_id: u64, creator: Address, amount: i128) {
    let payload = FundsWithdrawn {
        campaign_id,
        creator,
        amount,
    };
    env.events()
        .publish((symbol_short!("withdrawn"), campaign_id), payload);
}

pub fn emit_campaign_failed(env: &Env, campaign_id: u64, raised: i128) {
    env.events().publish(
        (symbol_short!("failed"), campaign_id),
        CampaignFailed {
            campaign_id,
            raised,
        },
    );
}

pub fn emit_refund_issued(env: &Env, campaign_id: u64, contributor: Address, amount: i128) {
    let payload = RefundIssued {
        campaign_id,
        contributor,
        amount,
    };
    env.events()
        .publish((symbol_short!("refunded"), campaign_id), payload);
}
