//! # Fund Escrow Ledger
//!
//! A Soroban contract that holds contributions for funding campaigns in
//! escrow and releases them only once the campaign's outcome is resolved.
//!
//! | Phase        | Entry Point(s)                                      |
//! |--------------|-----------------------------------------------------|
//! | Bootstrap    | [`FundEscrow::init`]                                |
//! | Registration | [`FundEscrow::create_campaign`]                     |
//! | Funding      | [`FundEscrow::contribute`]                          |
//! | Settlement   | [`FundEscrow::resolve_and_settle`]                  |
//! | Refunds      | [`FundEscrow::claim_refund`]                        |
//! | Queries      | `get_campaign`, `get_contributors`, `get_contribution`, `get_campaigns_by_creator`, `get_campaigns_by_contributor`, `campaign_count`, `token` |
//!
//! ## Architecture
//!
//! Storage access is delegated to [`storage`], token movement to [`escrow`]
//! and event publication to [`events`]. This file holds the entry points and
//! the state machine guards.
//!
//! Every entry point returns `Result<_, Error>`. On `Err` the host rolls back
//! all storage writes, token transfers and events of the invocation, so a
//! failed call leaves the ledger unchanged.
//!
//! Deadlines are evaluated lazily: nothing moves a campaign to `Failed` on
//! its own. An `Active` campaign past its deadline stays `Active` until the
//! creator settles it, and its contributors can refund in the meantime.

#![no_std]

use soroban_sdk::{contract, contracterror, contractimpl, Address, Env, String, Vec};

mod escrow;
pub mod events;
mod storage;
mod types;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod test_events;
#[cfg(test)]
mod test_utils;

use storage::{
    get_and_increment_campaign_id, load_campaign, load_campaign_config, load_campaign_pair,
    save_campaign, save_campaign_state,
};
pub use types::{Campaign, CampaignStatus};
use types::{CampaignConfig, CampaignState};

/// Seconds per campaign duration day.
pub const SECONDS_PER_DAY: u64 = 86_400;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    /// Empty title or description, non-positive goal, duration or amount.
    InvalidInput = 1,
    /// No campaign with the given id.
    NotFound = 2,
    /// Contribution to a campaign that is no longer `Active`.
    NotActive = 3,
    /// Contribution at or after the deadline.
    DeadlinePassed = 4,
    /// The creator tried to contribute to their own campaign.
    SelfContribution = 5,
    /// Caller is not the campaign creator.
    Unauthorized = 6,
    /// Settlement outside `Funded` or expired `Active`.
    InvalidStatus = 7,
    /// Settlement without a proof reference.
    EmptyProof = 8,
    /// Campaign has neither failed nor expired under its goal.
    RefundNotAvailable = 9,
    /// Claimant has nothing held in escrow for this campaign.
    NoContribution = 10,
    /// The token transfer did not complete.
    TransferFailed = 11,
    AlreadyInitialized = 12,
    NotInitialized = 13,
    /// Arithmetic overflow on escrow totals.
    Overflow = 14,
}

#[contract]
pub struct FundEscrow;

#[contractimpl]
impl FundEscrow {
    // ─────────────────────────────────────────────────────────
    // Initialisation
    // ─────────────────────────────────────────────────────────

    /// Configure the token every campaign is funded in.
    ///
    /// Must be called exactly once after deployment.
    pub fn init(env: Env, token: Address) -> Result<(), Error> {
        if storage::has_token(&env) {
            return Err(Error::AlreadyInitialized);
        }
        storage::set_token(&env, &token);
        Ok(())
    }

    /// Escrow token address.
    pub fn token(env: Env) -> Result<Address, Error> {
        storage::get_token(&env)
    }

    // ─────────────────────────────────────────────────────────
    // Campaign lifecycle
    // ─────────────────────────────────────────────────────────

    /// Register a new campaign and return its id.
    ///
    /// - `creator` must authorize the call.
    /// - `title` and `description` must be non-empty.
    /// - `goal` and `duration_days` must be positive.
    ///
    /// The deadline is `now + duration_days` days.
    pub fn create_campaign(
        env: Env,
        creator: Address,
        title: String,
        description: String,
        goal: i128,
        duration_days: u64,
    ) -> Result<u64, Error> {
        creator.require_auth();
        storage::get_token(&env)?;

        if title.len() == 0 || description.len() == 0 || goal <= 0 || duration_days == 0 {
            return Err(Error::InvalidInput);
        }

        let now = env.ledger().timestamp();
        let deadline = duration_days
            .checked_mul(SECONDS_PER_DAY)
            .and_then(|secs| now.checked_add(secs))
            .ok_or(Error::InvalidInput)?;

        let id = get_and_increment_campaign_id(&env);
        let config = CampaignConfig {
            id,
            creator: creator.clone(),
            title: title.clone(),
            description,
            goal,
            created_at: now,
            deadline,
        };

        save_campaign(&env, &config, &CampaignState::default());
        storage::push_creator_campaign(&env, &creator, id);

        events::emit_campaign_created(&env, id, creator, title, goal, deadline);
        Ok(id)
    }

    /// Lock `amount` of the escrow token against `campaign_id`.
    ///
    /// The contribution that brings `raised` to or past the goal moves the
    /// campaign to `Funded` in the same call.
    pub fn contribute(
        env: Env,
        campaign_id: u64,
        contributor: Address,
        amount: i128,
    ) -> Result<(), Error> {
        contributor.require_auth();

        let (config, mut state) = load_campaign_pair(&env, campaign_id)?;

        if amount <= 0 {
            return Err(Error::InvalidInput);
        }
        if state.status != CampaignStatus::Active {
            return Err(Error::NotActive);
        }
        if env.ledger().timestamp() >= config.deadline {
            return Err(Error::DeadlinePassed);
        }
        if contributor == config.creator {
            return Err(Error::SelfContribution);
        }

        let raised = state.raised.checked_add(amount).ok_or(Error::Overflow)?;
        let held = storage::get_contribution(&env, campaign_id, &contributor)
            .checked_add(amount)
            .ok_or(Error::Overflow)?;

        let asset = storage::get_token(&env)?;
        escrow::lock(&env, &asset, &contributor, amount)?;

        if !storage::has_contributed(&env, campaign_id, &contributor) {
            storage::push_contributor(&env, campaign_id, &contributor);
            storage::push_contributor_campaign(&env, &contributor, campaign_id);
            state.contributor_count += 1;
        }
        storage::set_contribution(&env, campaign_id, &contributor, held);

        state.raised = raised;
        let goal_reached = raised >= config.goal;
        if goal_reached {
            state.status = CampaignStatus::Funded;
        }
        save_campaign_state(&env, campaign_id, &state);

        events::emit_contributed(&env, campaign_id, contributor, amount, raised);
        if goal_reached {
            events::emit_goal_reached(&env, campaign_id, raised);
        }
        Ok(())
    }

    /// Submit proof and settle the campaign.
    ///
    /// Only the creator may call this, and only once the campaign is either
    /// `Funded` or `Active` past its deadline.
    ///
    /// - `Funded`: the proof is accepted as verified, the whole escrow is paid
    ///   to the creator and the campaign becomes `Completed`.
    /// - expired `Active`: the campaign becomes `Failed`; contributors then
    ///   reclaim their funds with [`FundEscrow::claim_refund`].
    ///
    /// NOTE: verification is "funded implies verified". An external
    /// verification oracle would replace the `Funded` branch, consuming
    /// `proof_reference` and producing `proof_verified`.
    pub fn resolve_and_settle(
        env: Env,
        campaign_id: u64,
        caller: Address,
        proof_reference: String,
    ) -> Result<(), Error> {
        caller.require_auth();

        let (config, mut state) = load_campaign_pair(&env, campaign_id)?;

        if caller != config.creator {
            return Err(Error::Unauthorized);
        }
        if proof_reference.len() == 0 {
            return Err(Error::EmptyProof);
        }

        if state.status.is_terminal() {
            return Err(Error::InvalidStatus);
        }

        let expired = env.ledger().timestamp() >= config.deadline;
        match state.status {
            CampaignStatus::Funded => {
                let payout = state.raised;
                let asset = storage::get_token(&env)?;
                escrow::release(&env, &asset, &config.creator, payout)?;

                state.proof_submitted = true;
                state.proof_verified = true;
                state.proof_reference = Some(proof_reference.clone());
                state.status = CampaignStatus::Completed;
                state.raised = 0;
                save_campaign_state(&env, campaign_id, &state);

                events::emit_proof_submitted(&env, campaign_id, caller, proof_reference);
                events::emit_proof_verified(&env, campaign_id, true);
                events::emit_funds_withdrawn(&env, campaign_id, config.creator, payout);
            }
            CampaignStatus::Active if expired => {
                state.proof_submitted = true;
                state.proof_verified = false;
                state.proof_reference = Some(proof_reference.clone());
                state.status = CampaignStatus::Failed;
                save_campaign_state(&env, campaign_id, &state);

                events::emit_proof_submitted(&env, campaign_id, caller, proof_reference);
                events::emit_proof_verified(&env, campaign_id, false);
                events::emit_campaign_failed(&env, campaign_id, state.raised);
            }
            _ => return Err(Error::InvalidStatus),
        }
        Ok(())
    }

    /// Return the claimant's whole escrowed contribution.
    ///
    /// Available once the campaign is `Failed`, or while it is still `Active`
    /// past its deadline under its goal (lazy failure). Exactly once per
    /// claimant: a repeat call fails with `NoContribution`.
    pub fn claim_refund(env: Env, campaign_id: u64, claimant: Address) -> Result<(), Error> {
        claimant.require_auth();

        let (config, mut state) = load_campaign_pair(&env, campaign_id)?;

        let amount = storage::get_contribution(&env, campaign_id, &claimant);
        if amount <= 0 {
            return Err(Error::NoContribution);
        }

        let lazily_failed = state.status == CampaignStatus::Active
            && env.ledger().timestamp() >= config.deadline
            && state.raised < config.goal;
        if state.status != CampaignStatus::Failed && !lazily_failed {
            return Err(Error::RefundNotAvailable);
        }

        let asset = storage::get_token(&env)?;
        escrow::release(&env, &asset, &claimant, amount)?;

        storage::set_contribution(&env, campaign_id, &claimant, 0);
        state.raised -= amount;
        save_campaign_state(&env, campaign_id, &state);

        events::emit_refund_issued(&env, campaign_id, claimant, amount);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    pub fn get_campaign(env: Env, campaign_id: u64) -> Result<Campaign, Error> {
        load_campaign(&env, campaign_id)
    }

    /// Every address that has ever contributed, in first-contribution order.
    pub fn get_contributors(env: Env, campaign_id: u64) -> Result<Vec<Address>, Error> {
        load_campaign_config(&env, campaign_id)?;
        Ok(storage::get_contributors(&env, campaign_id))
    }

    /// Amount currently recorded for `contributor`; `0` if they never contributed.
    pub fn get_contribution(env: Env, campaign_id: u64, contributor: Address) -> Result<i128, Error> {
        load_campaign_config(&env, campaign_id)?;
        Ok(storage::get_contribution(&env, campaign_id, &contributor))
    }

    pub fn get_campaigns_by_creator(env: Env, creator: Address) -> Vec<u64> {
        storage::get_creator_campaigns(&env, &creator)
    }

    pub fn get_campaigns_by_contributor(env: Env, contributor: Address) -> Vec<u64> {
        storage::get_contributor_campaigns(&env, &contributor)
    }

    /// Number of campaigns created so far; also the next id to be assigned.
    pub fn campaign_count(env: Env) -> u64 {
        storage::campaign_count(&env)
    }
}
