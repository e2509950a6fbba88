//! # Storage
//!
//! Typed helpers over the two Soroban storage tiers used by the ledger.
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key              | Type      | Description                         |
//! |------------------|-----------|-------------------------------------|
//! | `CampaignCount`  | `u64`     | Auto-increment campaign ID counter  |
//! | `Token`          | `Address` | Escrow asset accepted by the ledger |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                             | Type             | Description                       |
//! |---------------------------------|------------------|-----------------------------------|
//! | `CampConfig(id)`                | `CampaignConfig` | Immutable campaign configuration  |
//! | `CampState(id)`                 | `CampaignState`  | Mutable campaign state            |
//! | `Contribution(id, address)`     | `i128`           | Amount held for one contributor   |
//! | `Contributors(id)`              | `Vec<Address>`   | Append-only contributor list      |
//! | `CreatorCampaigns(address)`     | `Vec<u64>`       | Campaigns created by an address   |
//! | `ContributorCampaigns(address)` | `Vec<u64>`       | Campaigns an address backed       |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days remaining.
//!
//! Contributions use a flat `(campaign, address)` key rather than a map nested
//! inside the campaign record, so a contribution only rewrites its own entry
//! plus the small state entry.

use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::types::{Campaign, CampaignConfig, CampaignState};
use crate::Error;

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

/// Instance storage: bump by 7 days when below 1 day remaining.
const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

/// Persistent storage: bump by 30 days when below 7 days remaining.
const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Global auto-increment counter for campaign IDs (Instance).
    CampaignCount,
    /// Escrow asset contract address (Instance).
    Token,
    /// Immutable campaign configuration keyed by ID (Persistent).
    CampConfig(u64),
    /// Mutable campaign state keyed by ID (Persistent).
    CampState(u64),
    /// Escrowed amount for one contributor of one campaign (Persistent).
    Contribution(u64, Address),
    /// Ordered list of contributors for a campaign (Persistent).
    Contributors(u64),
    /// Campaign IDs created by an address (Persistent).
    CreatorCampaigns(Address),
    /// Campaign IDs an address has contributed to (Persistent).
    ContributorCampaigns(Address),
}

// ── Instance Storage Helpers ─────────────────────────────────────────

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

/// Reads, increments, and stores the campaign counter.
/// Returns the ID to use for the *current* campaign (pre-increment value).
pub fn get_and_increment_campaign_id(env: &Env) -> u64 {
    bump_instance(env);
    let current = campaign_count(env);
    env.storage()
        .instance()
        .set(&DataKey::CampaignCount, &(current + 1));
    current
}

/// Number of campaigns ever created.
pub fn campaign_count(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::CampaignCount)
        .unwrap_or(0)
}

pub fn has_token(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Token)
}

pub fn set_token(env: &Env, token: &Address) {
    env.storage().instance().set(&DataKey::Token, token);
    bump_instance(env);
}

/// Escrow asset address, or `NotInitialized` before `init`.
pub fn get_token(env: &Env) -> Result<Address, Error> {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Token)
        .ok_or(Error::NotInitialized)
}

// ── Persistent Storage Helpers ───────────────────────────────────────

fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

fn read_persistent<V>(env: &Env, key: &DataKey) -> Option<V>
where
    V: soroban_sdk::TryFromVal<Env, soroban_sdk::Val>,
{
    let value = env.storage().persistent().get(key);
    if value.is_some() {
        bump_persistent(env, key);
    }
    value
}

fn write_persistent<V>(env: &Env, key: &DataKey, value: &V)
where
    V: soroban_sdk::IntoVal<Env, soroban_sdk::Val>,
{
    env.storage().persistent().set(key, value);
    bump_persistent(env, key);
}

/// Save the immutable config and the initial state of a new campaign.
pub fn save_campaign(env: &Env, config: &CampaignConfig, state: &CampaignState) {
    write_persistent(env, &DataKey::CampConfig(config.id), config);
    write_persistent(env, &DataKey::CampState(config.id), state);
}

pub fn load_campaign_config(env: &Env, id: u64) -> Result<CampaignConfig, Error> {
    read_persistent(env, &DataKey::CampConfig(id)).ok_or(Error::NotFound)
}

pub fn load_campaign_state(env: &Env, id: u64) -> Result<CampaignState, Error> {
    read_persistent(env, &DataKey::CampState(id)).ok_or(Error::NotFound)
}

/// Load config and state together; every mutating entry point needs both.
pub fn load_campaign_pair(env: &Env, id: u64) -> Result<(CampaignConfig, CampaignState), Error> {
    let config = load_campaign_config(env, id)?;
    let state = load_campaign_state(env, id)?;
    Ok((config, state))
}

/// Load the full `Campaign` snapshot.
pub fn load_campaign(env: &Env, id: u64) -> Result<Campaign, Error> {
    let (config, state) = load_campaign_pair(env, id)?;
    Ok(Campaign::from_parts(config, state))
}

pub fn save_campaign_state(env: &Env, id: u64, state: &CampaignState) {
    write_persistent(env, &DataKey::CampState(id), state);
}

// ── Contributions ────────────────────────────────────────────────────

/// `true` once `contributor` has recorded any contribution to `id`,
/// even if it was later refunded.
pub fn has_contributed(env: &Env, id: u64, contributor: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Contribution(id, contributor.clone()))
}

pub fn get_contribution(env: &Env, id: u64, contributor: &Address) -> i128 {
    read_persistent(env, &DataKey::Contribution(id, contributor.clone())).unwrap_or(0)
}

pub fn set_contribution(env: &Env, id: u64, contributor: &Address, amount: i128) {
    write_persistent(env, &DataKey::Contribution(id, contributor.clone()), &amount);
}

pub fn get_contributors(env: &Env, id: u64) -> Vec<Address> {
    read_persistent(env, &DataKey::Contributors(id)).unwrap_or_else(|| Vec::new(env))
}

pub fn push_contributor(env: &Env, id: u64, contributor: &Address) {
    let mut contributors = get_contributors(env, id);
    contributors.push_back(contributor.clone());
    write_persistent(env, &DataKey::Contributors(id), &contributors);
}

// ── Secondary indexes ────────────────────────────────────────────────

pub fn get_creator_campaigns(env: &Env, creator: &Address) -> Vec<u64> {
    read_persistent(env, &DataKey::CreatorCampaigns(creator.clone()))
        .unwrap_or_else(|| Vec::new(env))
}

pub fn push_creator_campaign(env: &Env, creator: &Address, id: u64) {
    let mut ids = get_creator_campaigns(env, creator);
    ids.push_back(id);
    write_persistent(env, &DataKey::CreatorCampaigns(creator.clone()), &ids);
}

pub fn get_contributor_campaigns(env: &Env, contributor: &Address) -> Vec<u64> {
    read_persistent(env, &DataKey::ContributorCampaigns(contributor.clone()))
        .unwrap_or_else(|| Vec::new(env))
}

pub fn push_contributor_campaign(env: &Env, contributor: &Address, id: u64) {
    let mut ids = get_contributor_campaigns(env, contributor);
    ids.push_back(id);
    write_persistent(env, &DataKey::ContributorCampaigns(contributor.clone()), &ids);
}
