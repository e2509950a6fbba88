#![allow(dead_code)]

extern crate std;

use soroban_sdk::{token, Address};

use crate::types::{Campaign, CampaignStatus};
use crate::FundEscrowClient;

/// Campaign goal is always positive.
pub fn assert_goal_positive(campaign: &Campaign) {
    assert!(
        campaign.goal > 0,
        "campaign {} has non-positive goal ({})",
        campaign.id,
        campaign.goal
    );
}

/// Deadline lies strictly after creation.
pub fn assert_deadline_after_creation(campaign: &Campaign) {
    assert!(
        campaign.deadline > campaign.created_at,
        "campaign {} deadline {} not after creation {}",
        campaign.id,
        campaign.deadline,
        campaign.created_at
    );
}

/// Escrowed total is never negative and never survives completion.
pub fn assert_raised_consistent_with_status(campaign: &Campaign) {
    assert!(
        campaign.raised >= 0,
        "campaign {} has negative raised ({})",
        campaign.id,
        campaign.raised
    );
    if campaign.status == CampaignStatus::Completed {
        assert_eq!(
            campaign.raised, 0,
            "completed campaign {} still holds {}",
            campaign.id, campaign.raised
        );
    }
}

/// Proof flags: verified implies submitted, completed implies verified,
/// failed implies not verified.
pub fn assert_proof_flags(campaign: &Campaign) {
    if campaign.proof_verified {
        assert!(campaign.proof_submitted, "campaign {} verified without proof", campaign.id);
    }
    match campaign.status {
        CampaignStatus::Completed => {
            assert!(campaign.proof_verified, "campaign {} completed unverified", campaign.id)
        }
        CampaignStatus::Failed => {
            assert!(!campaign.proof_verified, "campaign {} failed but verified", campaign.id)
        }
        _ => {}
    }
}

/// `raised` equals the sum of per-contributor amounts while funds are
/// escrowed. Completed campaigns keep historical contributions and a zero
/// `raised`, so they are skipped.
pub fn assert_raised_matches_contributions(client: &FundEscrowClient, campaign_id: u64) {
    let campaign = client.get_campaign(&campaign_id);
    if campaign.status == CampaignStatus::Completed {
        return;
    }
    let mut sum: i128 = 0;
    for contributor in client.get_contributors(&campaign_id).iter() {
        sum += client.get_contribution(&campaign_id, &contributor);
    }
    assert_eq!(
        campaign.raised, sum,
        "campaign {} raised {} != sum of contributions {}",
        campaign_id, campaign.raised, sum
    );
}

/// Contributor list holds each address once, the creator never appears, and
/// `contributor_count` matches its length.
pub fn assert_contributors_distinct(client: &FundEscrowClient, campaign_id: u64) {
    let campaign = client.get_campaign(&campaign_id);
    let contributors = client.get_contributors(&campaign_id);
    assert_eq!(contributors.len(), campaign.contributor_count);
    for i in 0..contributors.len() {
        let a = contributors.get_unchecked(i);
        assert_ne!(a, campaign.creator, "creator listed as contributor of {}", campaign_id);
        for j in (i + 1)..contributors.len() {
            assert_ne!(a, contributors.get_unchecked(j), "duplicate contributor in {}", campaign_id);
        }
    }
}

/// The contract's token balance equals the escrow recorded across all
/// campaigns.
pub fn assert_escrow_balance(client: &FundEscrowClient, asset: &token::Client, contract: &Address) {
    let mut recorded: i128 = 0;
    for id in 0..client.campaign_count() {
        recorded += client.get_campaign(&id).raised;
    }
    assert_eq!(
        asset.balance(contract),
        recorded,
        "token balance does not match recorded escrow"
    );
}

/// Only forward transitions:
///   Active -> Funded | Failed
///   Funded -> Completed
pub fn assert_valid_status_transition(from: &CampaignStatus, to: &CampaignStatus) {
    if from == to {
        return;
    }
    assert!(!from.is_terminal(), "transition out of terminal status {:?}", from);
    let valid = matches!(
        (from, to),
        (CampaignStatus::Active, CampaignStatus::Funded)
            | (CampaignStatus::Active, CampaignStatus::Failed)
            | (CampaignStatus::Funded, CampaignStatus::Completed)
    );
    assert!(valid, "invalid status transition from {:?} to {:?}", from, to);
}

/// Creation-time fields never change.
pub fn assert_campaign_immutable_fields(original: &Campaign, current: &Campaign) {
    assert_eq!(original.id, current.id, "campaign id changed");
    assert_eq!(original.creator, current.creator, "campaign creator changed");
    assert_eq!(original.title, current.title, "campaign title changed");
    assert_eq!(original.description, current.description, "campaign description changed");
    assert_eq!(original.goal, current.goal, "campaign goal changed");
    assert_eq!(original.created_at, current.created_at, "campaign created_at changed");
    assert_eq!(original.deadline, current.deadline, "campaign deadline changed");
}

/// Proof flags never go back to `false`.
pub fn assert_proof_flags_monotonic(before: &Campaign, after: &Campaign) {
    assert!(!before.proof_submitted || after.proof_submitted, "proof_submitted reset");
    assert!(!before.proof_verified || after.proof_verified, "proof_verified reset");
}

/// Campaign ids are sequential starting from 0.
pub fn assert_sequential_ids(campaigns: &[Campaign]) {
    for (i, campaign) in campaigns.iter().enumerate() {
        assert_eq!(campaign.id, i as u64, "expected id {}, got {}", i, campaign.id);
    }
}

/// Run all stateless campaign invariants.
pub fn assert_all_campaign_invariants(campaign: &Campaign) {
    assert_goal_positive(campaign);
    assert_deadline_after_creation(campaign);
    assert_raised_consistent_with_status(campaign);
    assert_proof_flags(campaign);
}

/// Run every invariant that needs the contract client.
pub fn assert_ledger_invariants(client: &FundEscrowClient, asset: &token::Client) {
    for id in 0..client.campaign_count() {
        assert_all_campaign_invariants(&client.get_campaign(&id));
        assert_raised_matches_contributions(client, id);
        assert_contributors_distinct(client, id);
    }
    assert_escrow_balance(client, asset, &client.address);
}
