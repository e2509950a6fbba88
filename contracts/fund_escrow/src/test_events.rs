extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events, Ledger},
    vec, Address, Env, IntoVal, String, TryIntoVal, Val,
};

use crate::events::{
    CampaignCreated, CampaignFailed, Contributed, FundsWithdrawn, GoalReached, ProofSubmitted,
    ProofVerified, RefundIssued,
};
use crate::test_utils::{mint, setup};
use crate::FundEscrowClient;

fn create(env: &Env, client: &FundEscrowClient, creator: &Address, goal: i128) -> u64 {
    client.create_campaign(
        creator,
        &String::from_str(env, "Library"),
        &String::from_str(env, "Books for the reading room"),
        &goal,
        &1,
    )
}

/// The `n`-th event counting back from the most recent one (0 = last).
fn nth_from_end(env: &Env, n: u32) -> (Address, soroban_sdk::Vec<Val>, Val) {
    let all = env.events().all();
    all.get(all.len() - 1 - n).expect("event missing")
}

fn topics(env: &Env, name: soroban_sdk::Symbol, campaign_id: u64) -> soroban_sdk::Vec<Val> {
    vec![env, name.into_val(env), campaign_id.into_val(env)]
}

#[test]
fn test_campaign_created_event() {
    let (env, client, _) = setup();
    let creator = Address::generate(&env);

    let id = create(&env, &client, &creator, 5_000);

    let (contract, event_topics, data) = nth_from_end(&env, 0);
    assert_eq!(contract, client.address);
    assert_eq!(event_topics, topics(&env, symbol_short!("created"), id));

    let payload: CampaignCreated = data.try_into_val(&env).unwrap();
    assert_eq!(
        payload,
        CampaignCreated {
            campaign_id: id,
            creator: creator.clone(),
            title: String::from_str(&env, "Library"),
            goal: 5_000,
            deadline: client.get_campaign(&id).deadline,
        }
    );
}

#[test]
fn test_contributed_event() {
    let (env, client, token) = setup();
    let creator = Address::generate(&env);
    let backer = Address::generate(&env);
    mint(&env, &token, &backer, 1_000);

    let id = create(&env, &client, &creator, 10_000);
    client.contribute(&id, &backer, &400);
    client.contribute(&id, &backer, &100);

    let (contract, event_topics, data) = nth_from_end(&env, 0);
    assert_eq!(contract, client.address);
    assert_eq!(event_topics, topics(&env, symbol_short!("contrib"), id));

    let payload: Contributed = data.try_into_val(&env).unwrap();
    assert_eq!(
        payload,
        Contributed {
            campaign_id: id,
            contributor: backer.clone(),
            amount: 100,
            raised: 500,
        }
    );
}

#[test]
fn test_goal_reached_event_follows_threshold_contribution() {
    let (env, client, token) = setup();
    let creator = Address::generate(&env);
    let backer = Address::generate(&env);
    mint(&env, &token, &backer, 1_000);

    let id = create(&env, &client, &creator, 1_000);
    client.contribute(&id, &backer, &1_000);

    let (_, contrib_topics, _) = nth_from_end(&env, 1);
    assert_eq!(contrib_topics, topics(&env, symbol_short!("contrib"), id));

    let (_, event_topics, data) = nth_from_end(&env, 0);
    assert_eq!(event_topics, topics(&env, symbol_short!("goal_met"), id));
    let payload: GoalReached = data.try_into_val(&env).unwrap();
    assert_eq!(
        payload,
        GoalReached {
            campaign_id: id,
            raised: 1_000,
        }
    );
}

#[test]
fn test_settlement_events_on_success() {
    let (env, client, token) = setup();
    let creator = Address::generate(&env);
    let backer = Address::generate(&env);
    mint(&env, &token, &backer, 700);
    let proof = String::from_str(&env, "ipfs://bafy-report");

    let id = create(&env, &client, &creator, 700);
    client.contribute(&id, &backer, &700);
    client.resolve_and_settle(&id, &creator, &proof);

    let (_, t, data) = nth_from_end(&env, 2);
    assert_eq!(t, topics(&env, symbol_short!("proof_sub"), id));
    let submitted: ProofSubmitted = data.try_into_val(&env).unwrap();
    assert_eq!(
        submitted,
        ProofSubmitted {
            campaign_id: id,
            creator: creator.clone(),
            proof_reference: proof.clone(),
        }
    );

    let (_, t, data) = nth_from_end(&env, 1);
    assert_eq!(t, topics(&env, symbol_short!("proof_ver"), id));
    let verified: ProofVerified = data.try_into_val(&env).unwrap();
    assert!(verified.verified);

    let (_, t, data) = nth_from_end(&env, 0);
    assert_eq!(t, topics(&env, symbol_short!("withdrawn"), id));
    let withdrawn: FundsWithdrawn = data.try_into_val(&env).unwrap();
    assert_eq!(
        withdrawn,
        FundsWithdrawn {
            campaign_id: id,
            creator: creator.clone(),
            amount: 700,
        }
    );
}

#[test]
fn test_settlement_events_on_failure() {
    let (env, client, token) = setup();
    let creator = Address::generate(&env);
    let backer = Address::generate(&env);
    mint(&env, &token, &backer, 20);

    let id = create(&env, &client, &creator, 700);
    client.contribute(&id, &backer, &20);
    let deadline = client.get_campaign(&id).deadline;
    env.ledger().with_mut(|li| li.timestamp = deadline);

    client.resolve_and_settle(&id, &creator, &String::from_str(&env, "ipfs://x"));

    let (_, t, data) = nth_from_end(&env, 1);
    assert_eq!(t, topics(&env, symbol_short!("proof_ver"), id));
    let verified: ProofVerified = data.try_into_val(&env).unwrap();
    assert!(!verified.verified);

    let (_, t, data) = nth_from_end(&env, 0);
    assert_eq!(t, topics(&env, symbol_short!("failed"), id));
    let failed: CampaignFailed = data.try_into_val(&env).unwrap();
    assert_eq!(
        failed,
        CampaignFailed {
            campaign_id: id,
            raised: 20,
        }
    );
}

#[test]
fn test_refund_issued_event() {
    let (env, client, token) = setup();
    let creator = Address::generate(&env);
    let backer = Address::generate(&env);
    mint(&env, &token, &backer, 45);

    let id = create(&env, &client, &creator, 700);
    client.contribute(&id, &backer, &45);
    let deadline = client.get_campaign(&id).deadline;
    env.ledger().with_mut(|li| li.timestamp = deadline + 60);

    client.claim_refund(&id, &backer);

    let (contract, t, data) = nth_from_end(&env, 0);
    assert_eq!(contract, client.address);
    assert_eq!(t, topics(&env, symbol_short!("refunded"), id));
    let refund: RefundIssued = data.try_into_val(&env).unwrap();
    assert_eq!(
        refund,
        RefundIssued {
            campaign_id: id,
            contributor: backer.clone(),
            amount: 45,
        }
    );
}
