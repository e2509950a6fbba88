//! Fixtures shared by the contract test modules.

use soroban_sdk::{
    testutils::{Address as _, Ledger},
    token, Address, Env,
};

use crate::{FundEscrow, FundEscrowClient};

/// Fresh environment with all auths mocked, the contract registered and
/// initialised against a new Stellar asset.
pub fn setup() -> (Env, FundEscrowClient<'static>, token::Client<'static>) {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(FundEscrow, ());
    let client = FundEscrowClient::new(&env, &contract_id);

    let token_admin = Address::generate(&env);
    let sac = env.register_stellar_asset_contract_v2(token_admin);
    let token = token::Client::new(&env, &sac.address());
    client.init(&token.address);
    (env, client, token)
}

pub fn mint(env: &Env, token: &token::Client, to: &Address, amount: i128) {
    token::StellarAssetClient::new(env, &token.address).mint(to, &amount);
}

/// Revoke `holder`'s trustline authorization so transfers to it fail.
pub fn deauthorize(env: &Env, token: &token::Client, holder: &Address) {
    token::StellarAssetClient::new(env, &token.address).set_authorized(holder, &false);
}

/// Move the ledger clock one second past the campaign's deadline.
pub fn expire(env: &Env, client: &FundEscrowClient, id: u64) {
    let deadline = client.get_campaign(&id).deadline;
    env.ledger().with_mut(|li| li.timestamp = deadline + 1);
}
