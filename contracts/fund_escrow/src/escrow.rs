//! Value movement between contributors, the contract's escrow account and
//! campaign creators.
//!
//! Transfers go through the token's `try_transfer` so a failing token call
//! (insufficient balance, frozen trustline, ...) becomes
//! [`Error::TransferFailed`] instead of a trap. Entry points return that error
//! and the host discards every write made earlier in the invocation.

use soroban_sdk::{token, Address, Env};

use crate::Error;

fn transfer(env: &Env, asset: &Address, from: &Address, to: &Address, amount: i128) -> Result<(), Error> {
    let client = token::Client::new(env, asset);
    match client.try_transfer(from, to, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(Error::TransferFailed),
    }
}

/// Move `amount` from `contributor` into escrow.
pub fn lock(env: &Env, asset: &Address, contributor: &Address, amount: i128) -> Result<(), Error> {
    transfer(env, asset, contributor, &env.current_contract_address(), amount)
}

/// Move `amount` out of escrow to `recipient`.
pub fn release(env: &Env, asset: &Address, recipient: &Address, amount: i128) -> Result<(), Error> {
    transfer(env, asset, &env.current_contract_address(), recipient, amount)
}
