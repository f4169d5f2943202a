//! Contribution intake, amount-less votes and early withdrawal.
//!
//! A contribution is also a vote: its amount is added to the named
//! candidate's weight in the same call that pulls the tokens in. The first
//! candidate a backer names, either through `cast_vote` or their first
//! contribution, is recorded as their declared vote and cannot be replaced.

use soroban_sdk::{log, token, Address, Env};

use shared::{math, validation, PoolConfig};

use crate::errors::Error;
use crate::events;
use crate::receipt;
use crate::storage;
use crate::types::{Contribution, PoolPhase, PoolState};

/// Shared guard for every backer-side mutation: `Active` and before the
/// voting deadline.
fn require_voting_open(env: &Env, config: &PoolConfig, state: &PoolState) -> Result<(), Error> {
    if state.phase != PoolPhase::Active {
        return Err(Error::PoolNotActive);
    }
    let now = env.ledger().timestamp();
    if now >= config.voting_deadline {
        log!(env, "voting closed", now, config.voting_deadline);
        return Err(Error::VotingClosed);
    }
    Ok(())
}

fn require_candidate(env: &Env, config: &PoolConfig, pitch_id: u64) -> Result<(), Error> {
    if config.candidates.iter().any(|c| c.pitch_id == pitch_id) {
        Ok(())
    } else {
        log!(env, "pitch is not a candidate", pitch_id);
        Err(Error::NotCandidate)
    }
}

/// Pull `amount` of `asset` from `backer`, mint a receipt, and add the amount
/// to `pitch_id`'s vote weight. Returns the receipt id.
pub fn contribute(
    env: &Env,
    backer: Address,
    amount: i128,
    asset: Address,
    pitch_id: u64,
) -> Result<u64, Error> {
    let (config, mut state) = storage::load_pool(env)?;
    require_voting_open(env, &config, &state)?;

    if asset != config.asset {
        return Err(Error::WrongAsset);
    }
    require_candidate(env, &config, pitch_id)?;
    validation::require_positive_amount(env, amount)?;
    validation::require_contribution_in_bounds(
        env,
        amount,
        config.min_contribution,
        config.max_contribution,
    )?;

    let total = state
        .total_contributions
        .checked_add(amount)
        .ok_or(Error::Overflow)?;
    let weight = storage::get_weight(env, pitch_id)
        .checked_add(amount)
        .ok_or(Error::Overflow)?;
    let backer_total = storage::get_backer_total(env, &backer)
        .checked_add(amount)
        .ok_or(Error::Overflow)?;

    token::Client::new(env, &config.asset).transfer(
        &backer,
        &env.current_contract_address(),
        &amount,
    );

    let receipt_id = state.next_receipt_id;
    let contribution = Contribution {
        receipt_id,
        backer: backer.clone(),
        pitch_id,
        amount,
        asset,
        created_at: env.ledger().timestamp(),
        withdrawn: false,
    };
    storage::save_contribution(env, &contribution);
    storage::push_history(env, &backer, receipt_id);
    storage::set_backer_total(env, &backer, backer_total);
    storage::set_weight(env, pitch_id, weight);
    if storage::get_vote(env, &backer).is_none() {
        storage::set_vote(env, &backer, pitch_id);
    }
    receipt::mint(env, &contribution);

    state.total_contributions = total;
    state.next_receipt_id += 1;
    storage::save_state(env, &state);

    events::emit_contributed(env, config.pool_id, backer, pitch_id, amount, receipt_id);
    Ok(receipt_id)
}

/// Record an amount-less preference for `pitch_id`. Allowed once per backer
/// and only before their first contribution.
pub fn cast_vote(env: &Env, backer: Address, pitch_id: u64) -> Result<(), Error> {
    let (config, state) = storage::load_pool(env)?;
    require_voting_open(env, &config, &state)?;
    require_candidate(env, &config, pitch_id)?;

    if storage::get_vote(env, &backer).is_some() || !storage::get_history(env, &backer).is_empty() {
        return Err(Error::AlreadyVoted);
    }
    storage::set_vote(env, &backer, pitch_id);

    events::emit_vote_cast(env, config.pool_id, backer, pitch_id);
    Ok(())
}

/// Withdraw every live contribution of `backer`, keeping the penalty in the
/// pool. Returns the amount refunded.
pub fn withdraw_early(env: &Env, backer: Address) -> Result<i128, Error> {
    let (config, mut state) = storage::load_pool(env)?;
    require_voting_open(env, &config, &state)?;

    let history = storage::get_history(env, &backer);
    if history.is_empty() {
        return Err(Error::NoContribution);
    }

    let mut withdrawn_amount: i128 = 0;
    let mut penalty_total: i128 = 0;
    let mut refund_total: i128 = 0;

    for receipt_id in history.iter() {
        let mut contribution = match storage::load_contribution(env, receipt_id) {
            Some(c) if !c.withdrawn => c,
            _ => continue,
        };
        let (penalty, refund) = math::early_withdrawal_penalty(contribution.amount, config.penalty_bps)?;

        let weight = storage::get_weight(env, contribution.pitch_id) - contribution.amount;
        storage::set_weight(env, contribution.pitch_id, weight);

        contribution.withdrawn = true;
        storage::save_contribution(env, &contribution);
        receipt::burn(env, receipt_id)?;

        withdrawn_amount += contribution.amount;
        penalty_total += penalty;
        refund_total += refund;
    }

    if withdrawn_amount == 0 {
        return Err(Error::NoContribution);
    }

    state.total_contributions -= withdrawn_amount;
    state.total_penalties = state
        .total_penalties
        .checked_add(penalty_total)
        .ok_or(Error::Overflow)?;
    storage::save_state(env, &state);
    storage::set_backer_total(env, &backer, 0);

    if refund_total > 0 {
        token::Client::new(env, &config.asset).transfer(
            &env.current_contract_address(),
            &backer,
            &refund_total,
        );
    }

    events::emit_withdrawn(env, config.pool_id, backer, withdrawn_amount, penalty_total, refund_total);
    Ok(refund_total)
}
