//! Ending the vote, picking winners, and the failure/refund path.
//!
//! ## Winner selection
//!
//! Up to `max_winners` candidates with the highest non-zero weight win.
//! Equal weights are ordered by position in the candidate list, so the
//! earlier-submitted pitch takes a contested last slot.

use soroban_sdk::{log, token, Address, Env, Vec};

use shared::{math, PoolConfig};

use crate::errors::Error;
use crate::events;
use crate::storage;
use crate::types::{PoolPhase, PoolState, WinnerAllocation};

/// Close voting. Returns the phase the pool lands in.
pub fn end_voting(env: &Env) -> Result<PoolPhase, Error> {
    let (config, mut state) = storage::load_pool(env)?;

    if state.phase != PoolPhase::Active {
        return Err(Error::PoolNotActive);
    }
    let now = env.ledger().timestamp();
    if now < config.voting_deadline {
        log!(env, "voting still open", now, config.voting_deadline);
        return Err(Error::DeadlineNotReached);
    }

    if state.total_contributions >= config.funding_goal {
        let winners = allocate(env, &config, &mut state)?;
        state.phase = PoolPhase::Funded;
        storage::save_winners(env, &winners);
        storage::save_state(env, &state);
        pay_treasury(env, &config, state.platform_fee + state.total_penalties);
        events::emit_voting_ended(
            env,
            config.pool_id,
            state.phase,
            state.total_contributions,
            state.platform_fee,
            winners.len(),
        );
    } else if now >= config.funding_deadline {
        fail(env, &config, &mut state);
    } else {
        state.phase = PoolPhase::VotingEnded;
        storage::save_state(env, &state);
        events::emit_voting_ended(env, config.pool_id, state.phase, state.total_contributions, 0, 0);
    }
    Ok(state.phase)
}

/// Move an under-funded pool to `Failed` once the funding deadline passed.
pub fn finalize_funding(env: &Env) -> Result<(), Error> {
    let (config, mut state) = storage::load_pool(env)?;

    match state.phase {
        PoolPhase::Active | PoolPhase::VotingEnded => {}
        _ => return Err(Error::PoolNotActive),
    }
    let now = env.ledger().timestamp();
    if now < config.funding_deadline {
        log!(env, "funding window open", now, config.funding_deadline);
        return Err(Error::DeadlineNotReached);
    }
    if state.total_contributions >= config.funding_goal {
        return Err(Error::GoalAlreadyMet);
    }

    fail(env, &config, &mut state);
    Ok(())
}

/// Pay back a backer's non-withdrawn contributions in full, once.
pub fn claim_refund(env: &Env, backer: Address) -> Result<i128, Error> {
    let (config, mut state) = storage::load_pool(env)?;

    if state.phase != PoolPhase::Failed {
        return Err(Error::PoolNotFailed);
    }
    if storage::has_refunded(env, &backer) {
        return Err(Error::AlreadyRefunded);
    }
    let amount = storage::get_backer_total(env, &backer);
    if amount <= 0 {
        return Err(Error::NoContribution);
    }

    storage::set_refunded(env, &backer);
    state.total_refunded += amount;
    storage::save_state(env, &state);

    token::Client::new(env, &config.asset).transfer(&env.current_contract_address(), &backer, &amount);

    events::emit_refunded(env, config.pool_id, backer, amount);
    Ok(amount)
}

/// What `backer` could still claim from a failed pool.
pub fn refundable(env: &Env, backer: &Address) -> i128 {
    match storage::load_state(env) {
        Ok(state) if state.phase == PoolPhase::Failed && !storage::has_refunded(env, backer) => {
            storage::get_backer_total(env, backer)
        }
        _ => 0,
    }
}

/// Rank candidates by weight, ties to the earlier candidate.
pub fn select_winners(env: &Env, config: &PoolConfig) -> Vec<WinnerAllocation> {
    let mut weights: Vec<i128> = Vec::new(env);
    for candidate in config.candidates.iter() {
        weights.push_back(storage::get_weight(env, candidate.pitch_id));
    }

    let mut taken: Vec<bool> = Vec::new(env);
    for _ in 0..weights.len() {
        taken.push_back(false);
    }

    let mut winners = Vec::new(env);
    for _ in 0..config.max_winners {
        let mut best: Option<(u32, i128)> = None;
        for i in 0..weights.len() {
            let weight = weights.get_unchecked(i);
            if taken.get_unchecked(i) || weight <= 0 {
                continue;
            }
            // strict > keeps the earliest index among equals
            if best.map_or(true, |(_, w)| weight > w) {
                best = Some((i, weight));
            }
        }
        let Some((index, weight)) = best else { break };
        taken.set(index, true);

        let candidate = config.candidates.get_unchecked(index);
        winners.push_back(WinnerAllocation {
            pitch_id: candidate.pitch_id,
            owner: candidate.owner,
            vote_weight: weight,
            allocation_bps: 0,
            amount: 0,
            released: 0,
            reclaimed: 0,
        });
    }
    winners
}

/// Take the platform fee and split the rest across the winners.
fn allocate(env: &Env, config: &PoolConfig, state: &mut PoolState) -> Result<Vec<WinnerAllocation>, Error> {
    let mut winners = select_winners(env, config);

    let fee = math::platform_fee(state.total_contributions, config.platform_fee_bps)?;
    let net = state.total_contributions - fee;

    let mut weights = Vec::new(env);
    for w in winners.iter() {
        weights.push_back(w.vote_weight);
    }
    let percents = math::allocation_percents(env, &weights)?;
    let amounts = math::proportional_distribution(env, net, &weights)?;

    for i in 0..winners.len() {
        let mut w = winners.get_unchecked(i);
        w.allocation_bps = percents.get_unchecked(i);
        w.amount = amounts.get_unchecked(i);
        winners.set(i, w);
    }

    state.platform_fee = fee;
    Ok(winners)
}

fn fail(env: &Env, config: &PoolConfig, state: &mut PoolState) {
    state.phase = PoolPhase::Failed;
    storage::save_state(env, state);
    pay_treasury(env, config, state.total_penalties);
    events::emit_pool_failed(env, config.pool_id, state.total_contributions, state.total_penalties);
}

fn pay_treasury(env: &Env, config: &PoolConfig, amount: i128) {
    if amount > 0 {
        token::Client::new(env, &config.asset).transfer(
            &env.current_contract_address(),
            &config.treasury,
            &amount,
        );
    }
}
