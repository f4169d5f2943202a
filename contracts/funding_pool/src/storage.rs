//! # Storage
//!
//! Typed helpers over the two storage tiers a pool uses.
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key       | Type                      | Description                         |
//! |-----------|---------------------------|-------------------------------------|
//! | `Factory` | `Address`                 | Factory allowed to call `initialize`|
//! | `Config`  | `PoolConfig`              | Immutable pool configuration        |
//! | `State`   | `PoolState`               | Phase and running totals            |
//! | `Winners` | `Vec<WinnerAllocation>`   | Set once voting ends with goal met  |
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                     | Type             | Description                          |
//! |-------------------------|------------------|--------------------------------------|
//! | `Weight(pitch)`         | `i128`           | Current vote weight                  |
//! | `Contribution(receipt)` | `Contribution`   | Contribution record                  |
//! | `History(backer)`       | `Vec<u64>`       | Every receipt id the backer minted   |
//! | `BackerTotal(backer)`   | `i128`           | Sum of non-withdrawn contributions   |
//! | `Vote(backer)`          | `u64`            | Backer's declared candidate          |
//! | `Refunded(backer)`      | `bool`           | Refund already paid out              |
//! | `Receipt(id)`           | `Receipt`        | Live receipt                         |
//! | `Holdings(holder)`      | `Vec<u64>`       | Live receipt ids held                |
//! | `Milestones(pitch)`     | `Vec<Milestone>` | Milestone schedule of a winner       |

use soroban_sdk::{contracttype, Address, Env, Vec};

use shared::PoolConfig;

use crate::errors::Error;
use crate::types::{Contribution, Milestone, PoolState, Receipt, WinnerAllocation};

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Factory,
    Config,
    State,
    Winners,
    Weight(u64),
    Contribution(u64),
    History(Address),
    BackerTotal(Address),
    Vote(Address),
    Refunded(Address),
    Receipt(u64),
    Holdings(Address),
    Milestones(u64),
}

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

fn get_persistent<T>(env: &Env, key: &DataKey) -> Option<T>
where
    T: soroban_sdk::TryFromVal<Env, soroban_sdk::Val>,
{
    let value = env.storage().persistent().get(key);
    if value.is_some() {
        bump_persistent(env, key);
    }
    value
}

fn set_persistent<T>(env: &Env, key: &DataKey, value: &T)
where
    T: soroban_sdk::IntoVal<Env, soroban_sdk::Val>,
{
    env.storage().persistent().set(key, value);
    bump_persistent(env, key);
}

// ─────────────────────────────────────────────────────────
// Instance entries
// ─────────────────────────────────────────────────────────

pub fn set_factory(env: &Env, factory: &Address) {
    env.storage().instance().set(&DataKey::Factory, factory);
    bump_instance(env);
}

pub fn get_factory(env: &Env) -> Result<Address, Error> {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Factory)
        .ok_or(Error::NotInitialized)
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn save_config(env: &Env, config: &PoolConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    bump_instance(env);
}

pub fn load_config(env: &Env) -> Result<PoolConfig, Error> {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(Error::NotInitialized)
}

pub fn save_state(env: &Env, state: &PoolState) {
    env.storage().instance().set(&DataKey::State, state);
}

pub fn load_state(env: &Env) -> Result<PoolState, Error> {
    env.storage()
        .instance()
        .get(&DataKey::State)
        .ok_or(Error::NotInitialized)
}

/// Read config and state together; the common prologue of every mutation.
pub fn load_pool(env: &Env) -> Result<(PoolConfig, PoolState), Error> {
    let config = load_config(env)?;
    let state = load_state(env)?;
    Ok((config, state))
}

pub fn save_winners(env: &Env, winners: &Vec<WinnerAllocation>) {
    env.storage().instance().set(&DataKey::Winners, winners);
}

pub fn load_winners(env: &Env) -> Vec<WinnerAllocation> {
    env.storage()
        .instance()
        .get(&DataKey::Winners)
        .unwrap_or_else(|| Vec::new(env))
}

// ─────────────────────────────────────────────────────────
// Vote weights
// ─────────────────────────────────────────────────────────

pub fn get_weight(env: &Env, pitch_id: u64) -> i128 {
    get_persistent(env, &DataKey::Weight(pitch_id)).unwrap_or(0)
}

pub fn set_weight(env: &Env, pitch_id: u64, weight: i128) {
    set_persistent(env, &DataKey::Weight(pitch_id), &weight);
}

// ─────────────────────────────────────────────────────────
// Contributions and per-backer bookkeeping
// ─────────────────────────────────────────────────────────

pub fn save_contribution(env: &Env, contribution: &Contribution) {
    set_persistent(env, &DataKey::Contribution(contribution.receipt_id), contribution);
}

pub fn load_contribution(env: &Env, receipt_id: u64) -> Option<Contribution> {
    get_persistent(env, &DataKey::Contribution(receipt_id))
}

pub fn get_history(env: &Env, backer: &Address) -> Vec<u64> {
    get_persistent(env, &DataKey::History(backer.clone())).unwrap_or_else(|| Vec::new(env))
}

pub fn push_history(env: &Env, backer: &Address, receipt_id: u64) {
    let mut history = get_history(env, backer);
    history.push_back(receipt_id);
    set_persistent(env, &DataKey::History(backer.clone()), &history);
}

pub fn get_backer_total(env: &Env, backer: &Address) -> i128 {
    get_persistent(env, &DataKey::BackerTotal(backer.clone())).unwrap_or(0)
}

pub fn set_backer_total(env: &Env, backer: &Address, total: i128) {
    set_persistent(env, &DataKey::BackerTotal(backer.clone()), &total);
}

pub fn get_vote(env: &Env, backer: &Address) -> Option<u64> {
    get_persistent(env, &DataKey::Vote(backer.clone()))
}

pub fn set_vote(env: &Env, backer: &Address, pitch_id: u64) {
    set_persistent(env, &DataKey::Vote(backer.clone()), &pitch_id);
}

pub fn has_refunded(env: &Env, backer: &Address) -> bool {
    get_persistent(env, &DataKey::Refunded(backer.clone())).unwrap_or(false)
}

pub fn set_refunded(env: &Env, backer: &Address) {
    set_persistent(env, &DataKey::Refunded(backer.clone()), &true);
}

// ─────────────────────────────────────────────────────────
// Receipts
// ─────────────────────────────────────────────────────────

pub fn save_receipt(env: &Env, receipt: &Receipt) {
    set_persistent(env, &DataKey::Receipt(receipt.id), receipt);
}

pub fn load_receipt(env: &Env, id: u64) -> Option<Receipt> {
    get_persistent(env, &DataKey::Receipt(id))
}

pub fn remove_receipt(env: &Env, id: u64) {
    env.storage().persistent().remove(&DataKey::Receipt(id));
}

pub fn get_holdings(env: &Env, holder: &Address) -> Vec<u64> {
    get_persistent(env, &DataKey::Holdings(holder.clone())).unwrap_or_else(|| Vec::new(env))
}

pub fn set_holdings(env: &Env, holder: &Address, ids: &Vec<u64>) {
    set_persistent(env, &DataKey::Holdings(holder.clone()), ids);
}

// ─────────────────────────────────────────────────────────
// Milestones
// ─────────────────────────────────────────────────────────

pub fn has_milestones(env: &Env, pitch_id: u64) -> bool {
    env.storage().persistent().has(&DataKey::Milestones(pitch_id))
}

pub fn load_milestones(env: &Env, pitch_id: u64) -> Result<Vec<Milestone>, Error> {
    get_persistent(env, &DataKey::Milestones(pitch_id)).ok_or(Error::MilestonesNotSet)
}

pub fn save_milestones(env: &Env, pitch_id: u64, milestones: &Vec<Milestone>) {
    set_persistent(env, &DataKey::Milestones(pitch_id), milestones);
}
