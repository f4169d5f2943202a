//! # Storage
//!
//! ## Instance storage
//!
//! | Key         | Type          | Description                              |
//! |-------------|---------------|------------------------------------------|
//! | `Params`    | `PoolParams`  | Protocol-wide parameters                 |
//! | `PoolWasm`  | `BytesN<32>`  | Installed wasm hash of the pool contract |
//! | `Paused`    | `bool`        | Blocks pitch intake and pool creation    |
//! | `PoolCount` | `u64`         | Next pool id                             |
//! | `PitchCount`| `u64`         | Next pitch id                            |
//!
//! ## Persistent storage
//!
//! | Key          | Type         |
//! |--------------|--------------|
//! | `Pool(id)`   | `PoolRecord` |
//! | `Pitch(id)`  | `Pitch`      |

use soroban_sdk::{contracttype, BytesN, Env};

use shared::PoolParams;

use crate::errors::Error;
use crate::types::{Pitch, PoolRecord};

const DAY_IN_LEDGERS: u32 = 17_280;

const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Params,
    PoolWasm,
    Paused,
    PoolCount,
    PitchCount,
    Pool(u64),
    Pitch(u64),
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

// ── Params / wasm / pause ────────────────────────────────────────────

pub fn save_params(env: &Env, params: &PoolParams) {
    env.storage().instance().set(&DataKey::Params, params);
    bump_instance(env);
}

pub fn load_params(env: &Env) -> Result<PoolParams, Error> {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Params)
        .ok_or(Error::NotInitialized)
}

pub fn set_pool_wasm(env: &Env, hash: &BytesN<32>) {
    env.storage().instance().set(&DataKey::PoolWasm, hash);
    bump_instance(env);
}

pub fn get_pool_wasm(env: &Env) -> Result<BytesN<32>, Error> {
    env.storage()
        .instance()
        .get(&DataKey::PoolWasm)
        .ok_or(Error::PoolWasmNotSet)
}

pub fn set_paused(env: &Env, paused: bool) {
    env.storage().instance().set(&DataKey::Paused, &paused);
    bump_instance(env);
}

pub fn is_paused(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Paused)
        .unwrap_or(false)
}

// ── Counters ─────────────────────────────────────────────────────────

fn next_id(env: &Env, key: &DataKey) -> u64 {
    let id: u64 = env.storage().instance().get(key).unwrap_or(0);
    env.storage().instance().set(key, &(id + 1));
    bump_instance(env);
    id
}

/// Allocate the next pool id.
pub fn next_pool_id(env: &Env) -> u64 {
    next_id(env, &DataKey::PoolCount)
}

pub fn pool_count(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::PoolCount)
        .unwrap_or(0)
}

pub fn next_pitch_id(env: &Env) -> u64 {
    next_id(env, &DataKey::PitchCount)
}

pub fn pitch_count(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::PitchCount)
        .unwrap_or(0)
}

// ── Records ──────────────────────────────────────────────────────────

pub fn save_pool(env: &Env, record: &PoolRecord) {
    let key = DataKey::Pool(record.id);
    env.storage().persistent().set(&key, record);
    bump_persistent(env, &key);
}

pub fn load_pool(env: &Env, id: u64) -> Result<PoolRecord, Error> {
    let key = DataKey::Pool(id);
    let record = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(Error::PoolNotFound)?;
    bump_persistent(env, &key);
    Ok(record)
}

pub fn save_pitch(env: &Env, pitch: &Pitch) {
    let key = DataKey::Pitch(pitch.id);
    env.storage().persistent().set(&key, pitch);
    bump_persistent(env, &key);
}

pub fn load_pitch(env: &Env, id: u64) -> Result<Pitch, Error> {
    let key = DataKey::Pitch(id);
    let pitch = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(Error::PitchNotFound)?;
    bump_persistent(env, &key);
    Ok(pitch)
}
