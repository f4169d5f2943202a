use soroban_sdk::{contracttype, symbol_short, Address, BytesN, Env, String};

use shared::PoolParams;

use crate::types::PitchStatus;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolCreated {
    pub pool_id: u64,
    pub address: Address,
    pub creator: Address,
    pub name: String,
    pub candidates: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PitchSubmitted {
    pub pitch_id: u64,
    pub founder: Address,
    pub title: String,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PitchReviewed {
    pub pitch_id: u64,
    pub status: PitchStatus,
    pub reviewer: Address,
}

pub fn emit_pool_created(
    env: &Env,
    pool_id: u64,
    address: Address,
    creator: Address,
    name: String,
    candidates: u32,
) {
    let topics = (symbol_short!("pool_new"), pool_id);
    let data = PoolCreated {
        pool_id,
        address,
        creator,
        name,
        candidates,
    };
    env.events().publish(topics, data);
}

pub fn emit_pitch_submitted(env: &Env, pitch_id: u64, founder: Address, title: String) {
    let topics = (symbol_short!("pitch_new"), pitch_id);
    let data = PitchSubmitted {
        pitch_id,
        founder,
        title,
    };
    env.events().publish(topics, data);
}

pub fn emit_pitch_reviewed(env: &Env, pitch_id: u64, status: PitchStatus, reviewer: Address) {
    let topics = (symbol_short!("pitch_rev"), pitch_id);
    let data = PitchReviewed {
        pitch_id,
        status,
        reviewer,
    };
    env.events().publish(topics, data);
}

pub fn emit_params_updated(env: &Env, by: Address, params: PoolParams) {
    env.events().publish((symbol_short!("params"), by), params);
}

pub fn emit_pool_wasm_set(env: &Env, by: Address, hash: BytesN<32>) {
    env.events().publish((symbol_short!("wasm_set"), by), hash);
}

pub fn emit_paused(env: &Env, by: Address) {
    env.events().publish((symbol_short!("paused"), by), ());
}

pub fn emit_unpaused(env: &Env, by: Address) {
    env.events().publish((symbol_short!("unpaused"), by), ());
}
