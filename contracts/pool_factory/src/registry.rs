//! Pitch registry.
//!
//! Founders submit pitches, reviewers approve or reject them, and the
//! factory moves approved pitches to `InPool` when it places them in a pool.
//! Pools only ever read the founder address, copied into their config.

use soroban_sdk::{log, Address, Env, String};

use shared::constants::MAX_NAME_LEN;
use shared::validation;

use crate::errors::Error;
use crate::events;
use crate::storage;
use crate::types::{Pitch, PitchStatus};

pub fn submit(env: &Env, founder: Address, title: String) -> Result<u64, Error> {
    validation::require_non_zero_address(env, &founder)?;
    validation::require_non_empty_string(env, &title, MAX_NAME_LEN)?;

    let id = storage::next_pitch_id(env);
    let pitch = Pitch {
        id,
        founder: founder.clone(),
        title: title.clone(),
        status: PitchStatus::Pending,
        submitted_at: env.ledger().timestamp(),
        pool_id: None,
    };
    storage::save_pitch(env, &pitch);

    events::emit_pitch_submitted(env, id, founder, title);
    Ok(id)
}

/// Move a `Pending` pitch to `Approved` or `Rejected`.
pub fn review(env: &Env, reviewer: Address, id: u64, approve: bool) -> Result<(), Error> {
    let mut pitch = storage::load_pitch(env, id)?;
    if pitch.status != PitchStatus::Pending {
        log!(env, "pitch already reviewed", id);
        return Err(Error::PitchNotPending);
    }
    pitch.status = if approve {
        PitchStatus::Approved
    } else {
        PitchStatus::Rejected
    };
    storage::save_pitch(env, &pitch);

    events::emit_pitch_reviewed(env, id, pitch.status, reviewer);
    Ok(())
}

/// Load a pitch that may be placed in a new pool.
pub fn require_approved(env: &Env, id: u64) -> Result<Pitch, Error> {
    let pitch = storage::load_pitch(env, id)?;
    if pitch.status != PitchStatus::Approved {
        log!(env, "pitch not approved", id);
        return Err(Error::PitchNotApproved);
    }
    Ok(pitch)
}

pub fn mark_in_pool(env: &Env, mut pitch: Pitch, pool_id: u64) {
    pitch.status = PitchStatus::InPool;
    pitch.pool_id = Some(pool_id);
    storage::save_pitch(env, &pitch);
}
