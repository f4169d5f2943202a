//! # Pool Factory Contract
//!
//! Entry point of the platform. Holds the protocol parameters and the role
//! table, runs the pitch registry, and deploys one fresh `funding_pool`
//! instance per pool.
//!
//! | Area        | Entry Point(s)                                                    |
//! |-------------|-------------------------------------------------------------------|
//! | Bootstrap   | [`PoolFactory::init`]                                             |
//! | Roles       | `grant_role`, `revoke_role`, `transfer_super_admin`, `role_of`, `has_role` |
//! | Emergency   | `pause`, `unpause`, `is_paused`                                   |
//! | Parameters  | `set_params`, `get_params`, `set_pool_wasm`                       |
//! | Pitches     | `submit_pitch`, `approve_pitch`, `reject_pitch`, `get_pitch`, `pitch_count` |
//! | Pools       | `create_pool`, `get_pool`, `get_pool_address`, `pool_count`       |
//!
//! Pools never call back into the factory. Everything a pool needs from the
//! registry (the candidate set and each founder) is copied into its
//! [`PoolConfig`] at creation.

#![no_std]

#[cfg(test)]
extern crate std;

use soroban_sdk::{contract, contractimpl, Address, BytesN, Env, String, Vec};

use shared::constants::{
    BASIS_POINTS_DENOMINATOR, DEFAULT_PENALTY_BPS, DEFAULT_PLATFORM_FEE_BPS, MAX_APPROVERS,
    MAX_CANDIDATES, MAX_CATEGORY_LEN, MAX_FUNDING_EXTENSION, MAX_FUNDING_GOAL, MAX_NAME_LEN,
    MAX_PLATFORM_FEE_BPS, MAX_VOTING_DURATION, MAX_WINNERS, MIN_CANDIDATES, MIN_FUNDING_GOAL,
    MIN_VOTING_DURATION,
};
use shared::{validation, Candidate, DisputePolicy, FundingPoolClient, PoolConfig, PoolParams};

mod errors;
mod events;
pub mod rbac;
mod registry;
mod storage;
mod types;


pub use errors::Error;
pub use rbac::Role;
pub use types::{Pitch, PitchStatus, PoolRecord, PoolRequest};

#[contract]
pub struct PoolFactory;

#[contractimpl]
impl PoolFactory {
    // ─────────────────────────────────────────────────────────
    // Bootstrap
    // ─────────────────────────────────────────────────────────

    /// Set the SuperAdmin and seed default parameters paying into `treasury`.
    ///
    /// Fails with `AlreadyInitialized` on a second call.
    pub fn init(env: Env, super_admin: Address, treasury: Address) -> Result<(), Error> {
        super_admin.require_auth();
        validation::require_non_zero_address(&env, &treasury)?;
        rbac::init_super_admin(&env, &super_admin)?;

        storage::save_params(
            &env,
            &PoolParams {
                platform_fee_bps: DEFAULT_PLATFORM_FEE_BPS,
                penalty_bps: DEFAULT_PENALTY_BPS,
                min_goal: MIN_FUNDING_GOAL,
                max_goal: MAX_FUNDING_GOAL,
                min_voting_duration: MIN_VOTING_DURATION,
                max_voting_duration: MAX_VOTING_DURATION,
                max_winners: MAX_WINNERS,
                max_candidates: MAX_CANDIDATES,
                treasury,
                dispute_policy: DisputePolicy::AdminResolution,
            },
        );
        storage::set_paused(&env, false);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Role management
    // ─────────────────────────────────────────────────────────

    /// Grant `role` to `target`. `caller` must be SuperAdmin or Admin.
    pub fn grant_role(env: Env, caller: Address, target: Address, role: Role) -> Result<(), Error> {
        caller.require_auth();
        rbac::grant_role(&env, &caller, &target, role)
    }

    /// Revoke any role from `target`. `caller` must be SuperAdmin or Admin.
    pub fn revoke_role(env: Env, caller: Address, target: Address) -> Result<(), Error> {
        caller.require_auth();
        rbac::revoke_role(&env, &caller, &target)
    }

    /// Transfer SuperAdmin to `new_super_admin`. Both parties must authorize.
    pub fn transfer_super_admin(
        env: Env,
        current_super_admin: Address,
        new_super_admin: Address,
    ) -> Result<(), Error> {
        current_super_admin.require_auth();
        new_super_admin.require_auth();
        rbac::transfer_super_admin(&env, &current_super_admin, &new_super_admin)
    }

    pub fn role_of(env: Env, address: Address) -> Option<Role> {
        rbac::get_role(&env, &address)
    }

    pub fn has_role(env: Env, address: Address, role: Role) -> bool {
        rbac::has_role(&env, &address, role)
    }

    // ─────────────────────────────────────────────────────────
    // Emergency control
    // ─────────────────────────────────────────────────────────

    /// Halt pitch intake and pool creation. Deployed pools keep running.
    pub fn pause(env: Env, caller: Address) -> Result<(), Error> {
        caller.require_auth();
        rbac::require_admin_or_above(&env, &caller)?;
        storage::set_paused(&env, true);
        events::emit_paused(&env, caller);
        Ok(())
    }

    pub fn unpause(env: Env, caller: Address) -> Result<(), Error> {
        caller.require_auth();
        rbac::require_admin_or_above(&env, &caller)?;
        storage::set_paused(&env, false);
        events::emit_unpaused(&env, caller);
        Ok(())
    }

    pub fn is_paused(env: Env) -> bool {
        storage::is_paused(&env)
    }

    // ─────────────────────────────────────────────────────────
    // Parameters
    // ─────────────────────────────────────────────────────────

    /// Replace the protocol parameters. Only affects pools created afterwards.
    pub fn set_params(env: Env, caller: Address, params: PoolParams) -> Result<(), Error> {
        caller.require_auth();
        rbac::require_admin_or_above(&env, &caller)?;
        Self::validate_params(&env, &params)?;
        storage::save_params(&env, &params);
        events::emit_params_updated(&env, caller, params);
        Ok(())
    }

    pub fn get_params(env: Env) -> Result<PoolParams, Error> {
        storage::load_params(&env)
    }

    /// Record the installed wasm hash new pools are deployed from.
    pub fn set_pool_wasm(env: Env, caller: Address, wasm_hash: BytesN<32>) -> Result<(), Error> {
        caller.require_auth();
        rbac::require_admin_or_above(&env, &caller)?;
        storage::set_pool_wasm(&env, &wasm_hash);
        events::emit_pool_wasm_set(&env, caller, wasm_hash);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Pitch registry
    // ─────────────────────────────────────────────────────────

    /// Submit a pitch for review. Returns its id.
    pub fn submit_pitch(env: Env, founder: Address, title: String) -> Result<u64, Error> {
        founder.require_auth();
        Self::require_not_paused(&env)?;
        registry::submit(&env, founder, title)
    }

    pub fn approve_pitch(env: Env, reviewer: Address, pitch_id: u64) -> Result<(), Error> {
        reviewer.require_auth();
        rbac::require_reviewer(&env, &reviewer)?;
        registry::review(&env, reviewer, pitch_id, true)
    }

    pub fn reject_pitch(env: Env, reviewer: Address, pitch_id: u64) -> Result<(), Error> {
        reviewer.require_auth();
        rbac::require_reviewer(&env, &reviewer)?;
        registry::review(&env, reviewer, pitch_id, false)
    }

    pub fn get_pitch(env: Env, pitch_id: u64) -> Result<Pitch, Error> {
        storage::load_pitch(&env, pitch_id)
    }

    pub fn pitch_count(env: Env) -> u64 {
        storage::pitch_count(&env)
    }

    // ─────────────────────────────────────────────────────────
    // Pools
    // ─────────────────────────────────────────────────────────

    /// Deploy and initialize a new pool over the approved `request.pitch_ids`.
    ///
    /// `creator` becomes the pool admin. Voting runs for `voting_duration`
    /// seconds from now; the funding window stays open `funding_duration`
    /// seconds longer. The candidate order is the order of `pitch_ids`.
    pub fn create_pool(env: Env, creator: Address, request: PoolRequest) -> Result<PoolRecord, Error> {
        creator.require_auth();
        Self::require_not_paused(&env)?;
        rbac::require_can_create_pool(&env, &creator)?;
        let params = storage::load_params(&env)?;
        Self::validate_request(&env, &params, &creator, &request)?;

        let PoolRequest {
            name,
            category,
            funding_goal,
            voting_duration,
            funding_duration,
            asset,
            min_contribution,
            max_contribution,
            pitch_ids,
            approvers,
            approvals_required,
        } = request;

        let mut pitches = Vec::new(&env);
        let mut candidates = Vec::new(&env);
        for pitch_id in pitch_ids.iter() {
            let pitch = registry::require_approved(&env, pitch_id)?;
            candidates.push_back(Candidate {
                pitch_id,
                owner: pitch.founder.clone(),
            });
            pitches.push_back(pitch);
        }

        let wasm_hash = storage::get_pool_wasm(&env)?;
        let pool_id = storage::next_pool_id(&env);
        let now = env.ledger().timestamp();
        let voting_deadline = now + voting_duration;

        let config = PoolConfig {
            pool_id,
            name: name.clone(),
            category,
            funding_goal,
            voting_deadline,
            funding_deadline: voting_deadline + funding_duration,
            asset,
            min_contribution,
            max_contribution,
            candidates,
            admin: creator.clone(),
            treasury: params.treasury,
            platform_fee_bps: params.platform_fee_bps,
            penalty_bps: params.penalty_bps,
            max_winners: params.max_winners,
            approvers,
            approvals_required,
            dispute_policy: params.dispute_policy,
        };

        let factory = env.current_contract_address();
        let address = env
            .deployer()
            .with_current_contract(Self::pool_salt(&env, pool_id))
            .deploy_v2(wasm_hash, (factory.clone(),));
        FundingPoolClient::new(&env, &address).initialize(&factory, &config);

        for pitch in pitches.iter() {
            registry::mark_in_pool(&env, pitch, pool_id);
        }

        let record = PoolRecord {
            id: pool_id,
            address: address.clone(),
            creator: creator.clone(),
            name: name.clone(),
            created_at: now,
        };
        storage::save_pool(&env, &record);

        events::emit_pool_created(&env, pool_id, address, creator, name, pitch_ids.len());
        Ok(record)
    }

    pub fn get_pool(env: Env, pool_id: u64) -> Result<PoolRecord, Error> {
        storage::load_pool(&env, pool_id)
    }

    pub fn get_pool_address(env: Env, pool_id: u64) -> Result<Address, Error> {
        Ok(storage::load_pool(&env, pool_id)?.address)
    }

    pub fn pool_count(env: Env) -> u64 {
        storage::pool_count(&env)
    }

    // ─────────────────────────────────────────────────────────
    // Internal Helpers
    // ─────────────────────────────────────────────────────────

    fn require_not_paused(env: &Env) -> Result<(), Error> {
        if storage::is_paused(env) {
            return Err(Error::ProtocolPaused);
        }
        Ok(())
    }

    /// Deterministic per-pool salt: the pool id, big-endian, right-aligned.
    fn pool_salt(env: &Env, pool_id: u64) -> BytesN<32> {
        let mut salt = [0u8; 32];
        salt[24..].copy_from_slice(&pool_id.to_be_bytes());
        BytesN::from_array(env, &salt)
    }

    fn validate_request(
        env: &Env,
        params: &PoolParams,
        creator: &Address,
        request: &PoolRequest,
    ) -> Result<(), Error> {
        validation::require_non_empty_string(env, &request.name, MAX_NAME_LEN)?;
        validation::require_non_empty_string(env, &request.category, MAX_CATEGORY_LEN)?;
        validation::require_goal_in_range(env, request.funding_goal, params.min_goal, params.max_goal)?;
        validation::require_duration_in_range(
            env,
            request.voting_duration,
            params.min_voting_duration,
            params.max_voting_duration,
        )?;
        validation::require_duration_in_range(env, request.funding_duration, 0, MAX_FUNDING_EXTENSION)?;
        validation::require_non_zero_address(env, &request.asset)?;
        validation::require_contribution_bounds(env, request.min_contribution, request.max_contribution)?;
        validation::require_candidate_ids(env, &request.pitch_ids)?;
        if request.pitch_ids.len() > params.max_candidates {
            return Err(Error::TooManyCandidates);
        }
        validation::require_approval_threshold(
            env,
            request.approvers.len(),
            request.approvals_required,
            MAX_APPROVERS,
        )?;
        validation::require_distinct_approvers(env, &request.approvers, creator)?;
        Ok(())
    }

    fn validate_params(env: &Env, params: &PoolParams) -> Result<(), Error> {
        validation::require_basis_points(env, params.platform_fee_bps, MAX_PLATFORM_FEE_BPS)?;
        validation::require_basis_points(env, params.penalty_bps, BASIS_POINTS_DENOMINATOR)?;
        if params.min_goal <= 0 || params.max_goal > MAX_FUNDING_GOAL {
            return Err(Error::InvalidGoal);
        }
        validation::require_goal_in_range(env, params.max_goal, params.min_goal, MAX_FUNDING_GOAL)?;
        if params.min_voting_duration == 0 {
            return Err(Error::InvalidDuration);
        }
        validation::require_duration_in_range(
            env,
            params.max_voting_duration,
            params.min_voting_duration,
            MAX_VOTING_DURATION,
        )?;
        validation::require_winner_count(env, params.max_winners, MAX_WINNERS)?;
        if params.max_candidates < MIN_CANDIDATES {
            return Err(Error::NoCandidates);
        }
        if params.max_candidates > MAX_CANDIDATES {
            return Err(Error::TooManyCandidates);
        }
        validation::require_non_zero_address(env, &params.treasury)?;
        Ok(())
    }
}
