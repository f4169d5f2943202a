//! # Funding Pool Contract
//!
//! One deployed instance per pool. Backers deposit the pool's settlement
//! asset against a shortlist of candidate pitches; each deposit is a weighted
//! vote. When voting closes the top candidates split the net pool, paid out
//! against milestones, or every backer is refunded if the goal was missed.
//!
//! | Phase        | Entry Point(s)                                             |
//! |--------------|------------------------------------------------------------|
//! | Bootstrap    | `__constructor`, [`FundingPool::initialize`]               |
//! | Roles        | `grant_approver`, `revoke_approver`, `role_of`, `has_role` |
//! | Voting       | `contribute`, `cast_vote`, `withdraw_early`                |
//! | Settlement   | `end_voting`, `finalize_funding`, `claim_refund`           |
//! | Milestones   | `set_milestones`, `submit_milestone_evidence`, `approve_milestone`, `dispute_milestone`, `resolve_dispute`, `extend_milestone_deadline`, `reclaim_milestone` |
//! | Receipts     | `transfer_receipt`, `receipt_owner`, `receipts_of`, `receipt_count` |
//! | Queries      | `get_pool_info`, `get_candidates`, `get_vote_weight`, `get_winners`, ... |
//!
//! ## Architecture
//!
//! Authorization goes through [`rbac`], persistence through [`storage`], and
//! each phase of the lifecycle has its own module. This file only wires entry
//! points to them. Every entry point either commits all of its effects or
//! returns an error and commits none.

#![no_std]

#[cfg(test)]
extern crate std;

use soroban_sdk::{contract, contractimpl, Address, Env, String, Vec};

use shared::constants::{
    MAX_APPROVERS, MAX_CATEGORY_LEN, MAX_NAME_LEN, MAX_PLATFORM_FEE_BPS, MAX_WINNERS,
    BASIS_POINTS_DENOMINATOR,
};
use shared::{validation, Candidate, PoolConfig};

mod contribution;
mod errors;
pub mod events;
mod milestone;
pub mod rbac;
mod receipt;
mod settlement;
mod storage;
mod types;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod test_milestones;
#[cfg(test)]
mod test_events;

pub use errors::Error;
pub use rbac::PoolRole;
pub use types::{
    Contribution, Milestone, MilestoneInput, MilestoneStatus, PoolInfo, PoolPhase, PoolState,
    Receipt, WinnerAllocation,
};

#[contract]
pub struct FundingPool;

#[contractimpl]
impl FundingPool {
    // ─────────────────────────────────────────────────────────
    // Bootstrap
    // ─────────────────────────────────────────────────────────

    /// Bind the pool to the factory that deploys it.
    pub fn __constructor(env: Env, factory: Address) {
        storage::set_factory(&env, &factory);
    }

    /// Install the pool configuration and open voting.
    ///
    /// - `caller` must be the factory and must authorize.
    /// - Fails with `AlreadyInitialized` on a second call.
    pub fn initialize(env: Env, caller: Address, config: PoolConfig) -> Result<(), Error> {
        caller.require_auth();
        rbac::require_factory(&env, &caller)?;
        if storage::is_initialized(&env) {
            return Err(Error::AlreadyInitialized);
        }
        Self::validate_config(&env, &config)?;

        storage::save_config(&env, &config);
        storage::save_state(
            &env,
            &PoolState {
                phase: PoolPhase::Active,
                total_contributions: 0,
                total_penalties: 0,
                platform_fee: 0,
                total_refunded: 0,
                next_receipt_id: 0,
            },
        );
        for candidate in config.candidates.iter() {
            storage::set_weight(&env, candidate.pitch_id, 0);
        }
        rbac::init_roles(&env, &config.admin, &config.approvers);

        events::emit_pool_initialized(
            &env,
            config.pool_id,
            config.asset.clone(),
            config.funding_goal,
            config.voting_deadline,
            config.candidates.len(),
        );
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Role management
    // ─────────────────────────────────────────────────────────

    /// Grant the `Approver` role. `caller` must be the pool admin.
    pub fn grant_approver(env: Env, caller: Address, target: Address) -> Result<(), Error> {
        caller.require_auth();
        rbac::grant_approver(&env, &caller, &target)
    }

    /// Revoke the `Approver` role. `caller` must be the pool admin.
    pub fn revoke_approver(env: Env, caller: Address, target: Address) -> Result<(), Error> {
        caller.require_auth();
        rbac::revoke_approver(&env, &caller, &target)
    }

    pub fn role_of(env: Env, address: Address) -> Option<PoolRole> {
        rbac::get_role(&env, &address)
    }

    pub fn has_role(env: Env, address: Address, role: PoolRole) -> bool {
        rbac::has_role(&env, &address, role)
    }

    // ─────────────────────────────────────────────────────────
    // Voting window
    // ─────────────────────────────────────────────────────────

    /// Deposit `amount` of `asset` as a vote for `pitch_id`.
    ///
    /// Returns the id of the receipt minted for this contribution.
    pub fn contribute(
        env: Env,
        backer: Address,
        amount: i128,
        asset: Address,
        pitch_id: u64,
    ) -> Result<u64, Error> {
        backer.require_auth();
        contribution::contribute(&env, backer, amount, asset, pitch_id)
    }

    /// Declare a candidate without depositing. Only before any contribution.
    pub fn cast_vote(env: Env, backer: Address, pitch_id: u64) -> Result<(), Error> {
        backer.require_auth();
        contribution::cast_vote(&env, backer, pitch_id)
    }

    /// Exit before the voting deadline, forfeiting the penalty share.
    ///
    /// Returns the amount refunded.
    pub fn withdraw_early(env: Env, backer: Address) -> Result<i128, Error> {
        backer.require_auth();
        contribution::withdraw_early(&env, backer)
    }

    // ─────────────────────────────────────────────────────────
    // Settlement
    // ─────────────────────────────────────────────────────────

    /// Close voting at or after the voting deadline. Pool admin only.
    pub fn end_voting(env: Env, caller: Address) -> Result<PoolPhase, Error> {
        caller.require_auth();
        rbac::require_admin(&env, &caller)?;
        settlement::end_voting(&env)
    }

    /// Mark an under-funded pool as failed once the funding deadline passed.
    /// Anyone may call.
    pub fn finalize_funding(env: Env) -> Result<(), Error> {
        settlement::finalize_funding(&env)
    }

    /// Refund a backer's live contributions from a failed pool.
    pub fn claim_refund(env: Env, backer: Address) -> Result<i128, Error> {
        backer.require_auth();
        settlement::claim_refund(&env, backer)
    }

    // ─────────────────────────────────────────────────────────
    // Milestones
    // ─────────────────────────────────────────────────────────

    pub fn set_milestones(
        env: Env,
        owner: Address,
        pitch_id: u64,
        milestones: Vec<MilestoneInput>,
    ) -> Result<Vec<Milestone>, Error> {
        owner.require_auth();
        milestone::set_milestones(&env, owner, pitch_id, milestones)
    }

    pub fn submit_milestone_evidence(
        env: Env,
        owner: Address,
        pitch_id: u64,
        milestone_id: u32,
        evidence: String,
    ) -> Result<(), Error> {
        owner.require_auth();
        milestone::submit_evidence(&env, owner, pitch_id, milestone_id, evidence)
    }

    /// Approve a completed milestone. Funds move on the approval that meets
    /// the threshold; returns whether that happened.
    pub fn approve_milestone(
        env: Env,
        approver: Address,
        pitch_id: u64,
        milestone_id: u32,
    ) -> Result<bool, Error> {
        approver.require_auth();
        rbac::require_approver(&env, &approver)?;
        milestone::approve(&env, approver, pitch_id, milestone_id)
    }

    pub fn dispute_milestone(
        env: Env,
        caller: Address,
        pitch_id: u64,
        milestone_id: u32,
    ) -> Result<(), Error> {
        caller.require_auth();
        rbac::require_any_of(&env, &caller, &[PoolRole::PoolAdmin, PoolRole::Approver])?;
        milestone::dispute(&env, caller, pitch_id, milestone_id)
    }

    pub fn resolve_dispute(
        env: Env,
        caller: Address,
        pitch_id: u64,
        milestone_id: u32,
        uphold: bool,
    ) -> Result<(), Error> {
        caller.require_auth();
        rbac::require_admin(&env, &caller)?;
        milestone::resolve_dispute(&env, pitch_id, milestone_id, uphold)
    }

    /// Move a milestone's deadline later. Pool admin only.
    pub fn extend_milestone_deadline(
        env: Env,
        caller: Address,
        pitch_id: u64,
        milestone_id: u32,
        new_deadline: u64,
    ) -> Result<(), Error> {
        caller.require_auth();
        rbac::require_admin(&env, &caller)?;
        milestone::extend_deadline(&env, pitch_id, milestone_id, new_deadline)
    }

    /// Return an expired milestone's tranche to the treasury. Anyone may call.
    pub fn reclaim_milestone(env: Env, pitch_id: u64, milestone_id: u32) -> Result<i128, Error> {
        milestone::reclaim(&env, pitch_id, milestone_id)
    }

    // ─────────────────────────────────────────────────────────
    // Receipts
    // ─────────────────────────────────────────────────────────

    /// Always fails: receipts are bound to the backer that minted them.
    pub fn transfer_receipt(env: Env, from: Address, to: Address, receipt_id: u64) -> Result<(), Error> {
        from.require_auth();
        receipt::transfer(&env, &from, &to, receipt_id)
    }

    pub fn receipt_owner(env: Env, receipt_id: u64) -> Result<Address, Error> {
        receipt::owner_of(&env, receipt_id)
    }

    pub fn receipts_of(env: Env, holder: Address) -> Vec<Receipt> {
        receipt::receipts_of(&env, &holder)
    }

    pub fn receipt_count(env: Env, holder: Address) -> u32 {
        receipt::balance_of(&env, &holder)
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    pub fn get_pool_info(env: Env) -> Result<PoolInfo, Error> {
        let (config, state) = storage::load_pool(&env)?;
        Ok(PoolInfo {
            pool_id: config.pool_id,
            name: config.name,
            category: config.category,
            funding_goal: config.funding_goal,
            voting_deadline: config.voting_deadline,
            funding_deadline: config.funding_deadline,
            total_raised: state.total_contributions,
            phase: state.phase,
            min_contribution: config.min_contribution,
            max_contribution: config.max_contribution,
        })
    }

    pub fn get_config(env: Env) -> Result<PoolConfig, Error> {
        storage::load_config(&env)
    }

    pub fn get_state(env: Env) -> Result<PoolState, Error> {
        storage::load_state(&env)
    }

    pub fn get_candidates(env: Env) -> Result<Vec<Candidate>, Error> {
        Ok(storage::load_config(&env)?.candidates)
    }

    pub fn get_vote_weight(env: Env, pitch_id: u64) -> i128 {
        storage::get_weight(&env, pitch_id)
    }

    /// Sum of the backer's non-withdrawn contributions.
    pub fn get_backer_total(env: Env, backer: Address) -> i128 {
        storage::get_backer_total(&env, &backer)
    }

    /// Every contribution the backer made, withdrawn ones included.
    pub fn get_contributions(env: Env, backer: Address) -> Vec<Contribution> {
        let mut out = Vec::new(&env);
        for id in storage::get_history(&env, &backer).iter() {
            if let Some(c) = storage::load_contribution(&env, id) {
                out.push_back(c);
            }
        }
        out
    }

    pub fn get_contribution(env: Env, receipt_id: u64) -> Option<Contribution> {
        storage::load_contribution(&env, receipt_id)
    }

    /// The backer's declared candidate, if any.
    pub fn get_vote(env: Env, backer: Address) -> Option<u64> {
        storage::get_vote(&env, &backer)
    }

    pub fn get_winners(env: Env) -> Vec<WinnerAllocation> {
        storage::load_winners(&env)
    }

    pub fn get_milestones(env: Env, pitch_id: u64) -> Result<Vec<Milestone>, Error> {
        storage::load_milestones(&env, pitch_id)
    }

    pub fn get_refundable(env: Env, backer: Address) -> i128 {
        settlement::refundable(&env, &backer)
    }

    pub fn has_claimed_refund(env: Env, backer: Address) -> bool {
        storage::has_refunded(&env, &backer)
    }

    // ─────────────────────────────────────────────────────────
    // Internal Helpers
    // ─────────────────────────────────────────────────────────

    /// The factory validates against protocol params first; the pool re-checks
    /// the hard bounds it relies on.
    fn validate_config(env: &Env, config: &PoolConfig) -> Result<(), Error> {
        validation::require_non_empty_string(env, &config.name, MAX_NAME_LEN)?;
        validation::require_non_empty_string(env, &config.category, MAX_CATEGORY_LEN)?;
        validation::require_positive_amount(env, config.funding_goal).map_err(|_| Error::InvalidGoal)?;
        validation::require_future_deadline(env, config.voting_deadline)?;
        if config.funding_deadline < config.voting_deadline {
            return Err(Error::InvalidDeadline);
        }
        validation::require_non_zero_address(env, &config.asset)?;
        validation::require_non_zero_address(env, &config.admin)?;
        validation::require_non_zero_address(env, &config.treasury)?;

        let mut ids = Vec::new(env);
        for candidate in config.candidates.iter() {
            validation::require_non_zero_address(env, &candidate.owner)?;
            ids.push_back(candidate.pitch_id);
        }
        validation::require_candidate_ids(env, &ids)?;

        validation::require_contribution_bounds(env, config.min_contribution, config.max_contribution)?;
        validation::require_basis_points(env, config.platform_fee_bps, MAX_PLATFORM_FEE_BPS)?;
        validation::require_basis_points(env, config.penalty_bps, BASIS_POINTS_DENOMINATOR)?;
        validation::require_winner_count(env, config.max_winners, MAX_WINNERS)?;
        validation::require_approval_threshold(
            env,
            config.approvers.len(),
            config.approvals_required,
            MAX_APPROVERS,
        )?;
        validation::require_distinct_approvers(env, &config.approvers, &config.admin)?;
        Ok(())
    }
}
