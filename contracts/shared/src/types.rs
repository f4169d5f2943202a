//! # Shared types
//!
//! Contract types exchanged between the factory and the pools it deploys.
//! The factory builds a [`PoolConfig`] from its [`PoolParams`] and the caller's
//! request; the pool stores it once and never writes it again.

use soroban_sdk::{contracttype, Address, String, Vec};

/// A pre-approved pitch eligible to win a pool. Order within
/// [`PoolConfig::candidates`] is the submission order used for tie-breaks.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Candidate {
    pub pitch_id: u64,
    /// Party that receives milestone releases if the pitch wins.
    pub owner: Address,
}

/// How a disputed milestone can be cleared.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DisputePolicy {
    /// The pool admin may uphold or reject the disputed evidence.
    AdminResolution,
    /// Disputes are final; the milestone stays locked.
    Frozen,
}

/// Immutable configuration of a single pool.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolConfig {
    pub pool_id: u64,
    pub name: String,
    pub category: String,
    pub funding_goal: i128,
    pub voting_deadline: u64,
    /// Always `>= voting_deadline`.
    pub funding_deadline: u64,
    /// Settlement asset (SAC token address).
    pub asset: Address,
    pub min_contribution: i128,
    /// `0` means unbounded.
    pub max_contribution: i128,
    pub candidates: Vec<Candidate>,
    /// Privileged party for `end_voting`, approver management and disputes.
    pub admin: Address,
    /// Receives the platform fee and early-withdrawal penalties.
    pub treasury: Address,
    pub platform_fee_bps: u32,
    pub penalty_bps: u32,
    pub max_winners: u32,
    pub approvers: Vec<Address>,
    pub approvals_required: u32,
    pub dispute_policy: DisputePolicy,
}

/// Protocol-wide parameters held by the factory and copied into every new
/// [`PoolConfig`].
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolParams {
    pub platform_fee_bps: u32,
    pub penalty_bps: u32,
    pub min_goal: i128,
    pub max_goal: i128,
    pub min_voting_duration: u64,
    pub max_voting_duration: u64,
    pub max_winners: u32,
    pub max_candidates: u32,
    pub treasury: Address,
    pub dispute_policy: DisputePolicy,
}
