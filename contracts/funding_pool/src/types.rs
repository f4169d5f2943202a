//! # Types
//!
//! Data structures owned by a single pool instance.
//!
//! ## Config / State split
//!
//! The pool keeps the immutable [`shared::PoolConfig`] and the small mutable
//! [`PoolState`] in separate instance entries, so contributions only rewrite
//! the counters.
//!
//! ## Phase as a Finite-State Machine
//!
//! ```text
//! Active ──► Funded ──► Closed
//!    │  └──► VotingEnded ──► Failed
//!    └─────────────────────► Failed
//! ```
//!
//! Phases only move forward and only in response to a call; nothing changes
//! when a deadline passes on its own.

use soroban_sdk::{contracttype, Address, String, Vec};

/// Lifecycle phase of a pool.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PoolPhase {
    /// Accepting contributions and votes until the voting deadline.
    Active,
    /// Voting closed below goal; waiting for the funding deadline.
    VotingEnded,
    /// Goal met; winners and allocations fixed, milestones drawing down.
    Funded,
    /// Goal missed; backers may claim refunds.
    Failed,
    /// Every winner's allocation has been released.
    Closed,
}

/// Mutable counters, rewritten on every state-changing call.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolState {
    pub phase: PoolPhase,
    /// Sum of all non-withdrawn contribution amounts.
    pub total_contributions: i128,
    /// Early-withdrawal penalties retained by the pool.
    pub total_penalties: i128,
    /// Platform fee taken at settlement (0 until `Funded`).
    pub platform_fee: i128,
    pub total_refunded: i128,
    /// Id of the next receipt to mint. Never decreases.
    pub next_receipt_id: u64,
}

/// One `contribute` call. Never deleted; withdrawal only flips `withdrawn`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Contribution {
    pub receipt_id: u64,
    pub backer: Address,
    pub pitch_id: u64,
    pub amount: i128,
    pub asset: Address,
    pub created_at: u64,
    pub withdrawn: bool,
}

/// Non-transferable proof of participation, minted 1:1 with a contribution.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Receipt {
    pub id: u64,
    pub holder: Address,
    pub pitch_id: u64,
    pub amount: i128,
    pub minted_at: u64,
}

/// A winning pitch's share of the net pool.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WinnerAllocation {
    pub pitch_id: u64,
    pub owner: Address,
    /// Vote weight at cut-off.
    pub vote_weight: i128,
    /// Share of the net pool; sums to 10,000 across winners.
    pub allocation_bps: u32,
    pub amount: i128,
    pub released: i128,
    /// Tranches of expired milestones sent to the treasury instead.
    pub reclaimed: i128,
}

impl WinnerAllocation {
    /// Still held in escrow for this winner.
    pub fn remaining(&self) -> i128 {
        self.amount - self.released - self.reclaimed
    }
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MilestoneStatus {
    /// Waiting for the winner's evidence.
    Pending,
    /// Evidence submitted; collecting approvals.
    Completed,
    /// Approval threshold reached and funds released.
    Approved,
    /// Deadline missed; the tranche went to the treasury.
    Reclaimed,
}

/// Winner-supplied schedule entry.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MilestoneInput {
    pub description: String,
    /// Share of the pitch's allocation; all entries sum to 10,000.
    pub funding_bps: u32,
    pub deadline: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Milestone {
    pub id: u32,
    pub description: String,
    pub funding_bps: u32,
    /// Token amount released on approval.
    pub amount: i128,
    pub deadline: u64,
    pub status: MilestoneStatus,
    pub disputed: bool,
    /// Empty until evidence is submitted.
    pub evidence: String,
    pub approvals: u32,
    pub approvals_required: u32,
    pub approved_by: Vec<Address>,
}

/// Summary returned by `get_pool_info`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolInfo {
    pub pool_id: u64,
    pub name: String,
    pub category: String,
    pub funding_goal: i128,
    pub voting_deadline: u64,
    pub funding_deadline: u64,
    pub total_raised: i128,
    pub phase: PoolPhase,
    pub min_contribution: i128,
    pub max_contribution: i128,
}
