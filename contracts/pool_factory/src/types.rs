use soroban_sdk::{contracttype, Address, String, Vec};

/// Review status of a pitch.
///
/// ```text
/// Pending ──► Approved ──► InPool
///    └──────► Rejected
/// ```
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PitchStatus {
    Pending,
    Approved,
    Rejected,
    /// Placed as a candidate in a pool; cannot join another.
    InPool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pitch {
    pub id: u64,
    /// Receives milestone releases if the pitch wins a pool.
    pub founder: Address,
    pub title: String,
    pub status: PitchStatus,
    pub submitted_at: u64,
    /// Set once the pitch is placed in a pool.
    pub pool_id: Option<u64>,
}

/// A pool deployed by this factory.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolRecord {
    pub id: u64,
    pub address: Address,
    pub creator: Address,
    pub name: String,
    pub created_at: u64,
}

/// Caller-chosen settings for a new pool. Everything else comes from the
/// factory's [`shared::PoolParams`].
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolRequest {
    pub name: String,
    pub category: String,
    pub funding_goal: i128,
    /// Seconds from creation until voting closes.
    pub voting_duration: u64,
    /// Extra seconds after voting closes before an under-funded pool fails.
    pub funding_duration: u64,
    pub asset: Address,
    pub min_contribution: i128,
    /// `0` means unbounded.
    pub max_contribution: i128,
    /// Approved pitches, in tie-break order.
    pub pitch_ids: Vec<u64>,
    pub approvers: Vec<Address>,
    pub approvals_required: u32,
}
