//! Protocol-wide bounds. Runtime-tunable values live in [`crate::PoolParams`];
//! these are the hard limits those parameters are validated against.

/// 10,000 bp = 100%.
pub const BASIS_POINTS_DENOMINATOR: u32 = 10_000;

/// Hard ceiling on the platform fee (10%).
pub const MAX_PLATFORM_FEE_BPS: u32 = 1_000;

/// Default early-withdrawal penalty (10%).
pub const DEFAULT_PENALTY_BPS: u32 = 1_000;

/// Default platform fee (5%).
pub const DEFAULT_PLATFORM_FEE_BPS: u32 = 500;

/// Winners per pool.
pub const MAX_WINNERS: u32 = 3;

/// Candidate pitches per pool.
pub const MIN_CANDIDATES: u32 = 1;
pub const MAX_CANDIDATES: u32 = 10;

/// Milestones per winning pitch.
pub const MAX_MILESTONES: u32 = 10;

/// Funding goal window, in settlement asset base units.
pub const MIN_FUNDING_GOAL: i128 = 1_000;
pub const MAX_FUNDING_GOAL: i128 = 1_000_000_000_000_000_000_000_000_000_000; // 10^30

/// Voting window length, in seconds (1 day to 90 days).
pub const MIN_VOTING_DURATION: u64 = 86_400;
pub const MAX_VOTING_DURATION: u64 = 90 * 86_400;

/// Extra time after voting closes for the funding window (0 to 30 days).
pub const MAX_FUNDING_EXTENSION: u64 = 30 * 86_400;

/// Upper bound on milestone deadlines relative to now (5 years).
pub const MAX_DEADLINE_HORIZON: u64 = 157_680_000;

/// String length bounds.
pub const MAX_NAME_LEN: u32 = 64;
pub const MAX_CATEGORY_LEN: u32 = 32;
pub const MAX_DESCRIPTION_LEN: u32 = 256;
pub const MAX_EVIDENCE_LEN: u32 = 128;

/// Approver set bounds for milestone sign-off.
pub const MAX_APPROVERS: u32 = 10;
