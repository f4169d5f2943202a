//! # Validation Rules
//!
//! Stateless guards used by every mutating entry point of both the factory
//! and the pool engine. Each guard maps to exactly one [`Error`] code so a
//! rejected call always tells the caller which bound it broke.

use soroban_sdk::{log, Address, Env, String, Vec};

use crate::constants::{BASIS_POINTS_DENOMINATOR, MAX_CANDIDATES};
use crate::errors::Error;

/// Strkey of the all-zero ed25519 account.
const ZERO_ACCOUNT: &str = "GAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWHF";

/// Reject the all-zero account, which nobody can sign for.
pub fn require_non_zero_address(env: &Env, address: &Address) -> Result<(), Error> {
    let zero = Address::from_string(&String::from_str(env, ZERO_ACCOUNT));
    if *address == zero {
        return Err(Error::ZeroAddress);
    }
    Ok(())
}

pub fn require_positive_amount(env: &Env, amount: i128) -> Result<(), Error> {
    if amount <= 0 {
        log!(env, "amount must be positive", amount);
        return Err(Error::InvalidAmount);
    }
    Ok(())
}

/// Non-empty and at most `max_len` bytes.
pub fn require_non_empty_string(env: &Env, value: &String, max_len: u32) -> Result<(), Error> {
    if value.is_empty() {
        return Err(Error::EmptyString);
    }
    if value.len() > max_len {
        log!(env, "string too long", value.len(), max_len);
        return Err(Error::StringTooLong);
    }
    Ok(())
}

pub fn require_duration_in_range(env: &Env, duration: u64, min: u64, max: u64) -> Result<(), Error> {
    if duration < min || duration > max {
        log!(env, "duration out of range", duration, min, max);
        return Err(Error::InvalidDuration);
    }
    Ok(())
}

pub fn require_goal_in_range(env: &Env, goal: i128, min: i128, max: i128) -> Result<(), Error> {
    if goal < min || goal > max {
        log!(env, "funding goal out of range", goal, min, max);
        return Err(Error::InvalidGoal);
    }
    Ok(())
}

/// `deadline` must be strictly after the current ledger time.
pub fn require_future_deadline(env: &Env, deadline: u64) -> Result<(), Error> {
    let now = env.ledger().timestamp();
    if deadline <= now {
        log!(env, "deadline not in the future", deadline, now);
        return Err(Error::InvalidDeadline);
    }
    Ok(())
}

/// Candidate list must be non-empty, bounded, and free of duplicates.
pub fn require_candidate_ids(env: &Env, ids: &Vec<u64>) -> Result<(), Error> {
    if ids.is_empty() {
        return Err(Error::NoCandidates);
    }
    if ids.len() > MAX_CANDIDATES {
        log!(env, "too many candidates", ids.len(), MAX_CANDIDATES);
        return Err(Error::TooManyCandidates);
    }
    for i in 0..ids.len() {
        let id = ids.get_unchecked(i);
        for j in (i + 1)..ids.len() {
            if id == ids.get_unchecked(j) {
                log!(env, "duplicate candidate", id);
                return Err(Error::DuplicateCandidate);
            }
        }
    }
    Ok(())
}

pub fn require_basis_points(env: &Env, bps: u32, max: u32) -> Result<(), Error> {
    if bps > max || bps > BASIS_POINTS_DENOMINATOR {
        log!(env, "basis points out of range", bps, max);
        return Err(Error::InvalidBasisPoints);
    }
    Ok(())
}

/// `min` must be positive; `max == 0` means unbounded, otherwise `max >= min`.
pub fn require_contribution_bounds(env: &Env, min: i128, max: i128) -> Result<(), Error> {
    if min <= 0 || max < 0 || (max != 0 && max < min) {
        log!(env, "invalid contribution bounds", min, max);
        return Err(Error::InvalidContributionBounds);
    }
    Ok(())
}

/// Check a single contribution against the pool's per-backer bounds.
pub fn require_contribution_in_bounds(
    env: &Env,
    amount: i128,
    min: i128,
    max: i128,
) -> Result<(), Error> {
    if amount < min {
        log!(env, "contribution below minimum", amount, min);
        return Err(Error::BelowMinimum);
    }
    if max != 0 && amount > max {
        log!(env, "contribution above maximum", amount, max);
        return Err(Error::AboveMaximum);
    }
    Ok(())
}

pub fn require_winner_count(env: &Env, winners: u32, max: u32) -> Result<(), Error> {
    if winners == 0 || winners > max {
        log!(env, "invalid winner count", winners, max);
        return Err(Error::InvalidWinnerCount);
    }
    Ok(())
}

/// At least one approver, bounded, and a threshold the set can reach.
pub fn require_approval_threshold(
    env: &Env,
    approvers: u32,
    required: u32,
    max_approvers: u32,
) -> Result<(), Error> {
    if approvers == 0 || approvers > max_approvers || required == 0 || required > approvers {
        log!(env, "invalid approval threshold", approvers, required);
        return Err(Error::InvalidApprovalThreshold);
    }
    Ok(())
}

/// Every approver distinct and none of them the pool admin, so the roles
/// seeded from the list add up to `approvers.len()` signers.
pub fn require_distinct_approvers(env: &Env, approvers: &Vec<Address>, admin: &Address) -> Result<(), Error> {
    for i in 0..approvers.len() {
        let approver = approvers.get_unchecked(i);
        if approver == *admin {
            log!(env, "admin listed as approver", approver);
            return Err(Error::InvalidApprover);
        }
        for j in (i + 1)..approvers.len() {
            if approver == approvers.get_unchecked(j) {
                log!(env, "duplicate approver", approver);
                return Err(Error::InvalidApprover);
            }
        }
    }
    Ok(())
}
