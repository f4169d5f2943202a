//! Milestone-gated release of winner allocations.
//!
//! Each winning pitch gets one schedule, set once by its owner. Every
//! milestone moves `Pending → Completed → Approved`; the transfer happens in
//! the approval that reaches the threshold. A disputed milestone accepts no
//! approvals until the dispute is resolved under the pool's
//! [`DisputePolicy`].
//!
//! A milestone that misses its deadline cannot take evidence any more. Under
//! `AdminResolution` the admin may push the deadline out; under either
//! policy anyone may then reclaim the tranche to the treasury, unless
//! undisputed evidence is still waiting on approvals.

use soroban_sdk::{log, token, Address, Env, String, Vec};

use shared::constants::{
    BASIS_POINTS_DENOMINATOR, MAX_DEADLINE_HORIZON, MAX_DESCRIPTION_LEN, MAX_EVIDENCE_LEN,
    MAX_MILESTONES,
};
use shared::{math, validation, DisputePolicy, PoolConfig};

use crate::errors::Error;
use crate::events;
use crate::storage;
use crate::types::{Milestone, MilestoneInput, MilestoneStatus, PoolPhase, WinnerAllocation};

fn require_funded(env: &Env) -> Result<PoolConfig, Error> {
    let (config, state) = storage::load_pool(env)?;
    if state.phase != PoolPhase::Funded {
        return Err(Error::PoolNotFunded);
    }
    Ok(config)
}

fn find_winner(winners: &Vec<WinnerAllocation>, pitch_id: u64) -> Result<(u32, WinnerAllocation), Error> {
    for (i, w) in winners.iter().enumerate() {
        if w.pitch_id == pitch_id {
            return Ok((i as u32, w));
        }
    }
    Err(Error::NotWinner)
}

fn load_milestone(env: &Env, pitch_id: u64, milestone_id: u32) -> Result<(Vec<Milestone>, Milestone), Error> {
    let milestones = storage::load_milestones(env, pitch_id)?;
    let milestone = milestones.get(milestone_id).ok_or(Error::MilestoneNotFound)?;
    Ok((milestones, milestone))
}

/// Fix the release schedule for a winning pitch.
pub fn set_milestones(
    env: &Env,
    owner: Address,
    pitch_id: u64,
    inputs: Vec<MilestoneInput>,
) -> Result<Vec<Milestone>, Error> {
    let config = require_funded(env)?;
    let (_, winner) = find_winner(&storage::load_winners(env), pitch_id)?;
    if winner.owner != owner {
        return Err(Error::NotAuthorized);
    }
    if storage::has_milestones(env, pitch_id) {
        return Err(Error::MilestonesAlreadySet);
    }
    if inputs.len() > MAX_MILESTONES {
        log!(env, "too many milestones", inputs.len(), MAX_MILESTONES);
        return Err(Error::InvalidMilestoneSchedule);
    }

    let horizon = env.ledger().timestamp() + MAX_DEADLINE_HORIZON;
    let mut bps = Vec::new(env);
    let mut bps_sum: u32 = 0;
    for input in inputs.iter() {
        validation::require_non_empty_string(env, &input.description, MAX_DESCRIPTION_LEN)?;
        validation::require_future_deadline(env, input.deadline)?;
        if input.deadline > horizon {
            return Err(Error::InvalidDeadline);
        }
        if input.funding_bps == 0 {
            return Err(Error::InvalidMilestoneSchedule);
        }
        bps_sum = bps_sum.saturating_add(input.funding_bps);
        bps.push_back(input.funding_bps);
    }
    if bps_sum != BASIS_POINTS_DENOMINATOR {
        log!(env, "milestone percents must total 10000", bps_sum);
        return Err(Error::InvalidMilestoneSchedule);
    }

    let amounts = math::split_by_basis_points(env, winner.amount, &bps)?;
    let mut milestones = Vec::new(env);
    for (i, input) in inputs.iter().enumerate() {
        milestones.push_back(Milestone {
            id: i as u32,
            description: input.description,
            funding_bps: input.funding_bps,
            amount: amounts.get_unchecked(i as u32),
            deadline: input.deadline,
            status: MilestoneStatus::Pending,
            disputed: false,
            evidence: String::from_str(env, ""),
            approvals: 0,
            approvals_required: config.approvals_required,
            approved_by: Vec::new(env),
        });
    }
    storage::save_milestones(env, pitch_id, &milestones);

    events::emit_milestones_set(env, config.pool_id, pitch_id, milestones.len());
    Ok(milestones)
}

/// Winner marks a milestone complete by attaching an evidence reference.
pub fn submit_evidence(
    env: &Env,
    owner: Address,
    pitch_id: u64,
    milestone_id: u32,
    evidence: String,
) -> Result<(), Error> {
    let config = require_funded(env)?;
    let (_, winner) = find_winner(&storage::load_winners(env), pitch_id)?;
    if winner.owner != owner {
        return Err(Error::NotAuthorized);
    }
    let (mut milestones, mut milestone) = load_milestone(env, pitch_id, milestone_id)?;

    if milestone.disputed {
        return Err(Error::MilestoneDisputed);
    }
    if milestone.status != MilestoneStatus::Pending {
        return Err(Error::MilestoneNotPending);
    }
    let now = env.ledger().timestamp();
    if now > milestone.deadline {
        log!(env, "milestone deadline passed", now, milestone.deadline);
        return Err(Error::MilestoneDeadlinePassed);
    }
    validation::require_non_empty_string(env, &evidence, MAX_EVIDENCE_LEN)?;

    milestone.status = MilestoneStatus::Completed;
    milestone.evidence = evidence.clone();
    milestones.set(milestone_id, milestone);
    storage::save_milestones(env, pitch_id, &milestones);

    events::emit_evidence_submitted(env, config.pool_id, pitch_id, milestone_id, evidence);
    Ok(())
}

/// Record one approval. Returns `true` if this approval released the funds.
pub fn approve(env: &Env, approver: Address, pitch_id: u64, milestone_id: u32) -> Result<bool, Error> {
    let config = require_funded(env)?;
    let mut winners = storage::load_winners(env);
    let (winner_index, mut winner) = find_winner(&winners, pitch_id)?;
    let (mut milestones, mut milestone) = load_milestone(env, pitch_id, milestone_id)?;

    if milestone.disputed {
        return Err(Error::MilestoneDisputed);
    }
    match milestone.status {
        MilestoneStatus::Completed => {}
        MilestoneStatus::Approved => return Err(Error::AlreadyApproved),
        MilestoneStatus::Pending | MilestoneStatus::Reclaimed => {
            return Err(Error::MilestoneNotCompleted)
        }
    }
    if milestone.approved_by.contains(&approver) {
        return Err(Error::AlreadyApproved);
    }

    milestone.approved_by.push_back(approver.clone());
    milestone.approvals += 1;
    let approvals = milestone.approvals;

    let released = milestone.approvals >= milestone.approvals_required;
    if released {
        if milestone.amount > winner.remaining() {
            log!(env, "release exceeds allocation", milestone.amount, winner.remaining());
            return Err(Error::AllocationExceeded);
        }
        milestone.status = MilestoneStatus::Approved;
        winner.released += milestone.amount;
        winners.set(winner_index, winner.clone());
        storage::save_winners(env, &winners);
    }
    let amount = milestone.amount;
    milestones.set(milestone_id, milestone);
    storage::save_milestones(env, pitch_id, &milestones);

    events::emit_milestone_approved(env, config.pool_id, pitch_id, milestone_id, approver, approvals);

    if released {
        if amount > 0 {
            token::Client::new(env, &config.asset).transfer(
                &env.current_contract_address(),
                &winner.owner,
                &amount,
            );
        }
        events::emit_funds_released(env, config.pool_id, pitch_id, milestone_id, winner.owner, amount);
        close_if_fully_released(env, &config, &winners)?;
    }
    Ok(released)
}

/// Flag a completed, not-yet-approved milestone as disputed.
pub fn dispute(env: &Env, caller: Address, pitch_id: u64, milestone_id: u32) -> Result<(), Error> {
    let config = require_funded(env)?;
    find_winner(&storage::load_winners(env), pitch_id)?;
    let (mut milestones, mut milestone) = load_milestone(env, pitch_id, milestone_id)?;

    if milestone.status != MilestoneStatus::Completed {
        return Err(Error::MilestoneNotCompleted);
    }
    if milestone.disputed {
        return Err(Error::MilestoneDisputed);
    }
    milestone.disputed = true;
    milestones.set(milestone_id, milestone);
    storage::save_milestones(env, pitch_id, &milestones);

    events::emit_milestone_disputed(env, config.pool_id, pitch_id, milestone_id, caller);
    Ok(())
}

/// Clear a dispute. Upholding keeps the evidence and the approvals gathered
/// so far; rejecting sends the milestone back to `Pending` with a clean slate.
pub fn resolve_dispute(env: &Env, pitch_id: u64, milestone_id: u32, uphold: bool) -> Result<(), Error> {
    let config = require_funded(env)?;
    if config.dispute_policy == DisputePolicy::Frozen {
        return Err(Error::DisputeResolutionDisabled);
    }
    let (mut milestones, mut milestone) = load_milestone(env, pitch_id, milestone_id)?;
    if !milestone.disputed {
        return Err(Error::MilestoneNotDisputed);
    }

    milestone.disputed = false;
    if !uphold {
        milestone.status = MilestoneStatus::Pending;
        milestone.evidence = String::from_str(env, "");
        milestone.approvals = 0;
        milestone.approved_by = Vec::new(env);
    }
    milestones.set(milestone_id, milestone);
    storage::save_milestones(env, pitch_id, &milestones);

    events::emit_dispute_resolved(env, config.pool_id, pitch_id, milestone_id, uphold);
    Ok(())
}

/// Give a milestone more time. Admin only, `AdminResolution` pools only.
pub fn extend_deadline(
    env: &Env,
    pitch_id: u64,
    milestone_id: u32,
    new_deadline: u64,
) -> Result<(), Error> {
    let config = require_funded(env)?;
    if config.dispute_policy == DisputePolicy::Frozen {
        return Err(Error::DisputeResolutionDisabled);
    }
    let (mut milestones, mut milestone) = load_milestone(env, pitch_id, milestone_id)?;
    match milestone.status {
        MilestoneStatus::Pending | MilestoneStatus::Completed => {}
        _ => return Err(Error::MilestoneNotPending),
    }
    validation::require_future_deadline(env, new_deadline)?;
    if new_deadline <= milestone.deadline
        || new_deadline > env.ledger().timestamp() + MAX_DEADLINE_HORIZON
    {
        log!(env, "invalid deadline extension", milestone.deadline, new_deadline);
        return Err(Error::InvalidDeadline);
    }

    milestone.deadline = new_deadline;
    milestones.set(milestone_id, milestone);
    storage::save_milestones(env, pitch_id, &milestones);

    events::emit_deadline_extended(env, config.pool_id, pitch_id, milestone_id, new_deadline);
    Ok(())
}

/// Send an expired milestone's tranche to the treasury. Returns the amount.
pub fn reclaim(env: &Env, pitch_id: u64, milestone_id: u32) -> Result<i128, Error> {
    let config = require_funded(env)?;
    let mut winners = storage::load_winners(env);
    let (winner_index, mut winner) = find_winner(&winners, pitch_id)?;
    let (mut milestones, mut milestone) = load_milestone(env, pitch_id, milestone_id)?;

    match milestone.status {
        MilestoneStatus::Approved | MilestoneStatus::Reclaimed => {
            return Err(Error::MilestoneNotPending)
        }
        // Undisputed evidence can still be approved.
        MilestoneStatus::Completed if !milestone.disputed => {
            return Err(Error::MilestoneNotDisputed)
        }
        _ => {}
    }
    let now = env.ledger().timestamp();
    if now <= milestone.deadline {
        log!(env, "milestone deadline not reached", now, milestone.deadline);
        return Err(Error::DeadlineNotReached);
    }
    let amount = milestone.amount;
    if amount > winner.remaining() {
        log!(env, "reclaim exceeds allocation", amount, winner.remaining());
        return Err(Error::AllocationExceeded);
    }

    milestone.status = MilestoneStatus::Reclaimed;
    milestone.disputed = false;
    milestones.set(milestone_id, milestone);
    storage::save_milestones(env, pitch_id, &milestones);

    winner.reclaimed += amount;
    winners.set(winner_index, winner);
    storage::save_winners(env, &winners);

    if amount > 0 {
        token::Client::new(env, &config.asset).transfer(
            &env.current_contract_address(),
            &config.treasury,
            &amount,
        );
    }
    events::emit_milestone_reclaimed(
        env,
        config.pool_id,
        pitch_id,
        milestone_id,
        config.treasury.clone(),
        amount,
    );
    close_if_fully_released(env, &config, &winners)?;
    Ok(amount)
}

fn close_if_fully_released(env: &Env, config: &PoolConfig, winners: &Vec<WinnerAllocation>) -> Result<(), Error> {
    if winners.iter().any(|w| w.remaining() > 0) {
        return Ok(());
    }
    // Zero-amount milestones move no funds, so require every schedule settled.
    for w in winners.iter() {
        if !storage::has_milestones(env, w.pitch_id) {
            return Ok(());
        }
        let milestones = storage::load_milestones(env, w.pitch_id)?;
        let open = milestones.iter().any(|m| {
            !matches!(m.status, MilestoneStatus::Approved | MilestoneStatus::Reclaimed)
        });
        if open {
            return Ok(());
        }
    }
    let mut state = storage::load_state(env)?;
    state.phase = PoolPhase::Closed;
    storage::save_state(env, &state);
    events::emit_pool_closed(env, config.pool_id);
    Ok(())
}
