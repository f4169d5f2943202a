#![cfg(test)]

use soroban_sdk::{testutils::Address as _, Address, String, Vec};

use shared::DisputePolicy;

use crate::invariants::assert_escrow_balance;
use crate::test::{setup, setup_funded, setup_with, Pool};
use crate::{Error, MilestoneInput, MilestoneStatus, PoolPhase};

const MONTH: u64 = 30 * 86_400;

fn schedule(pool: &Pool, bps: &[u32]) -> Vec<MilestoneInput> {
    let now = pool.voting_deadline();
    let mut inputs = Vec::new(&pool.env);
    for (i, b) in bps.iter().enumerate() {
        inputs.push_back(MilestoneInput {
            description: String::from_str(&pool.env, "ship the beta"),
            funding_bps: *b,
            deadline: now + MONTH * (i as u64 + 1),
        });
    }
    inputs
}

fn evidence(pool: &Pool) -> String {
    String::from_str(&pool.env, "ipfs://bafy-demo-report")
}

/// Pitch 1 wins 475; two milestones of 285 and 190.
fn funded_with_schedule() -> Pool {
    let pool = setup_funded();
    pool.client
        .set_milestones(&pool.owner(1), &1, &schedule(&pool, &[6_000, 4_000]));
    pool
}

fn approve_all(pool: &Pool, pitch_id: u64, milestone_id: u32) {
    for approver in pool.approvers.iter() {
        pool.client.approve_milestone(&approver, &pitch_id, &milestone_id);
    }
}

#[test]
fn test_set_milestones_splits_allocation() {
    let pool = funded_with_schedule();
    let milestones = pool.client.get_milestones(&1);

    assert_eq!(milestones.len(), 2);
    let first = milestones.get_unchecked(0);
    let second = milestones.get_unchecked(1);
    assert_eq!((first.id, first.amount, first.funding_bps), (0, 285, 6_000));
    assert_eq!((second.id, second.amount, second.funding_bps), (1, 190, 4_000));
    assert_eq!(first.status, MilestoneStatus::Pending);
    assert_eq!(first.approvals_required, 2);
    assert!(!first.disputed);
}

#[test]
fn test_set_milestones_rejections() {
    let pool = setup_funded();
    let owner = pool.owner(1);

    assert_eq!(
        pool.client
            .try_set_milestones(&owner, &1, &schedule(&pool, &[5_000, 4_000])),
        Err(Ok(Error::InvalidMilestoneSchedule))
    );
    assert_eq!(
        pool.client
            .try_set_milestones(&owner, &1, &schedule(&pool, &[10_000, 0])),
        Err(Ok(Error::InvalidMilestoneSchedule))
    );
    assert_eq!(
        pool.client
            .try_set_milestones(&pool.owner(2), &1, &schedule(&pool, &[10_000])),
        Err(Ok(Error::NotAuthorized))
    );
    assert_eq!(
        pool.client
            .try_set_milestones(&pool.owner(4), &4, &schedule(&pool, &[10_000])),
        Err(Ok(Error::NotWinner))
    );
    let too_many = [1_000u32; 11];
    assert_eq!(
        pool.client
            .try_set_milestones(&owner, &1, &schedule(&pool, &too_many)),
        Err(Ok(Error::InvalidMilestoneSchedule))
    );

    let mut past = schedule(&pool, &[10_000]);
    let mut m = past.get_unchecked(0);
    m.deadline = pool.voting_deadline();
    past.set(0, m);
    assert_eq!(
        pool.client.try_set_milestones(&owner, &1, &past),
        Err(Ok(Error::InvalidDeadline))
    );

    pool.client.set_milestones(&owner, &1, &schedule(&pool, &[10_000]));
    assert_eq!(
        pool.client
            .try_set_milestones(&owner, &1, &schedule(&pool, &[10_000])),
        Err(Ok(Error::MilestonesAlreadySet))
    );
}

#[test]
fn test_milestones_need_a_funded_pool() {
    let pool = setup();
    pool.back(1, 200);
    assert_eq!(
        pool.client
            .try_set_milestones(&pool.owner(1), &1, &schedule(&pool, &[10_000])),
        Err(Ok(Error::PoolNotFunded))
    );
    assert_eq!(pool.client.try_get_milestones(&1), Err(Ok(Error::MilestonesNotSet)));
}

#[test]
fn test_release_needs_threshold_approvals() {
    let pool = funded_with_schedule();
    let owner = pool.owner(1);
    let first = pool.approvers.get_unchecked(0);
    let second = pool.approvers.get_unchecked(1);

    assert_eq!(
        pool.client.try_approve_milestone(&first, &1, &0),
        Err(Ok(Error::MilestoneNotCompleted))
    );

    pool.client
        .submit_milestone_evidence(&owner, &1, &0, &evidence(&pool));
    assert_eq!(
        pool.client.get_milestones(&1).get_unchecked(0).status,
        MilestoneStatus::Completed
    );

    assert!(!pool.client.approve_milestone(&first, &1, &0));
    assert_eq!(pool.token.balance(&owner), 0);
    assert_eq!(
        pool.client.try_approve_milestone(&first, &1, &0),
        Err(Ok(Error::AlreadyApproved))
    );

    assert!(pool.client.approve_milestone(&second, &1, &0));
    assert_eq!(pool.token.balance(&owner), 285);

    let milestone = pool.client.get_milestones(&1).get_unchecked(0);
    assert_eq!(milestone.status, MilestoneStatus::Approved);
    assert_eq!(milestone.approvals, 2);
    assert_eq!(pool.client.get_winners().get_unchecked(0).released, 285);
    assert_eq!(
        pool.client.try_approve_milestone(&second, &1, &0),
        Err(Ok(Error::AlreadyApproved))
    );
}

#[test]
fn test_only_approvers_approve() {
    let pool = funded_with_schedule();
    pool.client
        .submit_milestone_evidence(&pool.owner(1), &1, &0, &evidence(&pool));

    let outsider = Address::generate(&pool.env);
    assert_eq!(
        pool.client.try_approve_milestone(&outsider, &1, &0),
        Err(Ok(Error::NotAuthorized))
    );
    assert_eq!(
        pool.client.try_approve_milestone(&pool.admin, &1, &0),
        Err(Ok(Error::NotAuthorized))
    );
}

#[test]
fn test_evidence_rules() {
    let pool = funded_with_schedule();
    let owner = pool.owner(1);

    assert_eq!(
        pool.client
            .try_submit_milestone_evidence(&pool.owner(2), &1, &0, &evidence(&pool)),
        Err(Ok(Error::NotAuthorized))
    );
    assert_eq!(
        pool.client
            .try_submit_milestone_evidence(&owner, &1, &5, &evidence(&pool)),
        Err(Ok(Error::MilestoneNotFound))
    );
    assert_eq!(
        pool.client
            .try_submit_milestone_evidence(&owner, &1, &0, &String::from_str(&pool.env, "")),
        Err(Ok(Error::EmptyString))
    );

    pool.client.submit_milestone_evidence(&owner, &1, &0, &evidence(&pool));
    assert_eq!(
        pool.client
            .try_submit_milestone_evidence(&owner, &1, &0, &evidence(&pool)),
        Err(Ok(Error::MilestoneNotPending))
    );

    pool.set_time(pool.voting_deadline() + 2 * MONTH + 1);
    assert_eq!(
        pool.client
            .try_submit_milestone_evidence(&owner, &1, &1, &evidence(&pool)),
        Err(Ok(Error::MilestoneDeadlinePassed))
    );
}

#[test]
fn test_dispute_blocks_approval_until_upheld() {
    let pool = funded_with_schedule();
    let owner = pool.owner(1);
    let first = pool.approvers.get_unchecked(0);
    let second = pool.approvers.get_unchecked(1);

    assert_eq!(
        pool.client.try_dispute_milestone(&first, &1, &0),
        Err(Ok(Error::MilestoneNotCompleted))
    );

    pool.client.submit_milestone_evidence(&owner, &1, &0, &evidence(&pool));
    pool.client.approve_milestone(&first, &1, &0);
    pool.client.dispute_milestone(&second, &1, &0);

    assert_eq!(
        pool.client.try_approve_milestone(&second, &1, &0),
        Err(Ok(Error::MilestoneDisputed))
    );
    assert_eq!(
        pool.client.try_dispute_milestone(&pool.admin, &1, &0),
        Err(Ok(Error::MilestoneDisputed))
    );
    assert_eq!(
        pool.client.try_resolve_dispute(&first, &1, &0, &true),
        Err(Ok(Error::NotAuthorized))
    );

    pool.client.resolve_dispute(&pool.admin, &1, &0, &true);
    let milestone = pool.client.get_milestones(&1).get_unchecked(0);
    assert!(!milestone.disputed);
    assert_eq!(milestone.approvals, 1);

    assert!(pool.client.approve_milestone(&second, &1, &0));
    assert_eq!(pool.token.balance(&owner), 285);
    assert_eq!(
        pool.client.try_resolve_dispute(&pool.admin, &1, &0, &true),
        Err(Ok(Error::MilestoneNotDisputed))
    );
}

#[test]
fn test_rejected_dispute_resets_milestone() {
    let pool = funded_with_schedule();
    let owner = pool.owner(1);
    let first = pool.approvers.get_unchecked(0);

    pool.client.submit_milestone_evidence(&owner, &1, &0, &evidence(&pool));
    pool.client.approve_milestone(&first, &1, &0);
    pool.client.dispute_milestone(&pool.admin, &1, &0);
    pool.client.resolve_dispute(&pool.admin, &1, &0, &false);

    let milestone = pool.client.get_milestones(&1).get_unchecked(0);
    assert_eq!(milestone.status, MilestoneStatus::Pending);
    assert_eq!(milestone.approvals, 0);
    assert!(milestone.approved_by.is_empty());
    assert!(milestone.evidence.is_empty());

    // Resubmission starts a fresh approval round.
    pool.client.submit_milestone_evidence(&owner, &1, &0, &evidence(&pool));
    approve_all(&pool, 1, 0);
    assert_eq!(pool.token.balance(&owner), 285);
}

#[test]
fn test_frozen_policy_refuses_resolution() {
    let pool = setup_with(|c| c.dispute_policy = DisputePolicy::Frozen);
    pool.back(1, 1_000);
    pool.set_time(pool.voting_deadline());
    pool.client.end_voting(&pool.admin);

    let owner = pool.owner(1);
    pool.client.set_milestones(&owner, &1, &schedule(&pool, &[10_000]));
    pool.client.submit_milestone_evidence(&owner, &1, &0, &evidence(&pool));
    pool.client
        .dispute_milestone(&pool.approvers.get_unchecked(0), &1, &0);

    assert_eq!(
        pool.client.try_resolve_dispute(&pool.admin, &1, &0, &true),
        Err(Ok(Error::DisputeResolutionDisabled))
    );
    assert!(pool.client.get_milestones(&1).get_unchecked(0).disputed);
}

#[test]
fn test_pool_closes_after_last_release() {
    let pool = setup_funded();
    for pitch_id in 1..=3u64 {
        let owner = pool.owner(pitch_id);
        pool.client
            .set_milestones(&owner, &pitch_id, &schedule(&pool, &[10_000]));
        pool.client
            .submit_milestone_evidence(&owner, &pitch_id, &0, &evidence(&pool));
    }

    approve_all(&pool, 1, 0);
    approve_all(&pool, 2, 0);
    assert_eq!(pool.client.get_state().phase, PoolPhase::Funded);

    approve_all(&pool, 3, 0);
    assert_eq!(pool.client.get_state().phase, PoolPhase::Closed);

    assert_eq!(pool.token.balance(&pool.owner(1)), 475);
    assert_eq!(pool.token.balance(&pool.owner(2)), 285);
    assert_eq!(pool.token.balance(&pool.owner(3)), 190);
    assert_eq!(pool.token.balance(&pool.client.address), 0);

    for w in pool.client.get_winners().iter() {
        assert_eq!(w.remaining(), 0);
    }
}

#[test]
fn test_missed_deadline_tranche_is_reclaimed() {
    let pool = funded_with_schedule();
    let owner = pool.owner(1);
    let first = pool.approvers.get_unchecked(0);

    pool.client.submit_milestone_evidence(&owner, &1, &0, &evidence(&pool));
    pool.client.dispute_milestone(&first, &1, &0);
    pool.set_time(pool.voting_deadline() + MONTH + 1);
    pool.client.resolve_dispute(&pool.admin, &1, &0, &false);

    // Back to Pending but too late for new evidence.
    assert_eq!(
        pool.client
            .try_submit_milestone_evidence(&owner, &1, &0, &evidence(&pool)),
        Err(Ok(Error::MilestoneDeadlinePassed))
    );

    assert_eq!(pool.client.reclaim_milestone(&1, &0), 285);
    assert_eq!(pool.token.balance(&pool.treasury), 50 + 285);
    assert_eq!(pool.token.balance(&pool.client.address), 950 - 285);

    let milestone = pool.client.get_milestones(&1).get_unchecked(0);
    assert_eq!(milestone.status, MilestoneStatus::Reclaimed);
    let winner = pool.client.get_winners().get_unchecked(0);
    assert_eq!((winner.released, winner.reclaimed, winner.remaining()), (0, 285, 190));
    assert_escrow_balance(&pool);

    assert_eq!(
        pool.client.try_reclaim_milestone(&1, &0),
        Err(Ok(Error::MilestoneNotPending))
    );
    assert_eq!(
        pool.client.try_approve_milestone(&first, &1, &0),
        Err(Ok(Error::MilestoneNotCompleted))
    );

    // The later milestone is unaffected.
    pool.client.submit_milestone_evidence(&owner, &1, &1, &evidence(&pool));
    approve_all(&pool, 1, 1);
    assert_eq!(pool.token.balance(&owner), 190);
    assert_eq!(pool.client.get_winners().get_unchecked(0).remaining(), 0);
    assert_escrow_balance(&pool);
    assert_eq!(pool.client.get_state().phase, PoolPhase::Funded);
}

#[test]
fn test_reclaim_guards() {
    let pool = funded_with_schedule();
    let owner = pool.owner(1);

    assert_eq!(
        pool.client.try_reclaim_milestone(&1, &0),
        Err(Ok(Error::DeadlineNotReached))
    );
    assert_eq!(
        pool.client.try_reclaim_milestone(&2, &0),
        Err(Ok(Error::MilestonesNotSet))
    );
    assert_eq!(
        pool.client.try_reclaim_milestone(&4, &0),
        Err(Ok(Error::NotWinner))
    );

    // Undisputed evidence past the deadline still belongs to the approvers.
    pool.client.submit_milestone_evidence(&owner, &1, &0, &evidence(&pool));
    pool.set_time(pool.voting_deadline() + MONTH + 1);
    assert_eq!(
        pool.client.try_reclaim_milestone(&1, &0),
        Err(Ok(Error::MilestoneNotDisputed))
    );
    approve_all(&pool, 1, 0);
    assert_eq!(pool.token.balance(&owner), 285);
    assert_eq!(
        pool.client.try_reclaim_milestone(&1, &0),
        Err(Ok(Error::MilestoneNotPending))
    );
}

#[test]
fn test_admin_extends_missed_deadline() {
    let pool = funded_with_schedule();
    let owner = pool.owner(1);
    let late = pool.voting_deadline() + MONTH + 1;
    pool.set_time(late);

    assert_eq!(
        pool.client
            .try_submit_milestone_evidence(&owner, &1, &0, &evidence(&pool)),
        Err(Ok(Error::MilestoneDeadlinePassed))
    );
    assert_eq!(
        pool.client
            .try_extend_milestone_deadline(&pool.approvers.get_unchecked(0), &1, &0, &(late + MONTH)),
        Err(Ok(Error::NotAuthorized))
    );
    assert_eq!(
        pool.client.try_extend_milestone_deadline(&pool.admin, &1, &0, &late),
        Err(Ok(Error::InvalidDeadline))
    );
    // Milestone 1 is still due later; an extension may not shorten it.
    assert_eq!(
        pool.client
            .try_extend_milestone_deadline(&pool.admin, &1, &1, &(late + 1)),
        Err(Ok(Error::InvalidDeadline))
    );

    pool.client
        .extend_milestone_deadline(&pool.admin, &1, &0, &(late + MONTH));
    assert_eq!(pool.client.get_milestones(&1).get_unchecked(0).deadline, late + MONTH);
    assert_eq!(
        pool.client.try_reclaim_milestone(&1, &0),
        Err(Ok(Error::DeadlineNotReached))
    );

    pool.client.submit_milestone_evidence(&owner, &1, &0, &evidence(&pool));
    approve_all(&pool, 1, 0);
    assert_eq!(pool.token.balance(&owner), 285);
    assert_eq!(
        pool.client
            .try_extend_milestone_deadline(&pool.admin, &1, &0, &(late + 2 * MONTH)),
        Err(Ok(Error::MilestoneNotPending))
    );
}

#[test]
fn test_frozen_dispute_is_reclaimed_after_deadline() {
    let pool = setup_with(|c| c.dispute_policy = DisputePolicy::Frozen);
    pool.back(1, 1_000);
    pool.set_time(pool.voting_deadline());
    pool.client.end_voting(&pool.admin);

    let owner = pool.owner(1);
    pool.client.set_milestones(&owner, &1, &schedule(&pool, &[10_000]));
    assert_eq!(
        pool.client.try_extend_milestone_deadline(
            &pool.admin,
            &1,
            &0,
            &(pool.voting_deadline() + 2 * MONTH)
        ),
        Err(Ok(Error::DisputeResolutionDisabled))
    );

    pool.client.submit_milestone_evidence(&owner, &1, &0, &evidence(&pool));
    pool.client
        .dispute_milestone(&pool.approvers.get_unchecked(0), &1, &0);

    pool.set_time(pool.voting_deadline() + MONTH + 1);
    assert_eq!(pool.client.reclaim_milestone(&1, &0), 950);

    // fee 50 + reclaimed tranche
    assert_eq!(pool.token.balance(&pool.treasury), 1_000);
    assert_eq!(pool.token.balance(&owner), 0);
    assert_eq!(pool.token.balance(&pool.client.address), 0);
    assert!(!pool.client.get_milestones(&1).get_unchecked(0).disputed);
    assert_eq!(pool.client.get_state().phase, PoolPhase::Closed);
}
