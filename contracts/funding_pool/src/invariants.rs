#![allow(dead_code)]

extern crate std;

use soroban_sdk::Address;

use crate::test::Pool;
use crate::{PoolPhase, PoolState};

/// Sum of candidate weights equals the sum of live contributions across
/// `backers`, and equals the pool's running total.
pub fn assert_weights_match_contributions(pool: &Pool, backers: &[Address]) {
    let weights: i128 = pool
        .client
        .get_candidates()
        .iter()
        .map(|c| pool.client.get_vote_weight(&c.pitch_id))
        .sum();

    let mut live: i128 = 0;
    for backer in backers {
        let backer_live: i128 = pool
            .client
            .get_contributions(backer)
            .iter()
            .filter(|c| !c.withdrawn)
            .map(|c| c.amount)
            .sum();
        assert_eq!(
            pool.client.get_backer_total(backer),
            backer_live,
            "backer total diverged from live contributions"
        );
        live += backer_live;
    }

    let state = pool.client.get_state();
    assert_eq!(weights, live, "vote weights {} != live contributions {}", weights, live);
    assert_eq!(state.total_contributions, live);
}

/// Before settlement the contract holds every live contribution plus the
/// retained penalties, and nothing else.
pub fn assert_custody_balance(pool: &Pool) {
    let state = pool.client.get_state();
    assert_eq!(state.phase, PoolPhase::Active);
    assert_eq!(
        pool.token.balance(&pool.client.address),
        state.total_contributions + state.total_penalties,
        "pool balance does not match contributions + penalties"
    );
}

/// Every live contribution has a receipt held by its backer; every withdrawn
/// one has none.
pub fn assert_receipts_track_contributions(pool: &Pool, backers: &[Address]) {
    for backer in backers {
        let mut live = 0u32;
        for c in pool.client.get_contributions(backer).iter() {
            let owner = pool.client.try_receipt_owner(&c.receipt_id);
            if c.withdrawn {
                assert!(owner.is_err(), "withdrawn contribution kept its receipt");
            } else {
                assert_eq!(owner, Ok(Ok(backer.clone())));
                live += 1;
            }
        }
        assert_eq!(pool.client.receipt_count(backer), live);
    }
}

/// Settlement conserves value: fee + allocations == total contributions.
pub fn assert_allocation_conserves(pool: &Pool) {
    let state = pool.client.get_state();
    let allocated: i128 = pool.client.get_winners().iter().map(|w| w.amount).sum();
    assert_eq!(
        allocated + state.platform_fee,
        state.total_contributions,
        "allocations {} + fee {} != total {}",
        allocated,
        state.platform_fee,
        state.total_contributions
    );
    let bps: u32 = pool
        .client
        .get_winners()
        .iter()
        .map(|w| w.allocation_bps)
        .sum();
    if !pool.client.get_winners().is_empty() {
        assert_eq!(bps, 10_000);
    }
}

/// After settlement the contract holds exactly what winners have not yet
/// been paid or had reclaimed.
pub fn assert_escrow_balance(pool: &Pool) {
    let held: i128 = pool.client.get_winners().iter().map(|w| w.remaining()).sum();
    assert_eq!(
        pool.token.balance(&pool.client.address),
        held,
        "escrow balance does not match unreleased allocations"
    );
}

/// Allowed phase moves. Staying put is always allowed.
pub fn assert_valid_transition(before: &PoolState, after: &PoolState) {
    use PoolPhase::*;
    let ok = matches!(
        (before.phase, after.phase),
        (Active, VotingEnded)
            | (Active, Funded)
            | (Active, Failed)
            | (VotingEnded, Failed)
            | (Funded, Closed)
    ) || before.phase == after.phase;
    assert!(ok, "illegal phase move {:?} -> {:?}", before.phase, after.phase);
    assert!(after.next_receipt_id >= before.next_receipt_id);
}
