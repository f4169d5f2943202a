extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events},
    vec, Address, IntoVal, String, TryIntoVal,
};

use crate::events::{
    Contributed, DeadlineExtended, DisputeResolved, FundsReleased, MilestoneReclaimed, VotingEnded,
    Withdrawn,
};
use crate::test::{setup, setup_funded};
use crate::{MilestoneInput, PoolPhase};

#[test]
fn test_contributed_event() {
    let pool = setup();
    let backer = Address::generate(&pool.env);
    let receipt_id = pool.back_as(&backer, 2, 250);

    let all_events = pool.env.events().all();
    let last_event = all_events.last().expect("No events found");

    // Topic: (symbol_short!("contrib"), pool_id)
    assert_eq!(last_event.0, pool.client.address);
    let expected_topics = vec![
        &pool.env,
        symbol_short!("contrib").into_val(&pool.env),
        7u64.into_val(&pool.env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: Contributed = last_event.2.try_into_val(&pool.env).unwrap();
    assert_eq!(
        event_data,
        Contributed {
            backer,
            pitch_id: 2,
            amount: 250,
            receipt_id,
        }
    );
}

#[test]
fn test_withdrawn_event_reports_penalty() {
    let pool = setup();
    let backer = pool.back(1, 1_000);
    pool.client.withdraw_early(&backer);

    let all_events = pool.env.events().all();
    let last_event = all_events.last().expect("No events found");

    let expected_topics = vec![
        &pool.env,
        symbol_short!("withdrawn").into_val(&pool.env),
        7u64.into_val(&pool.env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: Withdrawn = last_event.2.try_into_val(&pool.env).unwrap();
    assert_eq!(
        event_data,
        Withdrawn {
            backer,
            amount: 1_000,
            penalty: 100,
            refund: 900,
        }
    );
}

#[test]
fn test_voting_ended_event() {
    let pool = setup_funded();

    let all_events = pool.env.events().all();
    let last_event = all_events.last().expect("No events found");

    assert_eq!(last_event.0, pool.client.address);
    let expected_topics = vec![
        &pool.env,
        symbol_short!("vt_ended").into_val(&pool.env),
        7u64.into_val(&pool.env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: VotingEnded = last_event.2.try_into_val(&pool.env).unwrap();
    assert_eq!(
        event_data,
        VotingEnded {
            phase: PoolPhase::Funded,
            total_contributions: 1_000,
            platform_fee: 50,
            winners: 3,
        }
    );
}

#[test]
fn test_failed_event_topic() {
    let pool = setup();
    pool.back(1, 300);
    pool.set_time(pool.funding_deadline());
    pool.client.finalize_funding();

    let all_events = pool.env.events().all();
    let last_event = all_events.last().expect("No events found");
    let expected_topics = vec![
        &pool.env,
        symbol_short!("failed").into_val(&pool.env),
        7u64.into_val(&pool.env),
    ];
    assert_eq!(last_event.1, expected_topics);
}

#[test]
fn test_release_and_dispute_events() {
    let pool = setup_funded();
    let owner = pool.owner(3);
    let inputs = vec![
        &pool.env,
        MilestoneInput {
            description: String::from_str(&pool.env, "pilot with two customers"),
            funding_bps: 10_000,
            deadline: pool.voting_deadline() + 86_400,
        },
    ];
    pool.client.set_milestones(&owner, &3, &inputs);
    pool.client.submit_milestone_evidence(
        &owner,
        &3,
        &0,
        &String::from_str(&pool.env, "ipfs://pilot-report"),
    );

    let first = pool.approvers.get_unchecked(0);
    let second = pool.approvers.get_unchecked(1);
    pool.client.dispute_milestone(&first, &3, &0);
    pool.client.resolve_dispute(&pool.admin, &3, &0, &true);

    let all_events = pool.env.events().all();
    let last_event = all_events.last().expect("No events found");
    let resolved: DisputeResolved = last_event.2.try_into_val(&pool.env).unwrap();
    assert_eq!(
        resolved,
        DisputeResolved {
            pitch_id: 3,
            milestone_id: 0,
            upheld: true,
        }
    );

    pool.client.approve_milestone(&first, &3, &0);
    pool.client.approve_milestone(&second, &3, &0);

    let all_events = pool.env.events().all();
    let released = all_events
        .iter()
        .find(|e| {
            e.0 == pool.client.address
                && e.1
                    == vec![
                        &pool.env,
                        symbol_short!("released").into_val(&pool.env),
                        7u64.into_val(&pool.env),
                    ]
        })
        .expect("no release event");
    let data: FundsReleased = released.2.try_into_val(&pool.env).unwrap();
    assert_eq!(
        data,
        FundsReleased {
            pitch_id: 3,
            milestone_id: 0,
            recipient: owner,
            amount: 190,
        }
    );
}

#[test]
fn test_extension_and_reclaim_events() {
    let pool = setup_funded();
    let owner = pool.owner(3);
    let due = pool.voting_deadline() + 86_400;
    let inputs = vec![
        &pool.env,
        MilestoneInput {
            description: String::from_str(&pool.env, "pilot with two customers"),
            funding_bps: 10_000,
            deadline: due,
        },
    ];
    pool.client.set_milestones(&owner, &3, &inputs);

    pool.client
        .extend_milestone_deadline(&pool.admin, &3, &0, &(due + 86_400));
    let all_events = pool.env.events().all();
    let last_event = all_events.last().expect("No events found");
    let expected_topics = vec![
        &pool.env,
        symbol_short!("ms_extnd").into_val(&pool.env),
        7u64.into_val(&pool.env),
    ];
    assert_eq!(last_event.1, expected_topics);
    let extended: DeadlineExtended = last_event.2.try_into_val(&pool.env).unwrap();
    assert_eq!(
        extended,
        DeadlineExtended {
            pitch_id: 3,
            milestone_id: 0,
            deadline: due + 86_400,
        }
    );

    pool.set_time(due + 86_400 + 1);
    pool.client.reclaim_milestone(&3, &0);

    let all_events = pool.env.events().all();
    let last_event = all_events.last().expect("No events found");
    let expected_topics = vec![
        &pool.env,
        symbol_short!("ms_reclm").into_val(&pool.env),
        7u64.into_val(&pool.env),
    ];
    assert_eq!(last_event.1, expected_topics);
    let reclaimed: MilestoneReclaimed = last_event.2.try_into_val(&pool.env).unwrap();
    assert_eq!(
        reclaimed,
        MilestoneReclaimed {
            pitch_id: 3,
            milestone_id: 0,
            treasury: pool.treasury.clone(),
            amount: 190,
        }
    );
}
