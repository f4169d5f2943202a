use soroban_sdk::{contracttype, symbol_short, Address, Env, String};

use crate::types::PoolPhase;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolInitialized {
    pub pool_id: u64,
    pub asset: Address,
    pub funding_goal: i128,
    pub voting_deadline: u64,
    pub candidates: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Contributed {
    pub backer: Address,
    pub pitch_id: u64,
    pub amount: i128,
    pub receipt_id: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VoteCast {
    pub backer: Address,
    pub pitch_id: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Withdrawn {
    pub backer: Address,
    pub amount: i128,
    pub penalty: i128,
    pub refund: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VotingEnded {
    pub phase: PoolPhase,
    pub total_contributions: i128,
    pub platform_fee: i128,
    pub winners: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolFailed {
    pub total_contributions: i128,
    pub penalties: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Refunded {
    pub backer: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MilestonesSet {
    pub pitch_id: u64,
    pub count: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EvidenceSubmitted {
    pub pitch_id: u64,
    pub milestone_id: u32,
    pub evidence: String,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MilestoneApproved {
    pub pitch_id: u64,
    pub milestone_id: u32,
    pub approver: Address,
    pub approvals: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FundsReleased {
    pub pitch_id: u64,
    pub milestone_id: u32,
    pub recipient: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MilestoneDisputed {
    pub pitch_id: u64,
    pub milestone_id: u32,
    pub by: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DisputeResolved {
    pub pitch_id: u64,
    pub milestone_id: u32,
    pub upheld: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DeadlineExtended {
    pub pitch_id: u64,
    pub milestone_id: u32,
    pub deadline: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MilestoneReclaimed {
    pub pitch_id: u64,
    pub milestone_id: u32,
    pub treasury: Address,
    pub amount: i128,
}

pub fn emit_pool_initialized(
    env: &Env,
    pool_id: u64,
    asset: Address,
    funding_goal: i128,
    voting_deadline: u64,
    candidates: u32,
) {
    let topics = (symbol_short!("init"), pool_id);
    let data = PoolInitialized {
        pool_id,
        asset,
        funding_goal,
        voting_deadline,
        candidates,
    };
    env.events().publish(topics, data);
}

pub fn emit_contributed(env: &Env, pool_id: u64, backer: Address, pitch_id: u64, amount: i128, receipt_id: u64) {
    let topics = (symbol_short!("contrib"), pool_id);
    let data = Contributed {
        backer,
        pitch_id,
        amount,
        receipt_id,
    };
    env.events().publish(topics, data);
}

pub fn emit_vote_cast(env: &Env, pool_id: u64, backer: Address, pitch_id: u64) {
    let topics = (symbol_short!("voted"), pool_id);
    env.events().publish(topics, VoteCast { backer, pitch_id });
}

pub fn emit_withdrawn(env: &Env, pool_id: u64, backer: Address, amount: i128, penalty: i128, refund: i128) {
    let topics = (symbol_short!("withdrawn"), pool_id);
    let data = Withdrawn {
        backer,
        amount,
        penalty,
        refund,
    };
    env.events().publish(topics, data);
}

pub fn emit_voting_ended(
    env: &Env,
    pool_id: u64,
    phase: PoolPhase,
    total_contributions: i128,
    platform_fee: i128,
    winners: u32,
) {
    let topics = (symbol_short!("vt_ended"), pool_id);
    let data = VotingEnded {
        phase,
        total_contributions,
        platform_fee,
        winners,
    };
    env.events().publish(topics, data);
}

pub fn emit_pool_failed(env: &Env, pool_id: u64, total_contributions: i128, penalties: i128) {
    let topics = (symbol_short!("failed"), pool_id);
    let data = PoolFailed {
        total_contributions,
        penalties,
    };
    env.events().publish(topics, data);
}

pub fn emit_refunded(env: &Env, pool_id: u64, backer: Address, amount: i128) {
    let topics = (symbol_short!("refunded"), pool_id);
    env.events().publish(topics, Refunded { backer, amount });
}

pub fn emit_milestones_set(env: &Env, pool_id: u64, pitch_id: u64, count: u32) {
    let topics = (symbol_short!("ms_set"), pool_id);
    env.events().publish(topics, MilestonesSet { pitch_id, count });
}

pub fn emit_evidence_submitted(env: &Env, pool_id: u64, pitch_id: u64, milestone_id: u32, evidence: String) {
    let topics = (symbol_short!("ms_evid"), pool_id);
    let data = EvidenceSubmitted {
        pitch_id,
        milestone_id,
        evidence,
    };
    env.events().publish(topics, data);
}

pub fn emit_milestone_approved(
    env: &Env,
    pool_id: u64,
    pitch_id: u64,
    milestone_id: u32,
    approver: Address,
    approvals: u32,
) {
    let topics = (symbol_short!("ms_appr"), pool_id);
    let data = MilestoneApproved {
        pitch_id,
        milestone_id,
        approver,
        approvals,
    };
    env.events().publish(topics, data);
}

pub fn emit_funds_released(
    env: &Env,
    pool_id: u64,
    pitch_id: u64,
    milestone_id: u32,
    recipient: Address,
    amount: i128,
) {
    let topics = (symbol_short!("released"), pool_id);
    let data = FundsReleased {
        pitch_id,
        milestone_id,
        recipient,
        amount,
    };
    env.events().publish(topics, data);
}

pub fn emit_milestone_disputed(env: &Env, pool_id: u64, pitch_id: u64, milestone_id: u32, by: Address) {
    let topics = (symbol_short!("ms_disp"), pool_id);
    let data = MilestoneDisputed {
        pitch_id,
        milestone_id,
        by,
    };
    env.events().publish(topics, data);
}

pub fn emit_dispute_resolved(env: &Env, pool_id: u64, pitch_id: u64, milestone_id: u32, upheld: bool) {
    let topics = (symbol_short!("ms_resol"), pool_id);
    let data = DisputeResolved {
        pitch_id,
        milestone_id,
        upheld,
    };
    env.events().publish(topics, data);
}

pub fn emit_deadline_extended(env: &Env, pool_id: u64, pitch_id: u64, milestone_id: u32, deadline: u64) {
    let topics = (symbol_short!("ms_extnd"), pool_id);
    let data = DeadlineExtended {
        pitch_id,
        milestone_id,
        deadline,
    };
    env.events().publish(topics, data);
}

pub fn emit_milestone_reclaimed(
    env: &Env,
    pool_id: u64,
    pitch_id: u64,
    milestone_id: u32,
    treasury: Address,
    amount: i128,
) {
    let topics = (symbol_short!("ms_reclm"), pool_id);
    let data = MilestoneReclaimed {
        pitch_id,
        milestone_id,
        treasury,
        amount,
    };
    env.events().publish(topics, data);
}

pub fn emit_pool_closed(env: &Env, pool_id: u64) {
    env.events().publish((symbol_short!("closed"), pool_id), ());
}
