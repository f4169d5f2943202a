//! # Fee / Distribution Calculator
//!
//! Pure integer math for fees, proportional payouts and early-exit penalties.
//! Nothing here touches storage; the `Env` argument is only used to allocate
//! result vectors.
//!
//! Every split assigns the rounding remainder to the last slot, so the parts
//! always add back up to the whole:
//!
//! ```text
//! share[i]   = total * weight[i] / sum(weights)     for i < n - 1
//! share[n-1] = total - sum(share[0..n-1])
//! ```

use soroban_sdk::{Env, Vec};

use crate::constants::{BASIS_POINTS_DENOMINATOR, MAX_PLATFORM_FEE_BPS};
use crate::errors::Error;

/// `amount * fee_bps / 10_000`, floored.
pub fn platform_fee(amount: i128, fee_bps: u32) -> Result<i128, Error> {
    if fee_bps > MAX_PLATFORM_FEE_BPS {
        return Err(Error::InvalidBasisPoints);
    }
    if amount < 0 {
        return Err(Error::InvalidAmount);
    }
    mul_div(amount, fee_bps as i128, BASIS_POINTS_DENOMINATOR as i128)
}

/// What is left of `amount` after the platform fee.
pub fn net_amount(amount: i128, fee_bps: u32) -> Result<i128, Error> {
    let fee = platform_fee(amount, fee_bps)?;
    Ok(amount - fee)
}

/// Split `total` across `weights` pro rata. The sum of the result is exactly
/// `total`.
pub fn proportional_distribution(
    env: &Env,
    total: i128,
    weights: &Vec<i128>,
) -> Result<Vec<i128>, Error> {
    if total < 0 {
        return Err(Error::InvalidAmount);
    }
    let weight_sum = sum_weights(weights)?;
    split(env, total, weights, weight_sum)
}

/// Each weight's share of the whole in basis points. The sum of the result is
/// exactly 10,000.
pub fn allocation_percents(env: &Env, weights: &Vec<i128>) -> Result<Vec<u32>, Error> {
    let weight_sum = sum_weights(weights)?;
    let parts = split(env, BASIS_POINTS_DENOMINATOR as i128, weights, weight_sum)?;

    let mut percents = Vec::new(env);
    for part in parts.iter() {
        percents.push_back(part as u32);
    }
    Ok(percents)
}

/// Split `total` by a basis-point schedule that must sum to exactly 10,000.
pub fn split_by_basis_points(env: &Env, total: i128, bps: &Vec<u32>) -> Result<Vec<i128>, Error> {
    if total < 0 {
        return Err(Error::InvalidAmount);
    }
    let mut weights = Vec::new(env);
    let mut bps_sum: u32 = 0;
    for b in bps.iter() {
        bps_sum = bps_sum.checked_add(b).ok_or(Error::Overflow)?;
        weights.push_back(b as i128);
    }
    if bps_sum != BASIS_POINTS_DENOMINATOR {
        return Err(Error::InvalidBasisPoints);
    }
    split(env, total, &weights, bps_sum as i128)
}

/// Returns `(penalty, refund)` with `penalty + refund == amount`.
pub fn early_withdrawal_penalty(amount: i128, penalty_bps: u32) -> Result<(i128, i128), Error> {
    if penalty_bps > BASIS_POINTS_DENOMINATOR {
        return Err(Error::InvalidBasisPoints);
    }
    if amount < 0 {
        return Err(Error::InvalidAmount);
    }
    let penalty = mul_div(amount, penalty_bps as i128, BASIS_POINTS_DENOMINATOR as i128)?;
    Ok((penalty, amount - penalty))
}

fn sum_weights(weights: &Vec<i128>) -> Result<i128, Error> {
    let mut sum: i128 = 0;
    for w in weights.iter() {
        if w < 0 {
            return Err(Error::InvalidAmount);
        }
        sum = sum.checked_add(w).ok_or(Error::Overflow)?;
    }
    if sum == 0 {
        return Err(Error::ZeroWeights);
    }
    Ok(sum)
}

fn split(env: &Env, total: i128, weights: &Vec<i128>, weight_sum: i128) -> Result<Vec<i128>, Error> {
    let mut shares = Vec::new(env);
    let last = weights.len() - 1;
    let mut distributed: i128 = 0;

    for (i, weight) in weights.iter().enumerate() {
        let share = if i as u32 == last {
            total - distributed
        } else {
            mul_div(total, weight, weight_sum)?
        };
        distributed = distributed.checked_add(share).ok_or(Error::Overflow)?;
        shares.push_back(share);
    }
    Ok(shares)
}

fn mul_div(a: i128, b: i128, denominator: i128) -> Result<i128, Error> {
    a.checked_mul(b)
        .ok_or(Error::Overflow)?
        .checked_div(denominator)
        .ok_or(Error::Overflow)
}
