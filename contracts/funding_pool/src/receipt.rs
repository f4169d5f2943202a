//! # Receipts
//!
//! Ownership records minted 1:1 with contributions. A receipt is keyed by
//! its holder and can only be minted or burned by the pool itself; there is
//! no path that changes its holder.

use soroban_sdk::{Address, Env, Vec};

use crate::errors::Error;
use crate::storage;
use crate::types::{Contribution, Receipt};

/// Mint the receipt for a freshly recorded contribution.
pub fn mint(env: &Env, contribution: &Contribution) -> Receipt {
    let receipt = Receipt {
        id: contribution.receipt_id,
        holder: contribution.backer.clone(),
        pitch_id: contribution.pitch_id,
        amount: contribution.amount,
        minted_at: contribution.created_at,
    };
    storage::save_receipt(env, &receipt);

    let mut holdings = storage::get_holdings(env, &receipt.holder);
    holdings.push_back(receipt.id);
    storage::set_holdings(env, &receipt.holder, &holdings);
    receipt
}

/// Invalidate a receipt after its contribution was withdrawn.
pub fn burn(env: &Env, id: u64) -> Result<(), Error> {
    let receipt = storage::load_receipt(env, id).ok_or(Error::ReceiptNotFound)?;
    storage::remove_receipt(env, id);

    let holdings = storage::get_holdings(env, &receipt.holder);
    let mut kept = Vec::new(env);
    for held in holdings.iter() {
        if held != id {
            kept.push_back(held);
        }
    }
    storage::set_holdings(env, &receipt.holder, &kept);
    Ok(())
}

/// Receipts never change hands.
pub fn transfer(_env: &Env, _from: &Address, _to: &Address, _id: u64) -> Result<(), Error> {
    Err(Error::ReceiptNonTransferable)
}

pub fn owner_of(env: &Env, id: u64) -> Result<Address, Error> {
    storage::load_receipt(env, id)
        .map(|r| r.holder)
        .ok_or(Error::ReceiptNotFound)
}

/// Live receipts held by `holder`, in mint order.
pub fn receipts_of(env: &Env, holder: &Address) -> Vec<Receipt> {
    let mut receipts = Vec::new(env);
    for id in storage::get_holdings(env, holder).iter() {
        if let Some(receipt) = storage::load_receipt(env, id) {
            receipts.push_back(receipt);
        }
    }
    receipts
}

pub fn balance_of(env: &Env, holder: &Address) -> u32 {
    storage::get_holdings(env, holder).len()
}
