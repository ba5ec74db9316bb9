//! # Points ledger
//!
//! Per (tribe, member) point balances. Balances only grow through
//! `record_action` / `award_points` and only shrink through `deduct_points`,
//! which never takes a balance below zero.
//!
//! Action types are keccak256 hashes of short names (`POST`, `LIKE`,
//! `COMMENT`, ...); each tribe maps them to a point value.
//!
//! Each tribe keeps a sorted leaderboard of at most [`LEADERBOARD_SIZE`]
//! rows, updated whenever a balance changes or a member joins or leaves.
//! Members outside the board enter it on their next balance change.

use soroban_sdk::{panic_with_error, Address, Bytes, BytesN, Env, Symbol, Vec};

use crate::events;
use crate::membership;
use crate::rbac;
use crate::storage;
use crate::types::MemberPoints;
use crate::Error;

pub const ACTION_POST: &[u8] = b"POST";
pub const ACTION_COMMENT: &[u8] = b"COMMENT";

/// Rows kept on each tribe's leaderboard.
pub const LEADERBOARD_SIZE: u32 = 50;

pub fn action_hash(env: &Env, name: &[u8]) -> BytesN<32> {
    env.crypto().keccak256(&Bytes::from_slice(env, name)).into()
}

pub fn set_action_points(
    env: &Env,
    admin: &Address,
    tribe_id: u64,
    action: &BytesN<32>,
    points: u128,
) {
    rbac::require_tribe_admin(env, admin, tribe_id);
    storage::set_action_points(env, tribe_id, action, points);
    events::emit_action_points_set(env, tribe_id, action.clone(), points);
}

/// Credit the configured value of `action` to `member`. Returns the new balance.
pub fn record_action(
    env: &Env,
    admin: &Address,
    tribe_id: u64,
    member: &Address,
    action: &BytesN<32>,
) -> u128 {
    rbac::require_tribe_admin(env, admin, tribe_id);
    membership::require_active_member(env, tribe_id, member);
    credit_action(env, tribe_id, member, action)
}

/// Unchecked variant of [`record_action`] used by the contract's own flows
/// (posting, replying) once they have authorized the member themselves.
pub fn credit_action(env: &Env, tribe_id: u64, member: &Address, action: &BytesN<32>) -> u128 {
    let count = storage::get_action_count(env, tribe_id, member, action);
    storage::set_action_count(env, tribe_id, member, action, count.saturating_add(1));

    let points = storage::get_action_points(env, tribe_id, action);
    credit(env, tribe_id, member, points, action)
}

/// Award `amount` directly, bypassing the action table.
pub fn award_points(
    env: &Env,
    admin: &Address,
    tribe_id: u64,
    member: &Address,
    amount: u128,
    action: &BytesN<32>,
) -> u128 {
    rbac::require_tribe_admin(env, admin, tribe_id);
    membership::require_active_member(env, tribe_id, member);
    if amount == 0 {
        panic_with_error!(env, Error::InvalidAmount);
    }
    credit(env, tribe_id, member, amount, action)
}

pub fn deduct_points(
    env: &Env,
    admin: &Address,
    tribe_id: u64,
    member: &Address,
    amount: u128,
    reason: Symbol,
) -> u128 {
    rbac::require_tribe_admin(env, admin, tribe_id);
    membership::require_active_member(env, tribe_id, member);

    let balance = storage::get_points(env, tribe_id, member);
    if amount == 0 {
        return balance;
    }
    let remaining = balance
        .checked_sub(amount)
        .unwrap_or_else(|| panic_with_error!(env, Error::InsufficientPoints));
    storage::set_points(env, tribe_id, member, remaining);
    rank(env, tribe_id, member, remaining);
    events::emit_points_deducted(env, tribe_id, member.clone(), amount, reason, remaining);
    remaining
}

/// Up to `limit` active members ordered by points, highest first.
/// Members with equal points keep the order in which they reached them.
pub fn top_members(env: &Env, tribe_id: u64, limit: u32) -> Vec<MemberPoints> {
    let board = storage::get_leaderboard(env, tribe_id);
    let end = limit.min(board.len());
    board.slice(0..end)
}

/// Place `member` on the leaderboard at the slot `points` earns.
pub fn rank(env: &Env, tribe_id: u64, member: &Address, points: u128) {
    let mut board = storage::get_leaderboard(env, tribe_id);
    if let Some(current) = board.iter().position(|row| &row.member == member) {
        if board.get(current as u32).map(|row| row.points) == Some(points) {
            return;
        }
        board.remove(current as u32);
    }

    let position = board
        .iter()
        .position(|row| row.points < points)
        .map(|i| i as u32)
        .unwrap_or(board.len());
    if position >= LEADERBOARD_SIZE {
        return;
    }
    board.insert(
        position,
        MemberPoints {
            member: member.clone(),
            points,
        },
    );
    if board.len() > LEADERBOARD_SIZE {
        board.pop_back();
    }
    storage::set_leaderboard(env, tribe_id, &board);
}

pub fn unrank(env: &Env, tribe_id: u64, member: &Address) {
    let mut board = storage::get_leaderboard(env, tribe_id);
    if let Some(current) = board.iter().position(|row| &row.member == member) {
        board.remove(current as u32);
        storage::set_leaderboard(env, tribe_id, &board);
    }
}

fn credit(env: &Env, tribe_id: u64, member: &Address, amount: u128, action: &BytesN<32>) -> u128 {
    let balance = storage::get_points(env, tribe_id, member)
        .checked_add(amount)
        .unwrap_or_else(|| panic_with_error!(env, Error::Overflow));
    storage::set_points(env, tribe_id, member, balance);
    rank(env, tribe_id, member, balance);
    events::emit_points_awarded(env, tribe_id, member.clone(), amount, action.clone(), balance);
    balance
}
