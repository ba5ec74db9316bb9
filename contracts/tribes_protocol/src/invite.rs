//! # Invite codes
//!
//! Codes are stored under `keccak256(code)` per tribe. Validity is computed
//! lazily on every check; nothing sweeps expired codes.
//!
//! A code is usable iff it is not revoked, `used_count < max_uses`, and
//! `expiry == 0 || now < expiry`. Unknown and revoked codes both fail with
//! `InvalidInviteCode`; exhausted and time-expired codes both fail with
//! `InviteCodeExpired`.

use soroban_sdk::{panic_with_error, Address, Bytes, BytesN, Env};

use crate::events;
use crate::membership;
use crate::rbac;
use crate::storage;
use crate::types::{InviteCode, InviteCodeStatus};
use crate::Error;

pub fn hash_code(env: &Env, code: &Bytes) -> BytesN<32> {
    env.crypto().keccak256(code).into()
}

/// Why a stored code cannot be redeemed, if it cannot.
///
/// `remaining_uses` reported by [`status`] stays `max_uses - used_count` for
/// a time-expired code; only revoked and unknown codes report zero.
pub fn check(invite: Option<&InviteCode>, now: u64) -> Result<(), Error> {
    match invite {
        None => Err(Error::InvalidInviteCode),
        Some(code) if code.revoked => Err(Error::InvalidInviteCode),
        Some(code) if code.used_count >= code.max_uses => Err(Error::InviteCodeExpired),
        Some(code) if code.expiry != 0 && now >= code.expiry => Err(Error::InviteCodeExpired),
        Some(_) => Ok(()),
    }
}

pub fn create(
    env: &Env,
    admin: &Address,
    tribe_id: u64,
    code: &Bytes,
    max_uses: u32,
    expiry: u64,
) -> BytesN<32> {
    rbac::require_tribe_admin(env, admin, tribe_id);

    if code.is_empty() {
        panic_with_error!(env, Error::InvalidInviteCode);
    }
    if max_uses == 0 {
        panic_with_error!(env, Error::InvalidAmount);
    }
    if expiry != 0 && expiry <= env.ledger().timestamp() {
        panic_with_error!(env, Error::InvalidExpiry);
    }

    let code_hash = hash_code(env, code);
    if let Some(existing) = storage::get_invite(env, tribe_id, &code_hash) {
        if !existing.revoked {
            panic_with_error!(env, Error::InviteCodeExists);
        }
    }

    let invite = InviteCode {
        max_uses,
        used_count: 0,
        expiry,
        revoked: false,
    };
    storage::save_invite(env, tribe_id, &code_hash, &invite);
    events::emit_invite_created(env, tribe_id, code_hash.clone(), max_uses, expiry);
    code_hash
}

pub fn revoke(env: &Env, admin: &Address, tribe_id: u64, code: &Bytes) {
    rbac::require_tribe_admin(env, admin, tribe_id);

    let code_hash = hash_code(env, code);
    let mut invite = match storage::get_invite(env, tribe_id, &code_hash) {
        Some(invite) if !invite.revoked => invite,
        _ => panic_with_error!(env, Error::InvalidInviteCode),
    };
    invite.revoked = true;
    storage::save_invite(env, tribe_id, &code_hash, &invite);
    events::emit_invite_revoked(env, tribe_id, code_hash);
}

/// Redeem `code_hash` for `user` and make them an active member.
pub fn redeem(env: &Env, user: &Address, tribe_id: u64, code_hash: &BytesN<32>) {
    // Membership and join type first: a banned user must see `UserBanned`.
    let (from, to) = membership::join_with_code(env, user, tribe_id);

    let invite = storage::get_invite(env, tribe_id, code_hash);
    if let Err(err) = check(invite.as_ref(), env.ledger().timestamp()) {
        panic_with_error!(env, err);
    }
    let mut invite = invite.unwrap_or_else(|| panic_with_error!(env, Error::InvalidInviteCode));
    invite.used_count += 1;
    storage::save_invite(env, tribe_id, code_hash, &invite);

    membership::apply(env, tribe_id, user, from, to);
    events::emit_invite_used(env, tribe_id, code_hash.clone(), user.clone(), invite.used_count);
}

pub fn status(env: &Env, tribe_id: u64, code: &Bytes) -> InviteCodeStatus {
    let code_hash = hash_code(env, code);
    let invite = storage::get_invite(env, tribe_id, &code_hash);
    let valid = check(invite.as_ref(), env.ledger().timestamp()).is_ok();
    let remaining_uses = match invite {
        Some(code) if !code.revoked => code.max_uses.saturating_sub(code.used_count),
        _ => 0,
    };
    InviteCodeStatus {
        valid,
        remaining_uses,
    }
}
