//! # Profiles
//!
//! One profile per address, addressed either by owner or by its sequential
//! id. Usernames are unique, 3 to 32 bytes of `[a-z0-9_]`, and cannot be
//! changed once claimed.

use soroban_sdk::{panic_with_error, Address, Env, String};

use crate::events;
use crate::storage;
use crate::types::Profile;
use crate::Error;

pub const MIN_USERNAME_LEN: u32 = 3;
pub const MAX_USERNAME_LEN: u32 = 32;

pub fn create(env: &Env, owner: &Address, username: String, metadata_uri: String) -> u64 {
    if !is_valid_username(&username) {
        panic_with_error!(env, Error::InvalidUsername);
    }
    if storage::profile_id_of(env, owner).is_some() {
        panic_with_error!(env, Error::ProfileExists);
    }
    if storage::profile_id_by_username(env, &username).is_some() {
        panic_with_error!(env, Error::UsernameTaken);
    }

    let id = storage::next_profile_id(env);
    let profile = Profile {
        id,
        owner: owner.clone(),
        username: username.clone(),
        metadata_uri,
        created_at: env.ledger().timestamp(),
    };
    storage::save_profile(env, &profile);
    storage::register_profile_keys(env, id, owner, &username);
    events::emit_profile_created(env, id, owner.clone(), username);
    id
}

pub fn update_metadata(env: &Env, owner: &Address, metadata_uri: String) {
    let mut profile = by_owner(env, owner);
    profile.metadata_uri = metadata_uri.clone();
    storage::save_profile(env, &profile);
    events::emit_profile_updated(env, profile.id, metadata_uri);
}

pub fn by_owner(env: &Env, owner: &Address) -> Profile {
    let id = storage::profile_id_of(env, owner)
        .unwrap_or_else(|| panic_with_error!(env, Error::ProfileNotFound));
    by_id(env, id)
}

pub fn by_id(env: &Env, id: u64) -> Profile {
    storage::get_profile(env, id).unwrap_or_else(|| panic_with_error!(env, Error::ProfileNotFound))
}

pub fn id_by_username(env: &Env, username: &String) -> u64 {
    storage::profile_id_by_username(env, username)
        .unwrap_or_else(|| panic_with_error!(env, Error::ProfileNotFound))
}

/// `false` for taken names and for names that would fail validation.
pub fn is_available(env: &Env, username: &String) -> bool {
    is_valid_username(username) && storage::profile_id_by_username(env, username).is_none()
}

pub fn is_valid_username(username: &String) -> bool {
    let len = username.len();
    if !(MIN_USERNAME_LEN..=MAX_USERNAME_LEN).contains(&len) {
        return false;
    }
    let mut buf = [0u8; MAX_USERNAME_LEN as usize];
    let bytes = &mut buf[..len as usize];
    username.copy_into_slice(bytes);
    bytes
        .iter()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || *b == b'_')
}
