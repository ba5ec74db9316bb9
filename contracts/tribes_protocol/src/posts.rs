//! # Posts
//!
//! Tribe feeds. Only active members post; each author waits
//! `storage::post_cooldown` seconds between posts. A post may be gated by a
//! collectible of the same tribe, in which case only holders (plus the
//! author and the tribe admin) can view it or interact with it.

use soroban_sdk::{panic_with_error, Address, Env, String};

use crate::events;
use crate::membership;
use crate::points;
use crate::storage;
use crate::types::{InteractionKind, JoinType, MemberStatus, Post, PostContent};
use crate::Error;

/// Upper bound on any text field of a post, in bytes.
pub const MAX_TEXT_LEN: u32 = 2_048;

pub fn create(
    env: &Env,
    author: &Address,
    tribe_id: u64,
    content: PostContent,
    gate: Option<u64>,
) -> u64 {
    membership::require_active_member(env, tribe_id, author);
    validate_content(env, &content);

    if let Some(collectible_id) = gate {
        match storage::get_collectible(env, collectible_id) {
            Some(collectible) if collectible.tribe_id == tribe_id => {}
            _ => panic_with_error!(env, Error::InvalidGate),
        }
    }

    let id = publish(env, author, tribe_id, content, None, gate);
    let action = points::action_hash(env, points::ACTION_POST);
    points::credit_action(env, tribe_id, author, &action);
    id
}

pub fn reply(env: &Env, author: &Address, parent_id: u64, content: PostContent) -> u64 {
    let parent = storage::load_post(env, parent_id);
    if parent.deleted {
        panic_with_error!(env, Error::PostDeleted);
    }
    membership::require_active_member(env, parent.tribe_id, author);
    if !can_view(env, author, &parent) {
        panic_with_error!(env, Error::CannotViewPost);
    }
    validate_content(env, &content);

    let id = publish(env, author, parent.tribe_id, content, Some(parent_id), parent.gate);
    let action = points::action_hash(env, points::ACTION_COMMENT);
    points::credit_action(env, parent.tribe_id, author, &action);
    id
}

/// Soft-delete. Allowed for the author and the tribe admin.
pub fn delete(env: &Env, caller: &Address, post_id: u64) {
    let mut post = storage::load_post(env, post_id);
    if post.deleted {
        panic_with_error!(env, Error::PostDeleted);
    }
    if &post.author != caller && !is_tribe_admin(env, post.tribe_id, caller) {
        panic_with_error!(env, Error::NotAuthorized);
    }
    post.deleted = true;
    storage::save_post(env, &post);
    events::emit_post_deleted(env, post_id, caller.clone());
}

/// Record one interaction of `kind` by `user`. Returns the new count.
pub fn interact(env: &Env, user: &Address, post_id: u64, kind: InteractionKind) -> u32 {
    let post = storage::load_post(env, post_id);
    if post.deleted {
        panic_with_error!(env, Error::PostDeleted);
    }
    if !can_view(env, user, &post) {
        panic_with_error!(env, Error::CannotViewPost);
    }
    if storage::has_interacted(env, post_id, user, kind) {
        panic_with_error!(env, Error::AlreadyInteracted);
    }

    let count = storage::record_interaction(env, post_id, user, kind);
    events::emit_post_interaction(env, post_id, user.clone(), kind, count);
    count
}

/// Visibility rule shared by reads, replies and interactions.
/// Banned addresses see nothing in the tribe that banned them.
pub fn can_view(env: &Env, viewer: &Address, post: &Post) -> bool {
    if post.deleted {
        return false;
    }
    if storage::get_member_status(env, post.tribe_id, viewer) == MemberStatus::Banned {
        return false;
    }
    if &post.author == viewer || is_tribe_admin(env, post.tribe_id, viewer) {
        return true;
    }
    match post.gate {
        Some(collectible_id) => storage::get_holding(env, collectible_id, viewer) > 0,
        None => {
            membership::is_active_member(env, post.tribe_id, viewer)
                || storage::load_join_policy(env, post.tribe_id).join_type == JoinType::Public
        }
    }
}

fn publish(
    env: &Env,
    author: &Address,
    tribe_id: u64,
    content: PostContent,
    parent_id: Option<u64>,
    gate: Option<u64>,
) -> u64 {
    let now = env.ledger().timestamp();
    if let Some(last) = storage::get_last_post_at(env, author) {
        if now < last.saturating_add(storage::post_cooldown(env)) {
            panic_with_error!(env, Error::CooldownActive);
        }
    }

    let id = storage::next_post_id(env);
    let post = Post {
        id,
        tribe_id,
        author: author.clone(),
        content,
        parent_id,
        gate,
        created_at: now,
        deleted: false,
    };
    storage::save_post(env, &post);
    storage::index_post(env, &post);
    storage::set_last_post_at(env, author, now);
    events::emit_post_created(env, id, tribe_id, author.clone(), parent_id);
    id
}

fn is_tribe_admin(env: &Env, tribe_id: u64, address: &Address) -> bool {
    &storage::load_tribe_config(env, tribe_id).admin == address
}

fn validate_content(env: &Env, content: &PostContent) {
    let valid = match content {
        PostContent::Text(body) => text_ok(body),
        PostContent::Media(uri, caption) => text_ok(uri) && caption.len() <= MAX_TEXT_LEN,
        PostContent::Event(title, starts_at) => {
            text_ok(title) && *starts_at > env.ledger().timestamp()
        }
        PostContent::Link(url) => text_ok(url),
    };
    if !valid {
        panic_with_error!(env, Error::InvalidContent);
    }
}

fn text_ok(text: &String) -> bool {
    !text.is_empty() && text.len() <= MAX_TEXT_LEN
}
