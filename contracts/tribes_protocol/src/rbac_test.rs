#![cfg(test)]

use soroban_sdk::{testutils::Address as _, Address};

use crate::test_utils::*;
use crate::{Error, JoinType, MemberStatus, Role};

// ─── 1. Initialisation ───────────────────────────────────

#[test]
fn test_init_sets_super_admin_and_token() {
    let (_env, client, super_admin, token) = setup();
    assert!(client.has_role(&super_admin, &Role::SuperAdmin));
    assert_eq!(client.role_of(&super_admin), Some(Role::SuperAdmin));
    assert_eq!(client.payment_token(), token);
    assert_eq!(client.post_cooldown(), 60);
}

#[test]
#[should_panic(expected = "Error(Contract, #1)")]
fn test_init_twice_panics() {
    let (_env, client, super_admin, token) = setup();
    client.init(&super_admin, &token);
}

// ─── 2. grant_role ───────────────────────────────────────

#[test]
fn test_super_admin_can_grant_admin_and_moderator() {
    let (env, client, super_admin, _) = setup();
    let admin = Address::generate(&env);
    let moderator = Address::generate(&env);
    client.grant_role(&super_admin, &admin, &Role::Admin);
    client.grant_role(&super_admin, &moderator, &Role::Moderator);
    assert!(client.has_role(&admin, &Role::Admin));
    assert!(client.has_role(&moderator, &Role::Moderator));
}

#[test]
fn test_admin_can_grant_moderator() {
    let (env, client, super_admin, _) = setup();
    let admin = Address::generate(&env);
    let moderator = Address::generate(&env);
    client.grant_role(&super_admin, &admin, &Role::Admin);
    client.grant_role(&admin, &moderator, &Role::Moderator);
    assert!(client.has_role(&moderator, &Role::Moderator));
}

#[test]
fn test_granting_replaces_previous_role() {
    let (env, client, super_admin, _) = setup();
    let someone = Address::generate(&env);
    client.grant_role(&super_admin, &someone, &Role::Moderator);
    client.grant_role(&super_admin, &someone, &Role::Admin);
    assert_eq!(client.role_of(&someone), Some(Role::Admin));
}

#[test]
#[should_panic(expected = "Error(Contract, #10)")]
fn test_admin_cannot_grant_super_admin() {
    let (env, client, super_admin, _) = setup();
    let admin = Address::generate(&env);
    let impostor = Address::generate(&env);
    client.grant_role(&super_admin, &admin, &Role::Admin);
    client.grant_role(&admin, &impostor, &Role::SuperAdmin);
}

#[test]
#[should_panic(expected = "Error(Contract, #10)")]
fn test_moderator_cannot_grant() {
    let (env, client, super_admin, _) = setup();
    let moderator = Address::generate(&env);
    let target = Address::generate(&env);
    client.grant_role(&super_admin, &moderator, &Role::Moderator);
    client.grant_role(&moderator, &target, &Role::Moderator);
}

#[test]
#[should_panic(expected = "Error(Contract, #10)")]
fn test_cannot_demote_super_admin() {
    let (env, client, super_admin, _) = setup();
    let admin = Address::generate(&env);
    client.grant_role(&super_admin, &admin, &Role::Admin);
    client.grant_role(&admin, &super_admin, &Role::Moderator);
}

// ─── 3. revoke_role ──────────────────────────────────────

#[test]
fn test_admin_can_revoke_moderator() {
    let (env, client, super_admin, _) = setup();
    let admin = Address::generate(&env);
    let moderator = Address::generate(&env);
    client.grant_role(&super_admin, &admin, &Role::Admin);
    client.grant_role(&admin, &moderator, &Role::Moderator);
    client.revoke_role(&admin, &moderator);
    assert_eq!(client.role_of(&moderator), None);
}

#[test]
#[should_panic(expected = "Error(Contract, #10)")]
fn test_cannot_revoke_super_admin_via_revoke_role() {
    let (_env, client, super_admin, _) = setup();
    client.revoke_role(&super_admin, &super_admin);
}

#[test]
fn test_revoke_no_role_is_noop() {
    let (env, client, super_admin, _) = setup();
    let nobody = Address::generate(&env);
    client.revoke_role(&super_admin, &nobody);
    assert_eq!(client.role_of(&nobody), None);
}

// ─── 4. transfer_super_admin ─────────────────────────────

#[test]
fn test_transfer_super_admin() {
    let (env, client, old_super, _) = setup();
    let new_super = Address::generate(&env);
    client.transfer_super_admin(&old_super, &new_super);
    assert!(client.has_role(&new_super, &Role::SuperAdmin));
    assert!(!client.has_role(&old_super, &Role::SuperAdmin));
    assert_error(client.try_pause(&old_super), Error::NotAuthorized);
}

// ─── 5. Protocol gates ───────────────────────────────────

#[test]
fn test_only_admins_pause_and_tune() {
    let (env, client, super_admin, _) = setup();
    let admin = Address::generate(&env);
    let moderator = Address::generate(&env);
    client.grant_role(&super_admin, &admin, &Role::Admin);
    client.grant_role(&super_admin, &moderator, &Role::Moderator);

    assert_error(client.try_pause(&moderator), Error::NotAuthorized);
    assert_error(client.try_set_post_cooldown(&moderator, &5), Error::NotAuthorized);

    client.set_post_cooldown(&admin, &5);
    assert_eq!(client.post_cooldown(), 5);
    client.pause(&admin);
    assert!(client.is_paused());
}

#[test]
fn test_revoked_moderator_loses_ban_power() {
    let (env, client, super_admin, _) = setup();
    let tribe_admin = Address::generate(&env);
    let moderator = Address::generate(&env);
    let member = Address::generate(&env);
    let tribe_id = create_tribe(&env, &client, &tribe_admin, JoinType::Public, 0);
    client.join_tribe(&member, &tribe_id);

    client.grant_role(&super_admin, &moderator, &Role::Moderator);
    client.revoke_role(&super_admin, &moderator);

    assert_error(
        client.try_ban_member(&moderator, &tribe_id, &member),
        Error::NotTribeAdmin,
    );
    assert_eq!(client.get_member_status(&tribe_id, &member), MemberStatus::Active);
}
