extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events},
    vec, Address, IntoVal, TryIntoVal,
};

use crate::events::{
    CollectibleClaimed, InviteCodeUsed, MembershipUpdated, PointsChanged, PointsReason,
    PostCreated, TribeCreated,
};
use crate::test_utils::*;
use crate::{JoinType, MemberStatus};

#[test]
fn test_tribe_created_event() {
    let (env, client, _, _) = setup();
    let admin = Address::generate(&env);
    let tribe_id = create_tribe(&env, &client, &admin, JoinType::Private, 5);

    // Creation publishes tribe_new, then the creator's membership.
    let all_events = env.events().all();
    let created = all_events.get(all_events.len() - 2).unwrap();

    assert_eq!(created.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("tribe_new").into_val(&env),
        tribe_id.into_val(&env),
    ];
    assert_eq!(created.1, expected_topics);

    let data: TribeCreated = created.2.try_into_val(&env).unwrap();
    assert_eq!(
        data,
        TribeCreated {
            tribe_id,
            admin: admin.clone(),
            join_type: JoinType::Private,
        }
    );
}

#[test]
fn test_membership_updated_event() {
    let (env, client, _, _) = setup();
    let admin = Address::generate(&env);
    let user = Address::generate(&env);
    let tribe_id = create_tribe(&env, &client, &admin, JoinType::Private, 0);

    client.request_to_join_tribe(&user, &tribe_id, &0);

    let last_event = env.events().all().last().expect("No events found");
    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("member").into_val(&env),
        tribe_id.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let data: MembershipUpdated = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        data,
        MembershipUpdated {
            tribe_id,
            member: user.clone(),
            status: MemberStatus::Pending,
        }
    );

    client.approve_member(&admin, &tribe_id, &user);
    let last_event = env.events().all().last().expect("No events found");
    let data: MembershipUpdated = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(data.status, MemberStatus::Active);
}

#[test]
fn test_invite_used_event() {
    let (env, client, _, _) = setup();
    let admin = Address::generate(&env);
    let user = Address::generate(&env);
    let tribe_id = create_tribe(&env, &client, &admin, JoinType::InviteCode, 0);
    let hash = client.create_invite_code(&admin, &tribe_id, &code(&env, "HELLO"), &3, &0);

    client.join_tribe_with_code(&user, &tribe_id, &hash);

    let last_event = env.events().all().last().expect("No events found");
    let expected_topics = vec![
        &env,
        symbol_short!("inv_use").into_val(&env),
        tribe_id.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let data: InviteCodeUsed = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        data,
        InviteCodeUsed {
            tribe_id,
            code_hash: hash,
            member: user,
            used_count: 1,
        }
    );
}

#[test]
fn test_points_events() {
    let (env, client, _, _) = setup();
    let admin = Address::generate(&env);
    let member = Address::generate(&env);
    let tribe_id = create_tribe(&env, &client, &admin, JoinType::Public, 0);
    client.join_tribe(&member, &tribe_id);
    let bonus = action(&env, "BONUS");

    client.award_points(&admin, &tribe_id, &member, &40, &bonus);
    let last_event = env.events().all().last().expect("No events found");
    let expected_topics = vec![
        &env,
        symbol_short!("pts_add").into_val(&env),
        tribe_id.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);
    let data: PointsChanged = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(data.reason, PointsReason::Action(bonus));
    assert_eq!(data.balance, 40);

    client.deduct_points(&admin, &tribe_id, &member, &15, &symbol_short!("abuse"));
    let last_event = env.events().all().last().expect("No events found");
    let data: PointsChanged = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        data,
        PointsChanged {
            tribe_id,
            member,
            amount: 15,
            reason: PointsReason::Deduction(symbol_short!("abuse")),
            balance: 25,
        }
    );
}

#[test]
fn test_collectible_claimed_event() {
    let (env, client, _, _) = setup();
    let admin = Address::generate(&env);
    let member = Address::generate(&env);
    let tribe_id = create_tribe(&env, &client, &admin, JoinType::Public, 0);
    client.join_tribe(&member, &tribe_id);
    let collectible_id = client.create_collectible(
        &admin,
        &tribe_id,
        &text(&env, "Pin"),
        &text(&env, "ipfs://pin"),
        &3,
        &0,
        &0,
    );

    client.claim_collectible(&member, &collectible_id, &0);

    let last_event = env.events().all().last().expect("No events found");
    let expected_topics = vec![
        &env,
        symbol_short!("col_clm").into_val(&env),
        collectible_id.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);
    let data: CollectibleClaimed = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        data,
        CollectibleClaimed {
            collectible_id,
            owner: member,
            supply: 1,
        }
    );
}

#[test]
fn test_post_created_event() {
    let (env, client, _, _) = setup();
    let admin = Address::generate(&env);
    let tribe_id = create_tribe(&env, &client, &admin, JoinType::Public, 0);

    let post_id = client.create_post(
        &admin,
        &tribe_id,
        &crate::PostContent::Text(text(&env, "gm")),
        &None,
    );

    // The post event precedes the points credit for the POST action.
    let all_events = env.events().all();
    let created = all_events.get(all_events.len() - 2).unwrap();
    let expected_topics = vec![
        &env,
        symbol_short!("post_new").into_val(&env),
        post_id.into_val(&env),
    ];
    assert_eq!(created.1, expected_topics);
    let data: PostCreated = created.2.try_into_val(&env).unwrap();
    assert_eq!(
        data,
        PostCreated {
            post_id,
            tribe_id,
            author: admin,
            parent_id: None,
        }
    );
}
