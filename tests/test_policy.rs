use watchlist_be::{
    models::Identity,
    policy::{Decision, Operation, Policy},
};

fn user(user_id: i64, is_admin: bool) -> Identity {
    Identity {
        user_id,
        username: format!("user{user_id}"),
        is_admin,
    }
}

#[test]
fn test_admin_or_read_only() {
    let admin = user(1, true);
    let member = user(2, false);
    let policy = Policy::AdminOrReadOnly;

    assert_eq!(policy.decide(None, None, Operation::Safe), Decision::Allow);
    assert_eq!(
        policy.decide(Some(&member), None, Operation::Safe),
        Decision::Allow
    );
    assert_eq!(
        policy.decide(Some(&admin), None, Operation::Unsafe),
        Decision::Allow
    );

    // Anonymous and non-staff writers get the same answer
    assert_eq!(
        policy.decide(Some(&member), None, Operation::Unsafe),
        Decision::DenyForbidden
    );
    assert_eq!(
        policy.decide(None, None, Operation::Unsafe),
        Decision::DenyForbidden
    );
}

#[test]
fn test_owner_or_read_only() {
    let owner = user(7, false);
    let other = user(8, false);
    let admin = user(9, true);
    let policy = Policy::OwnerOrReadOnly;

    assert_eq!(policy.decide(None, Some(7), Operation::Safe), Decision::Allow);
    assert_eq!(
        policy.decide(Some(&other), Some(7), Operation::Safe),
        Decision::Allow
    );
    assert_eq!(
        policy.decide(Some(&owner), Some(7), Operation::Unsafe),
        Decision::Allow
    );
    assert_eq!(
        policy.decide(Some(&other), Some(7), Operation::Unsafe),
        Decision::DenyForbidden
    );
    // Staff get no special treatment on someone else's review
    assert_eq!(
        policy.decide(Some(&admin), Some(7), Operation::Unsafe),
        Decision::DenyForbidden
    );
    assert_eq!(
        policy.decide(None, Some(7), Operation::Unsafe),
        Decision::DenyUnauthorized
    );
}

#[test]
fn test_owner_policy_without_owner_denies_writes() {
    let member = user(3, false);
    assert_eq!(
        Policy::OwnerOrReadOnly.decide(Some(&member), None, Operation::Unsafe),
        Decision::DenyForbidden
    );
}

#[test]
fn test_authenticated_policy() {
    let member = user(4, false);
    assert_eq!(
        Policy::Authenticated.decide(Some(&member), None, Operation::Unsafe),
        Decision::Allow
    );
    assert_eq!(
        Policy::Authenticated.decide(None, None, Operation::Unsafe),
        Decision::DenyUnauthorized
    );
}

#[test]
fn test_decisions_map_to_status_codes() {
    use axum::http::StatusCode;

    assert!(Decision::Allow.into_result().is_ok());
    assert_eq!(
        Decision::DenyForbidden.into_result().unwrap_err().status(),
        StatusCode::FORBIDDEN
    );
    assert_eq!(
        Decision::DenyUnauthorized.into_result().unwrap_err().status(),
        StatusCode::UNAUTHORIZED
    );
}
