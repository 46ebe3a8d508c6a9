//! Access-control gate tests: registration, login, session resolution and
//! owner-managed cashier accounts.

mod common;

use common::*;
use pos_backend::auth::{accounts, guard};
use pos_backend::errors::AppError;
use pos_backend::models::user::{CreateUserPayload, Role};

fn payload(email: &str, name: Option<&str>) -> CreateUserPayload {
    CreateUserPayload {
        email: email.to_string(),
        password: "correct-horse-1".to_string(),
        name: name.map(String::from),
    }
}

#[tokio::test]
async fn register_login_and_resolve_a_session() {
    let state = test_state().await;

    let owner = accounts::register_owner(&state.db, payload("owner@shop.example", None))
        .await
        .expect("registration succeeds");
    assert_eq!(owner.role, Role::Owner);
    // Display name defaults to the email local part
    assert_eq!(owner.name.as_deref(), Some("owner"));

    let login = accounts::login(&state, "owner@shop.example", "correct-horse-1")
        .await
        .expect("login succeeds");
    assert_eq!(login.user.role, Role::Owner);
    assert_eq!(login.user.name, "owner");

    let actor = guard::authenticate(&state, &login.session_token).expect("token resolves");
    assert_eq!(actor.id, owner.id);
    assert_eq!(actor.role, Role::Owner);

    accounts::logout(&state, &login.session_token).expect("logout succeeds");
    assert!(matches!(
        guard::authenticate(&state, &login.session_token),
        Err(AppError::Unauthenticated(_))
    ));
}

#[tokio::test]
async fn bad_credentials_are_unauthenticated() {
    let state = test_state().await;
    accounts::register_owner(&state.db, payload("owner@shop.example", Some("Alex")))
        .await
        .expect("registration succeeds");

    assert!(matches!(
        accounts::login(&state, "owner@shop.example", "wrong-password").await,
        Err(AppError::Unauthenticated(_))
    ));
    assert!(matches!(
        accounts::login(&state, "nobody@shop.example", "correct-horse-1").await,
        Err(AppError::Unauthenticated(_))
    ));
    assert!(matches!(
        guard::authenticate(&state, "not-a-token"),
        Err(AppError::Unauthenticated(_))
    ));
}

#[tokio::test]
async fn only_the_first_owner_can_register() {
    let state = test_state().await;
    accounts::register_owner(&state.db, payload("owner@shop.example", None))
        .await
        .expect("first registration succeeds");

    let err = accounts::register_owner(&state.db, payload("second@shop.example", None))
        .await
        .expect_err("second owner refused");
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn registration_validates_email_and_password() {
    let state = test_state().await;

    let err = accounts::register_owner(&state.db, payload("not-an-email", None))
        .await
        .expect_err("bad email refused");
    assert!(matches!(err, AppError::InvalidInput(_)));

    let mut short = payload("owner@shop.example", None);
    short.password = "short".into();
    let err = accounts::register_owner(&state.db, short)
        .await
        .expect_err("weak password refused");
    assert!(matches!(err, AppError::InvalidInput(_)));
}

#[tokio::test]
async fn owners_manage_cashiers_and_cashiers_cannot() {
    let state = test_state().await;
    let owner_user = accounts::register_owner(&state.db, payload("owner@shop.example", None))
        .await
        .expect("registration succeeds");
    let owner = pos_backend::models::user::Actor {
        id: owner_user.id,
        role: owner_user.role,
    };

    let casey = accounts::create_cashier(&state.db, &owner, payload("casey@shop.example", Some("Casey")))
        .await
        .expect("cashier created");
    assert_eq!(casey.role, Role::Cashier);
    assert_eq!(casey.name.as_deref(), Some("Casey"));

    let err = accounts::create_cashier(&state.db, &owner, payload("casey@shop.example", None))
        .await
        .expect_err("duplicate email refused");
    assert!(matches!(err, AppError::InvalidInput(_)));

    accounts::create_cashier(&state.db, &owner, payload("jordan@shop.example", None))
        .await
        .expect("second cashier created");

    let cashiers = accounts::list_cashiers(&state.db, &owner).await.expect("list");
    assert_eq!(cashiers.len(), 2);
    assert!(cashiers.iter().all(|u| u.role == Role::Cashier));

    let casey_actor = pos_backend::models::user::Actor {
        id: casey.id,
        role: casey.role,
    };
    assert!(matches!(
        accounts::create_cashier(&state.db, &casey_actor, payload("m@shop.example", None)).await,
        Err(AppError::Unauthorized(_))
    ));
    assert!(matches!(
        accounts::list_cashiers(&state.db, &casey_actor).await,
        Err(AppError::Unauthorized(_))
    ));
}

#[tokio::test]
async fn cashier_sessions_carry_the_cashier_role() {
    let state = test_state().await;
    let owner_user = accounts::register_owner(&state.db, payload("owner@shop.example", None))
        .await
        .expect("registration succeeds");
    let owner = pos_backend::models::user::Actor {
        id: owner_user.id,
        role: owner_user.role,
    };
    accounts::create_cashier(&state.db, &owner, payload("casey@shop.example", None))
        .await
        .expect("cashier created");

    let login = accounts::login(&state, "casey@shop.example", "correct-horse-1")
        .await
        .expect("cashier login");
    let actor = guard::authenticate(&state, &login.session_token).expect("token resolves");
    assert_eq!(actor.role, Role::Cashier);
    assert!(matches!(
        guard::require_owner(&actor),
        Err(AppError::Unauthorized(_))
    ));
}
