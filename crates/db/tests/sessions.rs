//! Integration tests for refresh-token sessions: one-time rotation, expiry,
//! logout and removal with the owning account.

use chrono::{Duration, Utc};
use pawhaven_db::models::session::CreateSession;
use pawhaven_db::models::user::{CreateUser, User};
use pawhaven_db::repositories::{SessionRepo, UserRepo};
use sqlx::PgPool;

async fn new_user(pool: &PgPool, username: &str) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password_hash: "not-a-real-hash".to_string(),
            is_staff: false,
        },
    )
    .await
    .expect("user creation should succeed")
}

async fn open_session(pool: &PgPool, user: &User, hash: &str, days: i64) {
    SessionRepo::create(
        pool,
        &CreateSession {
            user_id: user.id,
            refresh_token_hash: hash.to_string(),
            expires_at: Utc::now() + Duration::days(days),
        },
    )
    .await
    .expect("session creation should succeed");
}

async fn live_sessions(pool: &PgPool, user_id: i64) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT COUNT(*) FROM user_sessions
         WHERE user_id = $1 AND is_revoked = false AND expires_at > NOW()",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await
}

#[sqlx::test(migrations = "./migrations")]
async fn rotation_consumes_the_presented_token(pool: PgPool) {
    let alice = new_user(&pool, "alice").await;
    open_session(&pool, &alice, "first", 1).await;
    let expires_at = Utc::now() + Duration::days(1);

    let next = SessionRepo::rotate(&pool, "first", "second", expires_at)
        .await
        .unwrap()
        .expect("a live token rotates");
    assert_eq!(next.user_id, alice.id);
    assert_eq!(next.refresh_token_hash, "second");
    assert!(!next.is_revoked);

    let replay = SessionRepo::rotate(&pool, "first", "third", expires_at)
        .await
        .unwrap();
    assert!(replay.is_none(), "a consumed token must not rotate again");
    assert_eq!(live_sessions(&pool, alice.id).await.unwrap(), 1);

    assert!(SessionRepo::rotate(&pool, "second", "third", expires_at)
        .await
        .unwrap()
        .is_some());
}

#[sqlx::test(migrations = "./migrations")]
async fn expired_and_unknown_tokens_do_not_rotate(pool: PgPool) {
    let alice = new_user(&pool, "alice").await;
    open_session(&pool, &alice, "stale", -1).await;
    let expires_at = Utc::now() + Duration::days(1);

    assert!(SessionRepo::rotate(&pool, "stale", "fresh", expires_at)
        .await
        .unwrap()
        .is_none());
    assert!(SessionRepo::rotate(&pool, "never-issued", "fresh", expires_at)
        .await
        .unwrap()
        .is_none());
    assert_eq!(live_sessions(&pool, alice.id).await.unwrap(), 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn logout_revokes_only_that_users_sessions(pool: PgPool) {
    let alice = new_user(&pool, "alice").await;
    let bob = new_user(&pool, "bob").await;
    open_session(&pool, &alice, "a1", 1).await;
    open_session(&pool, &alice, "a2", 1).await;
    open_session(&pool, &bob, "b1", 1).await;

    assert_eq!(SessionRepo::revoke_all_for_user(&pool, alice.id).await.unwrap(), 2);
    assert_eq!(live_sessions(&pool, alice.id).await.unwrap(), 0);
    assert_eq!(live_sessions(&pool, bob.id).await.unwrap(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn deleting_a_user_removes_their_sessions(pool: PgPool) {
    let alice = new_user(&pool, "alice").await;
    open_session(&pool, &alice, "a1", 1).await;

    assert!(UserRepo::delete(&pool, alice.id).await.unwrap());

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM user_sessions")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);
    assert!(SessionRepo::rotate(&pool, "a1", "a2", Utc::now() + Duration::days(1))
        .await
        .unwrap()
        .is_none());
}
