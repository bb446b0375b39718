//! Password hashing for sample users
//!
//! Each bcrypt hash is CPU-bound and runs on tokio's blocking pool;
//! all users are hashed concurrently.

use acme_types::{HashedUser, SeedUser};
use futures::future::try_join_all;

use crate::SeedError;

/// Hash a single password with a fresh salt
pub async fn hash_password(password: String, cost: u32) -> Result<String, SeedError> {
    let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;
    Ok(hash)
}

/// Hash every user's password; the first failure aborts the batch
pub async fn hash_users(users: &[SeedUser], cost: u32) -> Result<Vec<HashedUser>, SeedError> {
    try_join_all(users.iter().map(|user| async move {
        let password_hash = hash_password(user.password.clone(), cost).await?;
        Ok::<_, SeedError>(HashedUser {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            password_hash,
        })
    }))
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use acme_types::UserId;
    use uuid::Uuid;

    const TEST_COST: u32 = 4;

    #[tokio::test]
    async fn test_hash_is_salted_and_verifies() {
        let first = hash_password("123456".into(), TEST_COST).await.unwrap();
        let second = hash_password("123456".into(), TEST_COST).await.unwrap();

        assert_ne!(first, "123456");
        assert_ne!(first, second);
        assert!(bcrypt::verify("123456", &first).unwrap());
        assert!(!bcrypt::verify("654321", &first).unwrap());
    }

    #[tokio::test]
    async fn test_hash_users_keeps_identity() {
        let users = vec![SeedUser {
            id: UserId(Uuid::nil()),
            name: "User".into(),
            email: "user@nextmail.com".into(),
            password: "123456".into(),
        }];

        let hashed = hash_users(&users, TEST_COST).await.unwrap();

        assert_eq!(hashed.len(), 1);
        assert_eq!(hashed[0].id, users[0].id);
        assert_eq!(hashed[0].email, "user@nextmail.com");
        assert!(bcrypt::verify("123456", &hashed[0].password_hash).unwrap());
    }

    #[tokio::test]
    async fn test_invalid_cost_is_an_error() {
        let err = hash_password("123456".into(), 99).await.unwrap_err();
        assert!(matches!(err, SeedError::PasswordHash(_)));
    }
}
