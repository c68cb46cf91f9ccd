//! User management service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::user::{CreateUser, UserInfo},
    repository::Repository,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
}

impl UsersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<UserInfo>> {
        let users = self.repository.users.list().await?;
        Ok(users.into_iter().map(UserInfo::from).collect())
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<UserInfo> {
        self.repository.users.get_by_id(id).await.map(UserInfo::from)
    }

    /// Create a new user with an Argon2-hashed password
    pub async fn create(&self, data: &CreateUser) -> AppResult<UserInfo> {
        data.validate()?;
        let password_hash = hash_password(&data.password)?;
        let user = self
            .repository
            .users
            .create(data.name.trim(), data.email.trim(), &password_hash, data.role)
            .await?;
        tracing::info!(user_id = user.id, role = %user.role, "User created");
        Ok(user.into())
    }
}

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::password_hash::{PasswordHash, PasswordVerifier};

    #[test]
    fn test_hash_password() {
        let hash = hash_password("grease-gun").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert_ne!(hash, hash_password("grease-gun").unwrap());

        let parsed = PasswordHash::new(&hash).unwrap();
        assert!(Argon2::default().verify_password(b"grease-gun", &parsed).is_ok());
        assert!(Argon2::default().verify_password(b"wrong", &parsed).is_err());
    }
}
