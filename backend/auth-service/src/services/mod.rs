use crate::db::AuthRepository;

/// Business logic layer for authentication.
pub struct AuthService {
    repository: AuthRepository,
}

impl AuthService {
    pub fn new(repository: AuthRepository) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &AuthRepository {
        &self.repository
    }
}

// TODO: business methods once the repository is implemented:
// - register_user
// - login_user
// - validate_token
// - refresh_token
// - logout_user
