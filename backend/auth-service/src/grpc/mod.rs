use crate::services::AuthService;

/// gRPC request handler for authentication.
pub struct AuthHandler {
    service: AuthService,
}

impl AuthHandler {
    pub fn new(service: AuthService) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &AuthService {
        &self.service
    }
}

// TODO: implement the generated gRPC service trait once the proto contract
// exists:
// - register
// - login
// - validate_token
// - refresh_token
// - logout
