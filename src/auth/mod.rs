//! Authentication and authorization module

pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{Claims, TokenCodec};
pub use middleware::{
    bearer_token, extract_identity, extract_token, jwt_auth_middleware, AuthContext,
};
pub use password::CredentialHasher;
