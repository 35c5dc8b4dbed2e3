pub mod claims;
pub mod jwt;
pub mod middleware;
pub mod session_token;

pub use claims::{Claims, ContestSessionClaims, QuizSessionClaims};
pub use jwt::JwtService;
pub use middleware::{AuthMiddleware, AuthenticatedUser};
pub use session_token::SessionTokenIssuer;
