use crate::{
    auth::{Claims, SessionTokenIssuer},
    config::Config,
    models::domain::{Contest, Quiz},
};

#[cfg(test)]
pub mod fixtures {
    use super::*;
    use chrono::{Duration, Utc};

    /// A private contest with a fixed id, starting now and running three hours
    pub fn private_contest(id: &str) -> Contest {
        let start = Utc::now();
        let mut contest = Contest::new("Invitational", true, "qs-3", start, start + Duration::hours(3));
        contest.id = id.to_string();
        contest
    }

    /// A quiz with a fixed id and invitation code
    pub fn quiz(id: &str, invitation_code: &str) -> Quiz {
        let start = Utc::now();
        let mut quiz = Quiz::new("Friday Trivia", invitation_code, "qs-5", start, start + Duration::hours(1));
        quiz.id = id.to_string();
        quiz
    }

    /// Caller identity as the auth middleware would expose it
    pub fn claims(user_id: &str, email: &str) -> Claims {
        Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            name: None,
            iat: 0,
            exp: 9999999999,
        }
    }
}

#[cfg(test)]
pub mod test_helpers {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use secrecy::{ExposeSecret, SecretString};
    use std::sync::Arc;

    /// Signs `claims` the way the upstream identity provider does
    pub fn bearer_token(secret: &SecretString, claims: &Claims) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.expose_secret().as_bytes()),
        )
        .expect("test token should encode")
    }

    /// Session token issuer keyed with the test secrets
    pub fn session_issuer() -> Arc<SessionTokenIssuer> {
        let config = Config::test_config();
        Arc::new(SessionTokenIssuer::new(
            &config.contest_token_secret,
            &config.quiz_token_secret,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_private_contest() {
        let contest = private_contest("c-1");
        assert_eq!(contest.id, "c-1");
        assert!(contest.is_private);
    }

    #[test]
    fn test_fixtures_quiz() {
        let quiz = quiz("q-1", "CODE");
        assert_eq!(quiz.id, "q-1");
        assert!(quiz.accepts_invitation("CODE"));
    }
}
