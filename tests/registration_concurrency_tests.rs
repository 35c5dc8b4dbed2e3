mod common;

use arena_server::{
    auth::Claims,
    models::{
        domain::{RegistrationOutcome, RegistrationTarget},
        dto::request::RegisterQuizRequest,
    },
    repositories::RegistrationRepository,
};
use common::{contest, quiz, Harness};

fn caller(user_id: &str) -> Claims {
    Claims {
        sub: user_id.to_string(),
        email: format!("{}@example.com", user_id),
        name: None,
        iat: 0,
        exp: 9999999999,
    }
}

fn request() -> RegisterQuizRequest {
    RegisterQuizRequest {
        quiz_id: Some("quiz-1".to_string()),
        invitation_code: Some("LETMEIN".to_string()),
    }
}

#[tokio::test]
async fn concurrent_quiz_registrations_create_one_record() {
    let harness = Harness::new();
    harness.quizzes.insert(quiz("quiz-1", "LETMEIN")).await;
    let service = harness.state.quiz_service.clone();
    let ada = caller("ada");

    let request = request();
    let calls = (0..8).map(|_| service.register_for_quiz(&request, Some(&ada)));
    let results = futures::future::join_all(calls).await;

    let created = results
        .iter()
        .filter(|r| matches!(r, Ok(reg) if reg.outcome == RegistrationOutcome::Created))
        .count();
    assert_eq!(created, 1);
    assert!(results.iter().all(|r| r.is_ok()));
    assert_eq!(harness.registrations.count().await, 1);
}

#[tokio::test]
async fn registrations_are_scoped_per_user_and_target() {
    let harness = Harness::new();
    harness.quizzes.insert(quiz("quiz-1", "LETMEIN")).await;
    harness.contests.insert(contest("quiz-1", true)).await;

    let quiz_service = harness.state.quiz_service.clone();
    let contest_service = harness.state.contest_service.clone();

    let (req_ada, req_bob) = (request(), request());
    let (caller_ada, caller_bob) = (caller("ada"), caller("bob"));
    let (ada, bob) = tokio::join!(
        quiz_service.register_for_quiz(&req_ada, Some(&caller_ada)),
        quiz_service.register_for_quiz(&req_bob, Some(&caller_bob)),
    );
    assert_eq!(ada.unwrap().outcome, RegistrationOutcome::Created);
    assert_eq!(bob.unwrap().outcome, RegistrationOutcome::Created);

    // Same id, different target kind: a quiz registration does not admit to a contest.
    let join = contest_service.join_contest("quiz-1", "ada").await;
    assert!(join.is_err());

    harness.enrol("ada", RegistrationTarget::Contest, "quiz-1").await;
    assert!(contest_service.join_contest("quiz-1", "ada").await.is_ok());

    assert_eq!(harness.registrations.count().await, 3);
    let stored = harness
        .registrations
        .find("ada", RegistrationTarget::Contest, "quiz-1")
        .await
        .unwrap()
        .expect("contest registration stored");
    assert_eq!(stored.user_id, "ada");
}
