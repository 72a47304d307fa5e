//! The frozen error-code/status table clients depend on.

use taskdeck::access_token::AccessTokenError;
use taskdeck::account::domain::PhoneNumber;
use taskdeck::account::services::CreateAccountRequest;
use taskdeck::error::ErrorCode;
use taskdeck::orchestration::domain::{RunId, WorkerName};
use taskdeck::orchestration::services::OrchestrationError;
use taskdeck::task::domain::TaskId;
use taskdeck::task::services::TaskServiceError;

use crate::in_memory::helpers::world;

#[test]
fn access_token_errors_carry_their_codes() {
    let cases = [
        (AccessTokenError::UnauthorizedAccess, "ACCESS_TOKEN_ERR_01"),
        (AccessTokenError::Expired, "ACCESS_TOKEN_ERR_02"),
        (AccessTokenError::HeaderNotFound, "ACCESS_TOKEN_ERR_03"),
        (AccessTokenError::MalformedHeader, "ACCESS_TOKEN_ERR_04"),
        (AccessTokenError::Invalid, "ACCESS_TOKEN_ERR_05"),
    ];
    for (error, code) in cases {
        assert_eq!(error.code(), code);
        assert_eq!(error.http_status(), 401);
    }
}

#[test]
fn orchestration_errors_carry_their_codes() {
    let name = WorkerName::new("W");
    let run_id = RunId::new("W-x");
    let cases: [(OrchestrationError, &str, u16); 7] = [
        (
            OrchestrationError::ClientConnection {
                address: "localhost:7233".to_owned(),
            },
            "WORKER_ERR_01",
            500,
        ),
        (
            OrchestrationError::NotRegistered(name.clone()),
            "WORKER_ERR_02",
            400,
        ),
        (
            OrchestrationError::RunNotFound(run_id.clone()),
            "WORKER_ERR_03",
            404,
        ),
        (
            OrchestrationError::StartFailed(name),
            "WORKER_ERR_04",
            500,
        ),
        (
            OrchestrationError::AlreadyCompleted(run_id.clone()),
            "WORKER_ERR_05",
            400,
        ),
        (
            OrchestrationError::AlreadyCancelled(run_id.clone()),
            "WORKER_ERR_06",
            400,
        ),
        (
            OrchestrationError::AlreadyTerminated(run_id),
            "WORKER_ERR_07",
            400,
        ),
    ];
    for (error, code, status) in cases {
        assert_eq!(error.code(), code);
        assert_eq!(error.http_status(), status);
    }
}

#[test]
fn task_not_found_maps_to_404() {
    let error = TaskServiceError::NotFound(TaskId::new());
    assert_eq!(error.code(), "TASK_ERR_01");
    assert_eq!(error.http_status(), 404);
}

#[tokio::test(flavor = "multi_thread")]
async fn conflict_errors_map_to_409() {
    let world = world();
    world
        .accounts
        .create_with_credentials(CreateAccountRequest::new("A", "L", "alice", "p1"))
        .await
        .expect("first signup");

    let conflict = world
        .accounts
        .create_with_credentials(CreateAccountRequest::new("A", "L", "alice", "p2"))
        .await
        .expect_err("duplicate username conflicts");
    assert_eq!(conflict.code(), "ACCOUNT_ERR_01");
    assert_eq!(conflict.http_status(), 409);

    let phone = PhoneNumber::from_parts("+91", "9999999999").expect("valid phone");
    world
        .accounts
        .get_or_create_by_phone_number(phone)
        .await
        .expect("phone signup");
}
