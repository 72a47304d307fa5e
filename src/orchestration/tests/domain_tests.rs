//! Domain tests for run identity, status, and cron validation.

use rstest::rstest;

use crate::orchestration::domain::{
    CronSpec, OrchestrationDomainError, RunId, RunStatus, WorkerName,
};

#[test]
fn ad_hoc_run_ids_are_unique_per_call() {
    let name = WorkerName::new("ReportWorker");
    let first = RunId::ad_hoc(&name);
    let second = RunId::ad_hoc(&name);

    assert_ne!(first, second);
    assert!(first.as_str().starts_with("ReportWorker-"));
}

#[test]
fn cron_run_id_is_fixed_per_class() {
    let name = WorkerName::new("ReportWorker");
    assert_eq!(RunId::cron(&name), RunId::cron(&name));
    assert_eq!(RunId::cron(&name).as_str(), "ReportWorker-cron");
}

#[rstest]
#[case(RunStatus::Running, false)]
#[case(RunStatus::Completed, true)]
#[case(RunStatus::Failed, true)]
#[case(RunStatus::Canceled, true)]
#[case(RunStatus::Terminated, true)]
#[case(RunStatus::TimedOut, true)]
fn only_running_is_non_terminal(#[case] status: RunStatus, #[case] terminal: bool) {
    assert_eq!(status.is_terminal(), terminal);
}

#[test]
fn run_status_round_trips_through_wire_form() {
    for status in [
        RunStatus::Running,
        RunStatus::Completed,
        RunStatus::Failed,
        RunStatus::Canceled,
        RunStatus::Terminated,
        RunStatus::TimedOut,
    ] {
        assert_eq!(RunStatus::try_from(status.as_str()), Ok(status));
    }
    assert!(RunStatus::try_from("SOMETHING_ELSE").is_err());
}

#[rstest]
#[case("*/5 * * * *")]
#[case("0 0 12 * * *")]
#[case("0 9 * * Mon-Fri")]
fn valid_cron_expressions_are_accepted(#[case] expression: &str) {
    let spec = CronSpec::new(expression).expect("valid cron");
    assert_eq!(spec.as_str(), expression);
}

#[rstest]
#[case("not a cron")]
#[case("99 99 99 99 99")]
#[case("")]
fn invalid_cron_expressions_are_rejected(#[case] expression: &str) {
    assert!(matches!(
        CronSpec::new(expression),
        Err(OrchestrationDomainError::InvalidCronExpression { .. })
    ));
}
