//! Shared composition harness for in-memory integration tests.
//!
//! Builds the full service graph the way a process bootstrap would:
//! configuration first, then repositories, then services wired through
//! their ports, all against in-memory adapters and recording
//! providers.

use std::sync::Arc;

use mockable::DefaultClock;
use taskdeck::access_token::AccessTokenIssuer;
use taskdeck::account::adapters::memory::InMemoryAccountRepository;
use taskdeck::account::services::AccountService;
use taskdeck::config::{AppSettings, ConfigResolver};
use taskdeck::notification::adapters::memory::{
    InMemoryPreferencesRepository, RecordingEmailProvider, RecordingSmsProvider,
};
use taskdeck::notification::ports::{EmailProvider, SmsProvider};
use taskdeck::notification::services::{NotificationDispatcher, NotificationPreferencesService};
use taskdeck::orchestration::adapters::memory::InMemoryDurableBackend;
use taskdeck::orchestration::registry::WorkerRegistry;
use taskdeck::orchestration::services::WorkerManager;
use taskdeck::orchestration::workers::{AlwaysHealthy, HealthCheckWorker};
use taskdeck::otp::adapters::memory::InMemoryOtpRepository;
use taskdeck::otp::services::OtpService;
use taskdeck::password_reset::adapters::memory::InMemoryResetTokenRepository;
use taskdeck::password_reset::services::PasswordResetService;
use taskdeck::task::adapters::memory::{InMemoryCommentRepository, InMemoryTaskRepository};
use taskdeck::task::services::{CommentService, TaskService};

/// Account service wired against in-memory adapters.
pub type TestAccountService =
    AccountService<InMemoryAccountRepository, InMemoryPreferencesRepository, DefaultClock>;

/// Reset-token service wired against in-memory adapters.
pub type TestResetService = PasswordResetService<
    InMemoryResetTokenRepository,
    InMemoryPreferencesRepository,
    DefaultClock,
>;

/// The fully composed backend under test.
pub struct World {
    /// Account lifecycle service.
    pub accounts: TestAccountService,
    /// OTP issuance/verification service.
    pub otps: OtpService<InMemoryOtpRepository, DefaultClock>,
    /// Access-token issuer.
    pub tokens: AccessTokenIssuer<DefaultClock>,
    /// Reset-token service.
    pub resets: TestResetService,
    /// Task CRUD service.
    pub tasks: TaskService<InMemoryTaskRepository, DefaultClock>,
    /// Comment CRUD service.
    pub comments: CommentService<InMemoryCommentRepository, DefaultClock>,
    /// Worker control surface over the in-memory backend.
    pub workers: WorkerManager<InMemoryDurableBackend<DefaultClock>>,
    /// The backend behind `workers`, for state assertions.
    pub worker_backend: Arc<InMemoryDurableBackend<DefaultClock>>,
    /// Recorded outbound email.
    pub email: Arc<RecordingEmailProvider>,
    /// Recorded outbound SMS.
    pub sms: Arc<RecordingSmsProvider>,
}

/// Composes a fresh backend from built-in configuration defaults.
pub fn world() -> World {
    let resolver = ConfigResolver::builder()
        .layer(AppSettings::default_layer())
        .build();
    let settings = AppSettings::load(&resolver).expect("default settings decode");
    let clock = Arc::new(DefaultClock);

    let email = Arc::new(RecordingEmailProvider::new());
    let sms = Arc::new(RecordingSmsProvider::new());
    let preferences_repository = Arc::new(InMemoryPreferencesRepository::new());
    let dispatcher = NotificationDispatcher::new(
        Arc::clone(&preferences_repository),
        Arc::clone(&email) as Arc<dyn EmailProvider>,
        Arc::clone(&sms) as Arc<dyn SmsProvider>,
    );
    let preferences =
        NotificationPreferencesService::new(Arc::clone(&preferences_repository), Arc::clone(&clock));

    let resets = PasswordResetService::new(
        Arc::new(InMemoryResetTokenRepository::new()),
        dispatcher,
        settings.password_reset.clone(),
        settings.mailer.clone(),
        Arc::clone(&clock),
    );

    let accounts = AccountService::new(
        Arc::new(InMemoryAccountRepository::new()),
        preferences,
        Arc::new(resets.clone()),
        Arc::clone(&clock),
    );

    let otps = OtpService::new(
        Arc::new(InMemoryOtpRepository::new()),
        Arc::clone(&sms) as Arc<dyn SmsProvider>,
        settings.otp.clone(),
        Arc::clone(&clock),
    );

    let tokens = AccessTokenIssuer::new(&settings.accounts, Arc::clone(&clock));

    let registry = Arc::new(
        WorkerRegistry::builder()
            .register(Arc::new(HealthCheckWorker::new(Arc::new(AlwaysHealthy))))
            .build(),
    );
    let worker_backend = Arc::new(
        InMemoryDurableBackend::new(Arc::clone(&clock)).with_registry(Arc::clone(&registry)),
    );
    let workers = WorkerManager::new(Arc::clone(&worker_backend), registry);

    World {
        accounts,
        otps,
        tokens,
        resets,
        tasks: TaskService::new(Arc::new(InMemoryTaskRepository::new()), Arc::clone(&clock)),
        comments: CommentService::new(
            Arc::new(InMemoryCommentRepository::new()),
            Arc::clone(&clock),
        ),
        workers,
        worker_backend,
        email,
        sms,
    }
}
