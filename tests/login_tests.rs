use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio_test::assert_ok;

use checkout_login_cli::models::credentials::Credentials;
use checkout_login_cli::presenters::{LoginError, LoginPresenter};
use checkout_login_cli::services::{InMemoryUserService, UserService, UserServiceError};
use checkout_login_cli::views::{LoginScreen, LoginView};

#[derive(Default)]
struct CountingView {
    successes: AtomicUsize,
    errors: AtomicUsize,
}

impl LoginView for CountingView {
    fn show_success(&self) {
        self.successes.fetch_add(1, Ordering::SeqCst);
    }

    fn show_error(&self) {
        self.errors.fetch_add(1, Ordering::SeqCst);
    }
}

struct UnreachableService;

#[async_trait]
impl UserService for UnreachableService {
    async fn login(&self, _credentials: &Credentials) -> Result<bool, UserServiceError> {
        Err(UserServiceError::Unavailable {
            reason: "no route to host".to_string(),
        })
    }
}

fn screen_with(service: Arc<dyn UserService>) -> (LoginScreen, Arc<CountingView>) {
    let view = Arc::new(CountingView::default());
    let presenter = LoginPresenter::new(view.clone(), service);
    (LoginScreen::new(presenter), view)
}

fn in_memory_service() -> Arc<dyn UserService> {
    Arc::new(
        InMemoryUserService::new()
            .with_cost(4)
            .with_user("alice", "password123")
            .unwrap(),
    )
}

#[tokio::test]
async fn test_screen_login_success() {
    let (screen, view) = screen_with(in_memory_service());

    let authenticated = assert_ok!(screen.login("alice", "password123").outcome().await);

    assert!(authenticated);
    assert_eq!(view.successes.load(Ordering::SeqCst), 1);
    assert_eq!(view.errors.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_screen_login_rejected() {
    let (screen, view) = screen_with(in_memory_service());

    let authenticated = assert_ok!(screen.login("alice", "letmein").outcome().await);

    assert!(!authenticated);
    assert_eq!(view.successes.load(Ordering::SeqCst), 0);
    assert_eq!(view.errors.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_screen_login_service_unreachable() {
    let (screen, view) = screen_with(Arc::new(UnreachableService));

    let outcome = screen.login("alice", "password123").outcome().await;

    match outcome {
        Err(LoginError::Service(UserServiceError::Unavailable { reason })) => {
            assert_eq!(reason, "no route to host");
        }
        other => panic!("expected service error, got {:?}", other),
    }
    assert_eq!(view.successes.load(Ordering::SeqCst), 0);
    assert_eq!(view.errors.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn test_overlapping_logins_both_complete() {
    let service: Arc<dyn UserService> = Arc::new(
        InMemoryUserService::new()
            .with_cost(4)
            .with_latency(Duration::from_millis(200))
            .with_user("alice", "password123")
            .unwrap(),
    );
    let (screen, view) = screen_with(service);

    let first = screen.login("alice", "password123");
    let second = screen.login("alice", "nope");
    assert!(!first.is_finished());
    assert!(!second.is_finished());

    let (first, second) = tokio::join!(first.outcome(), second.outcome());

    assert!(first.unwrap());
    assert!(!second.unwrap());
    assert_eq!(view.successes.load(Ordering::SeqCst), 1);
    assert_eq!(view.errors.load(Ordering::SeqCst), 1);
}
