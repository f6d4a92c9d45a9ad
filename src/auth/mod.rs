//! Identity service client.
//!
//! The provider is an opaque collaborator: three request/response calls plus
//! a configured flag. Because the UI runs single-threaded with a continuous
//! frame loop, the actual HTTP round trip happens on a worker thread and
//! completions are polled once per frame.

mod provider;

pub use provider::RestProvider;

use std::sync::mpsc;
use std::thread;

/// Opaque identity service errors surfaced to the user.
///
/// Only two cases are pattern-matched into friendlier messages; everything
/// else passes through verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    #[error("invalid login credentials")]
    InvalidCredentials,
    #[error("email already registered")]
    AlreadyRegistered,
    #[error("identity service is not configured")]
    NotConfigured,
    #[error("{0}")]
    Service(String),
}

/// A request sent to the identity service
#[derive(Debug, Clone)]
pub enum AuthRequest {
    SignIn {
        email: String,
        password: String,
    },
    SignUp {
        email: String,
        password: String,
        full_name: Option<String>,
    },
    ResetPassword {
        email: String,
    },
}

impl AuthRequest {
    pub fn kind(&self) -> AuthKind {
        match self {
            AuthRequest::SignIn { .. } => AuthKind::SignIn,
            AuthRequest::SignUp { .. } => AuthKind::SignUp,
            AuthRequest::ResetPassword { .. } => AuthKind::ResetPassword,
        }
    }

    pub fn email(&self) -> &str {
        match self {
            AuthRequest::SignIn { email, .. }
            | AuthRequest::SignUp { email, .. }
            | AuthRequest::ResetPassword { email } => email,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthKind {
    SignIn,
    SignUp,
    ResetPassword,
}

/// A finished identity service round trip
#[derive(Debug, Clone)]
pub struct AuthCompletion {
    pub kind: AuthKind,
    pub email: String,
    pub result: Result<(), ProviderError>,
}

/// The identity service surface consumed by the app
pub trait IdentityProvider: Send + 'static {
    fn is_configured(&self) -> bool;
    fn sign_in(&self, email: &str, password: &str) -> Result<(), ProviderError>;
    fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: Option<&str>,
    ) -> Result<(), ProviderError>;
    fn reset_password(&self, email: &str) -> Result<(), ProviderError>;
}

/// Bridge between the frame loop and the provider worker thread.
///
/// At most one request is in flight at a time; the submit button stays
/// disabled while loading. The worker exits when the session is dropped and
/// its request channel closes.
pub struct AuthSession {
    requests: mpsc::Sender<AuthRequest>,
    completions: mpsc::Receiver<AuthCompletion>,
    configured: bool,
    in_flight: bool,
}

impl AuthSession {
    pub fn spawn(provider: impl IdentityProvider) -> Self {
        let (request_tx, request_rx) = mpsc::channel::<AuthRequest>();
        let (completion_tx, completion_rx) = mpsc::channel::<AuthCompletion>();
        let configured = provider.is_configured();

        thread::Builder::new()
            .name("auth-worker".into())
            .spawn(move || worker_loop(provider, request_rx, completion_tx))
            .expect("failed to spawn auth worker thread");

        Self {
            requests: request_tx,
            completions: completion_rx,
            configured,
            in_flight: false,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.configured
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    /// Send a request to the worker. Returns false if one is already in
    /// flight (the request is dropped).
    pub fn submit(&mut self, request: AuthRequest) -> bool {
        if self.in_flight {
            return false;
        }
        if self.requests.send(request).is_err() {
            tracing::warn!("auth worker is gone, dropping request");
            return false;
        }
        self.in_flight = true;
        true
    }

    /// Poll for a finished round trip; call once per frame
    pub fn poll(&mut self) -> Option<AuthCompletion> {
        match self.completions.try_recv() {
            Ok(completion) => {
                self.in_flight = false;
                Some(completion)
            }
            Err(_) => None,
        }
    }
}

fn worker_loop(
    provider: impl IdentityProvider,
    requests: mpsc::Receiver<AuthRequest>,
    completions: mpsc::Sender<AuthCompletion>,
) {
    for request in requests {
        let kind = request.kind();
        let email = request.email().to_string();
        let result = match &request {
            AuthRequest::SignIn { email, password } => provider.sign_in(email, password),
            AuthRequest::SignUp {
                email,
                password,
                full_name,
            } => provider.sign_up(email, password, full_name.as_deref()),
            AuthRequest::ResetPassword { email } => provider.reset_password(email),
        };

        match &result {
            Ok(()) => tracing::info!(?kind, "auth request succeeded"),
            Err(err) => tracing::info!(?kind, %err, "auth request failed"),
        }

        if completions
            .send(AuthCompletion {
                kind,
                email,
                result,
            })
            .is_err()
        {
            // Session dropped, nobody is listening anymore
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    /// Canned provider for exercising the session bridge
    struct FixedProvider {
        result: Result<(), ProviderError>,
    }

    impl IdentityProvider for FixedProvider {
        fn is_configured(&self) -> bool {
            true
        }
        fn sign_in(&self, _email: &str, _password: &str) -> Result<(), ProviderError> {
            self.result.clone()
        }
        fn sign_up(
            &self,
            _email: &str,
            _password: &str,
            _full_name: Option<&str>,
        ) -> Result<(), ProviderError> {
            self.result.clone()
        }
        fn reset_password(&self, _email: &str) -> Result<(), ProviderError> {
            self.result.clone()
        }
    }

    fn poll_until_complete(session: &mut AuthSession) -> AuthCompletion {
        for _ in 0..200 {
            if let Some(completion) = session.poll() {
                return completion;
            }
            thread::sleep(Duration::from_millis(5));
        }
        panic!("auth worker never completed");
    }

    #[test]
    fn test_session_round_trip() {
        let mut session = AuthSession::spawn(FixedProvider { result: Ok(()) });
        assert!(session.submit(AuthRequest::SignIn {
            email: "user@example.com".into(),
            password: "secret".into(),
        }));
        assert!(session.is_loading());

        let completion = poll_until_complete(&mut session);
        assert_eq!(completion.kind, AuthKind::SignIn);
        assert_eq!(completion.email, "user@example.com");
        assert!(completion.result.is_ok());
        assert!(!session.is_loading());
    }

    #[test]
    fn test_only_one_request_in_flight() {
        let mut session = AuthSession::spawn(FixedProvider {
            result: Err(ProviderError::InvalidCredentials),
        });
        assert!(session.submit(AuthRequest::ResetPassword {
            email: "a@b.com".into(),
        }));
        // Second submit while loading is refused
        assert!(!session.submit(AuthRequest::ResetPassword {
            email: "c@d.com".into(),
        }));

        let completion = poll_until_complete(&mut session);
        assert_eq!(completion.result, Err(ProviderError::InvalidCredentials));
    }
}
