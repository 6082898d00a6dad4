use shared_models::auth::{LoginResponse, Role};

use crate::challenge::Challenge;
use crate::error::ClientError;

/// Failed logins tolerated before the session refuses further attempts.
pub const MAX_FAILED_LOGINS: u32 = 5;

#[derive(Debug, Clone)]
pub struct Session {
    user: Option<LoginResponse>,
    failed_attempts: u32,
    challenge: Challenge,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            user: None,
            failed_attempts: 0,
            challenge: Challenge::generate(&mut rand::thread_rng()),
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// The challenge to show before the next login attempt.
    pub fn challenge(&self) -> Challenge {
        self.challenge
    }

    /// Checks `answer` against the current challenge.
    ///
    /// A blank or non-numeric answer keeps the challenge. A numeric one,
    /// right or wrong, replaces it. Wrong answers never count as failed logins.
    pub fn solve_challenge(&mut self, answer: &str) -> Result<(), ClientError> {
        let result = self.challenge.check(answer);
        if !matches!(result, Err(ClientError::ChallengeMissing | ClientError::ChallengeInvalid)) {
            self.challenge = Challenge::generate(&mut rand::thread_rng());
        }
        result
    }

    pub fn user(&self) -> Option<&LoginResponse> {
        self.user.as_ref()
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().and_then(LoginResponse::role)
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn failed_attempts(&self) -> u32 {
        self.failed_attempts
    }

    pub fn is_locked(&self) -> bool {
        self.failed_attempts >= MAX_FAILED_LOGINS
    }

    pub(crate) fn record_success(&mut self, user: LoginResponse) {
        self.failed_attempts = 0;
        self.user = Some(user);
    }

    /// Returns true when this failure locks the session.
    pub(crate) fn record_failure(&mut self) -> bool {
        self.failed_attempts += 1;
        self.is_locked()
    }

    pub(crate) fn rename(&mut self, username: &str) {
        if let Some(user) = self.user.as_mut() {
            user.usr_name = username.to_string();
        }
    }

    /// Forgets the user. The failure counter survives so a lockout cannot be reset by logging out.
    pub fn logout(&mut self) {
        self.user = None;
    }
}
