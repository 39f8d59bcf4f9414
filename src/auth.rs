// ABOUTME: Login flow — mobile number entry, demo verification code check, and logout.
// ABOUTME: A verified code builds the demo account and establishes it on the SessionHolder.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::session::{SessionHolder, User};
use crate::store::StoreError;

/// The only code the demo verifier accepts.
pub const DEMO_VERIFICATION_CODE: &str = "123456";
pub const CODE_LENGTH: usize = 6;

static MOBILE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[1-9]\d{1,14}$").expect("valid mobile regex"));

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("please enter a valid mobile number")]
    InvalidMobileNumber,

    #[error("enter the 6-digit verification code")]
    IncompleteCode,

    #[error("invalid verification code, please try again")]
    InvalidCode,

    #[error("enter your mobile number first")]
    MobileNotSubmitted,

    #[error("could not save session: {0}")]
    Storage(#[from] StoreError),
}

/// Trim and validate an E.164-style number (optional `+`, no leading zero, 2-15 digits).
pub fn validate_mobile_number(input: &str) -> Result<String, AuthError> {
    let trimmed = input.trim();
    if MOBILE_PATTERN.is_match(trimmed) {
        Ok(trimmed.to_string())
    } else {
        Err(AuthError::InvalidMobileNumber)
    }
}

/// Check `code` and, if it is the demo code, log in as the demo account.
pub fn verify_code(holder: &SessionHolder, mobile_number: &str, code: &str) -> Result<User, AuthError> {
    let code = code.trim();
    if code.chars().count() != CODE_LENGTH {
        return Err(AuthError::IncompleteCode);
    }
    if code != DEMO_VERIFICATION_CODE {
        tracing::info!("verification code rejected");
        return Err(AuthError::InvalidCode);
    }

    let user = demo_user(mobile_number);
    let token = format!("mock-jwt-token-{}", chrono::Utc::now().timestamp_millis());
    holder.establish(token, user.clone())?;
    tracing::info!(user_id = user.id, "logged in");
    Ok(user)
}

pub fn logout(holder: &SessionHolder) {
    holder.clear();
    tracing::info!("logged out");
}

fn demo_user(mobile_number: &str) -> User {
    User {
        id: 1,
        mobile_number: mobile_number.to_string(),
        first_name: Some("Alex".to_string()),
        last_name: Some("Johnson".to_string()),
        email: Some("alex.johnson@example.com".to_string()),
        is_active: true,
    }
}

/// Which step of the two-step login is showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginStep {
    EnterMobile,
    EnterCode { mobile_number: String },
}

/// Two-step login: submit a number, then the code sent to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginFlow {
    step: LoginStep,
}

impl Default for LoginFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginFlow {
    pub fn new() -> Self {
        Self {
            step: LoginStep::EnterMobile,
        }
    }

    pub fn step(&self) -> &LoginStep {
        &self.step
    }

    /// Validate the number and move to the code step.
    pub fn submit_mobile(&mut self, input: &str) -> Result<(), AuthError> {
        let mobile_number = validate_mobile_number(input)?;
        tracing::info!("verification code requested");
        self.step = LoginStep::EnterCode { mobile_number };
        Ok(())
    }

    /// Verify the code for the submitted number. The flow stays on the code
    /// step after a wrong code so the user can retry.
    pub fn submit_code(&mut self, holder: &SessionHolder, code: &str) -> Result<User, AuthError> {
        let LoginStep::EnterCode { mobile_number } = &self.step else {
            return Err(AuthError::MobileNotSubmitted);
        };
        let user = verify_code(holder, mobile_number, code)?;
        self.step = LoginStep::EnterMobile;
        Ok(user)
    }

    /// Return to the number step, discarding the submitted number.
    pub fn back(&mut self) {
        self.step = LoginStep::EnterMobile;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::sync::Arc;

    fn holder() -> SessionHolder {
        SessionHolder::new(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn mobile_validation_accepts_e164_shapes() {
        assert_eq!(validate_mobile_number(" 9876543210 ").unwrap(), "9876543210");
        assert_eq!(validate_mobile_number("+919876543210").unwrap(), "+919876543210");
    }

    #[test]
    fn mobile_validation_rejects_bad_input() {
        for bad in ["", "0123456789", "98765-43210", "+", "1", "1234567890123456", "abc"] {
            assert!(
                matches!(validate_mobile_number(bad), Err(AuthError::InvalidMobileNumber)),
                "should reject {bad:?}"
            );
        }
    }

    #[test]
    fn demo_code_establishes_session() {
        let holder = holder();
        let user = verify_code(&holder, "9876543210", "123456").unwrap();

        assert_eq!(user.mobile_number, "9876543210");
        assert_eq!(user.display_name(), "Alex Johnson");
        let session = holder.current().unwrap();
        assert!(session.token.starts_with("mock-jwt-token-"));
        assert_eq!(session.user, user);
    }

    #[test]
    fn wrong_code_leaves_holder_logged_out() {
        let holder = holder();
        assert!(matches!(
            verify_code(&holder, "9876543210", "654321"),
            Err(AuthError::InvalidCode)
        ));
        assert!(holder.current().is_none());
    }

    #[test]
    fn code_of_wrong_length_is_incomplete() {
        let holder = holder();
        for code in ["12345", "1234567", "", " 1234 "] {
            let err = verify_code(&holder, "9876543210", code).unwrap_err();
            assert!(matches!(err, AuthError::IncompleteCode), "{code:?} gave {err:?}");
            assert_eq!(err.to_string(), "enter the 6-digit verification code");
        }
        assert!(holder.current().is_none());
    }

    #[test]
    fn flow_walks_mobile_then_code() {
        let holder = holder();
        let mut flow = LoginFlow::new();
        assert_eq!(flow.step(), &LoginStep::EnterMobile);

        assert!(flow.submit_mobile("nope").is_err());
        assert_eq!(flow.step(), &LoginStep::EnterMobile);

        flow.submit_mobile("9876543210").unwrap();
        assert_eq!(
            flow.step(),
            &LoginStep::EnterCode {
                mobile_number: "9876543210".to_string()
            }
        );

        assert!(flow.submit_code(&holder, "000000").is_err());
        assert!(matches!(flow.step(), LoginStep::EnterCode { .. }));

        flow.submit_code(&holder, "123456").unwrap();
        assert!(holder.is_authenticated());
        assert_eq!(flow.step(), &LoginStep::EnterMobile);
    }

    #[test]
    fn code_before_mobile_is_rejected() {
        let mut flow = LoginFlow::new();
        assert!(matches!(
            flow.submit_code(&holder(), "123456"),
            Err(AuthError::MobileNotSubmitted)
        ));
    }

    #[test]
    fn back_returns_to_mobile_step() {
        let mut flow = LoginFlow::new();
        flow.submit_mobile("9876543210").unwrap();
        flow.back();
        assert_eq!(flow.step(), &LoginStep::EnterMobile);
    }

    #[test]
    fn logout_clears_session() {
        let holder = holder();
        verify_code(&holder, "9876543210", DEMO_VERIFICATION_CODE).unwrap();
        logout(&holder);
        assert!(!holder.is_authenticated());
    }
}
