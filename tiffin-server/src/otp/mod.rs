//! SMS OTP gateway
//!
//! Customer phone verification goes through a hosted SMS gateway (2Factor).
//! The [`OtpGateway`] trait is the seam the handlers depend on; the
//! reqwest-backed [`TwoFactorClient`] is the production implementation.

pub mod gateway;

pub use gateway::TwoFactorClient;

use crate::utils::AppError;
use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// OTP gateway errors — all surface to clients as upstream failures (502)
#[derive(Debug, Error)]
pub enum OtpError {
    #[error("OTP gateway not configured")]
    NotConfigured,

    #[error("OTP gateway request failed: {0}")]
    Transport(String),

    /// Gateway reached but it reported a failure; carries its message
    #[error("OTP gateway error: {0}")]
    Gateway(String),
}

impl From<reqwest::Error> for OtpError {
    fn from(e: reqwest::Error) -> Self {
        OtpError::Transport(e.to_string())
    }
}

impl From<OtpError> for AppError {
    fn from(err: OtpError) -> Self {
        AppError::Upstream(err.to_string())
    }
}

/// Result of a successful OTP dispatch
#[derive(Debug, Clone, Serialize)]
pub struct OtpSession {
    pub session_id: String,
}

/// Result of an OTP verification attempt
///
/// A wrong code is a `success = false` result, not an error; only
/// transport/configuration failures reject.
#[derive(Debug, Clone, Serialize)]
pub struct OtpVerification {
    pub success: bool,
    pub details: String,
}

/// SMS OTP gateway seam
#[async_trait]
pub trait OtpGateway: Send + Sync {
    /// Dispatch an OTP to a 10-digit local phone number. The gateway
    /// receives it in full international format (`+<cc><number>`).
    async fn send_otp(&self, phone: &str, template: Option<&str>) -> Result<OtpSession, OtpError>;

    /// Verify an OTP for a 10-digit local phone number. The gateway
    /// receives it country-code-prefixed without the plus.
    async fn verify_otp(&self, phone: &str, otp: &str) -> Result<OtpVerification, OtpError>;
}
