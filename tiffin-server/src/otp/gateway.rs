//! 2Factor SMS gateway client

use super::{OtpError, OtpGateway, OtpSession, OtpVerification};
use async_trait::async_trait;
use serde::Deserialize;

const DEFAULT_BASE_URL: &str = "https://2factor.in/API/V1";

/// Gateway success marker in the response `Status` field
const STATUS_SUCCESS: &str = "Success";

/// Phone as the gateway expects it for SMS dispatch: `+<cc><number>`
pub fn send_phone_format(country_code: &str, phone: &str) -> String {
    format!("+{country_code}{phone}")
}

/// Phone as the gateway expects it for verification: `<cc><number>`,
/// without the plus. The asymmetry is the gateway's contract, not ours.
pub fn verify_phone_format(country_code: &str, phone: &str) -> String {
    format!("{country_code}{phone}")
}

/// reqwest-backed 2Factor client
#[derive(Debug, Clone)]
pub struct TwoFactorClient {
    http: reqwest::Client,
    api_key: Option<String>,
    country_code: String,
    template: Option<String>,
    base_url: String,
}

impl TwoFactorClient {
    pub fn new(
        api_key: Option<String>,
        country_code: impl Into<String>,
        template: Option<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            country_code: country_code.into(),
            template,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    #[cfg(test)]
    fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn api_key(&self) -> Result<&str, OtpError> {
        self.api_key.as_deref().ok_or(OtpError::NotConfigured)
    }
}

/// Response envelope shared by all 2Factor endpoints
#[derive(Debug, Deserialize)]
struct TwoFactorResponse {
    #[serde(rename = "Status")]
    status: String,
    /// Session id on send, human-readable result on verify
    #[serde(rename = "Details")]
    details: String,
}

#[async_trait]
impl OtpGateway for TwoFactorClient {
    async fn send_otp(&self, phone: &str, template: Option<&str>) -> Result<OtpSession, OtpError> {
        let key = self.api_key()?;
        let to = send_phone_format(&self.country_code, phone);
        let template = template.or(self.template.as_deref());

        let url = match template {
            Some(t) => format!("{}/{}/SMS/{}/AUTOGEN/{}", self.base_url, key, to, t),
            None => format!("{}/{}/SMS/{}/AUTOGEN", self.base_url, key, to),
        };

        let resp: TwoFactorResponse = self.http.get(&url).send().await?.json().await?;
        if resp.status != STATUS_SUCCESS {
            tracing::warn!(details = %resp.details, "OTP dispatch rejected by gateway");
            return Err(OtpError::Gateway(resp.details));
        }

        tracing::info!("OTP dispatched");
        Ok(OtpSession {
            session_id: resp.details,
        })
    }

    async fn verify_otp(&self, phone: &str, otp: &str) -> Result<OtpVerification, OtpError> {
        let key = self.api_key()?;
        let to = verify_phone_format(&self.country_code, phone);

        let url = format!("{}/{}/SMS/VERIFY3/{}/{}", self.base_url, key, to, otp);

        let resp: TwoFactorResponse = self.http.get(&url).send().await?.json().await?;
        Ok(OtpVerification {
            success: resp.status == STATUS_SUCCESS,
            details: resp.details,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_formats_differ_between_send_and_verify() {
        assert_eq!(send_phone_format("91", "9876543210"), "+919876543210");
        assert_eq!(verify_phone_format("91", "9876543210"), "919876543210");
    }

    #[tokio::test]
    async fn test_unconfigured_client_rejects_before_any_request() {
        // No API key: must fail locally, never hit the network
        let client = TwoFactorClient::new(None, "91", None)
            .with_base_url("http://127.0.0.1:1/unreachable");

        let err = client.send_otp("9876543210", None).await.unwrap_err();
        assert!(matches!(err, OtpError::NotConfigured));

        let err = client.verify_otp("9876543210", "1234").await.unwrap_err();
        assert!(matches!(err, OtpError::NotConfigured));
    }
}
