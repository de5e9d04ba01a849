//! Sign-in, registration and password flows.

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::instrument;

use hoctap_core::error::{ApiError, ApiResult};
use hoctap_core::forms::{ForgotPasswordForm, LoginForm, RegisterForm, ResetPasswordForm};
use hoctap_core::model::{AuthTokens, FederatedProfile, User};
use hoctap_core::routing::{destination_after_login, Destination};

use crate::http::{Ack, ApiClient, MessageOnly};

/// Token envelope shared by native and federated login.
#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(flatten)]
    tokens: AuthTokens,
    user: User,
}

/// A successful sign-in and where to send the user next.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: User,
    pub destination: Destination,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

impl ApiClient {
    /// Email/password login. Tokens are persisted before returning.
    #[instrument(skip(self, form), fields(email = %form.email))]
    pub async fn login(&self, form: &LoginForm) -> ApiResult<LoginOutcome> {
        form.validate()?;
        let response: LoginResponse = self.post("/auth/login", form).await?;
        self.finish_login(response)
    }

    /// Exchange an identity-provider profile for backend tokens.
    #[instrument(skip(self, profile), fields(email = %profile.email))]
    pub async fn federated_login(&self, profile: &FederatedProfile) -> ApiResult<LoginOutcome> {
        let response: LoginResponse = self.post("/auth/google-login", profile).await?;
        self.finish_login(response)
    }

    fn finish_login(&self, response: LoginResponse) -> ApiResult<LoginOutcome> {
        self.session().store_tokens(&response.tokens)?;
        let destination = destination_after_login(&response.user);
        tracing::info!(role = %response.user.role(), destination = destination.path(), "signed in");
        self.session().set_user(response.user.clone());
        Ok(LoginOutcome {
            user: response.user,
            destination,
        })
    }

    /// Create an account. Returns the server's confirmation message.
    pub async fn register(&self, form: &RegisterForm) -> ApiResult<Option<String>> {
        form.validate()?;
        let response: MessageOnly = self.post("/auth/register", form).await?;
        Ok(response.message)
    }

    pub async fn forgot_password(&self, form: &ForgotPasswordForm) -> ApiResult<Option<String>> {
        form.validate()?;
        let response: MessageOnly = self.post("/auth/forgot-password", form).await?;
        Ok(response.message)
    }

    pub async fn reset_password(&self, form: &ResetPasswordForm) -> ApiResult<Option<String>> {
        form.validate()?;
        let response: MessageOnly = self
            .post(
                &format!("/auth/reset-password/{}", form.token),
                &json!({ "password": form.password }),
            )
            .await?;
        Ok(response.message)
    }

    pub async fn verify_email(&self, token: &str) -> ApiResult<Option<String>> {
        let response: MessageOnly = self.get(&format!("/auth/verify-email/{token}")).await?;
        Ok(response.message)
    }

    pub async fn resend_verification(&self, email: &str) -> ApiResult<Option<String>> {
        let response: MessageOnly = self
            .post("/auth/resend-verification", &json!({ "email": email }))
            .await?;
        Ok(response.message)
    }

    /// Trade the stored refresh token for a new token pair. Never called
    /// implicitly; a 401 elsewhere simply surfaces as session expiry.
    pub async fn refresh_session(&self) -> ApiResult<()> {
        let refresh = self
            .session()
            .refresh_token()
            .ok_or(ApiError::Unauthorized)?;
        let tokens: AuthTokens = self
            .post(
                "/auth/refresh-token",
                &RefreshRequest {
                    refresh_token: &refresh,
                },
            )
            .await?;
        self.session().store_tokens(&tokens)?;
        Ok(())
    }

    /// Tell the backend, then drop local tokens regardless of its answer.
    pub async fn logout(&self) -> ApiResult<()> {
        if self.session().is_authenticated() {
            if let Err(e) = self.post::<_, Ack>("/auth/logout", &json!({})).await {
                tracing::warn!("logout request failed: {e}");
            }
        }
        self.session().clear()?;
        Ok(())
    }
}
