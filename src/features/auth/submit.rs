//! Form submission handlers for the auth views: magic-link login, magic-link
//! signup, and the OAuth redirect trigger.
//!
//! Every handler checks the view's loading flag first, so a view has at most one
//! outstanding identity request. The flag is a best-effort guard, not a lock.
//! Provider errors are shown verbatim; validation errors never reach the
//! identity service.

use crate::{
    app_lib::AppError,
    features::auth::{
        service::IdentityService,
        types::{OAuthProvider, OAuthRequest, OtpRequest},
        validation::{SignupForm, ValidationError, validate_login_email},
        view::{AuthFlow, ViewState},
    },
    routes::paths,
};
use tracing::debug;

/// Delay before a successful signup clears the form.
pub const FORM_RESET_DELAY_MS: u32 = 3_000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The identity service accepted the request.
    Sent,
    /// Another request from this view is still in flight; nothing was sent.
    Busy,
    /// Local validation failed; nothing was sent.
    Invalid(ValidationError),
    /// The identity service rejected the request.
    Failed(AppError),
}

/// Requests a magic login link for `email`.
pub async fn submit_login<V>(service: &dyn IdentityService, view: &V, email: &str) -> SubmitOutcome
where
    V: ViewState + ?Sized,
{
    if view.is_loading() {
        return SubmitOutcome::Busy;
    }

    let email = match validate_login_email(email) {
        Ok(email) => email,
        Err(err) => {
            view.set_error(Some(err.to_string()));
            return SubmitOutcome::Invalid(err);
        }
    };

    view.set_loading(true);
    view.set_error(None);
    view.set_success(None);

    let result = service.sign_in_with_otp(&OtpRequest::login(email)).await;
    let outcome = report(view, AuthFlow::Login, result);
    view.set_loading(false);
    outcome
}

/// Validates the signup form and requests a magic sign-up link carrying the
/// registration profile. The caller clears the form [`FORM_RESET_DELAY_MS`]
/// after a [`SubmitOutcome::Sent`].
pub async fn submit_signup<V>(
    service: &dyn IdentityService,
    view: &V,
    form: &SignupForm,
    origin: &str,
) -> SubmitOutcome
where
    V: ViewState + ?Sized,
{
    if view.is_loading() {
        return SubmitOutcome::Busy;
    }

    view.set_error(None);
    let profile = match form.validate() {
        Ok(profile) => profile,
        Err(err) => {
            view.set_error(Some(err.to_string()));
            return SubmitOutcome::Invalid(err);
        }
    };

    view.set_loading(true);
    view.set_success(None);

    let request = OtpRequest::signup(profile, paths::callback_url(origin));
    let result = service.sign_in_with_otp(&request).await;
    let outcome = report(view, AuthFlow::Signup, result);
    view.set_loading(false);
    outcome
}

/// Starts a redirect-based OAuth flow back to `/auth/callback`.
///
/// On success the browser is leaving the page, so loading stays set.
pub async fn start_oauth<V>(
    service: &dyn IdentityService,
    view: &V,
    flow: AuthFlow,
    provider: OAuthProvider,
    origin: &str,
) -> SubmitOutcome
where
    V: ViewState + ?Sized,
{
    if view.is_loading() {
        return SubmitOutcome::Busy;
    }

    view.set_loading(true);
    view.set_error(None);

    let request = OAuthRequest {
        provider,
        redirect_to: paths::callback_url(origin),
        query_params: flow.oauth_query_params(provider),
    };

    match service.sign_in_with_oauth(&request).await {
        Ok(()) => SubmitOutcome::Sent,
        Err(err) => {
            debug!(provider = %provider, error_code = err.code().unwrap_or("none"), "oauth request rejected");
            view.set_error(Some(err.user_message()));
            view.set_loading(false);
            SubmitOutcome::Failed(err)
        }
    }
}

fn report<V>(view: &V, flow: AuthFlow, result: Result<(), AppError>) -> SubmitOutcome
where
    V: ViewState + ?Sized,
{
    match result {
        Ok(()) => {
            view.set_success(Some(flow.magic_link_sent_message().to_string()));
            SubmitOutcome::Sent
        }
        Err(err) => {
            debug!(flow = ?flow, error_code = err.code().unwrap_or("none"), "magic link request rejected");
            view.set_error(Some(err.user_message()));
            SubmitOutcome::Failed(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::{
        test_support::{FakeIdentityService, RecordingView, journal},
        types::Role,
    };

    const ORIGIN: &str = "https://stay.example.com";

    fn valid_form() -> SignupForm {
        SignupForm {
            email: "guest@example.com".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            phone: "(555) 123-4567".to_string(),
            accept_terms: true,
            ..SignupForm::default()
        }
    }

    fn rate_limited() -> AppError {
        AppError::Provider {
            code: Some("over_email_send_rate_limit".to_string()),
            message: "Email rate limit exceeded".to_string(),
        }
    }

    #[tokio::test]
    async fn login_sends_magic_link_with_loading_around_request() {
        let journal = journal();
        let service = FakeIdentityService::new(&journal);
        let view = RecordingView::new(&journal);

        let outcome = submit_login(&*service, &view, "guest@example.com").await;

        assert_eq!(outcome, SubmitOutcome::Sent);
        assert_eq!(
            *journal.borrow(),
            vec![
                "loading=true".to_string(),
                "otp:guest@example.com".to_string(),
                "loading=false".to_string(),
            ]
        );
        assert_eq!(
            *service.otp_requests.borrow(),
            vec![OtpRequest::login("guest@example.com")]
        );
        assert_eq!(
            view.success().as_deref(),
            Some("Check your email for the magic login link! ✨")
        );
        assert_eq!(view.error(), None);
        assert!(!view.is_loading());
    }

    #[tokio::test]
    async fn login_shows_provider_error_verbatim() {
        let journal = journal();
        let service = FakeIdentityService::new(&journal);
        *service.otp_error.borrow_mut() = Some(rate_limited());
        let view = RecordingView::new(&journal);

        let outcome = submit_login(&*service, &view, "guest@example.com").await;

        assert_eq!(outcome, SubmitOutcome::Failed(rate_limited()));
        assert_eq!(view.error().as_deref(), Some("Email rate limit exceeded"));
        assert_eq!(view.success(), None);
        assert_eq!(*view.loading_history.borrow(), vec![true, false]);
    }

    #[tokio::test]
    async fn login_with_blank_email_sends_nothing() {
        let journal = journal();
        let service = FakeIdentityService::new(&journal);
        let view = RecordingView::new(&journal);

        let outcome = submit_login(&*service, &view, "   ").await;

        assert_eq!(outcome, SubmitOutcome::Invalid(ValidationError::EmailRequired));
        assert!(service.otp_requests.borrow().is_empty());
        assert!(view.loading_history.borrow().is_empty());
    }

    #[tokio::test]
    async fn busy_view_does_not_issue_second_request() {
        let journal = journal();
        let service = FakeIdentityService::new(&journal);
        let view = RecordingView::new(&journal);
        view.set_loading(true);

        assert_eq!(
            submit_login(&*service, &view, "guest@example.com").await,
            SubmitOutcome::Busy
        );
        assert_eq!(
            submit_signup(&*service, &view, &valid_form(), ORIGIN).await,
            SubmitOutcome::Busy
        );
        assert_eq!(
            start_oauth(&*service, &view, AuthFlow::Login, OAuthProvider::Google, ORIGIN)
                .await,
            SubmitOutcome::Busy
        );
        assert!(service.otp_requests.borrow().is_empty());
        assert!(service.oauth_requests.borrow().is_empty());
    }

    #[tokio::test]
    async fn signup_attaches_profile_and_callback_redirect() {
        let journal = journal();
        let service = FakeIdentityService::new(&journal);
        let view = RecordingView::new(&journal);

        let outcome = submit_signup(&*service, &view, &valid_form(), ORIGIN).await;

        assert_eq!(outcome, SubmitOutcome::Sent);
        let requests = service.otp_requests.borrow();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.email, "guest@example.com");
        assert_eq!(
            request.email_redirect_to.as_deref(),
            Some("https://stay.example.com/auth/callback")
        );
        let Some(profile) = &request.data else {
            panic!("signup request must carry a profile");
        };
        assert_eq!(profile.first_name, "Ada");
        assert_eq!(profile.address, None);
        assert_eq!(profile.role, Role::Customer);
        assert_eq!(
            view.success().as_deref(),
            Some("🎉 Magic link sent! Please check your email to complete registration.")
        );
        assert_eq!(*view.loading_history.borrow(), vec![true, false]);
    }

    #[tokio::test]
    async fn signup_with_invalid_email_never_calls_service() {
        let journal = journal();
        let service = FakeIdentityService::new(&journal);
        let view = RecordingView::new(&journal);

        for email in ["guest", "guest@example", "a b@example.com", "@example.com"] {
            let form = SignupForm {
                email: email.to_string(),
                ..valid_form()
            };
            let outcome = submit_signup(&*service, &view, &form, ORIGIN).await;
            assert_eq!(outcome, SubmitOutcome::Invalid(ValidationError::InvalidEmail));
            assert_eq!(view.error().as_deref(), Some("Please enter a valid email address."));
        }
        assert!(journal.borrow().is_empty());
    }

    #[tokio::test]
    async fn signup_without_terms_never_calls_service() {
        let journal = journal();
        let service = FakeIdentityService::new(&journal);
        let view = RecordingView::new(&journal);
        let form = SignupForm {
            accept_terms: false,
            ..valid_form()
        };

        let outcome = submit_signup(&*service, &view, &form, ORIGIN).await;

        assert_eq!(outcome, SubmitOutcome::Invalid(ValidationError::TermsNotAccepted));
        assert!(service.otp_requests.borrow().is_empty());
    }

    #[tokio::test]
    async fn signup_failure_shows_provider_message() {
        let journal = journal();
        let service = FakeIdentityService::new(&journal);
        *service.otp_error.borrow_mut() = Some(AppError::Provider {
            code: None,
            message: String::new(),
        });
        let view = RecordingView::new(&journal);

        let outcome = submit_signup(&*service, &view, &valid_form(), ORIGIN).await;

        assert!(matches!(outcome, SubmitOutcome::Failed(_)));
        assert_eq!(
            view.error().as_deref(),
            Some("An unexpected error occurred. Please try again.")
        );
        assert!(!view.is_loading());
    }

    #[tokio::test]
    async fn oauth_success_keeps_loading_while_browser_leaves() {
        let journal = journal();
        let service = FakeIdentityService::new(&journal);
        let view = RecordingView::new(&journal);

        let outcome = start_oauth(
            &*service,
            &view,
            AuthFlow::Signup,
            OAuthProvider::Google,
            ORIGIN,
        )
        .await;

        assert_eq!(outcome, SubmitOutcome::Sent);
        assert!(view.is_loading());
        let requests = service.oauth_requests.borrow();
        assert_eq!(requests[0].redirect_to, "https://stay.example.com/auth/callback");
        assert_eq!(requests[0].provider, OAuthProvider::Google);
        assert_eq!(requests[0].query_params.len(), 2);
    }

    #[tokio::test]
    async fn oauth_rejection_surfaces_error_and_clears_loading() {
        let journal = journal();
        let service = FakeIdentityService::new(&journal);
        *service.oauth_error.borrow_mut() = Some(AppError::Provider {
            code: Some("validation_failed".to_string()),
            message: "Unsupported provider: provider is not enabled".to_string(),
        });
        let view = RecordingView::new(&journal);

        let outcome =
            start_oauth(&*service, &view, AuthFlow::Login, OAuthProvider::Google, ORIGIN)
                .await;

        assert!(matches!(outcome, SubmitOutcome::Failed(_)));
        assert_eq!(
            view.error().as_deref(),
            Some("Unsupported provider: provider is not enabled")
        );
        assert_eq!(*view.loading_history.borrow(), vec![true, false]);
        assert!(service.oauth_requests.borrow()[0].query_params.is_empty());
    }
}
