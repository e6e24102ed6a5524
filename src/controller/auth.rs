//! Routing, sign in / sign up / logout and session change handling

use anyhow::Result;

use crate::model::{router, Credentials, Route};

use super::AppController;

const INVALID_CREDENTIALS: &str = "Invalid username or password";
const SIGN_UP_FAILED: &str = "Error creating account!";
const SIGN_UP_SUCCEEDED: &str = "Signup successful! Logging you in...";

impl AppController {
    /// Go to `route` through the session guard. Returns where we ended up.
    pub async fn navigate(&self, route: Route) -> Route {
        let target = router::resolve(route, self.session.is_authenticated());
        if target != route {
            tracing::debug!(requested = route.path(), target = target.path(), "Route redirected");
        }

        let previous = self.model.set_route(target).await;
        if previous == target {
            return target;
        }
        tracing::info!(from = previous.path(), to = target.path(), "Navigated");

        if target == Route::Dashboard {
            self.model.reset_content().await;
            self.load_contents().await;
        } else if previous == Route::Dashboard {
            self.model.reset_content().await;
        }
        target
    }

    pub async fn sign_in(&self) {
        let Some(credentials) = self.model.begin_auth_submit().await else {
            return;
        };

        match self.authenticate(&credentials).await {
            Ok(()) => {
                self.model.finish_auth_submit(None).await;
                self.navigate(Route::Dashboard).await;
            }
            Err(e) => {
                tracing::error!(username = %credentials.username, error = %e, "Sign in failed");
                self.model.finish_auth_submit(Some(INVALID_CREDENTIALS.to_string())).await;
            }
        }
    }

    /// Create the account, then sign in with the same credentials
    pub async fn sign_up(&self) {
        let Some(credentials) = self.model.begin_auth_submit().await else {
            return;
        };

        let result = async {
            self.api.sign_up(&credentials).await?;
            self.model.set_info(SIGN_UP_SUCCEEDED).await;
            self.authenticate(&credentials).await?;
            Ok::<_, anyhow::Error>(())
        }
        .await;

        match result {
            Ok(()) => {
                self.model.finish_auth_submit(None).await;
                self.navigate(Route::Dashboard).await;
            }
            Err(e) => {
                tracing::error!(username = %credentials.username, error = %e, "Sign up failed");
                self.model.finish_auth_submit(Some(SIGN_UP_FAILED.to_string())).await;
            }
        }
    }

    pub async fn logout(&self) {
        if let Err(e) = self.session.sign_out().await {
            tracing::error!(error = %e, "Failed to clear stored token");
        }
        self.navigate(Route::Landing).await;
    }

    /// Re-run the guard on the current screen after the session flag flipped
    pub async fn on_session_changed(&self) {
        let current = self.model.route().await;
        tracing::debug!(
            authenticated = self.session.is_authenticated(),
            route = current.path(),
            "Session changed"
        );
        self.navigate(current).await;
    }

    async fn authenticate(&self, credentials: &Credentials) -> Result<()> {
        let token = self.api.sign_in(credentials).await?;
        self.session.sign_in(&token).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use reqwest::StatusCode;

    use super::*;
    use crate::controller::testing::{harness, item};
    use crate::error::ApiError;
    use crate::model::{ContentType, MockBrainApi, NoticeLevel};

    fn unauthorized(operation: &'static str) -> ApiError {
        ApiError::Status {
            operation,
            status: StatusCode::UNAUTHORIZED,
        }
    }

    async fn type_credentials(model: &crate::model::AppModel, username: &str, password: &str) {
        for c in username.chars() {
            model.auth_push(c).await;
        }
        model.auth_toggle_field().await;
        for c in password.chars() {
            model.auth_push(c).await;
        }
    }

    #[tokio::test]
    async fn guest_is_kept_off_the_dashboard() {
        let mut api = MockBrainApi::new();
        api.expect_list_content().times(0);
        let h = harness(api, None);

        assert_eq!(h.controller.navigate(Route::Dashboard).await, Route::Landing);
        assert_eq!(h.model.route().await, Route::Landing);
    }

    #[tokio::test]
    async fn signed_in_user_skips_auth_pages_and_loads_content() {
        let mut api = MockBrainApi::new();
        api.expect_list_content()
            .times(1)
            .returning(|_| Ok(vec![item(1, ContentType::Video)]));
        let h = harness(api, Some("tok"));

        assert_eq!(h.controller.navigate(Route::SignIn).await, Route::Dashboard);
        // Already there: no second fetch
        h.controller.navigate(Route::Dashboard).await;

        assert_eq!(h.model.get_content_state().await.items.len(), 1);
    }

    #[tokio::test]
    async fn valid_sign_in_stores_token_and_opens_dashboard() {
        let mut api = MockBrainApi::new();
        api.expect_sign_in()
            .withf(|c| c.username == "ada" && c.password == "secret")
            .times(1)
            .returning(|_| Ok("tok-1".to_string()));
        api.expect_list_content()
            .withf(|token| token == "tok-1")
            .times(1)
            .returning(|_| Ok(vec![item(1, ContentType::Article)]));
        let h = harness(api, None);
        let mut flag = h.session.subscribe();
        h.controller.navigate(Route::SignIn).await;
        type_credentials(&h.model, "ada", "secret").await;

        h.controller.sign_in().await;

        assert_eq!(h.session.token().await.as_deref(), Some("tok-1"));
        assert!(flag.has_changed().unwrap());
        assert!(*flag.borrow_and_update());
        assert_eq!(h.model.route().await, Route::Dashboard);
        assert_eq!(h.model.get_content_state().await.items.len(), 1);
    }

    #[tokio::test]
    async fn rejected_sign_in_shows_inline_error() {
        let mut api = MockBrainApi::new();
        api.expect_sign_in().returning(|_| Err(unauthorized("sign_in")));
        let h = harness(api, None);
        h.controller.navigate(Route::SignIn).await;
        type_credentials(&h.model, "ada", "wrong").await;

        h.controller.sign_in().await;

        let form = h.model.get_auth_form().await;
        assert_eq!(form.error.as_deref(), Some(INVALID_CREDENTIALS));
        assert!(!form.submitting);
        assert_eq!(h.model.route().await, Route::SignIn);
        assert!(!h.session.is_authenticated());
    }

    #[tokio::test]
    async fn sign_up_then_signs_in() {
        let mut api = MockBrainApi::new();
        let mut seq = mockall::Sequence::new();
        api.expect_sign_up()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        api.expect_sign_in()
            .withf(|c| c.username == "new")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok("fresh".to_string()));
        api.expect_list_content().returning(|_| Ok(vec![]));
        let h = harness(api, None);
        h.controller.navigate(Route::SignUp).await;
        type_credentials(&h.model, "new", "pw").await;

        h.controller.sign_up().await;

        assert_eq!(h.session.token().await.as_deref(), Some("fresh"));
        assert_eq!(h.model.route().await, Route::Dashboard);
        let notice = h.model.get_ui_state().await.notice.unwrap();
        assert_eq!(notice.level, NoticeLevel::Info);
    }

    #[tokio::test]
    async fn failed_sign_up_reports_account_error() {
        let mut api = MockBrainApi::new();
        api.expect_sign_up().returning(|_| {
            Err(ApiError::Status {
                operation: "sign_up",
                status: StatusCode::CONFLICT,
            })
        });
        api.expect_sign_in().times(0);
        let h = harness(api, None);
        h.controller.navigate(Route::SignUp).await;
        type_credentials(&h.model, "taken", "pw").await;

        h.controller.sign_up().await;

        assert_eq!(h.model.get_auth_form().await.error.as_deref(), Some(SIGN_UP_FAILED));
        assert_eq!(h.model.route().await, Route::SignUp);
    }

    #[tokio::test]
    async fn logout_clears_token_and_content() {
        let mut api = MockBrainApi::new();
        api.expect_list_content()
            .returning(|_| Ok(vec![item(1, ContentType::Audio)]));
        let h = harness(api, Some("tok"));
        h.controller.navigate(Route::Dashboard).await;

        h.controller.logout().await;

        assert_eq!(h.session.token().await, None);
        assert!(!h.session.is_authenticated());
        assert_eq!(h.model.route().await, Route::Landing);
        assert!(h.model.get_content_state().await.items.is_empty());
    }

    #[tokio::test]
    async fn session_loss_elsewhere_leaves_dashboard() {
        let mut api = MockBrainApi::new();
        api.expect_list_content().returning(|_| Ok(vec![]));
        let h = harness(api, Some("tok"));
        h.controller.navigate(Route::Dashboard).await;

        h.session.sign_out().await.unwrap();
        h.controller.on_session_changed().await;

        assert_eq!(h.model.route().await, Route::Landing);
    }
}
