//! Route table and the authentication guard in front of it

use super::types::Route;

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::SignIn => "/signin",
            Route::SignUp => "/signup",
            Route::Dashboard => "/dashboard",
        }
    }

    /// Unknown paths redirect to the root.
    pub fn from_path(path: &str) -> Route {
        let trimmed = path.trim();
        let normalized = if trimmed.len() > 1 {
            trimmed.trim_end_matches('/')
        } else {
            trimmed
        };
        match normalized {
            "/signin" => Route::SignIn,
            "/signup" => Route::SignUp,
            "/dashboard" => Route::Dashboard,
            _ => Route::Landing,
        }
    }

    pub fn requires_session(self) -> bool {
        matches!(self, Route::Dashboard)
    }

    /// Landing and auth pages make no sense for a signed-in user
    pub fn guest_only(self) -> bool {
        matches!(self, Route::Landing | Route::SignIn | Route::SignUp)
    }
}

/// Where a request for `requested` actually lands given the session state.
pub fn resolve(requested: Route, authenticated: bool) -> Route {
    if requested.requires_session() && !authenticated {
        Route::Landing
    } else if requested.guest_only() && authenticated {
        Route::Dashboard
    } else {
        requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_paths_map_to_routes() {
        for route in [Route::Landing, Route::SignIn, Route::SignUp, Route::Dashboard] {
            assert_eq!(Route::from_path(route.path()), route);
        }
        assert_eq!(Route::from_path("/dashboard/"), Route::Dashboard);
    }

    #[test]
    fn unmatched_path_goes_to_root() {
        assert_eq!(Route::from_path("/landing"), Route::Landing);
        assert_eq!(Route::from_path("/sigin"), Route::Landing);
        assert_eq!(Route::from_path(""), Route::Landing);
    }

    #[test]
    fn guest_cannot_reach_dashboard() {
        assert_eq!(resolve(Route::Dashboard, false), Route::Landing);
        assert_eq!(resolve(Route::SignIn, false), Route::SignIn);
        assert_eq!(resolve(Route::SignUp, false), Route::SignUp);
        assert_eq!(resolve(Route::Landing, false), Route::Landing);
    }

    #[test]
    fn signed_in_user_is_sent_to_dashboard() {
        assert_eq!(resolve(Route::SignIn, true), Route::Dashboard);
        assert_eq!(resolve(Route::SignUp, true), Route::Dashboard);
        assert_eq!(resolve(Route::Landing, true), Route::Dashboard);
        assert_eq!(resolve(Route::Dashboard, true), Route::Dashboard);
    }
}
