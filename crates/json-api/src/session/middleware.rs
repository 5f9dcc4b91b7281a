//! Cart session middleware.

use std::sync::Arc;

use salvo::{
    http::cookie::{Cookie, SameSite, time::Duration},
    prelude::*,
};
use tracing::error;
use uuid::Uuid;

use storefront_app::domain::reservations::models::{RESERVATION_TTL, SessionKey};

use crate::{extensions::*, state::State};

/// Name of the cookie carrying the cart session key.
pub(crate) const SESSION_COOKIE: &str = "cart_session_key";

/// Resolve the cart session from its cookie, minting a fresh one when absent or unreadable,
/// and re-issue the cookie so it lives as long as a fresh reservation.
#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let secure = match depot.obtain::<Arc<State>>() {
        Ok(state) => state.session.session_cookie_secure,
        Err(_error) => {
            error!("application state missing from depot");

            res.render(StatusError::internal_server_error());

            return;
        }
    };

    let session = resolve_session_key(req.cookie(SESSION_COOKIE).map(Cookie::value));

    depot.insert_session_key(session);

    ctrl.call_next(req, depot, res).await;

    res.add_cookie(session_cookie(session, secure));
}

fn resolve_session_key(value: Option<&str>) -> SessionKey {
    value
        .and_then(|value| value.trim().parse::<Uuid>().ok())
        .filter(|uuid| !uuid.is_nil())
        .map_or_else(
            || SessionKey::from_uuid(Uuid::new_v4()),
            SessionKey::from_uuid,
        )
}

fn session_cookie(session: SessionKey, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, session.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::seconds(RESERVATION_TTL.as_secs()))
        .build()
}

#[cfg(test)]
mod tests {
    use salvo::{
        affix_state::inject,
        http::header::COOKIE,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use crate::test_helpers::strict_state;

    use super::*;

    #[salvo::handler]
    async fn echo_session(depot: &mut Depot, res: &mut Response) {
        let session = depot
            .session_key_or_500()
            .map_or_else(|_| "missing".to_string(), |session| session.to_string());

        res.render(session);
    }

    fn make_service() -> Service {
        Service::new(
            Router::new()
                .hoop(inject(strict_state()))
                .hoop(handler)
                .push(Router::new().get(echo_session)),
        )
    }

    #[tokio::test]
    async fn existing_cookie_is_reused_and_refreshed() -> TestResult {
        let session = SessionKey::new();

        let mut res = TestClient::get("http://example.com")
            .add_header(COOKIE, format!("{SESSION_COOKIE}={session}"), true)
            .send(&make_service())
            .await;

        let cookie = res.cookie(SESSION_COOKIE).cloned();
        let body = res.take_string().await?;

        assert_eq!(body, session.to_string());

        let cookie = cookie.ok_or("expected session cookie")?;

        assert_eq!(cookie.value(), session.to_string());
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.max_age(), Some(Duration::hours(3)));
        assert_eq!(cookie.path(), Some("/"));

        Ok(())
    }

    #[tokio::test]
    async fn missing_cookie_mints_a_new_session() -> TestResult {
        let mut res = TestClient::get("http://example.com")
            .send(&make_service())
            .await;

        let cookie = res.cookie(SESSION_COOKIE).cloned();
        let body = res.take_string().await?;
        let minted: Uuid = body.parse()?;

        assert_eq!(minted.get_version_num(), 4, "expected a v4 session key");
        assert_eq!(
            cookie.map(|cookie| cookie.value().to_string()),
            Some(body)
        );

        Ok(())
    }

    #[test]
    fn unreadable_cookie_values_are_replaced() {
        let nil = Uuid::nil().to_string();

        for value in [Some("not-a-uuid"), Some(""), Some(nil.as_str()), None] {
            let session = resolve_session_key(value);

            assert_eq!(
                session.into_uuid().get_version_num(),
                4,
                "expected fresh key for {value:?}"
            );
        }
    }
}
