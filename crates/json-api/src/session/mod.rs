//! Cart Sessions
//!
//! Every shopper is identified by an opaque key carried in a cookie. The key only scopes
//! reservations; it carries no cart data itself.

pub(crate) mod middleware;

pub(crate) use middleware::SESSION_COOKIE;
