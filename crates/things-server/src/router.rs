//! Method and path routing onto the four operations.
//!
//! | Method   | Path             | Operation |
//! |----------|------------------|-----------|
//! | `POST`   | `/things`        | create    |
//! | `GET`    | `/things`        | list      |
//! | `GET`    | `/things/{id}`   | get       |
//! | `PATCH`  | `/things/{id}`   | update    |
//! | `DELETE` | `/things/{id}`   | delete    |
//!
//! `PATCH` and `DELETE` on the collection still reach their handler, which
//! answers `MISSING_ID`.

use http::Method;
use things_service::Operation;

/// Collection path.
pub const THINGS_PATH: &str = "/things";

/// A matched route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Operation to invoke.
    pub operation: Operation,
    /// Identifier segment, when the path has one.
    pub thing_id: Option<String>,
}

impl Route {
    fn new(operation: Operation, thing_id: Option<&str>) -> Self {
        Self {
            operation,
            thing_id: thing_id.map(ToOwned::to_owned),
        }
    }
}

/// Matches a method and path.
///
/// The identifier segment is passed through verbatim; validating it is the
/// handler's job.
///
/// # Example
///
/// ```
/// use http::Method;
/// use things_server::router::route;
/// use things_service::Operation;
///
/// let matched = route(&Method::GET, "/things/abc").unwrap();
/// assert_eq!(matched.operation, Operation::Get);
/// assert_eq!(matched.thing_id.as_deref(), Some("abc"));
///
/// assert!(route(&Method::PUT, "/things").is_none());
/// ```
pub fn route(method: &Method, path: &str) -> Option<Route> {
    let rest = path.strip_prefix(THINGS_PATH)?;

    let thing_id = match rest {
        "" | "/" => None,
        _ => {
            let id = rest.strip_prefix('/')?;
            let id = id.strip_suffix('/').unwrap_or(id);
            if id.is_empty() || id.contains('/') {
                return None;
            }
            Some(id)
        }
    };

    let operation = match *method {
        Method::POST if thing_id.is_none() => Operation::Create,
        Method::GET => Operation::Get,
        Method::PATCH => Operation::Update,
        Method::DELETE => Operation::Delete,
        _ => return None,
    };

    Some(Route::new(operation, thing_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matched(method: Method, path: &str) -> Option<(Operation, Option<String>)> {
        route(&method, path).map(|r| (r.operation, r.thing_id))
    }

    #[test]
    fn test_collection_routes() {
        assert_eq!(matched(Method::POST, "/things"), Some((Operation::Create, None)));
        assert_eq!(matched(Method::GET, "/things"), Some((Operation::Get, None)));
        assert_eq!(matched(Method::GET, "/things/"), Some((Operation::Get, None)));
    }

    #[test]
    fn test_item_routes() {
        let id = Some("550e8400-e29b-41d4-a716-446655440000".to_string());
        let path = "/things/550e8400-e29b-41d4-a716-446655440000";

        assert_eq!(matched(Method::GET, path), Some((Operation::Get, id.clone())));
        assert_eq!(matched(Method::PATCH, path), Some((Operation::Update, id.clone())));
        assert_eq!(matched(Method::DELETE, path), Some((Operation::Delete, id)));
    }

    #[test]
    fn test_trailing_slash_on_item() {
        assert_eq!(
            matched(Method::GET, "/things/abc/"),
            Some((Operation::Get, Some("abc".to_string())))
        );
    }

    #[test]
    fn test_id_less_update_and_delete_reach_handler() {
        assert_eq!(matched(Method::PATCH, "/things"), Some((Operation::Update, None)));
        assert_eq!(matched(Method::DELETE, "/things"), Some((Operation::Delete, None)));
    }

    #[test]
    fn test_unmatched() {
        assert!(route(&Method::POST, "/things/abc").is_none());
        assert!(route(&Method::PUT, "/things/abc").is_none());
        assert!(route(&Method::GET, "/thingsx").is_none());
        assert!(route(&Method::GET, "/things/a/b").is_none());
        assert!(route(&Method::GET, "/").is_none());
        assert!(route(&Method::GET, "/other").is_none());
    }
}
