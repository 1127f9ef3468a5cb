//! Route table
//!
//! An explicit enumerated table mapping `(method, path)` to an endpoint.
//! Matching is exact-string, partitioned by method; HEAD is served by the
//! GET partition with body suppression handled at the response layer.
//! Duplicate entries are rejected when the table is built, so a bad table
//! fails at startup rather than at request time.

use hyper::Method;
use thiserror::Error;

/// Every endpoint the service exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Index,
    Stylesheet,
    GetCountry,
    GetCountries,
    GetAllCountries,
    GetRegion,
    GetFavorites,
    AddCountry,
    AddReview,
    AddFavorite,
}

/// One dispatch table entry
#[derive(Debug, Clone)]
pub struct Route {
    pub method: Method,
    pub path: &'static str,
    pub endpoint: Endpoint,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("duplicate route entry: {method} {path}")]
pub struct DuplicateRoute {
    pub method: Method,
    pub path: String,
}

#[derive(Debug)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// Build a table, rejecting duplicate `(method, path)` pairs.
    pub fn new(routes: Vec<Route>) -> Result<Self, DuplicateRoute> {
        for (i, route) in routes.iter().enumerate() {
            let clash = routes[..i]
                .iter()
                .any(|r| r.method == route.method && r.path == route.path);
            if clash {
                return Err(DuplicateRoute {
                    method: route.method.clone(),
                    path: route.path.to_string(),
                });
            }
        }
        Ok(Self { routes })
    }

    /// The service's dispatch table.
    pub fn builtin() -> Result<Self, DuplicateRoute> {
        Self::new(vec![
            route(Method::GET, "/", Endpoint::Index),
            route(Method::GET, "/style.css", Endpoint::Stylesheet),
            route(Method::GET, "/getCountry", Endpoint::GetCountry),
            route(Method::GET, "/getCountries", Endpoint::GetCountries),
            route(Method::GET, "/getAllCountries", Endpoint::GetAllCountries),
            route(Method::GET, "/getRegion", Endpoint::GetRegion),
            route(Method::GET, "/getFavorites", Endpoint::GetFavorites),
            route(Method::POST, "/addCountry", Endpoint::AddCountry),
            route(Method::POST, "/addReview", Endpoint::AddReview),
            route(Method::POST, "/addFavorite", Endpoint::AddFavorite),
        ])
    }

    /// Exact-string lookup; HEAD requests match the GET partition.
    pub fn lookup(&self, method: &Method, path: &str) -> Option<Endpoint> {
        let method = if *method == Method::HEAD {
            &Method::GET
        } else {
            method
        };
        self.routes
            .iter()
            .find(|r| r.method == *method && r.path == path)
            .map(|r| r.endpoint)
    }
}

fn route(method: Method, path: &'static str, endpoint: Endpoint) -> Route {
    Route {
        method,
        path,
        endpoint,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_is_valid() {
        assert!(RouteTable::builtin().is_ok());
    }

    #[test]
    fn test_duplicate_entry_rejected() {
        let err = RouteTable::new(vec![
            route(Method::GET, "/getCountry", Endpoint::GetCountry),
            route(Method::GET, "/getCountry", Endpoint::GetAllCountries),
        ])
        .unwrap_err();
        assert_eq!(err.path, "/getCountry");
    }

    #[test]
    fn test_same_path_different_method_is_allowed() {
        let table = RouteTable::new(vec![
            route(Method::GET, "/addCountry", Endpoint::GetAllCountries),
            route(Method::POST, "/addCountry", Endpoint::AddCountry),
        ]);
        assert!(table.is_ok());
    }

    #[test]
    fn test_lookup_partitions_by_method() {
        let table = RouteTable::builtin().unwrap();
        assert_eq!(
            table.lookup(&Method::GET, "/getCountry"),
            Some(Endpoint::GetCountry)
        );
        assert_eq!(table.lookup(&Method::POST, "/getCountry"), None);
        assert_eq!(
            table.lookup(&Method::POST, "/addReview"),
            Some(Endpoint::AddReview)
        );
        assert_eq!(table.lookup(&Method::GET, "/addReview"), None);
        assert_eq!(table.lookup(&Method::PUT, "/addReview"), None);
    }

    #[test]
    fn test_lookup_is_exact_string() {
        let table = RouteTable::builtin().unwrap();
        assert_eq!(table.lookup(&Method::GET, "/getCountry/"), None);
        assert_eq!(table.lookup(&Method::GET, "/getcountry"), None);
        assert_eq!(table.lookup(&Method::GET, "/nope"), None);
    }

    #[test]
    fn test_head_matches_get_partition() {
        let table = RouteTable::builtin().unwrap();
        assert_eq!(
            table.lookup(&Method::HEAD, "/getAllCountries"),
            Some(Endpoint::GetAllCountries)
        );
        assert_eq!(table.lookup(&Method::HEAD, "/addCountry"), None);
    }
}
