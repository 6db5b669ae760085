//! Route combinators: first-match-wins alternation and prefix grouping.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::request::Method;
use crate::response::Response;
use crate::route::{match_request, Handler, MatchContext, Resolution, Route};

/// Combines routes into a single route where the first satisfied candidate
/// wins, in registration order.
///
/// Registration order is part of the contract: list specific routes before
/// catch-alls. When no candidate matches, resolution falls back to the
/// terminal not-found route instead of failing.
pub fn and(routes: Vec<Route>) -> Route {
    Route::new(move |request, parent| {
        for route in &routes {
            let resolution = route.resolve(request, parent)?;
            if match_request(request, &resolution.context)?.matched {
                return Ok(resolution);
            }
        }
        not_found_route().resolve(request, parent)
    })
}

/// Groups routes under a shared path prefix, accepting every supported
/// method.
///
/// Every child pattern gets the prefix prepended; nested groups compose
/// prefixes by concatenation.
pub fn handle(prefix: &str, routes: Vec<Route>) -> Route {
    handle_methods(prefix, Method::all(), routes)
}

/// Groups routes under a shared path prefix with a restricted method set.
///
/// Child method sets are intersected with `allowed` before matching, so a
/// child route outside the group's methods can never win.
pub fn handle_methods(prefix: &str, allowed: BTreeSet<Method>, routes: Vec<Route>) -> Route {
    let prefix = prefix.to_string();
    let combined = and(routes);

    Route::new(move |request, parent| {
        let scoped = MatchContext {
            methods: parent.methods.intersection(&allowed).copied().collect(),
            path: format!("{}{}", parent.path, prefix),
        };
        combined.resolve(request, &scoped)
    })
}

/// The terminal fallback route: always resolves to a handler producing the
/// canonical not-found response, with the incoming context unchanged.
pub fn not_found_route() -> Route {
    Route::new(|_request, parent| {
        let handler: Handler = Arc::new(|_request| Box::pin(async { Ok(Response::not_found()) }));
        Ok(Resolution {
            handler,
            context: parent.clone(),
        })
    })
}
