//! Redirect composition for the tool shim.

use ee_common::ProxySessionHint;

/// Target path for an `/app/<rest>` request.
///
/// `/<tool>/s/<id>/app/<rest>` with a session, `/<tool>/app/<rest>`
/// without; the query string is carried over unchanged.
pub fn redirect_target(
    tool: &str,
    session: Option<&ProxySessionHint>,
    rest: &str,
    query: Option<&str>,
) -> String {
    let mut target = match session {
        Some(session) => format!("/{tool}/s/{session}"),
        None => format!("/{tool}"),
    };

    target.push_str("/app/");
    target.push_str(rest.trim_start_matches('/'));

    if let Some(query) = query.filter(|q| !q.is_empty()) {
        target.push('?');
        target.push_str(query);
    }

    target
}
