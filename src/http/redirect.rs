//! Redirect target rewriting.
//!
//! Upstream redirects are never followed; a 3xx response reaches the client
//! with its `Location` rewritten so internal origin hostnames do not leak.
//! Only locations resolving to the target origin itself are rewritten;
//! anything pointing elsewhere, or anything unparseable, passes through
//! untouched.

use url::{Position, Url};

/// Rewrite a `Location` header value from the target origin to the public
/// origin.
///
/// The raw value is resolved relative to the target origin, so `/dashboard`
/// and `https://target/dashboard` behave identically. Returns the rewritten
/// value when the resolved origin equals the target origin, and `None` when
/// the location points elsewhere or cannot be parsed. Both non-rewrites are
/// deliberate: a foreign location already makes sense to the client, and a
/// malformed one is forwarded as-is rather than failing the request.
pub fn rewrite_location(raw: &str, target: &Url, public: &Url) -> Option<String> {
    // WHATWG-style parsing would percent-encode embedded whitespace instead
    // of rejecting it, silently mangling garbage values. Treat such values
    // as unparseable.
    if raw
        .chars()
        .any(|c| c == ' ' || c.is_ascii_control())
    {
        return None;
    }

    let resolved = target.join(raw).ok()?;
    if resolved.origin() != target.origin() {
        return None;
    }

    let mut rewritten = public.origin().ascii_serialization();
    rewritten.push_str(&resolved[Position::BeforePath..]);
    Some(rewritten)
}
