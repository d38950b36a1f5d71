//! Middleware composition.

/// Middleware every generated project starts with, in order.
pub const DEFAULT_MIDDLEWARE: [&str; 7] = [
    "django.middleware.security.SecurityMiddleware",
    "django.contrib.sessions.middleware.SessionMiddleware",
    "django.middleware.common.CommonMiddleware",
    "django.middleware.csrf.CsrfViewMiddleware",
    "django.contrib.auth.middleware.AuthenticationMiddleware",
    "django.contrib.messages.middleware.MessageMiddleware",
    "django.middleware.clickjacking.XFrameOptionsMiddleware",
];

/// Appended when the htmx integration is enabled.
pub const HTMX_MIDDLEWARE: &str = "django_htmx.middleware.HtmxMiddleware";

/// Build a freshly allocated middleware list.
///
/// The defaults are copied on every call; callers own the result outright.
pub fn compose(htmx: bool) -> Vec<String> {
    let mut middleware: Vec<String> = DEFAULT_MIDDLEWARE.iter().map(|m| m.to_string()).collect();
    if htmx {
        middleware.push(HTMX_MIDDLEWARE.to_string());
    }
    middleware
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_without_htmx() {
        let middleware = compose(false);
        assert_eq!(middleware, DEFAULT_MIDDLEWARE);
    }

    #[test]
    fn test_htmx_appended_last() {
        let middleware = compose(true);
        assert_eq!(middleware.len(), DEFAULT_MIDDLEWARE.len() + 1);
        assert_eq!(middleware.last().map(String::as_str), Some(HTMX_MIDDLEWARE));
        assert_eq!(middleware[0], "django.middleware.security.SecurityMiddleware");
    }

    #[test]
    fn test_lists_are_independent() {
        let mut first = compose(true);
        let second = compose(true);
        first.push("custom.Middleware".to_string());
        first.remove(0);
        assert_eq!(second.len(), DEFAULT_MIDDLEWARE.len() + 1);
        assert_eq!(second[0], DEFAULT_MIDDLEWARE[0]);
    }
}
