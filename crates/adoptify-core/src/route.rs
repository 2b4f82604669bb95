// ── Router ──
//
// Maps URL paths to pages. Anything unrecognized resolves to
// `Route::NotFound`, which the view layer renders as the error page.

use std::fmt;

use serde::Serialize;

use crate::model::EntityId;

/// A page of the application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "page", content = "param", rename_all = "kebab-case")]
pub enum Route {
    Home,
    Pets,
    PetDetail(EntityId),
    Signup,
    Login,
    /// Carries the unmatched path.
    NotFound(String),
}

impl Route {
    /// Route patterns in match order, for help text.
    pub const PATTERNS: &'static [&'static str] = &["/", "/pets", "/pets/:id", "/signup", "/login"];

    /// Resolve a path. Query strings and fragments are ignored, as are
    /// trailing slashes; an empty `:id` segment does not match.
    pub fn resolve(path: &str) -> Self {
        let trimmed = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim_end_matches('/');

        let segments: Vec<&str> = trimmed.split('/').skip(1).collect();
        match (trimmed.starts_with('/') || trimmed.is_empty(), segments.as_slice()) {
            (true, []) => Self::Home,
            (true, ["pets"]) => Self::Pets,
            (true, ["pets", id]) if !id.is_empty() => Self::PetDetail(EntityId::from(*id)),
            (true, ["signup"]) => Self::Signup,
            (true, ["login"]) => Self::Login,
            _ => Self::NotFound(path.to_owned()),
        }
    }

    /// The canonical path for this route.
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".into(),
            Self::Pets => "/pets".into(),
            Self::PetDetail(id) => format!("/pets/{id}"),
            Self::Signup => "/signup".into(),
            Self::Login => "/login".into(),
            Self::NotFound(path) => path.clone(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_pages() {
        assert_eq!(Route::resolve("/"), Route::Home);
        assert_eq!(Route::resolve(""), Route::Home);
        assert_eq!(Route::resolve("/pets"), Route::Pets);
        assert_eq!(Route::resolve("/pets/abc"), Route::PetDetail(EntityId::from("abc")));
        assert_eq!(Route::resolve("/signup"), Route::Signup);
        assert_eq!(Route::resolve("/login"), Route::Login);
    }

    #[test]
    fn ignores_trailing_slash_and_query() {
        assert_eq!(Route::resolve("/pets/"), Route::Pets);
        assert_eq!(Route::resolve("/pets/abc/?tab=info"), Route::PetDetail(EntityId::from("abc")));
        assert_eq!(Route::resolve("/login#form"), Route::Login);
    }

    #[test]
    fn unknown_paths_fall_back_to_error_page() {
        for path in ["/shops", "/pets/abc/edit", "pets", "/PETS"] {
            let route = Route::resolve(path);
            assert!(route.is_not_found(), "{path} resolved to {route:?}");
        }
        assert_eq!(Route::resolve("/nope").path(), "/nope");
    }

    #[test]
    fn empty_id_is_not_a_detail_page() {
        assert!(Route::resolve("/pets//x").is_not_found());
    }

    #[test]
    fn paths_round_trip_through_resolve() {
        for route in [Route::Home, Route::Pets, Route::PetDetail(EntityId::from("p1")), Route::Signup, Route::Login] {
            assert_eq!(Route::resolve(&route.path()), route);
        }
    }
}
