//! Hash based navigation.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use common::model::entity::EntityId;

static ENTITY_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/entity/(\d+)(/edit)?/?$").expect("static regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    NewEntity,
    EntityDetail(EntityId),
    EditEntity(EntityId),
    Tags,
}

impl Route {
    /// Parses `#/...`; anything unknown is `Home`.
    pub fn from_hash(hash: &str) -> Route {
        let path = hash.trim_start_matches('#');
        match path {
            "" | "/" => Route::Home,
            "/new" | "/new/" => Route::NewEntity,
            "/tags" | "/tags/" => Route::Tags,
            _ => ENTITY_PATH
                .captures(path)
                .and_then(|caps| {
                    let id = caps.get(1)?.as_str().parse().ok()?;
                    Some(if caps.get(2).is_some() {
                        Route::EditEntity(id)
                    } else {
                        Route::EntityDetail(id)
                    })
                })
                .unwrap_or(Route::Home),
        }
    }

    pub fn to_hash(&self) -> String {
        match self {
            Route::Home => "#/".to_string(),
            Route::NewEntity => "#/new".to_string(),
            Route::EntityDetail(id) => format!("#/entity/{}", id),
            Route::EditEntity(id) => format!("#/entity/{}/edit", id),
            Route::Tags => "#/tags".to_string(),
        }
    }

    /// Route of the current location.
    pub fn current() -> Route {
        web_sys::window()
            .and_then(|window| window.location().hash().ok())
            .map(|hash| Route::from_hash(&hash))
            .unwrap_or(Route::Home)
    }

    /// Writes the route to the location hash. A no-op when already there.
    pub fn push(&self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let location = window.location();
        let target = self.to_hash();
        if location.hash().ok().as_deref() != Some(target.as_str()) {
            if let Err(err) = location.set_hash(&target) {
                log::warn!("could not set location hash to {}: {:?}", target, err);
            }
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hash())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_route() {
        assert_eq!(Route::from_hash(""), Route::Home);
        assert_eq!(Route::from_hash("#/"), Route::Home);
        assert_eq!(Route::from_hash("#/new"), Route::NewEntity);
        assert_eq!(Route::from_hash("#/tags"), Route::Tags);
        assert_eq!(Route::from_hash("#/entity/42"), Route::EntityDetail(EntityId(42)));
        assert_eq!(Route::from_hash("#/entity/42/edit"), Route::EditEntity(EntityId(42)));
    }

    #[test]
    fn unknown_paths_go_home() {
        assert_eq!(Route::from_hash("#/entity/abc"), Route::Home);
        assert_eq!(Route::from_hash("#/settings"), Route::Home);
    }

    #[test]
    fn hashes_parse_back() {
        for route in [
            Route::Home,
            Route::NewEntity,
            Route::EntityDetail(EntityId(3)),
            Route::EditEntity(EntityId(3)),
            Route::Tags,
        ] {
            assert_eq!(Route::from_hash(&route.to_hash()), route);
        }
    }
}
