use rand::Rng;
use serde::Serialize;

use super::links::{search_links, SearchLinks};
use crate::engine::{apply_filter, FilterSpec, Selection, Session};
use crate::models::{Catalog, MovieRecord};

/// Notice shown when the filters leave nothing to pick from.
pub const EMPTY_NOTICE: &str = "No movies found!";

/// Result of one randomize action.
#[derive(Debug, Clone, Serialize)]
pub struct PickResult {
    /// Number of candidates the pick was drawn from.
    pub found: usize,
    pub selected: Option<MovieRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<SearchLinks>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

/// Filter the catalog and randomize the session's selection.
pub fn pick<R: Rng + ?Sized>(
    session: Session,
    catalog: &Catalog,
    spec: &FilterSpec,
    rng: &mut R,
) -> (Session, PickResult) {
    let candidates = apply_filter(catalog, spec);
    let found = candidates.len();
    let (session, selection) = session.randomize(&candidates, rng);

    let result = match selection {
        Selection::Picked(movie) => PickResult {
            found,
            links: Some(search_links(&movie.title)),
            selected: Some(movie),
            notice: None,
        },
        Selection::Empty => PickResult {
            found,
            selected: None,
            links: None,
            notice: Some(EMPTY_NOTICE.into()),
        },
    };
    (session, result)
}
