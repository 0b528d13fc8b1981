use rand::Rng;

use super::select::select_random;
use crate::models::MovieRecord;

/// Outcome of one randomize action.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    Picked(MovieRecord),
    /// The filtered set was empty; nothing is selected.
    Empty,
}

impl Selection {
    #[must_use]
    pub fn movie(&self) -> Option<&MovieRecord> {
        match self {
            Self::Picked(movie) => Some(movie),
            Self::Empty => None,
        }
    }
}

/// Per-user state: the currently selected movie, if any.
///
/// A session is moved into `randomize` and handed back with the new
/// selection, so there is exactly one writer at a time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    selected: Option<MovieRecord>,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn selected(&self) -> Option<&MovieRecord> {
        self.selected.as_ref()
    }

    /// Replace the selection with a fresh uniform pick from `candidates`.
    ///
    /// An empty candidate set clears any previous selection.
    #[must_use]
    pub fn randomize<R: Rng + ?Sized>(
        self,
        candidates: &[MovieRecord],
        rng: &mut R,
    ) -> (Self, Selection) {
        match select_random(candidates, rng) {
            Some(movie) => {
                tracing::debug!(title = %movie.title, "selected movie");
                let session = Self {
                    selected: Some(movie.clone()),
                };
                (session, Selection::Picked(movie.clone()))
            }
            None => {
                tracing::debug!("no candidates, selection cleared");
                (Self { selected: None }, Selection::Empty)
            }
        }
    }
}
