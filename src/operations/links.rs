//! Outbound search links for a movie title.

use serde::Serialize;

/// Web, IMDb and trailer search URLs for one title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchLinks {
    pub web: String,
    pub imdb: String,
    pub trailer: String,
}

/// Build the three search URLs with the title form-urlencoded (space -> `+`).
#[must_use]
pub fn search_links(title: &str) -> SearchLinks {
    let query: String = url::form_urlencoded::byte_serialize(title.trim().as_bytes()).collect();

    SearchLinks {
        web: format!("https://www.google.com/search?q={query}+movie"),
        imdb: format!("https://www.imdb.com/find?q={query}"),
        trailer: format!("https://www.youtube.com/results?search_query={query}+trailer"),
    }
}
