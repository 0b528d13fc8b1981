use std::fmt::Write as _;

use serde::Serialize;

use crate::operations::PickResult;

/// Format a result as minified JSON.
pub fn format_json<T: Serialize>(result: &T) -> String {
    serde_json::to_string(result).unwrap_or_else(|e| format!("{{\"error\":\"{e}\"}}"))
}

/// Format a result as indented JSON.
pub fn format_json_pretty<T: Serialize>(result: &T) -> String {
    serde_json::to_string_pretty(result).unwrap_or_else(|e| format!("{{\"error\":\"{e}\"}}"))
}

/// Format an error as JSON.
pub fn format_error(err: &dyn std::fmt::Display) -> String {
    serde_json::json!({ "error": err.to_string() }).to_string()
}

/// Render a pick as a readable card.
#[must_use]
pub fn render_card(result: &PickResult) -> String {
    let mut out = String::new();

    let Some(movie) = &result.selected else {
        let notice = result.notice.as_deref().unwrap_or_default();
        let _ = writeln!(out, "{notice}");
        return out;
    };

    let _ = writeln!(out, "{}", movie.title);
    let _ = writeln!(out, "{} • {}", movie.year, movie.genre_label());
    let _ = writeln!(out, "Rating: {:.1}/10", movie.avg_rating);
    let _ = writeln!(out);
    let _ = writeln!(out, "Plot");
    let _ = writeln!(out, "{}", movie.overview);

    if let Some(links) = &result.links {
        let _ = writeln!(out);
        let _ = writeln!(out, "Search:  {}", links.web);
        let _ = writeln!(out, "IMDb:    {}", links.imdb);
        let _ = writeln!(out, "Trailer: {}", links.trailer);
    }
    let _ = writeln!(out, "({} matching movies)", result.found);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CineError;
    use crate::models::MovieRecord;
    use crate::operations::search_links;

    #[derive(Serialize)]
    struct TestData {
        name: String,
        value: i32,
    }

    #[test]
    fn format_json_minified() {
        let data = TestData {
            name: "test".into(),
            value: 42,
        };
        let json = format_json(&data);
        assert!(!json.contains('\n'));
        assert!(json.contains("\"name\":\"test\""));
    }

    #[test]
    fn format_json_pretty_is_indented() {
        let data = TestData {
            name: "test".into(),
            value: 42,
        };
        assert!(format_json_pretty(&data).contains('\n'));
    }

    #[test]
    fn format_error_produces_json() {
        let err = "unknown genre: \"Western\"";
        let json = format_error(&err);
        assert!(json.starts_with("{\"error\":"));
        assert!(json.contains("\\\"Western\\\""));
    }

    #[test]
    fn format_error_escapes_backslash_and_newline() {
        let err = CineError::UnknownGenre {
            genre: "Sci\\Fi\nNoir".into(),
        };
        let json = format_error(&err);
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["error"], "unknown genre: Sci\\Fi\nNoir");
    }

    #[test]
    fn card_shows_movie_details() {
        let movie = MovieRecord::new("The Godfather", 1972, "Crime|Drama", 9.2, None);
        let result = PickResult {
            found: 1,
            links: Some(search_links(&movie.title)),
            selected: Some(movie),
            notice: None,
        };
        let card = render_card(&result);
        assert!(card.starts_with("The Godfather\n"));
        assert!(card.contains("1972 • Crime, Drama"));
        assert!(card.contains("Rating: 9.2/10"));
        assert!(card.contains("https://www.youtube.com/results?search_query=The+Godfather+trailer"));
    }

    #[test]
    fn card_shows_notice_when_empty() {
        let result = PickResult {
            found: 0,
            selected: None,
            links: None,
            notice: Some("No movies found!".into()),
        };
        assert_eq!(render_card(&result), "No movies found!\n");
    }
}
