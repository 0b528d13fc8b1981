//! Embedded demo catalog used when no external dataset is configured or
//! the external load fails.

use crate::models::{Catalog, MovieRecord};

/// One static row of the embedded catalog.
#[derive(Debug, Clone, Copy)]
pub struct SampleMovie {
    pub title: &'static str,
    pub year: i32,
    pub genres: &'static str,
    pub avg_rating: f64,
    pub overview: &'static str,
}

pub const SAMPLE_MOVIES: &[SampleMovie] = &[
    SampleMovie {
        title: "The Dark Knight",
        year: 2008,
        genres: "Action|Crime|Drama",
        avg_rating: 9.0,
        overview: "When the menace known as the Joker wreaks havoc and chaos on the people of Gotham, Batman must accept one of the greatest psychological and physical tests of his ability to fight injustice.",
    },
    SampleMovie {
        title: "Inception",
        year: 2010,
        genres: "Action|Adventure|Sci-Fi",
        avg_rating: 8.8,
        overview: "A thief who steals corporate secrets through the use of dream-sharing technology is given the inverse task of planting an idea into the mind of a C.E.O.",
    },
    SampleMovie {
        title: "Interstellar",
        year: 2014,
        genres: "Adventure|Drama|Sci-Fi",
        avg_rating: 8.6,
        overview: "A team of explorers travel through a wormhole in space in an attempt to ensure humanity's survival.",
    },
    SampleMovie {
        title: "Parasite",
        year: 2019,
        genres: "Drama|Thriller",
        avg_rating: 8.6,
        overview: "Greed and class discrimination threaten the newly formed symbiotic relationship between the wealthy Park family and the destitute Kim clan.",
    },
    SampleMovie {
        title: "Spirited Away",
        year: 2001,
        genres: "Animation|Adventure|Family",
        avg_rating: 8.6,
        overview: "During her family's move to the suburbs, a sullen 10-year-old girl wanders into a world ruled by gods, witches, and spirits.",
    },
    SampleMovie {
        title: "Pulp Fiction",
        year: 1994,
        genres: "Crime|Drama",
        avg_rating: 8.9,
        overview: "The lives of two mob hitmen, a boxer, a gangster and his wife, and a pair of diner bandits intertwine in four tales of violence and redemption.",
    },
    SampleMovie {
        title: "The Matrix",
        year: 1999,
        genres: "Action|Sci-Fi",
        avg_rating: 8.7,
        overview: "When a beautiful stranger leads computer hacker Neo to a forbidding underworld, he discovers the shocking truth--the life he knows is the elaborate deception of an evil cyber-intelligence.",
    },
    SampleMovie {
        title: "Forrest Gump",
        year: 1994,
        genres: "Drama|Romance",
        avg_rating: 8.8,
        overview: "The presidencies of Kennedy and Johnson, the events of Vietnam, Watergate and other historical events unfold through the perspective of an Alabama man with an IQ of 75.",
    },
    SampleMovie {
        title: "Everything Everywhere All At Once",
        year: 2022,
        genres: "Action|Adventure|Comedy",
        avg_rating: 8.0,
        overview: "A middle-aged Chinese immigrant is swept up into an insane adventure in which she alone can save the existence by exploring other universes.",
    },
    SampleMovie {
        title: "Dune",
        year: 2021,
        genres: "Action|Adventure|Sci-Fi",
        avg_rating: 8.0,
        overview: "A noble family becomes embroiled in a war for control over the galaxy's most valuable asset while its heir becomes troubled by visions of a dark future.",
    },
    SampleMovie {
        title: "The Godfather",
        year: 1972,
        genres: "Crime|Drama",
        avg_rating: 9.2,
        overview: "The aging patriarch of an organized crime dynasty transfers control of his clandestine empire to his reluctant son.",
    },
    SampleMovie {
        title: "Schindler's List",
        year: 1993,
        genres: "Biography|Drama|History",
        avg_rating: 8.9,
        overview: "In German-occupied Poland during World War II, industrialist Oskar Schindler gradually becomes concerned for his Jewish workforce after witnessing their persecution by the Nazis.",
    },
    SampleMovie {
        title: "Whiplash",
        year: 2014,
        genres: "Drama|Music",
        avg_rating: 8.5,
        overview: "A promising young drummer enrolls at a cut-throat music conservatory where his dreams of greatness are mentored by an instructor who will stop at nothing to realize a student's potential.",
    },
];

impl SampleMovie {
    #[must_use]
    pub fn to_record(&self) -> MovieRecord {
        MovieRecord::new(
            self.title,
            self.year,
            self.genres,
            self.avg_rating,
            Some(self.overview),
        )
    }
}

/// Normalize the embedded rows into a catalog.
#[must_use]
pub fn sample_catalog() -> Catalog {
    Catalog::new(SAMPLE_MOVIES.iter().map(SampleMovie::to_record).collect())
}
