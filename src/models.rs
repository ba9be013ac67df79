use jiff::civil::Date;
use serde::Serialize;

use crate::entities::{actor, category, genre, movie, movie_shot, review};

/// Review text is capped to keep comment threads bounded.
pub const MAX_REVIEW_TEXT: usize = 5000;

/// Textual IPv4 address, dotted quad.
pub const MAX_RATING_IP: usize = 15;

#[derive(Clone, Debug)]
pub struct NewCategory {
    pub name: String,
    pub description: String,
    pub url: String,
}

#[derive(Clone, Debug)]
pub struct NewActor {
    pub name: String,
    pub age: i32,
    pub description: String,
    pub image: String,
}

#[derive(Clone, Debug)]
pub struct NewGenre {
    pub name: String,
    pub description: String,
    pub url: String,
}

#[derive(Clone, Debug)]
pub struct NewMovie {
    pub title: String,
    pub tagline: String,
    pub description: String,
    pub poster: String,
    pub year: i32,
    pub country: String,
    /// Falls back to today when `None`.
    pub world_premiere: Option<Date>,
    pub budget: i64,
    pub fees_in_usa: i64,
    pub fees_in_world: i64,
    pub category_id: Option<i32>,
    pub url: String,
    pub draft: bool,
}

impl Default for NewMovie {
    fn default() -> Self {
        Self {
            title: String::new(),
            tagline: String::new(),
            description: String::new(),
            poster: String::new(),
            year: 2019,
            country: String::new(),
            world_premiere: None,
            budget: 0,
            fees_in_usa: 0,
            fees_in_world: 0,
            category_id: None,
            url: String::new(),
            draft: false,
        }
    }
}

#[derive(Clone, Debug)]
pub struct NewMovieShot {
    pub title: String,
    pub description: String,
    pub image: String,
    pub movie_id: i32,
}

#[derive(Clone, Debug)]
pub struct NewRating {
    pub ip: String,
    pub star_id: i32,
    pub movie_id: i32,
}

#[derive(Clone, Debug)]
pub struct NewReview {
    pub email: String,
    pub name: String,
    pub text: String,
    pub parent_id: Option<i32>,
    pub movie_id: i32,
}

/// A movie with everything the detail page renders.
#[derive(Clone, Debug, Serialize)]
pub struct MovieDetail {
    pub movie: movie::Model,
    pub category: Option<category::Model>,
    pub directors: Vec<actor::Model>,
    pub actors: Vec<actor::Model>,
    pub genres: Vec<genre::Model>,
    pub shots: Vec<movie_shot::Model>,
    pub reviews: Vec<ReviewNode>,
}

/// One top-level review with every reply in its thread, however deep,
/// in insertion order. Replies whose parent was deleted surface as
/// top-level nodes.
#[derive(Clone, Debug, Serialize)]
pub struct ReviewNode {
    pub review: review::Model,
    pub replies: Vec<review::Model>,
}

impl MovieDetail {
    pub fn premiere_date(&self) -> Option<Date> {
        self.movie.world_premiere.parse().ok()
    }
}
