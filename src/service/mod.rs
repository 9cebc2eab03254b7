pub mod movie_service;

pub use movie_service::{parse_rating, parse_year, Listing, MovieService, RatingStats, SortOrder};
