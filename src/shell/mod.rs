pub mod movie_app;

pub use movie_app::MovieApp;
