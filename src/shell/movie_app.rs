use std::io::{BufRead, ErrorKind, Write};
use std::path::PathBuf;

use crate::{
    clients::MetadataLookup,
    error::{MovieError, Result},
    model::movie::format_rating,
    persisters::MovieStorage,
    report::HtmlReport,
    service::{parse_rating, parse_year, MovieService, SortOrder},
};

const MENU: &str = "\n********** My Movies Database **********\nMenu:\n\
1. List movies\n2. Add movie\n3. Delete movie\n4. Update movie\n\
5. Stats\n6. Random movie\n7. Search movie\n8. Movies sorted by rating\n\
9. Generate website\n10. Exit";

enum Flow {
    Continue,
    Exit,
}

/// Text menu over a movie collection.
///
/// Every command reports its own failures as a message, so the loop only
/// ends on the Exit choice or when input runs out.
pub struct MovieApp<S, R, W> {
    service: MovieService<S>,
    lookup: Option<Box<dyn MetadataLookup>>,
    report_dir: PathBuf,
    input: R,
    output: W,
}

impl<S: MovieStorage, R: BufRead, W: Write> MovieApp<S, R, W> {
    pub fn new(service: MovieService<S>, input: R, output: W) -> Self {
        MovieApp {
            service,
            lookup: None,
            report_dir: PathBuf::from("."),
            input,
            output,
        }
    }

    pub fn with_lookup(mut self, lookup: Box<dyn MetadataLookup>) -> Self {
        self.lookup = Some(lookup);
        self
    }

    pub fn with_report_dir(mut self, report_dir: impl Into<PathBuf>) -> Self {
        self.report_dir = report_dir.into();
        self
    }

    pub async fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.output, "{}", MENU)?;
            let choice = match self.prompt("Enter choice (1-10): ")? {
                Some(choice) => choice,
                None => break,
            };

            if let Flow::Exit = self.handle_command(choice.trim()).await? {
                break;
            }

            if self.prompt("\nPress Enter to continue...")?.is_none() {
                break;
            }
        }
        self.output.flush()?;
        Ok(())
    }

    async fn handle_command(&mut self, choice: &str) -> Result<Flow> {
        let outcome = match choice {
            "1" => self.command_list_movies(),
            "2" => self.command_add_movie().await,
            "3" => self.command_delete_movie(),
            "4" => self.command_update_movie(),
            "5" => self.command_movie_stats(),
            "6" => self.command_random_movie(),
            "7" => self.command_search_movie(),
            "8" => self.command_sort_movies(),
            "9" => self.command_generate_website(),
            "10" => {
                writeln!(self.output, "Exiting the program. Goodbye!")?;
                return Ok(Flow::Exit);
            }
            _ => Ok("Invalid choice. Please select an option from 1 to 10.".to_string()),
        };

        let message = match outcome {
            Ok(message) => message,
            // Terminal failures end the session; everything else is reported.
            Err(MovieError::Terminal(e)) if e.kind() == ErrorKind::UnexpectedEof => {
                return Ok(Flow::Exit)
            }
            Err(MovieError::Terminal(e)) => return Err(MovieError::Terminal(e)),
            Err(e) => {
                log::warn!("Command {} failed: {}", choice, e);
                format!("Error: {}", e)
            }
        };
        writeln!(self.output, "{}", message)?;
        Ok(Flow::Continue)
    }

    /// `None` once input is exhausted.
    fn prompt(&mut self, question: &str) -> Result<Option<String>> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
    }

    fn require_input(&mut self, question: &str) -> Result<String> {
        self.prompt(question)?.ok_or_else(|| {
            MovieError::Terminal(std::io::Error::new(ErrorKind::UnexpectedEof, "input closed"))
        })
    }

    fn command_list_movies(&mut self) -> Result<String> {
        let listing = self.service.list()?;
        let mut lines = vec![format!("{} movies in total", listing.total())];
        lines.extend(listing.indexed().map(|(i, movie)| format!("{}. {}", i, movie)));
        Ok(lines.join("\n"))
    }

    async fn command_add_movie(&mut self) -> Result<String> {
        let title = self.require_input("Enter movie name: ")?;
        let title = title.trim();
        if title.is_empty() {
            return Err(MovieError::InvalidInput(
                "Movie title cannot be empty".to_string(),
            ));
        }

        let movie = match &self.lookup {
            Some(lookup) => {
                let metadata = match lookup.lookup(title).await? {
                    Some(metadata) => metadata,
                    None => return Ok(format!("Movie '{}' not found in OMDb database.", title)),
                };
                self.service.add_from_metadata(metadata)?
            }
            None => {
                let year = parse_year(&self.require_input("Enter release year: ")?)?;
                let rating = parse_rating(&self.require_input("Enter movie rating: ")?)?;
                self.service.add_movie(title, year, Some(rating), None)?
            }
        };

        Ok(format!(
            "'{}' ({}) with rating {} has been added. Poster: {}",
            movie.title,
            movie.year,
            movie.display_rating(),
            movie.poster.as_deref().unwrap_or("none")
        ))
    }

    fn command_delete_movie(&mut self) -> Result<String> {
        let title = self.require_input("Enter movie name to delete: ")?;
        self.service.delete_movie(&title)?;
        Ok(format!("{} has been successfully deleted", title))
    }

    fn command_update_movie(&mut self) -> Result<String> {
        let title = self.require_input("Enter movie name: ")?;
        if !self.service.movies()?.contains(&title) {
            return Err(MovieError::NotFound(title));
        }

        let rating = parse_rating(&self.require_input("Enter new movie rating: ")?)?;
        self.service.update_movie(&title, rating)?;
        Ok(format!("{} has been successfully updated", title))
    }

    fn command_movie_stats(&mut self) -> Result<String> {
        let stats = match self.service.statistics()? {
            Some(stats) => stats,
            None => return Ok("No movies available to calculate statistics.".to_string()),
        };

        Ok(format!(
            "Average rating: {:.2}\nMedian rating: {:.2}\n\
             Best Movie(s): {} (Rating: {})\nWorst Movie(s): {} (Rating: {})",
            stats.average,
            stats.median,
            stats.best.join(", "),
            format_rating(Some(stats.best_rating)),
            stats.worst.join(", "),
            format_rating(Some(stats.worst_rating)),
        ))
    }

    fn command_random_movie(&mut self) -> Result<String> {
        Ok(match self.service.random_pick()? {
            Some(movie) => format!(
                "Your movie for tonight: {}, is rated {}",
                movie.title,
                movie.display_rating()
            ),
            None => "No movies available.".to_string(),
        })
    }

    fn command_search_movie(&mut self) -> Result<String> {
        let query = self.require_input("Enter part of movie name: ")?;
        Ok(match self.service.search(&query)? {
            Some(movie) => movie.to_string(),
            None => "No match found".to_string(),
        })
    }

    fn command_sort_movies(&mut self) -> Result<String> {
        let movies = self.service.sorted_by_rating(SortOrder::Descending)?;
        if movies.is_empty() {
            return Ok("No movies available to sort.".to_string());
        }

        let mut lines = vec![format!("{} movies in total", movies.len())];
        lines.extend(movies.iter().map(|movie| movie.to_string()));
        Ok(lines.join("\n"))
    }

    fn command_generate_website(&mut self) -> Result<String> {
        let movies = self.service.movies()?;
        let path = HtmlReport::write_to_dir(&self.report_dir, &movies)?;
        Ok(format!("Website was generated successfully: {}", path.display()))
    }
}
