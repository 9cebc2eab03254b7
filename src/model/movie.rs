use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Movie {
    pub title: String,
    pub year: i32,
    pub rating: Option<f64>,
    pub poster: Option<String>,
}

impl Movie {
    pub fn new(title: impl Into<String>, year: i32, rating: Option<f64>, poster: Option<String>) -> Self {
        Movie {
            title: title.into(),
            year,
            rating,
            poster: poster.filter(|p| !p.is_empty()),
        }
    }

    pub fn to_csvable_array(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.year.to_string(),
            self.rating.map(|r| r.to_string()).unwrap_or_default(),
            self.poster.clone().unwrap_or_default(),
        ]
    }

    pub fn csv_titles() -> Vec<&'static str> {
        vec!["Title", "Year", "Rating", "Poster"]
    }

    pub fn display_rating(&self) -> String {
        format_rating(self.rating)
    }
}

pub fn format_rating(rating: Option<f64>) -> String {
    match rating {
        Some(r) => format!("{:.2}", r),
        None => "N/A".to_string(),
    }
}

impl fmt::Display for Movie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.title, self.year, self.display_rating())
    }
}
