use crate::core::age::age_on;
use crate::core::pagination::ITEMS_PER_PAGE;
use crate::domain::model::Nanny;
use crate::domain::views::DirectoryPage;
use crate::utils::error::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Csv,
    Json,
}

impl OutputFormat {
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Text => "nannies.txt",
            Self::Csv => "nannies.csv",
            Self::Json => "nannies.json",
        }
    }
}

pub fn render(page: &DirectoryPage, format: OutputFormat, today: NaiveDate) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(page, today)),
        OutputFormat::Csv => render_csv(&page.nannies, today),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(page)?),
    }
}

fn display_number(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

fn display_age(nanny: &Nanny, today: NaiveDate) -> String {
    nanny
        .birthday
        .map(|b| age_on(b, today).to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn display_characters(nanny: &Nanny) -> String {
    if nanny.characters.is_empty() {
        "N/A".to_string()
    } else {
        nanny.characters.join(", ")
    }
}

/// Card layout for terminals.
pub fn render_text(page: &DirectoryPage, today: NaiveDate) -> String {
    let mut out = String::new();

    if page.nannies.is_empty() {
        let empty = if page.favorites_only {
            "No favorite nannies yet."
        } else {
            "No nannies found for this filter."
        };
        out.push_str(empty);
        out.push('\n');
        return out;
    }

    let _ = writeln!(
        out,
        "Filter: {} ({} of {})",
        page.option.label(),
        page.nannies.len(),
        page.total
    );

    for nanny in &page.nannies {
        let _ = writeln!(out);
        let _ = writeln!(out, "{} [{}]", nanny.name, nanny.id);
        let _ = writeln!(
            out,
            "  {} | ★ {} | Price / 1 hour: {}$",
            nanny.location,
            display_number(nanny.rating),
            display_number(nanny.price_per_hour)
        );
        let _ = writeln!(
            out,
            "  Age: {} | Experience: {} | Kids age: {}",
            display_age(nanny, today),
            nanny.experience,
            nanny.kids_age
        );
        let _ = writeln!(out, "  Characters: {}", display_characters(nanny));
        let _ = writeln!(out, "  Education: {}", nanny.education);
        if !nanny.about.is_empty() {
            let _ = writeln!(out, "  {}", nanny.about);
        }

        if nanny.reviews.is_empty() {
            let _ = writeln!(out, "  No reviews yet.");
        }
        for review in &nanny.reviews {
            let rating = review
                .rating
                .map(|r| format!("{:.1}", r))
                .unwrap_or_else(|| "-".to_string());
            let _ = writeln!(out, "  - {} (★ {}): {}", review.reviewer, rating, review.comment);
        }
    }

    if page.has_more {
        let _ = writeln!(out);
        let _ = writeln!(out, "More nannies available: pass --pages {}", page.visible / ITEMS_PER_PAGE + 1);
    }
    out
}

#[derive(Serialize)]
struct CsvRow<'a> {
    id: &'a str,
    name: &'a str,
    location: &'a str,
    price_per_hour: Option<f64>,
    rating: Option<f64>,
    age: Option<i32>,
    experience: &'a str,
    kids_age: &'a str,
    characters: String,
    education: &'a str,
    reviews: usize,
    avatar_url: &'a str,
}

pub fn render_csv(nannies: &[Nanny], today: NaiveDate) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    for nanny in nannies {
        writer.serialize(CsvRow {
            id: &nanny.id,
            name: &nanny.name,
            location: &nanny.location,
            price_per_hour: nanny.price_per_hour,
            rating: nanny.rating,
            age: nanny.birthday.map(|b| age_on(b, today)),
            experience: &nanny.experience,
            kids_age: &nanny.kids_age,
            characters: nanny.characters.join(", "),
            education: &nanny.education,
            reviews: nanny.reviews.len(),
            avatar_url: &nanny.avatar_url,
        })?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| crate::utils::error::DirectoryError::IoError(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
