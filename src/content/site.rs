//! Typed site content
//!
//! The text snapshot of every homepage section. The registry renders these
//! into `cat` bodies and document blocks; nothing here is mutated at runtime.

use serde::{Deserialize, Serialize};

/// Everything the console knows about the site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteContent {
    #[serde(default = "default_hero")]
    pub hero: String,

    #[serde(default = "default_quote")]
    pub quote: Quote,

    #[serde(default = "default_timeline")]
    pub timeline: Vec<Entry>,

    #[serde(default = "default_human")]
    pub human: Human,

    #[serde(default = "default_library")]
    pub library: Vec<Entry>,

    #[serde(default = "default_podcasts")]
    pub podcasts: Vec<Entry>,

    #[serde(default = "default_links")]
    pub links: Links,
}

fn default_hero() -> String {
    "Human.".to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    pub author: String,
}

/// A titled item: timeline milestone, hobby, book or podcast.
///
/// `subtitle` doubles as the author for books and podcasts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl Entry {
    fn new(title: &str, subtitle: &str) -> Self {
        Self {
            title: title.to_string(),
            subtitle: Some(subtitle.to_string()),
            description: None,
            href: None,
        }
    }

    fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    fn with_href(mut self, href: &str) -> Self {
        self.href = Some(href.to_string());
        self
    }

    /// `• <title> — <subtitle> (<href>)`, dropping absent parts.
    pub fn bullet(&self) -> String {
        let mut line = format!("• {}", self.title);
        if let Some(subtitle) = non_empty(&self.subtitle) {
            line.push_str(" — ");
            line.push_str(subtitle);
        }
        if let Some(href) = non_empty(&self.href) {
            line.push_str(&format!(" ({href})"));
        }
        line
    }

    /// Bullet followed by an indented description line, hrefs left out.
    pub fn milestone(&self) -> String {
        let mut line = format!("• {}", self.title);
        if let Some(subtitle) = non_empty(&self.subtitle) {
            line.push_str(" — ");
            line.push_str(subtitle);
        }
        if let Some(description) = non_empty(&self.description) {
            line.push_str("\n  ");
            line.push_str(description);
        }
        line
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Human {
    pub name: String,
    pub id: String,
    pub details: String,

    #[serde(default)]
    pub hobbies: Vec<Entry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Links {
    pub github: String,
    pub linkedin: String,
    pub built_with: String,
}

impl Links {
    /// Label/value pairs in display order.
    pub fn rows(&self) -> [(&'static str, &str); 3] {
        [
            ("GitHub", self.github.as_str()),
            ("LinkedIn", self.linkedin.as_str()),
            ("Built with", self.built_with.as_str()),
        ]
    }
}

impl Default for SiteContent {
    fn default() -> Self {
        Self {
            hero: default_hero(),
            quote: default_quote(),
            timeline: default_timeline(),
            human: default_human(),
            library: default_library(),
            podcasts: default_podcasts(),
            links: default_links(),
        }
    }
}

fn default_quote() -> Quote {
    Quote {
        text: "The struggle itself toward the heights is enough to fill a man's heart. One must imagine Sisyphus happy.".to_string(),
        author: "Albert Camus".to_string(),
    }
}

fn default_timeline() -> Vec<Entry> {
    vec![
        Entry::new("Applied Intuition", "Simulation / Autonomy").with_description(
            "Vehicle and Maritime simulation for autonomous systems. AI/ML local deployments.",
        ),
        Entry::new(
            "Amazon",
            "AWS RoboMaker / AWS Simulation Technology / AWS HPC",
        )
        .with_description("Worked on large-scale simulation systems."),
        Entry::new("Masters", "University of Michigan")
            .with_description("M.S.E in Computer Science."),
        Entry::new("Research", "Honda Research Institute")
            .with_description("Navigable plane detection for autonomous micro-mobility."),
        Entry::new("Research", "University of Michigan")
            .with_description("Monte carlo percolation simulations under Robert M. Ziff."),
        Entry::new("Undergrad", "University of Michigan").with_description(
            "B.S.E in Computer Science, Minor in Business and Multidisciplinary Design.",
        ),
    ]
}

fn default_human() -> Human {
    Human {
        name: "Chirag Bangera".to_string(),
        id: "CB-24-HMN".to_string(),
        details: "Species: Homo sapiens • Citizen: United States • Locale: Earth (UTC±)"
            .to_string(),
        hobbies: vec![
            Entry::new("Running", "5K 17:05 • 10K 42:30 • Half Marathon: ??"),
            Entry::new("Reading", "Always"),
            Entry::new("Football", "Detroit Lions • Michigan"),
            Entry::new("Ultimate Frisbee", "Cutter / Handler"),
            Entry::new("Book Recommendations", "See Library").with_href("#library"),
            Entry::new("Podcasts", "See Podcast Shelf").with_href("#podcasts"),
        ],
    }
}

fn default_library() -> Vec<Entry> {
    vec![
        Entry::new("Children of Time", "Adrian Tchaikovsky").with_href(
            "https://www.goodreads.com/book/show/25499718-children-of-time",
        ),
        Entry::new("Abundance", "Ezra Klein")
            .with_href("https://www.goodreads.com/book/show/176444106-abundance"),
        Entry::new(
            "How to Invent Everything: A Survival Guide for the Stranded Time Traveler",
            "Ryan North",
        )
        .with_href("https://www.goodreads.com/book/show/39026990-how-to-invent-everything"),
        Entry::new("The Dark Forest (The Three-Body Problem, #2)", "Liu, Cixin")
            .with_href("https://www.goodreads.com/book/show/23168817-the-dark-forest"),
        Entry::new("Chrysalis", "BeaverFur")
            .with_href("https://www.goodreads.com/book/show/40202397-chrysalis"),
    ]
}

fn default_podcasts() -> Vec<Entry> {
    vec![
        Entry::new("Fall of Civilizations", "Paul M.M. Cooper")
            .with_href("https://fallofcivilizationspodcast.com/"),
        Entry::new("Dan Carlin's Hardcore History", "Dan Carlin")
            .with_href("https://www.dancarlin.com/hardcore-history-series/"),
    ]
}

fn default_links() -> Links {
    Links {
        github: "https://github.com/cbangera2".to_string(),
        linkedin: "https://www.linkedin.com/in/chirag-bangera24/".to_string(),
        built_with: "Next.js • R3F • Tailwind".to_string(),
    }
}
