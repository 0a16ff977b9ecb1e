//! Content registry
//!
//! Read-only mapping from section keys and aliases to text bodies, plus the
//! whole-document view used by `cat all`. Built once from [`SiteContent`]
//! and shared behind an `Arc`; lookups are pure.

pub mod anchors;
pub mod site;

pub use anchors::{AnchorTable, ScrollTarget};
pub use site::SiteContent;

/// Keys that resolve to the composed document instead of a single section.
pub const WHOLE_DOCUMENT_KEYS: [&str; 5] = ["all", "all.txt", "*", ".", "/"];

/// File name listed for the composed document.
pub const WHOLE_DOCUMENT_FILE: &str = "all.txt";

/// Error returned by registry lookups
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentError {
    NotFound(String),
}

impl std::fmt::Display for ContentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentError::NotFound(key) => write!(f, "{key}: No such file or section"),
        }
    }
}

impl std::error::Error for ContentError {}

/// One addressable section of the site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Primary identifier (`hero`, `quote`, ...)
    pub key: String,
    /// Extra names that resolve to this section (`hero.txt`)
    pub aliases: Vec<String>,
    /// Text printed by `cat <key>`
    pub body: String,
    /// Text contributed to the composed document, header included
    pub block: String,
}

impl Section {
    pub fn new(key: &str, body: String, block: String) -> Self {
        Self {
            key: key.to_string(),
            aliases: vec![format!("{key}.txt")],
            body,
            block,
        }
    }

    /// Section whose document block is `<header>\n<body>`.
    pub fn with_header(key: &str, header: &str, body: String) -> Self {
        let block = format!("{header}\n{body}");
        Self::new(key, body, block)
    }

    /// Virtual file name shown by `ls` and `tree`.
    pub fn file_name(&self) -> String {
        format!("{}.txt", self.key)
    }

    fn answers_to(&self, normalized: &str) -> bool {
        self.key == normalized || self.aliases.iter().any(|a| a == normalized)
    }
}

/// Immutable section registry in canonical order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRegistry {
    sections: Vec<Section>,
}

impl ContentRegistry {
    /// Registry from explicit sections; order is kept as given.
    pub fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    /// Render every section of the site in canonical order.
    pub fn from_site(site: &SiteContent) -> Self {
        let join = |lines: Vec<String>| lines.join("\n");

        let timeline = join(site.timeline.iter().map(|t| t.milestone()).collect());
        let human = format!(
            "{} • ID: {}\n{}",
            site.human.name, site.human.id, site.human.details
        );
        let hobbies = join(site.human.hobbies.iter().map(|h| h.bullet()).collect());
        let library = join(site.library.iter().map(|b| b.bullet()).collect());
        let podcasts = join(site.podcasts.iter().map(|p| p.bullet()).collect());
        let rows = site.links.rows();
        let links = join(
            rows.iter()
                .map(|(label, value)| format!("{label} — {value}"))
                .collect(),
        );
        let links_block = join(
            rows.iter()
                .map(|(label, value)| format!("• {label} — {value}"))
                .collect(),
        );

        Self::new(vec![
            Section::new("hero", site.hero.clone(), format!("# {}", site.hero)),
            Section::new(
                "quote",
                format!("{}\n— {}", site.quote.text, site.quote.author),
                format!("> {}\n— {}", site.quote.text, site.quote.author),
            ),
            Section::with_header("timeline", "== Timeline ==", timeline),
            Section::with_header("human", "== Human Verification ==", human),
            Section::with_header("hobbies", "== Hobbies ==", hobbies),
            Section::with_header("library", "== Library ==", library),
            Section::with_header("podcasts", "== Podcasts ==", podcasts),
            Section::new("links", links, format!("== Links ==\n{links_block}")),
        ])
    }

    /// Look up a section by key or alias (trimmed, case-insensitive).
    pub fn section(&self, key: &str) -> Option<&Section> {
        let normalized = normalize(key);
        self.sections.iter().find(|s| s.answers_to(&normalized))
    }

    /// Resolve a key to printable text. Whole-document keys compose everything.
    pub fn resolve(&self, key: &str) -> Result<String, ContentError> {
        let normalized = normalize(key);
        if WHOLE_DOCUMENT_KEYS.contains(&normalized.as_str()) {
            return Ok(self.compose_all());
        }
        self.section(&normalized)
            .map(|s| s.body.clone())
            .ok_or_else(|| ContentError::NotFound(key.to_string()))
    }

    /// All section blocks in canonical order, separated by blank lines.
    pub fn compose_all(&self) -> String {
        self.sections
            .iter()
            .map(|s| s.block.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Virtual file list: one file per section, then the composed document.
    pub fn file_names(&self) -> Vec<String> {
        self.sections
            .iter()
            .map(Section::file_name)
            .chain(std::iter::once(WHOLE_DOCUMENT_FILE.to_string()))
            .collect()
    }

    /// Completion candidates for `cat`: files, then bare keys and the
    /// whole-document shorthands, without duplicates.
    pub fn cat_candidates(&self) -> Vec<String> {
        let mut candidates = self.file_names();
        let bases = self
            .sections
            .iter()
            .map(|s| s.key.clone())
            .chain(["all", "*", ".", "/"].into_iter().map(String::from));
        for base in bases {
            if !candidates.contains(&base) {
                candidates.push(base);
            }
        }
        candidates
    }
}

impl Default for ContentRegistry {
    fn default() -> Self {
        Self::from_site(&SiteContent::default())
    }
}

fn normalize(key: &str) -> String {
    key.trim().to_lowercase()
}
