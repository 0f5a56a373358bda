use crate::catalog::Rover;
use serde::Serialize;
use std::fmt;
use std::num::NonZeroU32;

/// Earliest earth date the gallery offers; older dates have patchy coverage.
pub const MIN_DATE: &str = "2012-01-01";
/// Date used when the location carries none (or a malformed one).
pub const DEFAULT_DATE: &str = "2015-05-30";

// ========== LOCATION KEYS ==========
pub const ROVER_KEY: &str = "rover";
pub const CAMERA_KEY: &str = "camera";
pub const DATE_KEY: &str = "date";
pub const PAGE_KEY: &str = "page";
pub const SEARCH_KEY: &str = "q";

// ========== FILTER DATE ==========
/// Earth date already clamped into `[MIN_DATE, today]`. Missing or malformed
/// input becomes `DEFAULT_DATE` first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FilterDate(String);

impl FilterDate {
    pub fn parse_at(raw: Option<&str>, today: &str) -> Self {
        FilterDate(super::service::normalize_date_at(raw, today))
    }

    pub fn parse(raw: Option<&str>) -> Self {
        FilterDate(super::service::normalize_date(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for FilterDate {
    fn default() -> Self {
        FilterDate(DEFAULT_DATE.to_string())
    }
}

impl fmt::Display for FilterDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ========== PAGE NUMBER ==========
/// 1-based page. A raw value that is not a positive integer is kept verbatim
/// as `Invalid` so the caller can reject it instead of guessing a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PageNumber {
    Valid(NonZeroU32),
    Invalid(String),
}

impl PageNumber {
    pub const FIRST: PageNumber = PageNumber::Valid(NonZeroU32::MIN);

    pub fn new(page: u32) -> Option<PageNumber> {
        NonZeroU32::new(page).map(PageNumber::Valid)
    }

    pub fn get(&self) -> Option<u32> {
        match self {
            PageNumber::Valid(page) => Some(page.get()),
            PageNumber::Invalid(_) => None,
        }
    }

    pub fn is_first(&self) -> bool {
        self.get() == Some(1)
    }

    /// Page `delta` steps away. `None` for invalid pages or when it would go below 1.
    pub fn offset(&self, delta: i64) -> Option<PageNumber> {
        let current = i64::from(self.get()?);
        let target = current.checked_add(delta)?;
        u32::try_from(target).ok().and_then(PageNumber::new)
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        PageNumber::FIRST
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageNumber::Valid(page) => write!(f, "{}", page),
            PageNumber::Invalid(raw) => f.write_str(raw),
        }
    }
}

// ========== FILTER STATE ==========
/// Canonical query for one result fetch.
///
/// Values are immutable: every `with_*` transition returns a new state. Any
/// change other than `with_page` resets the page to 1. Empty camera and
/// search strings collapse to `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterState {
    rover: Rover,
    camera: Option<String>,
    date: FilterDate,
    search: Option<String>,
    page: PageNumber,
}

impl FilterState {
    pub fn new(
        rover: Rover,
        camera: Option<String>,
        date: FilterDate,
        search: Option<String>,
        page: PageNumber,
    ) -> Self {
        Self {
            rover,
            camera: non_empty(camera),
            date,
            search: non_empty(search),
            page,
        }
    }

    pub fn rover(&self) -> Rover {
        self.rover
    }

    pub fn camera(&self) -> Option<&str> {
        self.camera.as_deref()
    }

    pub fn date(&self) -> &str {
        self.date.as_str()
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn page(&self) -> &PageNumber {
        &self.page
    }

    /// Camera selection is left alone even if the new rover lacks that camera.
    pub fn with_rover(&self, rover: Rover) -> Self {
        Self {
            rover,
            page: PageNumber::FIRST,
            ..self.clone()
        }
    }

    pub fn with_camera(&self, camera: Option<String>) -> Self {
        Self {
            camera: non_empty(camera),
            page: PageNumber::FIRST,
            ..self.clone()
        }
    }

    pub fn with_date(&self, date: FilterDate) -> Self {
        Self {
            date,
            page: PageNumber::FIRST,
            ..self.clone()
        }
    }

    pub fn with_search(&self, search: Option<String>) -> Self {
        Self {
            search: non_empty(search),
            page: PageNumber::FIRST,
            ..self.clone()
        }
    }

    pub fn with_page(&self, page: PageNumber) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new(
            Rover::default(),
            None,
            FilterDate::default(),
            None,
            PageNumber::FIRST,
        )
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

// ========== ENCODING ==========
/// Why a state is being encoded. Filter edits drop the page key so the next
/// decode lands on page 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeIntent {
    FilterChange,
    PageNavigation,
}

/// Flat key/value form of the query component of a shareable location.
/// Keeps insertion order; lookups return the first value for a key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pairs: Vec<(String, String)>,
}

impl Location {
    /// Parse a raw query string (no leading `?`).
    pub fn from_query(query: &str) -> Self {
        Self {
            pairs: url::form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect(),
        }
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            pairs: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    /// Replace every value of `key` with a single `value`.
    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.pairs.retain(|(k, _)| k != key);
        self.pairs.push((key.to_string(), value.into()));
        self
    }

    pub fn without(mut self, key: &str) -> Self {
        self.pairs.retain(|(k, _)| k != key);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn to_query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }

    /// `path` alone when empty, otherwise `path?query`
    pub fn to_href(&self, path: &str) -> String {
        if self.pairs.is_empty() {
            path.to_string()
        } else {
            format!("{}?{}", path, self.to_query_string())
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}
