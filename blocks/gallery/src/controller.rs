use universeex_atoms::catalog::Rover;
use universeex_atoms::query::{self, EncodeIntent, FilterDate, FilterState, Location};

/// Side effect of a committed edit: go to `location`.
pub trait Navigator {
    fn navigate(&mut self, location: Location);
}

/// Collects every navigation in order.
impl Navigator for Vec<Location> {
    fn navigate(&mut self, location: Location) {
        self.push(location);
    }
}

/// A single user edit coming from the filter form or the pagination control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterEdit {
    Rover(Rover),
    Camera(Option<String>),
    Date(String),
    /// Submitted search text (the explicit confirmation of the search box)
    Search(String),
    PageDelta(i64),
}

impl FilterEdit {
    /// `field` is one of `rover`, `camera`, `date`, `q`, `page`.
    /// Unknown rovers fall back to the default one; unknown fields and
    /// non-numeric page deltas give `None`.
    pub fn parse(field: &str, value: &str) -> Option<FilterEdit> {
        match field {
            query::ROVER_KEY => Some(FilterEdit::Rover(Rover::parse(value).unwrap_or_default())),
            query::CAMERA_KEY => Some(FilterEdit::Camera(Some(value.to_string()))),
            query::DATE_KEY => Some(FilterEdit::Date(value.to_string())),
            query::SEARCH_KEY => Some(FilterEdit::Search(value.to_string())),
            query::PAGE_KEY => value
                .trim()
                .parse::<i64>()
                .ok()
                .map(FilterEdit::PageDelta),
            _ => None,
        }
    }
}

/// Turns edits on the current filter into new locations.
///
/// The current state is never modified: every commit builds a new
/// `FilterState`, encodes it and hands the location to the navigator exactly
/// once. The next page load decodes that location and builds a new controller.
pub struct FilterController<N: Navigator> {
    current: FilterState,
    search_draft: String,
    navigator: N,
}

impl<N: Navigator> FilterController<N> {
    pub fn new(current: FilterState, navigator: N) -> Self {
        let search_draft = current.search().unwrap_or_default().to_string();
        Self {
            current,
            search_draft,
            navigator,
        }
    }

    pub fn current(&self) -> &FilterState {
        &self.current
    }

    pub fn search_draft(&self) -> &str {
        &self.search_draft
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn into_navigator(self) -> N {
        self.navigator
    }

    /// An incompatible camera selection is kept.
    pub fn select_rover(&mut self, rover: Rover) -> Location {
        let next = self.current.with_rover(rover);
        self.commit(next, EncodeIntent::FilterChange)
    }

    pub fn select_camera(&mut self, camera: Option<String>) -> Location {
        let next = self.current.with_camera(camera);
        self.commit(next, EncodeIntent::FilterChange)
    }

    /// Out-of-range or malformed input is corrected the same way decode does it.
    pub fn set_date(&mut self, raw: &str) -> Location {
        let next = self.current.with_date(FilterDate::parse(Some(raw)));
        self.commit(next, EncodeIntent::FilterChange)
    }

    /// Typing only updates the draft; nothing navigates until `confirm_search`.
    pub fn edit_search(&mut self, text: &str) {
        self.search_draft = text.to_string();
    }

    pub fn confirm_search(&mut self) -> Location {
        let next = self.current.with_search(Some(self.search_draft.clone()));
        self.commit(next, EncodeIntent::FilterChange)
    }

    /// Move `delta` pages, keeping every filter. `None` (and no navigation)
    /// when the target would be below page 1 or the current page is invalid.
    pub fn go_to_page_delta(&mut self, delta: i64) -> Option<Location> {
        let page = self.current.page().offset(delta)?;
        let next = self.current.with_page(page);
        Some(self.commit(next, EncodeIntent::PageNavigation))
    }

    pub fn apply(&mut self, edit: FilterEdit) -> Option<Location> {
        match edit {
            FilterEdit::Rover(rover) => Some(self.select_rover(rover)),
            FilterEdit::Camera(camera) => Some(self.select_camera(camera)),
            FilterEdit::Date(raw) => Some(self.set_date(&raw)),
            FilterEdit::Search(text) => {
                self.edit_search(&text);
                Some(self.confirm_search())
            }
            FilterEdit::PageDelta(delta) => self.go_to_page_delta(delta),
        }
    }

    fn commit(&mut self, next: FilterState, intent: EncodeIntent) -> Location {
        let location = query::encode(&next, intent);
        tracing::debug!("Navigating to ?{}", location);
        self.navigator.navigate(location.clone());
        location
    }
}
