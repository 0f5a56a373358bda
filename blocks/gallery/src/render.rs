use askama::Template;
use universeex_atoms::catalog::{cameras_for, Rover};
use universeex_atoms::photos::PhotoRecord;
use universeex_atoms::query::{self, EncodeIntent, FilterState, Location, MIN_DATE};

use crate::types::GalleryPage;

pub const GALLERY_PATH: &str = "/";
pub const NAVIGATE_PATH: &str = "/navigate";
/// Location key of the photo open in the detail viewer. Not part of the filter.
pub const PHOTO_KEY: &str = "photo";

const TITLE: &str = "UniverseEx • Mars Rover Gallery";

#[derive(Template)]
#[template(path = "document.html")]
struct DocumentTemplate<'a> {
    title: &'a str,
    /// Already rendered fragments.
    body: &'a str,
}

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorTemplate<'a> {
    message: &'a str,
}

/// One small GET form per control. Each carries the current location, the
/// field being edited and its new value to `/navigate`.
#[derive(Template)]
#[template(path = "filters.html")]
struct FiltersTemplate<'a> {
    navigate_path: &'a str,
    hidden: &'a [(String, String)],
    rover_key: &'a str,
    camera_key: &'a str,
    date_key: &'a str,
    search_key: &'a str,
    rovers: Vec<SelectOption<'a>>,
    cameras: Vec<SelectOption<'a>>,
    date: &'a str,
    min_date: &'a str,
    today: &'a str,
    search: &'a str,
}

struct SelectOption<'a> {
    value: &'a str,
    label: &'a str,
    selected: bool,
}

#[derive(Template)]
#[template(path = "photo_grid.html")]
struct PhotoGridTemplate<'a> {
    cards: Vec<PhotoCard<'a>>,
}

struct PhotoCard<'a> {
    photo: &'a PhotoRecord,
    href: String,
    camera: String,
}

#[derive(Template)]
#[template(path = "detail_viewer.html")]
struct DetailViewerTemplate<'a> {
    photo: &'a PhotoRecord,
    close_href: String,
}

#[derive(Template)]
#[template(path = "pagination.html")]
struct PaginationTemplate {
    page: String,
    prev_href: Option<String>,
    next_href: Option<String>,
}

/// Full gallery document for one result page.
pub fn render_gallery(
    page: &GalleryPage,
    selected: Option<u64>,
) -> Result<String, askama::Error> {
    let today = query::today_utc();
    let location = query::encode(&page.filter, EncodeIntent::PageNavigation);
    let selected_photo = selected.and_then(|id| page.photos.iter().find(|p| p.id == id));

    let mut body = filters_form(&page.filter, &today)?;
    body.push_str(&photo_grid(&page.photos, &location)?);
    body.push_str(&pagination(&page.filter, page.has_next)?);
    body.push_str(&detail_viewer(selected_photo, &location)?);
    document(&body)
}

/// Filters plus an error message in place of the grid.
pub fn render_error(filter: &FilterState, message: &str) -> Result<String, askama::Error> {
    let mut body = filters_form(filter, &query::today_utc())?;
    body.push_str(&ErrorTemplate { message }.render()?);
    document(&body)
}

fn document(body: &str) -> Result<String, askama::Error> {
    DocumentTemplate { title: TITLE, body }.render()
}

pub fn filters_form(filter: &FilterState, today: &str) -> Result<String, askama::Error> {
    let location = query::encode(filter, EncodeIntent::PageNavigation);

    let rovers = Rover::ALL
        .iter()
        .map(|rover| SelectOption {
            value: rover.as_str(),
            label: rover.display_name(),
            selected: *rover == filter.rover(),
        })
        .collect();

    let mut cameras = vec![SelectOption {
        value: "",
        label: "All cameras",
        selected: filter.camera().is_none(),
    }];
    let listed = cameras_for(filter.rover());
    if let Some(current) = filter.camera() {
        // Keep an off-list selection visible so the control shows what is applied
        if !listed.iter().any(|code| *code == current) {
            cameras.push(SelectOption {
                value: current,
                label: current,
                selected: true,
            });
        }
    }
    cameras.extend(listed.iter().map(|code| SelectOption {
        value: *code,
        label: *code,
        selected: filter.camera() == Some(*code),
    }));

    FiltersTemplate {
        navigate_path: NAVIGATE_PATH,
        hidden: location.pairs(),
        rover_key: query::ROVER_KEY,
        camera_key: query::CAMERA_KEY,
        date_key: query::DATE_KEY,
        search_key: query::SEARCH_KEY,
        rovers,
        cameras,
        date: filter.date(),
        min_date: MIN_DATE,
        today,
        search: filter.search().unwrap_or_default(),
    }
    .render()
}

/// Grid of photo cards, or the empty state when there is nothing to show.
pub fn photo_grid(photos: &[PhotoRecord], location: &Location) -> Result<String, askama::Error> {
    let cards = photos
        .iter()
        .map(|photo| PhotoCard {
            photo,
            href: location
                .clone()
                .with(PHOTO_KEY, photo.id.to_string())
                .to_href(GALLERY_PATH),
            // Short code only when it adds something to the full name
            camera: if photo.camera_full_name != photo.camera_name {
                format!("{} ({})", photo.camera_full_name, photo.camera_name)
            } else {
                photo.camera_full_name.clone()
            },
        })
        .collect();

    PhotoGridTemplate { cards }.render()
}

/// Overlay for the selected photo. Renders nothing without one.
pub fn detail_viewer(
    photo: Option<&PhotoRecord>,
    location: &Location,
) -> Result<String, askama::Error> {
    let Some(photo) = photo else {
        return Ok(String::new());
    };

    DetailViewerTemplate {
        photo,
        close_href: location.clone().without(PHOTO_KEY).to_href(GALLERY_PATH),
    }
    .render()
}

/// Prev / Page N / Next. Prev is disabled on page 1, Next when `has_next` is false.
pub fn pagination(filter: &FilterState, has_next: bool) -> Result<String, askama::Error> {
    let location = query::encode(filter, EncodeIntent::PageNavigation);
    let step_href = |delta: &str| {
        location
            .clone()
            .with("edit", query::PAGE_KEY)
            .with("value", delta)
            .to_href(NAVIGATE_PATH)
    };
    let can_go_back = filter.page().get().is_some_and(|page| page > 1);

    PaginationTemplate {
        page: filter.page().to_string(),
        prev_href: can_go_back.then(|| step_href("-1")),
        next_href: has_next.then(|| step_href("1")),
    }
    .render()
}
