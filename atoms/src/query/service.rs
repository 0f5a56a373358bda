use super::model::{
    EncodeIntent, FilterDate, FilterState, Location, PageNumber, CAMERA_KEY, DATE_KEY,
    DEFAULT_DATE, MIN_DATE, PAGE_KEY, ROVER_KEY, SEARCH_KEY,
};
use crate::catalog::Rover;
use std::num::NonZeroU32;

/// Current UTC date as `YYYY-MM-DD`. Computed on every call, never cached,
/// so the valid range moves forward at midnight UTC.
pub fn today_utc() -> String {
    chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string()
}

/// Shape check only (`\d{4}-\d{2}-\d{2}`); month/day ranges are not validated.
pub fn is_date_shaped(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Clamp into `[MIN_DATE, today]` by lexical comparison.
/// Fixed-width `YYYY-MM-DD` sorts the same as chronological order.
pub fn clamp_date_at(date: &str, today: &str) -> String {
    let clamped = if date < MIN_DATE {
        MIN_DATE
    } else if date > today {
        today
    } else {
        date
    };
    clamped.to_string()
}

pub fn clamp_date(date: &str) -> String {
    clamp_date_at(date, &today_utc())
}

/// Missing or malformed dates fall back to `DEFAULT_DATE`, then everything is clamped.
pub fn normalize_date_at(raw: Option<&str>, today: &str) -> String {
    let chosen = match raw {
        Some(date) if is_date_shaped(date) => date,
        Some(date) => {
            tracing::debug!("Malformed date {:?}, falling back to {}", date, DEFAULT_DATE);
            DEFAULT_DATE
        }
        None => DEFAULT_DATE,
    };
    clamp_date_at(chosen, today)
}

pub fn normalize_date(raw: Option<&str>) -> String {
    normalize_date_at(raw, &today_utc())
}

/// Absent → page 1. Anything that is not a positive integer stays `Invalid`.
pub fn parse_page(raw: Option<&str>) -> PageNumber {
    match raw {
        None => PageNumber::FIRST,
        Some(value) => match value.trim().parse::<NonZeroU32>() {
            Ok(page) => PageNumber::Valid(page),
            Err(_) => PageNumber::Invalid(value.to_string()),
        },
    }
}

/// Location → filter state, with `today` supplied by the caller.
pub fn decode_at(location: &Location, today: &str) -> FilterState {
    // Duplicate keys collapse to the first value; unknown keys are ignored
    let rover = match location.get(ROVER_KEY) {
        Some(raw) => Rover::parse(raw).unwrap_or_else(|| {
            tracing::debug!("Unknown rover {:?}, using {}", raw, Rover::default());
            Rover::default()
        }),
        None => Rover::default(),
    };

    FilterState::new(
        rover,
        location.get(CAMERA_KEY).map(str::to_string),
        FilterDate::parse_at(location.get(DATE_KEY), today),
        location.get(SEARCH_KEY).map(str::to_string),
        parse_page(location.get(PAGE_KEY)),
    )
}

pub fn decode(location: &Location) -> FilterState {
    decode_at(location, &today_utc())
}

/// Filter state → location. Default and empty values are left out to keep
/// links short; `FilterChange` always leaves out the page.
pub fn encode_at(state: &FilterState, intent: EncodeIntent, today: &str) -> Location {
    let mut location = Location::default();

    if state.rover() != Rover::default() {
        location.push(ROVER_KEY, state.rover().as_str());
    }
    if let Some(camera) = state.camera() {
        location.push(CAMERA_KEY, camera);
    }

    let date = normalize_date_at(Some(state.date()), today);
    if date != normalize_date_at(None, today) {
        location.push(DATE_KEY, date);
    }

    if let Some(search) = state.search() {
        location.push(SEARCH_KEY, search);
    }

    if intent == EncodeIntent::PageNavigation && !state.page().is_first() {
        location.push(PAGE_KEY, state.page().to_string());
    }

    location
}

pub fn encode(state: &FilterState, intent: EncodeIntent) -> Location {
    encode_at(state, intent, &today_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const TODAY: &str = "2024-06-15";

    fn date(raw: &str) -> FilterDate {
        FilterDate::parse_at(Some(raw), TODAY)
    }

    fn loc(query: &str) -> Location {
        Location::from_query(query)
    }

    #[test]
    fn clamp_is_idempotent() {
        for d in [
            "1999-12-31",
            "2011-12-31",
            "2012-01-01",
            "2015-05-30",
            TODAY,
            "2024-06-16",
            "2030-01-01",
            "9999-99-99",
        ] {
            let once = clamp_date_at(d, TODAY);
            assert_eq!(clamp_date_at(&once, TODAY), once, "input {d}");
        }
    }

    #[test]
    fn clamp_pins_to_bounds() {
        for d in ["0000-00-00", "1970-01-01", "2011-12-31"] {
            assert_eq!(clamp_date_at(d, TODAY), MIN_DATE);
        }
        for d in ["2024-06-16", "2030-01-01", "2100-12-31"] {
            assert_eq!(clamp_date_at(d, TODAY), TODAY);
        }
        assert_eq!(clamp_date_at("2018-03-04", TODAY), "2018-03-04");
        assert_eq!(clamp_date_at(MIN_DATE, TODAY), MIN_DATE);
        assert_eq!(clamp_date_at(TODAY, TODAY), TODAY);
    }

    #[test]
    fn clamp_uses_the_real_clock() {
        let today = today_utc();
        assert_eq!(clamp_date("2999-01-01"), today);
        assert!(is_date_shaped(&today));
    }

    #[test]
    fn empty_location_decodes_to_defaults() {
        let state = decode_at(&Location::default(), TODAY);
        assert_eq!(state.rover(), Rover::Curiosity);
        assert_eq!(state.camera(), None);
        assert_eq!(state.date(), DEFAULT_DATE);
        assert_eq!(state.search(), None);
        assert_eq!(state.page(), &PageNumber::FIRST);
        assert_eq!(state, FilterState::default());
    }

    #[test]
    fn future_date_decodes_to_today() {
        let state = decode_at(&loc("date=2030-01-01"), TODAY);
        assert_eq!(state.date(), TODAY);
    }

    #[test]
    fn malformed_date_falls_back_to_default() {
        for raw in ["", "yesterday", "2015-5-30", "2015/05/30", "20150530", "2015-05-30T00:00"] {
            let state = decode_at(&loc(&format!("date={raw}")), TODAY);
            assert_eq!(state.date(), DEFAULT_DATE, "input {raw:?}");
        }
    }

    #[test]
    fn early_date_clamps_to_min() {
        let state = decode_at(&loc("date=2004-01-04"), TODAY);
        assert_eq!(state.date(), MIN_DATE);
    }

    #[test]
    fn decode_reads_every_known_key() {
        let state = decode_at(
            &loc("rover=spirit&camera=PANCAM&date=2016-02-01&q=pan&page=4&unknown=x"),
            TODAY,
        );
        assert_eq!(state.rover(), Rover::Spirit);
        assert_eq!(state.camera(), Some("PANCAM"));
        assert_eq!(state.date(), "2016-02-01");
        assert_eq!(state.search(), Some("pan"));
        assert_eq!(state.page(), &PageNumber::new(4).unwrap());
    }

    #[test]
    fn duplicate_keys_keep_first_value() {
        let state = decode_at(&loc("rover=spirit&rover=opportunity&page=2&page=9"), TODAY);
        assert_eq!(state.rover(), Rover::Spirit);
        assert_eq!(state.page().get(), Some(2));
    }

    #[test]
    fn unknown_rover_and_empty_values_fall_back() {
        let state = decode_at(&loc("rover=perseverance&camera=&q="), TODAY);
        assert_eq!(state.rover(), Rover::Curiosity);
        assert_eq!(state.camera(), None);
        assert_eq!(state.search(), None);
    }

    #[test]
    fn non_numeric_page_is_kept_as_invalid() {
        assert_eq!(parse_page(Some("abc")), PageNumber::Invalid("abc".to_string()));
        assert_eq!(parse_page(Some("0")), PageNumber::Invalid("0".to_string()));
        assert_eq!(parse_page(Some("-2")), PageNumber::Invalid("-2".to_string()));
        assert_eq!(parse_page(Some("")), PageNumber::Invalid(String::new()));
        assert_eq!(parse_page(Some(" 3 ")).get(), Some(3));
        assert_eq!(parse_page(None), PageNumber::FIRST);
    }

    #[test]
    fn incompatible_camera_is_passed_through() {
        let state = decode_at(&loc("rover=curiosity&camera=PANCAM"), TODAY);
        assert_eq!(state.camera(), Some("PANCAM"));
    }

    #[test]
    fn encode_omits_defaults() {
        let location = encode_at(&FilterState::default(), EncodeIntent::PageNavigation, TODAY);
        assert!(location.is_empty());
        assert_eq!(location.to_href("/"), "/");
    }

    #[test]
    fn round_trip_holds_at_first_page() {
        let states = [
            FilterState::default(),
            FilterState::new(Rover::Spirit, None, date("2012-01-01"), None, PageNumber::FIRST),
            FilterState::new(
                Rover::Opportunity,
                Some("NAVCAM".to_string()),
                date("2016-07-08"),
                Some("front hazard".to_string()),
                PageNumber::FIRST,
            ),
            FilterState::new(
                Rover::Curiosity,
                Some("PANCAM".to_string()),
                date(TODAY),
                Some("a&b=c".to_string()),
                PageNumber::FIRST,
            ),
        ];
        for state in states {
            for intent in [EncodeIntent::FilterChange, EncodeIntent::PageNavigation] {
                let location = encode_at(&state, intent, TODAY);
                let reparsed = Location::from_query(&location.to_query_string());
                assert_eq!(decode_at(&reparsed, TODAY), state);
            }
        }
    }

    #[test]
    fn round_trip_breaks_past_first_page_on_filter_change() {
        let state = FilterState::new(
            Rover::Spirit,
            Some("FHAZ".to_string()),
            date("2013-01-01"),
            None,
            PageNumber::new(3).unwrap(),
        );

        let filter_change = encode_at(&state, EncodeIntent::FilterChange, TODAY);
        assert!(!filter_change.contains_key(PAGE_KEY));
        let decoded = decode_at(&filter_change, TODAY);
        assert_ne!(decoded, state);
        assert_eq!(decoded, state.with_page(PageNumber::FIRST));

        let page_nav = encode_at(&state, EncodeIntent::PageNavigation, TODAY);
        assert_eq!(page_nav.get(PAGE_KEY), Some("3"));
        assert_eq!(decode_at(&page_nav, TODAY), state);
    }

    #[test]
    fn stored_dates_are_clamped_and_round_trip() {
        let state = FilterState::default().with_date(date("2031-01-01"));
        assert_eq!(state.date(), TODAY);

        let location = encode_at(&state, EncodeIntent::FilterChange, TODAY);
        assert_eq!(location.get(DATE_KEY), Some(TODAY));
        assert_eq!(decode_at(&location, TODAY), state);

        assert_eq!(FilterState::default().with_date(date("2011-12-31")).date(), MIN_DATE);
        assert_eq!(FilterState::default().with_date(date("soon")).date(), DEFAULT_DATE);
    }

    #[test]
    fn encoded_query_escapes_search_text() {
        let state = FilterState::default().with_search(Some("mast cam&x".to_string()));
        let location = encode_at(&state, EncodeIntent::FilterChange, TODAY);
        assert_eq!(location.to_query_string(), "q=mast+cam%26x");
    }
}
