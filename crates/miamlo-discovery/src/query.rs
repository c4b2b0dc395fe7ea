//! Canonical request parameters for the discovery endpoints.
//!
//! [`SearchQuery`] is the single description of the user's filter state;
//! [`SearchQuery::params`] maps it to the parameter set the backend expects.
//! Pure and deterministic — no I/O, no clocks — so identical input always
//! produces byte-identical output.

use std::str::FromStr;

/// Sort options offered on the dishes surface.
///
/// Each key maps to the `(sortBy, sortOrder)` pair the backend expects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
    Rating,
    CookTime,
}

impl SortKey {
    /// The `(sortBy, sortOrder)` request pair for this key.
    #[must_use]
    pub fn request_pair(self) -> (&'static str, &'static str) {
        match self {
            SortKey::Newest => ("newest", "desc"),
            SortKey::PriceAsc => ("price", "asc"),
            SortKey::PriceDesc => ("price", "desc"),
            SortKey::Rating => ("rating", "desc"),
            SortKey::CookTime => ("cookTime", "asc"),
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(SortKey::Newest),
            "price_asc" => Ok(SortKey::PriceAsc),
            "price_desc" => Ok(SortKey::PriceDesc),
            "rating" => Ok(SortKey::Rating),
            "cook_time" => Ok(SortKey::CookTime),
            other => Err(format!(
                "unknown sort key \"{other}\" (expected newest, price_asc, price_desc, rating, or cook_time)"
            )),
        }
    }
}

/// The user's current filter and pagination state.
///
/// Pages are 1-based everywhere inside the client; endpoint-specific
/// conventions are handled at the API-call boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub free_text: String,
    pub category: Option<String>,
    pub sort: SortKey,
    /// Maximum preparation time filter, minutes.
    pub max_cook_time: Option<u32>,
    pub min_rating: Option<f32>,
    pub page: u32,
    pub page_size: u32,
}

impl SearchQuery {
    /// A first-page query with no filters.
    #[must_use]
    pub fn new(page_size: u32) -> Self {
        Self {
            free_text: String::new(),
            category: None,
            sort: SortKey::default(),
            max_cook_time: None,
            min_rating: None,
            page: 1,
            page_size,
        }
    }

    /// The free text with surrounding whitespace removed, when non-empty.
    #[must_use]
    pub fn trimmed_text(&self) -> Option<&str> {
        let trimmed = self.free_text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    }

    /// True when any filter besides sort order is set.
    ///
    /// Drives the filtered vs unfiltered empty state.
    #[must_use]
    pub fn has_active_filters(&self) -> bool {
        self.trimmed_text().is_some()
            || self.category.is_some()
            || self.max_cook_time.is_some()
            || self.min_rating.is_some()
    }

    /// Clears every filter and returns to the first page. Sort is kept.
    pub fn reset_filters(&mut self) {
        self.free_text.clear();
        self.category = None;
        self.max_cook_time = None;
        self.min_rating = None;
        self.page = 1;
    }

    /// Builds the request parameters for the dishes search endpoint.
    ///
    /// Unset optionals are omitted entirely — the backend never sees empty
    /// strings or nulls. The location triple is appended by the API client.
    #[must_use]
    pub fn params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("page".to_owned(), self.page.to_string()),
            ("pageSize".to_owned(), self.page_size.to_string()),
        ];

        if let Some(text) = self.trimmed_text() {
            params.push(("query".to_owned(), text.to_owned()));
        }
        if let Some(category) = &self.category {
            params.push(("category".to_owned(), category.clone()));
        }

        let (sort_by, sort_order) = self.sort.request_pair();
        params.push(("sortBy".to_owned(), sort_by.to_owned()));
        params.push(("sortOrder".to_owned(), sort_order.to_owned()));

        if let Some(minutes) = self.max_cook_time {
            params.push(("maxCookTime".to_owned(), minutes.to_string()));
        }
        if let Some(rating) = self.min_rating {
            params.push(("minRating".to_owned(), rating.to_string()));
        }

        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_keys_map_to_expected_request_pairs() {
        assert_eq!(SortKey::Newest.request_pair(), ("newest", "desc"));
        assert_eq!(SortKey::PriceAsc.request_pair(), ("price", "asc"));
        assert_eq!(SortKey::PriceDesc.request_pair(), ("price", "desc"));
        assert_eq!(SortKey::Rating.request_pair(), ("rating", "desc"));
        assert_eq!(SortKey::CookTime.request_pair(), ("cookTime", "asc"));
    }

    #[test]
    fn sort_key_parses_cli_names() {
        assert_eq!("newest".parse::<SortKey>().unwrap(), SortKey::Newest);
        assert_eq!("price_asc".parse::<SortKey>().unwrap(), SortKey::PriceAsc);
        assert_eq!("cook_time".parse::<SortKey>().unwrap(), SortKey::CookTime);
        assert!("cheapest".parse::<SortKey>().is_err());
    }

    #[test]
    fn default_query_sends_only_page_and_sort() {
        let query = SearchQuery::new(12);
        let params = query.params();
        assert_eq!(
            params,
            vec![
                ("page".to_owned(), "1".to_owned()),
                ("pageSize".to_owned(), "12".to_owned()),
                ("sortBy".to_owned(), "newest".to_owned()),
                ("sortOrder".to_owned(), "desc".to_owned()),
            ]
        );
    }

    #[test]
    fn whitespace_only_text_is_omitted() {
        let mut query = SearchQuery::new(12);
        query.free_text = "   ".to_owned();
        assert!(query.params().iter().all(|(k, _)| k.as_str() != "query"));
        assert!(!query.has_active_filters());
    }

    #[test]
    fn all_filters_appear_when_set() {
        let mut query = SearchQuery::new(12);
        query.free_text = "  couscous ".to_owned();
        query.category = Some("Tunisien".to_owned());
        query.sort = SortKey::Rating;
        query.max_cook_time = Some(45);
        query.min_rating = Some(4.5);
        query.page = 3;

        let params = query.params();
        assert_eq!(
            params,
            vec![
                ("page".to_owned(), "3".to_owned()),
                ("pageSize".to_owned(), "12".to_owned()),
                ("query".to_owned(), "couscous".to_owned()),
                ("category".to_owned(), "Tunisien".to_owned()),
                ("sortBy".to_owned(), "rating".to_owned()),
                ("sortOrder".to_owned(), "desc".to_owned()),
                ("maxCookTime".to_owned(), "45".to_owned()),
                ("minRating".to_owned(), "4.5".to_owned()),
            ]
        );
    }

    #[test]
    fn params_is_deterministic_for_identical_input() {
        let mut query = SearchQuery::new(12);
        query.free_text = "pizza".to_owned();
        query.min_rating = Some(4.0);

        assert_eq!(query.params(), query.params());
        assert_eq!(query.params(), query.clone().params());
    }

    #[test]
    fn reset_filters_clears_everything_but_sort() {
        let mut query = SearchQuery::new(12);
        query.free_text = "pizza".to_owned();
        query.category = Some("Italien".to_owned());
        query.sort = SortKey::PriceAsc;
        query.max_cook_time = Some(30);
        query.min_rating = Some(4.0);
        query.page = 7;

        query.reset_filters();
        assert!(!query.has_active_filters());
        assert_eq!(query.page, 1);
        assert_eq!(query.sort, SortKey::PriceAsc);
    }
}
