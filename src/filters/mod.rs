use serde::{Deserialize, Serialize};

/// Sort order for listing queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SortBy {
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
    AreaAsc,
    AreaDesc,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Newest => "newest",
            SortBy::PriceAsc => "price_asc",
            SortBy::PriceDesc => "price_desc",
            SortBy::AreaAsc => "area_asc",
            SortBy::AreaDesc => "area_desc",
        }
    }

    /// Parse a query value, falling back to the default for anything unknown
    pub fn parse(value: &str) -> Self {
        match value {
            "newest" => SortBy::Newest,
            "price_asc" => SortBy::PriceAsc,
            "price_desc" => SortBy::PriceDesc,
            "area_asc" => SortBy::AreaAsc,
            "area_desc" => SortBy::AreaDesc,
            _ => SortBy::default(),
        }
    }
}

/// Active search criteria for the listing page.
///
/// Every field is independently optional; absence means "no constraint".
/// The struct round-trips losslessly through its URL query representation
/// for any state reachable through the filter UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FilterState {
    /// Free-text search
    pub search: Option<String>,
    pub city: Option<String>,
    pub area: Option<String>,
    /// Minimum price (EGP)
    pub min_price: Option<i64>,
    /// Maximum price (EGP)
    pub max_price: Option<i64>,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<u32>,
    /// Minimum size in square meters
    pub min_sqm: Option<i32>,
    /// Maximum size in square meters
    pub max_sqm: Option<i32>,
    pub finishing: Option<String>,
    pub tags: Vec<String>,
    pub sort_by: SortBy,
}

impl FilterState {
    /// Decode a filter from URL query pairs. Unknown keys and unparsable
    /// numeric values are ignored rather than rejected.
    pub fn from_query_pairs<K, V>(pairs: &[(K, V)]) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut filter = FilterState::default();

        for (key, value) in pairs {
            let value = value.as_ref();
            match key.as_ref() {
                "search" => filter.search = non_empty(value),
                "city" => filter.city = non_empty(value),
                "area" => filter.area = non_empty(value),
                "minPrice" => filter.min_price = value.parse().ok(),
                "maxPrice" => filter.max_price = value.parse().ok(),
                "bedrooms" => filter.bedrooms = value.parse().ok(),
                "bathrooms" => filter.bathrooms = value.parse().ok(),
                "minArea" => filter.min_sqm = value.parse().ok(),
                "maxArea" => filter.max_sqm = value.parse().ok(),
                "finishing" => filter.finishing = non_empty(value),
                "tags" => {
                    filter.tags = value
                        .split(',')
                        .map(str::trim)
                        .filter(|t| !t.is_empty())
                        .map(str::to_string)
                        .collect();
                    let mut seen = std::collections::HashSet::new();
                    filter.tags.retain(|tag| seen.insert(tag.clone()));
                }
                "sortBy" => filter.sort_by = SortBy::parse(value),
                _ => {}
            }
        }

        filter
    }

    /// Encode the filter as URL query pairs. Unset fields and the default
    /// sort order are omitted so equivalent filters produce identical URLs.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();

        push_str(&mut pairs, "search", &self.search);
        push_str(&mut pairs, "city", &self.city);
        push_str(&mut pairs, "area", &self.area);
        push_num(&mut pairs, "minPrice", &self.min_price);
        push_num(&mut pairs, "maxPrice", &self.max_price);
        push_num(&mut pairs, "bedrooms", &self.bedrooms);
        push_num(&mut pairs, "bathrooms", &self.bathrooms);
        push_num(&mut pairs, "minArea", &self.min_sqm);
        push_num(&mut pairs, "maxArea", &self.max_sqm);
        push_str(&mut pairs, "finishing", &self.finishing);
        if !self.tags.is_empty() {
            pairs.push(("tags".to_string(), self.tags.join(",")));
        }
        if self.sort_by != SortBy::default() {
            pairs.push(("sortBy".to_string(), self.sort_by.as_str().to_string()));
        }

        pairs
    }

    /// Decode from a percent-encoded query string, with or without a
    /// leading `?`.
    pub fn from_query_string(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);

        let pairs: Vec<(String, String)> = query
            .split('&')
            .filter(|part| !part.is_empty())
            .filter_map(|part| {
                let (key, value) = part.split_once('=').unwrap_or((part, ""));
                let key = urlencoding::decode(key).ok()?;
                let value = urlencoding::decode(value).ok()?;
                Some((key.into_owned(), value.into_owned()))
            })
            .collect();

        Self::from_query_pairs(&pairs)
    }

    /// Encode as a percent-encoded query string without a leading `?`.
    /// Empty when no constraint is set.
    pub fn to_query_string(&self) -> String {
        self.to_query_pairs()
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn push_str(pairs: &mut Vec<(String, String)>, key: &str, field: &Option<String>) {
    if let Some(value) = field {
        pairs.push((key.to_string(), value.clone()));
    }
}

fn push_num<N: ToString>(pairs: &mut Vec<(String, String)>, key: &str, field: &Option<N>) {
    if let Some(value) = field {
        pairs.push((key.to_string(), value.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(filter: &FilterState) -> FilterState {
        FilterState::from_query_pairs(&filter.to_query_pairs())
    }

    #[test]
    fn empty_filter_encodes_to_nothing() {
        let filter = FilterState::default();
        assert!(filter.to_query_pairs().is_empty());
        assert_eq!(filter.to_query_string(), "");
        assert_eq!(roundtrip(&filter), filter);
    }

    #[test]
    fn roundtrip_preserves_canonical_states() {
        let filter = FilterState {
            city: Some("Cairo".to_string()),
            bedrooms: Some(3),
            sort_by: SortBy::PriceAsc,
            ..Default::default()
        };
        assert_eq!(roundtrip(&filter), filter);

        let filter = FilterState {
            search: Some("garden view".to_string()),
            area: Some("New Capital".to_string()),
            min_price: Some(1_500_000),
            max_price: Some(4_000_000),
            bathrooms: Some(2),
            min_sqm: Some(90),
            max_sqm: Some(220),
            finishing: Some("finished".to_string()),
            tags: vec!["pool".to_string(), "balcony".to_string()],
            sort_by: SortBy::AreaDesc,
            ..Default::default()
        };
        assert_eq!(roundtrip(&filter), filter);
    }

    #[test]
    fn default_sort_is_omitted_from_encoding() {
        let filter = FilterState {
            city: Some("Giza".to_string()),
            ..Default::default()
        };
        let pairs = filter.to_query_pairs();
        assert!(pairs.iter().all(|(key, _)| key != "sortBy"));
    }

    #[test]
    fn unknown_keys_and_bad_numbers_are_ignored() {
        let pairs = [
            ("city", "Alexandria"),
            ("utm_source", "newsletter"),
            ("minPrice", "not-a-number"),
            ("bedrooms", "2"),
        ];
        let filter = FilterState::from_query_pairs(&pairs);
        assert_eq!(filter.city.as_deref(), Some("Alexandria"));
        assert_eq!(filter.min_price, None);
        assert_eq!(filter.bedrooms, Some(2));
    }

    #[test]
    fn tags_split_on_commas_and_drop_empties() {
        let filter = FilterState::from_query_pairs(&[("tags", "pool,,balcony, ,garage")]);
        assert_eq!(filter.tags, vec!["pool", "balcony", "garage"]);
    }

    #[test]
    fn unknown_sort_falls_back_to_newest() {
        let filter = FilterState::from_query_pairs(&[("sortBy", "cheapest")]);
        assert_eq!(filter.sort_by, SortBy::Newest);
    }

    #[test]
    fn query_string_form_percent_encodes_values() {
        let filter = FilterState {
            search: Some("sea view".to_string()),
            tags: vec!["pool".to_string()],
            ..Default::default()
        };
        let query = filter.to_query_string();
        assert_eq!(query, "search=sea%20view&tags=pool");
        assert_eq!(FilterState::from_query_string(&query), filter);
        assert_eq!(FilterState::from_query_string(&format!("?{query}")), filter);
    }
}
