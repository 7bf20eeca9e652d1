use crate::backend::PropertyBackend;
use crate::models::PropertyRecord;
use thiserror::Error;
use tracing::debug;

/// Rendered in place of a value a record does not carry
pub const MISSING_VALUE: &str = "–";

/// How strictly the comparison page treats the number of selected ids.
///
/// The portal shipped both behaviors at different times; which one is live
/// is a product decision, so both stay available behind configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompareMode {
    /// Exactly two distinct ids or the selection is rejected
    #[default]
    RequireTwo,
    /// Zero to two ids; a partial selection renders placeholders instead
    /// of an error
    UpToTwo,
}

impl CompareMode {
    /// Parse a configuration value, falling back to the default for
    /// anything unknown
    pub fn parse(value: &str) -> Self {
        match value {
            "exactly_two" => CompareMode::RequireTwo,
            "up_to_two" => CompareMode::UpToTwo,
            _ => CompareMode::default(),
        }
    }
}

/// User-presentable reasons a comparison cannot be shown
#[derive(Debug, Error)]
pub enum CompareError {
    #[error("pick exactly two properties to compare")]
    NeedExactlyTwo,
    #[error("no more than two properties can be compared at once")]
    TooManySelected,
    #[error("the same property was selected twice")]
    DuplicateSelection,
    #[error("property {0} was not found")]
    NotFound(String),
    #[error("could not load the comparison: {0}")]
    Fetch(anyhow::Error),
}

/// One comparison-table row: a single attribute across both records,
/// flagged when the normalized values differ
#[derive(Debug, Clone, PartialEq)]
pub struct DiffRow {
    pub label: &'static str,
    pub left: String,
    pub right: String,
    pub differs: bool,
}

/// A loaded comparison: the fetched records (0–2 of them, depending on the
/// mode) and their attribute rows
#[derive(Debug)]
pub struct Comparison {
    pub records: Vec<PropertyRecord>,
    pub rows: Vec<DiffRow>,
}

type FieldExtractor = fn(&PropertyRecord) -> Option<String>;

/// Attributes shown on the comparison page, in display order
const COMPARED_FIELDS: &[(&str, FieldExtractor)] = &[
    ("Price", |r| Some(format!("{} EGP", r.price))),
    ("Bedrooms", |r| Some(r.bedrooms.to_string())),
    ("Bathrooms", |r| Some(r.bathrooms.to_string())),
    ("Living area", |r| Some(format!("{} sqm", r.sqm))),
    ("City", |r| non_empty(&r.location.city)),
    ("Neighbourhood", |r| {
        r.location.area.as_deref().and_then(non_empty)
    }),
    ("Finishing", |r| r.finishing.as_deref().and_then(non_empty)),
    ("Amenities", |r| {
        if r.amenities.is_empty() {
            None
        } else {
            Some(r.amenities.join(", "))
        }
    }),
    ("Monthly fee", |r| {
        r.monthly_fee.map(|fee| format!("{} EGP/mo", fee))
    }),
];

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn normalized_eq(left: &str, right: &str) -> bool {
    left.trim().eq_ignore_ascii_case(right.trim())
}

impl Comparison {
    /// Build the attribute rows for up to two records. Difference flags are
    /// only meaningful with both sides present; a row where both sides are
    /// missing is never flagged.
    pub fn new(records: Vec<PropertyRecord>) -> Self {
        let complete = records.len() == 2;
        let rows = COMPARED_FIELDS
            .iter()
            .map(|&(label, extract)| {
                let left = records.first().and_then(extract);
                let right = records.get(1).and_then(extract);
                let differs = complete
                    && match (&left, &right) {
                        (Some(left), Some(right)) => !normalized_eq(left, right),
                        (None, None) => false,
                        _ => true,
                    };
                DiffRow {
                    label,
                    left: left.unwrap_or_else(|| MISSING_VALUE.to_string()),
                    right: right.unwrap_or_else(|| MISSING_VALUE.to_string()),
                    differs,
                }
            })
            .collect();

        Self { records, rows }
    }
}

/// Parse the comparison page's `ids` URL parameter (comma-separated)
pub fn parse_ids_param(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

fn validate_selection(ids: &[String], mode: CompareMode) -> Result<(), CompareError> {
    for (index, id) in ids.iter().enumerate() {
        if ids[..index].contains(id) {
            return Err(CompareError::DuplicateSelection);
        }
    }
    match mode {
        CompareMode::RequireTwo if ids.len() != 2 => Err(CompareError::NeedExactlyTwo),
        CompareMode::UpToTwo if ids.len() > 2 => Err(CompareError::TooManySelected),
        _ => Ok(()),
    }
}

/// Validate the selection, fetch the records and build the diff table
pub async fn load_comparison<B>(
    backend: &B,
    ids: &[String],
    mode: CompareMode,
) -> Result<Comparison, CompareError>
where
    B: PropertyBackend + ?Sized,
{
    validate_selection(ids, mode)?;

    let mut records = Vec::with_capacity(ids.len());
    for id in ids {
        match backend.get_property(id).await {
            Ok(Some(record)) => records.push(record),
            Ok(None) => return Err(CompareError::NotFound(id.clone())),
            Err(e) => return Err(CompareError::Fetch(e)),
        }
    }

    debug!("Comparing {} records", records.len());
    Ok(Comparison::new(records))
}
