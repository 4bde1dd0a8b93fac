use super::QueryError;
use crate::filter::{Filter, FilterAttribute, FilterError, FilterKind, RangeBound, RangeInputs};
use crate::visibility::VisibilityConfiguration;
use chrono::{DateTime, Duration, Timelike, Utc};
use log::warn;

/// Selection every alarm query starts from
pub const BASE_QUERY: &str = "SELECT * FROM Model";

const WHERE: &str = " WHERE ";
const AND: &str = " AND ";
const OR: &str = " OR ";

/// Range values the compiler is allowed to use, already formatted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct ResolvedRanges {
    from_event_time: Option<String>,
    to_event_time: Option<String>,
    severity: Option<(i32, i32)>,
}

impl ResolvedRanges {
    /// Only ranges enabled in the configuration are read. The upper time bound
    /// moves one second later so the given end second is included.
    fn resolve(
        ranges: &RangeInputs,
        configuration: &VisibilityConfiguration,
    ) -> Result<Self, QueryError> {
        let event_time = configuration.event_time_flags()?;
        let severity = configuration.severity_enabled()?;

        Ok(Self {
            from_event_time: event_time
                .from
                .then(|| format_timestamp(ranges.from_event_time)),
            to_event_time: event_time
                .to
                .then(|| format_timestamp(exclusive_upper_bound(ranges.to_event_time))),
            severity: severity.then_some((ranges.from_severity, ranges.to_severity)),
        })
    }
}

/// Upper time bound moved one second later; the last representable instant stays as is
fn exclusive_upper_bound(to: DateTime<Utc>) -> DateTime<Utc> {
    to.checked_add_signed(Duration::seconds(1)).unwrap_or_else(|| {
        warn!("ToEventTime {} is out of range, using it as the exclusive bound", to);
        to
    })
}

/// One OR-operand of a group clause
#[derive(Debug)]
enum Clause<'a> {
    Fragment(&'a str),
    /// Event time interval opened by `FromEventTime`, closed by a later `ToEventTime`
    TimeWindow { from: &'a str, to: Option<&'a str> },
    /// `ToEventTime` without an open window
    Before(&'a str),
    Severity(i32, i32),
}

impl Clause<'_> {
    fn render(&self, out: &mut String) {
        match self {
            Clause::Fragment(fragment) => out.push_str(fragment),
            Clause::TimeWindow { from, to: Some(to) } => {
                out.push_str(&format!("(Time >= \"{from}\" AND Time < \"{to}\")"))
            }
            Clause::TimeWindow { from, to: None } => {
                out.push_str(&format!("(Time >= \"{from}\")"))
            }
            Clause::Before(to) => out.push_str(&format!("(Time < \"{to}\")")),
            Clause::Severity(from, to) => {
                out.push_str(&format!("(Severity >= {from} AND Severity <= {to})"))
            }
        }
    }
}

/// Compile the checked filters into a single alarm query.
///
/// Checked filters are grouped by attribute in first-checked order. Filters
/// of one attribute are joined with OR, and groups are joined with AND. A
/// group with two or more clauses is parenthesized.
pub fn compile(
    filters: &[Filter],
    ranges: &RangeInputs,
    configuration: &VisibilityConfiguration,
) -> Result<String, QueryError> {
    let resolved = ResolvedRanges::resolve(ranges, configuration)?;

    let mut attributes: Vec<FilterAttribute> = Vec::new();
    for filter in filters.iter().filter(|filter| filter.checked) {
        if !attributes.contains(&filter.attribute) {
            attributes.push(filter.attribute);
        }
    }

    let mut groups = Vec::with_capacity(attributes.len());
    for attribute in attributes {
        let group = build_group(attribute, filters, &resolved)?;
        if !group.is_empty() {
            groups.push(group);
        }
    }

    let mut query = String::from(BASE_QUERY);
    if !groups.is_empty() {
        query.push_str(WHERE);
        query.push_str(&groups.join(AND));
    }
    Ok(query)
}

fn build_group(
    attribute: FilterAttribute,
    filters: &[Filter],
    resolved: &ResolvedRanges,
) -> Result<String, QueryError> {
    let mut clauses: Vec<Clause<'_>> = Vec::new();
    let mut open_window: Option<usize> = None;

    for filter in filters
        .iter()
        .filter(|filter| filter.checked && filter.attribute == attribute)
    {
        match &filter.kind {
            FilterKind::Toggle { fragment } if fragment.is_empty() => {
                return Err(FilterError::EmptyFragment {
                    attribute: attribute.to_string(),
                    name: filter.name.clone(),
                }
                .into());
            }
            FilterKind::Toggle { fragment } => clauses.push(Clause::Fragment(fragment)),
            FilterKind::Range(RangeBound::FromEventTime) => {
                let from = range_value(&resolved.from_event_time, filter)?;
                open_window = Some(clauses.len());
                clauses.push(Clause::TimeWindow { from, to: None });
            }
            FilterKind::Range(RangeBound::ToEventTime) => {
                let to = range_value(&resolved.to_event_time, filter)?;
                match open_window.take().and_then(|index| clauses.get_mut(index)) {
                    Some(Clause::TimeWindow { to: slot, .. }) => *slot = Some(to),
                    _ => clauses.push(Clause::Before(to)),
                }
            }
            FilterKind::Range(RangeBound::Severity) => {
                let (from, to) = resolved
                    .severity
                    .ok_or_else(|| FilterError::RangeDisabled(filter.name.clone()))?;
                clauses.push(Clause::Severity(from, to));
            }
        }
    }

    let mut group = String::new();
    for (index, clause) in clauses.iter().enumerate() {
        if index > 0 {
            group.push_str(OR);
        }
        clause.render(&mut group);
    }

    if clauses.len() >= 2 {
        group.insert(0, '(');
        group.push(')');
    }
    Ok(group)
}

fn range_value<'a>(value: &'a Option<String>, filter: &Filter) -> Result<&'a str, FilterError> {
    value
        .as_deref()
        .ok_or_else(|| FilterError::RangeDisabled(filter.name.clone()))
}

/// UTC round-trip timestamp with seven fractional digits, e.g. `2024-01-01T00:00:00.0000000Z`
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    format!(
        "{}.{:07}Z",
        timestamp.format("%Y-%m-%dT%H:%M:%S"),
        timestamp.nanosecond() % 1_000_000_000 / 100
    )
}
