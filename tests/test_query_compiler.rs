use alarm_filter::filter::FilterError;
use alarm_filter::query::QueryError;
use alarm_filter::{
    BASE_QUERY, Filter, FilterAttribute, FilterSet, NoTranslation, QueryBuilder, RangeInputs,
    TranslationTable, VisibilityConfiguration, compile,
};
use chrono::{DateTime, Utc};

fn at(timestamp: &str) -> DateTime<Utc> {
    timestamp.parse().unwrap()
}

fn filter(attribute: FilterAttribute, name: &str, checked: bool) -> Filter {
    Filter::new(attribute, name, checked, &NoTranslation)
}

fn ranges() -> RangeInputs {
    RangeInputs {
        from_event_time: at("2024-01-01T00:00:00Z"),
        to_event_time: at("2024-01-01T23:59:59Z"),
        from_severity: 100,
        to_severity: 500,
    }
}

#[test]
fn test_no_checked_filter_yields_base_query() {
    let config = VisibilityConfiguration::builtin();
    let filters = vec![
        filter(FilterAttribute::Priority, "Urgent", false),
        filter(FilterAttribute::Inhibit, "Enabled", false),
    ];

    assert_eq!(compile(&filters, &ranges(), &config).unwrap(), BASE_QUERY);
    assert_eq!(compile(&[], &ranges(), &config).unwrap(), BASE_QUERY);
}

#[test]
fn test_single_filters_of_two_attributes_are_joined_with_and() {
    let config = VisibilityConfiguration::builtin();
    let filters = vec![
        filter(FilterAttribute::Priority, "Urgent", true),
        filter(FilterAttribute::Inhibit, "Enabled", true),
    ];

    assert_eq!(
        compile(&filters, &ranges(), &config).unwrap(),
        "SELECT * FROM Model WHERE (Severity >= 751 AND Severity <= 1000) AND EnabledState.Id = 1"
    );
}

#[test]
fn test_filters_of_one_attribute_are_or_ed_and_parenthesized() {
    let mut config = VisibilityConfiguration::builtin();
    config.set_enabled("Class", None, true).unwrap();
    let filters = vec![
        filter(FilterAttribute::Class, "Process", true),
        filter(FilterAttribute::Class, "Safety", true),
        filter(FilterAttribute::Class, "Quality", true),
    ];

    assert_eq!(
        compile(&filters, &ranges(), &config).unwrap(),
        "SELECT * FROM Model WHERE (RAAlarmData.AlarmClass LIKE '%Process%' OR \
         RAAlarmData.AlarmClass LIKE '%Safety%' OR RAAlarmData.AlarmClass LIKE '%Quality%')"
    );
}

#[test]
fn test_event_time_bounds_merge_into_one_window() {
    let config = VisibilityConfiguration::builtin();
    let filters = vec![
        filter(FilterAttribute::EventTime, "FromEventTime", true),
        filter(FilterAttribute::EventTime, "ToEventTime", true),
    ];

    assert_eq!(
        compile(&filters, &ranges(), &config).unwrap(),
        "SELECT * FROM Model WHERE (Time >= \"2024-01-01T00:00:00.0000000Z\" AND \
         Time < \"2024-01-02T00:00:00.0000000Z\")"
    );
}

#[test]
fn test_single_time_bounds_render_alone() {
    let config = VisibilityConfiguration::builtin();

    let from_only = vec![filter(FilterAttribute::EventTime, "FromEventTime", true)];
    assert_eq!(
        compile(&from_only, &ranges(), &config).unwrap(),
        "SELECT * FROM Model WHERE (Time >= \"2024-01-01T00:00:00.0000000Z\")"
    );

    let to_only = vec![filter(FilterAttribute::EventTime, "ToEventTime", true)];
    assert_eq!(
        compile(&to_only, &ranges(), &config).unwrap(),
        "SELECT * FROM Model WHERE (Time < \"2024-01-02T00:00:00.0000000Z\")"
    );
}

#[test]
fn test_severity_range_uses_live_bounds() {
    let config = VisibilityConfiguration::builtin();
    let filters = vec![
        filter(FilterAttribute::Severity, "Severity", true),
        filter(FilterAttribute::AlarmStatus, "InAlarm", true),
    ];

    assert_eq!(
        compile(&filters, &ranges(), &config).unwrap(),
        "SELECT * FROM Model WHERE (Severity >= 100 AND Severity <= 500) AND ActiveState.Id = 1"
    );
}

#[test]
fn test_groups_follow_first_checked_order() {
    let config = VisibilityConfiguration::builtin();
    let filters = vec![
        filter(FilterAttribute::Inhibit, "Enabled", true),
        filter(FilterAttribute::Priority, "Low", true),
        filter(FilterAttribute::Inhibit, "Suppressed", true),
    ];

    assert_eq!(
        compile(&filters, &ranges(), &config).unwrap(),
        "SELECT * FROM Model WHERE (EnabledState.Id = 1 OR SuppressedState.Id = 1) AND \
         (Severity >= 1 AND Severity <= 250)"
    );
}

#[test]
fn test_compile_is_deterministic() {
    let config = VisibilityConfiguration::builtin();
    let filters = vec![
        filter(FilterAttribute::AlarmState, "HighState", true),
        filter(FilterAttribute::AlarmState, "LowState", true),
        filter(FilterAttribute::EventTime, "FromEventTime", true),
    ];

    let first = compile(&filters, &ranges(), &config).unwrap();
    let second = compile(&filters, &ranges(), &config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_translated_names_reach_generated_conditions() {
    let mut translations = TranslationTable::default();
    translations.insert("HighState", "Alto");
    translations.insert("HighHighState", "Altissimo");
    let config = VisibilityConfiguration::builtin();
    let filters = vec![Filter::new(
        FilterAttribute::AlarmState,
        "HighState",
        true,
        &translations,
    )];

    assert_eq!(
        compile(&filters, &ranges(), &config).unwrap(),
        "SELECT * FROM Model WHERE CurrentState IN ('Alto','Altissimo Alto')"
    );
}

#[test]
fn test_unknown_alarm_state_is_an_error() {
    let config = VisibilityConfiguration::builtin();
    let filters = vec![filter(FilterAttribute::AlarmState, "SomewhereState", true)];

    let result = compile(&filters, &ranges(), &config);
    assert!(matches!(
        result,
        Err(QueryError::Filter(FilterError::EmptyFragment { .. }))
    ));
}

#[test]
fn test_checked_range_with_disabled_bound_is_an_error() {
    let mut config = VisibilityConfiguration::builtin();
    config
        .set_enabled("EventTime", Some("ToEventTime"), false)
        .unwrap();
    let filters = vec![filter(FilterAttribute::EventTime, "ToEventTime", true)];

    let result = compile(&filters, &ranges(), &config);
    assert!(matches!(
        result,
        Err(QueryError::Filter(FilterError::RangeDisabled(_)))
    ));
}

#[test]
fn test_builder_keeps_last_query() {
    let config = VisibilityConfiguration::builtin();
    let mut set = FilterSet::new();
    set.push(filter(FilterAttribute::Inhibit, "Disabled", true));
    set.ranges = ranges();

    let mut builder = QueryBuilder::new();
    assert_eq!(builder.query(), BASE_QUERY);
    builder.build(&set, &config).unwrap();
    assert_eq!(builder.query(), "SELECT * FROM Model WHERE EnabledState.Id = 0");
}
