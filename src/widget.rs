use crate::edit_model::{EditModelNames, EditModelStore};
use crate::error::Result;
use crate::filter::FilterSet;
use crate::query::{QueryBuilder, QuerySink};
use crate::translate::Translate;
use crate::visibility::VisibilityConfiguration;

/// Startup query of the alarm widget.
///
/// Reconciles the edit model, rebuilds the filters from the stored values and
/// publishes the compiled query before any filter panel is opened.
pub fn prepare_query(
    configuration: &VisibilityConfiguration,
    edit_models: &mut EditModelStore,
    names: &EditModelNames,
    translator: &dyn Translate,
    sink: &mut dyn QuerySink,
) -> Result<String> {
    edit_models.create(names, configuration)?;
    let filters = FilterSet::from_edit_model(edit_models.get(&names.edit_model)?, translator);

    let mut builder = QueryBuilder::new();
    builder.build(&filters, configuration)?;
    builder.refresh(sink);
    Ok(builder.query().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit_model::PropertyValue;
    use crate::query::{BASE_QUERY, CurrentQuery};
    use crate::translate::NoTranslation;

    #[test]
    fn test_prepare_query_uses_stored_values() {
        let configuration = VisibilityConfiguration::builtin();
        let names = EditModelNames::new("DefaultFiltersToggle", "AlarmWidget");
        let mut store = EditModelStore::new();
        let mut sink = CurrentQuery::new();

        let query =
            prepare_query(&configuration, &mut store, &names, &NoTranslation, &mut sink).unwrap();
        assert_eq!(query, BASE_QUERY);

        store
            .get_mut("DefaultFiltersToggle")
            .unwrap()
            .set_value("Inhibit", "Disabled", PropertyValue::Boolean(true))
            .unwrap();
        let query =
            prepare_query(&configuration, &mut store, &names, &NoTranslation, &mut sink).unwrap();

        assert_eq!(query, "SELECT * FROM Model WHERE EnabledState.Id = 0");
        assert_eq!(sink.value(), query);
        assert_eq!(sink.executions(), 2);
    }
}
