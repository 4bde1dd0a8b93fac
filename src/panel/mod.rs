//! Alarm filter panel
//!
//! The panel owns the generated controls, the filters bound to its
//! checkboxes and the live range values. It exposes the host operations
//! `filter`, `refresh`, `apply` and `clear_all`; `apply` and `clear_all`
//! persist the panel state into the edit model before refreshing the query.

pub mod controls;
pub mod layout;

pub use controls::ControlValues;
pub use layout::{Accordion, Control, PanelLayout};

use crate::edit_model::{EditModelNames, EditModelStore, InstanceTree, PropertyValue};
use crate::error::Result;
use crate::filter::names::{
    DATE_TIME_SUFFIX, EVENT_TIME, FROM_EVENT_TIME, FROM_EVENT_TIME_DATE_TIME, FROM_SEVERITY,
    SEVERITY, TO_EVENT_TIME, TO_EVENT_TIME_DATE_TIME, TO_SEVERITY,
};
use crate::filter::{
    DEFAULT_FROM_SEVERITY, DEFAULT_TO_SEVERITY, Filter, FilterAttribute, FilterError, FilterSet,
};
use crate::query::{QueryBuilder, QuerySink};
use crate::translate::Translate;
use crate::visibility::VisibilityConfiguration;
use chrono::Utc;
use log::warn;

pub struct AlarmFilterPanel<'a, S: QuerySink> {
    configuration: &'a VisibilityConfiguration,
    edit_models: &'a mut EditModelStore,
    edit_model: String,
    layout: PanelLayout,
    filters: FilterSet,
    controls: ControlValues,
    query: QueryBuilder,
    sink: S,
}

impl<'a, S: QuerySink> AlarmFilterPanel<'a, S> {
    /// Generate the panel and load its state from the edit model.
    ///
    /// The edit model is reconciled with the configuration first, so the
    /// panel never reads a stale schema.
    pub fn new(
        configuration: &'a VisibilityConfiguration,
        edit_models: &'a mut EditModelStore,
        names: &EditModelNames,
        translator: &dyn Translate,
        sink: S,
    ) -> Result<Self> {
        let layout = PanelLayout::generate(configuration, translator)?;

        let mut filters = FilterSet::new();
        for (attribute, control) in layout.controls() {
            filters.push(Filter::new(attribute, control.name(), false, translator));
        }

        edit_models.create(names, configuration)?;
        let controls = ControlValues::from_layout(&layout, Utc::now());

        let mut panel = Self {
            configuration,
            edit_models,
            edit_model: names.edit_model.clone(),
            layout,
            filters,
            controls,
            query: QueryBuilder::new(),
            sink,
        };

        panel.initialize_check_boxes()?;
        panel.initialize_date_time_pickers()?;
        panel.initialize_text_boxes()?;
        panel.expand_accordions();
        Ok(panel)
    }

    /// A checkbox was toggled in the UI
    pub fn filter(&mut self, name: &str) -> Result<()> {
        if !self.filters.contains_name(name) {
            warn!("Filter {} browse name not found", name);
        }
        self.refresh()
    }

    pub fn refresh(&mut self) -> Result<()> {
        self.filters.ranges = self.controls.range_inputs();
        self.query.build(&self.filters, self.configuration)?;
        self.query.refresh(&mut self.sink);
        Ok(())
    }

    pub fn apply(&mut self) -> Result<()> {
        self.save_all()?;
        self.refresh()
    }

    pub fn clear_all(&mut self) -> Result<()> {
        self.filters.clear_checked();
        self.save_all()?;
        self.refresh()
    }

    /// Check or uncheck a checkbox of the panel
    pub fn set_checked(
        &mut self,
        attribute: FilterAttribute,
        name: &str,
        checked: bool,
    ) -> Result<()> {
        let filter = self
            .filters
            .find_mut(attribute, name)
            .ok_or_else(|| not_found(attribute, name))?;
        filter.checked = checked;
        Ok(())
    }

    pub fn controls(&self) -> &ControlValues {
        &self.controls
    }

    pub fn controls_mut(&mut self) -> &mut ControlValues {
        &mut self.controls
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    pub fn layout(&self) -> &PanelLayout {
        &self.layout
    }

    pub fn query(&self) -> &str {
        self.query.query()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    fn instance(&self) -> Result<&InstanceTree> {
        Ok(self.edit_models.get(&self.edit_model)?)
    }

    fn instance_mut(&mut self) -> Result<&mut InstanceTree> {
        Ok(self.edit_models.get_mut(&self.edit_model)?)
    }

    fn initialize_check_boxes(&mut self) -> Result<()> {
        let instance = self.edit_models.get(&self.edit_model)?;
        for filter in self.filters.filters_mut() {
            filter.checked = instance.bool_value(filter.attribute.canonical_name(), &filter.name)?;
        }
        Ok(())
    }

    fn initialize_date_time_pickers(&mut self) -> Result<()> {
        let flags = self.configuration.event_time_flags()?;

        for (enabled, name) in [(flags.from, FROM_EVENT_TIME), (flags.to, TO_EVENT_TIME)] {
            if !enabled {
                continue;
            }

            let checked = self.checked(FilterAttribute::EventTime, name)?;
            let value = if checked {
                self.instance()?
                    .date_time_value(EVENT_TIME, &format!("{name}{DATE_TIME_SUFFIX}"))?
            } else {
                Utc::now()
            };
            self.controls.set_date_time(name, value);
        }
        Ok(())
    }

    fn initialize_text_boxes(&mut self) -> Result<()> {
        if !self.configuration.severity_enabled()? {
            return Ok(());
        }

        let (from, to) = if self.checked(FilterAttribute::Severity, SEVERITY)? {
            let instance = self.instance()?;
            (
                instance.u16_value(SEVERITY, FROM_SEVERITY)?.to_string(),
                instance.u16_value(SEVERITY, TO_SEVERITY)?.to_string(),
            )
        } else {
            (
                DEFAULT_FROM_SEVERITY.to_string(),
                DEFAULT_TO_SEVERITY.to_string(),
            )
        };

        self.controls.set_text(FROM_SEVERITY, from);
        self.controls.set_text(TO_SEVERITY, to);
        Ok(())
    }

    /// Accordions with a checked filter start expanded
    fn expand_accordions(&mut self) {
        for accordion in &mut self.layout.accordions {
            accordion.expanded = self
                .filters
                .checked()
                .any(|filter| filter.attribute == accordion.attribute);
        }
    }

    fn checked(&self, attribute: FilterAttribute, name: &str) -> Result<bool> {
        self.filters
            .find(attribute, name)
            .map(|filter| filter.checked)
            .ok_or_else(|| not_found(attribute, name).into())
    }

    fn save_all(&mut self) -> Result<()> {
        self.save_check_boxes()?;
        self.save_date_time_pickers()?;
        self.save_text_boxes()
    }

    fn save_check_boxes(&mut self) -> Result<()> {
        let instance = self.edit_models.get_mut(&self.edit_model)?;
        for filter in self.filters.filters() {
            instance.set_value(
                filter.attribute.canonical_name(),
                &filter.name,
                PropertyValue::Boolean(filter.checked),
            )?;
        }
        Ok(())
    }

    fn save_date_time_pickers(&mut self) -> Result<()> {
        let flags = self.configuration.event_time_flags()?;
        let now = Utc::now();

        for (enabled, picker, property) in [
            (flags.from, FROM_EVENT_TIME, FROM_EVENT_TIME_DATE_TIME),
            (flags.to, TO_EVENT_TIME, TO_EVENT_TIME_DATE_TIME),
        ] {
            if !enabled {
                continue;
            }
            let value = self.controls.date_time(picker).unwrap_or(now);
            self.instance_mut()?
                .set_value(EVENT_TIME, property, PropertyValue::DateTime(value))?;
        }
        Ok(())
    }

    fn save_text_boxes(&mut self) -> Result<()> {
        if !self.configuration.severity_enabled()? {
            return Ok(());
        }

        for name in [FROM_SEVERITY, TO_SEVERITY] {
            let value = self.controls.severity(name);
            self.instance_mut()?
                .set_value(SEVERITY, name, PropertyValue::UInt16(value))?;
        }
        Ok(())
    }
}

fn not_found(attribute: FilterAttribute, name: &str) -> FilterError {
    FilterError::NotFound {
        attribute: attribute.to_string(),
        name: name.to_string(),
    }
}
