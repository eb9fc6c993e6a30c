//! Export rows for grouped order lines.
//!
//! The sheet layout is:
//!
//! ```text
//! title
//! metadata rows           (label, value)
//! per group, separated by a blank row:
//!   group header          (option type name)
//!   column header         #, Option Name, one label per key
//!   item rows             index, option name, one cell per key
//!   total row             "", total label, total or "-" per key
//!                         (only when some key of the group has a total)
//! blank row + summary rows (label, value), when a summary is given
//! ```

use crate::cell::{Cell, Row};
use crate::settings::ExportSettings;
use indexmap::IndexMap;
use orderdoc_specs::{Totals, aggregate_groups};
use orderdoc_types::{ItemGroups, OptionItem, SpecCatalog, group_by_type};

/// Title used when the settings do not name one.
pub const DEFAULT_TITLE: &str = "Order Export";
pub const INDEX_HEADER: &str = "#";
pub const OPTION_NAME_HEADER: &str = "Option Name";

/// Order lines grouped by type, with the keys and totals of each group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupedOrder {
    pub groups: ItemGroups,
    pub keys: IndexMap<String, Vec<String>>,
    pub totals: IndexMap<String, Totals>,
}

impl GroupedOrder {
    /// Group `items`, merge each group's definitions against `catalog` and
    /// total every group key. Shown keys follow the configured columns.
    pub fn new(items: &[OptionItem], catalog: &SpecCatalog, settings: &ExportSettings) -> Self {
        let groups = group_by_type(items);
        let mut keys = IndexMap::new();
        let mut totals = IndexMap::new();
        for (type_id, aggregate) in aggregate_groups(&groups, catalog) {
            keys.insert(type_id.clone(), settings.select_keys(&aggregate.keys));
            totals.insert(type_id, aggregate.totals);
        }
        Self {
            groups,
            keys,
            totals,
        }
    }

    pub fn rows(&self, builder: &RowBuilder<'_>) -> Vec<Row> {
        builder.build(&self.groups, &self.keys, &self.totals)
    }

    pub fn group_rows(&self, builder: &RowBuilder<'_>) -> Vec<GroupRows> {
        builder.group_rows(&self.groups, &self.keys, &self.totals)
    }
}

/// The rows of one group, before flattening into a sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupRows {
    pub type_id: String,
    pub header: String,
    pub columns: Row,
    pub items: Vec<Row>,
    pub total: Option<Row>,
}

impl GroupRows {
    /// Build the rows for one group.
    ///
    /// `totals` holds the group's totals by key; keys missing from it have no
    /// total.
    pub fn build(
        type_id: &str,
        items: &[OptionItem],
        keys: &[String],
        totals: Option<&Totals>,
        settings: &ExportSettings,
    ) -> Self {
        let header = items
            .first()
            .map(|item| item.option_type_name.as_str())
            .filter(|name| !name.is_empty())
            .unwrap_or(type_id)
            .to_string();

        let mut columns = vec![Cell::text(INDEX_HEADER), Cell::text(OPTION_NAME_HEADER)];
        columns.extend(keys.iter().map(|key| Cell::text(settings.label_for(key))));

        let item_rows = items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let mut row = vec![Cell::Number((index + 1) as f64), Cell::text(&item.option_name)];
                row.extend(keys.iter().map(|key| {
                    Cell::for_value(
                        item.value(key),
                        &settings.file_marker,
                        &settings.missing_marker,
                    )
                }));
                row
            })
            .collect();

        let key_totals: Vec<Option<f64>> = keys
            .iter()
            .map(|key| totals.and_then(|t| t.get(key).copied().flatten()))
            .collect();
        let total = key_totals.iter().any(Option::is_some).then(|| {
            let mut row = vec![Cell::Empty, Cell::text(&settings.total_label)];
            row.extend(key_totals.iter().map(|t| Cell::for_total(*t)));
            row
        });

        GroupRows {
            type_id: type_id.to_string(),
            header,
            columns,
            items: item_rows,
            total,
        }
    }

    /// Header, columns, items and total, in sheet order.
    pub fn into_rows(self) -> Vec<Row> {
        let mut rows = Vec::with_capacity(self.items.len() + 3);
        rows.push(vec![Cell::Text(self.header)]);
        rows.push(self.columns);
        rows.extend(self.items);
        rows.extend(self.total);
        rows
    }
}

/// Builds a complete export sheet.
#[derive(Debug, Clone)]
pub struct RowBuilder<'a> {
    settings: &'a ExportSettings,
    title: Option<String>,
    metadata: Vec<(String, String)>,
    summary: Vec<(String, Cell)>,
}

impl<'a> RowBuilder<'a> {
    pub fn new(settings: &'a ExportSettings) -> Self {
        Self {
            settings,
            title: None,
            metadata: Vec::new(),
            summary: Vec::new(),
        }
    }

    /// Override the title from the settings.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Add a metadata row under the title (order id, customer, timestamp).
    pub fn metadata(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.push((label.into(), value.into()));
        self
    }

    /// Add a trailing summary row.
    pub fn summary(mut self, label: impl Into<String>, value: Cell) -> Self {
        self.summary.push((label.into(), value));
        self
    }

    /// The rows of every group, in group order.
    pub fn group_rows(
        &self,
        groups: &ItemGroups,
        keys_per_group: &IndexMap<String, Vec<String>>,
        totals: &IndexMap<String, Totals>,
    ) -> Vec<GroupRows> {
        groups
            .iter()
            .map(|(type_id, items)| {
                let keys = keys_per_group.get(type_id).map_or(&[][..], Vec::as_slice);
                GroupRows::build(type_id, items, keys, totals.get(type_id), self.settings)
            })
            .collect()
    }

    pub fn build(
        &self,
        groups: &ItemGroups,
        keys_per_group: &IndexMap<String, Vec<String>>,
        totals: &IndexMap<String, Totals>,
    ) -> Vec<Row> {
        let title = self
            .title
            .as_deref()
            .or(self.settings.title.as_deref())
            .unwrap_or(DEFAULT_TITLE);

        let mut rows = vec![vec![Cell::text(title)]];
        rows.extend(
            self.metadata
                .iter()
                .map(|(label, value)| vec![Cell::text(label), Cell::text(value)]),
        );

        for (index, group) in self
            .group_rows(groups, keys_per_group, totals)
            .into_iter()
            .enumerate()
        {
            if index > 0 {
                rows.push(Row::new());
            }
            rows.extend(group.into_rows());
        }

        if !self.summary.is_empty() {
            rows.push(Row::new());
            rows.extend(
                self.summary
                    .iter()
                    .map(|(label, value)| vec![Cell::text(label), value.clone()]),
            );
        }

        tracing::debug!(groups = groups.len(), rows = rows.len(), "Built export rows");
        rows
    }
}

/// Build the export rows for `groups` with no metadata or summary.
pub fn build_rows(
    groups: &ItemGroups,
    keys_per_group: &IndexMap<String, Vec<String>>,
    totals: &IndexMap<String, Totals>,
    settings: &ExportSettings,
) -> Vec<Row> {
    RowBuilder::new(settings).build(groups, keys_per_group, totals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::row_strings;
    use orderdoc_types::SpecValue;
    use pretty_assertions::assert_eq;

    fn item(name: &str, values: &[(&str, SpecValue)]) -> OptionItem {
        OptionItem {
            id: name.into(),
            option_type_id: "paper".into(),
            option_type_name: "Paper".into(),
            option_id: name.into(),
            option_name: name.into(),
            specification_values: values
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        }
    }

    #[test]
    fn test_group_rows_without_totals() {
        let items = vec![item("A", &[("finish", SpecValue::text("matte"))])];
        let keys = vec!["finish".to_string(), "gsm".to_string()];
        let totals: Totals = [("finish".to_string(), None)].into_iter().collect();

        let group = GroupRows::build("paper", &items, &keys, Some(&totals), &ExportSettings::default());

        assert_eq!(group.header, "Paper");
        assert_eq!(row_strings(&group.columns), vec!["#", "Option Name", "finish", "gsm"]);
        assert_eq!(row_strings(&group.items[0]), vec!["1", "A", "matte", "N/A"]);
        assert_eq!(group.total, None);
    }

    #[test]
    fn test_blank_row_only_between_groups() {
        let mut second = item("B", &[]);
        second.option_type_id = "ink".into();
        second.option_type_name = String::new();

        let groups: ItemGroups = [
            ("paper".to_string(), vec![item("A", &[])]),
            ("ink".to_string(), vec![second]),
        ]
        .into_iter()
        .collect();

        let rows = build_rows(&groups, &IndexMap::new(), &IndexMap::new(), &ExportSettings::default());
        let text: Vec<Vec<String>> = rows.iter().map(|r| row_strings(r)).collect();

        assert_eq!(
            text,
            vec![
                vec!["Order Export"],
                vec!["Paper"],
                vec!["#", "Option Name"],
                vec!["1", "A"],
                vec![],
                vec!["ink"],
                vec!["#", "Option Name"],
                vec!["1", "B"],
            ]
        );
    }

    #[test]
    fn test_metadata_and_summary() {
        let groups: ItemGroups = [("paper".to_string(), vec![item("A", &[])])]
            .into_iter()
            .collect();
        let settings = ExportSettings::default();

        let rows = RowBuilder::new(&settings)
            .title("Work Order")
            .metadata("Order", "SO-1")
            .summary("Total Items", Cell::Number(1.0))
            .build(&groups, &IndexMap::new(), &IndexMap::new());

        assert_eq!(row_strings(&rows[0]), vec!["Work Order"]);
        assert_eq!(row_strings(&rows[1]), vec!["Order", "SO-1"]);
        assert_eq!(rows[rows.len() - 2], Row::new());
        assert_eq!(row_strings(&rows[rows.len() - 1]), vec!["Total Items", "1"]);
    }
}
