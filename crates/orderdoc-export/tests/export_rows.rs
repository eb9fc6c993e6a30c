//! Sheet layout checks against a small catalog.

use indexmap::IndexMap;
use orderdoc_export::{
    Cell, ColumnSpec, ExportSettings, GroupedOrder, OrderSummary, RowBuilder, build_rows,
    row_strings,
};
use orderdoc_specs::{Totals, compute_totals};
use orderdoc_types::{
    CatalogOption, DataType, FileReference, OptionItem, SpecCatalog, SpecValue,
    SpecificationDefinition, group_by_type,
};
use pretty_assertions::assert_eq;

fn item(id: &str, name: &str, values: &[(&str, SpecValue)]) -> OptionItem {
    OptionItem {
        id: id.into(),
        option_type_id: "material".into(),
        option_type_name: "Material".into(),
        option_id: "steel".into(),
        option_name: name.into(),
        specification_values: values
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect(),
    }
}

fn catalog() -> SpecCatalog {
    SpecCatalog::new(
        vec![CatalogOption {
            id: "steel".into(),
            name: "Steel".into(),
            option_type_id: "material".into(),
            option_type_name: "Material".into(),
            dimensions: Some(vec![
                SpecificationDefinition::new("weight").with_data_type(DataType::Number),
                SpecificationDefinition::new("drawing").with_data_type(DataType::File),
                SpecificationDefinition::new("finish"),
            ]),
            ..CatalogOption::default()
        }],
        vec![],
        vec![],
    )
}

fn drawing() -> SpecValue {
    SpecValue::from(FileReference {
        name: "plate.dxf".into(),
        url: "https://files.example/plate.dxf".into(),
        mime_type: None,
        size: None,
    })
}

#[test]
fn test_single_group_row_shape() {
    let items = vec![
        item("1", "Plate A", &[("weight", SpecValue::text("2"))]),
        item("2", "Plate B", &[("weight", SpecValue::text("3.5"))]),
    ];
    let groups = group_by_type(&items);
    let keys: IndexMap<String, Vec<String>> =
        [("material".to_string(), vec!["weight".to_string()])]
            .into_iter()
            .collect();
    let definitions = [(
        "weight".to_string(),
        SpecificationDefinition::new("weight").with_data_type(DataType::Number),
    )]
    .into_iter()
    .collect();
    let totals: IndexMap<String, Totals> = [(
        "material".to_string(),
        compute_totals(&definitions, &items, &keys["material"]),
    )]
    .into_iter()
    .collect();

    let rows = build_rows(&groups, &keys, &totals, &ExportSettings::default());

    let text: Vec<Vec<String>> = rows.iter().map(|r| row_strings(r)).collect();
    assert_eq!(
        text,
        vec![
            vec!["Order Export"],
            vec!["Material"],
            vec!["#", "Option Name", "weight"],
            vec!["1", "Plate A", "2"],
            vec!["2", "Plate B", "3.5"],
            vec!["", "TOTAL", "5.5"],
        ]
    );
    assert_eq!(rows[5][2], Cell::Number(5.5));
}

#[test]
fn test_file_and_missing_markers_with_catalog() {
    let items = vec![
        item(
            "1",
            "Plate A",
            &[
                ("weight", SpecValue::text("bad")),
                ("drawing", drawing()),
                ("finish", SpecValue::text("")),
            ],
        ),
        item("2", "Plate B", &[("weight", SpecValue::number(4.0))]),
    ];
    let settings = ExportSettings::default();
    let grouped = GroupedOrder::new(&items, &catalog(), &settings);

    let rows = grouped.rows(&RowBuilder::new(&settings));
    let text: Vec<Vec<String>> = rows.iter().map(|r| row_strings(r)).collect();

    assert_eq!(text[2], vec!["#", "Option Name", "weight", "drawing", "finish"]);
    assert_eq!(text[3], vec!["1", "Plate A", "bad", "File", "N/A"]);
    assert_eq!(text[4], vec!["2", "Plate B", "4", "N/A", "N/A"]);
    assert_eq!(text[5], vec!["", "TOTAL", "4", "-", "-"]);
}

#[test]
fn test_configured_columns_and_summary() {
    let items = vec![
        item(
            "1",
            "Plate A",
            &[("weight", SpecValue::text("2")), ("quantity", SpecValue::text("3"))],
        ),
        item("2", "Plate B", &[("quantity", SpecValue::text("4"))]),
    ];
    let settings = ExportSettings {
        title: Some("Cutting list".into()),
        columns: vec![
            ColumnSpec::new("quantity").with_label("Qty"),
            ColumnSpec::new("finish"),
        ],
        ..ExportSettings::default()
    };
    let grouped = GroupedOrder::new(&items, &catalog(), &settings);
    let summary = OrderSummary::from_items(&items, &settings.quantity_key);

    let builder = summary.add_rows(
        RowBuilder::new(&settings)
            .metadata("Order", "SO-5")
            .metadata("Customer", "ACME"),
    );
    let rows = grouped.rows(&builder);
    let text: Vec<Vec<String>> = rows.iter().map(|r| row_strings(r)).collect();

    insta::assert_debug_snapshot!(text, @r##"
    [
        [
            "Cutting list",
        ],
        [
            "Order",
            "SO-5",
        ],
        [
            "Customer",
            "ACME",
        ],
        [
            "Material",
        ],
        [
            "#",
            "Option Name",
            "Qty",
            "finish",
        ],
        [
            "1",
            "Plate A",
            "3",
            "N/A",
        ],
        [
            "2",
            "Plate B",
            "4",
            "N/A",
        ],
        [
            "",
            "TOTAL",
            "7",
            "-",
        ],
        [],
        [
            "Total Items",
            "2",
        ],
        [
            "Total Quantity",
            "7",
        ],
    ]
    "##);
}
