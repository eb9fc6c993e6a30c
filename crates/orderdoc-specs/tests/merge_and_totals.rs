//! End-to-end checks of merging and totals against a small catalog.

use indexmap::IndexSet;
use orderdoc_specs::{
    CatalogMerge, commit_selection, compute_group_totals, compute_totals, group_definitions,
    group_keys, merge_specs, merge_with_catalog,
};
use orderdoc_types::{
    CatalogOption, DataType, OptionItem, OptionSpec, OptionType, SequentialIds, SpecCatalog,
    SpecValue, SpecificationDefinition,
};
use pretty_assertions::assert_eq;

fn def(name: &str) -> SpecificationDefinition {
    SpecificationDefinition::new(name)
}

fn catalog() -> SpecCatalog {
    serde_json::from_str(
        r#"{
        "options": [
            {"id": "steel-plate", "name": "Steel Plate", "optionTypeId": "material",
             "optionTypeName": "Material", "optionSpecId": "plate-spec",
             "dimensions": [
                {"name": "width", "dataType": "number", "value": 10},
                {"name": "thickness", "value": "2"}
             ]},
            {"id": "alu-plate", "name": "Aluminium Plate", "optionTypeId": "material",
             "optionTypeName": "Material",
             "dimensions": [{"name": "width", "value": 20}]},
            {"id": "laser", "name": "Laser Cut", "optionTypeId": "process",
             "optionTypeName": "Process", "optionSpecId": "does-not-exist"}
        ],
        "optionSpecs": [
            {"id": "plate-spec", "optionTypeId": "material", "specifications": [
                {"name": "width", "value": 999, "includeInTotal": false},
                {"name": "weight", "dataType": "number", "defaultValue": "0"}
            ]},
            {"id": "process-spec", "optionTypeId": "process", "specifications": [
                {"name": "minutes", "dataType": "number", "defaultValue": 15}
            ]}
        ],
        "optionTypes": [
            {"id": "material", "specifications": [
                {"name": "grade", "defaultValue": "A"},
                {"name": "width", "defaultValue": 1}
            ]},
            {"id": "process", "specifications": [{"name": "notes"}]}
        ]
    }"#,
    )
    .expect("catalog fixture should deserialize")
}

#[test]
fn test_linked_spec_keeps_value_and_adopts_include_in_total() {
    let catalog = catalog();
    let option = catalog.option("steel-plate").unwrap();

    let merged = merge_specs(option, &catalog.option_specs);
    let width = merged.get("width").unwrap();

    assert_eq!(width.value, Some(SpecValue::number(10.0)));
    assert_eq!(width.include_in_total, Some(false));
}

#[test]
fn test_merged_names_are_unique() {
    let catalog = catalog();
    for option in &catalog.options {
        let merged = merge_with_catalog(option, &catalog);
        let names: Vec<&str> = merged.names().collect();
        let unique: IndexSet<&str> = names.iter().copied().collect();
        assert_eq!(names.len(), unique.len(), "duplicates for {}", option.id);
    }
}

#[test]
fn test_full_precedence_order_with_catalog() {
    let catalog = catalog();
    let merged = merge_with_catalog(catalog.option("steel-plate").unwrap(), &catalog);

    let names: Vec<&str> = merged.names().collect();
    assert_eq!(names, vec!["width", "thickness", "weight", "grade"]);

    let values = merged.initial_values();
    assert_eq!(values["width"], SpecValue::number(10.0));
    assert_eq!(values["thickness"], SpecValue::text("2"));
    assert_eq!(values["weight"], SpecValue::text("0"));
    assert_eq!(values["grade"], SpecValue::text("A"));
}

#[test]
fn test_type_matched_spec_used_without_dimensions_or_link() {
    let option = CatalogOption {
        id: "bare".into(),
        option_type_id: "process".into(),
        ..CatalogOption::default()
    };
    let catalog = catalog();

    let merged = merge_specs(&option, &catalog.option_specs);
    assert!(merged.contains("minutes"));
}

#[test]
fn test_dangling_link_still_uses_type_matched_spec() {
    let catalog = catalog();
    let merged = merge_with_catalog(catalog.option("laser").unwrap(), &catalog);

    let names: Vec<&str> = merged.names().collect();
    assert_eq!(names, vec!["minutes", "notes"]);
    assert_eq!(merged.initial_values()["notes"], SpecValue::empty());
}

#[test]
fn test_committed_items_total_per_group() {
    let catalog = catalog();
    let mut ids = SequentialIds::default();

    let items: Vec<OptionItem> = [("steel-plate", "2"), ("alu-plate", "3.5"), ("alu-plate", "bad")]
        .into_iter()
        .map(|(option_id, weight)| {
            let option = catalog.option(option_id).unwrap();
            let merged = merge_with_catalog(option, &catalog);
            let mut item = commit_selection(option, &merged, Vec::new(), &mut ids);
            item.specification_values
                .insert("weight".into(), SpecValue::text(weight));
            item
        })
        .collect();

    assert_eq!(items[2].id, "item-3");

    let defs = group_definitions(&items, &catalog);
    let keys = group_keys(&items);
    let totals = compute_totals(&defs, &items, &keys);

    // width is excluded by the steel plate's linked spec, for the whole group
    assert_eq!(totals["width"], None);
    assert_eq!(totals["weight"], Some(5.5));
}

#[test]
fn test_include_in_total_toggles_weight_total() {
    let items: Vec<OptionItem> = ["2", "3.5", "bad"]
        .into_iter()
        .map(|w| OptionItem {
            specification_values: [("weight".to_string(), SpecValue::text(w))]
                .into_iter()
                .collect(),
            ..OptionItem::default()
        })
        .collect();
    let keys = vec!["weight".to_string()];

    for (include, expected) in [(true, Some(5.5)), (false, None)] {
        let spec = def("weight")
            .with_data_type(DataType::Number)
            .with_include_in_total(include);
        let defs = [(spec.name.clone(), spec)].into_iter().collect();
        assert_eq!(compute_totals(&defs, &items, &keys)["weight"], expected);
    }
}

#[test]
fn test_option_type_only_catalog() {
    let option = CatalogOption {
        id: "o".into(),
        option_type_id: "t".into(),
        option_type_ref: Some(OptionType {
            id: "t".into(),
            specifications: vec![def("colour").with_default_value("black")],
            ..OptionType::default()
        }),
        ..CatalogOption::default()
    };
    let no_specs: Vec<OptionSpec> = Vec::new();

    let merged = merge_specs(&option, &no_specs);
    assert_eq!(merged.initial_values()["colour"], SpecValue::text("black"));
}

#[test]
fn test_catalog_merge_for_and_group_totals() {
    let catalog = catalog();
    assert!(catalog.merge_for("missing").is_none());

    let merged = catalog.merge_for("alu-plate").unwrap();
    let names: Vec<&str> = merged.names().collect();
    assert_eq!(names, vec!["width", "weight", "grade"]);

    let mut ids = SequentialIds::new("line");
    let items: Vec<OptionItem> = [("20", "1"), ("30", "2")]
        .into_iter()
        .map(|(width, weight)| {
            let overrides = vec![
                ("width".to_string(), SpecValue::text(width)),
                ("weight".to_string(), SpecValue::text(weight)),
                ("colour".to_string(), SpecValue::text("red")),
            ];
            commit_selection(catalog.option("alu-plate").unwrap(), &merged, overrides, &mut ids)
        })
        .collect();

    assert_eq!(items[0].id, "line-1");
    assert!(items[0].value("colour").is_none());

    let totals = compute_group_totals(&items, &catalog);
    // the type-matched plate spec turns the width total off
    assert_eq!(totals["width"], None);
    assert_eq!(totals["weight"], Some(3.0));
    assert_eq!(totals["grade"], None);
}
