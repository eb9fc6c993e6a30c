//! Catalog sources of specification definitions.
//!
//! The three catalog record kinds carry definitions with different meaning
//! (live values, reusable bundles, type templates). [`SpecSource`] names each
//! kind explicitly so the merge never has to guess from a record's shape.

use orderdoc_types::{CatalogOption, OptionSpec, OptionType, SpecificationDefinition};

/// How a source's definitions combine with those already merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeRule {
    /// Introduces names with their values. A repeated name only fills in
    /// fields that are still undefined.
    Own,

    /// Adds new names; for known names replaces defined total settings
    /// (`includeInTotal`, `totalFormula`) and fills undefined fields.
    Overlay,

    /// Adds new names only.
    Fallback,
}

/// One source of specification definitions, in precedence order.
#[derive(Debug, Clone, Copy)]
pub enum SpecSource<'a> {
    /// The option's own `dimensions`.
    OptionDimensions(&'a [SpecificationDefinition]),

    /// The OptionSpec linked to the option, by `optionSpecId` or by the
    /// spec's `optionId`.
    LinkedOptionSpec(&'a OptionSpec),

    /// The first OptionSpec whose type matches the option's type.
    TypeOptionSpec(&'a OptionSpec),

    /// The OptionType template.
    OptionTypeTemplate(&'a OptionType),
}

impl<'a> SpecSource<'a> {
    pub fn rule(&self) -> MergeRule {
        match self {
            SpecSource::OptionDimensions(_) => MergeRule::Own,
            SpecSource::LinkedOptionSpec(_) | SpecSource::TypeOptionSpec(_) => MergeRule::Overlay,
            SpecSource::OptionTypeTemplate(_) => MergeRule::Fallback,
        }
    }

    pub fn specifications(&self) -> &'a [SpecificationDefinition] {
        match *self {
            SpecSource::OptionDimensions(specs) => specs,
            SpecSource::LinkedOptionSpec(spec) | SpecSource::TypeOptionSpec(spec) => {
                &spec.specifications
            }
            SpecSource::OptionTypeTemplate(option_type) => &option_type.specifications,
        }
    }

    /// Short name used in logs.
    pub fn kind_name(&self) -> &'static str {
        match self {
            SpecSource::OptionDimensions(_) => "dimensions",
            SpecSource::LinkedOptionSpec(_) => "linked-option-spec",
            SpecSource::TypeOptionSpec(_) => "type-option-spec",
            SpecSource::OptionTypeTemplate(_) => "option-type",
        }
    }
}

/// Collect the sources for `option` in precedence order.
///
/// - A missing `dimensions` array contributes nothing.
/// - The linked OptionSpec is found by `option_spec_id`, or failing that by
///   an OptionSpec whose `option_id` is the option's id. A dangling link is
///   skipped.
/// - The type-matched OptionSpec is only consulted when no linked spec was
///   found.
/// - Without an OptionType the chain simply ends early.
pub fn precedence_chain<'a>(
    option: &'a CatalogOption,
    option_specs: &'a [OptionSpec],
    option_type: Option<&'a OptionType>,
) -> Vec<SpecSource<'a>> {
    let mut chain = Vec::with_capacity(4);

    if let Some(dimensions) = option.dimensions.as_deref() {
        chain.push(SpecSource::OptionDimensions(dimensions));
    }

    let linked = option
        .option_spec_id
        .as_deref()
        .and_then(|id| option_specs.iter().find(|spec| spec.id == id))
        .or_else(|| {
            option_specs
                .iter()
                .find(|spec| spec.option_id.as_deref() == Some(option.id.as_str()))
        });

    match linked {
        Some(spec) => chain.push(SpecSource::LinkedOptionSpec(spec)),
        None => {
            if let Some(id) = option.option_spec_id.as_deref() {
                tracing::debug!(option = %option.id, option_spec = id, "Linked option spec not found");
            }
            if let Some(spec) = option_specs
                .iter()
                .find(|spec| spec.option_type_id == option.option_type_id)
            {
                chain.push(SpecSource::TypeOptionSpec(spec));
            }
        }
    }

    if let Some(option_type) = option_type {
        chain.push(SpecSource::OptionTypeTemplate(option_type));
    }

    chain
}
