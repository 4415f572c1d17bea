//! Catalog command: list the selectable options of each filter dimension.

use crate::cli::common::{print_json, CliResult};
use crate::models::{Catalog, CategoryNode, CategoryTree, Dimension};
use clap::Args;
use serde::Serialize;

/// List filter options
#[derive(Debug, Clone, Args)]
pub struct CatalogArgs {
    /// Only list this dimension
    #[arg(long, value_name = "DIMENSION")]
    pub dimension: Option<Dimension>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DimensionOutput<'a> {
    dimension: Dimension,
    #[serde(skip_serializing_if = "Option::is_none")]
    tree: Option<&'a CategoryTree>,
    options: Vec<&'a str>,
    free_form: bool,
}

impl CatalogArgs {
    /// Execute the catalog command
    pub fn execute(&self) -> CliResult<()> {
        let catalog = Catalog::standard();
        let dimensions: Vec<Dimension> = match self.dimension {
            Some(dimension) => vec![dimension],
            None => Dimension::ALL.to_vec(),
        };

        let outputs: Vec<DimensionOutput<'_>> = dimensions
            .into_iter()
            .map(|dimension| {
                let options = catalog.options(dimension);
                DimensionOutput {
                    dimension,
                    tree: catalog.tree(dimension),
                    free_form: options.is_none(),
                    options: options.unwrap_or_default(),
                }
            })
            .collect();

        if self.json {
            return print_json(&outputs);
        }

        for (index, output) in outputs.iter().enumerate() {
            if index > 0 {
                println!();
            }
            print_dimension(output);
        }

        Ok(())
    }
}

fn print_dimension(output: &DimensionOutput<'_>) {
    let (_, plural) = output.dimension.nouns();
    println!("{plural}");

    if output.free_form {
        println!("  (free-form values)");
        return;
    }

    let Some(tree) = output.tree else {
        for option in &output.options {
            println!("  {option}");
        }
        return;
    };

    for category in tree.categories() {
        println!("  {}", category.name);
        match &category.node {
            CategoryNode::Leaves(leaves) => {
                for leaf in leaves {
                    println!("    {leaf}");
                }
            }
            CategoryNode::Subcategories(subs) => {
                for sub in subs {
                    println!("    {}", sub.name);
                    for leaf in &sub.leaves {
                        println!("      {leaf}");
                    }
                }
            }
        }
    }
}
