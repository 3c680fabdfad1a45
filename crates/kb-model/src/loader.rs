//! CSV recipe catalog loader.
//!
//! # CSV format
//!
//! One row per recipe step, in chain order.  Rows for one recipe need not be
//! contiguous but must agree on `name` and `time_limit`.
//!
//! ```csv
//! recipe,name,time_limit,task_kind,station,duration,ingredients,description
//! toast,Toast,30,retrieve_ingredients,storage,,bread;butter,Get bread
//! toast,Toast,30,bake,oven,6,,Toast the bread
//! toast,Toast,30,plate,counter,,,Plate the toast
//! ```
//!
//! | Column        | Meaning                                                  |
//! |---------------|----------------------------------------------------------|
//! | `task_kind`   | snake_case `TaskKind` (`chop`, `cook_rice`, ...)         |
//! | `station`     | snake_case `StationKind` (`cutting_board`, `sink`, ...)  |
//! | `duration`    | ticks; empty means the kind's standard duration          |
//! | `ingredients` | `;`-separated list; empty for non-retrieval steps        |
//!
//! Recipes appear in the catalog in order of first appearance.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use kb_core::{StationKind, TaskKind};

use crate::recipe::{Recipe, RecipeCatalog};
use crate::task::TaskTemplate;
use crate::ModelError;

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct TaskRecord {
    recipe:      String,
    name:        String,
    time_limit:  u32,
    task_kind:   String,
    station:     String,
    duration:    Option<u32>,
    ingredients: Option<String>,
    description: Option<String>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a [`RecipeCatalog`] from a CSV file.
pub fn load_catalog_csv(path: &Path) -> Result<RecipeCatalog, ModelError> {
    let file = std::fs::File::open(path).map_err(ModelError::Io)?;
    load_catalog_reader(file)
}

/// Like [`load_catalog_csv`] but accepts any `Read` source.
pub fn load_catalog_reader<R: Read>(reader: R) -> Result<RecipeCatalog, ModelError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut recipes: Vec<Recipe> = Vec::new();

    for (line, result) in csv_reader.deserialize::<TaskRecord>().enumerate() {
        let row = result.map_err(|e| ModelError::Parse(e.to_string()))?;
        let template = parse_step(&row).map_err(|e| match e {
            ModelError::Core(inner) => ModelError::Parse(format!("row {}: {inner}", line + 1)),
            other => other,
        })?;

        match recipes.iter_mut().find(|r| r.key == row.recipe) {
            Some(existing) => {
                if existing.time_limit != row.time_limit || existing.name != row.name {
                    return Err(ModelError::Parse(format!(
                        "row {}: recipe {:?} redeclared with a different name or time_limit",
                        line + 1,
                        row.recipe
                    )));
                }
                existing.push_step(template);
            }
            None => {
                let recipe = Recipe::new(row.recipe.as_str(), row.name.as_str(), row.time_limit);
                recipes.push(recipe.step(template));
            }
        }
    }

    if recipes.is_empty() {
        return Err(ModelError::EmptyCatalog);
    }
    Ok(RecipeCatalog::new(recipes))
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_step(row: &TaskRecord) -> Result<TaskTemplate, ModelError> {
    let kind: TaskKind = row.task_kind.parse()?;
    let station: StationKind = row.station.parse()?;

    let mut template = TaskTemplate::new(kind, station);
    if let Some(duration) = row.duration {
        template = template.with_duration(duration);
    }
    if let Some(list) = row.ingredients.as_deref() {
        template = template.with_ingredients(
            list.split(';').map(str::trim).filter(|s| !s.is_empty()),
        );
    }
    if let Some(desc) = row.description.as_deref() {
        template = template.describe(desc.trim());
    }
    Ok(template)
}
