//! Recipes and the recipe catalog.
//!
//! The catalog is read-only for the whole run.  Orders copy templates out of
//! it; nothing ever writes back.

use kb_core::{SimRng, StationKind, TaskKind};

use crate::task::TaskTemplate;

// ── Recipe ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Recipe {
    /// Catalog key, e.g. `"grilled_chicken"`.
    pub key: String,
    /// Display name, e.g. `"Grilled Chicken Plate"`.
    pub name: String,
    /// Ordered task chain.
    pub tasks: Vec<TaskTemplate>,
    pub ingredients: Vec<String>,
    /// Ticks allowed from order creation to completion.
    pub time_limit: u32,
}

impl Recipe {
    pub fn new(key: impl Into<String>, name: impl Into<String>, time_limit: u32) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            tasks: Vec::new(),
            ingredients: Vec::new(),
            time_limit,
        }
    }

    /// Append a step.  Ingredients of retrieval steps are folded into the
    /// recipe's ingredient list.
    pub fn push_step(&mut self, template: TaskTemplate) {
        for ingredient in &template.ingredients {
            if !self.ingredients.contains(ingredient) {
                self.ingredients.push(ingredient.clone());
            }
        }
        self.tasks.push(template);
    }

    /// Builder form of [`push_step`](Self::push_step).
    pub fn step(mut self, template: TaskTemplate) -> Self {
        self.push_step(template);
        self
    }

    /// Number of steps.
    pub fn complexity(&self) -> usize {
        self.tasks.len()
    }
}

// ── RecipeCatalog ─────────────────────────────────────────────────────────────

/// Ordered set of recipes, looked up by key.
#[derive(Clone, Debug, Default)]
pub struct RecipeCatalog {
    recipes: Vec<Recipe>,
}

impl RecipeCatalog {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self { recipes }
    }

    /// The six-dish brigade menu.
    pub fn standard() -> Self {
        use StationKind as S;
        use TaskKind as T;

        let retrieve = |items: &[&str], what: &str| {
            TaskTemplate::new(T::RetrieveIngredients, S::Storage)
                .with_ingredients(items.iter().copied())
                .describe(format!("Get {what} ingredients from storage"))
        };
        let at = |kind: TaskKind, station: StationKind, desc: &str| {
            TaskTemplate::new(kind, station).describe(desc)
        };

        let burger = Recipe::new("burger", "Burger Meal", 50)
            .step(retrieve(&["bun", "patty", "lettuce", "tomato"], "burger"))
            .step(at(T::Chop, S::CuttingBoard, "Chop vegetables (lettuce, tomato)"))
            .step(at(T::Grill, S::Stove, "Grill the patty"))
            .step(at(T::Assemble, S::Counter, "Assemble the burger"))
            .step(at(T::Plate, S::Counter, "Plate the burger meal"));

        let pasta = Recipe::new("pasta", "Pasta Dish", 60)
            .step(retrieve(&["pasta", "sauce", "bell_pepper", "onion"], "pasta"))
            .step(at(T::Chop, S::CuttingBoard, "Chop vegetables"))
            .step(at(T::Cook, S::Stove, "Cook pasta"))
            .step(at(T::Saute, S::Stove, "Saute vegetables"))
            .step(at(T::Assemble, S::Counter, "Assemble the dish"))
            .step(at(T::Plate, S::Counter, "Plate the pasta dish"));

        let pizza = Recipe::new("pizza", "Pizza", 55)
            .step(retrieve(&["dough", "cheese", "sauce", "pepperoni", "mushrooms"], "pizza"))
            .step(at(T::Chop, S::CuttingBoard, "Chop toppings"))
            .step(at(T::Prepare, S::Counter, "Prepare pizza"))
            .step(at(T::Bake, S::Oven, "Bake pizza in oven"))
            .step(at(T::Plate, S::Counter, "Plate the pizza"));

        let salad = Recipe::new("salad", "Salad", 45)
            .step(retrieve(&["lettuce", "tomato", "cucumber", "dressing"], "salad"))
            .step(at(T::Chop, S::CuttingBoard, "Chop vegetables"))
            .step(at(T::Chop, S::CuttingBoard, "Chop more vegetables"))
            .step(at(T::Assemble, S::Counter, "Assemble salad"))
            .step(at(T::Plate, S::Counter, "Plate the salad"));

        let grilled_chicken = Recipe::new("grilled_chicken", "Grilled Chicken Plate", 70)
            .step(retrieve(&["chicken_breast", "broccoli", "carrots", "rice"], "chicken"))
            .step(at(T::Chop, S::CuttingBoard, "Chop vegetables"))
            .step(at(T::Grill, S::Stove, "Grill chicken"))
            .step(at(T::CookRice, S::Stove, "Cook rice"))
            .step(at(T::Saute, S::Stove, "Saute vegetables"))
            .step(at(T::Assemble, S::Counter, "Assemble plate"))
            .step(at(T::Plate, S::Counter, "Plate the dish"));

        let casserole = Recipe::new("casserole", "Baked Casserole", 65)
            .step(retrieve(&["pasta", "cheese", "spinach", "mushrooms", "cream_sauce"], "casserole"))
            .step(at(T::Chop, S::CuttingBoard, "Chop vegetables"))
            .step(at(T::Cook, S::Stove, "Cook pasta"))
            .step(at(T::Prepare, S::Counter, "Prepare casserole"))
            .step(at(T::Bake, S::Oven, "Bake casserole in oven"))
            .step(at(T::Plate, S::Counter, "Plate the casserole"));

        Self::new(vec![burger, pasta, pizza, salad, grilled_chicken, casserole])
    }

    pub fn get(&self, key: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.key == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.recipes.iter().map(|r| r.key.as_str())
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Uniformly random recipe.  `None` only for an empty catalog.
    pub fn choose(&self, rng: &mut SimRng) -> Option<&Recipe> {
        rng.choose(&self.recipes)
    }
}
