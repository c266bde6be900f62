//! Dish catalog.
//!
//! Immutable in-memory table of dishes, built and validated once at startup and
//! shared read-only by every request.

mod builtin;
mod dish;
mod error;

pub use dish::*;
pub use error::*;

use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// Maximum number of related dishes a single dish may list.
pub const MAX_RECOMMENDATIONS: usize = 2;

/// The read-only menu.
///
/// Lookups are by exact dish name; iteration follows insertion order, which
/// also defines tie-breaks and the terminal fallback (the first dish).
///
/// # Examples
///
/// ```
/// use dishpick::catalog::Catalog;
///
/// let catalog = Catalog::builtin();
/// assert_eq!(catalog.first().name, "Chicken with Vegetables");
/// assert!(catalog.lookup("Steamed Fish").is_some());
/// assert!(catalog.lookup("Pizza").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct Catalog {
    dishes: Vec<Dish>,
}

/// On-disk catalog layout: a TOML file with `[[dishes]]` tables.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    dishes: Vec<Dish>,
}

impl Catalog {
    /// Build a catalog, enforcing every table invariant.
    ///
    /// # Errors
    ///
    /// Fails on an empty table, duplicate names, negative or non-finite
    /// macros, more than two recommendations, self-references, or
    /// recommendations naming a dish that is not in the table.
    pub fn from_dishes(dishes: Vec<Dish>) -> Result<Self, CatalogError> {
        if dishes.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut names = HashSet::with_capacity(dishes.len());
        for dish in &dishes {
            if !names.insert(dish.name.as_str()) {
                return Err(CatalogError::DuplicateName(dish.name.clone()));
            }
            for m in Macro::ALL {
                let value = dish.macro_value(m);
                if !value.is_finite() || value < 0.0 {
                    return Err(CatalogError::InvalidMacro {
                        dish: dish.name.clone(),
                        field: m.field(),
                        value,
                    });
                }
            }
        }

        for dish in &dishes {
            if dish.recommendations.len() > MAX_RECOMMENDATIONS {
                return Err(CatalogError::TooManyRecommendations {
                    dish: dish.name.clone(),
                    count: dish.recommendations.len(),
                });
            }
            for related in &dish.recommendations {
                if related == &dish.name {
                    return Err(CatalogError::SelfRecommendation(dish.name.clone()));
                }
                if !names.contains(related.as_str()) {
                    return Err(CatalogError::DanglingRecommendation {
                        dish: dish.name.clone(),
                        missing: related.clone(),
                    });
                }
            }
        }

        Ok(Self { dishes })
    }

    /// The built-in menu.
    pub fn builtin() -> Self {
        // The built-in table is covered by `builtin_catalog_is_valid`.
        Self {
            dishes: builtin::dishes(),
        }
    }

    /// Load a catalog from a TOML file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        let file: CatalogFile =
            toml::from_str(&content).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Self::from_dishes(file.dishes)
    }

    /// Load from `path` when given, otherwise fall back to the built-in menu.
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self, CatalogError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::builtin()),
        }
    }

    /// Find a dish by exact name.
    pub fn lookup(&self, name: &str) -> Option<&Dish> {
        self.dishes.iter().find(|d| d.name == name)
    }

    /// All dishes in insertion order.
    pub fn all(&self) -> &[Dish] {
        &self.dishes
    }

    /// The first dish; the last-resort answer for any request.
    pub fn first(&self) -> &Dish {
        // Non-empty by construction.
        &self.dishes[0]
    }

    pub fn len(&self) -> usize {
        self.dishes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dishes.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Dishes of one category, in insertion order.
    pub fn in_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Dish> + 'a {
        self.dishes
            .iter()
            .filter(move |d| d.category.eq_ignore_ascii_case(category))
    }

    /// Distinct categories in order of first appearance.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for dish in &self.dishes {
            if !seen.contains(&dish.category.as_str()) {
                seen.push(dish.category.as_str());
            }
        }
        seen
    }

    /// Distinct tags in order of first appearance.
    pub fn tags(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for tag in self.dishes.iter().flat_map(|d| d.tags.iter()) {
            if !seen.contains(&tag.as_str()) {
                seen.push(tag.as_str());
            }
        }
        seen
    }

    /// Resolve a dish's related dishes; names missing from the catalog are dropped.
    pub fn related(&self, dish: &Dish) -> Vec<&Dish> {
        dish.recommendations
            .iter()
            .filter_map(|name| self.lookup(name))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn names(catalog: &Catalog) -> Vec<&str> {
        catalog.all().iter().map(|d| d.name.as_str()).collect()
    }

    fn dish(name: &str, category: &str, calories: f64, recommendations: &[&str]) -> Dish {
        Dish {
            name: name.to_string(),
            category: category.to_string(),
            diet: "regular".to_string(),
            calories,
            proteins: 10.0,
            fats: 5.0,
            carbs: 20.0,
            tags: vec![],
            image_url: String::new(),
            recommendations: recommendations.iter().map(|r| r.to_string()).collect(),
        }
    }

    #[test]
    fn builtin_catalog_is_valid() {
        let dishes = Catalog::builtin().all().to_vec();
        let catalog = Catalog::from_dishes(dishes).unwrap();
        assert_eq!(catalog.len(), 11);
        assert_eq!(catalog.first().name, "Chicken with Vegetables");
    }

    #[test]
    fn builtin_desserts_have_single_calorie_maximum() {
        let catalog = Catalog::builtin();
        let desserts: Vec<_> = catalog.in_category("dessert").collect();
        assert_eq!(desserts.len(), 3);
        let max = desserts
            .iter()
            .max_by(|a, b| a.calories.total_cmp(&b.calories))
            .unwrap();
        assert_eq!(max.name, "Cheesecake");
        assert_eq!(max.calories, 460.0);
        assert!(desserts
            .iter()
            .filter(|d| d.name != "Cheesecake")
            .all(|d| d.calories < 420.0));
    }

    #[test]
    fn empty_catalog_rejected() {
        assert!(matches!(Catalog::from_dishes(vec![]), Err(CatalogError::Empty)));
    }

    #[test]
    fn duplicate_names_rejected() {
        let result = Catalog::from_dishes(vec![
            dish("Soup", "hot", 200.0, &[]),
            dish("Soup", "hot", 250.0, &[]),
        ]);
        assert!(matches!(result, Err(CatalogError::DuplicateName(ref n)) if n == "Soup"));
    }

    #[test]
    fn negative_macro_rejected() {
        let result = Catalog::from_dishes(vec![dish("Soup", "hot", -1.0, &[])]);
        assert!(matches!(
            result,
            Err(CatalogError::InvalidMacro { field: "calories", .. })
        ));
    }

    #[test]
    fn nan_macro_rejected() {
        let result = Catalog::from_dishes(vec![dish("Soup", "hot", f64::NAN, &[])]);
        assert!(matches!(result, Err(CatalogError::InvalidMacro { .. })));
    }

    #[test]
    fn dangling_recommendation_rejected() {
        let result = Catalog::from_dishes(vec![dish("Soup", "hot", 200.0, &["Bread"])]);
        assert!(matches!(
            result,
            Err(CatalogError::DanglingRecommendation { ref missing, .. }) if missing == "Bread"
        ));
    }

    #[test]
    fn self_recommendation_rejected() {
        let result = Catalog::from_dishes(vec![dish("Soup", "hot", 200.0, &["Soup"])]);
        assert!(matches!(result, Err(CatalogError::SelfRecommendation(_))));
    }

    #[test]
    fn too_many_recommendations_rejected() {
        let result = Catalog::from_dishes(vec![
            dish("A", "hot", 1.0, &["B", "C", "D"]),
            dish("B", "hot", 1.0, &[]),
            dish("C", "hot", 1.0, &[]),
            dish("D", "hot", 1.0, &[]),
        ]);
        assert!(matches!(
            result,
            Err(CatalogError::TooManyRecommendations { count: 3, .. })
        ));
    }

    #[test]
    fn lookup_is_exact() {
        let catalog = Catalog::builtin();
        assert!(catalog.lookup("Steamed Fish").is_some());
        assert!(catalog.lookup("steamed fish").is_none());
        assert!(catalog.lookup("Pizza").is_none());
    }

    #[test]
    fn all_preserves_insertion_order() {
        let catalog = Catalog::from_dishes(vec![
            dish("Z", "hot", 1.0, &[]),
            dish("A", "hot", 1.0, &[]),
            dish("M", "hot", 1.0, &[]),
        ])
        .unwrap();
        assert_eq!(names(&catalog), vec!["Z", "A", "M"]);
    }

    #[test]
    fn related_resolves_names() {
        let catalog = Catalog::builtin();
        let chicken = catalog.lookup("Chicken with Vegetables").unwrap();
        let related: Vec<_> = catalog.related(chicken).iter().map(|d| d.name.as_str()).collect();
        assert_eq!(related, vec!["Caesar Salad", "Steamed Fish"]);
    }

    #[test]
    fn related_drops_unknown_names() {
        let catalog = Catalog::builtin();
        let mut stray = catalog.first().clone();
        stray.recommendations = vec!["Pizza".to_string(), "Greek Salad".to_string()];
        let related = catalog.related(&stray);
        assert_eq!(related.len(), 1);
        assert_eq!(related[0].name, "Greek Salad");
    }

    #[test]
    fn categories_in_first_appearance_order() {
        let catalog = Catalog::builtin();
        assert_eq!(
            catalog.categories(),
            vec!["hot", "breakfast", "salad", "dessert"]
        );
    }

    #[test]
    fn load_from_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[[dishes]]
name = "Soup"
category = "hot"
diet = "regular"
calories = 200
proteins = 8
fats = 4
carbs = 20
tags = ["light"]
recommendations = ["Bread"]

[[dishes]]
name = "Bread"
category = "side"
diet = "vegan"
calories = 150
proteins = 5
fats = 1
carbs = 30
"#
        )
        .unwrap();

        let catalog = Catalog::load(file.path()).unwrap();
        assert_eq!(names(&catalog), vec!["Soup", "Bread"]);
        assert_eq!(catalog.first().tags, vec!["light".to_string()]);
    }

    #[test]
    fn load_rejects_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[[dishes]]\nname = 5").unwrap();
        assert!(matches!(
            Catalog::load(file.path()),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn load_or_builtin_without_path() {
        let catalog = Catalog::load_or_builtin(None).unwrap();
        assert_eq!(catalog.len(), Catalog::builtin().len());
    }
}
