//! The built-in menu served when no catalog file is configured.

use super::Dish;

struct Row {
    name: &'static str,
    category: &'static str,
    diet: &'static str,
    calories: f64,
    proteins: f64,
    fats: f64,
    carbs: f64,
    tags: &'static [&'static str],
    image_url: &'static str,
    recommendations: &'static [&'static str],
}

const MENU: &[Row] = &[
    Row {
        name: "Chicken with Vegetables",
        category: "hot",
        diet: "regular",
        calories: 450.0,
        proteins: 35.0,
        fats: 14.0,
        carbs: 40.0,
        tags: &["chicken", "no pork", "mild"],
        image_url: "https://images.unsplash.com/photo-1604503468506-a8da13d82791?w=400&h=300&fit=crop",
        recommendations: &["Caesar Salad", "Steamed Fish"],
    },
    Row {
        name: "Steamed Fish",
        category: "hot",
        diet: "dietary",
        calories: 220.0,
        proteins: 28.0,
        fats: 6.0,
        carbs: 2.0,
        tags: &["fish", "light", "gluten-free"],
        image_url: "https://images.unsplash.com/photo-1519708227418-c8fd9a32b7a2?w=400&h=300&fit=crop",
        recommendations: &["Greek Salad", "Fruit Salad"],
    },
    Row {
        name: "Buckwheat with Beef",
        category: "hot",
        diet: "hearty",
        calories: 520.0,
        proteins: 25.0,
        fats: 12.0,
        carbs: 70.0,
        tags: &["beef", "hearty"],
        image_url: "https://images.unsplash.com/photo-1589302168068-964664d93dc0?w=400&h=300&fit=crop",
        recommendations: &["Greek Salad"],
    },
    Row {
        name: "Pasta with Tomatoes",
        category: "hot",
        diet: "vegetarian",
        calories: 430.0,
        proteins: 14.0,
        fats: 12.0,
        carbs: 62.0,
        tags: &["pasta", "no pork"],
        image_url: "https://images.unsplash.com/photo-1555949258-eb67b1ef0ceb?w=400&h=300&fit=crop",
        recommendations: &["Greek Salad", "Chocolate Mousse"],
    },
    Row {
        name: "Vegetable Omelette",
        category: "breakfast",
        diet: "vegetarian",
        calories: 300.0,
        proteins: 18.0,
        fats: 18.0,
        carbs: 8.0,
        tags: &["eggs", "vegetables"],
        image_url: "https://images.unsplash.com/photo-1565299624946-b28f40a0ca4b?w=400&h=300&fit=crop",
        recommendations: &["Oatmeal with Berries"],
    },
    Row {
        name: "Oatmeal with Berries",
        category: "breakfast",
        diet: "vegan",
        calories: 280.0,
        proteins: 9.0,
        fats: 6.0,
        carbs: 48.0,
        tags: &["oats", "berries"],
        image_url: "https://images.unsplash.com/photo-1517673400267-0251440c45dc?w=400&h=300&fit=crop",
        recommendations: &["Vegetable Omelette"],
    },
    Row {
        name: "Caesar Salad",
        category: "salad",
        diet: "regular",
        calories: 380.0,
        proteins: 24.0,
        fats: 22.0,
        carbs: 20.0,
        tags: &["chicken", "salad"],
        image_url: "https://images.unsplash.com/photo-1546793665-c74683f339c1?w=400&h=300&fit=crop",
        recommendations: &["Chicken with Vegetables"],
    },
    Row {
        name: "Greek Salad",
        category: "salad",
        diet: "vegetarian",
        calories: 240.0,
        proteins: 7.0,
        fats: 19.0,
        carbs: 12.0,
        tags: &["cheese", "vegetables", "salad"],
        image_url: "https://images.unsplash.com/photo-1540420773420-3366772f4999?w=400&h=300&fit=crop",
        recommendations: &["Steamed Fish"],
    },
    Row {
        name: "Cheesecake",
        category: "dessert",
        diet: "regular",
        calories: 460.0,
        proteins: 8.0,
        fats: 30.0,
        carbs: 38.0,
        tags: &["cheese", "sweet"],
        image_url: "https://images.unsplash.com/photo-1533134242443-d4fd215305ad?w=400&h=300&fit=crop",
        recommendations: &["Fruit Salad"],
    },
    Row {
        name: "Chocolate Mousse",
        category: "dessert",
        diet: "vegetarian",
        calories: 410.0,
        proteins: 6.0,
        fats: 26.0,
        carbs: 36.0,
        tags: &["chocolate", "sweet"],
        image_url: "https://images.unsplash.com/photo-1541783245831-57d6fb0926d3?w=400&h=300&fit=crop",
        recommendations: &["Cheesecake"],
    },
    Row {
        name: "Fruit Salad",
        category: "dessert",
        diet: "vegan",
        calories: 180.0,
        proteins: 2.0,
        fats: 1.0,
        carbs: 42.0,
        tags: &["fruit", "sweet", "light"],
        image_url: "https://images.unsplash.com/photo-1564093497595-593b96d80180?w=400&h=300&fit=crop",
        recommendations: &[],
    },
];

/// Dishes of the built-in menu, in menu order.
pub fn dishes() -> Vec<Dish> {
    MENU.iter()
        .map(|row| Dish {
            name: row.name.to_string(),
            category: row.category.to_string(),
            diet: row.diet.to_string(),
            calories: row.calories,
            proteins: row.proteins,
            fats: row.fats,
            carbs: row.carbs,
            tags: row.tags.iter().map(|t| t.to_string()).collect(),
            image_url: row.image_url.to_string(),
            recommendations: row.recommendations.iter().map(|r| r.to_string()).collect(),
        })
        .collect()
}
