//! Built-in catalog

use crate::{Ingredient, Recipe, RecipeDraft, RecipeId};

#[allow(clippy::too_many_arguments)]
fn entry(
    id: u64,
    name: &str,
    emoji: &str,
    time: &str,
    difficulty: &str,
    servings: u32,
    total_cost: f64,
    ingredients: &[(&str, &str, f64)],
    instructions: &[&str],
) -> Recipe {
    RecipeDraft {
        name: name.to_string(),
        emoji: emoji.to_string(),
        time: time.to_string(),
        difficulty: difficulty.to_string(),
        servings,
        total_cost,
        ingredients: ingredients
            .iter()
            .map(|(name, amount, cost)| Ingredient::new(name, amount, *cost))
            .collect(),
        instructions: instructions.iter().map(|s| s.to_string()).collect(),
        user_generated: false,
    }
    .into_recipe(RecipeId::new(id))
}

/// The six recipes every fresh store starts with, ids 1 to 6
pub fn seed_catalog() -> Vec<Recipe> {
    vec![
        entry(
            1,
            "Creamy Pasta Carbonara",
            "\u{1f35d}",
            "25 min",
            "Medium",
            4,
            12.50,
            &[
                ("Spaghetti", "400g", 2.50),
                ("Bacon", "200g", 4.00),
                ("Eggs", "4 large", 3.00),
                ("Parmesan cheese", "100g", 2.50),
                ("Black pepper", "1 tsp", 0.50),
            ],
            &[
                "Bring a large pot of salted water to boil and cook spaghetti according to package directions",
                "While pasta cooks, fry bacon in a large skillet until crispy",
                "In a bowl, whisk together eggs, grated parmesan, and black pepper",
                "Drain pasta, reserving 1 cup of pasta water",
                "Add hot pasta to the skillet with bacon, remove from heat",
                "Quickly stir in egg mixture, adding pasta water to create a creamy sauce",
                "Serve immediately with extra parmesan and black pepper",
            ],
        ),
        entry(
            2,
            "Classic Beef Burger",
            "\u{1f354}",
            "20 min",
            "Easy",
            4,
            15.20,
            &[
                ("Ground beef", "500g", 8.00),
                ("Burger buns", "4 pieces", 2.50),
                ("Lettuce", "4 leaves", 1.00),
                ("Tomato", "2 medium", 1.50),
                ("Cheese slices", "4 slices", 2.20),
            ],
            &[
                "Divide ground beef into 4 equal portions and shape into patties",
                "Season both sides generously with salt and pepper",
                "Heat a grill or skillet over medium-high heat",
                "Cook patties for 4-5 minutes per side for medium doneness",
                "Add cheese slices in the last minute of cooking",
                "Toast burger buns lightly on the grill",
                "Assemble burgers with lettuce, tomato, patty, and your favorite condiments",
            ],
        ),
        entry(
            3,
            "Fresh Garden Salad",
            "\u{1f957}",
            "15 min",
            "Easy",
            4,
            8.30,
            &[
                ("Mixed greens", "300g", 3.00),
                ("Cherry tomatoes", "200g", 2.50),
                ("Cucumber", "1 large", 1.20),
                ("Red onion", "1/2 medium", 0.60),
                ("Olive oil", "3 tbsp", 1.00),
            ],
            &[
                "Wash and dry all vegetables thoroughly",
                "Tear or chop mixed greens into bite-sized pieces",
                "Halve cherry tomatoes and slice cucumber",
                "Thinly slice red onion",
                "Combine all vegetables in a large bowl",
                "Drizzle with olive oil and your choice of vinegar",
                "Season with salt and pepper, toss well and serve immediately",
            ],
        ),
        entry(
            4,
            "Chicken Teriyaki Bowl",
            "\u{1f371}",
            "35 min",
            "Medium",
            4,
            14.80,
            &[
                ("Chicken breast", "500g", 7.00),
                ("Rice", "2 cups", 2.00),
                ("Soy sauce", "1/4 cup", 1.50),
                ("Honey", "2 tbsp", 1.80),
                ("Broccoli", "300g", 2.50),
            ],
            &[
                "Cook rice according to package instructions",
                "Cut chicken into bite-sized pieces",
                "Mix soy sauce, honey, garlic, and ginger for teriyaki sauce",
                "Cook chicken in a hot pan until golden brown",
                "Add teriyaki sauce and simmer until chicken is glazed",
                "Steam broccoli until tender-crisp",
                "Serve chicken and broccoli over rice, drizzle with extra sauce",
            ],
        ),
        entry(
            5,
            "Margherita Pizza",
            "\u{1f355}",
            "30 min",
            "Medium",
            4,
            11.50,
            &[
                ("Pizza dough", "500g", 3.00),
                ("Tomato sauce", "1 cup", 2.00),
                ("Mozzarella cheese", "300g", 4.50),
                ("Fresh basil", "1 bunch", 1.50),
                ("Olive oil", "2 tbsp", 0.50),
            ],
            &[
                "Preheat oven to 475\u{b0}F (245\u{b0}C)",
                "Roll out pizza dough into desired shape",
                "Spread tomato sauce evenly over dough",
                "Tear mozzarella and distribute over sauce",
                "Drizzle with olive oil and season with salt",
                "Bake for 12-15 minutes until crust is golden and cheese is bubbly",
                "Top with fresh basil leaves and serve hot",
            ],
        ),
        entry(
            6,
            "Chocolate Chip Cookies",
            "\u{1f36a}",
            "40 min",
            "Easy",
            24,
            9.20,
            &[
                ("Flour", "2 cups", 1.50),
                ("Butter", "200g", 3.00),
                ("Sugar", "1 cup", 1.20),
                ("Eggs", "2 large", 1.50),
                ("Chocolate chips", "2 cups", 2.00),
            ],
            &[
                "Preheat oven to 350\u{b0}F (175\u{b0}C)",
                "Cream together butter and sugar until fluffy",
                "Beat in eggs one at a time",
                "Mix in flour, baking soda, and salt",
                "Fold in chocolate chips",
                "Drop spoonfuls of dough onto baking sheets",
                "Bake for 10-12 minutes until edges are golden",
                "Cool on baking sheet for 5 minutes before transferring",
            ],
        ),
    ]
}
