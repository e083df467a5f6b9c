//! Keyword-driven recipe drafts
//!
//! Every attribute is picked from a fixed lookup table by scanning the
//! lower-cased request text for keywords. Tables are ordered and the first
//! matching keyword wins.

use rand::Rng;

use crate::{Ingredient, RecipeDraft};

const EMOJI_TABLE: &[(&str, &str)] = &[
    ("pasta", "🍝"),
    ("spaghetti", "🍝"),
    ("noodle", "🍜"),
    ("burger", "🍔"),
    ("beef", "🍔"),
    ("pizza", "🍕"),
    ("salad", "🥗"),
    ("vegetables", "🥗"),
    ("greens", "🥗"),
    ("soup", "🍲"),
    ("stew", "🍲"),
    ("chicken", "🍗"),
    ("poultry", "🍗"),
    ("fish", "🐟"),
    ("seafood", "🦐"),
    ("shrimp", "🦐"),
    ("rice", "🍚"),
    ("bowl", "🍱"),
    ("taco", "🌮"),
    ("burrito", "🌯"),
    ("sandwich", "🥪"),
    ("curry", "🍛"),
    ("cake", "🎂"),
    ("cookie", "🍪"),
    ("dessert", "🍰"),
    ("bread", "🍞"),
    ("toast", "🍞"),
    ("egg", "🥚"),
    ("omelette", "🥚"),
    ("bacon", "🥓"),
    ("breakfast", "🍳"),
    ("smoothie", "🥤"),
    ("drink", "🥤"),
    ("steak", "🥩"),
    ("meat", "🥩"),
];

const DEFAULT_EMOJI: &str = "🍽️";

type IngredientRow = (&'static str, &'static str, f64);

const INGREDIENT_TABLE: &[(&str, &[IngredientRow])] = &[
    (
        "pasta",
        &[
            ("Pasta", "400g", 2.50),
            ("Olive oil", "3 tbsp", 1.00),
            ("Garlic", "3 cloves", 0.50),
            ("Parmesan cheese", "100g", 3.50),
            ("Salt and pepper", "To taste", 0.30),
        ],
    ),
    (
        "chicken",
        &[
            ("Chicken breast", "500g", 7.00),
            ("Olive oil", "2 tbsp", 0.80),
            ("Garlic powder", "1 tsp", 0.50),
            ("Paprika", "1 tsp", 0.60),
            ("Salt and pepper", "To taste", 0.30),
        ],
    ),
    (
        "salad",
        &[
            ("Mixed greens", "300g", 3.00),
            ("Cherry tomatoes", "200g", 2.50),
            ("Cucumber", "1 large", 1.20),
            ("Olive oil", "3 tbsp", 1.00),
            ("Lemon juice", "2 tbsp", 0.50),
        ],
    ),
    (
        "rice",
        &[
            ("Rice", "2 cups", 2.00),
            ("Chicken broth", "4 cups", 2.50),
            ("Onion", "1 medium", 0.80),
            ("Garlic", "2 cloves", 0.40),
            ("Butter", "2 tbsp", 0.90),
        ],
    ),
    (
        "soup",
        &[
            ("Vegetable broth", "6 cups", 3.00),
            ("Mixed vegetables", "500g", 4.00),
            ("Onion", "1 large", 1.00),
            ("Garlic", "3 cloves", 0.50),
            ("Herbs", "1 tbsp", 1.00),
        ],
    ),
    (
        "sandwich",
        &[
            ("Bread", "8 slices", 2.50),
            ("Deli meat", "300g", 5.00),
            ("Cheese", "4 slices", 2.00),
            ("Lettuce", "4 leaves", 0.80),
            ("Tomato", "1 large", 1.20),
        ],
    ),
];

const GENERIC_INGREDIENTS: &[IngredientRow] = &[
    ("Main ingredient", "500g", 6.00),
    ("Olive oil", "2 tbsp", 0.80),
    ("Garlic", "2 cloves", 0.40),
    ("Onion", "1 medium", 0.80),
    ("Herbs and spices", "To taste", 1.50),
];

const PASTA_STEPS: &[&str] = &[
    "Bring a large pot of salted water to boil",
    "Cook pasta according to package directions until al dente",
    "While pasta cooks, prepare the sauce in a separate pan",
    "Drain pasta, reserving some pasta water",
    "Combine pasta with sauce, adding pasta water if needed",
    "Serve hot with grated cheese on top",
];

const SALAD_STEPS: &[&str] = &[
    "Wash and dry all vegetables thoroughly",
    "Chop vegetables into bite-sized pieces",
    "Combine all vegetables in a large bowl",
    "Prepare dressing by whisking oil and seasonings",
    "Toss salad with dressing just before serving",
];

const SOUP_STEPS: &[&str] = &[
    "Heat oil in a large pot over medium heat",
    "Sauté aromatics until fragrant",
    "Add main ingredients and cook briefly",
    "Pour in broth and bring to a boil",
    "Reduce heat and simmer for 20-30 minutes",
    "Season to taste and serve hot",
];

const MEAT_STEPS: &[&str] = &[
    "Season the protein with salt, pepper, and spices",
    "Heat oil in a pan over medium-high heat",
    "Cook until golden brown on both sides",
    "Reduce heat and continue cooking until done",
    "Let rest for 5 minutes before serving",
];

const GENERIC_STEPS: &[&str] = &[
    "Prepare all ingredients as specified",
    "Heat cooking oil in a pan over medium heat",
    "Add ingredients in order of cooking time needed",
    "Cook until everything is done to your preference",
    "Season with salt and pepper to taste",
    "Serve immediately while hot and enjoy",
];

/// Longest generated name when the request is more than five words
const MAX_LONG_NAME_CHARS: usize = 50;

fn contains_any(text: &str, words: &[&str]) -> bool {
    words.iter().any(|w| text.contains(w))
}

/// Capitalize the first letter of every alphabetic run, lower-case the rest
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_word = false;

    for c in input.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }

    out
}

fn recipe_name(input: &str) -> String {
    let titled = title_case(input);
    if input.split_whitespace().count() <= 5 {
        titled
    } else {
        titled.chars().take(MAX_LONG_NAME_CHARS).collect()
    }
}

pub fn pick_emoji(text: &str) -> &'static str {
    EMOJI_TABLE
        .iter()
        .find(|(keyword, _)| text.contains(keyword))
        .map(|(_, emoji)| *emoji)
        .unwrap_or(DEFAULT_EMOJI)
}

pub fn pick_difficulty(text: &str) -> &'static str {
    if contains_any(text, &["easy", "simple", "quick", "basic"]) {
        "Easy"
    } else if contains_any(text, &["hard", "complex", "advanced", "gourmet"]) {
        "Hard"
    } else {
        "Medium"
    }
}

pub fn pick_time<R: Rng>(text: &str, difficulty: &str, rng: &mut R) -> String {
    let minutes = if text.contains("quick") || difficulty == "Easy" {
        rng.gen_range(10..=25)
    } else if difficulty == "Hard" {
        rng.gen_range(45..=90)
    } else {
        rng.gen_range(25..=50)
    };

    format!("{} min", minutes)
}

pub fn pick_servings(text: &str) -> u32 {
    if contains_any(text, &["one", "single", "solo"]) {
        1
    } else if contains_any(text, &["two", "couple"]) {
        2
    } else if contains_any(text, &["family", "large"]) {
        6
    } else {
        4
    }
}

pub fn pick_ingredients(text: &str) -> Vec<Ingredient> {
    let rows = INGREDIENT_TABLE
        .iter()
        .find(|(category, _)| text.contains(category))
        .map(|(_, rows)| *rows)
        .unwrap_or(GENERIC_INGREDIENTS);

    rows.iter()
        .map(|(name, amount, cost)| Ingredient::new(name, amount, *cost))
        .collect()
}

pub fn build_instructions(text: &str, ingredients: &[Ingredient]) -> Vec<String> {
    let names: Vec<String> = ingredients
        .iter()
        .take(3)
        .map(|i| i.name.to_lowercase())
        .collect();

    let steps = if contains_any(text, &["pasta", "spaghetti"]) {
        PASTA_STEPS
    } else if text.contains("salad") {
        SALAD_STEPS
    } else if contains_any(text, &["soup", "stew"]) {
        SOUP_STEPS
    } else if contains_any(text, &["chicken", "meat"]) {
        MEAT_STEPS
    } else {
        GENERIC_STEPS
    };

    let mut instructions = vec![
        format!("Gather all ingredients: {} and others", names.join(", ")),
        "Prepare your cooking area and preheat if needed".to_string(),
    ];
    instructions.extend(steps.iter().map(|s| s.to_string()));
    instructions
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Build a draft from a dish name, ingredient list or description
///
/// Returns `None` when the request is blank.
pub fn generate_recipe<R: Rng>(input: &str, rng: &mut R) -> Option<RecipeDraft> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    let text = input.to_lowercase();
    let difficulty = pick_difficulty(&text);
    let ingredients = pick_ingredients(&text);
    let total_cost = round_cents(ingredients.iter().map(|i| i.cost).sum());
    let instructions = build_instructions(&text, &ingredients);

    Some(RecipeDraft {
        name: recipe_name(input),
        emoji: pick_emoji(&text).to_string(),
        time: pick_time(&text, difficulty, rng),
        difficulty: difficulty.to_string(),
        servings: pick_servings(&text),
        total_cost,
        ingredients,
        instructions,
        user_generated: true,
    })
}
