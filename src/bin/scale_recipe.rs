//! Utility to scale a recipe markdown file from the command line
//!
//! Usage: scale_recipe <recipe.md> <factor>

use mealplan::recipes::Recipe;
use mealplan::scaling::format_quantity;
use mealplan::tools::recipes::validate_factor;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <recipe.md> <factor>", args[0]);
        std::process::exit(2);
    }

    let path = std::path::Path::new(&args[1]);
    let factor: f64 = args[2]
        .parse()
        .map_err(|e| format!("Invalid factor '{}': {}", args[2], e))?;
    let factor = validate_factor(factor)?;

    let text = std::fs::read_to_string(path)?;
    let slug = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("recipe");
    let recipe = Recipe::parse(slug, &text)?.scaled(factor);

    eprintln!("{} x{}", recipe.title, format_quantity(factor));
    if let Some(servings) = recipe.meta.servings {
        eprintln!("Serves {}", format_quantity(servings));
    }
    print!("{}", recipe.body);

    Ok(())
}
