//! Utility to normalize an inventory JSON payload
//!
//! Reads the file given as the first argument, or stdin, and prints the
//! normalized inventory as JSON.

use std::io::Read;

use mealplan::inventory::{normalize, RawInventory};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let text = match std::env::args().nth(1) {
        Some(path) if path != "-" => std::fs::read_to_string(&path)?,
        _ => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let raw = RawInventory::from_json(&text)?;
    let normalized = normalize(&raw);
    eprintln!(
        "{} records: {} meals, {} ingredients",
        raw.record_count(),
        normalized.meals.len(),
        normalized.ingredient_count()
    );
    println!("{}", serde_json::to_string_pretty(&normalized)?);

    Ok(())
}
