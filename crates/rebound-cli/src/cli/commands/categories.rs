//! `rebound categories` – list the closed set of error categories.

use rebound_core::error::ErrorCategory;

pub fn run_categories() {
    println!("{:<12} {:<18} {}", "CATEGORY", "CODE", "RETRYABLE");
    for c in ErrorCategory::ALL {
        println!(
            "{:<12} {:<18} {}",
            c.as_str(),
            c.default_code(),
            if c.conventionally_retryable() { "yes" } else { "no" }
        );
    }
}
