//! `rebound validate` – check sign-up form fields.

use anyhow::{bail, Result};
use rebound_core::validation::{validate_form, SignupForm};

pub fn run_validate(form: SignupForm) -> Result<()> {
    let errors = validate_form(&form);
    if errors.is_empty() {
        println!("valid");
        return Ok(());
    }
    println!("{:<18} {:<16} {}", "FIELD", "CODE", "MESSAGE");
    for (field, e) in &errors {
        println!(
            "{:<18} {:<16} {}",
            field.as_str(),
            e.code().unwrap_or("-"),
            e.message()
        );
    }
    bail!("{} field(s) invalid", errors.len())
}
