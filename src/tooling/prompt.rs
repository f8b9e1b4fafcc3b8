//! Interactive terminal prompts backed by dialoguer.

use crate::error::ApiError;
use crate::items::{ItemDraft, ItemPatch};
use crate::navigator::MenuInput;
use crate::types::Item;
use crate::validation::{is_valid_count, is_valid_id, is_valid_price, is_valid_text};
use dialoguer::{Confirm, Input, Select};
use owo_colors::OwoColorize;

fn prompt_failed(err: dialoguer::Error) -> ApiError {
    ApiError::PromptFailed(err.to_string())
}

/// Numbered category menu read from the terminal.
#[derive(Debug, Default)]
pub struct TerminalMenu;

impl MenuInput for TerminalMenu {
    fn choose(&mut self, heading: &str, options: &[String]) -> Result<String, ApiError> {
        println!();
        println!("{}", heading.bold().underline());
        for (idx, option) in options.iter().enumerate() {
            println!("  {}. {}", idx + 1, option);
        }
        println!("  0. Back");
        Input::<String>::new()
            .with_prompt("Choice")
            .interact_text()
            .map_err(prompt_failed)
    }

    fn reject(&mut self, message: &str) {
        eprintln!("{}", message.red());
    }
}

/// Read one value, re-prompting until `check` accepts it.
///
/// With `allow_blank` an empty answer is accepted and returned as-is.
fn prompt_checked(
    label: &str,
    check: fn(&str) -> bool,
    hint: &str,
    allow_blank: bool,
) -> Result<String, ApiError> {
    Input::<String>::new()
        .with_prompt(label)
        .allow_empty(allow_blank)
        .validate_with(|value: &String| -> Result<(), String> {
            if (allow_blank && value.trim().is_empty()) || check(value) {
                Ok(())
            } else {
                Err(hint.to_string())
            }
        })
        .interact_text()
        .map_err(prompt_failed)
}

/// Fields for a new item.
pub fn prompt_draft() -> Result<ItemDraft, ApiError> {
    Ok(ItemDraft {
        name: prompt_checked("Name", is_valid_text, "Name cannot be empty", false)?,
        price: prompt_checked(
            "Price",
            is_valid_price,
            "Enter a number such as 2.50 or 2,50",
            false,
        )?,
        stock: prompt_checked("Stock", is_valid_count, "Enter a whole number >= 0", false)?,
    })
}

/// Replacement values for `current`; blank answers keep the current value.
pub fn prompt_patch(current: &Item) -> Result<ItemPatch, ApiError> {
    let name = prompt_checked(
        &format!("Name [{}]", current.name),
        is_valid_text,
        "Name cannot be empty",
        true,
    )?;
    let price = prompt_checked(
        &format!("Price [{}]", current.price),
        is_valid_price,
        "Enter a number such as 2.50 or 2,50",
        true,
    )?;
    let stock = prompt_checked(
        &format!("Stock [{}]", current.stock),
        is_valid_count,
        "Enter a whole number >= 0",
        true,
    )?;
    Ok(ItemPatch {
        name: Some(name),
        price: Some(price),
        stock: Some(stock),
    })
}

pub fn prompt_id(label: &str) -> Result<String, ApiError> {
    prompt_checked(label, is_valid_id, "Enter a positive item ID", false)
}

/// Optional name filter; blank means no filter.
pub fn prompt_filter() -> Result<Option<String>, ApiError> {
    let value: String = Input::<String>::new()
        .with_prompt("Filter by name (blank for all)")
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_failed)?;
    let value = value.trim().to_string();
    Ok((!value.is_empty()).then_some(value))
}

pub fn confirm(prompt: &str) -> Result<bool, ApiError> {
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(prompt_failed)
}

/// Pick one entry of `items`, returning its index.
pub fn select(prompt: &str, items: &[&str]) -> Result<usize, ApiError> {
    Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact()
        .map_err(prompt_failed)
}
