//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `shoplist_core` linkage.
//! - Replay a fixed add/edit/delete session and print each list snapshot
//!   as JSON, keeping output deterministic for quick local sanity checks.

use shoplist_core::{init_logging_with, Intent, ItemSnapshot, LogConfig, ShoppingListScreen};
use std::process::ExitCode;

/// Absolute directory for rolling logs; logging stays off when unset.
const LOG_DIR_ENV: &str = "SHOPLIST_LOG_DIR";

fn main() -> ExitCode {
    println!("shoplist_core ping={}", shoplist_core::ping());
    println!("shoplist_core version={}", shoplist_core::core_version());

    if let Ok(log_dir) = std::env::var(LOG_DIR_ENV) {
        if let Err(err) = LogConfig::from_env(&log_dir).and_then(init_logging_with) {
            eprintln!("logging disabled: {err}");
        }
    }

    let mut screen = ShoppingListScreen::new();
    screen.subscribe(|snapshot: &ItemSnapshot| match serde_json::to_string(&snapshot[..]) {
        Ok(json) => println!("items={json}"),
        Err(err) => eprintln!("snapshot encode failed: {err}"),
    });

    for intent in demo_session() {
        if let Err(err) = screen.dispatch(intent) {
            eprintln!("intent rejected: {err}");
            return ExitCode::FAILURE;
        }
    }

    for item in screen.items().iter() {
        println!("#{} {} ({}) {}", item.id, item.title, item.description, item.quantity_label());
    }
    ExitCode::SUCCESS
}

fn demo_session() -> Vec<Intent> {
    let confirm_add = |title: &str, description: &str, quantity_text: &str| Intent::ConfirmAdd {
        title: title.to_string(),
        description: description.to_string(),
        quantity_text: quantity_text.to_string(),
    };

    vec![
        Intent::BeginAdd,
        confirm_add("Milk", "2%", "2"),
        Intent::BeginAdd,
        confirm_add("Bread", "Whole wheat", "1"),
        Intent::BeginEdit(1),
        Intent::ConfirmEdit {
            id: 1,
            title: "Milk".to_string(),
            description: "Skim".to_string(),
            quantity_text: "3".to_string(),
        },
        Intent::Delete(1),
        Intent::BeginAdd,
        confirm_add("Eggs", "", "abc"),
    ]
}
