//! Corral - console driver for the chat folder overlay
//!
//! Runs the overlay engine against a simulated host session: the popup
//! opens, chats get foldered, and every interaction is routed the way a real
//! embedding would route it. Useful for eyeballing engine behavior without a
//! host application.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use log::{error, info};

use folders::{
    CharacterId, ChatId, FolderActions, InteractionRouter, JsonSettingsStore, MenuChoice,
    MutationEvent, Overlay, PassOutcome, SimHostView,
};

mod render;

use render::render_tree;

/// Pump the engine until the scheduled pass has run (or give up)
fn settle(overlay: &Overlay) -> Option<PassOutcome> {
    for _ in 0..10 {
        thread::sleep(Duration::from_millis(20));
        if let Some(outcome) = overlay.pump(Instant::now()) {
            return Some(outcome);
        }
    }
    None
}

fn print_tree(host: &SimHostView) {
    match host.mounted_tree() {
        Some(tree) => print!("{}", render_tree(&tree)),
        None => match host.placeholder() {
            Some(message) => println!("{message}"),
            None => println!("(no proxy view mounted)"),
        },
    }
}

fn run() -> Result<()> {
    let store = Arc::new(JsonSettingsStore::load_default()?);
    info!("Settings loaded from {}", store.path().display());

    let host = Arc::new(SimHostView::new());
    let overlay = Arc::new(Overlay::new(store.clone(), host.clone()));
    let actions = FolderActions::new(store.clone(), overlay.clone());
    let router = InteractionRouter::new(store.clone(), host.clone(), actions);

    // The host session: a character with a handful of chats, popup opening
    host.set_active_character(Some(CharacterId::new("seraphina")));
    host.set_chats(&["intro.jsonl", "arc-1.jsonl", "arc-2.jsonl", "oneshot.jsonl"]);
    host.show_popup();
    overlay.observe_mutation(
        &MutationEvent::attribute(Some("select_chat_popup"), &[], "style"),
        Instant::now(),
    );
    settle(&overlay);

    println!("--- popup opened ---");
    print_tree(&host);

    // Organize: a folder via the header control, two moves via the menu
    let arcs = router
        .create_folder("Arcs")?
        .expect("character is active and the name is non-empty");
    let menu = router.open_move_menu(&ChatId::new("arc-1.jsonl"))?;
    router.choose(menu, MenuChoice::Folder(arcs.clone()))?;
    let menu = router.open_move_menu(&ChatId::new("arc-2.jsonl"))?;
    router.choose(menu, MenuChoice::Folder(arcs.clone()))?;
    settle(&overlay);

    println!("--- after moving the arc chats ---");
    print_tree(&host);

    // Collapse the folder; the section keeps its items, only visibility flips
    router.toggle_folder(&arcs)?;
    settle(&overlay);

    println!("--- Arcs collapsed ---");
    print_tree(&host);

    // Primary activation on a proxy item reaches the original host element
    if let Some(tree) = host.mounted_tree() {
        if let Some(item) = tree.sections.iter().flat_map(|s| s.items.iter()).next() {
            router.activate_item(item.handle)?;
            info!(
                "Forwarded activation for {:?}",
                host.activations().last().map(|c| c.as_str().to_string())
            );
        }
    }

    store.flush()?;
    info!("Settings written back to {}", store.path().display());
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    if let Err(e) = config::init() {
        error!("Failed to initialize config directory: {}", e);
    }

    if let Err(e) = run() {
        error!("Driver session failed: {e:#}");
        std::process::exit(1);
    }
}
