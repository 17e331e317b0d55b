use crate::core::{
    command_init::OverlayCommandInit,
    error::Result,
    geometry::Rect,
    output::print_info,
    state::ItemId,
};
use colored::*;

/// Bounding box of one row in a list view
pub const LIST_ROW: Rect = Rect::new(0.0, 0.0, 240.0, 16.0);
/// Bounding box of one tile in a grid view
pub const GRID_TILE: Rect = Rect::new(0.0, 0.0, 96.0, 110.0);

/// Print the overlay icons of `paths`, or of the work tree and every known
/// item when no path is given.
pub fn execute_render(paths: Vec<String>, grid: bool) -> Result<()> {
    let mut context = OverlayCommandInit::initialize()?;

    if !context.controller.is_hook_installed() {
        print_info("Overlay icons are disabled. Check the preferences.");
        context.controller.teardown();
        return Ok(());
    }

    if context.database.last_updated().is_none() {
        print_info("No statuses cached yet. Run 'vcs-overlay refresh' first.");
    }

    let items: Vec<(String, ItemId)> = if paths.is_empty() {
        std::iter::once((".".to_string(), ItemId::root()))
            .chain(
                context
                    .database
                    .paths()
                    .into_iter()
                    .map(|path| (path.clone(), ItemId::new(path))),
            )
            .collect()
    } else {
        paths
            .into_iter()
            .map(|arg| context.item_id(&arg).map(|item| (arg, item)))
            .collect::<Result<_>>()?
    };

    let bounds = if grid { GRID_TILE } else { LIST_ROW };
    log::debug!("Rendering {} items into {:?}", items.len(), bounds);

    for (label, item) in &items {
        println!("\n{}", label.white().bold());
        let plan = context.controller.on_item_gui(item, bounds);
        if plan.is_empty() {
            println!("  {}", "no icons".bright_black());
        }
    }
    println!();

    context.controller.teardown();
    Ok(())
}
