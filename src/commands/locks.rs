use crate::core::{command_init::OverlayCommandInit, error::Result, output::print_info};

/// Show the lock details dialog of `path`, as a click on its lock icon would.
pub fn execute_locks(path: String) -> Result<()> {
    let mut context = OverlayCommandInit::initialize()?;
    let item = context.item_id(&path)?;

    if context.controller.lock_details(&item).is_empty() {
        print_info(&format!("No locks known for '{path}'"));
    } else {
        context.controller.on_lock_clicked(&item);
    }

    context.controller.teardown();
    Ok(())
}
