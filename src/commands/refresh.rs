use crate::core::{
    collaborators::StatusCache,
    command_init::OverlayCommandInit,
    error::Result,
    icon_resolver::INCOMPLETE_DATA_TOOLTIP,
    output::{print_info, print_success},
};

/// Invalidate the cached statuses and rebuild them from the repository.
pub fn execute_refresh() -> Result<()> {
    let mut context = OverlayCommandInit::initialize()?;

    let refreshed = context.controller.refresh_menu();
    if refreshed.is_err() {
        context.controller.teardown();
        return refreshed;
    }
    context.controller.tick();

    let include_remote = context.controller.preferences().download_remote_changes();
    let populated = context.database.populate(
        &context.git_repo,
        context.max_status_entries,
        include_remote,
    );
    if populated.is_ok() {
        context.controller.on_cache_changed();
    }
    context.controller.teardown();
    populated?;

    print_success(&format!(
        "Refreshed {} statuses in {}",
        context.database.len(),
        context.workdir.display()
    ));
    if context.database.data_is_incomplete() {
        print_info(INCOMPLETE_DATA_TOOLTIP);
    }
    Ok(())
}
