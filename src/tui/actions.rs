use super::state::AppState;

/// Run any pending product fetch.
///
/// Called between frames so the `Loading` screen is drawn before the
/// blocking fetch starts.
pub fn process_state(state: &mut AppState) {
    if !state.fetch_pending {
        return;
    }
    state.fetch_pending = false;
    state.loader.complete(&state.products);
    state.clamp_selection();
}
