use leptos::prelude::*;

use crate::errors::AppError;

/// Appends a freshly loaded page to `loaded_vec` or stores the error in `load_error`.
///
/// Returns `true` when no further page should be requested, either because the load failed or because
/// the server returned fewer than `requested` items.
pub fn handle_additional_load<T: Clone + Send + Sync + 'static>(
    mut load_result: Result<Vec<T>, AppError>,
    requested: usize,
    loaded_vec: RwSignal<Vec<T>>,
    load_error: RwSignal<Option<AppError>>,
) -> bool {
    match load_result {
        Ok(ref mut additional_vec) => {
            let is_exhausted = additional_vec.len() < requested;
            if !additional_vec.is_empty() {
                loaded_vec.update(|loaded_vec| loaded_vec.append(additional_vec))
            }
            is_exhausted
        },
        Err(e) => {
            load_error.set(Some(e));
            true
        },
    }
}
