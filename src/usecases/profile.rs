use thiserror::Error;

use crate::domain::profile::{Profile, ProfileView};

const PROFILE_LOAD_FAILED: &str = "PROFILE_LOAD_FAILED";
const PROFILE_LOADED: &str = "PROFILE_LOADED";
const PASTE_DELETE_FAILED: &str = "PASTE_DELETE_FAILED";
const PASTE_DELETED: &str = "PASTE_DELETED";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileSourceError {
    #[error("credentials were rejected")]
    Unauthorized,
    #[error("resource not found")]
    NotFound,
    #[error("profile service is unavailable")]
    Unavailable,
    #[error("profile service returned an unexpected payload")]
    InvalidData,
}

pub trait ProfileSource {
    fn fetch_profile(&self) -> Result<Profile, ProfileSourceError>;

    fn delete_paste(&self, paste_id: &str) -> Result<(), ProfileSourceError>;
}

impl<T> ProfileSource for &T
where
    T: ProfileSource + ?Sized,
{
    fn fetch_profile(&self) -> Result<Profile, ProfileSourceError> {
        (*self).fetch_profile()
    }

    fn delete_paste(&self, paste_id: &str) -> Result<(), ProfileSourceError> {
        (*self).delete_paste(paste_id)
    }
}

/// Loads the profile into `view`. On failure the view keeps whatever it had.
pub fn load_profile(
    source: &dyn ProfileSource,
    view: &mut ProfileView,
) -> Result<(), ProfileSourceError> {
    match source.fetch_profile() {
        Ok(profile) => {
            tracing::info!(
                code = PROFILE_LOADED,
                pastes = profile.pastes.len(),
                "profile loaded"
            );
            view.set_ready(profile);
            Ok(())
        }
        Err(error) => {
            tracing::error!(code = PROFILE_LOAD_FAILED, error = %error, "failed to load profile");
            view.set_error();
            Err(error)
        }
    }
}

/// Deletes one paste remotely, then drops it from the local list.
pub fn delete_paste(
    source: &dyn ProfileSource,
    view: &mut ProfileView,
    paste_id: &str,
) -> Result<(), ProfileSourceError> {
    if let Err(error) = source.delete_paste(paste_id) {
        tracing::error!(
            code = PASTE_DELETE_FAILED,
            paste_id,
            error = %error,
            "failed to delete paste"
        );
        return Err(error);
    }

    let removed = view.remove_paste(paste_id);
    tracing::info!(code = PASTE_DELETED, paste_id, removed, "paste deleted");
    Ok(())
}
