use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Paste as listed on the profile page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PasteSummary {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body of `GET /profile`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Profile {
    pub name: String,
    pub email: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub pastes: Vec<PasteSummary>,
}

/// A user without pastes gets `"pastes": null` from the server.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<PasteSummary>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<PasteSummary>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProfileViewState {
    #[default]
    Loading,
    Ready,
    Error,
}

/// Local view of the profile page. Failed requests never clear it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfileView {
    ui_state: ProfileViewState,
    name: String,
    email: String,
    pastes: Vec<PasteSummary>,
}

impl ProfileView {
    pub fn ui_state(&self) -> ProfileViewState {
        self.ui_state.clone()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn pastes(&self) -> &[PasteSummary] {
        &self.pastes
    }

    pub fn set_ready(&mut self, profile: Profile) {
        self.name = profile.name;
        self.email = profile.email;
        self.pastes = profile.pastes;
        self.ui_state = ProfileViewState::Ready;
    }

    /// Marks a failed initial load. A view that already has data keeps it.
    pub fn set_error(&mut self) {
        if self.ui_state == ProfileViewState::Loading {
            self.ui_state = ProfileViewState::Error;
        }
    }

    pub fn remove_paste(&mut self, id: &str) -> bool {
        let before = self.pastes.len();
        self.pastes.retain(|paste| paste.id != id);
        self.pastes.len() != before
    }
}
