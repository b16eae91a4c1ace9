use reqwest::{header, Method, RequestBuilder, StatusCode};
use tokio::runtime::Handle;
use url::Url;

use crate::{
    domain::profile::Profile,
    infra::{
        config::{AuthConfig, ProfileConfig},
        error::AppError,
    },
    usecases::profile::{ProfileSource, ProfileSourceError},
};

const PROFILE_REQUEST_FAILED: &str = "PROFILE_REQUEST_FAILED";
const PROFILE_BODY_INVALID: &str = "PROFILE_BODY_INVALID";

/// Blocking facade over the async HTTP client, driven on the app runtime.
pub struct HttpProfileClient {
    runtime: Handle,
    client: reqwest::Client,
    base_url: Url,
    token: Option<String>,
}

impl std::fmt::Debug for HttpProfileClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpProfileClient")
            .field("base_url", &self.base_url.as_str())
            .field("authenticated", &self.token.is_some())
            .finish()
    }
}

impl HttpProfileClient {
    pub fn new(runtime: Handle, profile: &ProfileConfig, auth: &AuthConfig) -> Result<Self, AppError> {
        let base_url =
            Url::parse(profile.base_url.trim()).map_err(|source| AppError::InvalidProfileUrl {
                url: profile.base_url.clone(),
                source,
            })?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::InvalidProfileUrl {
                url: profile.base_url.clone(),
                source: url::ParseError::RelativeUrlWithCannotBeABaseBase,
            });
        }

        let client = reqwest::Client::builder()
            .build()
            .map_err(AppError::HttpClientInit)?;

        Ok(Self {
            runtime,
            client,
            base_url,
            token: auth.token.clone(),
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ProfileSourceError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ProfileSourceError::Unavailable)?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match &self.token {
            Some(token) => builder.header(header::COOKIE, format!("token={token}")),
            None => builder,
        }
    }

    async fn execute(&self, builder: RequestBuilder) -> Result<reqwest::Response, ProfileSourceError> {
        let response = builder.send().await.map_err(|error| {
            tracing::warn!(
                code = PROFILE_REQUEST_FAILED,
                error = %error.without_url(),
                "profile request did not complete"
            );
            ProfileSourceError::Unavailable
        })?;

        match map_status(response.status()) {
            None => Ok(response),
            Some(error) => {
                tracing::warn!(
                    code = PROFILE_REQUEST_FAILED,
                    status = response.status().as_u16(),
                    "profile request rejected"
                );
                Err(error)
            }
        }
    }
}

impl ProfileSource for HttpProfileClient {
    fn fetch_profile(&self) -> Result<Profile, ProfileSourceError> {
        let url = self.endpoint(&["profile"])?;

        self.runtime.block_on(async {
            let response = self.execute(self.request(Method::GET, url)).await?;
            response.json::<Profile>().await.map_err(|error| {
                tracing::warn!(
                    code = PROFILE_BODY_INVALID,
                    error = %error.without_url(),
                    "profile body could not be decoded"
                );
                ProfileSourceError::InvalidData
            })
        })
    }

    fn delete_paste(&self, paste_id: &str) -> Result<(), ProfileSourceError> {
        let url = self.endpoint(&["pastes", paste_id, "delete"])?;

        self.runtime.block_on(async {
            self.execute(self.request(Method::POST, url)).await?;
            Ok(())
        })
    }
}

fn map_status(status: StatusCode) -> Option<ProfileSourceError> {
    if status.is_success() {
        return None;
    }

    Some(match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProfileSourceError::Unauthorized,
        StatusCode::NOT_FOUND => ProfileSourceError::NotFound,
        _ => ProfileSourceError::Unavailable,
    })
}
