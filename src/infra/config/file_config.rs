use std::path::PathBuf;

use serde::Deserialize;

use crate::{
    domain::envelope::SenderRole,
    infra::config::{AppConfig, AuthConfig, ChatConfig, LogConfig, ProfileConfig},
};

#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    pub logging: Option<FileLogConfig>,
    pub chat: Option<FileChatConfig>,
    pub profile: Option<FileProfileConfig>,
    pub auth: Option<FileAuthConfig>,
}

impl FileConfig {
    pub fn merge_into(self, config: &mut AppConfig) {
        if let Some(logging) = self.logging {
            logging.merge_into(&mut config.logging);
        }

        if let Some(chat) = self.chat {
            chat.merge_into(&mut config.chat);
        }

        if let Some(profile) = self.profile {
            profile.merge_into(&mut config.profile);
        }

        if let Some(auth) = self.auth {
            auth.merge_into(&mut config.auth);
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileLogConfig {
    pub level: Option<String>,
    pub file: Option<PathBuf>,
}

impl FileLogConfig {
    fn merge_into(self, config: &mut LogConfig) {
        if let Some(level) = self.level {
            config.level = level;
        }

        if let Some(file) = self.file {
            config.file = Some(file);
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileChatConfig {
    pub endpoint: Option<String>,
    pub chat_id: Option<String>,
    pub sender: Option<SenderRole>,
}

impl FileChatConfig {
    fn merge_into(self, config: &mut ChatConfig) {
        if let Some(endpoint) = self.endpoint {
            config.endpoint = endpoint;
        }

        if let Some(chat_id) = self.chat_id {
            config.chat_id = chat_id;
        }

        if let Some(sender) = self.sender {
            config.sender = sender;
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileProfileConfig {
    pub base_url: Option<String>,
}

impl FileProfileConfig {
    fn merge_into(self, config: &mut ProfileConfig) {
        if let Some(base_url) = self.base_url {
            config.base_url = base_url;
        }
    }
}

#[derive(Deserialize, Default)]
pub struct FileAuthConfig {
    pub token: Option<String>,
}

impl std::fmt::Debug for FileAuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileAuthConfig")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl FileAuthConfig {
    fn merge_into(self, config: &mut AuthConfig) {
        if let Some(token) = self.token.filter(|token| !token.trim().is_empty()) {
            config.token = Some(token);
        }
    }
}
