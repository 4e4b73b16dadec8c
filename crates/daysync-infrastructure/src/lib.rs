pub mod config_service;
pub mod dto;
pub mod memory_repository;
pub mod paths;
pub mod secret_service;
pub mod storage;
pub mod toml_chat_session_repository;
pub mod toml_entry_repository;

pub use crate::config_service::ConfigService;
pub use crate::memory_repository::{InMemoryChatSessionRepository, InMemoryEntryRepository};
pub use crate::paths::{DaySyncPaths, PathError};
pub use crate::secret_service::{GEMINI_API_KEY_ENV, SecretServiceImpl};
pub use crate::toml_chat_session_repository::TomlChatSessionRepository;
pub use crate::toml_entry_repository::TomlEntryRepository;
