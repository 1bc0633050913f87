pub mod aggregate;
pub mod client;
pub mod dispatch;
pub mod error;
pub mod pool;
pub mod service;
pub mod tokenize;

pub use client::{HttpTranslationClient, Language, TranslationBackend, UnitFailure, UnitReply};
pub use error::TranslateError;
pub use pool::{DEFAULT_WORKERS, WorkerPool};
pub use service::{TranslationOutcome, TranslationRequest, Translator};
pub use tokenize::tokenize;
