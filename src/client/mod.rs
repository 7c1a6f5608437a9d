//! 文本生成客户端：请求构造、响应解析、重试退避与失败分类。
//!
//! Text-generation client.
//!
//! | Item | Role |
//! |------|------|
//! | [`TextGenerator`] | Seam used by the orchestrator |
//! | [`TextGenClient`] | HTTP implementation with bounded retry loop |
//! | [`TextGenClientBuilder`] | Construction from an immutable config |
//! | [`RetryPolicy`] | One retry budget with exponential backoff |
//! | [`FailureKind`] | Classification of a failed attempt |

mod builder;
mod core;
mod error_classification;
mod policy;
mod request;
mod response;

pub use builder::TextGenClientBuilder;
pub use self::core::{GenerateOptions, TextGenClient, TextGenerator};
pub use error_classification::FailureKind;
pub use policy::{Decision, RetryPolicy};
pub use request::{ChatMessage, CompletionRequest};
pub use response::{parse_completion, CompletionBody};
