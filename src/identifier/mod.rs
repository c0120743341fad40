//! 口述邮箱标识符规范化
//!
//! 把语音转写（可能经过 LLM 预清洗）转成合法的邮箱用户名、域名与完整地址。
//!
//! ## 处理流程
//! 1. Unicode 归一化 + 空白折叠
//! 2. 语言检测（文字特征 → 词汇打分 → 提示 / 默认）
//! 3. 口语符号翻译（本语言词表优先，英语兜底）
//! 4. 文字规范化（按文字族音译为 ASCII）
//! 5. 用户名校验 / 域名解析（知名服务商、顶级域、建议）
//! 6. 组装完整地址并重新校验

mod assembler;
mod cleanup;
mod detector;
mod domain;
mod engine;
mod profiles;
mod script;
mod symbols;
mod tld;
mod tokenizer;
mod translit;
mod types;
mod validator;

pub use assembler::{AssembledEmail, EmailAssembler};
pub use cleanup::sanitize_cleanup_output;
pub use detector::{Detection, DetectionSource, LanguageDetector};
pub use domain::{DomainRecord, DomainResolution, DomainResolver, DOMAIN_RECORDS};
pub use engine::{EmailOutcome, IdentifierEngine};
pub use profiles::{
    default_profile, normalize_language_tag, profile, Direction, LanguageProfile, ScriptFamily,
    PROFILES,
};
pub use script::ScriptNormalizer;
pub use symbols::SymbolWordTranslator;
pub use tld::{TldCategory, TldTable};
pub use types::{EmailAddress, ErrorKind, NormalizationRequest, NormalizationResult, Outcome, Role};
pub use validator::{IdentifierValidator, ValidationOutcome};
