//! babyl-translations
//!
//! オブジェクトごと・言語ごとの識別子の翻訳テーブル。
//! 翻訳は委譲チェーン（プロトタイプチェーン）に沿って継承される。

pub mod access;
pub mod bootstrap;
pub mod config;
pub mod language;
pub mod object;
pub mod registry;
pub mod store;
pub mod types;

mod test_utils;

pub use bootstrap::{
    InstallReport,
    bootstrap,
};
pub use language::LanguageRemap;
pub use object::{
    HostObject,
    PlainObject,
    SupportsTranslation,
};
pub use registry::TranslationRegistry;
pub use store::StoreId;
pub use types::{
    Direction,
    ObjectId,
    StoreKey,
};
