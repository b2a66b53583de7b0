//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のヘルパー関数を提供します。
#![cfg(test)]

use std::sync::Arc;

use crate::language::LanguageRemap;
use crate::object::{
    HostObject,
    PlainObject,
    SupportsTranslation,
};
use crate::registry::TranslationRegistry;

/// ストアを持てないホストオブジェクト
#[derive(Debug, Clone, Copy)]
pub(crate) struct ForeignObject;

impl HostObject for ForeignObject {
    fn translation_support(&self) -> Option<&dyn SupportsTranslation> {
        None
    }
}

/// テスト用のレジストリとルートオブジェクトを作成する
///
/// 別名表には `en_US` と `en-GB` → `en` が登録されている。
pub(crate) fn registry_with_root() -> (TranslationRegistry, Arc<PlainObject>) {
    let root = PlainObject::new_root();
    let remap: LanguageRemap = [("en_US", "en"), ("en-GB", "en")].into_iter().collect();
    (TranslationRegistry::new(root.id(), remap), root)
}
