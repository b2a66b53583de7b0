//! プロパティアクセス時の名前解決
//!
//! 生成コードがローカライズされた識別子でプロパティにアクセスする直前に呼ぶ。
//! レジストリ API と違い、翻訳が見つからなければ元の名前をそのまま返し、
//! ストアの割り当ても行わない。

use crate::object::HostObject;
use crate::registry::TranslationRegistry;
use crate::types::StoreKey;

impl TranslationRegistry {
    /// ローカライズされた名前を正規の名前に変換する
    ///
    /// `object` が `None`、ストアを持てないホストオブジェクト、翻訳が未登録、
    /// または翻訳が空文字列の場合は `name` をそのまま返す。
    #[must_use]
    pub fn lookup_name<'a>(
        &'a self,
        object: Option<&dyn HostObject>,
        language: &str,
        name: &'a str,
    ) -> &'a str {
        let Some(object) = object else {
            return name;
        };
        self.resolve_or_identity(object, &StoreKey::forward(self.lang_remap(language), name), name)
    }

    /// 逆方向の変換（正規の名前 → ローカライズされた名前）
    ///
    /// `object` は常に有効なオブジェクトとして渡される。ストアを持てない場合の
    /// フォールバックは `lookup_name` と同じ。
    #[must_use]
    pub fn reverse_lookup_name<'a>(
        &'a self,
        object: &dyn HostObject,
        language: &str,
        name: &'a str,
    ) -> &'a str {
        self.resolve_or_identity(object, &StoreKey::reverse(self.lang_remap(language), name), name)
    }

    /// 最も近いストアからキーを解決し、なければ `fallback` を返す
    fn resolve_or_identity<'a>(
        &'a self,
        object: &dyn HostObject,
        key: &StoreKey,
        fallback: &'a str,
    ) -> &'a str {
        let Some(translatable) = object.translation_support() else {
            tracing::trace!(%key, "Object cannot carry translations, using name as-is");
            return fallback;
        };
        let store = self.stores().nearest_store(translatable);
        self.stores()
            .resolve(store, key)
            .filter(|translated| !translated.is_empty())
            .unwrap_or(fallback)
    }
}
