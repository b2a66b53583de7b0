//! 翻訳レジストリ
//!
//! オブジェクトごと・言語ごとの名前の対応を登録・削除・検索する。
//! すべての操作は最初に言語コードを正規化し、次にオブジェクトのストアを
//! 確保してから、順方向と逆方向の 2 つのエントリを読み書きする。

use crate::language::LanguageRemap;
use crate::object::SupportsTranslation;
use crate::store::{
    StoreArena,
    StoreId,
};
use crate::types::{
    ObjectId,
    StoreKey,
};

/// 翻訳レジストリ
///
/// 順方向（`lang->from`）と逆方向（`lang<-to`）のエントリは常に対で
/// 追加・削除される。1 つのストアの中では、言語ごとに対応が一対一になる。
#[derive(Debug)]
pub struct TranslationRegistry {
    /// 全オブジェクトのストア
    stores: StoreArena,
    /// 言語コードの別名表
    remap: LanguageRemap,
}

impl TranslationRegistry {
    /// `root` にルートストアを割り当てたレジストリを作成
    #[must_use]
    pub fn new(root: ObjectId, remap: LanguageRemap) -> Self {
        tracing::debug!(%root, aliases = remap.len(), "Creating translation registry");
        Self { stores: StoreArena::new(root), remap }
    }

    /// 言語コードを正規化する
    #[must_use]
    pub fn lang_remap<'a>(&'a self, language: &'a str) -> &'a str {
        self.remap.canonicalize(language)
    }

    /// オブジェクトのストアを確保する
    pub fn ensure_store(&mut self, object: &dyn SupportsTranslation) -> StoreId {
        self.stores.ensure_store(object)
    }

    /// ストアの一覧（読み取り専用）
    #[must_use]
    pub const fn stores(&self) -> &StoreArena {
        &self.stores
    }

    /// 翻訳を登録し、`to` を返す
    ///
    /// 同じ `from` または同じ `to` の既存の対応は上書きされる（後勝ち）。
    /// 上書きされた対の片割れも一緒に取り除くので、対になっていない
    /// エントリは残らない。
    pub fn add_translation<'t>(
        &mut self,
        object: &dyn SupportsTranslation,
        language: &str,
        from: &str,
        to: &'t str,
    ) -> &'t str {
        let language = self.remap.canonicalize(language);
        let store = self.stores.ensure_store(object);
        let forward = StoreKey::forward(language, from);
        let reverse = StoreKey::reverse(language, to);

        if let Some(previous_to) = self.stores.own_entry(store, &forward).map(str::to_string)
            && previous_to != to
        {
            self.stores.remove(store, &StoreKey::reverse(language, &previous_to));
        }
        // 逆方向エントリは `to` ごとに 1 つしか持てない。`a->b` の後に `x->b` を
        // 登録すると `a->b` の順方向側が孤立するので、対の不変条件を保つために
        // ここで削除する（古いランタイムは孤立したまま残していた）。
        if let Some(previous_from) = self.stores.own_entry(store, &reverse).map(str::to_string)
            && previous_from != from
        {
            tracing::debug!(
                object = %object.object_id(),
                language,
                evicted = %previous_from,
                to,
                "Replacing translation that targeted the same name"
            );
            self.stores.remove(store, &StoreKey::forward(language, &previous_from));
        }

        self.stores.insert(store, forward, to.to_string());
        self.stores.insert(store, reverse, from.to_string());
        tracing::debug!(object = %object.object_id(), language, from, to, "Added translation");
        to
    }

    /// オブジェクト自身が持つ翻訳を削除し、削除した翻訳先を返す
    ///
    /// 委譲先から継承しているだけの翻訳は削除しない。
    pub fn del_translation(
        &mut self,
        object: &dyn SupportsTranslation,
        language: &str,
        from: &str,
    ) -> Option<String> {
        let language = self.remap.canonicalize(language);
        let store = self.stores.ensure_store(object);

        let to = self.stores.remove(store, &StoreKey::forward(language, from))?;
        self.stores.remove(store, &StoreKey::reverse(language, &to));
        tracing::debug!(object = %object.object_id(), language, from, to = %to, "Deleted translation");
        Some(to)
    }

    /// `from` の翻訳先を委譲チェーン全体から探す
    pub fn get_translation(
        &mut self,
        object: &dyn SupportsTranslation,
        language: &str,
        from: &str,
    ) -> Option<&str> {
        let language = self.remap.canonicalize(language);
        let store = self.stores.ensure_store(object);
        self.stores.resolve(store, &StoreKey::forward(language, from))
    }

    /// `to` の翻訳元を委譲チェーン全体から探す
    pub fn get_reverse_translation(
        &mut self,
        object: &dyn SupportsTranslation,
        language: &str,
        to: &str,
    ) -> Option<&str> {
        let language = self.remap.canonicalize(language);
        let store = self.stores.ensure_store(object);
        self.stores.resolve(store, &StoreKey::reverse(language, to))
    }
}
