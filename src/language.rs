//! 言語コードの正規化
//!
//! 別名の言語コード（例: `en_US`）を正規の言語コードに置き換える。
//! ストアのキーを作る前に必ず通すことで、別名同士が同じキーに集約される。

use std::collections::HashMap;

/// 言語コードの別名 → 正規コードの対応表
///
/// 初期化時に一度だけ構築され、以降は読み取り専用。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageRemap {
    /// 別名 → 正規コード
    table: HashMap<String, String>,
}

impl LanguageRemap {
    /// 空の対応表を作成（すべての言語コードがそのまま返る）
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// 言語コードを正規化する
    ///
    /// 対応表にない言語コードはエラーにせず、そのまま返す。
    /// 空文字列にマップされた別名も未登録として扱う。
    #[must_use]
    pub fn canonicalize<'a>(&'a self, language: &'a str) -> &'a str {
        match self.table.get(language) {
            Some(canonical) if !canonical.is_empty() => canonical.as_str(),
            _ => language,
        }
    }

    /// 登録されている別名の数
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for LanguageRemap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self { table: iter.into_iter().map(|(alias, code)| (alias.into(), code.into())).collect() }
    }
}
