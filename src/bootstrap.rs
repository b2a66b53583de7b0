//! 起動時の初期化
//!
//! 言語コードの別名表と、標準ライブラリの翻訳の一括登録を一度だけ行う。

use crate::config::{
    ConfigError,
    RuntimeSettings,
    StandardTranslation,
};
use crate::language::LanguageRemap;
use crate::object::SupportsTranslation;
use crate::registry::TranslationRegistry;
use crate::types::ObjectId;

/// 一括登録の結果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstallReport {
    /// 登録した翻訳の数
    pub installed: usize,
    /// 対象オブジェクトが見つからずスキップした数
    pub unresolved: usize,
}

impl TranslationRegistry {
    /// 設定の別名表を使ってレジストリを作成
    ///
    /// # Errors
    /// 設定がバリデーションに失敗した場合は `ConfigError::ValidationErrors`
    pub fn from_settings(root: ObjectId, settings: &RuntimeSettings) -> Result<Self, ConfigError> {
        settings.validate().map_err(ConfigError::ValidationErrors)?;

        let remap: LanguageRemap = settings
            .language_remap
            .iter()
            .map(|(alias, canonical)| (alias.as_str(), canonical.as_str()))
            .collect();
        Ok(Self::new(root, remap))
    }

    /// 標準ライブラリの翻訳をまとめて登録する
    ///
    /// `resolve` は `"Array.prototype"` のような対象名をホストオブジェクトに変換する。
    /// 見つからない対象はログを出してスキップする。
    pub fn install_standard_translations<'h, F>(
        &mut self,
        entries: &[StandardTranslation],
        mut resolve: F,
    ) -> InstallReport
    where
        F: FnMut(&str) -> Option<&'h dyn SupportsTranslation>,
    {
        let mut report = InstallReport::default();

        for entry in entries {
            let Some(target) = resolve(&entry.target) else {
                tracing::warn!(object_path = %entry.target, "Unknown translation target, skipping");
                report.unresolved += 1;
                continue;
            };
            self.add_translation(target, &entry.language, &entry.localized, &entry.canonical);
            report.installed += 1;
        }

        tracing::debug!(
            installed = report.installed,
            unresolved = report.unresolved,
            "Installed standard translations"
        );
        report
    }
}

/// 別名表の設定と標準ライブラリの翻訳登録を一度に行う
///
/// # Errors
/// 設定がバリデーションに失敗した場合は何も登録せずに `ConfigError::ValidationErrors`
pub fn bootstrap<'h, F>(
    root: ObjectId,
    settings: &RuntimeSettings,
    resolve: F,
) -> Result<(TranslationRegistry, InstallReport), ConfigError>
where
    F: FnMut(&str) -> Option<&'h dyn SupportsTranslation>,
{
    let mut registry = TranslationRegistry::from_settings(root, settings)?;
    let report = registry.install_standard_translations(&settings.standard_translations, resolve);
    Ok((registry, report))
}
