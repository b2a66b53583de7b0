//! 翻訳レジストリの公開 API に関するテスト

#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use std::sync::Arc;

use babyl_translations::config::{
    ConfigError,
    RuntimeSettings,
};
use babyl_translations::{
    HostObject,
    LanguageRemap,
    PlainObject,
    bootstrap,
    SupportsTranslation,
    TranslationRegistry,
};
use googletest::prelude::*;
use rstest::*;

/// ルート → `parent` → `child` の委譲チェーン
struct Chain {
    /// ルートストアを持つレジストリ
    registry: TranslationRegistry,
    /// ルートに委譲するオブジェクト
    parent: Arc<PlainObject>,
    /// `parent` に委譲するオブジェクト
    child: Arc<PlainObject>,
}

/// 翻訳のない委譲チェーンを作成
#[fixture]
fn chain() -> Chain {
    let root = PlainObject::new_root();
    let parent = PlainObject::derive(&root);
    let child = PlainObject::derive(&parent);
    let remap: LanguageRemap = [("en_US", "en")].into_iter().collect();
    Chain { registry: TranslationRegistry::new(root.id(), remap), parent, child }
}

#[rstest]
fn round_trip(chain: Chain) {
    let Chain { mut registry, child, .. } = chain;

    registry.add_translation(&*child, "fr", "longueur", "length");

    assert_that!(registry.get_translation(&*child, "fr", "longueur"), some(eq("length")));
    assert_that!(registry.get_reverse_translation(&*child, "fr", "length"), some(eq("longueur")));
}

#[rstest]
fn deletion_symmetry(chain: Chain) {
    let Chain { mut registry, child, .. } = chain;

    registry.add_translation(&*child, "fr", "a", "b");
    registry.del_translation(&*child, "fr", "a");

    assert_that!(registry.get_translation(&*child, "fr", "a"), none());
    assert_that!(registry.get_reverse_translation(&*child, "fr", "b"), none());
}

#[rstest]
fn inheritance_fallthrough(chain: Chain) {
    let Chain { mut registry, parent, child } = chain;

    registry.add_translation(&*parent, "fr", "a", "b");

    assert_that!(registry.get_translation(&*child, "fr", "a"), some(eq("b")));
    assert_that!(registry.get_reverse_translation(&*child, "fr", "b"), some(eq("a")));
}

#[rstest]
fn inheritance_reaches_root_store() {
    let root = PlainObject::new_root();
    let mut registry = TranslationRegistry::new(root.id(), LanguageRemap::new());
    let mut deepest = PlainObject::derive(&root);
    for _ in 0..64 {
        deepest = PlainObject::derive(&deepest);
    }

    registry.add_translation(&*root, "de", "laenge", "length");

    assert_that!(registry.get_translation(&*deepest, "de", "laenge"), some(eq("length")));
}

#[rstest]
fn inheritance_sees_later_parent_updates(chain: Chain) {
    let Chain { mut registry, parent, child } = chain;

    let _ = registry.get_translation(&*child, "fr", "a");
    registry.add_translation(&*parent, "fr", "a", "b");

    assert_that!(registry.get_translation(&*child, "fr", "a"), some(eq("b")));
}

#[rstest]
fn override_shadowing(chain: Chain) {
    let Chain { mut registry, parent, child } = chain;

    registry.add_translation(&*parent, "fr", "a", "b");
    registry.add_translation(&*child, "fr", "a", "c");

    assert_that!(registry.get_translation(&*child, "fr", "a"), some(eq("c")));
    assert_that!(registry.get_translation(&*parent, "fr", "a"), some(eq("b")));
}

#[rstest]
fn non_destructive_delete(chain: Chain) {
    let Chain { mut registry, parent, child } = chain;

    registry.add_translation(&*parent, "fr", "a", "b");
    let removed = registry.del_translation(&*child, "fr", "a");

    assert_that!(removed, none());
    assert_that!(registry.get_translation(&*parent, "fr", "a"), some(eq("b")));
    assert_that!(registry.get_translation(&*child, "fr", "a"), some(eq("b")));
}

#[rstest]
fn deleting_override_reveals_inherited(chain: Chain) {
    let Chain { mut registry, parent, child } = chain;

    registry.add_translation(&*parent, "fr", "a", "b");
    registry.add_translation(&*child, "fr", "a", "c");
    registry.del_translation(&*child, "fr", "a");

    assert_that!(registry.get_translation(&*child, "fr", "a"), some(eq("b")));
    assert_that!(registry.get_reverse_translation(&*child, "fr", "c"), none());
}

#[rstest]
fn language_alias_collapsing(chain: Chain) {
    let Chain { mut registry, child, .. } = chain;

    registry.add_translation(&*child, "en_US", "a", "b");

    assert_that!(registry.get_translation(&*child, "en", "a"), some(eq("b")));
    assert_that!(registry.del_translation(&*child, "en", "a"), some(eq("b")));
}

#[rstest]
fn unknown_language_identity(chain: Chain) {
    let Chain { mut registry, child, .. } = chain;

    assert_that!(registry.lang_remap("xx-unknown"), eq("xx-unknown"));
    assert_that!(registry.get_translation(&*child, "xx-unknown", "a"), none());
    assert_that!(registry.get_reverse_translation(&*child, "xx-unknown", "a"), none());
}

#[rstest]
fn idempotent_attach(chain: Chain) {
    let Chain { mut registry, child, .. } = chain;
    registry.add_translation(&*child, "fr", "a", "b");
    let count = registry.stores().store_count();

    let first = registry.ensure_store(&*child);
    let second = registry.ensure_store(&*child);

    assert_that!(first, eq(second));
    assert_that!(registry.stores().store_count(), eq(count));
    assert_that!(registry.get_translation(&*child, "fr", "a"), some(eq("b")));
}

/// 翻訳を持てないホストオブジェクト
struct HostOnlyObject;

impl HostObject for HostOnlyObject {
    fn translation_support(&self) -> Option<&dyn SupportsTranslation> {
        None
    }
}

#[rstest]
fn access_helpers_fall_back_to_identity(chain: Chain) {
    let Chain { mut registry, parent, child } = chain;
    registry.add_translation(&*parent, "fr", "longueur", "length");

    assert_that!(registry.lookup_name(Some(&*child), "fr", "longueur"), eq("length"));
    assert_that!(registry.reverse_lookup_name(&*child, "fr", "length"), eq("longueur"));
    assert_that!(registry.lookup_name(Some(&HostOnlyObject), "fr", "longueur"), eq("longueur"));
    assert_that!(registry.reverse_lookup_name(&HostOnlyObject, "fr", "length"), eq("length"));
    assert_that!(registry.lookup_name(None, "fr", "longueur"), eq("longueur"));
}

#[rstest]
fn registry_can_be_shared_across_threads(chain: Chain) {
    let Chain { registry, parent, child } = chain;
    let shared = Arc::new(std::sync::Mutex::new(registry));

    let writer = {
        let shared = Arc::clone(&shared);
        let parent = Arc::clone(&parent);
        std::thread::spawn(move || {
            shared.lock().unwrap().add_translation(&*parent, "fr", "a", "b");
        })
    };
    writer.join().unwrap();

    let mut registry = shared.lock().unwrap();
    assert_that!(registry.get_translation(&*child, "fr", "a"), some(eq("b")));
}

#[rstest]
fn dropped_objects_release_their_stores(chain: Chain) {
    let Chain { mut registry, parent, .. } = chain;
    registry.add_translation(&*parent, "fr", "a", "b");

    for _ in 0..10_000 {
        let transient = PlainObject::derive(&parent);
        assert_that!(registry.get_translation(&*transient, "fr", "a"), some(eq("b")));
    }

    assert_that!(registry.stores().store_count(), le(64));
    assert_that!(registry.get_translation(&*parent, "fr", "a"), some(eq("b")));
}

#[rstest]
fn settings_from_json_drive_bootstrap() {
    let root = PlainObject::new_root();
    let settings = RuntimeSettings::from_json(
        r#"{
            "languageRemap": {"fr_FR": "fr"},
            "standardTranslations": [
                {"target": "babylroot", "language": "fr_FR", "localized": "alerte", "canonical": "alert"}
            ]
        }"#,
    )
    .unwrap();

    let global: &dyn SupportsTranslation = &*root;

    let (mut registry, report) =
        bootstrap(root.id(), &settings, |path| (path == "babylroot").then_some(global)).unwrap();

    assert_that!(report.installed, eq(1));
    assert_that!(registry.get_translation(&*root, "fr", "alerte"), some(eq("alert")));
}

#[rstest]
fn chained_language_alias_is_rejected_at_startup() {
    let root = PlainObject::new_root();
    let settings = RuntimeSettings {
        language_remap: [
            ("en_US".to_string(), "en-GB".to_string()),
            ("en-GB".to_string(), "en".to_string()),
        ]
        .into(),
        standard_translations: Vec::new(),
    };

    let result = TranslationRegistry::from_settings(root.id(), &settings);

    assert!(matches!(result, Err(ConfigError::ValidationErrors(_))));
    assert!(matches!(bootstrap(root.id(), &settings, |_| None), Err(ConfigError::ValidationErrors(_))));
}
