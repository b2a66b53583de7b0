//! 翻訳テーブルを持てるオブジェクトの抽象
//!
//! ホスト側のオブジェクトは `SupportsTranslation` を実装することで
//! レジストリからストアを割り当ててもらえるようになる。
//! ストアを持てないオブジェクト（ホスト固有のオブジェクトなど）は
//! `HostObject::translation_support` で `None` を返し、
//! アクセス時の名前解決では翻訳なしとして扱われる。
//!
//! ストアの寿命はオブジェクトに従う。`SupportsTranslation::liveness` が返す
//! `Weak` が切れたオブジェクトのストアは、レジストリが次に掃除するときに破棄される。

use std::sync::{
    Arc,
    Weak,
};
use std::sync::atomic::{
    AtomicU64,
    Ordering,
};

use crate::types::ObjectId;

/// ストアを割り当て可能なオブジェクト
pub trait SupportsTranslation {
    /// オブジェクトの同一性
    fn object_id(&self) -> ObjectId;

    /// 委譲先（プロトタイプ）
    ///
    /// `None` の場合、ストアはルートストアに連結される。
    fn delegation_parent(&self) -> Option<&dyn SupportsTranslation>;

    /// 生存を監視するハンドル
    ///
    /// `None` の場合はレジストリより長く生きるものとみなし、ストアを破棄しない。
    fn liveness(&self) -> Option<Weak<()>> {
        None
    }
}

/// アクセス時の名前解決に渡される任意のホストオブジェクト
pub trait HostObject {
    /// ストアを持てるなら `Some`
    fn translation_support(&self) -> Option<&dyn SupportsTranslation>;
}

/// `PlainObject` の ID 採番用カウンタ
static NEXT_OBJECT_ID: AtomicU64 = AtomicU64::new(1);

/// プロトタイプチェーンだけを持つ最小のホストオブジェクト
#[derive(Debug)]
pub struct PlainObject {
    /// 同一性
    id: ObjectId,
    /// 委譲先
    prototype: Option<Arc<PlainObject>>,
    /// オブジェクトと同時に解放される生存トークン
    alive: Arc<()>,
}

impl PlainObject {
    /// 委譲チェーンの根となるオブジェクトを作成
    #[must_use]
    pub fn new_root() -> Arc<Self> {
        Arc::new(Self { id: next_id(), prototype: None, alive: Arc::new(()) })
    }

    /// `prototype` に委譲するオブジェクトを作成
    #[must_use]
    pub fn derive(prototype: &Arc<Self>) -> Arc<Self> {
        Arc::new(Self {
            id: next_id(),
            prototype: Some(Arc::clone(prototype)),
            alive: Arc::new(()),
        })
    }

    /// 委譲先を持たないオブジェクトを作成（`Object.create(null)` 相当）
    #[must_use]
    pub fn detached() -> Arc<Self> {
        Self::new_root()
    }

    #[must_use]
    pub const fn id(&self) -> ObjectId {
        self.id
    }

    #[must_use]
    pub const fn prototype(&self) -> Option<&Arc<Self>> {
        self.prototype.as_ref()
    }
}

impl SupportsTranslation for PlainObject {
    fn object_id(&self) -> ObjectId {
        self.id
    }

    fn delegation_parent(&self) -> Option<&dyn SupportsTranslation> {
        self.prototype.as_deref().map(|parent| -> &dyn SupportsTranslation { parent })
    }

    fn liveness(&self) -> Option<Weak<()>> {
        Some(Arc::downgrade(&self.alive))
    }
}

impl HostObject for PlainObject {
    fn translation_support(&self) -> Option<&dyn SupportsTranslation> {
        Some(self)
    }
}

/// 新しい `ObjectId` を採番
fn next_id() -> ObjectId {
    ObjectId::new(NEXT_OBJECT_ID.fetch_add(1, Ordering::Relaxed))
}
