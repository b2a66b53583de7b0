//! 翻訳ストアの割り当てと層状ルックアップ
//!
//! 全ストアは `StoreArena` がまとめて所有し、オブジェクトの同一性から
//! `StoreId` を引く。各ストアは自分のエントリと親ストアの `StoreId` を持ち、
//! 見つからないキーは親へ、最終的にはルートストアへとフォールバックする。
//!
//! `StoreId` は作成順に採番して再利用しない。親ストアは必ず子より先に
//! 作られるので親の ID は子より小さく、フォールバックは必ず停止する。
//!
//! 所有者が解放されたストアは、新しいストアを作る前の掃除でまとめて破棄する。
//! 生きているストアの親になっているストアは、子がなくなるまで残す。

use std::cmp::Reverse;
use std::collections::{
    HashMap,
    HashSet,
};
use std::sync::Weak;

use crate::object::SupportsTranslation;
use crate::types::{
    ObjectId,
    StoreKey,
};

/// 掃除を始めるストア数の下限
const MIN_SWEEP_THRESHOLD: usize = 64;

/// `StoreArena` 内のストアを指すハンドル
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StoreId(usize);

impl StoreId {
    /// ルートストア
    pub const ROOT: Self = Self(0);
}

/// 1 オブジェクト分のストア
#[derive(Debug)]
struct LayeredStore {
    /// このオブジェクト自身のエントリ
    entries: HashMap<StoreKey, String>,
    /// フォールバック先（ルートストアのみ `None`）
    parent: Option<StoreId>,
    /// 所有者
    owner: ObjectId,
    /// 所有者の生存監視（`None` は破棄しない）
    liveness: Option<Weak<()>>,
    /// このストアを親とするストアの数
    children: usize,
}

impl LayeredStore {
    /// 所有者が解放済みで、子ストアもない
    fn is_reclaimable(&self) -> bool {
        self.children == 0 && self.liveness.as_ref().is_some_and(|alive| alive.strong_count() == 0)
    }
}

/// 全オブジェクトのストアを所有するアリーナ
#[derive(Debug)]
pub struct StoreArena {
    /// ストア本体
    layers: HashMap<StoreId, LayeredStore>,
    /// オブジェクト → 所有ストア（所有者が生きている間は変更しない）
    owners: HashMap<ObjectId, StoreId>,
    /// 次に採番する `StoreId`
    next_id: usize,
    /// この数に達したら次の割り当て前に掃除する
    sweep_at: usize,
}

impl StoreArena {
    /// ルートオブジェクトにルートストアを割り当てた状態で作成
    ///
    /// ルートストアは所有者の生存にかかわらず破棄しない。
    #[must_use]
    pub fn new(root: ObjectId) -> Self {
        let root_store = LayeredStore {
            entries: HashMap::new(),
            parent: None,
            owner: root,
            liveness: None,
            children: 0,
        };
        Self {
            layers: HashMap::from([(StoreId::ROOT, root_store)]),
            owners: HashMap::from([(root, StoreId::ROOT)]),
            next_id: 1,
            sweep_at: MIN_SWEEP_THRESHOLD,
        }
    }

    /// オブジェクトがすでに所有しているストア
    #[must_use]
    pub fn store_of(&self, object: ObjectId) -> Option<StoreId> {
        self.owners.get(&object).copied()
    }

    /// 保持しているストアの数（ルートストアを含む）
    ///
    /// 解放されたオブジェクトのストアは次の掃除まで数に含まれる。
    #[must_use]
    pub fn store_count(&self) -> usize {
        self.layers.len()
    }

    /// オブジェクトのストアを返す。なければ委譲チェーンをたどって作成する
    ///
    /// 委譲先にストアがなければ先にそちらを作り、新しいストアはその親ストアに
    /// 連結される。すでにストアを持つオブジェクトには何もしない。
    pub fn ensure_store(&mut self, object: &dyn SupportsTranslation) -> StoreId {
        if self.layers.len() >= self.sweep_at {
            self.sweep();
        }

        let mut pending = Vec::new();
        let mut seen = HashSet::new();
        let mut base = StoreId::ROOT;
        let mut cursor = Some(object);

        while let Some(current) = cursor {
            let id = current.object_id();
            if let Some(existing) = self.store_of(id) {
                base = existing;
                break;
            }
            if !seen.insert(id) {
                tracing::warn!(object = %id, "Delegation cycle detected, anchoring at root store");
                break;
            }
            pending.push((id, current.liveness()));
            cursor = current.delegation_parent();
        }

        // 根に近い方から順に作成する
        for (id, liveness) in pending.into_iter().rev() {
            base = self.attach(id, liveness, base);
        }
        base
    }

    /// 委譲チェーン上で最も近いストア（作成はしない）
    #[must_use]
    pub fn nearest_store(&self, object: &dyn SupportsTranslation) -> StoreId {
        let mut seen = HashSet::new();
        let mut cursor = Some(object);

        while let Some(current) = cursor {
            let id = current.object_id();
            if let Some(existing) = self.store_of(id) {
                return existing;
            }
            if !seen.insert(id) {
                break;
            }
            cursor = current.delegation_parent();
        }
        StoreId::ROOT
    }

    /// 親ストアまでさかのぼってキーを解決する
    #[must_use]
    pub fn resolve(&self, store: StoreId, key: &StoreKey) -> Option<&str> {
        let mut cursor = Some(store);
        while let Some(id) = cursor {
            let layer = self.layers.get(&id)?;
            if let Some(value) = layer.entries.get(key) {
                tracing::trace!(%key, ?store, owner = ?id, "Resolved translation entry");
                return Some(value);
            }
            cursor = layer.parent;
        }
        None
    }

    /// ストア自身のエントリのみを参照する
    #[must_use]
    pub fn own_entry(&self, store: StoreId, key: &StoreKey) -> Option<&str> {
        self.layers.get(&store)?.entries.get(key).map(String::as_str)
    }

    /// ストア自身にエントリを書き込み、以前の値を返す
    pub(crate) fn insert(&mut self, store: StoreId, key: StoreKey, value: String) -> Option<String> {
        let Some(layer) = self.layers.get_mut(&store) else {
            tracing::error!(?store, %key, "Write to unknown store ignored");
            return None;
        };
        layer.entries.insert(key, value)
    }

    /// ストア自身のエントリを削除する（親ストアには触れない）
    pub(crate) fn remove(&mut self, store: StoreId, key: &StoreKey) -> Option<String> {
        self.layers.get_mut(&store)?.entries.remove(key)
    }

    /// 新しい空のストアを作成し、オブジェクトに割り当てる
    fn attach(&mut self, object: ObjectId, liveness: Option<Weak<()>>, parent: StoreId) -> StoreId {
        let id = StoreId(self.next_id);
        self.next_id += 1;
        if let Some(parent_layer) = self.layers.get_mut(&parent) {
            parent_layer.children += 1;
        }
        self.layers.insert(
            id,
            LayeredStore { entries: HashMap::new(), parent: Some(parent), owner: object, liveness, children: 0 },
        );
        self.owners.insert(object, id);
        tracing::debug!(%object, store = ?id, ?parent, "Attached translation store");
        id
    }

    /// 所有者が解放されたストアを破棄する
    fn sweep(&mut self) {
        let before = self.layers.len();
        let mut ids: Vec<StoreId> = self.layers.keys().copied().collect();
        // 子は親より大きい ID を持つので、降順なら子が先に外れる
        ids.sort_unstable_by_key(|&id| Reverse(id));

        for id in ids {
            let Some(layer) = self.layers.get(&id) else {
                continue;
            };
            if !layer.is_reclaimable() {
                continue;
            }
            let (owner, parent) = (layer.owner, layer.parent);
            self.layers.remove(&id);
            if self.owners.get(&owner) == Some(&id) {
                self.owners.remove(&owner);
            }
            if let Some(parent_layer) = parent.and_then(|parent| self.layers.get_mut(&parent)) {
                parent_layer.children = parent_layer.children.saturating_sub(1);
            }
        }

        self.sweep_at = (self.layers.len() * 2).max(MIN_SWEEP_THRESHOLD);
        tracing::debug!(
            reclaimed = before - self.layers.len(),
            live = self.layers.len(),
            "Swept translation stores of dropped objects"
        );
    }
}
