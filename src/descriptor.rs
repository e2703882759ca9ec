// パス: src/descriptor.rs
// 役割: 解決器が供給する宣言（名前空間・クラス・関数・コンストラクタ・プロパティ）の表を提供する
// 意図: 呼び出し先の完全修飾名・オーバーライド元・ネイティブタグを同一性ベースで引けるようにする
// 関連ファイル: src/call.rs, src/intrinsics/patterns.rs, src/intrinsics/functions.rs
//! 宣言モデル
//!
//! - 宣言はアリーナ（`Vec`）に格納し、`DeclId` で同一性を表す。
//! - 真のルート名前空間は常に 1 つで、完全修飾名には含めない。
//! - 組み込みの関数型クラス `FunctionN` / `ExtensionFunctionN` は表の生成時に登録する。

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::errors::{LoweringError, LoweringResult};

/// 言語ランタイムのルートパッケージ名。
pub const RUNTIME_ROOT_PACKAGE: &str = "jet";
/// コンストラクタの名前。
pub const CONSTRUCTOR_NAME: &str = "<init>";
/// 関数値の呼び出し演算子名。
pub const INVOKE_NAME: &str = "invoke";
/// 組み込み関数型が用意される最大引数数。
pub const MAX_FUNCTION_ARITY: usize = 22;

const ROOT_NAME: &str = "<root>";

/// 宣言の同一性。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeclId(usize);

impl fmt::Display for DeclId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 宣言の種別。
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeclKind {
    Namespace,
    Class,
    Function {
        value_params: usize,
        /// 拡張レシーバ引数を宣言しているか。
        receiver_param: bool,
        /// 直接オーバーライドしている宣言。
        overridden: Vec<DeclId>,
    },
    Constructor {
        value_params: usize,
    },
    Property {
        /// ホスト側オブジェクトで直接表現される（ネイティブ）か。
        native: bool,
    },
}

/// 宣言 1 件。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub parent: Option<DeclId>,
    pub kind: DeclKind,
}

impl Declaration {
    /// 値引数の数。関数・コンストラクタ以外は 0。
    pub fn value_params(&self) -> usize {
        match &self.kind {
            DeclKind::Function { value_params, .. } | DeclKind::Constructor { value_params } => {
                *value_params
            }
            _ => 0,
        }
    }

    pub fn has_receiver_param(&self) -> bool {
        matches!(
            self.kind,
            DeclKind::Function {
                receiver_param: true,
                ..
            }
        )
    }

    pub fn is_constructor(&self) -> bool {
        matches!(self.kind, DeclKind::Constructor { .. })
    }
}

/// 組み込み関数型クラスの同一性。
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuiltIns {
    functions: Vec<DeclId>,
    extension_functions: Vec<DeclId>,
}

impl BuiltIns {
    /// `FunctionN` クラス。
    pub fn function(&self, arity: usize) -> Option<DeclId> {
        self.functions.get(arity).copied()
    }

    /// `ExtensionFunctionN` クラス。
    pub fn extension_function(&self, arity: usize) -> Option<DeclId> {
        self.extension_functions.get(arity).copied()
    }
}

/// 束縛された型引数。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TypeRef {
    pub decl: DeclId,
}

impl TypeRef {
    pub const fn new(decl: DeclId) -> Self {
        Self { decl }
    }
}

/// 宣言表。
#[derive(Clone, Debug)]
pub struct DeclarationTable {
    decls: Vec<Declaration>,
    /// 親ごと・名前ごとの子宣言（登録順）。
    children: BTreeMap<DeclId, BTreeMap<String, Vec<DeclId>>>,
    builtins: BuiltIns,
}

impl Default for DeclarationTable {
    fn default() -> Self {
        Self::new()
    }
}

impl DeclarationTable {
    /// ルート名前空間と組み込み関数型を持つ表を作る。
    pub fn new() -> Self {
        let mut table = Self {
            decls: vec![Declaration {
                name: ROOT_NAME.into(),
                parent: None,
                kind: DeclKind::Namespace,
            }],
            children: BTreeMap::new(),
            builtins: BuiltIns::default(),
        };
        let runtime_root = table.add_namespace(table.root(), RUNTIME_ROOT_PACKAGE);
        for arity in 0..=MAX_FUNCTION_ARITY {
            let plain = table.add_class(runtime_root, format!("Function{arity}"));
            table.add_function(plain, INVOKE_NAME, arity, false);
            table.builtins.functions.push(plain);

            let ext = table.add_class(runtime_root, format!("ExtensionFunction{arity}"));
            table.add_function(ext, INVOKE_NAME, arity, true);
            table.builtins.extension_functions.push(ext);
        }
        table
    }

    pub fn root(&self) -> DeclId {
        DeclId(0)
    }

    pub fn builtins(&self) -> &BuiltIns {
        &self.builtins
    }

    fn push(&mut self, parent: DeclId, name: impl Into<String>, kind: DeclKind) -> DeclId {
        let id = DeclId(self.decls.len());
        let name = name.into();
        self.children
            .entry(parent)
            .or_default()
            .entry(name.clone())
            .or_default()
            .push(id);
        self.decls.push(Declaration {
            name,
            parent: Some(parent),
            kind,
        });
        id
    }

    /// 子の名前空間を追加する。同名の名前空間が既にあればそれを返す。
    pub fn add_namespace(&mut self, parent: DeclId, name: &str) -> DeclId {
        if let Some(existing) = self.find_child(parent, name, |k| matches!(k, DeclKind::Namespace)) {
            return existing;
        }
        self.push(parent, name, DeclKind::Namespace)
    }

    /// `"java.util"` のようなドット区切りパスの名前空間を（必要なら作成して）返す。
    pub fn namespace_path(&mut self, path: &str) -> DeclId {
        let mut current = self.root();
        for segment in path.split('.').filter(|s| !s.is_empty()) {
            current = self.add_namespace(current, segment);
        }
        current
    }

    /// クラスを追加する。同名のクラスが既にあればそれを返す。
    pub fn add_class(&mut self, parent: DeclId, name: impl Into<String>) -> DeclId {
        let name = name.into();
        if let Some(existing) = self.find_child(parent, &name, |k| matches!(k, DeclKind::Class)) {
            return existing;
        }
        self.push(parent, name, DeclKind::Class)
    }

    /// ランタイムルートパッケージ直下の標準型クラスを返す。
    pub fn standard_class(&mut self, name: &str) -> DeclId {
        let runtime_root = self.namespace_path(RUNTIME_ROOT_PACKAGE);
        self.add_class(runtime_root, name)
    }

    pub fn add_function(
        &mut self,
        parent: DeclId,
        name: impl Into<String>,
        value_params: usize,
        receiver_param: bool,
    ) -> DeclId {
        self.push(
            parent,
            name,
            DeclKind::Function {
                value_params,
                receiver_param,
                overridden: Vec::new(),
            },
        )
    }

    /// 他の宣言をオーバーライドする関数を追加する。
    pub fn add_override(
        &mut self,
        parent: DeclId,
        name: impl Into<String>,
        value_params: usize,
        overridden: Vec<DeclId>,
    ) -> DeclId {
        self.push(
            parent,
            name,
            DeclKind::Function {
                value_params,
                receiver_param: false,
                overridden,
            },
        )
    }

    pub fn add_constructor(&mut self, class: DeclId, value_params: usize) -> DeclId {
        self.push(class, CONSTRUCTOR_NAME, DeclKind::Constructor { value_params })
    }

    pub fn add_property(&mut self, parent: DeclId, name: impl Into<String>, native: bool) -> DeclId {
        self.push(parent, name, DeclKind::Property { native })
    }

    fn find_child(
        &self,
        parent: DeclId,
        name: &str,
        kind: impl Fn(&DeclKind) -> bool,
    ) -> Option<DeclId> {
        self.children
            .get(&parent)?
            .get(name)?
            .iter()
            .copied()
            .find(|id| self.try_get(*id).is_some_and(|d| kind(&d.kind)))
    }

    /// `parent` 直下で名前が `name` の最初の宣言。
    pub fn member(&self, parent: DeclId, name: &str) -> Option<DeclId> {
        self.find_child(parent, name, |_| true)
    }

    pub fn get(&self, id: DeclId) -> LoweringResult<&Declaration> {
        self.decls
            .get(id.0)
            .ok_or(LoweringError::UnknownDeclaration { id: id.0 })
    }

    pub fn try_get(&self, id: DeclId) -> Option<&Declaration> {
        self.decls.get(id.0)
    }

    pub fn parent_of(&self, id: DeclId) -> Option<DeclId> {
        self.try_get(id).and_then(|d| d.parent)
    }

    pub fn is_root_namespace(&self, id: DeclId) -> bool {
        id == self.root()
    }

    /// ルートを除いた完全修飾名のセグメント列（外側から順）。
    pub fn qualified_segments(&self, id: DeclId) -> Vec<&str> {
        let mut segments = Vec::new();
        let mut current = Some(id);
        while let Some(cur) = current {
            if self.is_root_namespace(cur) {
                break;
            }
            let Some(decl) = self.try_get(cur) else {
                break;
            };
            segments.push(decl.name.as_str());
            current = decl.parent;
        }
        segments.reverse();
        segments
    }

    pub fn qualified_name(&self, id: DeclId) -> String {
        self.qualified_segments(id).join(".")
    }

    /// ネイティブタグ付きのプロパティ宣言か。
    pub fn is_native_property(&self, id: DeclId) -> bool {
        matches!(
            self.try_get(id).map(|d| &d.kind),
            Some(DeclKind::Property { native: true })
        )
    }

    /// 宣言自身と、推移的にオーバーライドしている全ての基底宣言を返す。
    pub fn original_declarations(&self, id: DeclId) -> Vec<DeclId> {
        let mut seen = BTreeSet::new();
        let mut order = Vec::new();
        let mut stack = vec![id];
        while let Some(cur) = stack.pop() {
            if !seen.insert(cur) {
                continue;
            }
            order.push(cur);
            if let Some(Declaration {
                kind: DeclKind::Function { overridden, .. },
                ..
            }) = self.try_get(cur)
            {
                stack.extend(overridden.iter().rev().copied());
            }
        }
        order
    }

    /// 標準型（ランタイムルート直下のクラス）なら単純名を返す。
    pub fn standard_type_name(&self, ty: TypeRef) -> Option<&str> {
        let decl = self.try_get(ty.decl)?;
        let package = self.try_get(decl.parent?)?;
        let is_runtime_root = package.name == RUNTIME_ROOT_PACKAGE
            && package.parent.is_some_and(|p| self.is_root_namespace(p));
        (is_runtime_root && matches!(decl.kind, DeclKind::Class)).then_some(decl.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qualified_segments_exclude_root() {
        let mut table = DeclarationTable::new();
        let util = table.namespace_path("java.util");
        let map = table.add_class(util, "HashMap");
        let ctor = table.add_constructor(map, 0);
        assert_eq!(table.qualified_segments(ctor), vec!["java", "util", "HashMap", "<init>"]);
        assert!(table.qualified_segments(table.root()).is_empty());
    }

    #[test]
    fn original_declarations_walk_transitively() {
        let mut table = DeclarationTable::new();
        let lang = table.namespace_path("java.lang");
        let appendable = table.add_class(lang, "Appendable");
        let base = table.add_function(appendable, "append", 1, false);
        let mid_class = table.add_class(lang, "AbstractBuilder");
        let mid = table.add_override(mid_class, "append", 1, vec![base]);
        let leaf_class = table.add_class(lang, "Builder");
        let leaf = table.add_override(leaf_class, "append", 1, vec![mid]);
        assert_eq!(table.original_declarations(leaf), vec![leaf, mid, base]);
    }

    #[test]
    fn standard_type_requires_runtime_root_directly_under_root() {
        let mut table = DeclarationTable::new();
        let int = table.standard_class("Int");
        assert_eq!(table.standard_type_name(TypeRef::new(int)), Some("Int"));
        let nested = table.namespace_path("my.jet");
        let fake = table.add_class(nested, "Int");
        assert_eq!(table.standard_type_name(TypeRef::new(fake)), None);
    }

    #[test]
    fn child_lookup_is_keyed_by_parent_name_and_kind() {
        let mut table = DeclarationTable::new();
        let util = table.namespace_path("java.util");
        assert_eq!(table.namespace_path("java.util"), util);
        let map = table.add_class(util, "HashMap");
        assert_eq!(table.add_class(util, "HashMap"), map);

        // 同名のクラスと名前空間は別の宣言になる
        let ns = table.add_namespace(util, "HashMap");
        assert_ne!(ns, map);
        assert_eq!(table.member(util, "HashMap"), Some(map));

        let first = table.add_function(map, "get", 1, false);
        table.add_function(map, "get", 2, false);
        assert_eq!(table.member(map, "get"), Some(first));
        assert_eq!(table.member(map, "put"), None);
    }
}
