// パス: src/intrinsics/mod.rs
// 役割: intrinsic（特別扱いする標準ライブラリ呼び出し）の種類と適用処理を束ねる
// 意図: 照合述語とレジストリ、個々の変換戦略を一箇所から利用できるようにする
// 関連ファイル: src/intrinsics/registry.rs, src/intrinsics/patterns.rs, src/translator.rs
//! intrinsic 変換
//!
//! 各 intrinsic は状態を持たない純粋な変換で、解決済み呼び出し・変換済み引数・
//! コンテキストから出力先の式を 1 つ作る。入力は書き換えない。
//! 前提条件違反は `LoweringError` として即座に返す。

pub mod builtins;
pub mod collections;
pub mod functions;
pub mod patterns;
pub mod registry;
pub mod strings;

use crate::call::{LoweredCall, ResolvedCall};
use crate::descriptor::DeclarationTable;
use crate::errors::{LoweringError, LoweringResult};
use crate::namer::{CollectionKind, RuntimeNames};
use crate::target::TargetExpr;

pub use self::patterns::{pattern, NamePredicate, PathPattern, Predicate};
pub use self::registry::{IntrinsicEntry, IntrinsicRegistry};

/// intrinsic 適用時に参照する読み取り専用のコンテキスト。
#[derive(Clone, Copy, Debug)]
pub struct IntrinsicContext<'a> {
    pub decls: &'a DeclarationTable,
    pub names: &'a RuntimeNames,
}

/// ランタイムオブジェクト直下のヘルパ関数。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RuntimeHelper {
    Stringify,
    ArrayOfNulls,
}

/// ネイティブマップへのアクセス種別。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MapAccess {
    Get,
    Put,
}

/// 標準出力への書き込みメソッド。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConsoleMethod {
    Print,
    Println,
}

/// 変換戦略。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Intrinsic {
    /// 共有の等価性ヘルパ `equals(receiver, other)`。
    Equals,
    /// レシーバ（あれば）を先頭引数にしたランタイムヘルパ呼び出し。
    RuntimeFunction(RuntimeHelper),
    /// レシーバをそのまま返す。
    ReturnReceiver,
    Console(ConsoleMethod),
    IndexGet,
    IndexSet,
    NativeMap(MapAccess),
    SelectHashCollection(CollectionKind),
    StringBuilderNew,
    StringBuilderAppend,
    StringBuilderToString,
    FunctionInvoke,
    NewException,
}

impl Intrinsic {
    /// ログやエラーに出す名前。
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Equals => "equals",
            Self::RuntimeFunction(RuntimeHelper::Stringify) => "stringify",
            Self::RuntimeFunction(RuntimeHelper::ArrayOfNulls) => "arrayOfNulls",
            Self::ReturnReceiver => "return-receiver",
            Self::Console(ConsoleMethod::Print) => "print",
            Self::Console(ConsoleMethod::Println) => "println",
            Self::IndexGet => "index-get",
            Self::IndexSet => "index-set",
            Self::NativeMap(MapAccess::Get) => "native-map-get",
            Self::NativeMap(MapAccess::Put) => "native-map-put",
            Self::SelectHashCollection(CollectionKind::Map) => "hash-map-select",
            Self::SelectHashCollection(CollectionKind::Set) => "hash-set-select",
            Self::StringBuilderNew => "string-builder-new",
            Self::StringBuilderAppend => "string-builder-append",
            Self::StringBuilderToString => "string-builder-to-string",
            Self::FunctionInvoke => "function-invoke",
            Self::NewException => "new-exception",
        }
    }

    /// 呼び出し 1 件を出力先の式へ変換する。
    pub fn apply(
        &self,
        call: &ResolvedCall,
        lowered: &LoweredCall,
        ctx: &IntrinsicContext<'_>,
    ) -> LoweringResult<TargetExpr> {
        match *self {
            Self::Equals => builtins::equals(lowered, ctx),
            Self::RuntimeFunction(helper) => Ok(builtins::runtime_function(helper, lowered, ctx)),
            Self::ReturnReceiver => builtins::return_receiver(lowered),
            Self::Console(method) => Ok(builtins::console(method, lowered, ctx)),
            Self::IndexGet => {
                let receiver = require_receiver(self.name(), lowered)?;
                builtins::index_get(receiver, &lowered.arguments)
            }
            Self::IndexSet => {
                let receiver = require_receiver(self.name(), lowered)?;
                builtins::index_set(receiver, &lowered.arguments)
            }
            Self::NativeMap(access) => collections::native_map_access(access, call, lowered, ctx),
            Self::SelectHashCollection(kind) => {
                collections::select_hash_collection(kind, call, lowered, ctx)
            }
            Self::StringBuilderNew => Ok(strings::new_builder()),
            Self::StringBuilderAppend => strings::append(lowered),
            Self::StringBuilderToString => strings::to_string(lowered),
            Self::FunctionInvoke => functions::invoke(call, lowered),
            Self::NewException => builtins::new_exception(call, lowered, ctx),
        }
    }
}

/// インスタンスレシーバ、なければ拡張レシーバを要求する。
pub(crate) fn require_receiver<'a>(
    intrinsic: &'static str,
    lowered: &'a LoweredCall,
) -> LoweringResult<&'a TargetExpr> {
    lowered
        .this_or_receiver()
        .ok_or(LoweringError::MissingReceiver { intrinsic })
}

/// 引数の数がちょうど `expected` であることを要求する。
pub(crate) fn require_arity(
    intrinsic: &'static str,
    args: &[TargetExpr],
    expected: usize,
) -> LoweringResult<()> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(LoweringError::argument_count(intrinsic, expected, args.len()))
    }
}
