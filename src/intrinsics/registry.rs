// パス: src/intrinsics/registry.rs
// 役割: (述語, intrinsic) の順序付き表と、標準の登録内容を提供する
// 意図: 登録順を唯一の優先順位とし、最初に一致したエントリを返す決定的な検索を行う
// 関連ファイル: src/intrinsics/patterns.rs, src/intrinsics/mod.rs, src/translator.rs
//! intrinsic レジストリ
//!
//! - `register` は末尾に追加するだけ。構築後は共有参照でのみ使う。
//! - `lookup` は登録順に走査し、最初に述語が受理したエントリを返す。
//!   重なる述語の優先順位は登録順だけで決まる。

use std::fmt;

use log::debug;

use crate::call::ResolvedCall;
use crate::descriptor::DeclarationTable;
use crate::namer::CollectionKind;

use super::builtins::is_platform_exception_constructor;
use super::functions::is_function_type_invoke;
use super::patterns::{pattern, NamePredicate, PathPattern, Predicate, PRIMITIVE_NUMBERS};
use super::{ConsoleMethod, Intrinsic, MapAccess, RuntimeHelper};

/// レジストリの 1 エントリ。
#[derive(Clone, Debug)]
pub struct IntrinsicEntry {
    pub predicate: Predicate,
    pub intrinsic: Intrinsic,
}

impl fmt::Display for IntrinsicEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} => {}", self.predicate, self.intrinsic.name())
    }
}

/// 順序付きの intrinsic 表。
#[derive(Clone, Debug, Default)]
pub struct IntrinsicRegistry {
    entries: Vec<IntrinsicEntry>,
}

impl IntrinsicRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 末尾にエントリを追加する。
    pub fn register(&mut self, predicate: impl Into<Predicate>, intrinsic: Intrinsic) {
        self.entries.push(IntrinsicEntry {
            predicate: predicate.into(),
            intrinsic,
        });
    }

    /// 最初に一致したエントリの intrinsic を返す。一致しなければ `None`（既定の変換を使う）。
    pub fn lookup(&self, decls: &DeclarationTable, call: &ResolvedCall) -> Option<Intrinsic> {
        self.lookup_entry(decls, call).map(|entry| entry.intrinsic)
    }

    pub fn lookup_entry(
        &self,
        decls: &DeclarationTable,
        call: &ResolvedCall,
    ) -> Option<&IntrinsicEntry> {
        self.entries
            .iter()
            .find(|entry| entry.predicate.matches(decls, call))
    }

    pub fn entries(&self) -> &[IntrinsicEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 各エントリを登録順に人が読める形で返す。
    pub fn describe(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }

    /// 標準ライブラリ呼び出しの標準登録内容。
    pub fn standard() -> Self {
        let mut r = Self::new();

        r.register(
            pattern("jet.toString").receiver_exists(),
            Intrinsic::RuntimeFunction(RuntimeHelper::Stringify),
        );
        r.register(pattern("jet.equals").receiver_exists(), Intrinsic::Equals);
        r.register(
            PathPattern::from_segments(vec![
                NamePredicate::parse("jet"),
                NamePredicate::one_of(PRIMITIVE_NUMBERS),
                NamePredicate::parse("equals"),
            ]),
            Intrinsic::Equals,
        );
        r.register(pattern("jet.String|Boolean|Char|Number.equals"), Intrinsic::Equals);
        r.register(
            pattern("jet.arrayOfNulls"),
            Intrinsic::RuntimeFunction(RuntimeHelper::ArrayOfNulls),
        );
        r.register(pattern("jet.iterator").receiver_exists(), Intrinsic::ReturnReceiver);
        r.register(
            Predicate::custom("function-type invoke", is_function_type_invoke),
            Intrinsic::FunctionInvoke,
        );

        r.register(
            pattern("jet.Map.get").check_overridden(),
            Intrinsic::NativeMap(MapAccess::Get),
        );
        r.register(
            pattern("js.set").receiver_exists(),
            Intrinsic::NativeMap(MapAccess::Put),
        );
        r.register(pattern("js.Json.get"), Intrinsic::IndexGet);
        r.register(pattern("js.Json.set"), Intrinsic::IndexSet);

        r.register(pattern("js.println"), Intrinsic::Console(ConsoleMethod::Println));
        r.register(pattern("js.print"), Intrinsic::Console(ConsoleMethod::Print));

        r.register(
            pattern("java.util.HashMap.<init>"),
            Intrinsic::SelectHashCollection(CollectionKind::Map),
        );
        r.register(
            pattern("java.util.HashSet.<init>"),
            Intrinsic::SelectHashCollection(CollectionKind::Set),
        );

        r.register(pattern("java.util.StringBuilder.<init>"), Intrinsic::StringBuilderNew);
        r.register(
            pattern("java.lang.Appendable.append").check_overridden(),
            Intrinsic::StringBuilderAppend,
        );
        r.register(
            pattern("java.util.StringBuilder.toString"),
            Intrinsic::StringBuilderToString,
        );

        r.register(
            Predicate::custom("platform exception constructor", is_platform_exception_constructor),
            Intrinsic::NewException,
        );

        debug!("built standard intrinsic registry with {} entries", r.len());
        r
    }
}
