// パス: tests/registry.rs
// 役割: レジストリの登録順・最初の一致・不一致時のフォールバックを検証
// 意図: 重なる述語の優先順位と、同名ユーザーコードを拾わないことが回帰しないようにする
// 関連ファイル: src/intrinsics/registry.rs, src/intrinsics/patterns.rs, src/translator.rs
use std::sync::Arc;
use std::thread;

#[path = "test_support.rs"]
mod support;

use intrinsify::intrinsics::{pattern, Intrinsic, MapAccess, Predicate};
use intrinsify::{IntrinsicRegistry, IntrinsicSession, LoweredCall, ResolvedCall, RuntimeNames};
use support::{name, StdLib};

#[test]
/// 重なる述語は先に登録したものが勝つ。
fn first_registered_pattern_wins() {
    let lib = StdLib::new();
    let mut registry = IntrinsicRegistry::new();
    registry.register(pattern("jet.Map.get"), Intrinsic::IndexGet);
    registry.register(pattern("jet.Map.get").check_overridden(), Intrinsic::NativeMap(MapAccess::Get));

    let call = ResolvedCall::new(lib.map_get);
    assert_eq!(registry.lookup(&lib.decls, &call), Some(Intrinsic::IndexGet));

    // 派生側の宣言は 2 番目の述語だけが受理する
    let derived = ResolvedCall::new(lib.hash_map_get);
    assert_eq!(
        registry.lookup(&lib.decls, &derived),
        Some(Intrinsic::NativeMap(MapAccess::Get))
    );
}

#[test]
/// 基底宣言そのものの呼び出しはオーバーライド経由ではなく、派生側の呼び出しはオーバーライド経由。
fn override_flag_distinguishes_base_and_overriding_calls() {
    let lib = StdLib::new();
    let base = ResolvedCall::new(lib.map_get);
    let derived = ResolvedCall::new(lib.hash_map_get);
    assert!(!base.resolves_via_override(&lib.decls));
    assert!(derived.resolves_via_override(&lib.decls));

    let mut registry = IntrinsicRegistry::new();
    registry.register(pattern("jet.Map.get").check_overridden(), Intrinsic::IndexGet);
    assert_eq!(registry.lookup(&lib.decls, &base), Some(Intrinsic::IndexGet));
    assert_eq!(registry.lookup(&lib.decls, &derived), Some(Intrinsic::IndexGet));
}

#[test]
/// どの述語にも一致しなければ `None` を返し、既定の変換が使われる。
fn unmatched_call_falls_back_to_default_lowering() {
    let mut lib = StdLib::new();
    let point = lib.user_class("my.app", "Point");
    let get = lib.decls.add_function(point, "get", 1, false);
    let call = ResolvedCall::new(get);
    let lowered = LoweredCall::new(vec![name("k")]).with_this_object(name("p"));

    assert_eq!(lib.intrinsic(&call, &lowered), None);
    assert_eq!(lib.translate(&call, &lowered).to_string(), "p.get(k)");
}

#[test]
/// ユーザー定義の `println` は `js.println` と名前が同じでも一致しない。
fn user_function_sharing_simple_name_is_not_intercepted() {
    let mut lib = StdLib::new();
    let ns = lib.decls.namespace_path("my.js");
    let user_println = lib.decls.add_function(ns, "println", 1, false);
    let call = ResolvedCall::new(user_println);
    let lowered = LoweredCall::new(vec![name("x")]);
    assert_eq!(lib.translate(&call, &lowered).to_string(), "println(x)");

    let std_call = ResolvedCall::new(lib.println);
    assert_eq!(
        lib.translate(&std_call, &lowered).to_string(),
        "Kotlin.System.out.println(x)"
    );
}

#[test]
/// 標準表の全エントリは、先行する重なりがなければ自分の intrinsic で変換される。
fn standard_entries_are_reachable_in_order() {
    let lib = StdLib::new();
    let session = IntrinsicSession::new(RuntimeNames::default());
    let registry = session.registry();
    let expectations = [
        (lib.to_string_ext, "stringify"),
        (lib.equals_ext, "equals"),
        (lib.int_equals, "equals"),
        (lib.string_equals, "equals"),
        (lib.array_of_nulls, "arrayOfNulls"),
        (lib.iterator_ext, "return-receiver"),
        (lib.map_get, "native-map-get"),
        (lib.hash_map_get, "native-map-get"),
        (lib.js_set, "native-map-put"),
        (lib.json_get, "index-get"),
        (lib.json_set, "index-set"),
        (lib.println, "println"),
        (lib.print, "print"),
        (lib.hash_map_ctor, "hash-map-select"),
        (lib.hash_set_ctor, "hash-set-select"),
        (lib.builder_ctor, "string-builder-new"),
        (lib.appendable_append, "string-builder-append"),
        (lib.builder_append, "string-builder-append"),
        (lib.builder_to_string, "string-builder-to-string"),
        (lib.illegal_state_ctor, "new-exception"),
    ];
    for (callee, expected) in expectations {
        let found = registry
            .lookup(&lib.decls, &ResolvedCall::new(callee))
            .map(|i| i.name());
        assert_eq!(found, Some(expected), "callee {}", lib.decls.qualified_name(callee));
    }
}

#[test]
/// 検索はレジストリを変更しない。
fn lookup_is_pure() {
    let lib = StdLib::new();
    let session = support::session();
    let before = session.registry().describe();
    for _ in 0..3 {
        let _ = session.registry().lookup(&lib.decls, &ResolvedCall::new(lib.println));
    }
    assert_eq!(session.registry().describe(), before);
}

#[test]
/// 並行な初回アクセスでもレジストリは 1 つだけ構築される。
fn registry_is_built_once_under_concurrent_access() {
    let session = Arc::new(support::session());
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let session = Arc::clone(&session);
            thread::spawn(move || session.registry() as *const IntrinsicRegistry as usize)
        })
        .collect();
    let addrs: Vec<usize> = handles
        .into_iter()
        .map(|h| h.join().expect("join"))
        .collect();
    assert!(addrs.windows(2).all(|w| w[0] == w[1]));
}

#[test]
/// 独自のレジストリを渡したセッションはそれをそのまま使う。
fn session_accepts_prebuilt_registry() {
    let lib = StdLib::new();
    let mut registry = IntrinsicRegistry::new();
    registry.register(
        Predicate::custom("always", |_, _| true),
        Intrinsic::ReturnReceiver,
    );
    let session = IntrinsicSession::with_registry(RuntimeNames::default(), registry);
    assert_eq!(session.registry().len(), 1);
    let lowered = LoweredCall::new(vec![]).with_this_object(name("it"));
    let out = session
        .translator(&lib.decls)
        .translate(&ResolvedCall::new(lib.println), &lowered)
        .expect("translate");
    assert_eq!(out.to_string(), "it");
}

#[test]
/// 表の説明は登録順で、述語と intrinsic 名を含む。
fn describe_lists_entries_in_registration_order() {
    let lines = IntrinsicRegistry::standard().describe();
    assert_eq!(lines[0], "jet.toString [receiver] => stringify");
    assert!(lines
        .iter()
        .any(|l| l == "<function-type invoke> => function-invoke"));
    assert_eq!(
        lines.last().map(String::as_str),
        Some("<platform exception constructor> => new-exception")
    );
}
