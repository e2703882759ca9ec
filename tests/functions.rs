// パス: tests/functions.rs
// 役割: 関数値の `invoke` 照合と 4 通りの呼び出し形を検証
// 意図: 宣言の同一性による照合と、分岐の排他性・網羅性が回帰しないようにする
// 関連ファイル: src/intrinsics/functions.rs, src/descriptor.rs
#[path = "test_support.rs"]
mod support;

use intrinsify::descriptor::INVOKE_NAME;
use intrinsify::intrinsics::functions::{invoke_form, is_function_type_invoke, InvokeForm};
use intrinsify::{
    LoweredCall, LoweringError, ReceiverValue, ResolvedCall, SourceExpr, TargetExpr,
};
use support::{name, StdLib};

/// 組み込み関数型クラスの `invoke` メンバを返す。
fn builtin_invoke(lib: &StdLib, arity: usize, extension: bool) -> intrinsify::DeclId {
    let class = if extension {
        lib.decls.builtins().extension_function(arity)
    } else {
        lib.decls.builtins().function(arity)
    }
    .expect("builtin function type");
    lib.decls.member(class, INVOKE_NAME).expect("invoke member")
}

#[test]
/// 引数なし関数値をレシーバ文脈なしで呼ぶと素の呼び出しになる。
fn zero_arity_without_this_is_plain_invocation() {
    let lib = StdLib::new();
    let callee = builtin_invoke(&lib, 0, false);
    let call = ResolvedCall::new(callee);
    let lowered = LoweredCall::new(vec![]).with_function_reference(name("f"));
    assert_eq!(lib.translate(&call, &lowered).to_string(), "f()");
}

#[test]
/// 拡張レシーバ付き関数値に明示的なレシーバを渡すと、レシーバを先頭引数にした形になる。
fn extension_function_value_with_receiver() {
    let lib = StdLib::new();
    let callee = builtin_invoke(&lib, 1, true);
    let call = ResolvedCall::new(callee)
        .with_this_object(ReceiverValue::Expression(SourceExpr::Other))
        .with_receiver_argument(ReceiverValue::Expression(SourceExpr::Other));
    let lowered = LoweredCall::new(vec![name("x")])
        .with_this_object(name("f"))
        .with_receiver(name("s"))
        .with_function_reference(name("f"));
    assert_eq!(lib.translate(&call, &lowered).to_string(), "f(s, x)");
}

#[test]
/// 関数参照がリテラルの `invoke` なら明示的な `this.invoke(...)` になり、再照合されない。
fn literal_invoke_reference_emits_explicit_invoke() {
    let lib = StdLib::new();
    let callee = builtin_invoke(&lib, 1, false);
    let call = ResolvedCall::new(callee).with_this_object(ReceiverValue::Implicit);
    let lowered = LoweredCall::new(vec![name("x")])
        .with_this_object(TargetExpr::This)
        .with_function_reference(name("invoke"));
    let out = lib.translate(&call, &lowered);
    assert_eq!(out.to_string(), "this.invoke(x)");
    assert_eq!(
        out,
        TargetExpr::method_call(TargetExpr::This, INVOKE_NAME, vec![name("x")])
    );
    assert_eq!(
        invoke_form(&call, &lowered, &name("invoke")),
        InvokeForm::ExplicitInvoke
    );
}

#[test]
/// 修飾付きの `x.invoke` 参照も明示的な `invoke` 呼び出しとして扱い、`call` 経由にしない。
fn qualified_invoke_reference_emits_explicit_invoke() {
    let lib = StdLib::new();
    let callee = builtin_invoke(&lib, 1, false);
    let call = ResolvedCall::new(callee).with_this_object(ReceiverValue::Implicit);
    let reference = TargetExpr::qualified(INVOKE_NAME, name("x"));
    let lowered = LoweredCall::new(vec![name("a")])
        .with_this_object(name("x"))
        .with_function_reference(reference.clone());
    assert_eq!(
        invoke_form(&call, &lowered, &reference),
        InvokeForm::ExplicitInvoke
    );
    let out = lib.translate(&call, &lowered);
    assert_eq!(
        out,
        TargetExpr::method_call(name("x"), INVOKE_NAME, vec![name("a")])
    );
    assert_eq!(out.to_string(), "x.invoke(a)");
}

#[test]
/// それ以外でレシーバ文脈があれば `f.call(this, args)` になる。
fn bound_this_uses_call_with_receiver() {
    let lib = StdLib::new();
    let callee = builtin_invoke(&lib, 2, false);
    let call = ResolvedCall::new(callee).with_this_object(ReceiverValue::Implicit);
    let lowered = LoweredCall::new(vec![name("a"), name("b")])
        .with_this_object(name("self"))
        .with_function_reference(name("callback"));
    assert_eq!(
        lib.translate(&call, &lowered).to_string(),
        "callback.call(self, a, b)"
    );
}

#[test]
/// 4 つの分岐は入力の組み合わせごとにちょうど 1 つ選ばれる。
fn invoke_branches_are_exclusive_and_exhaustive() {
    let lib = StdLib::new();
    let callee = builtin_invoke(&lib, 0, false);
    let mut seen = Vec::new();
    for has_this in [false, true] {
        for has_ext in [false, true] {
            for fref in ["f", INVOKE_NAME] {
                let mut call = ResolvedCall::new(callee);
                if has_ext {
                    call = call.with_receiver_argument(ReceiverValue::Implicit);
                }
                let mut lowered = LoweredCall::new(vec![]).with_function_reference(name(fref));
                if has_this {
                    lowered = lowered.with_this_object(TargetExpr::This);
                }
                let form = invoke_form(&call, &lowered, &name(fref));
                let expected = match (has_this, has_ext, fref == INVOKE_NAME) {
                    (false, _, _) => InvokeForm::Plain,
                    (true, true, _) => InvokeForm::Extension,
                    (true, false, true) => InvokeForm::ExplicitInvoke,
                    (true, false, false) => InvokeForm::CallWithThis,
                };
                assert_eq!(form, expected);
                seen.push(form);
            }
        }
    }
    for form in [
        InvokeForm::Plain,
        InvokeForm::Extension,
        InvokeForm::ExplicitInvoke,
        InvokeForm::CallWithThis,
    ] {
        assert!(seen.contains(&form));
    }
}

#[test]
/// ユーザー定義の `invoke` は名前が同じでも照合しない。
fn user_invoke_method_is_not_intercepted() {
    let mut lib = StdLib::new();
    let runner = lib.user_class("my.app", "Runner");
    let user_invoke = lib.decls.add_function(runner, INVOKE_NAME, 0, false);
    let call = ResolvedCall::new(user_invoke);
    assert!(!is_function_type_invoke(&lib.decls, &call));
    let lowered = LoweredCall::new(vec![]).with_this_object(name("r"));
    assert_eq!(lib.translate(&call, &lowered).to_string(), "r.invoke()");
}

#[test]
/// 引数数が所属する関数型と食い違う `invoke` は照合しない。
fn arity_mismatch_is_not_intercepted() {
    let mut lib = StdLib::new();
    let function2 = lib.decls.builtins().function(2).expect("Function2");
    let odd = lib.decls.add_function(function2, INVOKE_NAME, 1, false);
    assert!(!is_function_type_invoke(&lib.decls, &ResolvedCall::new(odd)));
}

#[test]
/// 関数参照がない呼び出しは内部整合性エラー。
fn missing_function_reference_is_consistency_failure() {
    let lib = StdLib::new();
    let callee = builtin_invoke(&lib, 0, false);
    let session = support::session();
    let err = session
        .translator(&lib.decls)
        .translate(&ResolvedCall::new(callee), &LoweredCall::new(vec![]))
        .unwrap_err();
    assert!(matches!(err, LoweringError::MissingFunctionReference { .. }));
}
