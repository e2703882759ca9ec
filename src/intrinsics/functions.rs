// パス: src/intrinsics/functions.rs
// 役割: 関数値の呼び出し演算子 `invoke` の照合と変換を実装する
// 意図: 組み込み関数型の宣言と同一性で照合し、呼び出し規約ごとに 4 通りへ振り分ける
// 関連ファイル: src/intrinsics/mod.rs, src/descriptor.rs, src/intrinsics/registry.rs

use crate::call::{LoweredCall, ResolvedCall};
use crate::descriptor::{DeclKind, DeclarationTable, INVOKE_NAME};
use crate::errors::{LoweringError, LoweringResult};
use crate::target::TargetExpr;

const INTRINSIC: &str = "function-invoke";

/// 呼び出し先が `FunctionN.invoke` / `ExtensionFunctionN.invoke` そのものか。
///
/// 名前ではなく、所属宣言が組み込み関数型の宣言と同一であることを確かめる。
/// ユーザー定義の `invoke` メソッドはここで弾かれる。
pub fn is_function_type_invoke(decls: &DeclarationTable, call: &ResolvedCall) -> bool {
    let Some(decl) = decls.try_get(call.callee) else {
        return false;
    };
    if decl.name != INVOKE_NAME || !matches!(decl.kind, DeclKind::Function { .. }) {
        return false;
    }
    let arity = decl.value_params();
    let expected = if decl.has_receiver_param() {
        decls.builtins().extension_function(arity)
    } else {
        decls.builtins().function(arity)
    };
    expected.is_some() && decl.parent == expected
}

/// 関数値呼び出しの形。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvokeForm {
    /// `f(args)`
    Plain,
    /// `f(receiver, args)`
    Extension,
    /// `this.invoke(args)`
    ExplicitInvoke,
    /// `f.call(this, args)`
    CallWithThis,
}

/// 4 つの分岐のどれに当たるかを決める。分岐は互いに排他で、必ずどれかに当たる。
pub fn invoke_form(call: &ResolvedCall, lowered: &LoweredCall, function_reference: &TargetExpr) -> InvokeForm {
    if lowered.this_object.is_none() {
        InvokeForm::Plain
    } else if call.receiver_argument.is_some() {
        InvokeForm::Extension
    } else if function_reference.ident() == Some(INVOKE_NAME) {
        InvokeForm::ExplicitInvoke
    } else {
        InvokeForm::CallWithThis
    }
}

pub(crate) fn invoke(call: &ResolvedCall, lowered: &LoweredCall) -> LoweringResult<TargetExpr> {
    let function_reference = lowered
        .function_reference
        .as_ref()
        .ok_or(LoweringError::MissingFunctionReference { intrinsic: INTRINSIC })?;
    let args = &lowered.arguments;
    let expr = match invoke_form(call, lowered, function_reference) {
        InvokeForm::Plain => TargetExpr::invoke(function_reference.clone(), args.clone()),
        InvokeForm::Extension => {
            let receiver = lowered
                .receiver
                .as_ref()
                .ok_or(LoweringError::MissingReceiver { intrinsic: INTRINSIC })?;
            TargetExpr::invoke(function_reference.clone(), prepend(receiver, args))
        }
        InvokeForm::ExplicitInvoke => {
            let this_object = this_object(lowered)?;
            TargetExpr::method_call(this_object.clone(), INVOKE_NAME, args.clone())
        }
        InvokeForm::CallWithThis => {
            let this_object = this_object(lowered)?;
            TargetExpr::invoke(
                TargetExpr::qualified("call", function_reference.clone()),
                prepend(this_object, args),
            )
        }
    };
    Ok(expr)
}

fn this_object(lowered: &LoweredCall) -> LoweringResult<&TargetExpr> {
    lowered
        .this_object
        .as_ref()
        .ok_or(LoweringError::MissingReceiver { intrinsic: INTRINSIC })
}

fn prepend(first: &TargetExpr, rest: &[TargetExpr]) -> Vec<TargetExpr> {
    let mut args = Vec::with_capacity(rest.len() + 1);
    args.push(first.clone());
    args.extend(rest.iter().cloned());
    args
}
