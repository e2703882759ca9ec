// パス: src/intrinsics/builtins.rs
// 役割: 構造を変えない付け替え系 intrinsic と例外コンストラクタ変換を実装する
// 意図: 等価性・stringify・標準出力・添字アクセスなどを固定のランタイム参照へ差し替える
// 関連ファイル: src/intrinsics/mod.rs, src/namer.rs, src/intrinsics/registry.rs

use crate::call::{LoweredCall, ResolvedCall};
use crate::descriptor::{DeclarationTable, CONSTRUCTOR_NAME};
use crate::errors::{LoweringError, LoweringResult};
use crate::target::{BinaryOp, TargetExpr};

use super::{require_arity, require_receiver, ConsoleMethod, IntrinsicContext, RuntimeHelper};

/// 例外型を含むパッケージ名。
pub const EXCEPTION_PACKAGE: &str = "lang";
/// 例外パッケージの親となるプラットフォームのルートパッケージ名。
pub const PLATFORM_PACKAGE: &str = "java";

pub(crate) fn equals(lowered: &LoweredCall, ctx: &IntrinsicContext<'_>) -> LoweringResult<TargetExpr> {
    let receiver = require_receiver("equals", lowered)?;
    require_arity("equals", &lowered.arguments, 1)?;
    let mut args = Vec::with_capacity(2);
    args.push(receiver.clone());
    args.extend(lowered.arguments.iter().cloned());
    Ok(TargetExpr::invoke(ctx.names.equals_ref(), args))
}

pub(crate) fn runtime_function(
    helper: RuntimeHelper,
    lowered: &LoweredCall,
    ctx: &IntrinsicContext<'_>,
) -> TargetExpr {
    let callee = match helper {
        RuntimeHelper::Stringify => ctx.names.stringify_ref(),
        RuntimeHelper::ArrayOfNulls => ctx.names.array_of_nulls_ref(),
    };
    let args = lowered
        .this_or_receiver()
        .into_iter()
        .chain(lowered.arguments.iter())
        .cloned()
        .collect();
    TargetExpr::invoke(callee, args)
}

pub(crate) fn return_receiver(lowered: &LoweredCall) -> LoweringResult<TargetExpr> {
    require_receiver("return-receiver", lowered).cloned()
}

pub(crate) fn console(
    method: ConsoleMethod,
    lowered: &LoweredCall,
    ctx: &IntrinsicContext<'_>,
) -> TargetExpr {
    let name = match method {
        ConsoleMethod::Print => "print",
        ConsoleMethod::Println => "println",
    };
    TargetExpr::method_call(ctx.names.system_out_ref(), name, lowered.arguments.clone())
}

/// `receiver[key]`
pub(crate) fn index_get(receiver: &TargetExpr, args: &[TargetExpr]) -> LoweringResult<TargetExpr> {
    require_arity("index-get", args, 1)?;
    Ok(TargetExpr::index(receiver.clone(), args[0].clone()))
}

/// `receiver[key] = value`
pub(crate) fn index_set(receiver: &TargetExpr, args: &[TargetExpr]) -> LoweringResult<TargetExpr> {
    require_arity("index-set", args, 2)?;
    Ok(TargetExpr::binary(
        BinaryOp::Assign,
        TargetExpr::index(receiver.clone(), args[0].clone()),
        args[1].clone(),
    ))
}

/// コンストラクタ → 例外型 → `lang` → `java` → 真のルート、の連鎖を厳密に確認する。
pub fn is_platform_exception_constructor(decls: &DeclarationTable, call: &ResolvedCall) -> bool {
    let Some(ctor) = decls.try_get(call.callee) else {
        return false;
    };
    if !ctor.is_constructor() || ctor.name != CONSTRUCTOR_NAME {
        return false;
    }
    let Some(package_id) = ctor.parent.and_then(|class| decls.parent_of(class)) else {
        return false;
    };
    let Some(package) = decls.try_get(package_id) else {
        return false;
    };
    if package.name != EXCEPTION_PACKAGE {
        return false;
    }
    let Some(platform) = package.parent.and_then(|id| decls.try_get(id)) else {
        return false;
    };
    platform.name == PLATFORM_PACKAGE
        && platform
            .parent
            .is_some_and(|root| decls.is_root_namespace(root))
}

/// `newException(message, "SimpleName")`
pub(crate) fn new_exception(
    call: &ResolvedCall,
    lowered: &LoweredCall,
    ctx: &IntrinsicContext<'_>,
) -> LoweringResult<TargetExpr> {
    require_arity("new-exception", &lowered.arguments, 1)?;
    let class = ctx
        .decls
        .get(call.callee)?
        .parent
        .ok_or(LoweringError::UnexpectedCallee {
            intrinsic: "new-exception",
            expected: "例外型のコンストラクタ",
        })?;
    let simple_name = ctx.decls.get(class)?.name.clone();
    Ok(TargetExpr::invoke(
        ctx.names.new_exception_ref(),
        vec![lowered.arguments[0].clone(), TargetExpr::string(simple_name)],
    ))
}
