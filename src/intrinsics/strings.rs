// パス: src/intrinsics/strings.rs
// 役割: 可変文字列ビルダを `{s: ""}` 形式のレコードで模倣する intrinsic を実装する
// 意図: 生成・追記・読み出しをフィールド `s` への単純な操作に落とす
// 関連ファイル: src/intrinsics/mod.rs, src/intrinsics/registry.rs

use crate::call::LoweredCall;
use crate::errors::LoweringResult;
use crate::target::{BinaryOp, TargetExpr};

use super::{require_arity, require_receiver};

/// ビルダを表すレコードの唯一のフィールド名。
pub const BUILDER_FIELD: &str = "s";

pub(crate) fn new_builder() -> TargetExpr {
    TargetExpr::wrap_value(BUILDER_FIELD, TargetExpr::string(""))
}

/// `receiver.s += argument`
pub(crate) fn append(lowered: &LoweredCall) -> LoweringResult<TargetExpr> {
    let receiver = require_receiver("string-builder-append", lowered)?;
    require_arity("string-builder-append", &lowered.arguments, 1)?;
    Ok(TargetExpr::binary(
        BinaryOp::AssignAdd,
        TargetExpr::qualified(BUILDER_FIELD, receiver.clone()),
        lowered.arguments[0].clone(),
    ))
}

/// `receiver.s`
pub(crate) fn to_string(lowered: &LoweredCall) -> LoweringResult<TargetExpr> {
    let receiver = require_receiver("string-builder-to-string", lowered)?;
    Ok(TargetExpr::qualified(BUILDER_FIELD, receiver.clone()))
}
