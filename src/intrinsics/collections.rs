// パス: src/intrinsics/collections.rs
// 役割: マップ/セットに関する intrinsic（ネイティブマップの添字糖衣、キー型による実装選択）を実装する
// 意図: ホスト側オブジェクトで表現されるマップは添字アクセスに、ハッシュ構造はキー型に応じた実装に落とす
// 関連ファイル: src/intrinsics/mod.rs, src/intrinsics/builtins.rs, src/namer.rs

use log::trace;

use crate::call::{LoweredCall, ReceiverValue, ResolvedCall};
use crate::errors::{LoweringError, LoweringResult};
use crate::namer::{CollectionKind, KeyClass};
use crate::target::TargetExpr;

use super::builtins::{index_get, index_set};
use super::patterns::PRIMITIVE_NUMBERS;
use super::{require_receiver, IntrinsicContext, MapAccess};

const STRING_TYPE: &str = "String";

impl MapAccess {
    /// ネイティブでない場合に呼ぶメソッド名。
    pub const fn method(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Put => "put",
        }
    }

    /// 読み出しはインスタンスレシーバ、書き込みは拡張レシーバに実際の参照式がある。
    fn source_receiver<'a>(&self, call: &'a ResolvedCall) -> Option<&'a ReceiverValue> {
        match self {
            Self::Get => call.this_object.as_ref(),
            Self::Put => call.receiver_argument.as_ref(),
        }
    }
}

/// レシーバの参照先がネイティブタグ付きプロパティなら添字アクセス、そうでなければ通常のメソッド呼び出し。
pub(crate) fn native_map_access(
    access: MapAccess,
    call: &ResolvedCall,
    lowered: &LoweredCall,
    ctx: &IntrinsicContext<'_>,
) -> LoweringResult<TargetExpr> {
    let receiver = require_receiver(access.method(), lowered)?;
    let native = access
        .source_receiver(call)
        .and_then(ReceiverValue::expression)
        .and_then(|expr| expr.reference_target())
        .is_some_and(|target| ctx.decls.is_native_property(target));
    if native {
        return match access {
            MapAccess::Get => index_get(receiver, &lowered.arguments),
            MapAccess::Put => index_set(receiver, &lowered.arguments),
        };
    }
    trace!("{} receiver is not native-backed; keeping method call", access.method());
    Ok(TargetExpr::method_call(
        receiver.clone(),
        access.method(),
        lowered.arguments.clone(),
    ))
}

/// キー型の単純名から実装の分類を決める。
pub fn classify_key(standard_name: Option<&str>) -> KeyClass {
    match standard_name {
        Some(name) if name == STRING_TYPE || PRIMITIVE_NUMBERS.contains(&name) => {
            KeyClass::Primitive
        }
        _ => KeyClass::Complex,
    }
}

/// `new Kotlin.PrimitiveHashMap(args)` または `new Kotlin.ComplexHashMap(args)`。
pub(crate) fn select_hash_collection(
    kind: CollectionKind,
    call: &ResolvedCall,
    lowered: &LoweredCall,
    ctx: &IntrinsicContext<'_>,
) -> LoweringResult<TargetExpr> {
    let (_, key_type) = call
        .type_arguments
        .first()
        .ok_or(LoweringError::MissingTypeArgument {
            intrinsic: match kind {
                CollectionKind::Map => "hash-map-select",
                CollectionKind::Set => "hash-set-select",
            },
        })?;
    let key = classify_key(ctx.decls.standard_type_name(*key_type));
    let class_name = ctx.names.hash_collection(kind, key);
    Ok(TargetExpr::new_instance(
        ctx.names.kotlin(class_name),
        lowered.arguments.clone(),
    ))
}
