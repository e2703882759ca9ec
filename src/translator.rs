// パス: src/translator.rs
// 役割: 汎用呼び出し変換器との接続点（intrinsic 検索 → 既定変換へのフォールバック）を提供する
// 意図: レジストリをセッションごとに一度だけ構築し、各呼び出し変換へ参照で渡す
// 関連ファイル: src/intrinsics/registry.rs, src/call.rs, src/namer.rs
//! 呼び出し変換
//!
//! `IntrinsicSession` はコンパイルセッションの間生きる。レジストリは初回参照時に
//! `OnceCell` で一度だけ構築され、以降は読み取り専用で共有される。

use log::{debug, trace};
use once_cell::sync::OnceCell;

use crate::call::{LoweredCall, ResolvedCall};
use crate::descriptor::{DeclKind, DeclarationTable};
use crate::errors::LoweringResult;
use crate::intrinsics::{IntrinsicContext, IntrinsicRegistry};
use crate::namer::RuntimeNames;
use crate::target::TargetExpr;

/// コンパイルセッション単位の intrinsic 状態。
#[derive(Debug, Default)]
pub struct IntrinsicSession {
    names: RuntimeNames,
    registry: OnceCell<IntrinsicRegistry>,
}

impl IntrinsicSession {
    pub fn new(names: RuntimeNames) -> Self {
        Self {
            names,
            registry: OnceCell::new(),
        }
    }

    /// 標準以外の表を使うセッション。
    pub fn with_registry(names: RuntimeNames, registry: IntrinsicRegistry) -> Self {
        Self {
            names,
            registry: OnceCell::with_value(registry),
        }
    }

    pub fn names(&self) -> &RuntimeNames {
        &self.names
    }

    /// レジストリを返す。並行な初回アクセスでも構築はちょうど一度だけ。
    pub fn registry(&self) -> &IntrinsicRegistry {
        self.registry.get_or_init(IntrinsicRegistry::standard)
    }

    /// 宣言表を借りた変換器を作る。
    pub fn translator<'a>(&'a self, decls: &'a DeclarationTable) -> CallTranslator<'a> {
        CallTranslator {
            registry: self.registry(),
            ctx: IntrinsicContext {
                decls,
                names: &self.names,
            },
        }
    }
}

/// 呼び出し 1 件ごとの変換器。
#[derive(Clone, Copy, Debug)]
pub struct CallTranslator<'a> {
    registry: &'a IntrinsicRegistry,
    ctx: IntrinsicContext<'a>,
}

impl<'a> CallTranslator<'a> {
    /// intrinsic に一致すれば変換結果を、一致しなければ `None` を返す。
    pub fn try_intrinsic(
        &self,
        call: &ResolvedCall,
        lowered: &LoweredCall,
    ) -> LoweringResult<Option<TargetExpr>> {
        let Some(entry) = self.registry.lookup_entry(self.ctx.decls, call) else {
            trace!(
                "no intrinsic for {}",
                self.ctx.decls.qualified_name(call.callee)
            );
            return Ok(None);
        };
        debug!(
            "intrinsic {} matched {} via {}",
            entry.intrinsic.name(),
            self.ctx.decls.qualified_name(call.callee),
            entry.predicate
        );
        entry.intrinsic.apply(call, lowered, &self.ctx).map(Some)
    }

    /// intrinsic を優先し、なければ既定の変換を行う。
    pub fn translate(&self, call: &ResolvedCall, lowered: &LoweredCall) -> LoweringResult<TargetExpr> {
        match self.try_intrinsic(call, lowered)? {
            Some(expr) => Ok(expr),
            None => self.default_lowering(call, lowered),
        }
    }

    /// 呼び出し先の参照に変換済み引数を渡す既定の変換。
    pub fn default_lowering(
        &self,
        call: &ResolvedCall,
        lowered: &LoweredCall,
    ) -> LoweringResult<TargetExpr> {
        let decl = self.ctx.decls.get(call.callee)?;
        let args = lowered.arguments.clone();
        if let DeclKind::Constructor { .. } = decl.kind {
            let class_name = match decl.parent {
                Some(class) => self.ctx.decls.get(class)?.name.clone(),
                None => decl.name.clone(),
            };
            return Ok(TargetExpr::new_instance(TargetExpr::name(class_name), args));
        }
        let callee = lowered
            .function_reference
            .clone()
            .unwrap_or_else(|| TargetExpr::name(&decl.name));
        if decl.has_receiver_param() {
            if let Some(receiver) = &lowered.receiver {
                let mut with_receiver = Vec::with_capacity(args.len() + 1);
                with_receiver.push(receiver.clone());
                with_receiver.extend(args);
                return Ok(TargetExpr::invoke(callee, with_receiver));
            }
        }
        if let Some(this_object) = &lowered.this_object {
            return Ok(TargetExpr::method_call(this_object.clone(), &decl.name, args));
        }
        Ok(TargetExpr::invoke(callee, args))
    }
}
