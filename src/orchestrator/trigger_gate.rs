use crate::view::{Action, Renderer};
use std::sync::atomic::{AtomicBool, Ordering};

/// 触发动作的防重入闸门
///
/// 执行期间拒绝第二次触发，界面上的按钮同步置为忙碌
#[derive(Debug)]
pub struct TriggerGate {
    action: Action,
    pending: AtomicBool,
}

impl TriggerGate {
    pub fn new(action: Action) -> Self {
        Self {
            action,
            pending: AtomicBool::new(false),
        }
    }

    /// 尝试进入；已有任务时返回 None
    pub fn try_enter<'a>(&'a self, renderer: &'a dyn Renderer) -> Option<GateGuard<'a>> {
        self.pending
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        renderer.set_busy(self.action, true);
        Some(GateGuard {
            gate: self,
            renderer,
        })
    }

    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }
}

/// 离开作用域时释放闸门（包括出错返回的路径）
pub struct GateGuard<'a> {
    gate: &'a TriggerGate,
    renderer: &'a dyn Renderer,
}

impl Drop for GateGuard<'_> {
    fn drop(&mut self) {
        self.gate.pending.store(false, Ordering::Release);
        self.renderer.set_busy(self.gate.action, false);
    }
}
