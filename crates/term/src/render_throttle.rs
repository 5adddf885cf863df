//! Skip redundant redraws of frames that cannot change on their own.

#[derive(Debug, Clone, Copy)]
struct LastRender {
    at_ms: u64,
    fingerprint: u64,
}

#[derive(Debug, Clone)]
pub struct RenderThrottle {
    min_static_interval_ms: u64,
    last: Option<LastRender>,
}

impl RenderThrottle {
    pub fn new(min_static_interval_ms: u64) -> Self {
        Self {
            min_static_interval_ms,
            last: None,
        }
    }

    /// Forget the last frame so the next call renders (e.g. after a resize).
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Decide whether to render a new frame.
    ///
    /// - The first frame always renders.
    /// - When `is_static=false`: always render.
    /// - When `is_static=true`: render immediately on fingerprint change, otherwise at most
    ///   once per `min_static_interval_ms`.
    pub fn should_render(&mut self, now_ms: u64, fingerprint: u64, is_static: bool) -> bool {
        let render = match self.last {
            None => true,
            Some(_) if !is_static => true,
            Some(last) if last.fingerprint != fingerprint => true,
            Some(last) => now_ms.saturating_sub(last.at_ms) >= self.min_static_interval_ms,
        };
        if render {
            self.last = Some(LastRender {
                at_ms: now_ms,
                fingerprint,
            });
        }
        render
    }
}
