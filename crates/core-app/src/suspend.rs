//! Suspend/resume for shelling out to an external program (an editor, a
//! pager) without leaving the terminal in alternate-screen/raw-mode/mouse
//! state underneath it.
//!
//! Exposed as a scoped construct: the resume half runs from a `Drop` guard,
//! so it executes even if the caller's closure panics - the terminal is
//! never left suspended because something inside the scope went wrong.

use core_error::Result;
use core_terminal::{FeatureSet, TerminalBackend};

use crate::Renderer;

fn suspend(backend: &mut dyn TerminalBackend, features: FeatureSet) -> Result<()> {
    backend.show_cursor()?;
    if features.mouse_capture {
        backend.disable_mouse_capture()?;
    }
    if features.bracketed_paste {
        backend.disable_bracketed_paste()?;
    }
    if features.focus_events {
        backend.disable_focus_events()?;
    }
    if features.alternate_screen {
        backend.leave_alternate_screen()?;
    }
    if features.raw_mode {
        backend.leave_raw_mode()?;
    }
    Ok(())
}

fn resume(backend: &mut dyn TerminalBackend, features: FeatureSet) -> Result<()> {
    if features.raw_mode {
        backend.enter_raw_mode()?;
    }
    if features.alternate_screen {
        backend.enter_alternate_screen()?;
    }
    if features.focus_events {
        backend.enable_focus_events()?;
    }
    if features.bracketed_paste {
        backend.enable_bracketed_paste()?;
    }
    if features.mouse_capture {
        backend.enable_mouse_capture()?;
    }
    Ok(())
}

/// Runs resume on drop (including during an unwind), restoring the feature
/// set that was active before `suspend_scope` was entered and forcing the
/// renderer's next frame to be a full repaint - the previous buffer no
/// longer reflects what's actually on screen after the external program ran.
struct ResumeGuard<'a> {
    backend: &'a mut dyn TerminalBackend,
    renderer: &'a mut Renderer,
    features: FeatureSet,
}

impl Drop for ResumeGuard<'_> {
    fn drop(&mut self) {
        if let Err(e) = resume(self.backend, self.features) {
            tracing::warn!(error = %e, "failed to fully resume terminal state after suspend");
        }
        self.renderer.mark_full_redraw();
    }
}

/// Disable the given feature set, run `body`, then re-enable it - even if
/// `body` panics. Returns the error from disabling the feature set up
/// front, if any; resume errors are logged rather than propagated since
/// they run during a `Drop` and would otherwise be swallowed by an unwind.
pub fn suspend_scope<T>(
    backend: &mut dyn TerminalBackend,
    renderer: &mut Renderer,
    features: FeatureSet,
    body: impl FnOnce() -> T,
) -> Result<T> {
    suspend(backend, features)?;
    let _guard = ResumeGuard { backend, renderer, features };
    Ok(body())
}
