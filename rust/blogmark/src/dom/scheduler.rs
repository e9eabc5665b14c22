//! WindowScheduler: `setTimeout`-backed `Scheduler`.
//!
//! Each timer owns a JS closure. A fired closure is still on the stack while
//! the controller handles it, so `complete` only retires it; retired closures
//! are dropped on the next `schedule`.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Weak;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

use crate::preview::{PreviewController, Scheduler, TimerHandle, TimerTask};

use super::js_error;
use super::panel::DomPanel;

pub type DomController = PreviewController<WindowScheduler, DomPanel>;

pub struct WindowScheduler {
    window: Window,
    target: Weak<RefCell<DomController>>,
    next_id: u32,
    live: HashMap<TimerHandle, (i32, Closure<dyn FnMut()>)>,
    retired: Vec<Closure<dyn FnMut()>>,
}

impl WindowScheduler {
    pub fn new(window: Window, target: Weak<RefCell<DomController>>) -> Self {
        Self {
            window,
            target,
            next_id: 0,
            live: HashMap::new(),
            retired: Vec::new(),
        }
    }

    /// Timers armed and not yet fired or cancelled
    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}

impl Scheduler for WindowScheduler {
    fn schedule(&mut self, delay_ms: u32, task: TimerTask) -> TimerHandle {
        self.retired.clear();
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);

        let target = self.target.clone();
        let callback = Closure::<dyn FnMut()>::new(move || {
            if let Some(controller) = target.upgrade() {
                if let Ok(mut controller) = controller.try_borrow_mut() {
                    controller.on_timer(handle, task);
                }
            }
        });

        let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                delay,
            ) {
            Ok(id) => {
                self.live.insert(handle, (id, callback));
            }
            Err(e) => {
                web_sys::console::error_1(
                    &format!("[WindowScheduler] setTimeout failed: {}", js_error(e)).into(),
                );
            }
        }

        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if let Some((id, _callback)) = self.live.remove(&handle) {
            self.window.clear_timeout_with_handle(id);
        }
    }

    fn complete(&mut self, handle: TimerHandle) {
        if let Some((_, callback)) = self.live.remove(&handle) {
            self.retired.push(callback);
        }
    }
}
