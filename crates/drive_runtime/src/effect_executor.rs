//! Effect-queue executor for reducer-emitted drive effects.

use leptos::*;

use crate::{effects::execute_effect, runtime_context::DriveRuntimeContext};

/// Installs the executor that starts queued effects in order.
///
/// Every effect runs as its own task; outcomes are dispatched back as they resolve, so two
/// overlapping listings settle in completion order.
pub fn install(runtime: DriveRuntimeContext) {
    // Take the whole batch before starting it so dispatches from finished effects queue a new one.
    create_effect(move |_| {
        let queued = runtime.effects.get();
        if queued.is_empty() {
            return;
        }

        runtime.effects.set(Vec::new());

        for effect in queued {
            let host = runtime.host.get_value();
            let dispatch = runtime.dispatch;
            spawn_local(async move {
                if let Some(action) = execute_effect(&host, effect).await {
                    dispatch.call(action);
                }
            });
        }
    });
}
