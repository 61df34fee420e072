//! Runtime provider and context wiring for the drive screen.
//!
//! This module owns the reactive state container, the effect queue, and the auth subscription for
//! one mounted drive. UI composition stays in [`crate::components`].

use drive_host::{HostServices, Session};
use leptos::*;

use crate::{
    effect_executor,
    model::{DriveState, DriveVariant},
    reducer::{reduce_drive, DriveAction, DriveEffect},
};

#[derive(Clone, Copy)]
/// Leptos context for reading drive state and dispatching [`DriveAction`] values.
pub struct DriveRuntimeContext {
    /// Injected collaborator bundle used to execute effects.
    pub host: StoredValue<HostServices>,
    /// Reactive drive state signal.
    pub state: RwSignal<DriveState>,
    /// Queue of effects emitted by the reducer and not yet started.
    pub effects: RwSignal<Vec<DriveEffect>>,
    /// Reducer dispatch callback.
    pub dispatch: Callback<DriveAction>,
}

impl DriveRuntimeContext {
    /// Dispatches a reducer action through the runtime context callback.
    pub fn dispatch_action(&self, action: DriveAction) {
        self.dispatch.call(action);
    }
}

fn install_session_listener(runtime: DriveRuntimeContext) {
    let dispatch = runtime.dispatch;
    let host = runtime.host.get_value();
    let subscription = host
        .auth
        .subscribe(std::rc::Rc::new(move |session: Option<Session>| {
            dispatch.call(DriveAction::SessionChanged(session));
        }));
    on_cleanup(move || subscription.unsubscribe());

    spawn_local(async move {
        match host.auth.get_session().await {
            Ok(session) => dispatch.call(DriveAction::SessionChanged(session)),
            Err(err) => logging::warn!("session restore failed: {err}"),
        }
    });
}

#[component]
/// Provides [`DriveRuntimeContext`] to descendant components and loads the initial view.
pub fn DriveProvider(
    /// Which drive this screen shows.
    variant: DriveVariant,
    /// Injected browser host bundle assembled by the entry layer.
    host_services: HostServices,
    children: Children,
) -> impl IntoView {
    let host = store_value(host_services);
    let state = create_rw_signal(DriveState::new(variant));
    let effects = create_rw_signal(Vec::<DriveEffect>::new());

    let dispatch = Callback::new(move |action: DriveAction| {
        let mut drive = state.get_untracked();
        let previous = drive.clone();

        match reduce_drive(&mut drive, action) {
            Ok(new_effects) => {
                if drive != previous {
                    state.set(drive);
                }
                if !new_effects.is_empty() {
                    effects.update(|queue| queue.extend(new_effects));
                }
            }
            Err(err) => logging::warn!("drive reducer error: {err}"),
        }
    });

    let runtime = DriveRuntimeContext {
        host,
        state,
        effects,
        dispatch,
    };
    provide_context(runtime);
    effect_executor::install(runtime);

    match variant {
        DriveVariant::Public => runtime.dispatch_action(DriveAction::RefreshListing),
        DriveVariant::Authenticated => install_session_listener(runtime),
    }

    children().into_view()
}

/// Returns the current [`DriveRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`DriveProvider`].
pub fn use_drive_runtime() -> DriveRuntimeContext {
    use_context::<DriveRuntimeContext>().expect("DriveRuntimeContext not provided")
}
