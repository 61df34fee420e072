//! Drive UI composition: sidebar, header, file grid, login screen, preview, and status bar.

use drive_host::{is_image_name, unix_time_ms_now, FileEntry};
use drive_host_web::read_selected_file;
use leptos::*;

use crate::{
    model::{AuthPhase, DisplayStyle, DriveMode, DriveState, DriveVariant, NoticeKind, RecencyFilter},
    reducer::DriveAction,
    view,
};

pub use crate::runtime_context::{use_drive_runtime, DriveProvider, DriveRuntimeContext};

/// DOM id of the hidden file input behind the "+ New" button.
pub const UPLOAD_INPUT_ID: &str = "drive-upload-input";

fn file_glyph(name: &str) -> &'static str {
    if is_image_name(name) {
        "🖼️"
    } else {
        "📄"
    }
}

fn format_size(size_bytes: Option<u64>) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let Some(size) = size_bytes else {
        return String::new();
    };
    let mut value = size as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{size} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}

fn header_title(state: &DriveState) -> String {
    match state.variant {
        DriveVariant::Public => match state.view.mode {
            DriveMode::Primary => "Global Files".to_string(),
            DriveMode::Secondary => "Trash".to_string(),
        },
        DriveVariant::Authenticated => state.user_email().unwrap_or("My Drive").to_string(),
    }
}

type CardKey = (Option<String>, String, Option<u64>, Option<u64>);

/// Card identity for the keyed list. An overwritten upload keeps its name but changes these
/// fields, so its card is rebuilt.
fn card_key(entry: &FileEntry) -> CardKey {
    (
        entry.id.clone(),
        entry.name.clone(),
        entry.size_bytes,
        entry.created_at_unix_ms,
    )
}

fn item_count_label(count: usize) -> String {
    match count {
        1 => "1 item".to_string(),
        n => format!("{n} items"),
    }
}

fn upload_selected(runtime: DriveRuntimeContext) {
    spawn_local(async move {
        match read_selected_file(UPLOAD_INPUT_ID).await {
            Ok(Some(file)) => runtime.dispatch_action(DriveAction::Upload {
                name: file.name,
                content_type: file.content_type,
                bytes: file.bytes,
            }),
            Ok(None) => {}
            Err(err) => logging::warn!("reading selected file failed: {err}"),
        }
    });
}

#[component]
fn PreviewOverlay() -> impl IntoView {
    let runtime = use_drive_runtime();
    let preview = Signal::derive(move || runtime.state.with(|s| s.preview_url.clone()));
    let close = move |_| runtime.dispatch_action(DriveAction::ClosePreview);

    view! {
        <Show when=move || preview.get().is_some() fallback=|| ()>
            <div class="preview-overlay" on:click=close>
                <img src=move || preview.get().unwrap_or_default() alt="Preview" />
                <button
                    class="preview-close"
                    aria-label="Close preview"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        runtime.dispatch_action(DriveAction::ClosePreview);
                    }
                >
                    "✕"
                </button>
            </div>
        </Show>
    }
}

#[component]
fn Sidebar() -> impl IntoView {
    let runtime = use_drive_runtime();
    let state = runtime.state;
    let variant = state.with_untracked(|s| s.variant);
    let nav_class = move |mode: DriveMode| {
        if state.with(|s| s.view.mode) == mode {
            "nav-item active"
        } else {
            "nav-item"
        }
    };

    view! {
        <aside class="sidebar">
            <div class="brand">"☁️ CloudDrive"</div>
            <label class="new-button" for=UPLOAD_INPUT_ID>"+ New"</label>
            <input
                id=UPLOAD_INPUT_ID
                type="file"
                hidden=true
                on:change=move |_| upload_selected(runtime)
            />
            <Show when=move || variant == DriveVariant::Public fallback=|| ()>
                <nav class="drive-nav">
                    <button
                        class=move || nav_class(DriveMode::Primary)
                        on:click=move |_| runtime.dispatch_action(DriveAction::SetMode(DriveMode::Primary))
                    >
                        "🏠 My Drive"
                    </button>
                    <button
                        class=move || nav_class(DriveMode::Secondary)
                        on:click=move |_| runtime.dispatch_action(DriveAction::SetMode(DriveMode::Secondary))
                    >
                        "🗑️ Trash"
                    </button>
                </nav>
                <div class="sidebar-footer">"Public Mode"</div>
            </Show>
        </aside>
    }
}

#[component]
fn AuthenticatedToolbar() -> impl IntoView {
    let runtime = use_drive_runtime();
    let state = runtime.state;
    let style = move || state.with(|s| s.view.display_style);
    let recency = move || state.with(|s| s.view.recency_filter);

    view! {
        <div class="toolbar">
            <button
                aria-pressed=move || (style() == DisplayStyle::Grid).to_string()
                on:click=move |_| runtime.dispatch_action(DriveAction::SetDisplayStyle(DisplayStyle::Grid))
            >
                "Grid"
            </button>
            <button
                aria-pressed=move || (style() == DisplayStyle::List).to_string()
                on:click=move |_| runtime.dispatch_action(DriveAction::SetDisplayStyle(DisplayStyle::List))
            >
                "List"
            </button>
            <button
                aria-pressed=move || (recency() == RecencyFilter::All).to_string()
                on:click=move |_| runtime.dispatch_action(DriveAction::SetRecencyFilter(RecencyFilter::All))
            >
                "All"
            </button>
            <button
                aria-pressed=move || (recency() == RecencyFilter::Recent).to_string()
                on:click=move |_| runtime.dispatch_action(DriveAction::SetRecencyFilter(RecencyFilter::Recent))
            >
                "Recent"
            </button>
            <button class="sign-out" on:click=move |_| runtime.dispatch_action(DriveAction::SignOut)>
                "Sign out"
            </button>
        </div>
    }
}

#[component]
fn DriveHeader() -> impl IntoView {
    let runtime = use_drive_runtime();
    let state = runtime.state;
    let authenticated = state.with_untracked(|s| s.variant == DriveVariant::Authenticated);

    view! {
        <header class="drive-header">
            <h5>{move || state.with(header_title)}</h5>
            <input
                type="search"
                placeholder="Search..."
                prop:value=move || state.with(|s| s.view.search_term.clone())
                on:input=move |ev| {
                    runtime.dispatch_action(DriveAction::SetSearchTerm(event_target_value(&ev)))
                }
            />
            <Show when=move || authenticated fallback=|| ()>
                <AuthenticatedToolbar />
            </Show>
        </header>
    }
}

#[component]
fn FileCard(entry: FileEntry) -> impl IntoView {
    let runtime = use_drive_runtime();
    let state = runtime.state;
    let variant = state.with_untracked(|s| s.variant);
    let name = store_value(entry.name.clone());
    let size = format_size(entry.size_bytes);

    let actions = match variant {
        DriveVariant::Public => {
            let trash_label = move || match state.with(|s| s.view.mode) {
                DriveMode::Primary => "✕",
                DriveMode::Secondary => "↺",
            };
            view! {
                <button
                    class="card-action"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        runtime.dispatch_action(DriveAction::ToggleTrash { name: name.get_value() });
                    }
                >
                    {trash_label}
                </button>
            }
            .into_view()
        }
        DriveVariant::Authenticated => view! {
            <button
                class="card-action"
                on:click=move |ev| {
                    ev.stop_propagation();
                    runtime.dispatch_action(DriveAction::Download { name: name.get_value() });
                }
            >
                "Download"
            </button>
            <button
                class="card-action danger"
                on:click=move |ev| {
                    ev.stop_propagation();
                    runtime.dispatch_action(DriveAction::Delete { name: name.get_value() });
                }
            >
                "Delete"
            </button>
        }
        .into_view(),
    };

    view! {
        <div
            class="file-card"
            title=entry.name.clone()
            on:click=move |_| {
                if variant == DriveVariant::Public {
                    runtime.dispatch_action(DriveAction::ActivateFile { name: name.get_value() });
                }
            }
        >
            <div class="card-actions">{actions}</div>
            <div class="file-glyph">{file_glyph(&entry.name)}</div>
            <div class="file-name">{entry.name.clone()}</div>
            <div class="file-size">{size}</div>
        </div>
    }
}

#[component]
fn FileGrid() -> impl IntoView {
    let runtime = use_drive_runtime();
    let state = runtime.state;
    let visible = create_memo(move |_| state.with(|s| view::visible_entries(s, unix_time_ms_now())));
    let layout_class = move || match state.with(|s| s.view.display_style) {
        DisplayStyle::Grid => "file-grid",
        DisplayStyle::List => "file-list",
    };

    view! {
        <div class=layout_class>
            <For each=move || visible.get() key=card_key let:entry>
                <FileCard entry />
            </For>
        </div>
        <StatusBar count=Signal::derive(move || visible.with(Vec::len)) />
    }
}

#[component]
fn StatusBar(count: Signal<usize>) -> impl IntoView {
    let runtime = use_drive_runtime();
    let state = runtime.state;
    let notice = Signal::derive(move || state.with(|s| s.notice.clone()));

    view! {
        <footer class="status-bar">
            <span>{move || item_count_label(count.get())}</span>
            {move || {
                notice
                    .get()
                    .map(|notice| {
                        let class = match notice.kind {
                            NoticeKind::Info => "notice info",
                            NoticeKind::Error => "notice error",
                        };
                        view! {
                            <span class=class>
                                {notice.message}
                                <button
                                    aria-label="Dismiss"
                                    on:click=move |_| runtime.dispatch_action(DriveAction::DismissNotice)
                                >
                                    "✕"
                                </button>
                            </span>
                        }
                    })
            }}
        </footer>
    }
}

#[component]
fn LoginScreen() -> impl IntoView {
    let runtime = use_drive_runtime();
    let state = runtime.state;
    let email = create_rw_signal(String::new());
    let sent_to = Signal::derive(move || {
        state.with(|s| match &s.auth {
            AuthPhase::LinkSent { email } => Some(email.clone()),
            _ => None,
        })
    });

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let address = email.get_untracked();
        if !address.trim().is_empty() {
            runtime.dispatch_action(DriveAction::RequestMagicLink { email: address });
        }
    };

    view! {
        <section class="login-screen">
            <h1>"☁️ CloudDrive"</h1>
            <Show
                when=move || sent_to.get().is_some()
                fallback=move || {
                    view! {
                        <form on:submit=on_submit>
                            <input
                                type="email"
                                placeholder="Your email"
                                required=true
                                prop:value=move || email.get()
                                on:input=move |ev| email.set(event_target_value(&ev))
                            />
                            <button type="submit">"Send magic link"</button>
                        </form>
                    }
                }
            >
                <p class="link-sent">
                    {move || {
                        format!(
                            "Check your email for the login link! Sent to {}.",
                            sent_to.get().unwrap_or_default()
                        )
                    }}
                </p>
            </Show>
            {move || {
                state
                    .with(|s| s.notice.clone())
                    .filter(|notice| notice.kind == NoticeKind::Error)
                    .map(|notice| view! { <p class="notice error">{notice.message}</p> })
            }}
        </section>
    }
}

#[component]
fn DriveScreen() -> impl IntoView {
    view! {
        <div class="drive-layout">
            <PreviewOverlay />
            <Sidebar />
            <main class="drive-main">
                <DriveHeader />
                <FileGrid />
            </main>
        </div>
    }
}

#[component]
/// Renders the drive for the provider's variant, or the login screen when a session is required.
pub fn DriveShell() -> impl IntoView {
    let runtime = use_drive_runtime();
    let state = runtime.state;
    let needs_login = move || {
        state.with(|s| s.variant == DriveVariant::Authenticated && s.auth != AuthPhase::Authenticated)
    };

    view! {
        <Show when=move || !needs_login() fallback=|| view! { <LoginScreen /> }>
            <DriveScreen />
        </Show>
    }
}
