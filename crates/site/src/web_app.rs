use drive_host::{BackendConfig, HostServices};
use drive_host_web::build_host_services;
use drive_runtime::{DriveProvider, DriveShell, DriveVariant};
use leptos::*;
use leptos_meta::*;
use leptos_router::*;

#[derive(Clone)]
struct SiteHost(HostServices);

fn missing_config_message(config: &BackendConfig) -> Option<String> {
    let missing = config.missing_fields();
    if missing.is_empty() {
        None
    } else {
        Some(format!(
            "backend configuration incomplete, missing {}; storage and login calls will fail",
            missing.join(", ")
        ))
    }
}

fn site_host_services() -> HostServices {
    let config = BackendConfig::from_build_env();
    if let Some(message) = missing_config_message(&config) {
        logging::error!("{message}");
    }
    build_host_services(config)
}

fn use_site_host() -> HostServices {
    match use_context::<SiteHost>() {
        Some(SiteHost(host)) => host,
        None => {
            logging::warn!("site host not provided; using inert services");
            HostServices::noop()
        }
    }
}

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();
    provide_context(SiteHost(site_host_services()));

    view! {
        <Title text="CloudDrive" />
        <Meta name="description" content="A small browser file drive on managed storage." />

        <Router>
            <main class="site-root">
                <Routes>
                    <Route path="" view=PublicDriveEntry />
                    <Route path="/my-drive" view=AuthenticatedDriveEntry />
                </Routes>
            </main>
        </Router>
    }
}

#[component]
pub fn PublicDriveEntry() -> impl IntoView {
    view! {
        <DriveProvider variant=DriveVariant::Public host_services=use_site_host()>
            <DriveShell />
        </DriveProvider>
    }
}

#[component]
pub fn AuthenticatedDriveEntry() -> impl IntoView {
    view! {
        <DriveProvider variant=DriveVariant::Authenticated host_services=use_site_host()>
            <DriveShell />
        </DriveProvider>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_config_has_no_warning() {
        let config = BackendConfig::from_values(Some("https://abc.supabase.co"), Some("anon"));
        assert_eq!(missing_config_message(&config), None);
    }

    #[test]
    fn incomplete_config_names_missing_values() {
        let config = BackendConfig::from_values(None, Some("anon"));
        let message = missing_config_message(&config).expect("warning");
        assert!(message.contains("SUPABASE_URL"), "{message}");
    }
}
