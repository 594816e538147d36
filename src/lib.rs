pub mod api;
pub mod capture;
pub mod formatters;
pub mod manufacturer;
pub mod session;
pub mod validators;
pub mod verification;
pub mod watchdog;

use api::ApiClient;
use manufacturer::commands::{
    current_manufacturer, list_batches, login_manufacturer, logout_manufacturer, register_batch,
    regenerate_batch_qr, system_status,
};
use session::SessionStore;
use tauri::Manager;
use verification::commands::{
    attach_image_file, attach_image_frame, attach_qr_payload, check_quantity, clear_scan_image,
    clear_scan_qr, get_scan_state, notify_regulator, reset_scan, retry_verification,
    scan_qr_frame, scan_qr_image, submit_verification,
};
use verification::VerificationController;
use watchdog::commands::{
    clear_watchdog_alerts, get_watchdog_state, refresh_watchdog, start_watchdog_monitoring,
    stop_watchdog_monitoring,
};
use watchdog::WatchdogController;

pub struct AppState {
    pub(crate) api: ApiClient,
    pub(crate) scan: VerificationController,
    pub(crate) watchdog: WatchdogController,
    pub(crate) session: SessionStore,
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("PharmaChain client starting up...");

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .setup(|app| {
            let result = (|| -> anyhow::Result<()> {
                let app_data_dir = app
                    .path()
                    .app_data_dir()
                    .map_err(|err| anyhow::anyhow!(err))?;
                std::fs::create_dir_all(&app_data_dir)?;

                let api = ApiClient::from_env()?;
                log::info!("Using verification backend at {}", api.base_url());

                let session_path = app_data_dir.join("session.json");
                let session = SessionStore::new(session_path)?;

                let scan = VerificationController::new(app.handle().clone(), api.clone());
                let watchdog = WatchdogController::new(app.handle().clone(), api.clone());

                app.manage(AppState {
                    api,
                    scan,
                    watchdog,
                    session,
                });

                Ok(())
            })();

            result.map_err(|err| err.into())
        })
        .invoke_handler(tauri::generate_handler![
            // Manufacturer portal
            login_manufacturer,
            logout_manufacturer,
            current_manufacturer,
            register_batch,
            list_batches,
            regenerate_batch_qr,
            system_status,
            // Pharmacy scan flow
            get_scan_state,
            attach_qr_payload,
            scan_qr_image,
            scan_qr_frame,
            attach_image_file,
            attach_image_frame,
            clear_scan_qr,
            clear_scan_image,
            submit_verification,
            retry_verification,
            reset_scan,
            notify_regulator,
            check_quantity,
            // Watchdog monitor
            get_watchdog_state,
            start_watchdog_monitoring,
            stop_watchdog_monitoring,
            refresh_watchdog,
            clear_watchdog_alerts,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
