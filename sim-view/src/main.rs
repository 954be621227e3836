//! Application entry point for the Lorenz trails viewer.
//!
//! This binary sets up eframe/egui and delegates all interactive
//! logic and rendering to [`Viewer`] from the `viewer` module.

mod viewer;

use viewer::Viewer;

/// Starts the native eframe application.
///
/// Initializes logging, configures [`eframe::NativeOptions`] with
/// default settings, and launches the main window titled
/// `"Lorenz Trails"`. All UI state and rendering are handled by
/// [`Viewer`].
///
/// ### Returns
/// - `Ok(())` if the application runs to completion without errors.
/// - `Err` if eframe fails to create the native window or event loop,
///   or if the initial configuration is rejected.
fn main() -> eframe::Result<()> {
    env_logger::init();

    let options = eframe::NativeOptions::default();

    eframe::run_native(
        "Lorenz Trails",
        options,
        Box::new(|_cc| {
            // Construct the root app state for the viewer.
            let viewer = Viewer::new()?;
            Ok(Box::new(viewer))
        }),
    )
}
