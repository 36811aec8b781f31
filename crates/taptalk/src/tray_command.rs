use crate::AppStatus;

use tao::event_loop::EventLoopProxy;

/// Commands sent from the async runtime to the main UI thread.
///
/// The main thread owns `TrayManager` (because `TrayIcon` is `!Send`),
/// so all tray mutations and process lifecycle events flow through this enum.
#[derive(Debug, Clone)]
pub enum TrayCommand {
    /// Re-render the tray icon and tooltip from a status snapshot.
    Refresh(AppStatus),
    /// Shut down the application. The main thread will exit the event loop.
    Shutdown,
}

/// Presentation seam: delivers [`TrayCommand`]s to the UI thread.
///
/// In production this is the tao event-loop proxy; sends are best-effort
/// because a closed event loop means the process is already exiting.
pub trait TrayNotifier: Send + Sync {
    /// Deliver a command to the UI thread, dropping it if the loop is gone.
    fn notify(&self, cmd: TrayCommand);
}

impl TrayNotifier for EventLoopProxy<TrayCommand> {
    fn notify(&self, cmd: TrayCommand) {
        let _ = self.send_event(cmd);
    }
}
