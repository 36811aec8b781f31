//! System tray icon with status-driven updates.
//!
//! Renders the five visual states (Idle, Recording, Processing, Disabled,
//! Error) and a context menu with a Listening toggle and Exit.

use crate::{AppError, AppResult, AppStatus, TrayIconState, tray_icon_state::tooltip_for};

use std::panic::Location;

use error_location::ErrorLocation;
use tracing::{info, instrument};
use tray_icon::menu::{CheckMenuItem, Menu, MenuId, MenuItem};
use tray_icon::{Icon, TrayIcon, TrayIconBuilder};

const ICON_SIZE: u32 = 32;

/// System tray icon manager.
pub struct TrayManager {
    tray_icon: TrayIcon,
    listening_item: CheckMenuItem,
    exit_item_id: MenuId,
}

impl TrayManager {
    /// Create a new tray manager with initial state.
    #[track_caller]
    #[instrument]
    pub fn new() -> AppResult<Self> {
        let menu = Menu::new();

        let listening_item = CheckMenuItem::new("Listening", true, true, None);
        let exit_item = MenuItem::new("Exit", true, None);

        let exit_id = exit_item.id().clone();

        menu.append(&listening_item).map_err(|e| AppError::Tray {
            reason: format!("Failed to add listening menu: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        menu.append(&exit_item).map_err(|e| AppError::Tray {
            reason: format!("Failed to add exit menu: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let icon = Self::icon_for(TrayIconState::Idle)?;

        let tray_icon = TrayIconBuilder::new()
            .with_tooltip("TapTalk: Idle - Listening")
            .with_menu(Box::new(menu))
            .with_icon(icon)
            .build()
            .map_err(|e| AppError::Tray {
                reason: format!("Failed to create tray icon: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        info!("System tray icon initialized");

        Ok(Self {
            tray_icon,
            listening_item,
            exit_item_id: exit_id,
        })
    }

    /// Re-render icon, tooltip, and menu check state from a status snapshot.
    #[track_caller]
    #[instrument(skip(self, status))]
    pub fn refresh(&mut self, status: &AppStatus) -> AppResult<()> {
        let state = TrayIconState::from_status(status);
        let icon = Self::icon_for(state)?;
        let tooltip = tooltip_for(status);

        self.tray_icon
            .set_icon(Some(icon))
            .map_err(|e| AppError::Tray {
                reason: format!("Failed to update icon: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        self.tray_icon
            .set_tooltip(Some(&tooltip))
            .map_err(|e| AppError::Tray {
                reason: format!("Failed to update tooltip: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        self.listening_item.set_checked(status.listening_enabled);

        Ok(())
    }

    /// Build a solid-color icon for a visual state.
    ///
    /// Icons are generated in code rather than loaded from assets, so
    /// they work regardless of install location.
    #[track_caller]
    fn icon_for(state: TrayIconState) -> AppResult<Icon> {
        let rgba: [u8; 4] = match state {
            TrayIconState::Idle => [0x2e, 0x6f, 0xdb, 0xff],      // blue
            TrayIconState::Recording => [0xd8, 0x2c, 0x2c, 0xff], // red
            TrayIconState::Processing => [0xe0, 0xb3, 0x1e, 0xff], // yellow
            TrayIconState::Disabled => [0x8a, 0x8a, 0x8a, 0xff],  // grey
            TrayIconState::Error => [0xe0, 0x6a, 0x1e, 0xff],     // orange
        };

        let pixels: Vec<u8> = rgba
            .iter()
            .copied()
            .cycle()
            .take((ICON_SIZE * ICON_SIZE * 4) as usize)
            .collect();

        Icon::from_rgba(pixels, ICON_SIZE, ICON_SIZE).map_err(|e| AppError::Tray {
            reason: format!("Failed to create icon from RGBA: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// Get the listening toggle menu item ID.
    pub fn listening_item_id(&self) -> &MenuId {
        self.listening_item.id()
    }

    /// Get the exit menu item ID.
    pub fn exit_item_id(&self) -> &MenuId {
        &self.exit_item_id
    }
}
