//! Overlay managers: modals, dialogs, drawers, sheets, toasts and a
//! processing indicator.
//!
//! Each manager is a cheap `Clone` handle over shared state, so the same
//! stack can be driven from application code and observed from the render
//! layer. Opening returns a [`Deferred`] future that resolves when the
//! overlay closes:
//!
//! ```
//! use shoji_overlay::{Modal, ModalPayload, OverlayResult};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let modal = Modal::new();
//! let closed = modal.open(ModalPayload::new("settings"));
//! modal.close();
//! assert_eq!(closed.await, OverlayResult::acknowledged());
//! # }
//! ```
//!
//! Every pending result resolves exactly once: by an explicit close, or as
//! [`OverlayResult::Cancelled`] when the overlay is superseded or swept by
//! a close-all.

mod component;
mod dialog;
mod drawer;
mod modal;
mod processing;
mod result;
mod sheet;
mod toast;

pub use component::ComponentRegistry;
pub use dialog::{Dialog, DialogKind, DialogPayload, ErrorCode};
pub use drawer::{DrawerPayload, DrawerSide, Drawers};
pub use modal::{Backdrop, Modal, ModalPayload};
pub use processing::{Processing, ProcessingPayload};
pub use result::{Deferred, OverlayResult};
pub use sheet::{SheetPayload, Sheets};
pub use toast::{ToastImage, ToastKind, ToastPayload, Toasts, DEFAULT_DURATION};

/// All overlay managers bundled for the application shell.
#[derive(Clone, Default)]
pub struct Overlays {
    pub modal: Modal,
    pub dialog: Dialog,
    pub drawers: Drawers,
    pub sheets: Sheets,
    pub toasts: Toasts,
    pub processing: Processing,
    pub components: ComponentRegistry,
}

impl Overlays {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any blocking overlay (everything but toasts) is open.
    pub fn any_open(&self) -> bool {
        self.modal.is_open()
            || self.dialog.is_open()
            || self.drawers.is_open()
            || self.sheets.is_open()
            || self.processing.is_open()
    }

    /// Sweep every overlay, cancelling pending results and clearing toasts.
    pub fn close_all(&self) {
        self.modal.close_with(OverlayResult::Cancelled);
        self.dialog.close_with(OverlayResult::Cancelled);
        self.drawers.close_all();
        self.sheets.close_all();
        self.processing.close_with(OverlayResult::Cancelled);
        self.toasts.hide_all();
    }
}
