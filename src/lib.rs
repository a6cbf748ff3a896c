//! Docking workspace for [`egui`].
//!
//! A [`Workspace`] arranges host-owned windows into tabbed [`DockContainer`]s laid out by a
//! binary split tree ([`DockTree`]). Tabs can be reordered, dragged onto another container
//! (center or one of four edges), or dropped outside to float. Floating windows dragged by
//! their own chrome can be docked back the same way.
//!
//! The workspace never owns windows. The host keeps them behind a [`WindowHost`] and the
//! workspace moves [`WindowId`] handles between containers and the floating set.
//!
//! Layouts are captured and restored with [`Workspace::capture_state`] and
//! [`Workspace::apply_state`], keyed by stable window ids (see [`DockWindow::persist_id`]).
//! With the `serde` feature the snapshot can be written with any serde format.
//!
//! ```no_run
//! # use std::collections::BTreeMap;
//! # use egui_dockspace::{DockWindow, Workspace, WindowId};
//! # fn show<W: DockWindow>(
//! #     ui: &mut egui::Ui,
//! #     workspace: &mut Workspace,
//! #     windows: &mut BTreeMap<WindowId, W>,
//! # ) {
//! for event in workspace.ui(ui, windows) {
//!     log::info!("{event:?}");
//! }
//! # }
//! ```

#![forbid(unsafe_code)]

mod canvas;
mod container;
mod drop_target;
mod error;
mod geometry;
mod input;
mod style;
mod tree;
mod window;
mod workspace;

#[cfg(test)]
mod test_support;

pub use canvas::{Canvas, ClipBoundsProvider, EguiCanvas};
pub use container::{ContainerEvent, ContainerId, ContainerResponse, DockContainer};
pub use drop_target::{DropTarget, preview_rect, probe_rects, resolve_drop_target};
pub use error::WorkspaceError;
pub use input::FrameInput;
pub use style::{ContainerStyle, TabWidth};
pub use tree::{DockNode, DockTree, NodeId, Orientation, Splitter, TreeLayout};
pub use window::{DockWindow, WindowHost, WindowId};
pub use workspace::{
    ContainerState, DockEvent, DragSession, DropPreview, FloatingState, NodeState, OverlayStyle,
    WORKSPACE_STATE_VERSION, Workspace, WorkspaceOptions, WorkspaceState,
};
