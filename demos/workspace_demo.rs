#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use std::collections::BTreeMap;

use eframe::egui;
use egui::{Color32, Pos2, Rect, Vec2};
use egui_dockspace::{
    Canvas, ContainerId, DockEvent, DockWindow, DropTarget, FrameInput, WindowId, Workspace,
    WorkspaceError, WorkspaceOptions, WorkspaceState,
};

const LAYOUT_KEY: &str = "egui_dockspace_layout";

/// A demo window: a colored panel with a title bar it can be dragged by while floating.
struct Panel {
    title: String,
    persist_id: String,
    color: Color32,
    closable: bool,
    bounds: Rect,
    grab: Option<Vec2>,
}

impl Panel {
    const TITLE_BAR_HEIGHT: f32 = 22.0;

    fn new(title: &str, color: Color32) -> Self {
        Self {
            title: title.to_owned(),
            persist_id: title.to_lowercase().replace(' ', "-"),
            color,
            closable: true,
            bounds: Rect::from_min_size(Pos2::new(100.0, 100.0), Vec2::new(320.0, 240.0)),
            grab: None,
        }
    }

    fn title_bar(&self) -> Rect {
        Rect::from_min_size(
            self.bounds.min,
            Vec2::new(self.bounds.width(), Self::TITLE_BAR_HEIGHT),
        )
    }
}

impl DockWindow for Panel {
    fn title(&self) -> &str {
        &self.title
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    fn allow_close(&self) -> bool {
        self.closable
    }

    fn is_dragging(&self) -> bool {
        self.grab.is_some()
    }

    fn persist_id(&self) -> Option<&str> {
        Some(&self.persist_id)
    }

    fn update_floating(&mut self, input: &FrameInput) {
        if let Some(pos) = input.pressed_at() {
            if self.title_bar().contains(pos) {
                self.grab = Some(pos - self.bounds.min);
            }
        }
        if let (Some(grab), Some(pos)) = (self.grab, input.pointer_pos) {
            if input.primary_down {
                self.bounds = Rect::from_min_size(pos - grab, self.bounds.size());
            }
        }
        if !input.primary_down {
            self.grab = None;
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        canvas.fill_rect(self.bounds, self.color);
        canvas.text(
            self.bounds.left_top() + Vec2::new(8.0, 14.0),
            &self.title,
            Color32::WHITE,
        );
    }
}

struct App {
    workspace: Workspace,
    panels: BTreeMap<WindowId, Panel>,
    last_events: Vec<String>,
}

impl App {
    fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut panels = BTreeMap::new();
        let specs = [
            ("Scene", Color32::from_rgb(40, 60, 90)),
            ("Hierarchy", Color32::from_rgb(60, 45, 80)),
            ("Inspector", Color32::from_rgb(45, 80, 60)),
            ("Console", Color32::from_rgb(80, 60, 40)),
            ("Assets", Color32::from_rgb(70, 40, 50)),
            ("Profiler", Color32::from_rgb(50, 70, 80)),
        ];
        for (index, (title, color)) in specs.into_iter().enumerate() {
            panels.insert(WindowId(index as u64 + 1), Panel::new(title, color));
        }
        if let Some(scene) = panels.get_mut(&WindowId(1)) {
            scene.closable = false;
        }

        let options = WorkspaceOptions {
            debug_integrity: cfg!(debug_assertions),
            ..Default::default()
        };
        let mut app = Self {
            workspace: Workspace::new_with_options(options, Default::default()),
            panels,
            last_events: Vec::new(),
        };

        let restored = cc
            .storage
            .and_then(|storage| storage.get_string(LAYOUT_KEY))
            .is_some_and(|text| app.load_layout(&text));
        if !restored {
            app.default_layout();
        }
        app
    }

    fn default_layout(&mut self) {
        if let Err(err) = self.try_default_layout() {
            log::warn!("Failed to build the default layout: {err}");
        }
    }

    fn try_default_layout(&mut self) -> Result<(), WorkspaceError> {
        let ws = &mut self.workspace;
        let panels = &self.panels;
        ws.reset_layout();
        for window in panels.keys() {
            ws.remove_window(*window);
        }

        let root = ContainerId::root();
        ws.add_window(WindowId(1), panels)?;
        ws.add_window(WindowId(6), panels)?;
        if let Some(left) = ws.dock_window(WindowId(2), &root, DropTarget::Left, panels)? {
            ws.dock_window(WindowId(5), &left, DropTarget::Bottom, panels)?;
        }
        ws.dock_window(WindowId(3), &root, DropTarget::Right, panels)?;
        ws.dock_window(WindowId(4), &root, DropTarget::Bottom, panels)?;
        Ok(())
    }

    fn load_layout(&mut self, text: &str) -> bool {
        let state: WorkspaceState = match ron::from_str(text) {
            Ok(state) => state,
            Err(err) => {
                log::warn!("Failed to parse saved layout: {err}");
                return false;
            }
        };
        let by_id: ahash::HashMap<String, WindowId> = self
            .panels
            .iter()
            .map(|(id, panel)| (panel.persist_id.clone(), *id))
            .collect();
        match self.workspace.apply_state(&state, &by_id, &mut self.panels) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("Failed to restore layout: {err}");
                false
            }
        }
    }

    fn placed(&self, window: WindowId) -> bool {
        self.workspace.container_of(window).is_some() || self.workspace.is_floating(window)
    }

    fn menu_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("Reset layout").clicked() {
                self.default_layout();
            }
            ui.separator();

            let closed: Vec<WindowId> = self
                .panels
                .keys()
                .copied()
                .filter(|&window| !self.placed(window))
                .collect();
            for window in closed {
                let Some(title) = self.panels.get(&window).map(|p| p.title.clone()) else {
                    continue;
                };
                let dock = ui.button(format!("Dock {title}")).clicked();
                let float = ui.button(format!("Float {title}")).clicked();
                let result = if dock {
                    self.workspace.add_window(window, &self.panels)
                } else if float {
                    self.workspace.add_floating_window(window, &mut self.panels)
                } else {
                    Ok(())
                };
                if let Err(err) = result {
                    log::warn!("{err}");
                }
            }

            ui.separator();
            for line in &self.last_events {
                ui.weak(line);
            }
        });
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("menu").show(ctx, |ui| self.menu_bar(ui));

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let events = self.workspace.ui(ui, &mut self.panels);
                for event in events {
                    log::debug!("{event:?}");
                    let line = match event {
                        DockEvent::Activated { window, container } => {
                            format!("{window} activated in {container}")
                        }
                        DockEvent::Closed { window, container } => {
                            format!("{window} closed from {container}")
                        }
                        DockEvent::Reordered { window, container } => {
                            format!("{window} moved within {container}")
                        }
                        DockEvent::Docked { window, container } => {
                            format!("{window} docked into {container}")
                        }
                        DockEvent::Floated(window) => format!("{window} floated"),
                    };
                    self.last_events.push(line);
                }
                let excess = self.last_events.len().saturating_sub(3);
                self.last_events.drain(..excess);
            });
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let state = self.workspace.capture_state(&self.panels);
        match ron::to_string(&state) {
            Ok(text) => storage.set_string(LAYOUT_KEY, text),
            Err(err) => log::warn!("Failed to save layout: {err}"),
        }
    }
}

fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title("egui_dockspace: workspace demo"),
        ..Default::default()
    };
    eframe::run_native(
        "egui_dockspace: workspace demo",
        options,
        Box::new(|cc| Ok(Box::new(App::new(cc)))),
    )
}
