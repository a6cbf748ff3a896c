use egui::{Pos2, Rect, pos2, vec2};

use super::{DockEvent, Workspace, WorkspaceOptions};
use crate::container::ContainerId;
use crate::drop_target::DropTarget;
use crate::input::FrameInput;
use crate::style::ContainerStyle;
use crate::test_support::{TestHost, w};
use crate::window::WindowId;

const WINDOWS: u64 = 8;

fn assert_workspace_ok(ws: &Workspace, seed: u64, step: usize) {
    let issues = ws.integrity_issues();
    assert!(
        issues.is_empty(),
        "seed={seed} step={step} workspace integrity failed:\n{}",
        issues.join("\n")
    );
    assert!(
        ws.tree().contains(&ContainerId::root()),
        "seed={seed} step={step}: root left the tree"
    );
    for container in ws.containers() {
        match container.active_index() {
            Some(active) => assert!(active < container.len(), "seed={seed} step={step}"),
            None => assert!(container.is_empty(), "seed={seed} step={step}"),
        }
    }
}

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed ^ 0xD0C3_D0C3_D0C3_D0C3)
    }

    fn next_u64(&mut self) -> u64 {
        // Simple LCG: deterministic, fast, no dependency.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005u64)
            .wrapping_add(1442695040888963407u64);
        self.0
    }

    fn next_usize(&mut self, upper: usize) -> usize {
        if upper == 0 {
            return 0;
        }
        (self.next_u64() as usize) % upper
    }

    fn next_f32(&mut self) -> f32 {
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }

    fn window(&mut self) -> WindowId {
        w(1 + self.next_usize(WINDOWS as usize) as u64)
    }

    fn target(&mut self) -> DropTarget {
        DropTarget::ALL[self.next_usize(DropTarget::ALL.len())]
    }

    fn container(&mut self, ws: &Workspace) -> ContainerId {
        let leaves = ws.tree().leaves();
        leaves[self.next_usize(leaves.len())].clone()
    }

    /// Somewhere in or around `bounds`.
    fn point(&mut self, bounds: Rect) -> Pos2 {
        let outer = bounds.expand(100.0);
        pos2(
            outer.left() + outer.width() * self.next_f32(),
            outer.top() + outer.height() * self.next_f32(),
        )
    }
}

fn new_workspace() -> (Workspace, TestHost) {
    let options = WorkspaceOptions {
        debug_integrity: true,
        debug_integrity_panic: true,
        ..Default::default()
    };
    let mut ws = Workspace::new_with_options(options, ContainerStyle::default());
    let host = TestHost::with_windows(1..=WINDOWS);
    for id in 1..=WINDOWS / 2 {
        ws.add_window(w(id), &host).expect("known window");
    }
    (ws, host)
}

/// Drive a press-move-release through `update`, starting on a random tab most of the time.
fn random_drag(
    rng: &mut Rng,
    ws: &mut Workspace,
    host: &mut TestHost,
    bounds: Rect,
) -> Vec<DockEvent> {
    let from = {
        let id = rng.container(ws);
        let on_tab = ws.container(&id).and_then(|c| {
            let index = rng.next_usize(c.len().max(1));
            c.tab_rect(index)
        });
        match on_tab {
            Some(tab) if rng.next_usize(4) != 0 => tab.center(),
            _ => rng.point(bounds),
        }
    };
    let to = rng.point(bounds);

    let mut events = ws.update(bounds, &FrameInput::press(from), host);
    for t in [0.25, 0.5, 1.0] {
        events.extend(ws.update(bounds, &FrameInput::drag(from.lerp(to, t)), host));
    }
    events.extend(ws.update(bounds, &FrameInput::release(to), host));
    events.extend(ws.update(bounds, &FrameInput::hover(to), host));
    events
}

#[test]
fn random_edits_keep_workspace_invariants() {
    let bounds = Rect::from_min_size(Pos2::ZERO, vec2(1000.0, 700.0));

    for seed in 0..48 {
        let mut rng = Rng::new(seed);
        let (mut ws, mut host) = new_workspace();
        ws.update(bounds, &FrameInput::default(), &mut host);

        for step in 0..160 {
            match rng.next_usize(10) {
                0..=2 => {
                    let window = rng.window();
                    let container = rng.container(&ws);
                    let target = rng.target();
                    let docked = ws
                        .dock_window(window, &container, target, &host)
                        .expect("every window is known to the host");
                    if let Some(actual) = docked {
                        assert_eq!(ws.container_of(window), Some(&actual));
                    }
                }
                3 => {
                    let window = rng.window();
                    ws.remove_window(window);
                    assert!(ws.container_of(window).is_none());
                    assert!(!ws.is_floating(window));
                }
                4 => {
                    let window = rng.window();
                    ws.add_floating_window(window, &mut host)
                        .expect("every window is known to the host");
                    assert!(ws.is_floating(window));
                }
                5 | 6 => {
                    random_drag(&mut rng, &mut ws, &mut host, bounds);
                }
                7 => {
                    if rng.next_usize(8) == 0 {
                        ws.reset_layout();
                        assert_eq!(ws.tree().leaves(), vec![ContainerId::root()]);
                    } else {
                        ws.update(bounds, &FrameInput::default(), &mut host);
                    }
                }
                _ => {
                    let state = ws.capture_state(&host);
                    let by_id = host.by_persist_id();
                    ws.apply_state(&state, &by_id, &mut host)
                        .expect("same version");
                    assert_eq!(
                        ws.capture_state(&host),
                        state,
                        "seed={seed} step={step}: capture/apply should round trip"
                    );
                }
            }

            assert_workspace_ok(&ws, seed, step);
            assert!(!ws.normalize(), "seed={seed} step={step}: normalize should be idempotent");
        }
    }
}

#[test]
fn random_drags_never_lose_windows() {
    let bounds = Rect::from_min_size(Pos2::ZERO, vec2(900.0, 600.0));

    for seed in 0..32 {
        let mut rng = Rng::new(seed);
        let (mut ws, mut host) = new_workspace();
        ws.update(bounds, &FrameInput::default(), &mut host);
        for id in WINDOWS / 2 + 1..=WINDOWS {
            let window = w(id);
            let container = rng.container(&ws);
            let target = rng.target();
            ws.dock_window(window, &container, target, &host)
                .expect("known window");
        }

        let mut closed = 0;
        for step in 0..120 {
            let events = random_drag(&mut rng, &mut ws, &mut host, bounds);
            assert_workspace_ok(&ws, seed, step);

            // Only a close glyph takes a window out of the workspace.
            closed += events
                .iter()
                .filter(|e| matches!(e, DockEvent::Closed { .. }))
                .count();
            let placed = (1..=WINDOWS)
                .filter(|&id| ws.container_of(w(id)).is_some() || ws.is_floating(w(id)))
                .count();
            assert_eq!(
                placed + closed,
                WINDOWS as usize,
                "seed={seed} step={step}: windows went missing"
            );
        }
    }
}
