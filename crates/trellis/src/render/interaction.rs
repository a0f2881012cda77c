//! Pointer-driven node dragging.
//!
//! A [`DragController`] belongs to one renderer and edits that renderer's
//! [`Scene`]. Pointer input is fed in by the host (a GUI event loop, a test,
//! a replay of recorded input) and observers are notified through
//! subscriptions rather than global handlers:
//!
//! ```text
//! pointer_down(node, at)  ->  DragEvent::Started
//! pointer_move(at)        ->  DragEvent::Moved     (repeated)
//! pointer_up()            ->  DragEvent::Released
//! ```

use std::fmt;

use log::{debug, trace};

use trellis_core::{geometry::Point, identifier::Id};

use super::scene::Scene;

/// Closest a dragged node centre may get to the canvas border.
pub const DRAG_MARGIN: f64 = 20.0;

/// A change in the drag state, delivered to subscribers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragEvent {
    Started { node: Id, position: Point },
    Moved { node: Id, position: Point },
    Released { node: Id, position: Point },
}

impl DragEvent {
    pub fn node(&self) -> Id {
        match self {
            Self::Started { node, .. } | Self::Moved { node, .. } | Self::Released { node, .. } => {
                *node
            }
        }
    }

    pub fn position(&self) -> Point {
        match self {
            Self::Started { position, .. }
            | Self::Moved { position, .. }
            | Self::Released { position, .. } => *position,
        }
    }
}

/// Handle returned by [`DragController::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&DragEvent) + Send>;

#[derive(Debug, Clone, Copy)]
struct ActiveDrag {
    node: Id,
    /// Node centre minus pointer position at grab time.
    grab_offset: Point,
}

/// Tracks a single drag gesture and notifies subscribers.
#[derive(Default)]
pub struct DragController {
    active: Option<ActiveDrag>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl fmt::Debug for DragController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragController")
            .field("active", &self.active)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener for drag events.
    pub fn subscribe(&mut self, listener: impl FnMut(&DragEvent) + Send + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    pub fn dragged_node(&self) -> Option<Id> {
        self.active.map(|drag| drag.node)
    }

    /// Grabs `node` with the pointer at `at`.
    ///
    /// Returns `false` and does nothing if the node is not in the scene.
    /// Grabbing while another drag is active releases the first one.
    pub fn pointer_down(&mut self, scene: &Scene, node: Id, at: Point) -> bool {
        let Some(position) = scene.position(node) else {
            debug!(node:% = node; "Ignoring pointer down on unknown node");
            return false;
        };

        if self.active.is_some() {
            self.pointer_up(scene);
        }

        self.active = Some(ActiveDrag {
            node,
            grab_offset: position.sub_point(at),
        });
        trace!(node:% = node; "Drag started");
        self.emit(DragEvent::Started { node, position });
        true
    }

    /// Follows the pointer, keeping the dragged node inside the canvas.
    ///
    /// Returns the node's new canvas position, or `None` when nothing is
    /// being dragged.
    pub fn pointer_move(&mut self, scene: &mut Scene, at: Point) -> Option<Point> {
        let drag = self.active?;
        let viewport = scene.viewport();
        let wanted = at.add_point(drag.grab_offset);
        let position = Point::new(
            wanted.x().max(DRAG_MARGIN).min(viewport.width() - DRAG_MARGIN),
            wanted.y().max(DRAG_MARGIN).min(viewport.height() - DRAG_MARGIN),
        );

        scene.set_position(drag.node, position);
        self.emit(DragEvent::Moved {
            node: drag.node,
            position,
        });
        Some(position)
    }

    /// Drops the dragged node where it is. Returns the node that was released.
    pub fn pointer_up(&mut self, scene: &Scene) -> Option<Id> {
        let drag = self.active.take()?;
        let position = scene.position(drag.node).unwrap_or(Point::ORIGIN);
        trace!(node:% = drag.node; "Drag released");
        self.emit(DragEvent::Released {
            node: drag.node,
            position,
        });
        Some(drag.node)
    }

    fn emit(&mut self, event: DragEvent) {
        for (_, listener) in &mut self.listeners {
            listener(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::{
        graph::{EdgeStyle, Graph},
        render::Viewport,
    };

    fn scene() -> Scene {
        let mut graph: Graph = Graph::new();
        graph.add_edge("a", "b", EdgeStyle::default());
        graph.node_mut("b").unwrap().set_position(Point::new(1.0, 1.0));
        // a at (40, 40), b at (360, 360)
        Scene::new(&graph, Viewport::default())
    }

    fn recorder(controller: &mut DragController) -> (SubscriptionId, Arc<Mutex<Vec<DragEvent>>>) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        let id = controller.subscribe(move |event| sink.lock().unwrap().push(*event));
        (id, events)
    }

    #[test]
    fn test_drag_moves_node_by_pointer_delta() {
        let mut scene = scene();
        let mut controller = DragController::new();
        let a = Id::new("a");

        assert!(controller.pointer_down(&scene, a, Point::new(45.0, 42.0)));
        assert_eq!(controller.dragged_node(), Some(a));

        let moved = controller.pointer_move(&mut scene, Point::new(105.0, 142.0));
        assert_eq!(moved, Some(Point::new(100.0, 140.0)));
        assert_eq!(scene.position(a), Some(Point::new(100.0, 140.0)));

        assert_eq!(controller.pointer_up(&scene), Some(a));
        assert!(!controller.is_dragging());
    }

    #[test]
    fn test_drag_is_clamped_to_canvas() {
        let mut scene = scene();
        let mut controller = DragController::new();
        let b = Id::new("b");

        controller.pointer_down(&scene, b, Point::new(360.0, 360.0));
        let moved = controller.pointer_move(&mut scene, Point::new(1000.0, -50.0));
        assert_eq!(moved, Some(Point::new(380.0, 20.0)));
    }

    #[test]
    fn test_pointer_down_on_unknown_node() {
        let scene = scene();
        let mut controller = DragController::new();
        let (_, events) = recorder(&mut controller);

        assert!(!controller.pointer_down(&scene, Id::new("nope"), Point::ORIGIN));
        assert!(!controller.is_dragging());
        assert!(events.lock().unwrap().is_empty());
    }

    #[test]
    fn test_move_without_drag_does_nothing() {
        let mut scene = scene();
        let before = scene.clone();
        let mut controller = DragController::new();

        assert_eq!(controller.pointer_move(&mut scene, Point::new(5.0, 5.0)), None);
        assert_eq!(controller.pointer_up(&scene), None);
        assert_eq!(scene, before);
    }

    #[test]
    fn test_subscribers_receive_events() {
        let mut scene = scene();
        let mut controller = DragController::new();
        let (_, events) = recorder(&mut controller);
        let a = Id::new("a");

        controller.pointer_down(&scene, a, Point::new(40.0, 40.0));
        controller.pointer_move(&mut scene, Point::new(60.0, 70.0));
        controller.pointer_up(&scene);

        let events = events.lock().unwrap();
        assert_eq!(
            *events,
            vec![
                DragEvent::Started {
                    node: a,
                    position: Point::new(40.0, 40.0)
                },
                DragEvent::Moved {
                    node: a,
                    position: Point::new(60.0, 70.0)
                },
                DragEvent::Released {
                    node: a,
                    position: Point::new(60.0, 70.0)
                },
            ]
        );
    }

    #[test]
    fn test_unsubscribe() {
        let scene = scene();
        let mut controller = DragController::new();
        let (id, events) = recorder(&mut controller);

        assert!(controller.unsubscribe(id));
        assert!(!controller.unsubscribe(id));

        controller.pointer_down(&scene, Id::new("a"), Point::ORIGIN);
        assert!(events.lock().unwrap().is_empty());
    }
}
