use std::sync::Arc;

use parking_lot::Mutex;

use crate::render::Canvas;
use crate::view::MapProjection;

/// A paint callback run after all layers have been composited.
pub type OverlayTask = Box<dyn FnMut(&mut dyn Canvas, &MapProjection) + Send>;

/// The set of overlay paint tasks of a map.
///
/// Overlays are the one piece of engine state that other threads touch:
/// background work finishes and wants its result drawn over the map starting
/// with the next frame. The whole set therefore lives behind a single mutex.
/// Registration locks it, and the render pass iterates the tasks while
/// holding the same lock, so a task can never be added or removed in the
/// middle of being drawn.
///
/// The type is a cheap cloneable handle; all clones share one task set.
#[derive(Clone, Default)]
pub struct OverlayTasks {
    tasks: Arc<Mutex<Vec<OverlayTask>>>,
}

impl OverlayTasks {
    /// Creates an empty task set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a paint task. May be called from any thread.
    ///
    /// Tasks are run in registration order, later tasks drawing over earlier
    /// ones. A task stays registered until [`OverlayTasks::clear`] removes
    /// it.
    pub fn add(&self, task: impl FnMut(&mut dyn Canvas, &MapProjection) + Send + 'static) {
        self.tasks.lock().push(Box::new(task));
    }

    /// Removes all registered tasks.
    pub fn clear(&self) {
        self.tasks.lock().clear();
    }

    /// Number of registered tasks.
    pub fn len(&self) -> usize {
        self.tasks.lock().len()
    }

    /// True if no tasks are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Runs every task against the canvas, in registration order.
    pub(crate) fn run(&self, canvas: &mut dyn Canvas, projection: &MapProjection) {
        let mut tasks = self.tasks.lock();
        for task in tasks.iter_mut() {
            task(canvas, projection);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    use ortelius_types::cartesian::ScreenSize;
    use ortelius_types::geo::GeoRect;

    use super::*;
    use crate::render::RasterCanvas;

    fn test_projection() -> MapProjection {
        MapProjection::new(ScreenSize::new(10, 10), GeoRect::new(0.0, 0.0, 1.0, 1.0)).unwrap()
    }

    #[test]
    fn tasks_added_from_another_thread_are_run() {
        static CALLS: AtomicUsize = AtomicUsize::new(0);

        let tasks = OverlayTasks::new();
        let handle = tasks.clone();
        thread::spawn(move || {
            handle.add(|_, _| {
                CALLS.fetch_add(1, Ordering::SeqCst);
            });
        })
        .join()
        .unwrap();

        assert_eq!(tasks.len(), 1);

        let mut canvas = RasterCanvas::new(ScreenSize::new(10, 10));
        tasks.run(&mut canvas, &test_projection());
        tasks.run(&mut canvas, &test_projection());

        assert_eq!(CALLS.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn clear_removes_all_tasks() {
        let tasks = OverlayTasks::new();
        tasks.add(|_, _| {});
        tasks.add(|_, _| {});
        assert_eq!(tasks.len(), 2);

        tasks.clear();
        assert!(tasks.is_empty());
    }
}
