use glam::{Mat4, Quat, Vec3};

/// Observer of per-eye head status.
pub trait StatusListener {
    fn update(&mut self, position: Vec3, orientation: Quat, projection: &Mat4);
}

impl<F> StatusListener for F
where
    F: FnMut(Vec3, Quat, &Mat4),
{
    fn update(&mut self, position: Vec3, orientation: Quat, projection: &Mat4) {
        self(position, orientation, projection)
    }
}

/// Handle returned by registration; used to remove the listener later.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ListenerId(u64);

/// Ordered set of status listeners owned by the session.
///
/// Notification runs under the session's `&mut` borrow, so the list cannot
/// change while a frame is notifying: each frame sees the list as it was when
/// the frame started.
#[derive(Default)]
pub struct StatusListenerRegistry {
    next_id: u64,
    listeners: Vec<(ListenerId, Box<dyn StatusListener>)>,
}

impl StatusListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, listener: impl StatusListener + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` if `id` was not registered.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Notifies every listener in registration order.
    pub fn notify(&mut self, position: Vec3, orientation: Quat, projection: &Mat4) {
        for (_, listener) in &mut self.listeners {
            listener.update(position, orientation, projection);
        }
    }
}

impl std::fmt::Debug for StatusListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusListenerRegistry")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
