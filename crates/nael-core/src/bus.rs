//! Event and command registration with RAII handles.
//!
//! Handlers stay registered exactly as long as the returned handle lives.
//! Dropping a [`Subscription`] or [`CommandRegistration`] removes the handler,
//! so teardown is just dropping the owner.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use tracing::{debug, warn};

type Handler<E> = Box<dyn FnMut(&mut E) + Send>;
type CommandHandler = Box<dyn FnMut(&str) + Send>;

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    // A handler that panicked must not wedge the bus for everyone else.
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct Handlers<E> {
    next_id: u64,
    entries: Vec<(u64, Handler<E>)>,
}

/// Fan-out of events of type `E` to every live subscriber, in subscription order.
///
/// Handlers must not subscribe or dispatch on the same bus from inside a callback.
pub struct EventBus<E> {
    inner: Arc<Mutex<Handlers<E>>>,
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Handlers {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }
}

impl<E: 'static> EventBus<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler. It receives every dispatched event until the
    /// returned [`Subscription`] is dropped.
    #[must_use = "dropping the subscription unregisters the handler immediately"]
    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: FnMut(&mut E) + Send + 'static,
    {
        let mut handlers = lock(&self.inner);
        let id = handlers.next_id;
        handlers.next_id += 1;
        handlers.entries.push((id, Box::new(handler)));
        debug!("bus: subscribed handler {id}");

        let weak: Weak<Mutex<Handlers<E>>> = Arc::downgrade(&self.inner);
        Subscription {
            release: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    lock(&inner).entries.retain(|(h, _)| *h != id);
                    debug!("bus: released handler {id}");
                }
            })),
        }
    }

    /// Deliver `event` to every handler. Returns how many handlers ran.
    pub fn dispatch(&self, event: &mut E) -> usize {
        let mut handlers = lock(&self.inner);
        for (_, handler) in handlers.entries.iter_mut() {
            handler(event);
        }
        handlers.entries.len()
    }

    /// Number of live subscriptions.
    pub fn len(&self) -> usize {
        lock(&self.inner).entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Handle returned by [`EventBus::subscribe`]. Unsubscribes on drop.
pub struct Subscription {
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

struct CommandEntry {
    id: u64,
    help: String,
    handler: CommandHandler,
}

struct Commands {
    next_id: u64,
    entries: HashMap<String, CommandEntry>,
}

/// Named slash commands. One handler per name.
pub struct CommandRegistry {
    inner: Arc<Mutex<Commands>>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Commands {
                next_id: 0,
                entries: HashMap::new(),
            })),
        }
    }
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under `name` (without the leading `/`).
    ///
    /// Registering a name twice replaces the earlier handler; the earlier
    /// registration handle then becomes inert.
    #[must_use = "dropping the registration removes the command immediately"]
    pub fn register<F>(&self, name: &str, help: &str, handler: F) -> CommandRegistration
    where
        F: FnMut(&str) + Send + 'static,
    {
        let name = name.trim_start_matches('/').to_lowercase();
        let mut commands = lock(&self.inner);
        let id = commands.next_id;
        commands.next_id += 1;
        let previous = commands.entries.insert(
            name.clone(),
            CommandEntry {
                id,
                help: help.to_string(),
                handler: Box::new(handler),
            },
        );
        if previous.is_some() {
            warn!("commands: /{name} re-registered, previous handler replaced");
        }

        CommandRegistration {
            registry: Arc::downgrade(&self.inner),
            name,
            id,
        }
    }

    /// Run the handler for `name`. Returns `false` when nothing is registered.
    pub fn invoke(&self, name: &str, args: &str) -> bool {
        let mut commands = lock(&self.inner);
        match commands.entries.get_mut(&name.to_lowercase()) {
            Some(entry) => {
                (entry.handler)(args);
                true
            }
            None => false,
        }
    }

    /// Help text for `name`, if registered.
    pub fn help(&self, name: &str) -> Option<String> {
        lock(&self.inner)
            .entries
            .get(&name.to_lowercase())
            .map(|e| e.help.clone())
    }

    /// Registered command names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = lock(&self.inner).entries.keys().cloned().collect();
        names.sort();
        names
    }
}

/// Handle returned by [`CommandRegistry::register`]. Removes the command on drop.
pub struct CommandRegistration {
    registry: Weak<Mutex<Commands>>,
    name: String,
    id: u64,
}

impl Drop for CommandRegistration {
    fn drop(&mut self) {
        let Some(inner) = self.registry.upgrade() else {
            return;
        };
        let mut commands = lock(&inner);
        // Only remove our own entry, not a later replacement.
        if commands.entries.get(&self.name).map(|e| e.id) == Some(self.id) {
            commands.entries.remove(&self.name);
            debug!("commands: removed /{}", self.name);
        }
    }
}
