/*!
Extwin - window management core for extension windows

```ignore
use extwin::{EventKind, ExtensionId, HeadlessBridge, WindowManager, WindowProperties};

// Create a manager on the current tokio runtime
let manager = WindowManager::new(HeadlessBridge::new())?;
let ext = ExtensionId::from("com.example.notes");

// Create resolves once the native window exists
let window = manager.create(&ext, WindowProperties::default()).await?;

// Mutations are queued per window and settle in submission order
let a = manager.set_position(&window.id, 10.0, 10.0);
let b = manager.set_size(&window.id, 640.0, 480.0, None);
a.await?;
b.await?;

// Reads never wait on a queue
let bounds = manager.get_bounds(&window.id)?;

// Listen for one kind, or subscribe to everything
manager.add_listener(EventKind::Moved, Arc::new(|event| println!("{event:?}")));
let mut events = manager.subscribe();
while let Ok(event) = events.recv().await {
    // handle event
}

// Toolkit-originated changes go through the same queue
manager.on_native_event(handle, NativeEvent::Closed).await?;
```
*/

mod core;

pub mod bridge;
pub mod menu;

mod types;
pub use types::*;

pub use crate::bridge::{
  HeadlessBridge, HeadlessConfig, NativeBridge, NativeCall, NativeChange, NativeEvent,
};
pub use crate::core::{Completion, Listener, ManagerConfig, WindowManager, WindowManagerBuilder};
