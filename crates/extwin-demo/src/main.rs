//! Scripted session against the headless bridge.
//!
//! Opens a few windows the way an extension would, simulates some toolkit
//! activity, and logs every event. Run with `RUST_LOG=debug` to see queue
//! and bridge traffic too.

use std::time::Duration;

use async_broadcast::RecvError;
use extwin::{
  ExtensionId, HeadlessBridge, HeadlessConfig, MenuItem, MenuRole, NativeEvent, WindowEvent,
  WindowFilter, WindowManager, WindowPatch, WindowProperties, WindowResult,
};

#[tokio::main]
async fn main() {
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

  if let Err(e) = run().await {
    log::error!("Demo failed: {e}");
    std::process::exit(1);
  }
}

async fn run() -> WindowResult<()> {
  let bridge = HeadlessBridge::with_config(HeadlessConfig {
    latency: Some(Duration::from_millis(5)),
    ..HeadlessConfig::default()
  });
  let manager = WindowManager::builder(bridge)
    .event_channel_capacity(256)
    .build()?;

  let mut events = manager.subscribe();
  let logger = tokio::spawn(async move {
    loop {
      match events.recv().await {
        Ok(event) => log_event(&event),
        Err(RecvError::Overflowed(n)) => {
          log::warn!("[events] Subscriber lagged, dropped {n} events");
        }
        Err(RecvError::Closed) => break,
      }
    }
  });

  let ext = ExtensionId::from("com.example.notes");
  let main = manager
    .create(
      &ext,
      WindowProperties {
        title: Some("Notes".into()),
        width: Some(960.0),
        height: Some(640.0),
        ..WindowProperties::default()
      },
    )
    .await?;
  let palette = manager
    .create(
      &ext,
      WindowProperties {
        title: Some("Palette".into()),
        parent: Some(main.id.clone()),
        modal: Some(true),
        frame: Some(false),
        width: Some(320.0),
        height: Some(240.0),
        ..WindowProperties::default()
      },
    )
    .await?;

  manager
    .set_menu(
      &main.id,
      &[MenuItem {
        label: Some("View".into()),
        submenu: Some(vec![
          MenuItem {
            tag: Some("zoom".into()),
            ..MenuItem::new("Zoom to Fit")
          },
          MenuItem::role(MenuRole::ToggleFullscreen),
        ]),
        ..MenuItem::default()
      }],
    )
    .await?;

  // Submitted together, settled in order
  let moved = manager.set_position(&main.id, 40.0, 40.0);
  let resized = manager.set_size(&main.id, 1200.0, 800.0, Some(true));
  let titled = manager.set_title(&main.id, "Notes - draft");
  moved.await?;
  resized.await?;
  titled.await?;

  // Toolkit activity
  let handle = manager.handle_of(&main.id)?;
  manager
    .on_native_event(
      handle,
      NativeEvent::Changed(WindowPatch {
        focused: Some(true),
        ..WindowPatch::default()
      }),
    )
    .await?;
  if let Some(toggle) = manager
    .get_menu(&main.id)?
    .and_then(|menu| menu.iter().find(|i| i.role == Some(MenuRole::ToggleFullscreen)).map(|i| i.id))
  {
    manager
      .on_native_event(handle, NativeEvent::MenuActivated(toggle))
      .await?;
  }

  let snapshot = manager.query(&WindowFilter::extension(ext.clone()));
  match serde_json::to_string_pretty(&snapshot) {
    Ok(json) => println!("{json}"),
    Err(e) => log::error!("Failed to serialize windows: {e}"),
  }

  manager.remove(vec![palette.id, main.id]).await?;

  drop(manager);
  if tokio::time::timeout(Duration::from_secs(1), logger).await.is_err() {
    log::warn!("Event logger did not stop");
  }
  Ok(())
}

fn log_event(event: &WindowEvent) {
  let details = event
    .menu_clicked()
    .and_then(|m| m.tag.as_deref())
    .map(|tag| format!(" tag={tag}"))
    .unwrap_or_default();
  log::info!(
    "[{:?}] {} {}{details}",
    event.origin,
    event.kind.handler_name(),
    event.target.id
  );
}
