//! Title service lifecycle: debounced refreshes, event filtering, settings
//! write-through and baseline restore.

use std::sync::Arc;
use std::time::Duration;

use notetitle::config::{Delimiter, MemorySettingsStore, TitleSettings};
use notetitle::fields::{FieldSource, FileDescriptor};
use notetitle::test_utils::{RecordingSink, StaticHost, init_test_logging};
use notetitle::title::{TitleEvent, TitleOptions, TitleService};

const BASELINE: &str = "Notes - Obsidian v1.5.3";

struct Harness {
    host: Arc<StaticHost>,
    sink: Arc<RecordingSink>,
    store: Arc<MemorySettingsStore>,
    service: TitleService<Arc<MemorySettingsStore>>,
}

async fn start_with(host: StaticHost, settings: TitleSettings) -> Harness {
    init_test_logging(None);
    let host = Arc::new(host);
    let sink = Arc::new(RecordingSink::default());
    let store = Arc::new(MemorySettingsStore::new(settings));

    let service = TitleService::start(
        host.clone(),
        sink.clone(),
        store.clone(),
        BASELINE,
        TitleOptions::default(),
    )
    .await
    .unwrap();

    Harness {
        host,
        sink,
        store,
        service,
    }
}

async fn start(host: StaticHost) -> Harness {
    start_with(host, TitleSettings::default()).await
}

async fn past_debounce() {
    tokio::time::sleep(Duration::from_millis(600)).await;
}

#[tokio::test(start_paused = true)]
async fn test_start_renders_for_current_file() {
    let host = StaticHost::new("Notes");
    host.set_active(Some(FileDescriptor::file("projects/todo.md")));
    let h = start(host).await;

    assert_eq!(h.sink.titles(), vec!["todo - Notes - App v1.5.3"]);
    assert_eq!(h.service.host_version(), "1.5.3");
    assert_eq!(h.service.baseline_title(), BASELINE);
}

#[tokio::test(start_paused = true)]
async fn test_start_without_file_uses_empty_template() {
    let h = start(StaticHost::new("Notes")).await;
    assert_eq!(h.sink.last().as_deref(), Some("Notes - App v1.5.3"));
}

#[tokio::test(start_paused = true)]
async fn test_rapid_events_render_once_with_last_file() {
    let h = start(StaticHost::new("Notes")).await;
    h.sink.clear();

    for name in ["a.md", "b.md", "c.md", "d.md", "e.md"] {
        h.service.handle(TitleEvent::ActiveChanged(Some(FileDescriptor::file(name))));
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    assert_eq!(h.sink.count(), 0);
    assert!(h.service.has_pending_render());

    past_debounce().await;
    assert_eq!(h.sink.titles(), vec!["e - Notes - App v1.5.3"]);
    assert!(!h.service.has_pending_render());
}

#[tokio::test(start_paused = true)]
async fn test_render_waits_for_quiet_period() {
    let h = start(StaticHost::new("Notes")).await;
    h.sink.clear();

    h.service.handle(TitleEvent::ActiveChanged(Some(FileDescriptor::file("todo.md"))));
    tokio::time::sleep(Duration::from_millis(400)).await;
    assert_eq!(h.sink.count(), 0);

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(h.sink.count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_restores_baseline_once_and_drops_pending() {
    let h = start(StaticHost::new("Notes")).await;
    h.sink.clear();

    h.service.handle(TitleEvent::ActiveChanged(Some(FileDescriptor::file("todo.md"))));
    let sink = h.sink.clone();
    h.service.shutdown().await;

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(sink.titles(), vec![BASELINE]);
}

#[tokio::test(start_paused = true)]
async fn test_non_file_activation_renders_empty_template() {
    let h = start(StaticHost::new("Notes")).await;
    h.sink.clear();

    h.service.handle(TitleEvent::ActiveChanged(Some(FileDescriptor::folder("projects"))));
    past_debounce().await;
    assert_eq!(h.sink.last().as_deref(), Some("Notes - App v1.5.3"));

    h.service.handle(TitleEvent::ActiveChanged(None));
    past_debounce().await;
    assert_eq!(h.sink.last().as_deref(), Some("Notes - App v1.5.3"));
}

#[tokio::test(start_paused = true)]
async fn test_rename_only_matters_for_active_file() {
    let host = StaticHost::new("Notes");
    host.set_active(Some(FileDescriptor::file("new.md")));
    let h = start(host).await;
    h.sink.clear();

    h.service.handle(TitleEvent::Renamed {
        file: FileDescriptor::file("elsewhere.md"),
        old_path: "before.md".to_string(),
    });
    past_debounce().await;
    assert_eq!(h.sink.count(), 0);

    h.service.handle(TitleEvent::Renamed {
        file: FileDescriptor::file("new.md"),
        old_path: "old.md".to_string(),
    });
    past_debounce().await;
    assert_eq!(h.sink.titles(), vec!["new - Notes - App v1.5.3"]);
}

#[tokio::test(start_paused = true)]
async fn test_metadata_change_picks_up_new_front_matter() {
    let host = StaticHost::new("Notes").with_front_matter("todo.md", "project: Apollo");
    host.set_active(Some(FileDescriptor::file("todo.md")));
    let settings = TitleSettings {
        title_template: "{{frontmatter.project}}~~{{basename}}".to_string(),
        ..TitleSettings::default()
    };
    let h = start_with(host, settings).await;
    assert_eq!(h.sink.last().as_deref(), Some("Apollo - todo"));

    h.host.set_front_matter("todo.md", "project: Gemini");
    h.service.handle(TitleEvent::MetadataChanged(FileDescriptor::file("other.md")));
    past_debounce().await;
    assert_eq!(h.sink.last().as_deref(), Some("Apollo - todo"));

    h.service.handle(TitleEvent::MetadataChanged(FileDescriptor::file("todo.md")));
    past_debounce().await;
    assert_eq!(h.sink.last().as_deref(), Some("Gemini - todo"));
}

#[tokio::test(start_paused = true)]
async fn test_delete_only_renders_when_nothing_is_active() {
    let host = StaticHost::new("Notes");
    host.set_active(Some(FileDescriptor::file("keep.md")));
    let h = start(host).await;
    h.sink.clear();

    h.service.handle(TitleEvent::Deleted(FileDescriptor::file("gone.md")));
    past_debounce().await;
    assert_eq!(h.sink.count(), 0);

    h.host.set_active(None);
    h.service.handle(TitleEvent::Deleted(FileDescriptor::file("keep.md")));
    past_debounce().await;
    assert_eq!(h.sink.titles(), vec!["Notes - App v1.5.3"]);
}

#[tokio::test(start_paused = true)]
async fn test_unresolved_front_matter_is_skipped() {
    let host = StaticHost::new("Notes").with_front_matter("daily.md", "created: <% tp.date.now() %>");
    host.set_active(Some(FileDescriptor::file("daily.md")));
    let settings = TitleSettings {
        title_template: "{{frontmatter.created}}~~{{basename}}".to_string(),
        ..TitleSettings::default()
    };
    let h = start_with(host, settings).await;
    assert_eq!(h.sink.last().as_deref(), Some("daily"));
}

#[tokio::test(start_paused = true)]
async fn test_front_matter_failure_degrades() {
    let host = StaticHost::new("Notes").with_front_matter("todo.md", "project: Apollo");
    host.fail_front_matter("todo.md");
    host.set_active(Some(FileDescriptor::file("todo.md")));
    let settings = TitleSettings {
        title_template: "{{frontmatter.project}}~~{{basename}}~~{{vault}}".to_string(),
        ..TitleSettings::default()
    };
    let h = start_with(host, settings).await;
    assert_eq!(h.sink.last().as_deref(), Some("todo - Notes"));
}

#[tokio::test(start_paused = true)]
async fn test_workspace_field() {
    let host = StaticHost::new("Notes").with_workspace("Writing");
    let settings = TitleSettings {
        title_template_empty: "{{workspace}}~~{{vault}}".to_string(),
        ..TitleSettings::default()
    };
    let h = start_with(host, settings).await;
    assert_eq!(h.sink.last().as_deref(), Some("Writing - Notes"));

    h.host.set_workspace(None);
    h.service.refresh_now(None);
    assert_eq!(h.sink.last().as_deref(), Some("Notes"));
}

#[tokio::test(start_paused = true)]
async fn test_settings_edit_writes_through_and_rerenders() {
    let host = StaticHost::new("Notes");
    host.set_active(Some(FileDescriptor::file("todo.md")));
    let h = start(host).await;
    h.sink.clear();

    let settings = h
        .service
        .update_settings(|settings| {
            settings.title_template = "{{basename}}%%{{vault}}".to_string();
            settings.title_separator = " | ".to_string();
            settings.delimiter = Delimiter::Percent;
        })
        .await
        .unwrap();

    assert_eq!(h.store.save_count(), 1);
    assert_eq!(h.store.current(), Some(settings.clone()));
    assert_eq!(h.service.settings(), settings);
    assert_eq!(h.sink.titles(), vec!["todo | Notes"]);
}

#[tokio::test(start_paused = true)]
async fn test_invalid_setting_is_rejected_without_saving() {
    let h = start(StaticHost::new("Notes")).await;

    assert!(h.service.set_setting("delimiter", "**").await.is_err());
    assert!(h.service.set_setting("colour", "red").await.is_err());
    assert_eq!(h.store.save_count(), 0);

    h.service.set_setting("separator", " / ").await.unwrap();
    assert_eq!(h.store.save_count(), 1);
    assert_eq!(h.service.settings().title_separator, " / ");
}

#[tokio::test(start_paused = true)]
async fn test_custom_debounce_window() {
    init_test_logging(None);
    let host: Arc<dyn FieldSource> = Arc::new(StaticHost::new("Notes"));
    let sink = Arc::new(RecordingSink::default());
    let options = TitleOptions {
        debounce: Duration::from_millis(50),
    };
    let service = TitleService::start(host, sink.clone(), MemorySettingsStore::default(), "", options)
        .await
        .unwrap();
    sink.clear();

    service.handle(TitleEvent::ActiveChanged(None));
    tokio::time::sleep(Duration::from_millis(60)).await;
    assert_eq!(sink.titles(), vec!["Notes - App v"]);
}
